use clap::{Args, Subcommand};
use kube::ResourceExt;

use gardenctl_core::target::TargetKind;

use crate::session::Session;

#[derive(Args)]
pub struct LsArgs {
    #[command(subcommand)]
    pub what: LsCommand,
}

#[derive(Subcommand)]
pub enum LsCommand {
    /// Garden clusters from the config; the targeted one is marked with `*`
    Gardens,
    /// Shoots on the targeted garden cluster
    Shoots,
}

pub async fn execute(args: LsArgs, session: Session) -> anyhow::Result<()> {
    match args.what {
        LsCommand::Gardens => {
            let current = session.target.name_of(TargetKind::Garden);
            for garden in &session.config.garden_clusters {
                let marker = if current == Some(garden.name.as_str()) { "*" } else { " " };
                println!("{marker} {:<24} {}", garden.name, garden.kubeconfig);
            }
        }
        LsCommand::Shoots => {
            let shoots = session.resolver().list_shoots().await?;
            println!("{:<24} {:<24} {:<20} STATE", "NAMESPACE", "NAME", "SEED");
            for shoot in &shoots {
                let state = shoot
                    .status
                    .as_ref()
                    .and_then(|s| s.last_operation.as_ref())
                    .map(|op| format!("{} {} ({}%)", op.type_, op.state, op.progress))
                    .unwrap_or_else(|| "-".to_string());
                println!(
                    "{:<24} {:<24} {:<20} {}",
                    shoot.namespace().unwrap_or_default(),
                    shoot.name_any(),
                    shoot.seed_name().unwrap_or("-"),
                    state
                );
            }
        }
    }
    Ok(())
}
