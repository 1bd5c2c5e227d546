use clap::{Args, Subcommand};
use kube::ResourceExt;

use gardenctl_core::error::{GardenError, GardenResult};
use gardenctl_core::target::{Target, TargetKind};
use gardenctl_k8s::shoot::Shoot;

use crate::session::Session;

#[derive(Args)]
pub struct TargetArgs {
    #[command(subcommand)]
    pub kind: TargetCommand,
}

#[derive(Subcommand)]
pub enum TargetCommand {
    /// Target a garden cluster from the config, dropping any seed or shoot
    Garden { name: String },
    /// Target a seed cluster of the targeted garden
    Seed { name: String },
    /// Target a shoot; its seed is taken from the shoot resource on the garden
    Shoot { name: String },
}

pub async fn execute(args: TargetArgs, session: Session) -> anyhow::Result<()> {
    let mut target = session.target.clone();

    match args.kind {
        TargetCommand::Garden { name } => {
            if session.config.find(&name).is_none() {
                return Err(GardenError::UnknownGarden(name).into());
            }
            target.select(TargetKind::Garden, name)?;
        }
        TargetCommand::Seed { name } => {
            target.select(TargetKind::Seed, name)?;
        }
        TargetCommand::Shoot { name } => {
            let shoots = session.resolver().list_shoots().await?;
            select_shoot(&mut target, &shoots, &name)?;
        }
    }

    session.store.write(&target)?;

    if let Some(entry) = target.deepest() {
        tracing::info!(kind = %entry.kind, name = %entry.name, "Target changed");
        println!("Targeted {} {}", entry.kind, entry.name);
    }
    Ok(())
}

/// Targets shoot `name` together with the seed it is scheduled to. When
/// several shoots share the name the last one listed wins.
fn select_shoot(target: &mut Target, shoots: &[Shoot], name: &str) -> GardenResult<()> {
    let shoot = shoots
        .iter()
        .rev()
        .find(|s| s.name_any() == name)
        .ok_or_else(|| GardenError::ShootNotFound(name.to_string()))?;
    let seed = shoot
        .seed_name()
        .ok_or_else(|| GardenError::ShootUnscheduled(name.to_string()))?;
    target.select(TargetKind::Seed, seed)?;
    target.select(TargetKind::Shoot, name)
}

#[cfg(test)]
mod tests {
    use gardenctl_k8s::shoot::ShootSpec;

    use super::*;

    fn shoot(name: &str, seed: Option<&str>) -> Shoot {
        let mut spec = ShootSpec::default();
        spec.cloud.seed = seed.map(str::to_string);
        let mut shoot = Shoot::new(name, spec);
        shoot.metadata.namespace = Some("garden-dev".to_string());
        shoot
    }

    fn on_seed(seed: &str) -> Target {
        let mut target = Target::with_garden("dev");
        target.select(TargetKind::Seed, seed).unwrap();
        target
    }

    #[test]
    fn shoot_brings_its_seed() {
        let mut target = Target::with_garden("dev");
        let shoots = vec![shoot("db", Some("gcp")), shoot("web", Some("aws"))];

        select_shoot(&mut target, &shoots, "web").unwrap();
        assert_eq!(target.name_of(TargetKind::Seed), Some("aws"));
        assert_eq!(target.name_of(TargetKind::Shoot), Some("web"));
    }

    #[test]
    fn shoot_replaces_other_seed() {
        let mut target = on_seed("gcp");
        let shoots = vec![shoot("web", Some("aws"))];

        select_shoot(&mut target, &shoots, "web").unwrap();
        assert_eq!(target.name_of(TargetKind::Seed), Some("aws"));
    }

    #[test]
    fn unscheduled_shoot_keeps_target() {
        let mut target = on_seed("aws");
        let shoots = vec![shoot("web", None)];

        let err = select_shoot(&mut target, &shoots, "web").unwrap_err();
        assert!(matches!(err, GardenError::ShootUnscheduled(name) if name == "web"));
        assert_eq!(target, on_seed("aws"));
    }

    #[test]
    fn unknown_shoot_keeps_target() {
        let mut target = on_seed("aws");
        let shoots = vec![shoot("db", Some("aws"))];

        let err = select_shoot(&mut target, &shoots, "web").unwrap_err();
        assert!(matches!(err, GardenError::ShootNotFound(name) if name == "web"));
        assert_eq!(target, on_seed("aws"));
    }
}
