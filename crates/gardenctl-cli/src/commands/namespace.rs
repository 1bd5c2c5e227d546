use clap::Args;

use gardenctl_core::target::TargetKind;

use crate::session::Session;

#[derive(Args)]
pub struct NamespaceArgs {
    /// Shoot name [default: the targeted shoot]
    pub shoot: Option<String>,
}

pub async fn execute(args: NamespaceArgs, session: Session) -> anyhow::Result<()> {
    let shoot = match args.shoot {
        Some(shoot) => shoot,
        None => session.target.require(TargetKind::Shoot)?.to_string(),
    };
    let namespace = session.resolver().shoot_backing_namespace(&shoot).await?;
    println!("{namespace}");
    Ok(())
}
