use clap::Args;

use gardenctl_core::target::TargetKind;

use crate::session::Session;

#[derive(Args)]
pub struct InfoArgs {}

pub async fn execute(_args: InfoArgs, session: Session) -> anyhow::Result<()> {
    let mut resolver = session.resolver();

    let cluster = resolver.current_cluster_display_name().await?;
    println!("cluster: {cluster}");

    if resolver.current_kind()? == TargetKind::Shoot {
        let control_plane = resolver.shoot_cluster_display_name().await?;
        println!("control plane: {control_plane}");
    }
    Ok(())
}
