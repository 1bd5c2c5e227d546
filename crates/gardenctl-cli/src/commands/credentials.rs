use clap::Args;

use crate::session::Session;

#[derive(Args)]
pub struct CredentialsArgs {}

pub async fn execute(_args: CredentialsArgs, session: Session) -> anyhow::Result<()> {
    let credentials = session.resolver().shoot_cluster_credentials().await?;
    println!("username: {}", credentials.username);
    println!("password: {}", credentials.password);
    Ok(())
}
