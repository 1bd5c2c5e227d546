use clap::Args;

use crate::commands::KindArg;
use crate::session::Session;

#[derive(Args)]
pub struct KubeconfigArgs {
    /// Cluster kind [default: the most specific targeted one]
    #[arg(value_enum)]
    pub kind: Option<KindArg>,
}

pub async fn execute(args: KubeconfigArgs, session: Session) -> anyhow::Result<()> {
    let mut resolver = session.resolver();
    let kind = match args.kind {
        Some(kind) => kind.into(),
        None => resolver.current_kind()?,
    };
    let path = resolver.kubeconfig_path_for(kind)?;
    println!("{}", path.display());
    Ok(())
}
