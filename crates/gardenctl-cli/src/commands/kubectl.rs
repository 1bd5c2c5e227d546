use clap::Args;

use crate::commands::KindArg;
use crate::session::Session;

#[derive(Args)]
pub struct KubectlArgs {
    /// Run against this kind instead of the most specific targeted cluster
    #[arg(long, value_enum)]
    pub on: Option<KindArg>,

    /// Arguments passed to kubectl
    #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
    pub args: Vec<String>,
}

pub async fn execute(args: KubectlArgs, session: Session) -> anyhow::Result<()> {
    let mut resolver = session.resolver();
    let kind = match args.on {
        Some(kind) => kind.into(),
        None => resolver.current_kind()?,
    };
    let kubeconfig = resolver.kubeconfig_path_for(kind)?;

    let code = session.kubectl.passthrough(&kubeconfig, &args.args).await?;
    if code != 0 {
        std::process::exit(code);
    }
    Ok(())
}
