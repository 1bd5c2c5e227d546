use std::path::PathBuf;

use clap::Parser;

mod commands;
pub mod session;

#[derive(Parser)]
#[command(
    name = "gardenctl",
    about = "Target garden, seed and shoot clusters and run kubectl against them",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: commands::Commands,

    /// Garden home holding the cluster config, the target and the kubeconfig cache [default: ~/.garden]
    #[arg(long, env = "GARDENCTL_HOME", global = true)]
    home: Option<PathBuf>,

    /// kubectl binary to run
    #[arg(long, env = "GARDENCTL_KUBECTL", default_value = "kubectl", global = true)]
    kubectl: PathBuf,

    /// Verbosity level (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let filter = match cli.verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let session = session::Session::load(cli.home, cli.kubectl)?;

    match cli.command {
        commands::Commands::Target(args) => commands::target::execute(args, session).await,
        commands::Commands::Drop(args) => commands::untarget::execute(args, session).await,
        commands::Commands::Show(args) => commands::show::execute(args, session).await,
        commands::Commands::Ls(args) => commands::ls::execute(args, session).await,
        commands::Commands::Info(args) => commands::info::execute(args, session).await,
        commands::Commands::Kubeconfig(args) => commands::kubeconfig::execute(args, session).await,
        commands::Commands::Credentials(args) => {
            commands::credentials::execute(args, session).await
        }
        commands::Commands::Namespace(args) => commands::namespace::execute(args, session).await,
        commands::Commands::Kubectl(args) => commands::kubectl::execute(args, session).await,
    }
}
