use clap::{Args, ValueEnum};

use crate::session::Session;

#[derive(Args)]
pub struct ShowArgs {
    /// Output format
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Yaml)]
    pub output: OutputFormat,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum OutputFormat {
    Yaml,
    Json,
}

pub async fn execute(args: ShowArgs, session: Session) -> anyhow::Result<()> {
    let rendered = match args.output {
        OutputFormat::Yaml => serde_yaml::to_string(&session.target)?,
        OutputFormat::Json => serde_json::to_string_pretty(&session.target)?,
    };
    println!("{}", rendered.trim_end());
    Ok(())
}
