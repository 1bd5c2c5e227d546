use clap::Args;

use crate::commands::KindArg;
use crate::session::Session;

#[derive(Args)]
pub struct DropArgs {
    /// Kind to untarget together with everything below it [default: the most specific one]
    #[arg(value_enum)]
    pub kind: Option<KindArg>,
}

pub async fn execute(args: DropArgs, session: Session) -> anyhow::Result<()> {
    let mut target = session.target.clone();
    let removed = match args.kind {
        Some(kind) => target.untarget(kind.into())?,
        None => vec![target.untarget_deepest()?],
    };

    session.store.write(&target)?;

    for entry in removed {
        println!("Untargeted {} {}", entry.kind, entry.name);
    }
    Ok(())
}
