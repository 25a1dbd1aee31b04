use clap::Args;
use quiver::error::QvResult;
use quiver::loader;
use std::path::PathBuf;
use tracing::info;

#[derive(Args, Debug, Clone)]
pub struct ExportArgs {
    #[arg(short, long)]
    pub session: PathBuf,

    #[arg(short, long)]
    pub output: PathBuf,
}

pub fn run(args: ExportArgs) -> QvResult<()> {
    let aggregate = loader::load_session(&args.session)?;
    loader::export_ends_to_file(&aggregate, &args.output)?;
    info!(
        "📄 Exported {} ends to {:?}",
        aggregate.ends().len(),
        args.output
    );
    Ok(())
}
