use crate::reports;
use clap::Args;
use quiver::error::QvResult;
use quiver::loader;
use std::path::PathBuf;

#[derive(Args, Debug, Clone)]
pub struct StatsArgs {
    #[arg(short, long)]
    pub session: PathBuf,

    #[arg(long, default_value_t = false)]
    pub json: bool,
}

pub fn run(args: StatsArgs) -> QvResult<()> {
    let aggregate = loader::load_session(&args.session)?;
    let stats = aggregate.statistics()?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&stats)?);
    } else {
        reports::print_end_table(&aggregate);
        reports::print_statistics(&stats);
    }
    Ok(())
}
