use crate::reports;
use clap::Args;
use quiver::error::QvResult;
use quiver::leaderboard;
use quiver::loader;
use rayon::prelude::*;
use std::path::PathBuf;
use tracing::info;

#[derive(Args, Debug, Clone)]
pub struct RankArgs {
    /// Saved session files; the file stem is used as the archer name.
    #[arg(required = true)]
    pub sessions: Vec<PathBuf>,

    #[arg(long, default_value_t = false)]
    pub json: bool,
}

pub fn run(args: RankArgs) -> QvResult<()> {
    let entries = args
        .sessions
        .par_iter()
        .map(|path| {
            let name = path
                .file_stem()
                .map(|s| s.to_string_lossy().into_owned())
                .unwrap_or_else(|| path.display().to_string());
            loader::load_session(path).map(|aggregate| (name, aggregate))
        })
        .collect::<QvResult<Vec<_>>>()?;

    info!("🏹 Ranking {} sessions", entries.len());
    let standings = leaderboard::rank(&entries);

    if args.json {
        println!("{}", serde_json::to_string_pretty(&standings)?);
    } else {
        reports::print_standings(&standings);
    }
    Ok(())
}
