use crate::reports;
use clap::Args;
use quiver::config::ScoringArgs;
use quiver::error::QvResult;
use quiver::loader;
use quiver::scorer::ScoreAggregate;
use std::path::PathBuf;
use tracing::{info, warn};

#[derive(Args, Debug, Clone)]
pub struct ScoreArgs {
    #[command(flatten)]
    pub scoring: ScoringArgs,

    /// CSV with header `end,slot,value`.
    #[arg(short, long)]
    pub events: PathBuf,

    /// Write the resulting session as JSON.
    #[arg(long)]
    pub save: Option<PathBuf>,

    /// Print statistics as JSON instead of tables.
    #[arg(long, default_value_t = false)]
    pub json: bool,
}

pub fn run(args: ScoreArgs) -> QvResult<()> {
    let config = args.scoring.resolve()?;
    let mut aggregate = ScoreAggregate::new(config)?;

    let loaded = loader::load_events_from_file(&args.events)?;
    info!("📂 Loaded {} events from {:?}", loaded.events.len(), args.events);

    let mut rejected = 0;
    for event in &loaded.events {
        if let Err(e) = aggregate.apply_event(event) {
            warn!(
                "⚠️  Rejected end {} slot {}: {}",
                event.end_number, event.slot_index, e
            );
            rejected += 1;
        }
    }
    if loaded.skipped + rejected > 0 {
        warn!(
            "⚠️  {} rows skipped, {} events rejected",
            loaded.skipped, rejected
        );
    }

    reports::print_end_table(&aggregate);

    match aggregate.statistics() {
        Ok(stats) => {
            if args.json {
                println!("{}", serde_json::to_string_pretty(&stats)?);
            } else {
                reports::print_statistics(&stats);
            }
        }
        Err(e) if e.is_not_ready() => {
            println!(
                "\n⏳ Session not complete: {} arrows remaining",
                aggregate.remaining_arrows()
            );
        }
        Err(e) => return Err(e),
    }

    if let Some(path) = &args.save {
        loader::save_session(&aggregate, path)?;
        info!("💾 Saved session to {:?}", path);
    }
    Ok(())
}
