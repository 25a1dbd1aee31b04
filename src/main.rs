use clap::{Parser, Subcommand};
use std::process;
use tracing::{error, Level};

mod cmd;
mod reports;

#[derive(Parser, Debug)]
#[command(author, version, about = "End-by-end archery scoring", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    #[arg(global = true, long, default_value_t = false)]
    debug: bool,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Apply a CSV of keypad events and report the result.
    Score(cmd::score::ScoreArgs),
    /// Statistics for a saved, fully scored session.
    Stats(cmd::stats::StatsArgs),
    /// Write a saved session's ends as CSV.
    Export(cmd::export::ExportArgs),
    /// Generate a random, fully scored session.
    Simulate(cmd::simulate::SimulateArgs),
    /// Leaderboard over saved sessions.
    Rank(cmd::rank::RankArgs),
    /// List the built-in rule sets.
    Presets,
}

fn main() {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_max_level(if cli.debug { Level::DEBUG } else { Level::INFO })
        .with_writer(std::io::stderr)
        .init();

    let result = match cli.command {
        Commands::Score(args) => cmd::score::run(args),
        Commands::Stats(args) => cmd::stats::run(args),
        Commands::Export(args) => cmd::export::run(args),
        Commands::Simulate(args) => cmd::simulate::run(args),
        Commands::Rank(args) => cmd::rank::run(args),
        Commands::Presets => {
            reports::print_presets();
            Ok(())
        }
    };

    if let Err(e) = result {
        if e.is_not_ready() {
            error!("⏳ {}", e);
            process::exit(2);
        }
        error!("❌ {}", e);
        process::exit(1);
    }
}
