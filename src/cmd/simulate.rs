use crate::reports;
use clap::Args;
use quiver::config::{ScoringArgs, ScoringConfiguration};
use quiver::error::{QuiverError, QvResult};
use quiver::loader;
use quiver::scorer::{RawArrow, ScoreAggregate};
use std::path::PathBuf;
use tracing::{debug, info};

#[derive(Args, Debug, Clone)]
pub struct SimulateArgs {
    #[command(flatten)]
    pub scoring: ScoringArgs,

    #[arg(short = 'S', long)]
    pub seed: Option<u64>,

    /// Chance (0..=1) of staying in the current ring instead of dropping one.
    #[arg(long, default_value_t = 0.7)]
    pub skill: f64,

    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

/// Keypad values from best to worst: X, then the plain values.
fn face_values(config: &ScoringConfiguration) -> Vec<RawArrow> {
    let plain: Vec<u32> = match &config.scoring_values {
        Some(values) => values.clone(),
        None => (0..=config.max_score).rev().collect(),
    };

    let mut face = vec![RawArrow::X];
    face.extend(plain.into_iter().map(|v| match v {
        0 => RawArrow::Miss,
        p => RawArrow::Points(p),
    }));
    face.push(RawArrow::Miss);
    face.dedup();
    face
}

fn draw(rng: &mut fastrand::Rng, face: &[RawArrow], skill: f64) -> RawArrow {
    let mut idx = 0;
    while idx + 1 < face.len() && rng.f64() > skill {
        idx += 1;
    }
    face[idx]
}

pub fn run(args: SimulateArgs) -> QvResult<()> {
    if !(0.0..=1.0).contains(&args.skill) {
        return Err(QuiverError::Config(format!(
            "--skill must be within 0..=1, got {}",
            args.skill
        )));
    }

    let config = args.scoring.resolve()?;
    let face = face_values(&config);
    let mut rng = match args.seed {
        Some(s) => fastrand::Rng::with_seed(s),
        None => fastrand::Rng::new(),
    };

    let mut aggregate = ScoreAggregate::new(config)?;
    for _ in 0..aggregate.config().total_arrows() {
        let arrow = draw(&mut rng, &face, args.skill);
        let (end_number, slot) = aggregate.record_next(arrow)?;
        debug!("🎯 End {} slot {}: {}", end_number, slot, arrow);
    }

    reports::print_end_table(&aggregate);
    reports::print_statistics(&aggregate.statistics()?);

    if let Some(path) = &args.output {
        loader::save_session(&aggregate, path)?;
        info!("💾 Saved simulated session to {:?}", path);
    }
    Ok(())
}
