#![allow(dead_code)]

use quiver::config::ScoringConfiguration;
use quiver::scorer::{RawArrow, ScoreAggregate};

pub fn config(arrows_per_end: u32, ends_planned: u32, max_score: u32, x_value: u32) -> ScoringConfiguration {
    ScoringConfiguration::new(arrows_per_end, ends_planned, max_score, x_value)
        .expect("valid test config")
}

/// Keypad label to raw input: "X", "M", "9", "" (clear).
pub fn arrow(label: &str) -> RawArrow {
    label.parse().expect("valid keypad label")
}

/// Enters `labels` into slots 0.. of `end`.
pub fn shoot(aggregate: &mut ScoreAggregate, end: u32, labels: &[&str]) {
    for (slot, label) in labels.iter().enumerate() {
        aggregate
            .record_arrow(end, slot, arrow(label))
            .unwrap_or_else(|e| panic!("end {} slot {} '{}' rejected: {}", end, slot, label, e));
    }
}

/// New aggregate with ends 1.. filled from `ends`.
pub fn scored(config: ScoringConfiguration, ends: &[&[&str]]) -> ScoreAggregate {
    let mut aggregate = ScoreAggregate::new(config).expect("aggregate");
    for (i, labels) in ends.iter().enumerate() {
        shoot(&mut aggregate, i as u32 + 1, labels);
    }
    aggregate
}
