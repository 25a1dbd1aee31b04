use crate::scorer::metrics::is_ten_plus;
use crate::scorer::ScoreAggregate;
use rayon::prelude::*;
use serde::Serialize;
use std::cmp::Ordering;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Standing {
    pub rank: usize,
    pub name: String,
    pub total_score: u32,
    pub x_count: u32,
    pub ten_plus_count: u32,
    pub arrows_entered: usize,
    pub complete: bool,
}

impl Standing {
    fn same_placing(&self, other: &Standing) -> bool {
        self.total_score == other.total_score
            && self.x_count == other.x_count
            && self.ten_plus_count == other.ten_plus_count
    }
}

/// Unranked summary of one score, usable mid-session.
pub fn summarize(name: &str, aggregate: &ScoreAggregate) -> Standing {
    let config = aggregate.config();
    let ten_plus_count = aggregate
        .ends()
        .iter()
        .flat_map(|e| e.shots().iter().flatten())
        .filter(|shot| is_ten_plus(config, shot.points(config)))
        .count() as u32;

    Standing {
        rank: 0,
        name: name.to_string(),
        total_score: aggregate.total_score(),
        x_count: aggregate.x_count(),
        ten_plus_count,
        arrows_entered: aggregate.arrows_entered(),
        complete: aggregate.is_complete(),
    }
}

fn placing_order(a: &Standing, b: &Standing) -> Ordering {
    b.total_score
        .cmp(&a.total_score)
        .then(b.x_count.cmp(&a.x_count))
        .then(b.ten_plus_count.cmp(&a.ten_plus_count))
        .then_with(|| a.name.cmp(&b.name))
}

/// Orders by total, then X count, then 10+ count. Exact ties share a rank and
/// the next rank is skipped ("1224").
pub fn rank(entries: &[(String, ScoreAggregate)]) -> Vec<Standing> {
    let mut standings: Vec<Standing> = entries
        .par_iter()
        .map(|(name, aggregate)| summarize(name, aggregate))
        .collect();

    standings.sort_by(placing_order);

    for i in 0..standings.len() {
        standings[i].rank = if i > 0 && standings[i].same_placing(&standings[i - 1]) {
            standings[i - 1].rank
        } else {
            i + 1
        };
    }
    standings
}
