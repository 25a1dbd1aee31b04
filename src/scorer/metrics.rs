use super::end::End;
use super::value::Shot;
use crate::config::ScoringConfiguration;
use crate::consts::{MISS_LABEL, X_LABEL};
use crate::error::{QuiverError, QvResult};
use serde::ser::SerializeMap;
use serde::{Deserialize, Serialize, Serializer};
use std::collections::HashSet;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EndExtreme {
    pub end_number: u32,
    pub value: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EndTotal {
    pub end_number: u32,
    pub total: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CumulativePoint {
    pub end_number: u32,
    pub cumulative: u32,
}

/// Histogram of arrow values, kept in face order (X first, M last).
/// Serializes as a JSON object whose keys follow that order.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Distribution {
    buckets: Vec<(String, u32)>,
}

impl Distribution {
    /// Empty histogram with one bucket per label the config can produce.
    pub fn for_config(config: &ScoringConfiguration) -> Self {
        let mut labels = vec![X_LABEL.to_string()];
        match &config.scoring_values {
            Some(values) => {
                labels.extend(values.iter().filter(|&&v| v > 0).map(u32::to_string));
            }
            None => {
                labels.extend((1..=config.max_score).rev().map(|v| v.to_string()));
            }
        }
        labels.push(MISS_LABEL.to_string());

        Self {
            buckets: labels.into_iter().map(|l| (l, 0)).collect(),
        }
    }

    pub fn get(&self, label: &str) -> Option<u32> {
        self.buckets
            .iter()
            .find(|(l, _)| l == label)
            .map(|(_, count)| *count)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, u32)> {
        self.buckets.iter().map(|(l, c)| (l.as_str(), *c))
    }

    pub fn total(&self) -> u32 {
        self.buckets.iter().map(|(_, c)| c).sum()
    }

    fn record(&mut self, shot: &Shot) {
        let label = shot.label();
        match self.buckets.iter_mut().find(|(l, _)| *l == label) {
            Some((_, count)) => *count += 1,
            None => self.buckets.push((label, 1)),
        }
    }
}

impl Serialize for Distribution {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.buckets.len()))?;
        for (label, count) in &self.buckets {
            map.serialize_entry(label, count)?;
        }
        map.end()
    }
}

/// Report for a fully scored session.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionStatistics {
    pub total_score: u32,
    pub max_possible: u32,
    pub x_count: u32,
    pub ten_plus_count: u32,
    pub miss_count: u32,
    pub average_per_arrow: f64,
    pub average_per_end: f64,
    pub end_standard_deviation: f64,
    pub best_end: EndExtreme,
    pub worst_end: EndExtreme,
    pub end_series: Vec<EndTotal>,
    pub cumulative_series: Vec<CumulativePoint>,
    pub distribution: Distribution,
}

impl SessionStatistics {
    pub fn percentage(&self) -> f64 {
        if self.max_possible == 0 {
            return 0.0;
        }
        self.total_score as f64 / self.max_possible as f64 * 100.0
    }
}

/// "10+" in the reports: an X-valued arrow or anything at or above maxScore.
#[inline(always)]
pub fn is_ten_plus(config: &ScoringConfiguration, points: u32) -> bool {
    points == config.x_value || points >= config.max_score
}

/// Counts unset arrows across ends `1..=ends_planned`; a missing end counts
/// as a whole end of unset arrows.
pub fn unscored_arrows(config: &ScoringConfiguration, ends: &[End]) -> usize {
    (1..=config.ends_planned)
        .map(|n| match ends.iter().find(|e| e.end_number() == n) {
            Some(end) => (config.arrows_per_end as usize).saturating_sub(end.arrows_entered()),
            None => config.arrows_per_end as usize,
        })
        .sum()
}

/// Every end must carry exactly `arrows_per_end` slots and appear once.
fn check_shape(config: &ScoringConfiguration, ends: &[End]) -> QvResult<()> {
    let arrows = config.arrows_per_end as usize;
    let mut seen = HashSet::with_capacity(ends.len());

    for end in ends {
        if end.shots().len() != arrows {
            return Err(QuiverError::InvalidInput(format!(
                "End {} has {} slots, expected {}",
                end.end_number(),
                end.shots().len(),
                arrows
            )));
        }
        if !seen.insert(end.end_number()) {
            return Err(QuiverError::InvalidInput(format!(
                "End {} appears more than once",
                end.end_number()
            )));
        }
    }
    Ok(())
}

pub fn compute_statistics(
    config: &ScoringConfiguration,
    ends: &[End],
) -> QvResult<SessionStatistics> {
    config.validate()?;
    check_shape(config, ends)?;

    let missing = unscored_arrows(config, ends);
    if missing > 0 {
        return Err(QuiverError::NotReady {
            missing,
            total: config.total_arrows(),
        });
    }

    let mut planned: Vec<&End> = ends
        .iter()
        .filter(|e| (1..=config.ends_planned).contains(&e.end_number()))
        .collect();
    planned.sort_by_key(|e| e.end_number());

    let mut total_score = 0;
    let mut x_count = 0;
    let mut ten_plus_count = 0;
    let mut miss_count = 0;
    let mut distribution = Distribution::for_config(config);
    let mut end_series = Vec::with_capacity(planned.len());
    let mut cumulative_series = Vec::with_capacity(planned.len());

    // Earliest end wins ties in both directions: only strictly better/worse replaces.
    let mut best = EndExtreme {
        end_number: planned[0].end_number(),
        value: planned[0].end_score(),
    };
    let mut worst = best;

    for end in &planned {
        for shot in end.shots().iter().flatten() {
            let points = shot.points(config);
            if shot.is_x() {
                x_count += 1;
            }
            if is_ten_plus(config, points) {
                ten_plus_count += 1;
            }
            if points == 0 {
                miss_count += 1;
            }
            distribution.record(shot);
        }

        let value = end.end_score();
        total_score += value;
        end_series.push(EndTotal {
            end_number: end.end_number(),
            total: value,
        });
        cumulative_series.push(CumulativePoint {
            end_number: end.end_number(),
            cumulative: total_score,
        });

        if value > best.value {
            best = EndExtreme {
                end_number: end.end_number(),
                value,
            };
        }
        if value < worst.value {
            worst = EndExtreme {
                end_number: end.end_number(),
                value,
            };
        }
    }

    let end_count = planned.len() as f64;
    let average_per_end = total_score as f64 / end_count;
    let variance = end_series
        .iter()
        .map(|e| {
            let diff = e.total as f64 - average_per_end;
            diff * diff
        })
        .sum::<f64>()
        / end_count;

    Ok(SessionStatistics {
        total_score,
        max_possible: config.max_possible(),
        x_count,
        ten_plus_count,
        miss_count,
        average_per_arrow: total_score as f64 / config.total_arrows() as f64,
        average_per_end,
        end_standard_deviation: variance.sqrt(),
        best_end: best,
        worst_end: worst,
        end_series,
        cumulative_series,
        distribution,
    })
}
