use super::value::Shot;
use crate::config::ScoringConfiguration;
use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, EnumIter, Serialize, Deserialize)]
pub enum EndState {
    Unscored,
    PartiallyScored,
    Complete,
}

/// One round of shooting. `end_score` and `x_count` are derived from `shots`
/// and are only ever written by [`End::recompute`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct End {
    end_number: u32,
    shots: Vec<Option<Shot>>,
    end_score: u32,
    x_count: u32,
}

impl End {
    pub fn new(end_number: u32, arrows_per_end: u32) -> Self {
        Self {
            end_number,
            shots: vec![None; arrows_per_end as usize],
            end_score: 0,
            x_count: 0,
        }
    }

    pub(crate) fn from_shots(
        end_number: u32,
        shots: Vec<Option<Shot>>,
        config: &ScoringConfiguration,
    ) -> Self {
        let mut end = Self {
            end_number,
            shots,
            end_score: 0,
            x_count: 0,
        };
        end.recompute(config);
        end
    }

    pub fn end_number(&self) -> u32 {
        self.end_number
    }

    pub fn shots(&self) -> &[Option<Shot>] {
        &self.shots
    }

    pub fn end_score(&self) -> u32 {
        self.end_score
    }

    pub fn x_count(&self) -> u32 {
        self.x_count
    }

    pub fn arrows_entered(&self) -> usize {
        self.shots.iter().filter(|s| s.is_some()).count()
    }

    pub fn is_complete(&self) -> bool {
        self.shots.iter().all(Option::is_some)
    }

    pub fn state(&self) -> EndState {
        match self.arrows_entered() {
            0 => EndState::Unscored,
            n if n == self.shots.len() => EndState::Complete,
            _ => EndState::PartiallyScored,
        }
    }

    /// Slot labels for display/export; unset slots are empty strings.
    pub fn labels(&self) -> Vec<String> {
        self.shots
            .iter()
            .map(|s| s.map(|shot| shot.label()).unwrap_or_default())
            .collect()
    }

    pub(crate) fn set_slot(&mut self, slot: usize, value: Option<Shot>) {
        self.shots[slot] = value;
    }

    /// Full recompute from the slot array.
    pub(crate) fn recompute(&mut self, config: &ScoringConfiguration) {
        self.end_score = self
            .shots
            .iter()
            .flatten()
            .map(|shot| shot.points(config))
            .sum();

        // Only explicit X entries count, and only when xValue >= maxScore.
        self.x_count = if config.x_value >= config.max_score {
            self.shots.iter().flatten().filter(|s| s.is_x()).count() as u32
        } else {
            0
        };
    }
}
