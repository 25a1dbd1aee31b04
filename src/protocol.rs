//! Shapes exchanged with the UI and persistence collaborators.
use crate::config::ScoringConfiguration;
use crate::scorer::value::RawArrow;
use serde::{Deserialize, Serialize};

/// One keypad tap: `{ "endNumber": 1, "slotIndex": 0, "value": "X" }`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ArrowEvent {
    pub end_number: u32,
    pub slot_index: usize,
    pub value: RawArrow,
}

impl ArrowEvent {
    pub fn new(end_number: u32, slot_index: usize, value: RawArrow) -> Self {
        Self {
            end_number,
            slot_index,
            value,
        }
    }
}

/// Persisted end row.
///
/// `x_slots` records which filled slots were entered as X. Without it an X
/// and a plain max-score arrow are indistinguishable when `xValue == maxScore`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EndRecord {
    pub end_number: u32,
    pub scores: Vec<Option<u32>>,
    pub end_score: u32,
    pub x_count: u32,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub x_slots: Vec<usize>,
}

/// Persisted session / score header.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AggregateRecord {
    pub total_score: u32,
    pub x_count: u32,
    pub arrows_per_end: u32,
    pub ends_planned: u32,
    pub max_score: u32,
    pub x_value: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scoring_values: Option<Vec<u32>>,
}

impl AggregateRecord {
    /// The configuration stored on the header. Not validated here.
    pub fn config(&self) -> ScoringConfiguration {
        ScoringConfiguration {
            arrows_per_end: self.arrows_per_end,
            ends_planned: self.ends_planned,
            max_score: self.max_score,
            x_value: self.x_value,
            scoring_values: self.scoring_values.clone(),
        }
    }
}

/// Session document written by the CLI.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionFile {
    pub aggregate: AggregateRecord,
    pub ends: Vec<EndRecord>,
}
