pub mod end;
pub mod engine;
pub mod metrics;
pub mod value;

pub use self::end::{End, EndState};
pub use self::engine::Tally;
pub use self::metrics::{compute_statistics, Distribution, EndExtreme, SessionStatistics};
pub use self::value::{RawArrow, Shot};

use crate::config::ScoringConfiguration;
use crate::error::{QuiverError, QvResult};
use crate::protocol::{AggregateRecord, ArrowEvent, EndRecord, SessionFile};
use tracing::{info, warn};

/// A session / score header together with the ends it owns.
///
/// The totals are recomputed in full after every mutation, so the getters
/// never do any work.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScoreAggregate {
    config: ScoringConfiguration,
    ends: Vec<End>,
    tally: Tally,
}

impl ScoreAggregate {
    /// Validates `config` and eagerly seeds ends `1..=ends_planned`.
    pub fn new(config: ScoringConfiguration) -> QvResult<Self> {
        config.validate()?;

        let mut ends = Vec::with_capacity(config.ends_planned as usize);
        engine::seed_ends(&config, &mut ends);

        info!(
            "New score: {} ends x {} arrows (max {}, X = {})",
            config.ends_planned, config.arrows_per_end, config.max_score, config.x_value
        );

        let mut aggregate = Self {
            config,
            ends,
            tally: Tally::default(),
        };
        aggregate.recompute();
        Ok(aggregate)
    }

    pub fn config(&self) -> &ScoringConfiguration {
        &self.config
    }

    pub fn ends(&self) -> &[End] {
        &self.ends
    }

    pub fn end(&self, end_number: u32) -> Option<&End> {
        self.ends.iter().find(|e| e.end_number() == end_number)
    }

    pub fn tally(&self) -> Tally {
        self.tally
    }

    pub fn total_score(&self) -> u32 {
        self.tally.total_score
    }

    pub fn x_count(&self) -> u32 {
        self.tally.x_count
    }

    pub fn arrows_entered(&self) -> usize {
        self.tally.arrows_entered
    }

    pub fn ends_completed(&self) -> usize {
        self.tally.ends_completed
    }

    pub fn remaining_arrows(&self) -> usize {
        metrics::unscored_arrows(&self.config, &self.ends)
    }

    pub fn is_complete(&self) -> bool {
        self.remaining_arrows() == 0
    }

    pub fn state(&self) -> EndState {
        if self.tally.arrows_entered == 0 {
            EndState::Unscored
        } else if self.is_complete() {
            EndState::Complete
        } else {
            EndState::PartiallyScored
        }
    }

    /// `(end_number, cumulative)` for every end, scored or not.
    pub fn running_totals(&self) -> Vec<(u32, u32)> {
        let mut running = 0;
        self.ends
            .iter()
            .map(|e| {
                running += e.end_score();
                (e.end_number(), running)
            })
            .collect()
    }

    /// Sets one slot and recomputes the end and the aggregate.
    /// Rejected input leaves everything untouched.
    pub fn record_arrow(&mut self, end_number: u32, slot: usize, raw: RawArrow) -> QvResult<&End> {
        let idx = self.end_index(end_number)?;
        engine::apply_arrow(&self.config, &mut self.ends[idx], slot, raw)?;
        self.recompute();
        Ok(&self.ends[idx])
    }

    pub fn apply_event(&mut self, event: &ArrowEvent) -> QvResult<&End> {
        self.record_arrow(event.end_number, event.slot_index, event.value)
    }

    pub fn clear_arrow(&mut self, end_number: u32, slot: usize) -> QvResult<&End> {
        self.record_arrow(end_number, slot, RawArrow::Unset)
    }

    /// Keypad auto-advance: fills the first unset slot of the earliest
    /// incomplete end. Returns where the arrow landed.
    pub fn record_next(&mut self, raw: RawArrow) -> QvResult<(u32, usize)> {
        if raw == RawArrow::Unset {
            return Err(QuiverError::InvalidInput(
                "record_next needs a value; use clear_last to remove one".to_string(),
            ));
        }

        let (end_number, slot) = self
            .ends
            .iter()
            .find_map(|e| {
                e.shots()
                    .iter()
                    .position(Option::is_none)
                    .map(|slot| (e.end_number(), slot))
            })
            .ok_or_else(|| {
                QuiverError::InvalidInput("Every arrow is already scored".to_string())
            })?;

        self.record_arrow(end_number, slot, raw)?;
        Ok((end_number, slot))
    }

    /// Keypad backspace: clears the last filled slot of the highest-numbered
    /// end that has any entry. `None` when nothing has been entered.
    pub fn clear_last(&mut self) -> Option<(u32, usize)> {
        let (end_number, slot) = self.ends.iter().rev().find_map(|e| {
            e.shots()
                .iter()
                .rposition(Option::is_some)
                .map(|slot| (e.end_number(), slot))
        })?;

        self.record_arrow(end_number, slot, RawArrow::Unset).ok()?;
        Some((end_number, slot))
    }

    /// Raises `ends_planned` and seeds the new ends. Entered scores are kept.
    pub fn grow(&mut self, ends_planned: u32) -> QvResult<usize> {
        if ends_planned < self.config.ends_planned {
            return Err(QuiverError::Config(format!(
                "Cannot shrink endsPlanned from {} to {}",
                self.config.ends_planned, ends_planned
            )));
        }

        self.config.ends_planned = ends_planned;
        let appended = engine::seed_ends(&self.config, &mut self.ends);
        self.recompute();

        if appended > 0 {
            info!("Score grown to {} ends (+{})", ends_planned, appended);
        }
        Ok(appended)
    }

    /// Statistics for a fully scored session; `NotReady` otherwise.
    pub fn statistics(&self) -> QvResult<SessionStatistics> {
        compute_statistics(&self.config, &self.ends)
    }

    pub fn to_records(&self) -> (AggregateRecord, Vec<EndRecord>) {
        let aggregate = AggregateRecord {
            total_score: self.tally.total_score,
            x_count: self.tally.x_count,
            arrows_per_end: self.config.arrows_per_end,
            ends_planned: self.config.ends_planned,
            max_score: self.config.max_score,
            x_value: self.config.x_value,
            scoring_values: self.config.scoring_values.clone(),
        };

        let ends = self
            .ends
            .iter()
            .map(|e| EndRecord {
                end_number: e.end_number(),
                scores: e
                    .shots()
                    .iter()
                    .map(|s| s.map(|shot| shot.points(&self.config)))
                    .collect(),
                end_score: e.end_score(),
                x_count: e.x_count(),
                x_slots: e
                    .shots()
                    .iter()
                    .enumerate()
                    .filter(|(_, s)| matches!(s, Some(Shot::X)))
                    .map(|(i, _)| i)
                    .collect(),
            })
            .collect();

        (aggregate, ends)
    }

    pub fn to_session_file(&self) -> SessionFile {
        let (aggregate, ends) = self.to_records();
        SessionFile { aggregate, ends }
    }

    /// Rebuilds an aggregate from persisted rows.
    ///
    /// Derived totals are always recomputed from the slots; stored totals that
    /// disagree are logged and replaced. Ends missing at the tail are seeded.
    pub fn from_records(aggregate: &AggregateRecord, records: &[EndRecord]) -> QvResult<Self> {
        let config = aggregate.config();
        config.validate()?;

        let arrows = config.arrows_per_end as usize;
        let mut ends = Vec::with_capacity(config.ends_planned as usize);

        for (i, rec) in records.iter().enumerate() {
            let expected = i as u32 + 1;
            if rec.end_number != expected {
                return Err(QuiverError::InvalidInput(format!(
                    "Ends must be contiguous from 1: expected end {}, found {}",
                    expected, rec.end_number
                )));
            }
            if rec.end_number > config.ends_planned {
                return Err(QuiverError::InvalidInput(format!(
                    "End {} is outside 1..={}",
                    rec.end_number, config.ends_planned
                )));
            }
            if rec.scores.len() != arrows {
                return Err(QuiverError::InvalidInput(format!(
                    "End {} has {} slots, expected {}",
                    rec.end_number,
                    rec.scores.len(),
                    arrows
                )));
            }

            let x_slots = x_slots_for(&config, rec)?;
            let shots = rec
                .scores
                .iter()
                .enumerate()
                .map(|(slot, value)| {
                    restore_shot(&config, rec.end_number, &x_slots, slot, *value)
                })
                .collect::<QvResult<Vec<_>>>()?;

            let end = End::from_shots(rec.end_number, shots, &config);
            if end.end_score() != rec.end_score || end.x_count() != rec.x_count {
                warn!(
                    "End {}: stored totals ({}, {}X) disagree with slots ({}, {}X); using slots",
                    rec.end_number,
                    rec.end_score,
                    rec.x_count,
                    end.end_score(),
                    end.x_count()
                );
            }
            ends.push(end);
        }

        engine::seed_ends(&config, &mut ends);

        let mut restored = Self {
            config,
            ends,
            tally: Tally::default(),
        };
        restored.recompute();

        if restored.total_score() != aggregate.total_score
            || restored.x_count() != aggregate.x_count
        {
            warn!(
                "Stored header totals ({}, {}X) disagree with ends ({}, {}X); using ends",
                aggregate.total_score,
                aggregate.x_count,
                restored.total_score(),
                restored.x_count()
            );
        }
        Ok(restored)
    }

    pub fn from_session_file(file: &SessionFile) -> QvResult<Self> {
        Self::from_records(&file.aggregate, &file.ends)
    }

    fn end_index(&self, end_number: u32) -> QvResult<usize> {
        if end_number == 0 || end_number > self.config.ends_planned {
            return Err(QuiverError::InvalidInput(format!(
                "End {} is outside 1..={}",
                end_number, self.config.ends_planned
            )));
        }
        self.ends
            .iter()
            .position(|e| e.end_number() == end_number)
            .ok_or_else(|| {
                QuiverError::InvalidInput(format!("End {} has not been seeded", end_number))
            })
    }

    fn recompute(&mut self) {
        self.tally = engine::tally(&self.ends);
    }
}

/// Slots to restore as X. Rows without `xSlots` only carry `xCount`, so the
/// first `xCount` slots holding `xValue` are taken; which ones does not change
/// any total.
fn x_slots_for(config: &ScoringConfiguration, rec: &EndRecord) -> QvResult<Vec<usize>> {
    if !rec.x_slots.is_empty() || rec.x_count == 0 {
        return Ok(rec.x_slots.clone());
    }

    let candidates: Vec<usize> = rec
        .scores
        .iter()
        .enumerate()
        .filter(|(_, v)| **v == Some(config.x_value))
        .map(|(i, _)| i)
        .take(rec.x_count as usize)
        .collect();

    if candidates.len() < rec.x_count as usize {
        return Err(QuiverError::InvalidInput(format!(
            "End {} claims {} X but only {} slots hold {}",
            rec.end_number,
            rec.x_count,
            candidates.len(),
            config.x_value
        )));
    }
    Ok(candidates)
}

fn restore_shot(
    config: &ScoringConfiguration,
    end_number: u32,
    x_slots: &[usize],
    slot: usize,
    value: Option<u32>,
) -> QvResult<Option<Shot>> {
    let Some(points) = value else {
        return Ok(None);
    };

    if x_slots.contains(&slot) {
        if points != config.x_value {
            return Err(QuiverError::InvalidInput(format!(
                "End {} slot {} is marked X but holds {} (xValue is {})",
                end_number, slot, points, config.x_value
            )));
        }
        return Ok(Some(Shot::X));
    }

    if points == 0 {
        return Ok(Some(Shot::Miss));
    }

    // Rows without xSlots or xCount: an X-only value can still be recognised.
    if points == config.x_value && points > config.max_score && !config.accepts(points) {
        return Ok(Some(Shot::X));
    }

    engine::normalize(config, RawArrow::Points(points))
}
