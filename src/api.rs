use crate::config::ScoringConfiguration;
use crate::error::{QuiverError, QvResult};
use crate::protocol::{AggregateRecord, ArrowEvent, EndRecord, SessionFile};
use crate::scorer::{RawArrow, ScoreAggregate, SessionStatistics};
use std::collections::HashMap;
use std::sync::RwLock;
use tracing::{info, warn};

/// In-process store of live scores, keyed by session id.
///
/// Every mutating call holds the write lock across validation and the full
/// recompute, so readers never observe a half-applied arrow.
pub struct ScoringState {
    pub sessions: RwLock<HashMap<String, ScoreAggregate>>,
}

impl Default for ScoringState {
    fn default() -> Self {
        Self {
            sessions: RwLock::new(HashMap::new()),
        }
    }
}

/// Starts a score, or re-seeds an existing one.
///
/// Calling again with a compatible config (same face, only `ends_planned`
/// may grow) keeps every entered arrow and appends the missing ends.
pub fn start_session(
    state: &ScoringState,
    session_id: &str,
    config: ScoringConfiguration,
) -> QvResult<AggregateRecord> {
    config.validate()?;
    let mut sessions = state
        .sessions
        .write()
        .map_err(|_| QuiverError::LockPoisoned)?;

    if let Some(existing) = sessions.get_mut(session_id) {
        if !existing.config().is_compatible_with(&config) {
            return Err(QuiverError::Config(format!(
                "Session '{}' already exists with a different scoring face",
                session_id
            )));
        }
        if config.ends_planned < existing.config().ends_planned {
            warn!(
                "Session '{}': ignoring smaller endsPlanned ({} < {})",
                session_id,
                config.ends_planned,
                existing.config().ends_planned
            );
        } else {
            existing.grow(config.ends_planned)?;
        }
        return Ok(existing.to_records().0);
    }

    let aggregate = ScoreAggregate::new(config)?;
    let record = aggregate.to_records().0;
    sessions.insert(session_id.to_string(), aggregate);
    info!("Session '{}' started", session_id);
    Ok(record)
}

/// Applies one keypad event and returns the updated end row.
pub fn record_event(
    state: &ScoringState,
    session_id: &str,
    event: &ArrowEvent,
) -> QvResult<EndRecord> {
    let mut sessions = state
        .sessions
        .write()
        .map_err(|_| QuiverError::LockPoisoned)?;
    let aggregate = sessions
        .get_mut(session_id)
        .ok_or_else(|| QuiverError::UnknownSession(session_id.to_string()))?;

    if let Err(e) = aggregate.apply_event(event) {
        warn!("Session '{}': rejected {:?}: {}", session_id, event, e);
        return Err(e);
    }
    end_record(aggregate, event.end_number)
}

pub fn clear_slot(
    state: &ScoringState,
    session_id: &str,
    end_number: u32,
    slot_index: usize,
) -> QvResult<EndRecord> {
    record_event(
        state,
        session_id,
        &ArrowEvent::new(end_number, slot_index, RawArrow::Unset),
    )
}

/// Statistics for a finished session; `NotReady` tells the caller to send the
/// archer back to scoring entry.
pub fn session_statistics(state: &ScoringState, session_id: &str) -> QvResult<SessionStatistics> {
    let sessions = state
        .sessions
        .read()
        .map_err(|_| QuiverError::LockPoisoned)?;
    let aggregate = sessions
        .get(session_id)
        .ok_or_else(|| QuiverError::UnknownSession(session_id.to_string()))?;
    aggregate.statistics()
}

pub fn snapshot(state: &ScoringState, session_id: &str) -> QvResult<SessionFile> {
    let sessions = state
        .sessions
        .read()
        .map_err(|_| QuiverError::LockPoisoned)?;
    sessions
        .get(session_id)
        .map(ScoreAggregate::to_session_file)
        .ok_or_else(|| QuiverError::UnknownSession(session_id.to_string()))
}

/// Loads a persisted session into the store, replacing any live copy.
pub fn restore(state: &ScoringState, session_id: &str, file: &SessionFile) -> QvResult<()> {
    let aggregate = ScoreAggregate::from_session_file(file)?;
    let mut sessions = state
        .sessions
        .write()
        .map_err(|_| QuiverError::LockPoisoned)?;
    sessions.insert(session_id.to_string(), aggregate);
    info!("Session '{}' restored", session_id);
    Ok(())
}

fn end_record(aggregate: &ScoreAggregate, end_number: u32) -> QvResult<EndRecord> {
    let (_, ends) = aggregate.to_records();
    ends.into_iter()
        .find(|e| e.end_number == end_number)
        .ok_or_else(|| QuiverError::InvalidInput(format!("End {} not found", end_number)))
}
