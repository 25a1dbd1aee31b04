use super::end::End;
use super::value::{RawArrow, Shot};
use crate::config::ScoringConfiguration;
use crate::error::{QuiverError, QvResult};
use tracing::debug;

/// Running totals over a set of ends.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Tally {
    pub total_score: u32,
    pub x_count: u32,
    pub arrows_entered: usize,
    pub ends_completed: usize,
}

/// Maps a keypad tap onto a stored slot value, or rejects it.
///
/// `Ok(None)` means "clear the slot". A numeric 0 is stored as a miss. Only the
/// explicit X sentinel yields [`Shot::X`], even when `xValue == maxScore`.
pub fn normalize(config: &ScoringConfiguration, raw: RawArrow) -> QvResult<Option<Shot>> {
    match raw {
        RawArrow::Unset => Ok(None),
        RawArrow::X => Ok(Some(Shot::X)),
        RawArrow::Miss => Ok(Some(Shot::Miss)),
        RawArrow::Points(p) if config.accepts(p) => {
            if p == 0 {
                Ok(Some(Shot::Miss))
            } else {
                Ok(Some(Shot::Hit(p)))
            }
        }
        RawArrow::Points(p) => Err(QuiverError::InvalidInput(match &config.scoring_values {
            Some(values) => format!("{} is not one of the allowed values {:?}", p, values),
            None => format!("{} is outside 0..={}", p, config.max_score),
        })),
    }
}

/// Writes one slot of `end` and recomputes the end from scratch.
///
/// Every check runs before the slot is touched, so a rejected call leaves
/// `end` exactly as it was.
pub fn apply_arrow(
    config: &ScoringConfiguration,
    end: &mut End,
    slot: usize,
    raw: RawArrow,
) -> QvResult<()> {
    let end_number = end.end_number();
    if end_number == 0 || end_number > config.ends_planned {
        return Err(QuiverError::InvalidInput(format!(
            "End {} is outside 1..={}",
            end_number, config.ends_planned
        )));
    }
    if slot >= config.arrows_per_end as usize || slot >= end.shots().len() {
        return Err(QuiverError::InvalidInput(format!(
            "Slot {} is outside 0..{}",
            slot, config.arrows_per_end
        )));
    }

    let value = normalize(config, raw)?;
    end.set_slot(slot, value);
    end.recompute(config);

    debug!(
        "End {} slot {} <- {:?}: end_score={}, x_count={}",
        end_number,
        slot,
        value,
        end.end_score(),
        end.x_count()
    );
    Ok(())
}

/// Appends ends `max+1 ..= ends_planned`, each with every slot unset.
///
/// Existing ends are left alone, so calling this again with the same config
/// is a no-op and calling it after `ends_planned` grew only adds the new ends.
/// Returns how many ends were appended.
pub fn seed_ends(config: &ScoringConfiguration, ends: &mut Vec<End>) -> usize {
    let current_max = ends.iter().map(End::end_number).max().unwrap_or(0);
    let before = ends.len();

    for end_number in (current_max + 1)..=config.ends_planned {
        ends.push(End::new(end_number, config.arrows_per_end));
    }

    let appended = ends.len() - before;
    if appended > 0 {
        debug!(
            "Seeded ends {}..={} ({} new)",
            current_max + 1,
            config.ends_planned,
            appended
        );
    }
    appended
}

/// Full recompute of the aggregate totals.
pub fn tally(ends: &[End]) -> Tally {
    ends.iter().fold(Tally::default(), |mut t, end| {
        t.total_score += end.end_score();
        t.x_count += end.x_count();
        t.arrows_entered += end.arrows_entered();
        if end.is_complete() {
            t.ends_completed += 1;
        }
        t
    })
}
