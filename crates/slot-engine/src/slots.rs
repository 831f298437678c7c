//! Slot finder: earliest-first candidate slots of a requested duration.
//!
//! Each free interval long enough for the request contributes exactly one slot,
//! anchored at its start. Shorter intervals contribute nothing. The finder never
//! widens the horizon on its own; an empty result is for the caller to act on.

use chrono::Duration;

use crate::availability::Availability;
use crate::error::{Result, ScheduleError};
use crate::event::BusyEvent;
use crate::interval::{Instant, Interval};
use crate::preferences::Preferences;

/// Default number of alternatives offered to a caller.
pub const DEFAULT_MAX_RESULTS: usize = 5;

/// Find up to `max_results` slots of exactly `duration` within `horizon`.
///
/// # Errors
/// Returns `ScheduleError::InvalidRequest` for a non-positive duration and
/// `ScheduleError::InvalidTimezone` for an unknown preference timezone.
pub fn find(
    duration: Duration,
    horizon: Interval,
    prefs: &Preferences,
    busy: &[BusyEvent],
    max_results: usize,
) -> Result<Vec<Interval>> {
    ensure_positive(duration)?;
    let availability = Availability::compute(busy, prefs, horizon)?;
    find_in(&availability, duration, max_results)
}

/// Find slots in an already computed availability.
pub fn find_in(availability: &Availability, duration: Duration, max_results: usize) -> Result<Vec<Interval>> {
    ensure_positive(duration)?;

    availability
        .free
        .iter()
        .filter(|free| free.duration() >= duration)
        .take(max_results)
        .map(|free| Interval::starting_at(free.start(), duration))
        .collect()
}

/// Reorder slots by distance of their start from `target`, nearest first.
///
/// Equal distances keep the earlier slot first.
pub fn rank_by_proximity(slots: &mut [Interval], target: Instant) {
    slots.sort_by_key(|slot| ((slot.start() - target).abs(), slot.start()));
}

/// The first slot of `duration`, if any.
pub fn find_first(
    duration: Duration,
    horizon: Interval,
    prefs: &Preferences,
    busy: &[BusyEvent],
) -> Result<Option<Interval>> {
    Ok(find(duration, horizon, prefs, busy, 1)?.into_iter().next())
}

fn ensure_positive(duration: Duration) -> Result<()> {
    if duration <= Duration::zero() {
        return Err(ScheduleError::InvalidRequest(format!(
            "duration must be positive, got {} minutes",
            duration.num_minutes()
        )));
    }
    Ok(())
}
