//! Availability index: free intervals from busy events and working-hour rules.
//!
//! Busy events are widened by the user's buffer, clipped to the horizon, sorted
//! and merged into a minimal disjoint cover. The horizon is intersected with the
//! per-weekday working windows, and the cover is subtracted from each window.
//!
//! The free list is always chronological, pairwise disjoint, clipped to the
//! horizon and inside working hours. The slot finder's earliest-first policy
//! depends on that ordering.

use std::collections::HashMap;

use chrono::{Datelike, NaiveDate};
use chrono_tz::Tz;
use serde::{Deserialize, Serialize};

use crate::dst::resolve_local;
use crate::error::Result;
use crate::event::BusyEvent;
use crate::interval::Interval;
use crate::preferences::Preferences;

/// Busy cover and free intervals for one horizon, computed per request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Availability {
    /// The analysis window.
    pub horizon: Interval,
    /// Buffer-expanded busy periods (sorted by start, non-overlapping).
    pub busy: Vec<Interval>,
    /// Free intervals inside working hours (sorted by start, non-overlapping).
    pub free: Vec<Interval>,
}

impl Availability {
    /// Compute the availability of one user within `horizon`.
    ///
    /// # Errors
    /// Returns `ScheduleError::InvalidTimezone` if `prefs.timezone` is not a
    /// valid IANA identifier.
    pub fn compute(busy: &[BusyEvent], prefs: &Preferences, horizon: Interval) -> Result<Self> {
        let tz = prefs.tz()?;
        let cover = merge_busy_periods(busy, prefs, &horizon);
        let counts = meetings_per_day(busy, tz);

        let mut free = Vec::new();
        for (day, window) in working_days(tz, prefs, &horizon) {
            let saturated = prefs
                .max_meetings_per_day
                .is_some_and(|cap| counts.get(&day).copied().unwrap_or(0) >= cap);
            if saturated {
                continue;
            }
            free.extend(subtract_cover(window, &cover));
        }

        tracing::trace!(
            busy = cover.len(),
            free = free.len(),
            horizon = %horizon,
            "computed availability"
        );

        Ok(Self {
            horizon,
            busy: cover,
            free,
        })
    }

    /// Total free time in whole minutes.
    pub fn free_minutes(&self) -> i64 {
        self.free.iter().map(Interval::duration_minutes).sum()
    }
}

/// Free intervals for `busy` within `horizon` under `prefs`.
///
/// Convenience wrapper around [`Availability::compute`] that drops the busy cover.
pub fn compute_free_intervals(
    busy: &[BusyEvent],
    prefs: &Preferences,
    horizon: Interval,
) -> Result<Vec<Interval>> {
    Availability::compute(busy, prefs, horizon).map(|a| a.free)
}

/// The maximal intervals of `horizon` that fall inside working hours.
pub fn working_windows(prefs: &Preferences, horizon: Interval) -> Result<Vec<Interval>> {
    let tz = prefs.tz()?;
    Ok(working_days(tz, prefs, &horizon)
        .into_iter()
        .map(|(_, window)| window)
        .collect())
}

/// Merge buffer-expanded busy events into a sorted, disjoint cover of the horizon.
///
/// Cancelled events are skipped. Overlapping or adjacent periods collapse into one.
pub fn merge_busy_periods(busy: &[BusyEvent], prefs: &Preferences, horizon: &Interval) -> Vec<Interval> {
    let buffer = prefs.buffer();

    // Expand, then clip to the horizon, discarding anything entirely outside.
    let mut intervals: Vec<Interval> = busy
        .iter()
        .filter(|e| e.blocks_time())
        .filter_map(|e| e.interval.expand(buffer).intersect(horizon))
        .collect();

    intervals.sort();

    let mut merged: Vec<Interval> = Vec::with_capacity(intervals.len());
    for interval in intervals {
        if let Some(last) = merged.last_mut() {
            // Sorted by start, so merge only fails on a real gap.
            if let Ok(joined) = last.merge(&interval) {
                *last = joined;
                continue;
            }
        }
        merged.push(interval);
    }

    merged
}

/// Working windows per local date, clipped to the horizon, in chronological order.
fn working_days(tz: Tz, prefs: &Preferences, horizon: &Interval) -> Vec<(NaiveDate, Interval)> {
    let first = horizon.start().with_timezone(&tz).date_naive();
    let last = horizon.end().with_timezone(&tz).date_naive();

    first
        .iter_days()
        .take_while(|day| *day <= last)
        .filter_map(|day| {
            let hours = prefs.working_hours.for_weekday(day.weekday())?;
            let start = resolve_local(tz, day.and_time(hours.start), prefs.local_time_policy)?;
            let end_day = if hours.ends_at_midnight() { day.succ_opt()? } else { day };
            let end = resolve_local(tz, end_day.and_time(hours.end), prefs.local_time_policy)?;
            let window = Interval::new(start, end).ok()?.intersect(horizon)?;
            Some((day, window))
        })
        .collect()
}

/// Number of time-blocking events starting on each local date.
fn meetings_per_day(busy: &[BusyEvent], tz: Tz) -> HashMap<NaiveDate, u32> {
    let mut counts = HashMap::new();
    for event in busy.iter().filter(|e| e.blocks_time()) {
        let day = event.interval.start().with_timezone(&tz).date_naive();
        *counts.entry(day).or_insert(0) += 1;
    }
    counts
}

/// Subtract a sorted, disjoint cover from one window.
fn subtract_cover(window: Interval, cover: &[Interval]) -> Vec<Interval> {
    let first = cover.partition_point(|b| b.end() <= window.start());

    let mut pieces = vec![window];
    for busy in cover[first..].iter().take_while(|b| b.start() < window.end()) {
        // Only the trailing piece can still meet a later busy period.
        let Some(tail) = pieces.pop() else { break };
        pieces.extend(tail.subtract(busy));
    }
    pieces
}
