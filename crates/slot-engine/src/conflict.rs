//! Detect busy events that overlap a proposed interval.
//!
//! Adjacent events (where one ends exactly when the proposal starts) are NOT
//! conflicts. Buffers are ignored unless the caller asks for them, so a
//! back-to-back booking the user explicitly requested is accepted.

use chrono::Duration;
use serde::Serialize;

use crate::event::BusyEvent;
use crate::interval::Interval;

/// A busy event overlapping a proposal, with the size of the overlap.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Conflict {
    pub event: BusyEvent,
    pub overlap_minutes: i64,
}

/// Every time-blocking event in `busy` overlapping `proposed`, in chronological order.
///
/// Two intervals overlap when `a.start < b.end && b.start < a.end`.
/// An empty result means no conflict.
pub fn check(proposed: &Interval, busy: &[BusyEvent]) -> Vec<BusyEvent> {
    check_with_buffer(proposed, busy, Duration::zero())
}

/// Like [`check`], but each event is first widened by `buffer` on both ends.
pub fn check_with_buffer(proposed: &Interval, busy: &[BusyEvent], buffer: Duration) -> Vec<BusyEvent> {
    find_conflicts(proposed, busy, buffer)
        .into_iter()
        .map(|c| c.event)
        .collect()
}

/// Conflicts with their overlap duration, measured against the buffered event.
///
/// Sorted by event start, then id, so the output is independent of input order.
pub fn find_conflicts(proposed: &Interval, busy: &[BusyEvent], buffer: Duration) -> Vec<Conflict> {
    let mut conflicts: Vec<Conflict> = busy
        .iter()
        .filter(|event| event.blocks_time())
        .filter_map(|event| {
            let overlap = event.interval.expand(buffer).intersect(proposed)?;
            Some(Conflict {
                event: event.clone(),
                overlap_minutes: overlap.duration_minutes(),
            })
        })
        .collect();

    conflicts.sort_by(|a, b| {
        (a.event.interval, &a.event.id).cmp(&(b.event.interval, &b.event.id))
    });
    conflicts
}
