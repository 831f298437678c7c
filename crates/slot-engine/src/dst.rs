//! DST transition policies for local wall-clock boundaries.
//!
//! Working hours are written in local time ("09:00"), but a local time can be
//! ambiguous (fall back) or nonexistent (spring forward) on transition days.

use chrono::{DateTime, Duration, NaiveDateTime, Offset, TimeZone, Utc};
use chrono_tz::Tz;
use serde::{Deserialize, Serialize};

/// Longest DST gap searched when shifting forward. Real-world gaps are at most 2h.
const MAX_GAP_MINUTES: i64 = 180;

/// Policy for local times that fall in a DST gap.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LocalTimePolicy {
    /// Drop the boundary (and so the day's window) when it falls in the gap.
    Skip,
    /// Use the first valid instant after the gap.
    #[default]
    ShiftForward,
    /// Keep the wall-clock reading and apply the offset in force before the gap.
    WallClock,
}

/// Resolve a local wall time in `tz` to a UTC instant.
///
/// Ambiguous times resolve to the earlier of the two instants. Nonexistent times
/// follow `policy`; `None` is only returned for `LocalTimePolicy::Skip`.
pub fn resolve_local(tz: Tz, local: NaiveDateTime, policy: LocalTimePolicy) -> Option<DateTime<Utc>> {
    if let Some(dt) = tz.from_local_datetime(&local).earliest() {
        return Some(dt.with_timezone(&Utc));
    }

    match policy {
        LocalTimePolicy::Skip => None,
        LocalTimePolicy::ShiftForward => (1..=MAX_GAP_MINUTES).find_map(|m| {
            tz.from_local_datetime(&(local + Duration::minutes(m)))
                .earliest()
                .map(|dt| dt.with_timezone(&Utc))
        }),
        LocalTimePolicy::WallClock => {
            let before = tz
                .from_local_datetime(&(local - Duration::minutes(MAX_GAP_MINUTES)))
                .earliest()?;
            let offset_secs = before.offset().fix().local_minus_utc() as i64;
            Some((local - Duration::seconds(offset_secs)).and_utc())
        }
    }
}
