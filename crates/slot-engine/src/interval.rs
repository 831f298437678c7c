//! Half-open time intervals over UTC-normalized instants.
//!
//! Every constructor converts to UTC up front, so overlap, merge and subtraction
//! never see an offset. An `Interval` always satisfies `start < end`.

use chrono::{DateTime, Duration, NaiveDateTime, TimeZone, Utc};
use chrono_tz::Tz;
use serde::{Deserialize, Serialize};

use crate::error::{Result, ScheduleError};

/// A timezone-normalized point in time.
pub type Instant = DateTime<Utc>;

/// A half-open range `[start, end)` with `start < end`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "RawInterval")]
pub struct Interval {
    start: Instant,
    end: Instant,
}

#[derive(Deserialize)]
struct RawInterval {
    start: Instant,
    end: Instant,
}

impl TryFrom<RawInterval> for Interval {
    type Error = ScheduleError;

    fn try_from(raw: RawInterval) -> Result<Self> {
        Interval::new(raw.start, raw.end)
    }
}

impl Interval {
    /// Build an interval, rejecting zero-length and inverted ranges.
    pub fn new(start: Instant, end: Instant) -> Result<Self> {
        if start >= end {
            return Err(ScheduleError::InvalidInterval(format!(
                "start {} must be before end {}",
                start.to_rfc3339(),
                end.to_rfc3339()
            )));
        }
        Ok(Self { start, end })
    }

    /// Build an interval from instants in any timezone, normalizing both to UTC.
    pub fn from_zoned<A: TimeZone, B: TimeZone>(start: DateTime<A>, end: DateTime<B>) -> Result<Self> {
        Self::new(start.with_timezone(&Utc), end.with_timezone(&Utc))
    }

    /// Build an interval of `duration` starting at `start`.
    pub fn starting_at(start: Instant, duration: Duration) -> Result<Self> {
        Self::new(start, start + duration)
    }

    pub fn start(&self) -> Instant {
        self.start
    }

    pub fn end(&self) -> Instant {
        self.end
    }

    pub fn duration(&self) -> Duration {
        self.end - self.start
    }

    pub fn duration_minutes(&self) -> i64 {
        self.duration().num_minutes()
    }

    /// Two intervals overlap iff `a.start < b.end && b.start < a.end`.
    ///
    /// Adjacent intervals (one ends exactly when the other starts) do not overlap.
    pub fn overlaps(&self, other: &Interval) -> bool {
        self.start < other.end && other.start < self.end
    }

    /// True when one interval ends exactly where the other begins.
    pub fn is_adjacent(&self, other: &Interval) -> bool {
        self.end == other.start || other.end == self.start
    }

    /// Half-open membership: `start <= instant < end`.
    pub fn contains(&self, instant: Instant) -> bool {
        self.start <= instant && instant < self.end
    }

    /// True when `other` lies entirely inside `self`.
    pub fn encloses(&self, other: &Interval) -> bool {
        self.start <= other.start && other.end <= self.end
    }

    /// Union of two overlapping or adjacent intervals.
    ///
    /// # Errors
    /// Returns `ScheduleError::InvalidOperation` when the intervals are disjoint
    /// and not adjacent, since their union is not a single interval.
    pub fn merge(&self, other: &Interval) -> Result<Interval> {
        if !self.overlaps(other) && !self.is_adjacent(other) {
            return Err(ScheduleError::InvalidOperation(format!(
                "cannot merge disjoint intervals {} and {}",
                self, other
            )));
        }
        Ok(Interval {
            start: self.start.min(other.start),
            end: self.end.max(other.end),
        })
    }

    /// The parts of `self` not covered by `other`: zero, one or two intervals,
    /// in chronological order.
    pub fn subtract(&self, other: &Interval) -> Vec<Interval> {
        if !self.overlaps(other) {
            return vec![*self];
        }

        let mut pieces = Vec::with_capacity(2);
        if self.start < other.start {
            pieces.push(Interval {
                start: self.start,
                end: other.start,
            });
        }
        if other.end < self.end {
            pieces.push(Interval {
                start: other.end,
                end: self.end,
            });
        }
        pieces
    }

    /// The common part of two intervals, if any.
    pub fn intersect(&self, other: &Interval) -> Option<Interval> {
        let start = self.start.max(other.start);
        let end = self.end.min(other.end);
        (start < end).then_some(Interval { start, end })
    }

    /// Widen by `by` on both ends. A non-positive `by` returns `self` unchanged.
    pub fn expand(&self, by: Duration) -> Interval {
        if by <= Duration::zero() {
            return *self;
        }
        Interval {
            start: self.start - by,
            end: self.end + by,
        }
    }
}

impl std::fmt::Display for Interval {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}, {})", self.start.to_rfc3339(), self.end.to_rfc3339())
    }
}

/// Parse an ISO 8601 datetime string into a UTC instant.
///
/// Accepts RFC 3339 with an explicit offset (e.g. "2026-03-16T09:00:00-04:00"),
/// or a naive local time ("2026-03-16T09:00:00" or "2026-03-16T09:00") which is
/// interpreted in `tz`. Ambiguous local times resolve to the earlier instant.
///
/// # Errors
/// Returns `ScheduleError::InvalidInterval` when the text is not a datetime or
/// names a local time that does not exist in `tz` (a DST gap).
pub fn parse_instant(text: &str, tz: Tz) -> Result<Instant> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(text) {
        return Ok(dt.with_timezone(&Utc));
    }

    let naive = NaiveDateTime::parse_from_str(text, "%Y-%m-%dT%H:%M:%S")
        .or_else(|_| NaiveDateTime::parse_from_str(text, "%Y-%m-%dT%H:%M"))
        .map_err(|e| ScheduleError::InvalidInterval(format!("invalid datetime '{}': {}", text, e)))?;

    tz.from_local_datetime(&naive)
        .earliest()
        .map(|dt| dt.with_timezone(&Utc))
        .ok_or_else(|| {
            ScheduleError::InvalidInterval(format!("local time '{}' does not exist in {}", text, tz))
        })
}
