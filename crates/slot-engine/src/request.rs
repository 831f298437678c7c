//! Structured scheduling requests, as produced by the intent parser.

use chrono::{Duration, TimeZone, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{Result, ScheduleError};
use crate::interval::{Instant, Interval};
use crate::preferences::Preferences;

/// "Meeting with X tomorrow 2pm for 1 hour": a concrete start and end.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExactRequest {
    pub start: Instant,
    pub end: Instant,
    /// Search window for alternatives when the time is taken.
    #[serde(default)]
    pub earliest: Option<Instant>,
    #[serde(default)]
    pub latest: Option<Instant>,
    #[serde(default)]
    pub participants: Vec<String>,
}

/// "Find me 30 minutes this week": a duration and a search window.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FlexibleRequest {
    /// Falls back to `Preferences::default_meeting_minutes` when absent.
    #[serde(default)]
    pub duration_minutes: Option<i64>,
    pub earliest: Instant,
    /// Falls back to `earliest + lookahead_days` when absent.
    #[serde(default)]
    pub latest: Option<Instant>,
    #[serde(default)]
    pub participants: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum SchedulingRequest {
    Exact(ExactRequest),
    Flexible(FlexibleRequest),
}

impl SchedulingRequest {
    pub fn participants(&self) -> &[String] {
        match self {
            SchedulingRequest::Exact(r) => &r.participants,
            SchedulingRequest::Flexible(r) => &r.participants,
        }
    }
}

impl ExactRequest {
    pub fn new(start: Instant, end: Instant) -> Self {
        Self {
            start,
            end,
            earliest: None,
            latest: None,
            participants: Vec::new(),
        }
    }

    pub fn within(mut self, earliest: Instant, latest: Instant) -> Self {
        self.earliest = Some(earliest);
        self.latest = Some(latest);
        self
    }

    /// The requested interval.
    ///
    /// # Errors
    /// Returns `ScheduleError::InvalidRequest` when `start >= end`.
    pub fn interval(&self) -> Result<Interval> {
        Interval::new(self.start, self.end).map_err(|_| {
            ScheduleError::InvalidRequest(format!(
                "exact request start {} must be before end {}",
                self.start.to_rfc3339(),
                self.end.to_rfc3339()
            ))
        })
    }

    /// Where alternatives are searched.
    ///
    /// Without an explicit window this runs from local midnight of the requested
    /// day for the user's lookahead.
    pub fn search_horizon(&self, prefs: &Preferences) -> Result<Interval> {
        let earliest = match self.earliest {
            Some(earliest) => earliest,
            None => local_midnight(self.start, prefs)?,
        };
        let latest = match self.latest {
            Some(latest) => latest,
            None => lookahead_end(earliest, prefs)?,
        };
        search_window(earliest, latest, prefs)
    }
}

impl FlexibleRequest {
    pub fn new(duration_minutes: i64, earliest: Instant, latest: Instant) -> Self {
        Self {
            duration_minutes: Some(duration_minutes),
            earliest,
            latest: Some(latest),
            participants: Vec::new(),
        }
    }

    /// The requested duration, defaulted from preferences.
    ///
    /// # Errors
    /// Returns `ScheduleError::InvalidRequest` for a non-positive duration.
    pub fn duration(&self, prefs: &Preferences) -> Result<Duration> {
        let minutes = self
            .duration_minutes
            .unwrap_or(prefs.default_meeting_minutes as i64);
        if minutes <= 0 {
            return Err(ScheduleError::InvalidRequest(format!(
                "duration must be positive, got {} minutes",
                minutes
            )));
        }
        Ok(Duration::minutes(minutes))
    }

    /// The search window, clamped to the user's lookahead.
    ///
    /// # Errors
    /// Returns `ScheduleError::InvalidRequest` for an inverted window or a
    /// lookahead that runs past the representable calendar.
    pub fn search_horizon(&self, prefs: &Preferences) -> Result<Interval> {
        let latest = match self.latest {
            Some(latest) => latest,
            None => lookahead_end(self.earliest, prefs)?,
        };
        search_window(self.earliest, latest, prefs)
    }
}

fn search_window(earliest: Instant, latest: Instant, prefs: &Preferences) -> Result<Interval> {
    if earliest >= latest {
        return Err(ScheduleError::InvalidRequest(format!(
            "search window earliest {} must be before latest {}",
            earliest.to_rfc3339(),
            latest.to_rfc3339()
        )));
    }
    Interval::new(earliest, latest.min(lookahead_end(earliest, prefs)?))
}

/// `earliest` plus the user's lookahead, without overflowing the calendar.
fn lookahead_end(earliest: Instant, prefs: &Preferences) -> Result<Instant> {
    earliest.checked_add_signed(prefs.lookahead()).ok_or_else(|| {
        ScheduleError::InvalidRequest(format!(
            "lookahead of {} days from {} is out of range",
            prefs.lookahead_days,
            earliest.to_rfc3339()
        ))
    })
}

fn local_midnight(instant: Instant, prefs: &Preferences) -> Result<Instant> {
    let tz = prefs.tz()?;
    let day = instant.with_timezone(&tz).date_naive();
    let midnight = day
        .and_hms_opt(0, 0, 0)
        .and_then(|local| tz.from_local_datetime(&local).earliest())
        .map(|dt| dt.with_timezone(&Utc));
    // Midnight falls in a DST gap in a few zones; fall back to the instant itself.
    Ok(midnight.unwrap_or(instant))
}
