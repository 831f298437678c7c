//! Per-user scheduling preferences.
//!
//! Supplied by the caller for each operation and never mutated by the engine.
//! Every field has a default so a partial JSON document is a valid configuration.

use chrono::{Duration, NaiveTime, Weekday};
use chrono_tz::Tz;
use serde::{Deserialize, Serialize};

use crate::dst::LocalTimePolicy;
use crate::error::{Result, ScheduleError};

/// Upper bound on `Preferences::lookahead_days` (about ten years).
pub const MAX_LOOKAHEAD_DAYS: u32 = 3650;

/// A local working-hour window within one day, `start < end`.
///
/// An `end` of midnight (`"24:00"` on the wire) closes the window at the end
/// of the day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkingHours {
    #[serde(with = "hhmm")]
    pub start: NaiveTime,
    #[serde(with = "hhmm_end")]
    pub end: NaiveTime,
}

impl WorkingHours {
    pub fn new(start: NaiveTime, end: NaiveTime) -> Result<Self> {
        let hours = Self { start, end };
        hours.validate()?;
        Ok(hours)
    }

    /// Build from whole hours, e.g. `WorkingHours::hours(9, 17)`. An end hour
    /// of 24 means end of day.
    pub fn hours(start_hour: u32, end_hour: u32) -> Result<Self> {
        let at = |h: u32| {
            NaiveTime::from_hms_opt(h, 0, 0)
                .ok_or_else(|| ScheduleError::InvalidPreferences(format!("hour {} out of range", h)))
        };
        let end = if end_hour == 24 { NaiveTime::MIN } else { at(end_hour)? };
        Self::new(at(start_hour)?, end)
    }

    /// Whether the window runs until midnight at the end of the day.
    pub fn ends_at_midnight(&self) -> bool {
        self.end == NaiveTime::MIN
    }

    fn validate(&self) -> Result<()> {
        if !self.ends_at_midnight() && self.start >= self.end {
            return Err(ScheduleError::InvalidPreferences(format!(
                "working hours start {} must be before end {}",
                self.start, self.end
            )));
        }
        Ok(())
    }
}

/// Working hours per weekday. `None` (or a missing key) means the day is not worked.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WeeklyHours {
    pub monday: Option<WorkingHours>,
    pub tuesday: Option<WorkingHours>,
    pub wednesday: Option<WorkingHours>,
    pub thursday: Option<WorkingHours>,
    pub friday: Option<WorkingHours>,
    pub saturday: Option<WorkingHours>,
    pub sunday: Option<WorkingHours>,
}

impl WeeklyHours {
    /// The same window Monday through Friday, weekends off.
    pub fn weekdays(hours: WorkingHours) -> Self {
        Self {
            monday: Some(hours),
            tuesday: Some(hours),
            wednesday: Some(hours),
            thursday: Some(hours),
            friday: Some(hours),
            saturday: None,
            sunday: None,
        }
    }

    /// The same window on all seven days.
    pub fn every_day(hours: WorkingHours) -> Self {
        Self {
            saturday: Some(hours),
            sunday: Some(hours),
            ..Self::weekdays(hours)
        }
    }

    pub fn for_weekday(&self, day: Weekday) -> Option<&WorkingHours> {
        match day {
            Weekday::Mon => self.monday.as_ref(),
            Weekday::Tue => self.tuesday.as_ref(),
            Weekday::Wed => self.wednesday.as_ref(),
            Weekday::Thu => self.thursday.as_ref(),
            Weekday::Fri => self.friday.as_ref(),
            Weekday::Sat => self.saturday.as_ref(),
            Weekday::Sun => self.sunday.as_ref(),
        }
    }

    fn iter(&self) -> impl Iterator<Item = &WorkingHours> {
        [
            &self.monday,
            &self.tuesday,
            &self.wednesday,
            &self.thursday,
            &self.friday,
            &self.saturday,
            &self.sunday,
        ]
        .into_iter()
        .flatten()
    }
}

impl Default for WeeklyHours {
    fn default() -> Self {
        Self::weekdays(WorkingHours {
            start: NaiveTime::from_hms_opt(9, 0, 0).unwrap_or_default(),
            end: NaiveTime::from_hms_opt(17, 0, 0).unwrap_or_default(),
        })
    }
}

/// Per-user scheduling configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Preferences {
    /// IANA timezone identifier (e.g., "America/New_York").
    pub timezone: String,
    pub working_hours: WeeklyHours,
    /// Minimum spacing enforced around busy events, in minutes.
    pub buffer_minutes: u32,
    /// Maximum number of days a search may look ahead.
    pub lookahead_days: u32,
    /// Meeting length used when a flexible request omits its duration.
    pub default_meeting_minutes: u32,
    /// Days already holding this many meetings offer no free time.
    pub max_meetings_per_day: Option<u32>,
    pub local_time_policy: LocalTimePolicy,
}

impl Default for Preferences {
    fn default() -> Self {
        Self {
            timezone: "UTC".to_string(),
            working_hours: WeeklyHours::default(),
            buffer_minutes: 15,
            lookahead_days: 14,
            default_meeting_minutes: 60,
            max_meetings_per_day: None,
            local_time_policy: LocalTimePolicy::default(),
        }
    }
}

impl Preferences {
    /// Parse the configured timezone.
    ///
    /// # Errors
    /// Returns `ScheduleError::InvalidTimezone` if it is not a valid IANA identifier.
    pub fn tz(&self) -> Result<Tz> {
        self.timezone
            .parse()
            .map_err(|_| ScheduleError::InvalidTimezone(self.timezone.clone()))
    }

    pub fn buffer(&self) -> Duration {
        Duration::minutes(self.buffer_minutes as i64)
    }

    pub fn lookahead(&self) -> Duration {
        Duration::days(self.lookahead_days as i64)
    }

    /// Check the timezone and every weekday window.
    pub fn validate(&self) -> Result<()> {
        self.tz()?;
        for hours in self.working_hours.iter() {
            hours.validate()?;
        }
        if !(1..=MAX_LOOKAHEAD_DAYS).contains(&self.lookahead_days) {
            return Err(ScheduleError::InvalidPreferences(format!(
                "lookahead_days must be between 1 and {}, got {}",
                MAX_LOOKAHEAD_DAYS, self.lookahead_days
            )));
        }
        Ok(())
    }
}

/// `"HH:MM"` (seconds optional) serde format for working-hour boundaries.
mod hhmm {
    use chrono::NaiveTime;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(time: &NaiveTime, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(&time.format("%H:%M"))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<NaiveTime, D::Error> {
        let raw = String::deserialize(deserializer)?;
        parse(&raw).map_err(serde::de::Error::custom)
    }

    pub(super) fn parse(raw: &str) -> Result<NaiveTime, String> {
        NaiveTime::parse_from_str(raw, "%H:%M")
            .or_else(|_| NaiveTime::parse_from_str(raw, "%H:%M:%S"))
            .map_err(|e| format!("invalid time '{}': {}", raw, e))
    }
}

/// Like [`hhmm`], but midnight is written and read as `"24:00"`.
mod hhmm_end {
    use chrono::NaiveTime;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(time: &NaiveTime, serializer: S) -> Result<S::Ok, S::Error> {
        if *time == NaiveTime::MIN {
            serializer.serialize_str("24:00")
        } else {
            super::hhmm::serialize(time, serializer)
        }
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<NaiveTime, D::Error> {
        let raw = String::deserialize(deserializer)?;
        match raw.as_str() {
            "24:00" | "24:00:00" => Ok(NaiveTime::MIN),
            _ => super::hhmm::parse(&raw).map_err(serde::de::Error::custom),
        }
    }
}
