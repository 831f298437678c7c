//! Suggested meeting lengths by meeting kind and attendee count.

use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ScheduleError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MeetingKind {
    Standup,
    OneOnOne,
    TeamMeeting,
    Review,
    Presentation,
    Workshop,
    AllHands,
    /// Anything else; uses the caller's default length.
    Other,
}

impl MeetingKind {
    /// Base length in minutes, or `None` for [`MeetingKind::Other`].
    pub fn base_minutes(self) -> Option<u32> {
        match self {
            MeetingKind::Standup => Some(15),
            MeetingKind::OneOnOne => Some(30),
            MeetingKind::TeamMeeting => Some(60),
            MeetingKind::Review => Some(90),
            MeetingKind::Presentation => Some(60),
            MeetingKind::Workshop => Some(120),
            MeetingKind::AllHands => Some(60),
            MeetingKind::Other => None,
        }
    }
}

impl FromStr for MeetingKind {
    type Err = ScheduleError;

    /// Accepts snake_case, kebab-case or spaced names, case-insensitively.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_lowercase().replace(['-', ' '], "_");
        match normalized.as_str() {
            "standup" => Ok(MeetingKind::Standup),
            "one_on_one" | "1:1" => Ok(MeetingKind::OneOnOne),
            "team_meeting" => Ok(MeetingKind::TeamMeeting),
            "review" => Ok(MeetingKind::Review),
            "presentation" => Ok(MeetingKind::Presentation),
            "workshop" => Ok(MeetingKind::Workshop),
            "all_hands" => Ok(MeetingKind::AllHands),
            "other" => Ok(MeetingKind::Other),
            _ => Err(ScheduleError::InvalidRequest(format!("unknown meeting kind: {}", s))),
        }
    }
}

/// Suggested length in minutes.
///
/// Starts from the kind's base length (or `default_minutes` for `Other`) and
/// adds 10 minutes above 5 attendees, 15 above 10.
pub fn suggest_duration(kind: MeetingKind, attendees: u32, default_minutes: u32) -> u32 {
    let base = kind.base_minutes().unwrap_or(default_minutes);
    let extra = match attendees {
        n if n > 10 => 15,
        n if n > 5 => 10,
        _ => 0,
    };
    base + extra
}
