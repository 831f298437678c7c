//! Recurring commitments: expand an RRULE into the busy events of a horizon.
//!
//! Wraps the `rrule` crate (v0.13) and `chrono-tz`, so standing meetings can be
//! part of a busy snapshot. Instances are generated in the commitment's own
//! timezone and normalized to UTC, which keeps wall-clock times across DST.

use chrono::{Duration, Utc};
use rrule::RRuleSet;
use serde::{Deserialize, Serialize};

use crate::error::{Result, ScheduleError};
use crate::event::BusyEvent;
use crate::interval::Interval;

/// Upper bound on instances generated for one commitment and horizon.
const MAX_INSTANCES: u16 = 500;

/// A standing commitment described by an RFC 5545 recurrence rule.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecurringCommitment {
    pub id: String,
    #[serde(default)]
    pub title: String,
    /// RRULE body, e.g. "FREQ=WEEKLY;BYDAY=MO,WE,FR".
    pub rrule: String,
    /// Local start of the first instance, e.g. "2026-03-02T09:30:00".
    pub dtstart: String,
    pub duration_minutes: u32,
    /// IANA timezone the rule is written in.
    pub timezone: String,
    /// Local datetimes excluded from the series (same format as `dtstart`).
    #[serde(default)]
    pub exdates: Vec<String>,
}

/// Expand `commitment` into the busy events overlapping `horizon`.
///
/// Event ids are `"{id}@{start}"` with the instance start in RFC 3339 UTC.
///
/// # Errors
/// Returns `ScheduleError::InvalidRule` if the RRULE is empty or unparseable,
/// or the duration is zero. Returns `ScheduleError::InvalidTimezone` if the
/// timezone is not a valid IANA identifier.
pub fn expand(commitment: &RecurringCommitment, horizon: &Interval) -> Result<Vec<BusyEvent>> {
    if commitment.rrule.is_empty() {
        return Err(ScheduleError::InvalidRule("empty RRULE string".to_string()));
    }
    if commitment.duration_minutes == 0 {
        return Err(ScheduleError::InvalidRule(format!(
            "{}: duration must be positive",
            commitment.id
        )));
    }

    let _tz: chrono_tz::Tz = commitment
        .timezone
        .parse()
        .map_err(|_| ScheduleError::InvalidTimezone(commitment.timezone.clone()))?;

    // "2026-02-17T14:00:00" -> iCalendar "20260217T140000".
    let mut rrule_text = format!(
        "DTSTART;TZID={}:{}\nRRULE:{}",
        commitment.timezone,
        commitment.dtstart.replace(['-', ':'], ""),
        commitment.rrule
    );
    if !commitment.exdates.is_empty() {
        let exdates: Vec<String> = commitment
            .exdates
            .iter()
            .map(|d| d.replace(['-', ':'], ""))
            .collect();
        rrule_text.push_str(&format!(
            "\nEXDATE;TZID={}:{}",
            commitment.timezone,
            exdates.join(",")
        ));
    }

    let duration = Duration::minutes(commitment.duration_minutes as i64);

    // Instances starting up to one duration before the horizon can still overlap it.
    let after = (horizon.start() - duration).with_timezone(&rrule::Tz::UTC);
    let before = horizon.end().with_timezone(&rrule::Tz::UTC);

    let rrule_set: RRuleSet = rrule_text
        .parse::<RRuleSet>()
        .map_err(|e| ScheduleError::InvalidRule(format!("{}", e)))?
        .after(after)
        .before(before);

    let instances = rrule_set.all(MAX_INSTANCES);
    if instances.limited {
        tracing::warn!(
            id = %commitment.id,
            limit = MAX_INSTANCES,
            "recurrence expansion truncated"
        );
    }

    let events = instances
        .dates
        .into_iter()
        .filter_map(|dt| {
            let start = dt.with_timezone(&Utc);
            let interval = Interval::starting_at(start, duration).ok()?;
            interval.overlaps(horizon).then(|| {
                BusyEvent::new(
                    format!("{}@{}", commitment.id, start.to_rfc3339()),
                    commitment.title.clone(),
                    interval,
                )
            })
        })
        .collect();

    Ok(events)
}

/// Expand every commitment and append the instances to `events`.
pub fn expand_into(
    commitments: &[RecurringCommitment],
    horizon: &Interval,
    events: &mut Vec<BusyEvent>,
) -> Result<()> {
    for commitment in commitments {
        events.extend(expand(commitment, horizon)?);
    }
    Ok(())
}
