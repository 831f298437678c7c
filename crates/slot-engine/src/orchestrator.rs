//! Scheduling orchestrator: request in, decision out.
//!
//! Stateless across requests. Exact requests go to the conflict detector, and
//! flexible ones go to the slot finder. A conflicting exact request also gets
//! alternatives over its search horizon so the caller can offer a reschedule in
//! one round trip.

use chrono::Duration;
use serde::{Deserialize, Serialize};

use crate::conflict;
use crate::decision::SchedulingDecision;
use crate::error::Result;
use crate::event::BusyEvent;
use crate::preferences::Preferences;
use crate::request::{ExactRequest, FlexibleRequest, SchedulingRequest};
use crate::slots::{self, DEFAULT_MAX_RESULTS};

/// Caller-set knobs for one decision.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SchedulerOptions {
    /// Maximum alternatives returned.
    pub max_results: usize,
    /// Check exact requests against buffered busy time instead of literal busy time.
    pub buffer_exact_requests: bool,
    /// Accept the first slot of a flexible request instead of offering a list.
    pub auto_accept: bool,
    /// Offer the alternatives to a conflicting exact request nearest to its
    /// start first, instead of in chronological order.
    pub rank_by_proximity: bool,
}

impl Default for SchedulerOptions {
    fn default() -> Self {
        Self {
            max_results: DEFAULT_MAX_RESULTS,
            buffer_exact_requests: false,
            auto_accept: false,
            rank_by_proximity: false,
        }
    }
}

/// Decide a scheduling request against one user's busy snapshot.
///
/// # Errors
/// Returns `ScheduleError::InvalidRequest` for a non-positive duration, an
/// inverted search window or `start >= end` on an exact request, and
/// `ScheduleError::InvalidTimezone` / `InvalidPreferences` for bad preferences.
/// Conflicts and empty searches are decisions, not errors.
pub fn schedule(
    request: &SchedulingRequest,
    prefs: &Preferences,
    busy: &[BusyEvent],
    options: &SchedulerOptions,
) -> Result<SchedulingDecision> {
    prefs.validate()?;

    match request {
        SchedulingRequest::Exact(exact) => schedule_exact(exact, prefs, busy, options),
        SchedulingRequest::Flexible(flexible) => schedule_flexible(flexible, prefs, busy, options),
    }
}

fn schedule_exact(
    request: &ExactRequest,
    prefs: &Preferences,
    busy: &[BusyEvent],
    options: &SchedulerOptions,
) -> Result<SchedulingDecision> {
    let proposed = request.interval()?;
    let horizon = request.search_horizon(prefs)?;

    let buffer = if options.buffer_exact_requests {
        prefs.buffer()
    } else {
        Duration::zero()
    };
    let conflicts = conflict::check_with_buffer(&proposed, busy, buffer);

    if conflicts.is_empty() {
        tracing::debug!(interval = %proposed, "exact request accepted");
        return Ok(SchedulingDecision::accepted(proposed));
    }

    let alternatives = if options.rank_by_proximity {
        let mut candidates = slots::find(proposed.duration(), horizon, prefs, busy, usize::MAX)?;
        slots::rank_by_proximity(&mut candidates, proposed.start());
        candidates.truncate(options.max_results);
        candidates
    } else {
        slots::find(proposed.duration(), horizon, prefs, busy, options.max_results)?
    };
    tracing::debug!(
        interval = %proposed,
        conflicts = conflicts.len(),
        alternatives = alternatives.len(),
        "exact request conflicts"
    );
    Ok(SchedulingDecision::conflict(conflicts, alternatives))
}

fn schedule_flexible(
    request: &FlexibleRequest,
    prefs: &Preferences,
    busy: &[BusyEvent],
    options: &SchedulerOptions,
) -> Result<SchedulingDecision> {
    let duration = request.duration(prefs)?;
    let horizon = request.search_horizon(prefs)?;

    let mut alternatives = slots::find(duration, horizon, prefs, busy, options.max_results)?;
    tracing::debug!(
        horizon = %horizon,
        minutes = duration.num_minutes(),
        found = alternatives.len(),
        "flexible request searched"
    );

    if alternatives.is_empty() {
        return Ok(SchedulingDecision::no_slot_found());
    }
    if options.auto_accept {
        let chosen = alternatives.remove(0);
        return Ok(SchedulingDecision::accepted_with_alternatives(chosen, alternatives));
    }
    Ok(SchedulingDecision::alternatives_offered(alternatives))
}
