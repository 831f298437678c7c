//! Scheduling decisions returned to the orchestration layer.
//!
//! Built once per request and never mutated; fields are read through accessors.

use serde::{Deserialize, Serialize};

use crate::event::BusyEvent;
use crate::interval::Interval;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DecisionStatus {
    Accepted,
    Conflict,
    AlternativesOffered,
    NoSlotFound,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SchedulingDecision {
    status: DecisionStatus,
    chosen_interval: Option<Interval>,
    conflicting_events: Vec<BusyEvent>,
    alternatives: Vec<Interval>,
}

impl SchedulingDecision {
    pub fn accepted(chosen: Interval) -> Self {
        Self::accepted_with_alternatives(chosen, Vec::new())
    }

    /// Accepted, keeping the other candidates the finder produced.
    pub fn accepted_with_alternatives(chosen: Interval, alternatives: Vec<Interval>) -> Self {
        Self {
            status: DecisionStatus::Accepted,
            chosen_interval: Some(chosen),
            conflicting_events: Vec::new(),
            alternatives,
        }
    }

    pub fn conflict(conflicting_events: Vec<BusyEvent>, alternatives: Vec<Interval>) -> Self {
        Self {
            status: DecisionStatus::Conflict,
            chosen_interval: None,
            conflicting_events,
            alternatives,
        }
    }

    pub fn alternatives_offered(alternatives: Vec<Interval>) -> Self {
        Self {
            status: DecisionStatus::AlternativesOffered,
            chosen_interval: None,
            conflicting_events: Vec::new(),
            alternatives,
        }
    }

    pub fn no_slot_found() -> Self {
        Self {
            status: DecisionStatus::NoSlotFound,
            chosen_interval: None,
            conflicting_events: Vec::new(),
            alternatives: Vec::new(),
        }
    }

    pub fn status(&self) -> DecisionStatus {
        self.status
    }

    pub fn chosen_interval(&self) -> Option<&Interval> {
        self.chosen_interval.as_ref()
    }

    pub fn conflicting_events(&self) -> &[BusyEvent] {
        &self.conflicting_events
    }

    pub fn alternatives(&self) -> &[Interval] {
        &self.alternatives
    }
}
