//! Busy events handed in by the calendar-sync collaborator.

use serde::{Deserialize, Serialize};

use crate::interval::Interval;

/// Lifecycle status of a calendar event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EventStatus {
    #[default]
    Confirmed,
    Tentative,
    Cancelled,
}

/// An occupied interval with identity. Read-only to the engine.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BusyEvent {
    /// Opaque identifier assigned by the calendar provider.
    pub id: String,
    /// Display title.
    #[serde(default)]
    pub title: String,
    #[serde(flatten)]
    pub interval: Interval,
    #[serde(default)]
    pub status: EventStatus,
}

impl BusyEvent {
    pub fn new(id: impl Into<String>, title: impl Into<String>, interval: Interval) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            interval,
            status: EventStatus::Confirmed,
        }
    }

    pub fn with_status(mut self, status: EventStatus) -> Self {
        self.status = status;
        self
    }

    /// Cancelled events stay in the snapshot but never occupy time.
    pub fn blocks_time(&self) -> bool {
        self.status != EventStatus::Cancelled
    }
}
