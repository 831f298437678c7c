//! # slot-engine
//!
//! Deterministic availability and slot finding for a scheduling assistant.
//!
//! Given one user's busy events, their preferences (working hours, timezone,
//! buffer) and a structured request, the engine decides whether a proposed time
//! is free and, if not, offers ranked alternatives. Every operation is a pure
//! function of its inputs: no I/O, no shared state, safe to call concurrently.
//!
//! ## Modules
//!
//! - [`interval`]: Half-open UTC intervals: overlap, merge, subtract, contains
//! - [`availability`]: Free intervals from busy events and working hours
//! - [`conflict`]: Busy events overlapping a proposed interval
//! - [`slots`]: Earliest-first slots of a requested duration
//! - [`orchestrator`]: Request dispatch and decision building
//! - [`preferences`]: Per-user working hours, buffer, timezone, lookahead
//! - [`recurrence`]: RRULE commitments → busy events
//! - [`dst`]: Resolution of local times across DST transitions
//! - [`duration`]: Suggested meeting lengths
//! - [`error`]: Error types

pub mod availability;
pub mod conflict;
pub mod decision;
pub mod dst;
pub mod duration;
pub mod error;
pub mod event;
pub mod interval;
pub mod orchestrator;
pub mod preferences;
pub mod recurrence;
pub mod request;
pub mod slots;

pub use availability::{compute_free_intervals, Availability};
pub use conflict::check;
pub use decision::{DecisionStatus, SchedulingDecision};
pub use dst::LocalTimePolicy;
pub use duration::{suggest_duration, MeetingKind};
pub use error::ScheduleError;
pub use event::{BusyEvent, EventStatus};
pub use interval::{parse_instant, Instant, Interval};
pub use orchestrator::{schedule, SchedulerOptions};
pub use preferences::{Preferences, WeeklyHours, WorkingHours};
pub use recurrence::RecurringCommitment;
pub use request::{ExactRequest, FlexibleRequest, SchedulingRequest};
