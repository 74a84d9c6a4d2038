//! Practice and meet schedule.

pub mod event;

pub use event::{EventKind, NewScheduleEvent, ScheduleEvent, ScheduleEventDraft, ScheduleEventInput};
