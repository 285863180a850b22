//! Core of evcal, an event scheduling tool.
//!
//! - `event`: events and candidate drafts
//! - `overlap`: the interval overlap rule
//! - `store`: the in-memory event collection and its add/edit/delete operations
//! - `notification`: user-facing messages for store outcomes
//! - `date_range`: month/week/day windows for calendar views

pub mod config;
pub mod date_range;
pub mod error;
pub mod event;
pub mod notification;
pub mod overlap;
pub mod seed;
pub mod store;

pub use error::{EventError, Field};
pub use event::{Event, EventDraft, EventId, EventStyle};
pub use notification::{Action, Notification};
pub use store::{EventStore, Snapshot};
