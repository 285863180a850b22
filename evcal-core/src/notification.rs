//! User-facing messages for store outcomes.
//!
//! Presentation (modal, alert, terminal color) is the caller's business; this
//! module only decides what to say.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::EventError;

/// The store operation a notification reports on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Action {
    Add,
    Edit,
    Delete,
}

impl Action {
    fn past_tense(self) -> &'static str {
        match self {
            Action::Add => "added",
            Action::Edit => "edited",
            Action::Delete => "deleted",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "message", rename_all = "lowercase")]
pub enum Notification {
    Success(String),
    Error(String),
}

impl Notification {
    pub fn success(action: Action) -> Self {
        Notification::Success(format!(
            "Event has been successfully {}!",
            action.past_tense()
        ))
    }

    pub fn error(err: &EventError) -> Self {
        let message = match err {
            EventError::MissingFields(_) => "Please fill in all fields to add an event.",
            EventError::OverlapConflict { .. } => "Event time overlaps with an existing event.",
            EventError::InvertedInterval => "Event end time must not be before its start time.",
            EventError::NotFound(_) => "Event could not be found.",
        };
        Notification::Error(message.to_string())
    }

    pub fn for_outcome<T>(action: Action, outcome: &Result<T, EventError>) -> Self {
        match outcome {
            Ok(_) => Self::success(action),
            Err(err) => Self::error(err),
        }
    }

    pub fn is_error(&self) -> bool {
        matches!(self, Notification::Error(_))
    }

    pub fn message(&self) -> &str {
        match self {
            Notification::Success(message) | Notification::Error(message) => message,
        }
    }
}

impl fmt::Display for Notification {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message())
    }
}
