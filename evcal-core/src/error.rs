//! Error types for evcal.

use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::event::EventId;

/// A candidate field the store requires before accepting an event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Field {
    Title,
    Start,
    End,
    Category,
    Color,
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Field::Title => "title",
            Field::Start => "start",
            Field::End => "end",
            Field::Category => "category",
            Field::Color => "color",
        };
        write!(f, "{}", name)
    }
}

/// Outcome of a rejected store operation.
///
/// A failed operation never leaves the collection partially modified.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EventError {
    #[error("Missing required fields: {}", join_fields(.0))]
    MissingFields(Vec<Field>),

    #[error("Event ends before it starts")]
    InvertedInterval,

    #[error("Event overlaps with '{title}' (id {conflicting})")]
    OverlapConflict { conflicting: EventId, title: String },

    #[error("Event not found: {0}")]
    NotFound(EventId),
}

impl EventError {
    /// True for rejections caused by the candidate itself, as opposed to an unknown id.
    pub fn is_validation(&self) -> bool {
        !matches!(self, EventError::NotFound(_))
    }

    /// Stable machine-readable code.
    pub fn code(&self) -> &'static str {
        match self {
            EventError::MissingFields(_) => "missing_fields",
            EventError::InvertedInterval => "inverted_interval",
            EventError::OverlapConflict { .. } => "overlap_conflict",
            EventError::NotFound(_) => "not_found",
        }
    }
}

fn join_fields(fields: &[Field]) -> String {
    fields
        .iter()
        .map(Field::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

/// Errors from the ambient layer (configuration, filesystem).
#[derive(Error, Debug)]
pub enum EvcalError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias for ambient evcal operations.
pub type EvcalResult<T> = Result<T, EvcalError>;
