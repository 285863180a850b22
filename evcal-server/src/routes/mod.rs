pub mod events;
pub mod health;

use axum::{
    Json, Router,
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use evcal_core::{EventError, Notification};
use serde::Serialize;

use crate::state::AppState;

pub fn router(state: AppState) -> Router {
    Router::new()
        .merge(events::router())
        .merge(health::router())
        .with_state(state)
}

/// Standard API error response
#[derive(Serialize)]
pub struct ErrorResponse {
    pub error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub detail: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notification: Option<Notification>,
}

pub enum AppError {
    /// A store operation was rejected, with what the user is told about it.
    Rejected {
        error: EventError,
        notification: Notification,
    },
    BadRequest(String),
}

impl AppError {
    fn status(&self) -> StatusCode {
        match self {
            AppError::Rejected {
                error: EventError::OverlapConflict { .. },
                ..
            } => StatusCode::CONFLICT,
            AppError::Rejected { error, .. } if error.is_validation() => {
                StatusCode::UNPROCESSABLE_ENTITY
            }
            AppError::Rejected { .. } => StatusCode::NOT_FOUND,
            AppError::BadRequest(_) => StatusCode::BAD_REQUEST,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();

        let body = match self {
            AppError::Rejected {
                error,
                notification,
            } => {
                tracing::info!(code = error.code(), %error, "request rejected");
                ErrorResponse {
                    error: error.code().to_string(),
                    detail: Some(error.to_string()),
                    notification: Some(notification),
                }
            }
            AppError::BadRequest(message) => {
                tracing::info!(%message, "bad request");
                ErrorResponse {
                    error: "bad_request".to_string(),
                    detail: Some(message),
                    notification: None,
                }
            }
        };

        (status, Json(body)).into_response()
    }
}

impl From<EventError> for AppError {
    fn from(error: EventError) -> Self {
        let notification = Notification::error(&error);
        AppError::Rejected {
            error,
            notification,
        }
    }
}

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        AppError::BadRequest(rejection.body_text())
    }
}
