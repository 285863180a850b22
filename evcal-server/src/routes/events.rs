//! Event endpoints

use axum::{
    Json, Router,
    extract::{Path, Query, State, rejection::JsonRejection},
    routing::get,
};
use chrono::Local;
use evcal_core::date_range::{CalendarView, DateRange};
use evcal_core::{Action, Event, EventDraft, EventError, EventId, Notification};
use serde::{Deserialize, Serialize};

use crate::routes::AppError;
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/events", get(list_events).post(add_event))
        .route(
            "/events/{id}",
            get(get_event).put(edit_event).delete(delete_event),
        )
}

/// Query parameters for listing events
#[derive(Deserialize, Default)]
pub struct ListQuery {
    /// month, week or day
    pub view: Option<String>,
    /// YYYY-MM-DD anchor for the view (defaults to today)
    pub date: Option<String>,
}

impl ListQuery {
    /// The window to filter by, or None to list everything.
    fn range(&self) -> Result<Option<DateRange>, AppError> {
        if self.view.is_none() && self.date.is_none() {
            return Ok(None);
        }

        let view = match &self.view {
            Some(v) => v.parse::<CalendarView>().map_err(AppError::BadRequest)?,
            None => CalendarView::default(),
        };

        let range = match &self.date {
            Some(date) => DateRange::from_args(view, date).map_err(AppError::BadRequest)?,
            None => DateRange::for_view(view, Local::now().date_naive()).ok_or_else(|| {
                AppError::BadRequest(format!("Today is out of range for a {} view", view))
            })?,
        };

        Ok(Some(range))
    }
}

/// Response for add/edit/delete
#[derive(Serialize)]
pub struct MutationResponse {
    pub event: Event,
    pub notification: Notification,
}

/// Attach the user-facing notification to a store outcome.
fn respond(
    action: Action,
    outcome: Result<Event, EventError>,
) -> Result<Json<MutationResponse>, AppError> {
    let notification = Notification::for_outcome(action, &outcome);

    match outcome {
        Ok(event) => {
            tracing::info!(id = %event.id, title = %event.title, ?action, "event stored");
            Ok(Json(MutationResponse {
                event,
                notification,
            }))
        }
        Err(error) => Err(AppError::Rejected {
            error,
            notification,
        }),
    }
}

/// GET /events - List events, optionally limited to a calendar view
async fn list_events(
    State(state): State<AppState>,
    Query(query): Query<ListQuery>,
) -> Result<Json<Vec<Event>>, AppError> {
    let range = query.range()?;
    let store = state.store().await;

    let events = match range {
        Some(range) => store.events_in_range(&range),
        None => store.list_events().to_vec(),
    };

    Ok(Json(events))
}

/// GET /events/:id - Fetch one event
async fn get_event(
    State(state): State<AppState>,
    Path(id): Path<u64>,
) -> Result<Json<Event>, AppError> {
    let id = EventId(id);
    let store = state.store().await;

    store
        .get_event(id)
        .cloned()
        .map(Json)
        .ok_or_else(|| AppError::from(EventError::NotFound(id)))
}

/// POST /events - Add a new event
async fn add_event(
    State(state): State<AppState>,
    payload: Result<Json<EventDraft>, JsonRejection>,
) -> Result<Json<MutationResponse>, AppError> {
    let Json(draft) = payload?;
    let outcome = state.store().await.add_event(draft);
    respond(Action::Add, outcome)
}

/// PUT /events/:id - Replace an event's fields
async fn edit_event(
    State(state): State<AppState>,
    Path(id): Path<u64>,
    payload: Result<Json<EventDraft>, JsonRejection>,
) -> Result<Json<MutationResponse>, AppError> {
    let Json(draft) = payload?;
    let outcome = state.store().await.edit_event(EventId(id), draft);
    respond(Action::Edit, outcome)
}

/// DELETE /events/:id - Remove an event
async fn delete_event(
    State(state): State<AppState>,
    Path(id): Path<u64>,
) -> Result<Json<MutationResponse>, AppError> {
    let outcome = state.store().await.delete_event(EventId(id));
    respond(Action::Delete, outcome)
}
