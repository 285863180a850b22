//! HTTP client for communicating with evcal-server

use std::fmt;
use std::process::Command;
use std::time::Duration;

use anyhow::{Context, Result};
use evcal_core::date_range::CalendarView;
use evcal_core::{Event, EventDraft, EventId, Notification};
use serde::Deserialize;
use serde::de::DeserializeOwned;

use crate::utils::tui::create_spinner;

const MAX_RETRIES: u32 = 10;
const RETRY_DELAY_MS: u64 = 200;

/// HTTP client for evcal-server
pub struct Client {
    http: reqwest::Client,
    base_url: String,
}

/// Response to add/edit/delete
#[derive(Debug, Deserialize)]
pub struct MutationResponse {
    pub event: Event,
    pub notification: Notification,
}

/// Error body returned by the server
#[derive(Debug, Deserialize)]
pub struct ApiError {
    pub error: String,
    pub detail: Option<String>,
    pub notification: Option<Notification>,
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (&self.notification, &self.detail) {
            (Some(notification), _) => write!(f, "{}", notification.message()),
            (None, Some(detail)) => write!(f, "{}", detail),
            (None, None) => write!(f, "{}", self.error),
        }
    }
}

impl std::error::Error for ApiError {}

impl Client {
    /// Connect to existing server or start one
    pub async fn connect(base_url: String) -> Result<Self> {
        let client = Self {
            http: reqwest::Client::new(),
            base_url,
        };

        // Try to connect to existing server
        if client.health_check().await.is_ok() {
            return Ok(client);
        }

        tracing::debug!(url = %client.base_url, "server not reachable, starting it");
        start_server()?;

        let spinner = create_spinner("Starting evcal-server".to_string());
        for _ in 0..MAX_RETRIES {
            tokio::time::sleep(Duration::from_millis(RETRY_DELAY_MS)).await;
            if client.health_check().await.is_ok() {
                spinner.finish_and_clear();
                return Ok(client);
            }
        }
        spinner.finish_and_clear();

        anyhow::bail!("Failed to connect to evcal-server at {}", client.base_url)
    }

    async fn health_check(&self) -> Result<()> {
        self.http
            .get(format!("{}/health", self.base_url))
            .timeout(Duration::from_secs(2))
            .send()
            .await?
            .error_for_status()?;
        Ok(())
    }

    /// GET /events, optionally limited to a view around `date` (YYYY-MM-DD)
    pub async fn list_events(
        &self,
        view: Option<CalendarView>,
        date: Option<String>,
    ) -> Result<Vec<Event>> {
        let mut query: Vec<(&str, String)> = Vec::new();
        if let Some(view) = view {
            query.push(("view", view.to_string()));
        }
        if let Some(date) = date {
            query.push(("date", date));
        }

        let request = self
            .http
            .get(format!("{}/events", self.base_url))
            .query(&query);
        self.send(request).await
    }

    /// GET /events/:id
    pub async fn get_event(&self, id: EventId) -> Result<Event> {
        let request = self.http.get(format!("{}/events/{}", self.base_url, id));
        self.send(request).await
    }

    /// POST /events
    pub async fn add_event(&self, draft: &EventDraft) -> Result<MutationResponse> {
        let request = self
            .http
            .post(format!("{}/events", self.base_url))
            .json(draft);
        self.send(request).await
    }

    /// PUT /events/:id
    pub async fn edit_event(&self, id: EventId, draft: &EventDraft) -> Result<MutationResponse> {
        let request = self
            .http
            .put(format!("{}/events/{}", self.base_url, id))
            .json(draft);
        self.send(request).await
    }

    /// DELETE /events/:id
    pub async fn delete_event(&self, id: EventId) -> Result<MutationResponse> {
        let request = self
            .http
            .delete(format!("{}/events/{}", self.base_url, id));
        self.send(request).await
    }

    async fn send<T: DeserializeOwned>(&self, request: reqwest::RequestBuilder) -> Result<T> {
        let resp = request
            .send()
            .await
            .context("Failed to connect to server")?;

        let status = resp.status();
        tracing::debug!(%status, url = %resp.url(), "server responded");

        if !status.is_success() {
            let err: ApiError = resp
                .json()
                .await
                .with_context(|| format!("Server returned {}", status))?;
            return Err(err.into());
        }

        Ok(resp.json().await?)
    }
}

/// Start the evcal-server process
fn start_server() -> Result<()> {
    Command::new("evcal-server")
        .spawn()
        .context("Failed to start evcal-server. Is it installed?")?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn api_error_prefers_notification_message() {
        let err: ApiError = serde_json::from_str(
            r#"{
                "error": "overlap_conflict",
                "detail": "Event overlaps with 'Vacation' (id 1)",
                "notification": {
                    "kind": "error",
                    "message": "Event time overlaps with an existing event."
                }
            }"#,
        )
        .unwrap();
        assert_eq!(err.to_string(), "Event time overlaps with an existing event.");
    }

    #[test]
    fn api_error_falls_back_to_detail() {
        let err: ApiError =
            serde_json::from_str(r#"{"error": "bad_request", "detail": "Invalid view 'year'"}"#)
                .unwrap();
        assert_eq!(err.to_string(), "Invalid view 'year'");
    }
}
