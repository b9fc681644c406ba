//! Google Calendar API client.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde_json::Value;

use crate::backend::{EventBackend, InsertedEvent};
use crate::models::{EventListResponse, EventRequest, EventResource};
use crate::{Error, Result};

const CALENDAR_API_BASE: &str = "https://www.googleapis.com/calendar/v3";

/// Authenticated client for the calendar provider. Holds a bearer token
/// minted for a single invocation.
pub struct CalendarClient {
    http: reqwest::Client,
    access_token: String,
    base_url: String,
}

impl CalendarClient {
    pub fn new(http: reqwest::Client, access_token: String) -> Self {
        Self::with_base_url(http, access_token, CALENDAR_API_BASE)
    }

    /// Client pointed at a non-default API endpoint. Used by tests.
    pub fn with_base_url(
        http: reqwest::Client,
        access_token: String,
        base_url: impl Into<String>,
    ) -> Self {
        Self {
            http,
            access_token,
            base_url: base_url.into(),
        }
    }

    fn auth_header(&self) -> String {
        format!("Bearer {}", self.access_token)
    }

    /// List up to `max_results` single (non-recurring-expanded) events
    /// starting at or after `time_min`, ordered by start time. One page,
    /// one attempt.
    pub async fn list_events(
        &self,
        calendar_id: &str,
        time_min: DateTime<Utc>,
        max_results: u32,
    ) -> Result<Vec<EventResource>> {
        let url = format!(
            "{}/calendars/{}/events?timeMin={}&maxResults={}&singleEvents=true&orderBy=startTime",
            self.base_url,
            urlencoding::encode(calendar_id),
            urlencoding::encode(&time_min.to_rfc3339()),
            max_results,
        );

        let response = self
            .http
            .get(&url)
            .header("Authorization", self.auth_header())
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(provider_error(response).await);
        }

        let body: EventListResponse = response.json().await?;
        Ok(body.items.unwrap_or_default())
    }
}

#[async_trait]
impl EventBackend for CalendarClient {
    /// Insert an event into `calendar_id`, passing the payload through to
    /// the provider unmodified.
    async fn insert_event(
        &self,
        calendar_id: &str,
        event: &EventRequest,
    ) -> Result<InsertedEvent> {
        let url = format!(
            "{}/calendars/{}/events",
            self.base_url,
            urlencoding::encode(calendar_id)
        );

        let response = self
            .http
            .post(&url)
            .header("Authorization", self.auth_header())
            .json(event)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(provider_error(response).await);
        }

        let created: EventResource = response.json().await?;
        Ok(InsertedEvent {
            id: created.id,
            html_link: created.html_link,
        })
    }
}

/// Decode the provider's structured error message, falling back to the raw
/// body text.
async fn provider_error(response: reqwest::Response) -> Error {
    let status = response.status().as_u16();
    let text = response.text().await.unwrap_or_default();
    let message = serde_json::from_str::<Value>(&text)
        .ok()
        .and_then(|v| {
            v.get("error")
                .and_then(|e| e.get("message"))
                .and_then(Value::as_str)
                .map(str::to_string)
        })
        .unwrap_or(text);
    Error::Provider { status, message }
}
