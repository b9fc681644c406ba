//! Calendar-entry creation function - handles POST /create-calendar-entry.
//!
//! Validates the inbound payload and hands it to the simulated creation
//! backend. No real calendar I/O happens here; swapping in the genuine
//! provider client only changes the backend wired up in `main`.

use std::sync::Arc;

use lambda_http::http::Method;
use lambda_http::{run, service_fn, Body, Request, Response};
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use shared::http::{error_response, json_response};
use shared::models::{CalendarEntryResponse, RawCalendarEntry};
use shared::{Config, Error, EventBackend, Result, SimulatedBackend};

async fn handle<B: EventBackend + Sync>(
    backend: &B,
    calendar_id: &str,
    event: Request,
) -> Result<Response<Body>> {
    if event.method() != Method::POST {
        return Err(Error::MethodNotAllowed(
            "Only POST requests are accepted".to_string(),
        ));
    }

    let raw: RawCalendarEntry = serde_json::from_slice(event.body().as_ref())
        .map_err(|_| Error::Validation("Invalid JSON payload".to_string()))?;
    let entry = raw.validate()?;

    let created = backend.insert_event(calendar_id, &entry.to_event()).await?;
    let event_id = created
        .id
        .ok_or_else(|| Error::Internal("Failed to create calendar entry via API.".to_string()))?;

    info!("Created calendar entry {} ('{}')", event_id, entry.title);

    json_response(
        201,
        &CalendarEntryResponse {
            message: "Calendar entry created successfully.".to_string(),
            event_id,
            details: entry,
        },
    )
}

async fn function_handler<B: EventBackend + Sync>(
    backend: &B,
    calendar_id: &str,
    event: Request,
) -> std::result::Result<Response<Body>, lambda_http::Error> {
    match handle(backend, calendar_id, event).await {
        Ok(response) => Ok(response),
        Err(err) => {
            error!("calendar entry creation failed: {err}");
            let (status, message) = match &err {
                Error::Validation(m) => (400, m.clone()),
                Error::MethodNotAllowed(m) => (405, m.clone()),
                Error::Internal(m) => (500, m.clone()),
                other => (500, format!("An unexpected error occurred: {other}")),
            };
            Ok(error_response(status, message)?)
        }
    }
}

#[tokio::main]
async fn main() -> std::result::Result<(), lambda_http::Error> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .init();

    let config = Config::from_env();
    let backend = Arc::new(SimulatedBackend);

    run(service_fn(move |event| {
        let backend = Arc::clone(&backend);
        let calendar_id = config.default_calendar_id.clone();
        async move { function_handler(backend.as_ref(), &calendar_id, event).await }
    }))
    .await
}

#[cfg(test)]
mod tests {
    use super::*;
    use lambda_http::http;

    fn post(body: serde_json::Value) -> Request {
        http::Request::builder()
            .method("POST")
            .uri("/create-calendar-entry")
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    async fn run_handler(event: Request) -> Response<Body> {
        function_handler(&SimulatedBackend, "primary", event)
            .await
            .unwrap()
    }

    fn body_json(response: &Response<Body>) -> serde_json::Value {
        serde_json::from_slice(response.body().as_ref()).unwrap()
    }

    #[tokio::test]
    async fn test_valid_payload_returns_created() {
        let response = run_handler(post(serde_json::json!({
            "date": "2025-12-26",
            "time": "03:00 PM",
            "title": "Project Brainstorm",
            "description": "Brainstorm new features for Q1 2026.",
            "attendees": ["alice@example.com", "bob@example.com"]
        })))
        .await;

        assert_eq!(response.status(), 201);
        let body = body_json(&response);
        assert_eq!(body["message"], "Calendar entry created successfully.");

        let event_id = body["eventId"].as_str().unwrap();
        let digits = event_id.strip_prefix("evt_").unwrap();
        assert!(digits.len() >= 14);
        assert!(digits.chars().all(|c| c.is_ascii_digit()));

        assert_eq!(body["details"]["date"], "2025-12-26");
        assert_eq!(body["details"]["time"], "03:00 PM");
        assert_eq!(body["details"]["attendees"][0], "alice@example.com");
    }

    #[tokio::test]
    async fn test_attendees_echo_null_when_absent() {
        let response = run_handler(post(serde_json::json!({
            "date": "2025-12-26",
            "time": "03:00 PM",
            "title": "Solo review",
            "description": "Review the quarterly numbers."
        })))
        .await;

        assert_eq!(response.status(), 201);
        assert!(body_json(&response)["details"]["attendees"].is_null());
    }

    #[tokio::test]
    async fn test_missing_fields_are_named() {
        let response = run_handler(post(serde_json::json!({
            "date": "2025-12-27",
            "title": "Quick Sync"
        })))
        .await;

        assert_eq!(response.status(), 400);
        assert_eq!(
            body_json(&response)["error"],
            "Missing required parameters: 'time', 'description'."
        );
    }

    #[tokio::test]
    async fn test_wrong_date_format() {
        let response = run_handler(post(serde_json::json!({
            "date": "27-12-2025",
            "time": "10:00 AM",
            "title": "Invalid Date Test",
            "description": "Testing invalid date format."
        })))
        .await;

        assert_eq!(response.status(), 400);
        assert_eq!(
            body_json(&response)["error"],
            "Invalid date or time format. Use YYYY-MM-DD for date and HH:MM AM/PM for time."
        );
    }

    #[tokio::test]
    async fn test_get_is_method_not_allowed() {
        let event = http::Request::builder()
            .method("GET")
            .uri("/create-calendar-entry")
            .body(Body::Empty)
            .unwrap();

        let response = function_handler(&SimulatedBackend, "primary", event)
            .await
            .unwrap();

        assert_eq!(response.status(), 405);
        assert_eq!(
            body_json(&response)["error"],
            "Only POST requests are accepted"
        );
    }

    #[tokio::test]
    async fn test_empty_body_is_bad_request() {
        let event = http::Request::builder()
            .method("POST")
            .uri("/create-calendar-entry")
            .body(Body::Empty)
            .unwrap();

        let response = function_handler(&SimulatedBackend, "primary", event)
            .await
            .unwrap();

        assert_eq!(response.status(), 400);
        assert_eq!(body_json(&response)["error"], "Invalid JSON payload");
    }
}
