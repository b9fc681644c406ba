//! Calendar function - handles /calendar?action=list_events|add_event.
//!
//! Every invocation fetches the service-account secret, mints provider
//! credentials, and dispatches on HTTP method plus the `action` query
//! parameter. Initialization failures fail the whole request with 500
//! before the action is examined.

use std::sync::Arc;

use chrono::Utc;
use lambda_http::{run, service_fn, Body, Request, RequestExt, Response};
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use shared::google_auth::fetch_access_token;
use shared::http::{error_response, json_response};
use shared::models::{validate_event_payload, EventResponse, EventSummary};
use shared::{
    get_secret, CalendarClient, Config, Error, EventBackend, Result, ServiceAccountKey,
};

/// Long-lived per-instance state: connection pools and deployment
/// configuration. Credentials never live here; they are fetched per
/// invocation and dropped with the client built from them.
struct AppState {
    config: Config,
    region: Option<String>,
    secrets: aws_sdk_secretsmanager::Client,
    http: reqwest::Client,
}

impl AppState {
    async fn new() -> Self {
        let config = Config::from_env();
        let aws_config = aws_config::load_defaults(aws_config::BehaviorVersion::latest()).await;
        let region = aws_config.region().map(|r| r.as_ref().to_string());
        Self {
            config,
            region,
            secrets: aws_sdk_secretsmanager::Client::new(&aws_config),
            http: reqwest::Client::new(),
        }
    }
}

/// Resolve the secret and build an authenticated calendar client.
///
/// The deployment region must have been resolved from the environment or
/// the ambient provider chain; there is no placeholder fallback.
async fn init_client(state: &AppState) -> Result<CalendarClient> {
    if state.region.is_none() {
        return Err(Error::Config(
            "no deployment region resolved; set AWS_REGION or configure a default region"
                .to_string(),
        ));
    }

    let secret = get_secret(&state.secrets, &state.config.secret_name).await?;
    let key = ServiceAccountKey::from_json(&secret)?;
    let token = fetch_access_token(&state.http, &key, &state.config.scopes).await?;
    Ok(CalendarClient::new(state.http.clone(), token))
}

/// Keep client-input and provider errors as-is; everything else becomes an
/// internal error framed with the failing operation.
fn internal_context(err: Error, context: &str) -> Error {
    match err {
        Error::Validation(_) | Error::MethodNotAllowed(_) | Error::Provider { .. } => err,
        other => Error::Internal(format!("{context}: {other}")),
    }
}

async fn list_events(
    client: &CalendarClient,
    calendar_id: &str,
    max_results: u32,
) -> Result<Response<Body>> {
    let events = client
        .list_events(calendar_id, Utc::now(), max_results)
        .await?;

    if events.is_empty() {
        return json_response(
            200,
            &serde_json::json!({"message": "No upcoming events found."}),
        );
    }

    let formatted: Vec<EventSummary> = events.iter().map(EventSummary::from).collect();
    json_response(200, &formatted)
}

async fn add_event(
    client: &CalendarClient,
    calendar_id: &str,
    body: &Body,
) -> Result<Response<Body>> {
    let payload: serde_json::Value = serde_json::from_slice(body.as_ref())
        .map_err(|_| Error::Validation("Invalid JSON payload for event.".to_string()))?;
    let event = validate_event_payload(&payload)?;

    let created = client.insert_event(calendar_id, &event).await?;
    info!(
        "Created event {} on calendar '{}'",
        created.id.as_deref().unwrap_or("<no id>"),
        calendar_id
    );

    json_response(
        201,
        &EventResponse {
            message: "Event created.".to_string(),
            event_id: created.id,
            link: created.html_link,
        },
    )
}

/// Route a request to the matching action arm.
async fn dispatch(
    client: &CalendarClient,
    config: &Config,
    event: Request,
) -> Result<Response<Body>> {
    let params = event.query_string_parameters();
    let action = params.first("action").map(str::to_string);
    let calendar_id = params
        .first("calendarId")
        .unwrap_or(&config.default_calendar_id)
        .to_string();

    match (event.method().as_str(), action.as_deref()) {
        ("GET", Some("list_events")) => {
            let max_results = match params.first("maxResults") {
                Some(raw) => raw
                    .parse::<u32>()
                    .map_err(|_| Error::Validation(format!("Invalid 'maxResults' value: {raw}")))?,
                None => 10,
            };
            list_events(client, &calendar_id, max_results)
                .await
                .map_err(|e| internal_context(e, "Error listing events"))
        }
        ("POST", Some("add_event")) => add_event(client, &calendar_id, event.body())
            .await
            .map_err(|e| internal_context(e, "Error adding event")),
        _ => Err(Error::Validation(
            "Invalid request. Specify action ('list_events' with GET, 'add_event' with POST) and ensure correct HTTP method."
                .to_string(),
        )),
    }
}

async fn function_handler(
    state: Arc<AppState>,
    event: Request,
) -> std::result::Result<Response<Body>, lambda_http::Error> {
    info!("Calendar request: {} {}", event.method(), event.uri().path());

    let client = match init_client(&state).await {
        Ok(client) => client,
        Err(err) => {
            error!("failed to initialize calendar service: {err}");
            return Ok(error_response(
                500,
                format!("Error initializing Google Calendar service: {err}"),
            )?);
        }
    };

    match dispatch(&client, &state.config, event).await {
        Ok(response) => Ok(response),
        Err(err) => {
            error!("calendar request failed: {err}");
            Ok(error_response(err.status_code(), err.to_string())?)
        }
    }
}

#[tokio::main]
async fn main() -> std::result::Result<(), lambda_http::Error> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .init();

    let state = Arc::new(AppState::new().await);

    run(service_fn(move |event| {
        let state = Arc::clone(&state);
        async move { function_handler(state, event).await }
    }))
    .await
}
