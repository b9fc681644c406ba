//! The event-creation capability seam.

use async_trait::async_trait;
use chrono::Utc;
use serde::Serialize;
use tracing::info;

use crate::models::EventRequest;
use crate::Result;

/// An event created by a backend.
#[derive(Debug, Clone, Serialize)]
pub struct InsertedEvent {
    pub id: Option<String>,
    pub html_link: Option<String>,
}

/// Anything that can create a calendar event.
///
/// The real provider client and the simulated backend implement the same
/// interface, so a handler's validation logic never changes when the
/// backend behind it does.
#[async_trait]
pub trait EventBackend {
    async fn insert_event(
        &self,
        calendar_id: &str,
        event: &EventRequest,
    ) -> Result<InsertedEvent>;
}

/// Placeholder backend: performs no I/O, logs the entry, and fabricates an
/// identifier from the current UTC timestamp at microsecond precision.
#[derive(Debug, Default, Clone)]
pub struct SimulatedBackend;

#[async_trait]
impl EventBackend for SimulatedBackend {
    async fn insert_event(
        &self,
        calendar_id: &str,
        event: &EventRequest,
    ) -> Result<InsertedEvent> {
        info!(
            "Simulating calendar entry creation on '{}': summary='{}', start={}, end={}",
            calendar_id, event.summary, event.start.date_time, event.end.date_time
        );
        let id = format!("evt_{}", Utc::now().format("%Y%m%d%H%M%S%6f"));
        Ok(InsertedEvent {
            id: Some(id),
            html_link: None,
        })
    }
}
