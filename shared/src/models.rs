//! Request/response payloads for the calendar-tools functions.
//!
//! Everything here is transient per-invocation data; nothing persists and
//! nothing is mutated after validation.

use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use validator::ValidateEmail;

use crate::{Error, Result};

const DATE_FORMAT: &str = "%Y-%m-%d";
const TIME_FORMAT: &str = "%I:%M %p";

/// Inbound calendar-entry payload, before validation.
///
/// Every field is optional at the serde layer so that missing ones can be
/// enumerated in the 400 response instead of failing the whole parse.
#[derive(Debug, Deserialize)]
pub struct RawCalendarEntry {
    pub date: Option<String>,
    pub time: Option<String>,
    pub title: Option<String>,
    pub description: Option<String>,
    pub attendees: Option<Vec<String>>,
}

fn take(
    value: Option<String>,
    name: &'static str,
    missing: &mut Vec<&'static str>,
) -> String {
    match value {
        Some(v) if !v.trim().is_empty() => v,
        _ => {
            missing.push(name);
            String::new()
        }
    }
}

impl RawCalendarEntry {
    /// Validate the payload into a [`CalendarEntryRequest`].
    ///
    /// Missing or empty required fields are reported together; date and
    /// time must match `YYYY-MM-DD` and 12-hour `HH:MM AM/PM`; attendee
    /// addresses must be well-formed emails.
    pub fn validate(self) -> Result<CalendarEntryRequest> {
        let mut missing = Vec::new();
        let date = take(self.date, "date", &mut missing);
        let time = take(self.time, "time", &mut missing);
        let title = take(self.title, "title", &mut missing);
        let description = take(self.description, "description", &mut missing);

        if !missing.is_empty() {
            let names = missing
                .iter()
                .map(|n| format!("'{n}'"))
                .collect::<Vec<_>>()
                .join(", ");
            return Err(Error::Validation(format!(
                "Missing required parameters: {names}."
            )));
        }

        let (Ok(parsed_date), Ok(parsed_time)) = (
            NaiveDate::parse_from_str(&date, DATE_FORMAT),
            NaiveTime::parse_from_str(&time, TIME_FORMAT),
        ) else {
            return Err(Error::Validation(
                "Invalid date or time format. Use YYYY-MM-DD for date and HH:MM AM/PM for time."
                    .to_string(),
            ));
        };

        if let Some(attendees) = &self.attendees {
            for address in attendees {
                if !address.validate_email() {
                    return Err(Error::Validation(format!(
                        "Invalid attendee email address: '{address}'"
                    )));
                }
            }
        }

        Ok(CalendarEntryRequest {
            date,
            time,
            title,
            description,
            attendees: self.attendees,
            start: NaiveDateTime::new(parsed_date, parsed_time),
        })
    }
}

/// A validated calendar-entry request. Serializes as the `details` echo in
/// the creation response, with the original field spellings preserved.
#[derive(Debug, Clone, Serialize)]
pub struct CalendarEntryRequest {
    pub date: String,
    pub time: String,
    pub title: String,
    pub description: String,
    pub attendees: Option<Vec<String>>,
    #[serde(skip)]
    start: NaiveDateTime,
}

impl CalendarEntryRequest {
    /// Parsed start instant (date + wall-clock time, taken as UTC).
    pub fn start(&self) -> NaiveDateTime {
        self.start
    }

    /// Map the entry onto the provider event shape so it can be handed to
    /// any [`crate::EventBackend`]. The entry carries no end time, so the
    /// event gets a one-hour duration.
    pub fn to_event(&self) -> EventRequest {
        let start = self.start.and_utc();
        let end = start + chrono::Duration::hours(1);

        let mut extra = Map::new();
        extra.insert("description".into(), Value::String(self.description.clone()));
        if let Some(attendees) = &self.attendees {
            extra.insert(
                "attendees".into(),
                Value::Array(
                    attendees
                        .iter()
                        .map(|a| serde_json::json!({ "email": a }))
                        .collect(),
                ),
            );
        }

        EventRequest {
            summary: self.title.clone(),
            start: EventTime {
                date_time: start.to_rfc3339(),
                extra: Map::new(),
            },
            end: EventTime {
                date_time: end.to_rfc3339(),
                extra: Map::new(),
            },
            extra,
        }
    }
}

/// Successful entry-creation response.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CalendarEntryResponse {
    pub message: String,
    pub event_id: String,
    pub details: CalendarEntryRequest,
}

/// Provider-shaped event payload. Provider-defined fields the contract does
/// not model (timeZone, location, reminders, ...) ride along untouched in
/// the flattened maps.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EventRequest {
    pub summary: String,
    pub start: EventTime,
    pub end: EventTime,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// A timed event boundary; all-day (`date`) boundaries are not accepted on
/// insert, so `dateTime` is required here.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EventTime {
    pub date_time: String,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Validate an `add_event` JSON body into an [`EventRequest`].
///
/// Missing required fields are enumerated before any field-shape checks,
/// and nothing here touches the provider.
pub fn validate_event_payload(value: &Value) -> Result<EventRequest> {
    let Some(obj) = value.as_object() else {
        return Err(Error::Validation("Invalid JSON payload for event.".to_string()));
    };

    let mut missing = Vec::new();
    for name in ["summary", "start", "end"] {
        let present = match obj.get(name) {
            None | Some(Value::Null) => false,
            Some(Value::String(s)) => !s.trim().is_empty(),
            Some(_) => true,
        };
        if !present {
            missing.push(name);
        }
    }
    if !missing.is_empty() {
        return Err(Error::Validation(format!(
            "Missing required fields in event data: {}",
            missing.join(", ")
        )));
    }

    if let Some(summary) = obj.get("summary") {
        if !summary.is_string() {
            return Err(Error::Validation("Event 'summary' must be a string.".to_string()));
        }
    }

    for name in ["start", "end"] {
        let timestamp_ok = obj
            .get(name)
            .and_then(Value::as_object)
            .and_then(|o| o.get("dateTime"))
            .and_then(Value::as_str)
            .map(|s| DateTime::parse_from_rfc3339(s).is_ok())
            .unwrap_or(false);
        if !timestamp_ok {
            return Err(Error::Validation(format!(
                "Event '{name}' must be an object with a 'dateTime' field (RFC3339)."
            )));
        }
    }

    serde_json::from_value(value.clone()).map_err(Error::from)
}

/// Successful event-insert response.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EventResponse {
    pub message: String,
    pub event_id: Option<String>,
    pub link: Option<String>,
}

/// Event resource as returned by the calendar provider.
#[derive(Debug, Clone, Deserialize)]
pub struct EventResource {
    pub id: Option<String>,
    pub summary: Option<String>,
    pub start: Option<EventTimeResource>,
    #[serde(rename = "htmlLink")]
    pub html_link: Option<String>,
}

/// Start/end boundary of a provider event: timed events carry `dateTime`,
/// all-day events carry `date`.
#[derive(Debug, Clone, Deserialize)]
pub struct EventTimeResource {
    #[serde(rename = "dateTime")]
    pub date_time: Option<String>,
    pub date: Option<String>,
}

/// Provider list-response envelope.
#[derive(Debug, Deserialize)]
pub struct EventListResponse {
    pub items: Option<Vec<EventResource>>,
}

/// One row of the `list_events` response.
#[derive(Debug, Serialize)]
pub struct EventSummary {
    pub start: Option<String>,
    pub summary: String,
}

impl From<&EventResource> for EventSummary {
    fn from(resource: &EventResource) -> Self {
        let start = resource
            .start
            .as_ref()
            .and_then(|s| s.date_time.clone().or_else(|| s.date.clone()));
        Self {
            start,
            summary: resource
                .summary
                .clone()
                .unwrap_or_else(|| "(No title)".to_string()),
        }
    }
}
