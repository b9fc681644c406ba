//! Configuration for the calendar-tools functions.

use std::env;

/// Default OAuth scope requested for the calendar provider.
pub const CALENDAR_SCOPE: &str = "https://www.googleapis.com/auth/calendar";

/// Application configuration loaded from environment variables.
///
/// All values are fixed at deployment time. The deployment region is not
/// part of this struct; it is resolved through the ambient AWS provider
/// chain and checked at startup (no hard-coded fallback).
#[derive(Debug, Clone)]
pub struct Config {
    /// Name of the secret holding the service-account key JSON
    pub secret_name: String,
    /// Calendar to interact with when the request does not name one
    pub default_calendar_id: String,
    /// OAuth scopes requested when minting provider credentials
    pub scopes: Vec<String>,
}

impl Config {
    /// Load configuration from environment variables.
    pub fn from_env() -> Self {
        Self {
            secret_name: env::var("GOOGLE_CALENDAR_SECRET_NAME")
                .unwrap_or_else(|_| "calendar-tools/service-account-key".to_string()),
            default_calendar_id: env::var("GOOGLE_CALENDAR_ID")
                .unwrap_or_else(|_| "primary".to_string()),
            scopes: env::var("GOOGLE_CALENDAR_SCOPES")
                .unwrap_or_else(|_| CALENDAR_SCOPE.to_string())
                .split(',')
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty())
                .collect(),
        }
    }
}
