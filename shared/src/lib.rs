//! Shared library for the calendar-tools serverless functions.
//!
//! This crate provides the configuration, error, secret-store, provider
//! auth, calendar client, and payload types used by the function binaries.

pub mod backend;
pub mod calendar;
pub mod config;
pub mod error;
pub mod google_auth;
pub mod http;
pub mod models;
pub mod secrets;

pub use backend::{EventBackend, InsertedEvent, SimulatedBackend};
pub use calendar::CalendarClient;
pub use config::Config;
pub use error::{Error, Result};
pub use google_auth::ServiceAccountKey;
pub use secrets::get_secret;
