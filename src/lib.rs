//! slack-notify: a notification relay for the Slack Web API
//!
//! Accepts a generic "send a message" request, resolves its destination and
//! markup dialect, forwards it to Slack, and translates Slack's responses
//! (including rate limiting and auth failures) into a uniform,
//! retry-annotated result.
//!
//! The HTTP server layer, request authentication, and credential storage are
//! external collaborators; this crate exposes [`NotifierService`] for them
//! to call and the [`SecretProvider`]/[`EventSink`] traits for them to
//! implement.

// Core modules
pub mod error;
pub mod events;
pub mod secrets;
pub mod service;
pub mod slack;
pub mod types;

// Re-exports for convenience
pub use error::{Error, ErrorCode, Result};
pub use events::{DeliveryEvent, EventSink, LogSink, NullSink};
pub use secrets::{EnvSecrets, SecretProvider, StaticSecrets, BOT_TOKEN_SECRET};
pub use service::{NotifierService, NotifyResponse, ValidateResponse};
pub use types::{
    DeliveryResult, Destination, Dialect, HealthInfo, NotificationRequest, ValidationResult,
};

// Service identity, reported by the liveness probe
pub const SERVICE_NAME: &str = "slack-notify";
pub const VERSION_STRING: &str = env!("CARGO_PKG_VERSION");
