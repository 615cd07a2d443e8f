//! Core types for slack-notify
//!
//! Request-scoped value objects that flow through the delivery orchestrator.
//! Nothing here is persisted or shared across requests.

pub mod request;
pub mod result;

// Re-export for convenience
pub use request::{Destination, Dialect, NotificationRequest};
pub use result::{DeliveryResult, HealthInfo, ValidationResult};
