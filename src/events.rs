//! Fire-and-forget delivery events
//!
//! Emitted after a successful send. Sinks are best-effort: a sink that
//! fails or blocks must never fail or delay the request itself, so the
//! trait is infallible and implementations swallow their own errors.

use async_trait::async_trait;

/// A structured event describing one successful delivery
#[derive(Debug, Clone)]
pub struct DeliveryEvent {
    /// Event name, e.g. "notification.sent"
    pub event_name: &'static str,
    /// Wire literal of the destination kind ("dm" or "channel")
    pub channel_type: &'static str,
    /// Organization the request was sent on behalf of, when known
    pub org_id: Option<String>,
}

/// Receives delivery events after a successful send
#[async_trait]
pub trait EventSink: Send + Sync {
    async fn emit(&self, event: DeliveryEvent);
}

/// Sink that drops every event
#[derive(Debug, Default, Clone)]
pub struct NullSink;

#[async_trait]
impl EventSink for NullSink {
    async fn emit(&self, _event: DeliveryEvent) {}
}

/// Sink that records events as structured log lines
#[derive(Debug, Default, Clone)]
pub struct LogSink;

#[async_trait]
impl EventSink for LogSink {
    async fn emit(&self, event: DeliveryEvent) {
        tracing::info!(
            event = event.event_name,
            channel_type = event.channel_type,
            org_id = event.org_id.as_deref().unwrap_or(""),
            "delivery event"
        );
    }
}
