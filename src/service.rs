//! Delivery orchestration
//!
//! [`NotifierService`] sequences one notification: validate input, resolve
//! the destination, format the body, make exactly one send call (preceded by
//! a conversation-open call for direct messages), and normalize the result.
//! Failures are converted to structured responses at this boundary; nothing
//! below it panics or leaks raw error detail to the caller.

use std::sync::Arc;

use serde::Serialize;

use crate::error::{Error, ErrorCode, Result};
use crate::events::{DeliveryEvent, EventSink, NullSink};
use crate::secrets::{SecretProvider, BOT_TOKEN_SECRET};
use crate::slack::{format_message, SlackClient, PostMessageRequest, DEFAULT_BASE_URL};
use crate::types::{
    DeliveryResult, Destination, Dialect, HealthInfo, NotificationRequest, ValidationResult,
};

/// Caller-visible message for faults that are not part of the classified
/// taxonomy. Raw detail stays in the logs.
const INTERNAL_ERROR_DETAIL: &str = "internal error";

/// Wire response for `notify`
#[derive(Debug, Clone, Serialize)]
pub struct NotifyResponse {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub delivered_at: Option<chrono::DateTime<chrono::Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub retry_after: Option<u64>,
    /// Classification of the failure, for callers that map errors onto
    /// transport status codes. Not part of the wire body.
    #[serde(skip)]
    pub error_code: Option<ErrorCode>,
}

/// Wire response for `validate`
#[derive(Debug, Clone, Serialize)]
pub struct ValidateResponse {
    pub valid: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// The delivery orchestrator.
///
/// Stateless between requests: each `notify`/`validate` call resolves the
/// credential, builds a client, and performs at most two sequential outbound
/// calls. No retries, no timeouts beyond the transport's own, no
/// cancellation path.
pub struct NotifierService {
    secrets: Arc<dyn SecretProvider>,
    events: Arc<dyn EventSink>,
    base_url: String,
}

impl NotifierService {
    /// Create a service with the given secret provider and no event sink
    pub fn new(secrets: Arc<dyn SecretProvider>) -> Self {
        NotifierService {
            secrets,
            events: Arc::new(NullSink),
            base_url: DEFAULT_BASE_URL.to_string(),
        }
    }

    /// Attach an event sink (builder pattern)
    pub fn with_event_sink(mut self, events: Arc<dyn EventSink>) -> Self {
        self.events = events;
        self
    }

    /// Override the Slack API base URL, e.g. to point at a mock server
    /// (builder pattern)
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Deliver one notification.
    ///
    /// Never returns an error: every failure is folded into a structured
    /// [`NotifyResponse`].
    pub async fn notify(&self, request: NotificationRequest) -> NotifyResponse {
        match self.deliver(&request).await {
            Ok(result) => NotifyResponse {
                success: true,
                message_id: Some(result.message_id),
                delivered_at: Some(result.delivered_at),
                error: None,
                retry_after: None,
                error_code: None,
            },
            Err(err) => failure_response(err),
        }
    }

    async fn deliver(&self, request: &NotificationRequest) -> Result<DeliveryResult> {
        // Input validation happens before any credential or network work
        let destination = request.destination()?;
        let dialect = Dialect::from_tag(request.format.as_deref().unwrap_or("native"));
        let text = format_message(&request.message, dialect);

        let client = self.client()?;

        let channel = match &destination {
            // A failure here aborts before any send attempt
            Destination::Direct { recipient_id } => {
                client.open_conversation(recipient_id).await?
            }
            Destination::Channel { channel_id } => channel_id.clone(),
        };

        let mut payload = PostMessageRequest::new(channel, text);
        if !dialect.mrkdwn_enabled() {
            payload = payload.without_mrkdwn();
        }
        if let Some(thread_id) = request.thread_id.as_deref().filter(|t| !t.is_empty()) {
            payload = payload.with_thread_ts(thread_id);
        }
        if let Some(attachments) = &request.attachments {
            payload = payload.with_attachments(attachments.clone());
        }

        let posted = client.post_message(&payload).await?;
        let result = DeliveryResult::new(posted.ts);

        // Fire-and-forget; the sink cannot fail the request
        self.events
            .emit(DeliveryEvent {
                event_name: "notification.sent",
                channel_type: destination.channel_type(),
                org_id: request.org_id.clone(),
            })
            .await;

        Ok(result)
    }

    /// Pre-flight destination check.
    ///
    /// Advisory: every failure, upstream or local, maps to `valid: false`
    /// rather than a hard error.
    pub async fn validate(&self, channel_type: &str, target_id: &str) -> ValidateResponse {
        let result = match self.check_destination(channel_type, target_id).await {
            Ok(()) => ValidationResult::ok(),
            Err(err) if err.code == ErrorCode::Network => {
                tracing::error!(error = %err, "validation transport failure");
                ValidationResult::invalid(INTERNAL_ERROR_DETAIL)
            }
            Err(err) => ValidationResult::invalid(err.message),
        };

        ValidateResponse {
            valid: result.valid,
            error: result.detail,
        }
    }

    async fn check_destination(&self, channel_type: &str, target_id: &str) -> Result<()> {
        let destination = Destination::resolve(channel_type, Some(target_id), Some(target_id))?;
        let client = self.client()?;

        match destination {
            Destination::Direct { recipient_id } => {
                client.get_user(&recipient_id).await?;
            }
            Destination::Channel { channel_id } => {
                client.get_channel(&channel_id).await?;
            }
        }
        Ok(())
    }

    /// Static service identity for liveness probes
    pub fn health(&self) -> HealthInfo {
        HealthInfo {
            service: crate::SERVICE_NAME,
            version: crate::VERSION_STRING,
            timestamp: chrono::Utc::now(),
        }
    }

    fn client(&self) -> Result<SlackClient> {
        let token = self
            .secrets
            .get_secret(BOT_TOKEN_SECRET)
            .ok_or_else(|| Error::missing_credential(BOT_TOKEN_SECRET))?;
        SlackClient::new(token, &self.base_url)
    }
}

fn failure_response(err: Error) -> NotifyResponse {
    let (message, retry_after) = match err.code {
        ErrorCode::InvalidArgument | ErrorCode::MissingCredential => (err.message.clone(), None),
        code if code.is_upstream() => (err.message.clone(), err.retry_after()),
        _ => {
            // Unexpected fault: full detail in the logs, opaque string out
            tracing::error!(error = %err, "notification delivery failed");
            (INTERNAL_ERROR_DETAIL.to_string(), None)
        }
    };

    NotifyResponse {
        success: false,
        message_id: None,
        delivered_at: None,
        error: Some(message),
        retry_after,
        error_code: Some(err.code),
    }
}
