//! Inbound notification request types

use serde::Deserialize;

use crate::error::{Error, Result};

/// Wire literal for a direct message destination
pub const CHANNEL_TYPE_DM: &str = "dm";
/// Wire literal for a channel destination
pub const CHANNEL_TYPE_CHANNEL: &str = "channel";

/// A request to deliver one message, as received at the service boundary.
///
/// Field names and the `dm`/`channel` literals for `channel_type` match the
/// existing wire contract and must not change.
#[derive(Debug, Clone, Deserialize)]
pub struct NotificationRequest {
    /// Message body, interpreted according to `format`
    pub message: String,
    /// Destination kind: "dm" or "channel"
    pub channel_type: String,
    /// Target user ID, required when channel_type is "dm"
    #[serde(default)]
    pub recipient_id: Option<String>,
    /// Target channel ID, required when channel_type is "channel"
    #[serde(default)]
    pub channel_id: Option<String>,
    /// Source markup dialect of `message`; defaults to native
    #[serde(default)]
    pub format: Option<String>,
    /// Upstream message ID to reply under (thread anchor)
    #[serde(default)]
    pub thread_id: Option<String>,
    /// Opaque attachment records, forwarded to the platform untouched
    #[serde(default)]
    pub attachments: Option<Vec<serde_json::Value>>,
    /// Organization identifier, carried through to delivery events
    #[serde(default)]
    pub org_id: Option<String>,
}

/// Validated message destination.
///
/// Constructed only through [`Destination::resolve`], so code past the
/// service boundary never re-checks the channel_type tag.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Destination {
    /// Direct message to a user; the user ID is opened into a conversation
    /// before sending
    Direct { recipient_id: String },
    /// Post into a channel the bot is a member of
    Channel { channel_id: String },
}

impl Destination {
    /// Validate a raw channel_type tag plus its identifier pair.
    ///
    /// # Errors
    /// Returns `InvalidArgument` when the tag is not `dm`/`channel` or the
    /// identifier required by the tag is missing or empty.
    pub fn resolve(
        channel_type: &str,
        recipient_id: Option<&str>,
        channel_id: Option<&str>,
    ) -> Result<Self> {
        match channel_type {
            CHANNEL_TYPE_DM => match recipient_id {
                Some(id) if !id.is_empty() => Ok(Destination::Direct {
                    recipient_id: id.to_string(),
                }),
                _ => Err(Error::invalid_argument(
                    "recipient_id is required for dm notifications",
                )),
            },
            CHANNEL_TYPE_CHANNEL => match channel_id {
                Some(id) if !id.is_empty() => Ok(Destination::Channel {
                    channel_id: id.to_string(),
                }),
                _ => Err(Error::invalid_argument(
                    "channel_id is required for channel notifications",
                )),
            },
            "" => Err(Error::invalid_argument("channel_type is required")),
            other => Err(Error::invalid_argument(format!(
                "Unsupported channel_type: {other}"
            ))),
        }
    }

    /// The wire literal for this destination kind
    pub fn channel_type(&self) -> &'static str {
        match self {
            Destination::Direct { .. } => CHANNEL_TYPE_DM,
            Destination::Channel { .. } => CHANNEL_TYPE_CHANNEL,
        }
    }
}

impl NotificationRequest {
    /// Validate the request and produce its destination.
    ///
    /// # Errors
    /// Returns `InvalidArgument` for an empty message or an invalid
    /// channel_type/identifier combination.
    pub fn destination(&self) -> Result<Destination> {
        if self.message.is_empty() {
            return Err(Error::invalid_argument("message is required"));
        }
        Destination::resolve(
            &self.channel_type,
            self.recipient_id.as_deref(),
            self.channel_id.as_deref(),
        )
    }
}

/// Source markup dialect of a message body
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Dialect {
    /// Already Slack mrkdwn; passed through unchanged
    Native,
    /// Plain text; passed through with markdown rendering disabled
    Plain,
    /// Standard markdown emphasis markers
    Markdown,
    /// A small HTML subset (block and inline tags)
    Html,
}

impl Dialect {
    /// Map a wire tag to a dialect. Unrecognized or absent tags fall back to
    /// `Native` so that formatting can never be the cause of a request
    /// failure.
    pub fn from_tag(tag: &str) -> Self {
        match tag {
            "plain" => Dialect::Plain,
            "markdown" => Dialect::Markdown,
            "html" => Dialect::Html,
            _ => Dialect::Native,
        }
    }

    /// Whether the outbound payload should ask the platform to render
    /// markdown. Disabled only for `Plain`.
    pub fn mrkdwn_enabled(&self) -> bool {
        !matches!(self, Dialect::Plain)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorCode;

    fn request(channel_type: &str) -> NotificationRequest {
        NotificationRequest {
            message: "hello".to_string(),
            channel_type: channel_type.to_string(),
            recipient_id: None,
            channel_id: None,
            format: None,
            thread_id: None,
            attachments: None,
            org_id: None,
        }
    }

    #[test]
    fn test_dm_destination() {
        let dest = Destination::resolve("dm", Some("U123"), None).unwrap();
        assert_eq!(
            dest,
            Destination::Direct {
                recipient_id: "U123".to_string()
            }
        );
        assert_eq!(dest.channel_type(), "dm");
    }

    #[test]
    fn test_channel_destination() {
        let dest = Destination::resolve("channel", None, Some("C456")).unwrap();
        assert_eq!(
            dest,
            Destination::Channel {
                channel_id: "C456".to_string()
            }
        );
        assert_eq!(dest.channel_type(), "channel");
    }

    #[test]
    fn test_dm_requires_recipient() {
        let err = Destination::resolve("dm", None, Some("C456")).unwrap_err();
        assert_eq!(err.code, ErrorCode::InvalidArgument);

        let err = Destination::resolve("dm", Some(""), None).unwrap_err();
        assert_eq!(err.code, ErrorCode::InvalidArgument);
    }

    #[test]
    fn test_unsupported_channel_type_rejected_at_boundary() {
        let err = Destination::resolve("broadcast", Some("U1"), Some("C1")).unwrap_err();
        assert_eq!(err.code, ErrorCode::InvalidArgument);
        assert!(err.message.contains("broadcast"));
    }

    #[test]
    fn test_empty_message_rejected() {
        let mut req = request("channel");
        req.channel_id = Some("C456".to_string());
        req.message = String::new();
        let err = req.destination().unwrap_err();
        assert_eq!(err.code, ErrorCode::InvalidArgument);
    }

    #[test]
    fn test_request_deserialization_defaults() {
        let req: NotificationRequest =
            serde_json::from_str(r#"{"message": "hi", "channel_type": "dm", "recipient_id": "U1"}"#)
                .unwrap();
        assert_eq!(req.format, None);
        assert_eq!(req.thread_id, None);
        assert!(req.attachments.is_none());
        assert!(req.destination().is_ok());
    }

    #[test]
    fn test_dialect_tags() {
        assert_eq!(Dialect::from_tag("native"), Dialect::Native);
        assert_eq!(Dialect::from_tag("plain"), Dialect::Plain);
        assert_eq!(Dialect::from_tag("markdown"), Dialect::Markdown);
        assert_eq!(Dialect::from_tag("html"), Dialect::Html);
        // Unknown dialects pass through as native rather than failing
        assert_eq!(Dialect::from_tag("not_a_real_dialect"), Dialect::Native);
    }

    #[test]
    fn test_mrkdwn_flag() {
        assert!(Dialect::Native.mrkdwn_enabled());
        assert!(Dialect::Markdown.mrkdwn_enabled());
        assert!(Dialect::Html.mrkdwn_enabled());
        assert!(!Dialect::Plain.mrkdwn_enabled());
    }
}
