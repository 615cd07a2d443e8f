use serde_json::Value;

use crate::error::{Error, ErrorCode, Result};

use super::client::SlackClient;
use super::response::read_response;
use super::types::{PostMessageRequest, PostedMessage};

impl SlackClient {
    /// Post a message to a conversation via `chat.postMessage`.
    ///
    /// # Arguments
    /// * `request` - The fully built payload; text must already be formatted
    ///
    /// # Returns
    /// A Result containing the acknowledged message or a classified Error
    pub async fn post_message(&self, request: &PostMessageRequest) -> Result<PostedMessage> {
        tracing::debug!(channel = %request.channel, "posting message");

        let response = self.post("chat.postMessage", request).await?;
        let body = read_response(response).await?;

        let ts = required_str(&body, "ts")?;
        let channel = body
            .get("channel")
            .and_then(Value::as_str)
            .unwrap_or(&request.channel)
            .to_string();

        Ok(PostedMessage { ts, channel })
    }
}

/// Pull a required string field out of a success payload
fn required_str(body: &Value, field: &str) -> Result<String> {
    body.get(field)
        .and_then(Value::as_str)
        .map(str::to_string)
        .ok_or_else(|| {
            Error::new(
                ErrorCode::Unknown,
                format!("Slack response missing {field} field"),
            )
        })
}
