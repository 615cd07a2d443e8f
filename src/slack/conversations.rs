use serde_json::Value;

use crate::error::{Error, ErrorCode, Result};

use super::client::SlackClient;
use super::response::read_response;
use super::types::OpenConversationRequest;

impl SlackClient {
    /// Open (or reuse) a direct message conversation with a user.
    ///
    /// # Arguments
    /// * `user_id` - The user to open a conversation with
    ///
    /// # Returns
    /// A Result containing the conversation ID or a classified Error
    pub async fn open_conversation(&self, user_id: &str) -> Result<String> {
        let request = OpenConversationRequest {
            users: user_id.to_string(),
        };

        let response = self.post("conversations.open", &request).await?;
        let body = read_response(response).await?;

        body.pointer("/channel/id")
            .and_then(Value::as_str)
            .map(str::to_string)
            .ok_or_else(|| {
                Error::new(
                    ErrorCode::Unknown,
                    "Slack response missing channel.id field",
                )
            })
    }

    /// Look up a channel by ID via `conversations.info`.
    ///
    /// Read-only existence check; the payload itself is not interpreted
    /// beyond normalization.
    pub async fn get_channel(&self, channel_id: &str) -> Result<Value> {
        let response = self
            .get("conversations.info", &[("channel", channel_id)])
            .await?;
        read_response(response).await
    }
}
