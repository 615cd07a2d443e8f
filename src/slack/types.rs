use serde::Serialize;

/// Request body for `chat.postMessage`.
///
/// `thread_ts` and `attachments` are skipped entirely when absent; Slack
/// treats an explicit null/empty value differently from an omitted field.
#[derive(Debug, Clone, Serialize)]
pub struct PostMessageRequest {
    pub channel: String,
    pub text: String,
    pub mrkdwn: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub thread_ts: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub attachments: Option<Vec<serde_json::Value>>,
}

impl PostMessageRequest {
    pub fn new(channel: impl Into<String>, text: impl Into<String>) -> Self {
        PostMessageRequest {
            channel: channel.into(),
            text: text.into(),
            mrkdwn: true,
            thread_ts: None,
            attachments: None,
        }
    }

    /// Disable markdown rendering for this message (builder pattern)
    pub fn without_mrkdwn(mut self) -> Self {
        self.mrkdwn = false;
        self
    }

    /// Post as a threaded reply under the given message (builder pattern)
    pub fn with_thread_ts(mut self, thread_ts: impl Into<String>) -> Self {
        self.thread_ts = Some(thread_ts.into());
        self
    }

    /// Attach opaque structured records; an empty list is dropped so the
    /// field is omitted from the payload (builder pattern)
    pub fn with_attachments(mut self, attachments: Vec<serde_json::Value>) -> Self {
        if !attachments.is_empty() {
            self.attachments = Some(attachments);
        }
        self
    }
}

/// Request body for `conversations.open`
#[derive(Debug, Clone, Serialize)]
pub struct OpenConversationRequest {
    pub users: String,
}

/// The acknowledged message, extracted from a `chat.postMessage` success
/// payload
#[derive(Debug, Clone)]
pub struct PostedMessage {
    /// Slack message timestamp; doubles as the thread anchor ID
    pub ts: String,
    /// Channel the message actually landed in
    pub channel: String,
}
