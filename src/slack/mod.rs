//! Slack Web API adapter
//!
//! This module implements the outbound communication layer: a thin HTTP
//! client, the dialect-to-mrkdwn formatter, and the two-stage response
//! normalizer that maps Slack's status/error-code combinations onto the
//! crate's classified error set.

mod chat;
mod client;
mod conversations;
pub mod format;
pub mod response;
mod types;
mod users;

pub use client::{SlackClient, DEFAULT_BASE_URL};
pub use format::format_message;
pub use response::normalize;
pub use types::{OpenConversationRequest, PostMessageRequest, PostedMessage};
