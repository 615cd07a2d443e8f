//! Error handling for slack-notify
//!
//! This module provides the classified failure taxonomy used throughout the
//! crate. Upstream Slack failures are normalized into a closed set of error
//! codes carrying an optional retry hint, propagated as return values rather
//! than raised control flow.

use std::fmt;

/// Result type used throughout the library
pub type Result<T> = std::result::Result<T, Error>;

/// Classified error codes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCode {
    /// Invalid or missing input (message body, destination, channel type)
    InvalidArgument,
    /// Bot token is absent or empty; no network call was attempted
    MissingCredential,
    /// Upstream rate limit; check `retry_after()` for the advisory delay
    RateLimited,
    /// Token rejected (revoked or invalid)
    Unauthorized,
    /// Token valid but the operation is not permitted
    Forbidden,
    /// Target user or channel does not exist
    NotFound,
    /// The bot is not a member of the target channel
    BotNotMember,
    /// Transport-level failure (connect, timeout, body read)
    Network,
    /// Anything the normalizer could not classify
    Unknown,
}

impl ErrorCode {
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorCode::InvalidArgument => "Invalid argument",
            ErrorCode::MissingCredential => "Missing credential",
            ErrorCode::RateLimited => "Rate limit exceeded",
            ErrorCode::Unauthorized => "Authentication failed",
            ErrorCode::Forbidden => "Permission denied",
            ErrorCode::NotFound => "Not found",
            ErrorCode::BotNotMember => "Bot not in channel",
            ErrorCode::Network => "Network error",
            ErrorCode::Unknown => "Unknown error",
        }
    }

    /// True for codes produced by the response normalizer, i.e. failures the
    /// upstream platform signalled rather than local input problems.
    pub fn is_upstream(&self) -> bool {
        matches!(
            self,
            ErrorCode::RateLimited
                | ErrorCode::Unauthorized
                | ErrorCode::Forbidden
                | ErrorCode::NotFound
                | ErrorCode::BotNotMember
                | ErrorCode::Unknown
        )
    }
}

/// Internal error type
#[derive(Debug, Clone)]
pub struct Error {
    pub code: ErrorCode,
    pub message: String,
    /// Advisory retry delay in seconds, populated only for `RateLimited`
    pub(crate) retry_after: Option<u64>,
    /// HTTP status code if this error came from an HTTP response
    pub(crate) http_status: Option<u16>,
}

impl Error {
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Error {
            code,
            message: message.into(),
            retry_after: None,
            http_status: None,
        }
    }

    pub fn invalid_argument(msg: impl Into<String>) -> Self {
        Error::new(ErrorCode::InvalidArgument, msg)
    }

    pub fn missing_credential(name: &str) -> Self {
        Error::new(ErrorCode::MissingCredential, format!("Missing {name}"))
    }

    pub fn rate_limited(msg: impl Into<String>, retry_after: u64) -> Self {
        Error::new(ErrorCode::RateLimited, msg).with_retry_after(retry_after)
    }

    /// Add the advisory retry delay (builder pattern)
    pub fn with_retry_after(mut self, seconds: u64) -> Self {
        self.retry_after = Some(seconds);
        self
    }

    /// Add HTTP status code (builder pattern)
    pub fn with_http_status(mut self, status: u16) -> Self {
        self.http_status = Some(status);
        self
    }

    /// Get the advisory retry delay if available
    pub fn retry_after(&self) -> Option<u64> {
        self.retry_after
    }

    /// Get the HTTP status code if available
    pub fn http_status(&self) -> Option<u16> {
        self.http_status
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.code.as_str(), self.message)
    }
}

impl std::error::Error for Error {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_creation() {
        let err = Error::new(ErrorCode::Network, "Connection failed");
        assert_eq!(err.code, ErrorCode::Network);
        assert_eq!(err.message, "Connection failed");
        assert_eq!(err.retry_after(), None);
        assert_eq!(err.http_status(), None);
    }

    #[test]
    fn test_rate_limited_carries_retry_hint() {
        let err = Error::rate_limited("Rate limited by Slack", 30).with_http_status(429);
        assert_eq!(err.code, ErrorCode::RateLimited);
        assert_eq!(err.retry_after(), Some(30));
        assert_eq!(err.http_status(), Some(429));
    }

    #[test]
    fn test_missing_credential_message() {
        let err = Error::missing_credential("SLACK_BOT_TOKEN");
        assert_eq!(err.code, ErrorCode::MissingCredential);
        assert_eq!(err.message, "Missing SLACK_BOT_TOKEN");
    }

    #[test]
    fn test_upstream_classification() {
        assert!(ErrorCode::RateLimited.is_upstream());
        assert!(ErrorCode::BotNotMember.is_upstream());
        assert!(ErrorCode::Unknown.is_upstream());
        assert!(!ErrorCode::InvalidArgument.is_upstream());
        assert!(!ErrorCode::MissingCredential.is_upstream());
        assert!(!ErrorCode::Network.is_upstream());
    }

    #[test]
    fn test_display_format() {
        let err = Error::invalid_argument("message is required");
        assert_eq!(err.to_string(), "Invalid argument: message is required");
    }
}
