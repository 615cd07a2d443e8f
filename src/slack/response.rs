//! Response normalization for the Slack Web API
//!
//! Slack signals failures at two layers: transport (HTTP status, including
//! 429 rate limits with a `Retry-After` header) and application (a 200
//! response whose JSON body carries `"ok": false` plus an error code
//! string). Both layers must be checked, in that order, or an
//! application-level failure would be silently treated as success.

use reqwest::header::{HeaderMap, RETRY_AFTER};
use reqwest::StatusCode;
use serde_json::Value;

use crate::error::{Error, ErrorCode, Result};

/// Fallback retry delay when Slack rate-limits without a usable hint
const DEFAULT_RETRY_AFTER_SECS: u64 = 60;

/// Classify an upstream response into the success payload or an error.
///
/// Stage 1 checks the HTTP status and short-circuits on any non-2xx without
/// inspecting the body (a non-2xx response may carry no usable JSON). Stage
/// 2 checks the body's `ok` field and maps Slack error code strings onto the
/// closed [`ErrorCode`] set. A truthy `ok` yields the full JSON body.
pub fn normalize(status: StatusCode, headers: &HeaderMap, body: Value) -> Result<Value> {
    if !status.is_success() {
        return Err(transport_failure(status, headers));
    }

    if body.get("ok").and_then(Value::as_bool).unwrap_or(false) {
        return Ok(body);
    }

    Err(application_failure(&body))
}

fn transport_failure(status: StatusCode, headers: &HeaderMap) -> Error {
    match status {
        StatusCode::TOO_MANY_REQUESTS => {
            let retry_after = headers
                .get(RETRY_AFTER)
                .and_then(|v| v.to_str().ok())
                .and_then(|v| v.trim().parse::<u64>().ok())
                .unwrap_or(DEFAULT_RETRY_AFTER_SECS);
            Error::rate_limited("Rate limited by Slack", retry_after)
                .with_http_status(status.as_u16())
        }
        StatusCode::UNAUTHORIZED => {
            Error::new(ErrorCode::Unauthorized, "Slack rejected the bot token")
                .with_http_status(status.as_u16())
        }
        StatusCode::FORBIDDEN => {
            Error::new(ErrorCode::Forbidden, "Slack denied access for this token")
                .with_http_status(status.as_u16())
        }
        other => {
            let reason = other.canonical_reason().unwrap_or("unknown status");
            Error::new(
                ErrorCode::Unknown,
                format!("Slack API returned {}: {reason}", other.as_u16()),
            )
            .with_http_status(other.as_u16())
        }
    }
}

fn application_failure(body: &Value) -> Error {
    let code = body
        .get("error")
        .and_then(Value::as_str)
        .unwrap_or("unknown_error");

    match code {
        "ratelimited" => {
            let retry_after = body
                .get("retry_after")
                .and_then(Value::as_u64)
                .unwrap_or(DEFAULT_RETRY_AFTER_SECS);
            Error::rate_limited("Rate limited by Slack", retry_after)
        }
        "token_revoked" | "invalid_auth" => {
            Error::new(ErrorCode::Unauthorized, format!("Slack auth error: {code}"))
        }
        "channel_not_found" | "user_not_found" => {
            Error::new(ErrorCode::NotFound, format!("Slack target not found: {code}"))
        }
        "not_in_channel" => Error::new(
            ErrorCode::BotNotMember,
            "The bot is not a member of the target channel",
        ),
        other => Error::new(ErrorCode::Unknown, format!("Slack API error: {other}")),
    }
}

/// Split a live HTTP response into status, headers, and parsed JSON, then
/// normalize it.
///
/// # Errors
/// `Network` when the body cannot be read; `Unknown` when a 2xx body is not
/// valid JSON; otherwise whatever [`normalize`] classifies.
pub async fn read_response(response: reqwest::Response) -> Result<Value> {
    let status = response.status();
    let headers = response.headers().clone();

    if !status.is_success() {
        // Stage 1 never needs the body
        return Err(transport_failure(status, &headers));
    }

    // The decode error can carry URLs and transport internals; keep it in
    // the logs and hand the caller a fixed message.
    let body: Value = response.json().await.map_err(|e| {
        tracing::error!(error = %e, "failed to decode Slack response body");
        Error::new(ErrorCode::Unknown, "Failed to parse Slack response")
    })?;

    normalize(status, &headers, body)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn headers_with_retry(value: &str) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(RETRY_AFTER, value.parse().unwrap());
        headers
    }

    #[test]
    fn test_429_uses_retry_after_header() {
        let err = normalize(
            StatusCode::TOO_MANY_REQUESTS,
            &headers_with_retry("30"),
            json!({}),
        )
        .unwrap_err();
        assert_eq!(err.code, ErrorCode::RateLimited);
        assert_eq!(err.retry_after(), Some(30));
        assert_eq!(err.http_status(), Some(429));
    }

    #[test]
    fn test_429_defaults_without_header() {
        let err = normalize(StatusCode::TOO_MANY_REQUESTS, &HeaderMap::new(), json!({}))
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::RateLimited);
        assert_eq!(err.retry_after(), Some(60));
    }

    #[test]
    fn test_429_defaults_on_unparseable_header() {
        let err = normalize(
            StatusCode::TOO_MANY_REQUESTS,
            &headers_with_retry("soon"),
            json!({}),
        )
        .unwrap_err();
        assert_eq!(err.retry_after(), Some(60));
    }

    #[test]
    fn test_transport_auth_statuses() {
        let err =
            normalize(StatusCode::UNAUTHORIZED, &HeaderMap::new(), json!({})).unwrap_err();
        assert_eq!(err.code, ErrorCode::Unauthorized);

        let err = normalize(StatusCode::FORBIDDEN, &HeaderMap::new(), json!({})).unwrap_err();
        assert_eq!(err.code, ErrorCode::Forbidden);
    }

    #[test]
    fn test_other_non_2xx_is_unknown_with_status() {
        let err = normalize(
            StatusCode::SERVICE_UNAVAILABLE,
            &HeaderMap::new(),
            json!({}),
        )
        .unwrap_err();
        assert_eq!(err.code, ErrorCode::Unknown);
        assert!(err.message.contains("503"));
        assert!(err.message.contains("Service Unavailable"));
    }

    #[test]
    fn test_transport_failure_ignores_body() {
        // Even a body claiming success must not mask a non-2xx status
        let err = normalize(
            StatusCode::BAD_GATEWAY,
            &HeaderMap::new(),
            json!({"ok": true}),
        )
        .unwrap_err();
        assert_eq!(err.code, ErrorCode::Unknown);
    }

    #[test]
    fn test_application_rate_limit() {
        let err = normalize(
            StatusCode::OK,
            &HeaderMap::new(),
            json!({"ok": false, "error": "ratelimited", "retry_after": 12}),
        )
        .unwrap_err();
        assert_eq!(err.code, ErrorCode::RateLimited);
        assert_eq!(err.retry_after(), Some(12));

        let err = normalize(
            StatusCode::OK,
            &HeaderMap::new(),
            json!({"ok": false, "error": "ratelimited"}),
        )
        .unwrap_err();
        assert_eq!(err.retry_after(), Some(60));
    }

    #[test]
    fn test_application_auth_codes() {
        for code in ["token_revoked", "invalid_auth"] {
            let err = normalize(
                StatusCode::OK,
                &HeaderMap::new(),
                json!({"ok": false, "error": code}),
            )
            .unwrap_err();
            assert_eq!(err.code, ErrorCode::Unauthorized);
            assert!(err.message.contains(code));
        }
    }

    #[test]
    fn test_application_not_found_codes() {
        for code in ["channel_not_found", "user_not_found"] {
            let err = normalize(
                StatusCode::OK,
                &HeaderMap::new(),
                json!({"ok": false, "error": code}),
            )
            .unwrap_err();
            assert_eq!(err.code, ErrorCode::NotFound);
        }
    }

    #[test]
    fn test_application_not_in_channel() {
        let err = normalize(
            StatusCode::OK,
            &HeaderMap::new(),
            json!({"ok": false, "error": "not_in_channel"}),
        )
        .unwrap_err();
        assert_eq!(err.code, ErrorCode::BotNotMember);
    }

    #[test]
    fn test_application_unknown_code_embedded() {
        let err = normalize(
            StatusCode::OK,
            &HeaderMap::new(),
            json!({"ok": false, "error": "msg_too_long"}),
        )
        .unwrap_err();
        assert_eq!(err.code, ErrorCode::Unknown);
        assert!(err.message.contains("msg_too_long"));
    }

    #[test]
    fn test_application_missing_code_defaults() {
        let err = normalize(StatusCode::OK, &HeaderMap::new(), json!({"ok": false}))
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::Unknown);
        assert!(err.message.contains("unknown_error"));
    }

    #[test]
    fn test_success_payload_returned_whole() {
        let body = normalize(
            StatusCode::OK,
            &HeaderMap::new(),
            json!({"ok": true, "ts": "123.456", "channel": "C1"}),
        )
        .unwrap();
        assert_eq!(body["ts"], "123.456");
        assert_eq!(body["channel"], "C1");
    }

    #[test]
    fn test_ok_must_be_boolean_true() {
        // A missing or non-boolean ok field is a failure, not a success
        let err = normalize(StatusCode::OK, &HeaderMap::new(), json!({"ts": "1.2"}))
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::Unknown);
    }
}
