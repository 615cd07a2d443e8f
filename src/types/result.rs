//! Outcome types for delivery and validation

use chrono::{DateTime, Utc};
use serde::Serialize;

/// Result of a successful send
#[derive(Debug, Clone, Serialize)]
pub struct DeliveryResult {
    /// Platform-assigned message identifier; usable as a thread anchor for
    /// later replies
    pub message_id: String,
    /// When the delivery was acknowledged
    pub delivered_at: DateTime<Utc>,
}

impl DeliveryResult {
    pub fn new(message_id: impl Into<String>) -> Self {
        DeliveryResult {
            message_id: message_id.into(),
            delivered_at: Utc::now(),
        }
    }
}

/// Result of a pre-flight destination check.
///
/// Validation is advisory: upstream failures are folded into `valid: false`
/// rather than propagated.
#[derive(Debug, Clone, Serialize)]
pub struct ValidationResult {
    pub valid: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub detail: Option<String>,
}

impl ValidationResult {
    pub fn ok() -> Self {
        ValidationResult {
            valid: true,
            detail: None,
        }
    }

    pub fn invalid(detail: impl Into<String>) -> Self {
        ValidationResult {
            valid: false,
            detail: Some(detail.into()),
        }
    }
}

/// Static service identity payload for liveness probes
#[derive(Debug, Clone, Serialize)]
pub struct HealthInfo {
    pub service: &'static str,
    pub version: &'static str,
    pub timestamp: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_delivery_result() {
        let result = DeliveryResult::new("123.456");
        assert_eq!(result.message_id, "123.456");
    }

    #[test]
    fn test_validation_result_serialization() {
        let ok = serde_json::to_value(ValidationResult::ok()).unwrap();
        assert_eq!(ok["valid"], true);
        assert!(ok.get("detail").is_none());

        let bad = serde_json::to_value(ValidationResult::invalid("no such channel")).unwrap();
        assert_eq!(bad["valid"], false);
        assert_eq!(bad["detail"], "no such channel");
    }
}
