//! Parsers for the login page and the usage API response.

use std::sync::LazyLock;

use regex::Regex;
use serde::Deserialize;
use tracing::debug;
use xfusage_core::UsageSnapshot;

use crate::error::FetchError;

/// Hidden login form input carrying the one-time request token.
static REQ_ID_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"<input type="hidden" name="reqId" value="(.*?)">"#)
        .expect("Invalid regex")
});

// ============================================================================
// Login Page
// ============================================================================

/// Extracts the `reqId` token from the login page HTML.
///
/// # Errors
///
/// Returns `FetchError::MissingRequestToken` if the hidden input is absent.
pub fn extract_req_id(html: &str) -> Result<String, FetchError> {
    REQ_ID_RE
        .captures(html)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().to_string())
        .ok_or(FetchError::MissingRequestToken)
}

// ============================================================================
// Usage API Response
// ============================================================================

/// Response from the internet usage API.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UsageResponse {
    /// Billing months, oldest first.
    pub usage_months: Vec<UsageMonth>,
}

/// One billing month of the usage API.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UsageMonth {
    /// Unit of measure (e.g. "GB").
    pub unit_of_measure: String,
    /// Data used this month.
    pub home_usage: f64,
    /// Monthly allowance.
    pub allowable_usage: f64,
    /// First day of the month.
    #[serde(default)]
    pub start_date: Option<String>,
    /// Last day of the month.
    #[serde(default)]
    pub end_date: Option<String>,
}

impl UsageMonth {
    /// Convert to UsageSnapshot.
    pub fn to_snapshot(&self) -> UsageSnapshot {
        UsageSnapshot::new(self.home_usage, self.allowable_usage, &self.unit_of_measure)
            .with_period(self.start_date.clone(), self.end_date.clone())
    }
}

/// Parses the usage API body into a snapshot of the current (last) month.
///
/// # Errors
///
/// Returns `FetchError::InvalidResponse` for malformed JSON, missing fields
/// or an empty `usageMonths` array.
pub fn parse_usage_response(json_str: &str) -> Result<UsageSnapshot, FetchError> {
    debug!(len = json_str.len(), "Parsing usage response");

    let response: UsageResponse = serde_json::from_str(json_str)
        .map_err(|e| FetchError::InvalidResponse(format!("Invalid JSON: {e}")))?;

    let current = response
        .usage_months
        .last()
        .ok_or_else(|| FetchError::InvalidResponse("usageMonths is empty".to_string()))?;

    let snapshot = current.to_snapshot();
    snapshot.validate()?;
    Ok(snapshot)
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_req_id() {
        let html = r#"<form method="post">
            <input type="hidden" name="reqId" value="a1b2c3">
            <input type="text" name="user">
        </form>"#;
        assert_eq!(extract_req_id(html).unwrap(), "a1b2c3");
    }

    #[test]
    fn test_extract_req_id_first_match() {
        let html = r#"<input type="hidden" name="reqId" value="one"><input type="hidden" name="reqId" value="two">"#;
        assert_eq!(extract_req_id(html).unwrap(), "one");
    }

    #[test]
    fn test_extract_req_id_missing() {
        let html = r#"<input type="hidden" name="other" value="x">"#;
        assert!(matches!(
            extract_req_id(html),
            Err(FetchError::MissingRequestToken)
        ));
        // Self-closing variant does not match the literal fragment.
        let html = r#"<input type="hidden" name="reqId" value="x" />"#;
        assert!(extract_req_id(html).is_err());
    }

    #[test]
    fn test_parse_takes_last_month() {
        let json = r#"{
            "usageMonths": [
                {"unitOfMeasure": "GB", "homeUsage": 900, "allowableUsage": 1024, "startDate": "08/01/2026", "endDate": "08/31/2026"},
                {"unitOfMeasure": "GB", "homeUsage": 250, "allowableUsage": 1024, "startDate": "09/01/2026", "endDate": "09/30/2026"}
            ]
        }"#;
        let snapshot = parse_usage_response(json).unwrap();
        assert_eq!(snapshot.total_usage, 250.0);
        assert_eq!(snapshot.allowed_usage, 1024.0);
        assert_eq!(snapshot.remaining_usage, 774.0);
        assert_eq!(snapshot.unit, "GB");
        assert_eq!(snapshot.start_date.as_deref(), Some("09/01/2026"));
        assert_eq!(snapshot.end_date.as_deref(), Some("09/30/2026"));
    }

    #[test]
    fn test_parse_fractional_usage() {
        let json = r#"{"usageMonths": [{"unitOfMeasure": "GB", "homeUsage": 12.5, "allowableUsage": 1229}]}"#;
        let snapshot = parse_usage_response(json).unwrap();
        assert_eq!(snapshot.remaining_usage, 1216.5);
        assert!(snapshot.start_date.is_none());
    }

    #[test]
    fn test_parse_blank_unit() {
        let json = r#"{"usageMonths": [{"unitOfMeasure": "", "homeUsage": 250, "allowableUsage": 1024}]}"#;
        let snapshot = parse_usage_response(json).unwrap();
        assert_eq!(snapshot.unit, "");
        assert_eq!(snapshot.remaining_usage, 774.0);
    }

    #[test]
    fn test_parse_ignores_unknown_fields() {
        let json = r#"{
            "courtesyUsed": 0,
            "usageMonths": [{"unitOfMeasure": "GB", "homeUsage": 1, "allowableUsage": 2, "devices": [], "policy": "limited"}]
        }"#;
        assert!(parse_usage_response(json).is_ok());
    }

    #[test]
    fn test_parse_empty_months() {
        let err = parse_usage_response(r#"{"usageMonths": []}"#).unwrap_err();
        assert!(err.to_string().contains("usageMonths is empty"));
    }

    #[test]
    fn test_parse_missing_fields() {
        assert!(parse_usage_response(r#"{}"#).is_err());
        assert!(parse_usage_response(r#"{"usageMonths": [{"unitOfMeasure": "GB"}]}"#).is_err());
        assert!(parse_usage_response("<html>login</html>").is_err());
    }
}
