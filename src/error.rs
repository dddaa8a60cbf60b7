use reqwest::StatusCode;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use url::ParseError;

use crate::config::ConfigLoadError;

#[derive(Debug, Error)]
pub enum UxaError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] ParseError),

    #[error("Figma API error (status: {status:?}): {message}")]
    FigmaApi {
        status: Option<StatusCode>,
        message: String,
    },

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Storage error: {0}")]
    Store(#[from] rusqlite::Error),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Unexpected error: {0}")]
    Unknown(String),
}

impl UxaError {
    pub fn figma_api(status: Option<StatusCode>, message: impl Into<String>) -> Self {
        UxaError::FigmaApi {
            status,
            message: message.into(),
        }
    }

    pub fn validation(message: impl Into<String>) -> Self {
        UxaError::Validation(message.into())
    }

    pub fn to_payload(&self) -> ErrorPayload {
        match self {
            UxaError::Io(e) => ErrorPayload::new(
                ErrorCategory::Config,
                e.to_string(),
                "Check file paths/permissions.",
            ),
            UxaError::Network(e) => ErrorPayload::new(
                ErrorCategory::Network,
                e.to_string(),
                "Check connectivity/proxy/VPN and retry.",
            ),
            UxaError::InvalidUrl(e) => ErrorPayload::new(
                ErrorCategory::Config,
                e.to_string(),
                "Verify URL/format (e.g., https://www.figma.com/file/<FILE_KEY>/...).",
            ),
            UxaError::FigmaApi { status, message } => ErrorPayload::new(
                ErrorCategory::Figma,
                format!("Figma API error (status {:?}): {}", status, message),
                "Check FIGMA_TOKEN/URL and rate limits; retry after waiting.",
            ),
            UxaError::Serialization(e) => ErrorPayload::new(
                ErrorCategory::Input,
                e.to_string(),
                "Check that the design payload is valid Figma JSON.",
            ),
            UxaError::Store(e) => ErrorPayload::new(
                ErrorCategory::Store,
                e.to_string(),
                "Check the --db path is writable and not locked by another process.",
            ),
            UxaError::Validation(msg) => ErrorPayload::new(
                ErrorCategory::Input,
                msg.to_string(),
                "Provide a JSON object with a `document` root (or a `project` wrapper).",
            ),
            UxaError::NotFound(msg) => ErrorPayload::new(
                ErrorCategory::NotFound,
                msg.to_string(),
                "Run `uxa analyze` for this project first.",
            ),
            UxaError::Config(msg) => {
                let lower = msg.to_ascii_lowercase();
                if lower.contains("figma_token") || lower.contains("figma token") {
                    ErrorPayload::new(
                        ErrorCategory::Config,
                        msg.to_string(),
                        "Set FIGMA_TOKEN (or FIGMA_OAUTH_TOKEN) before analyzing Figma URLs.",
                    )
                } else if lower.contains("file key") && lower.contains("figma") {
                    ErrorPayload::new(
                        ErrorCategory::Config,
                        msg.to_string(),
                        "Use a Figma URL with a file key: https://www.figma.com/file/<FILE_KEY>/...",
                    )
                } else if lower.contains("threshold") {
                    ErrorPayload::new(
                        ErrorCategory::Config,
                        msg.to_string(),
                        "Fix the [thresholds] table in the config file; values must be positive and ranges ordered.",
                    )
                } else {
                    ErrorPayload::new(
                        ErrorCategory::Config,
                        msg.to_string(),
                        "Check flags/paths (e.g., --input, --db) and the config file.",
                    )
                }
            }
            UxaError::Unknown(msg) => ErrorPayload::new(
                ErrorCategory::Unknown,
                msg.to_string(),
                "Re-run with --verbose; file an issue if persistent.",
            ),
        }
    }
}

impl From<ConfigLoadError> for UxaError {
    fn from(err: ConfigLoadError) -> Self {
        UxaError::Config(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, UxaError>;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum ErrorCategory {
    Config,
    Network,
    Figma,
    Input,
    Store,
    NotFound,
    Unknown,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ErrorPayload {
    pub category: ErrorCategory,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub remediation: Option<String>,
}

impl ErrorPayload {
    pub fn new(category: ErrorCategory, message: String, remediation: impl Into<String>) -> Self {
        Self {
            category,
            message,
            remediation: Some(remediation.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_payload_includes_figma_token_remediation() {
        let err = UxaError::Config("FIGMA_TOKEN environment variable is required".to_string());
        let payload = err.to_payload();
        assert_eq!(payload.category, ErrorCategory::Config);
        let remediation = payload.remediation.unwrap_or_default();
        assert!(
            remediation.contains("FIGMA_TOKEN"),
            "expected FIGMA token remediation, got: {remediation}"
        );
    }

    #[test]
    fn config_payload_uses_default_remediation_for_other_messages() {
        let err = UxaError::Config("Some other config issue".to_string());
        let remediation = err.to_payload().remediation.unwrap_or_default();
        assert!(
            remediation.contains("Check flags/paths"),
            "expected default remediation for generic config errors"
        );
    }

    #[test]
    fn config_payload_includes_file_key_hint() {
        let err = UxaError::Config("Figma URL missing file key".to_string());
        let remediation = err.to_payload().remediation.unwrap_or_default();
        assert!(
            remediation.to_ascii_lowercase().contains("file key"),
            "expected file key remediation, got: {remediation}"
        );
    }

    #[test]
    fn config_payload_includes_threshold_hint() {
        let err = UxaError::Config(
            "Invalid config: threshold contrast.large_min must not exceed normal_min".to_string(),
        );
        let remediation = err.to_payload().remediation.unwrap_or_default();
        assert!(
            remediation.contains("[thresholds]"),
            "expected thresholds remediation, got: {remediation}"
        );
    }

    #[test]
    fn validation_errors_are_input_category() {
        let err = UxaError::validation("Invalid figma_data payload");
        let payload = err.to_payload();
        assert_eq!(payload.category, ErrorCategory::Input);
        assert_eq!(payload.message, "Invalid figma_data payload");
    }

    #[test]
    fn not_found_category_serializes_snake_case() {
        let payload = UxaError::NotFound("No analysis found for project 7".into()).to_payload();
        let json = serde_json::to_string(&payload).expect("serialize payload");
        assert!(json.contains("\"category\":\"not_found\""), "got: {json}");
        assert!(json.contains("uxa analyze"));
    }
}
