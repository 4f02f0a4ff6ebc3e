//! Analysis service boundary
//!
//! Request/response types for the remote troubleshooting service and the
//! [`AnalysisClient`] capability trait the workflow depends on. The HTTP
//! implementation owns its deadline and classifies failures into the crate's
//! error kinds; no retries happen at this layer.

use crate::error::{Error, Result};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Default deadline for one analysis call (seconds).
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Analysis mode selected by the user; forwarded to the service unchanged.
///
/// Advanced mode unlocks display and export of the server-provided redacted
/// copy. The mode has no effect on scanning or gating.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AnalysisMode {
    Beginner,
    Advanced,
}

impl Default for AnalysisMode {
    fn default() -> Self {
        Self::Beginner
    }
}

impl std::fmt::Display for AnalysisMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Beginner => write!(f, "beginner"),
            Self::Advanced => write!(f, "advanced"),
        }
    }
}

/// Request body for the troubleshooting endpoint
#[derive(Debug, Clone, Serialize)]
pub struct AnalysisRequest {
    /// Raw log text to analyze
    pub text: String,
    /// Caller-supplied metadata, forwarded verbatim
    pub metadata: serde_json::Value,
    /// Selected analysis mode
    pub mode: AnalysisMode,
}

impl AnalysisRequest {
    /// Create a request with empty metadata
    pub fn new(text: impl Into<String>, mode: AnalysisMode) -> Self {
        Self {
            text: text.into(),
            metadata: serde_json::json!({}),
            mode,
        }
    }
}

/// Successful analysis response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisResponse {
    /// Answer text produced by the service
    pub answer: String,
    /// Copy of the text that was actually sent to the AI, with sensitive
    /// spans replaced by `[REDACTED_*]` markers. Present in advanced mode.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub redacted: Option<String>,
    /// Model identifier the service used
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub model_used: Option<String>,
}

/// Capability object for the analysis boundary: submit text, get a result or
/// a typed error. Injected into the workflow so tests can substitute a fake.
#[async_trait]
pub trait AnalysisClient: Send + Sync {
    /// Submit log text for troubleshooting
    async fn troubleshoot(&self, request: AnalysisRequest) -> Result<AnalysisResponse>;
}

/// HTTP client for the analysis service
pub struct HttpAnalysisClient {
    client: reqwest::Client,
    base_url: String,
}

impl HttpAnalysisClient {
    /// Create a client with the default 30-second deadline
    pub fn new(base_url: impl Into<String>) -> Result<Self> {
        Self::with_timeout(base_url, Duration::from_secs(DEFAULT_TIMEOUT_SECS))
    }

    /// Create a client with an explicit deadline
    pub fn with_timeout(base_url: impl Into<String>, timeout: Duration) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| Error::Config(format!("Failed to build HTTP client: {}", e)))?;
        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }

    /// Base URL this client talks to
    pub fn base_url(&self) -> &str {
        &self.base_url
    }
}

#[async_trait]
impl AnalysisClient for HttpAnalysisClient {
    async fn troubleshoot(&self, request: AnalysisRequest) -> Result<AnalysisResponse> {
        let url = format!("{}/ai_troubleshoot", self.base_url);
        tracing::debug!(url = %url, mode = %request.mode, "Submitting analysis request");

        let response = self
            .client
            .post(&url)
            .json(&request)
            .send()
            .await
            .map_err(classify_transport_error)?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(rejection_from_body(status, &body));
        }

        response
            .json::<AnalysisResponse>()
            .await
            .map_err(|e| Error::Unknown(format!("Malformed analysis response: {}", e)))
    }
}

/// Classify a send-level failure into the crate's error kinds
fn classify_transport_error(error: reqwest::Error) -> Error {
    if error.is_timeout() {
        Error::Timeout
    } else if error.is_connect() {
        Error::Transport(error.to_string())
    } else {
        Error::Unknown(error.to_string())
    }
}

/// Build a `RemoteRejected` from a non-success status and body.
///
/// The service reports failures as `{"detail": "..."}`; the detail message is
/// surfaced verbatim when present, the status line otherwise.
fn rejection_from_body(status: reqwest::StatusCode, body: &str) -> Error {
    let detail = serde_json::from_str::<serde_json::Value>(body)
        .ok()
        .and_then(|v| {
            v.get("detail")
                .and_then(|d| d.as_str())
                .map(|s| s.to_string())
        });
    Error::RemoteRejected(detail.unwrap_or_else(|| format!("HTTP {}", status)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mode_serialization() {
        assert_eq!(
            serde_json::to_string(&AnalysisMode::Beginner).unwrap(),
            "\"beginner\""
        );
        assert_eq!(
            serde_json::to_string(&AnalysisMode::Advanced).unwrap(),
            "\"advanced\""
        );
    }

    #[test]
    fn test_request_shape() {
        let request = AnalysisRequest::new("disk full", AnalysisMode::Advanced);
        let value = serde_json::to_value(&request).unwrap();
        assert_eq!(value["text"], "disk full");
        assert_eq!(value["mode"], "advanced");
        assert!(value["metadata"].as_object().unwrap().is_empty());
    }

    #[test]
    fn test_response_with_redaction() {
        let body = r#"{"answer":"restart it","redacted":"log [REDACTED_IP]","model_used":"gemini-1.5-flash"}"#;
        let response: AnalysisResponse = serde_json::from_str(body).unwrap();
        assert_eq!(response.answer, "restart it");
        assert_eq!(response.redacted.as_deref(), Some("log [REDACTED_IP]"));
        assert_eq!(response.model_used.as_deref(), Some("gemini-1.5-flash"));
    }

    #[test]
    fn test_minimal_response_parses() {
        let response: AnalysisResponse = serde_json::from_str(r#"{"answer":"ok"}"#).unwrap();
        assert_eq!(response.answer, "ok");
        assert!(response.redacted.is_none());
        assert!(response.model_used.is_none());
    }

    #[test]
    fn test_rejection_surfaces_detail_verbatim() {
        let error = rejection_from_body(
            reqwest::StatusCode::UNPROCESSABLE_ENTITY,
            r#"{"detail":"text field is required"}"#,
        );
        match error {
            Error::RemoteRejected(detail) => assert_eq!(detail, "text field is required"),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_rejection_without_detail_uses_status() {
        let error = rejection_from_body(reqwest::StatusCode::BAD_GATEWAY, "upstream died");
        match error {
            Error::RemoteRejected(detail) => assert!(detail.contains("502")),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_base_url_normalized() {
        let client = HttpAnalysisClient::new("http://localhost:8000/").unwrap();
        assert_eq!(client.base_url(), "http://localhost:8000");
    }
}
