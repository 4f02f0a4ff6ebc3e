//! Backend health polling
//!
//! Read-only status support for the analysis service: polls `GET /health` on
//! an interval and publishes the mapped status through a watch channel. Poll
//! failures map to `Offline`; nothing here ever touches the submission
//! workflow.

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tokio::sync::watch;

/// Deadline for one health probe (seconds). Kept short so a dead backend
/// shows up as offline within one poll cycle.
const PROBE_TIMEOUT_SECS: u64 = 5;

/// Raw health endpoint payload
#[derive(Debug, Clone, Deserialize)]
pub struct HealthReport {
    /// Service-reported status string
    pub status: String,
    /// Whether a Gemini model is configured
    #[serde(default)]
    pub gemini_configured: bool,
    /// Whether an OpenAI model is configured
    #[serde(default)]
    pub openai_configured: bool,
    /// Service version, when reported
    #[serde(default)]
    pub version: Option<String>,
}

/// Displayed backend status
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BackendStatus {
    /// Backend reachable and reporting a healthy status
    Operational,
    /// Backend reachable but reporting something else
    Degraded(String),
    /// Backend unreachable or responding with garbage
    Offline,
}

impl std::fmt::Display for BackendStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Operational => write!(f, "operational"),
            Self::Degraded(status) => write!(f, "degraded ({})", status),
            Self::Offline => write!(f, "offline"),
        }
    }
}

/// Map one poll outcome to a displayed status
pub fn status_from_poll(result: Result<HealthReport>) -> BackendStatus {
    match result {
        Ok(report) if report.status == "operational" || report.status == "healthy" => {
            BackendStatus::Operational
        }
        Ok(report) => BackendStatus::Degraded(report.status),
        Err(_) => BackendStatus::Offline,
    }
}

/// Periodic health poller for the analysis backend
pub struct HealthMonitor {
    client: reqwest::Client,
    base_url: String,
    interval: Duration,
}

impl HealthMonitor {
    /// Create a monitor polling the given base URL
    pub fn new(base_url: impl Into<String>, interval: Duration) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(PROBE_TIMEOUT_SECS))
            .build()
            .map_err(|e| Error::Config(format!("Failed to build HTTP client: {}", e)))?;
        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            interval,
        })
    }

    /// One-shot health probe
    pub async fn check(&self) -> Result<HealthReport> {
        let url = format!("{}/health", self.base_url);
        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| Error::Transport(e.to_string()))?;
        if !response.status().is_success() {
            return Err(Error::RemoteRejected(format!("HTTP {}", response.status())));
        }
        response
            .json::<HealthReport>()
            .await
            .map_err(|e| Error::Unknown(format!("Malformed health response: {}", e)))
    }

    /// Spawn the poll loop.
    ///
    /// The receiver always holds the latest status; the task stops once
    /// every receiver is dropped.
    pub fn spawn(self) -> (watch::Receiver<BackendStatus>, tokio::task::JoinHandle<()>) {
        let (tx, rx) = watch::channel(BackendStatus::Offline);
        let handle = tokio::spawn(async move {
            let mut ticker = tokio::time::interval(self.interval);
            loop {
                ticker.tick().await;
                let status = status_from_poll(self.check().await);
                tracing::debug!(status = %status, "Health poll");
                if tx.send(status).is_err() {
                    break;
                }
            }
        });
        (rx, handle)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn report(status: &str) -> HealthReport {
        HealthReport {
            status: status.to_string(),
            gemini_configured: true,
            openai_configured: false,
            version: None,
        }
    }

    #[test]
    fn test_operational_statuses() {
        assert_eq!(
            status_from_poll(Ok(report("operational"))),
            BackendStatus::Operational
        );
        assert_eq!(
            status_from_poll(Ok(report("healthy"))),
            BackendStatus::Operational
        );
    }

    #[test]
    fn test_other_status_is_degraded() {
        assert_eq!(
            status_from_poll(Ok(report("starting"))),
            BackendStatus::Degraded("starting".to_string())
        );
    }

    #[test]
    fn test_failure_is_offline() {
        assert_eq!(
            status_from_poll(Err(Error::Transport("connection refused".to_string()))),
            BackendStatus::Offline
        );
        assert_eq!(
            status_from_poll(Err(Error::Timeout)),
            BackendStatus::Offline
        );
    }

    #[test]
    fn test_report_parses_partial_payload() {
        let report: HealthReport = serde_json::from_str(r#"{"status":"healthy"}"#).unwrap();
        assert_eq!(report.status, "healthy");
        assert!(!report.gemini_configured);
        assert!(report.version.is_none());
    }

    #[tokio::test]
    async fn test_offline_backend_maps_to_offline() {
        // Nothing listens on this port; the probe must fail, not hang
        let monitor = HealthMonitor::new(
            "http://127.0.0.1:1",
            Duration::from_secs(60),
        )
        .unwrap();
        let status = status_from_poll(monitor.check().await);
        assert_eq!(status, BackendStatus::Offline);
    }

    #[tokio::test]
    async fn test_poll_loop_publishes_and_stops_without_receivers() {
        let monitor =
            HealthMonitor::new("http://127.0.0.1:1", Duration::from_millis(50)).unwrap();
        let (mut rx, handle) = monitor.spawn();

        rx.changed().await.unwrap();
        assert_eq!(*rx.borrow(), BackendStatus::Offline);

        drop(rx);
        let joined = tokio::time::timeout(Duration::from_secs(2), handle).await;
        assert!(joined.is_ok());
    }
}
