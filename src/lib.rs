//! LogLore — privacy-gated AI troubleshooting for error logs
//!
//! LogLore lets a user submit free-text error logs for AI-assisted
//! troubleshooting while preventing sensitive data from leaving the client
//! unreviewed. Before anything is sent, the log is scanned against a catalog
//! of credential, token, personal-identifier, and network-identifier
//! patterns; any findings hold the submission for an explicit confirmation,
//! while a clean scan advances automatically.
//!
//! ```text
//! raw log ──> Scanner ──> findings ──> Workflow ──(gating)──> AnalysisClient
//!    │                                    │                        │
//!    │                                    │ confirm / cancel       │ answer +
//!    │                                    v                        v redacted copy
//!    └──> SeverityClassifier         PENDING_REVIEW          RESULT / FAILED ──> report
//!          (display only)
//! ```
//!
//! ## Modules
//!
//! - [`scanner`]: pattern catalog and sensitive-data scanner
//! - [`severity`]: keyword-tier severity classification
//! - [`workflow`]: submission-gating state machine
//! - [`client`]: analysis service boundary
//! - [`health`]: backend health polling
//! - [`report`]: result export formatting
//! - [`config`]: configuration management

pub mod client;
pub mod config;
pub mod error;
pub mod health;
pub mod report;
pub mod scanner;
pub mod severity;
pub mod workflow;

pub use client::{
    AnalysisClient, AnalysisMode, AnalysisRequest, AnalysisResponse, HttpAnalysisClient,
};
pub use config::LogLoreConfig;
pub use error::{Error, Result};
pub use health::{BackendStatus, HealthMonitor, HealthReport};
pub use report::AnalysisReport;
pub use scanner::{PiiFinding, Scanner, SensitiveCategory};
pub use severity::{SeverityClassifier, SeverityLevel};
pub use workflow::{SubmitOutcome, Workflow, WorkflowState};
