//! Submission-gating workflow
//!
//! Finite-state machine owning one analysis cycle: scan the current log text,
//! hold for user confirmation when findings exist, call the analysis boundary,
//! and land in a terminal result or failure state. Zero findings skip the
//! confirmation step through a direct transition guard — never through any
//! display-side shortcut.
//!
//! ```text
//!            submit (findings)              proceed / auto-advance
//! EDITING ──────────────────────> PENDING_REVIEW ──────────────> SUBMITTING
//!    ^                                  │                           │    │
//!    │<──────────── cancel ─────────────┘                  resolve  │    │ reject
//!    │                                                              v    v
//!    │<────────────────── edit / retry ──────────────────────── RESULT  FAILED
//! ```

use crate::client::{AnalysisClient, AnalysisMode, AnalysisRequest, AnalysisResponse};
use crate::error::{Error, Result};
use crate::scanner::{PiiFinding, Scanner};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tokio::sync::RwLock;

/// Failure kind carried by the terminal `Failed` state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FailureKind {
    /// External call exceeded its deadline
    Timeout,
    /// Network unreachable / connection refused
    Transport,
    /// The service returned a non-success status
    RemoteRejected,
    /// Any other failure
    Unknown,
}

/// Cloneable failure snapshot for state observation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Failure {
    /// Classified failure kind
    pub kind: FailureKind,
    /// Human-readable message, surfaced to the caller
    pub message: String,
}

impl From<&Error> for Failure {
    fn from(error: &Error) -> Self {
        let kind = match error {
            Error::Timeout => FailureKind::Timeout,
            Error::Transport(_) => FailureKind::Transport,
            Error::RemoteRejected(_) => FailureKind::RemoteRejected,
            _ => FailureKind::Unknown,
        };
        Self {
            kind,
            message: error.to_string(),
        }
    }
}

/// Workflow state for one submission cycle
#[derive(Debug, Clone)]
pub enum WorkflowState {
    /// Input is being edited; nothing in flight
    Editing,
    /// Scan found sensitive data; waiting for an explicit proceed or cancel
    PendingReview { findings: Vec<PiiFinding> },
    /// The analysis call is in flight
    Submitting,
    /// Terminal: the service answered
    Result { response: AnalysisResponse },
    /// Terminal: the cycle failed
    Failed { failure: Failure },
}

impl WorkflowState {
    /// Short state name for logging
    pub fn name(&self) -> &'static str {
        match self {
            Self::Editing => "editing",
            Self::PendingReview { .. } => "pending_review",
            Self::Submitting => "submitting",
            Self::Result { .. } => "result",
            Self::Failed { .. } => "failed",
        }
    }
}

/// Outcome of a submit event
#[derive(Debug, Clone)]
pub enum SubmitOutcome {
    /// Findings exist; the workflow holds in `PendingReview`
    ConfirmationRequired(Vec<PiiFinding>),
    /// No findings; the boundary call ran to completion (inspect `state`)
    Completed,
    /// A submission was already in flight; this event was dropped
    InFlight,
    /// The event was not valid in the current state
    Ignored,
}

/// Submission workflow for one input surface.
///
/// Owns the raw log text, the selected mode, and the cycle state. The
/// analysis boundary is injected as a capability object so tests can run
/// against a fake. One workflow instance never has concurrent writers: a
/// submit observed while a call is in flight is dropped before any second
/// boundary call is issued.
pub struct Workflow {
    scanner: Scanner,
    client: Arc<dyn AnalysisClient>,
    state: Arc<RwLock<WorkflowState>>,
    log_text: Arc<RwLock<String>>,
    mode: Arc<RwLock<AnalysisMode>>,
}

impl Workflow {
    /// Create a workflow over the default catalog
    pub fn new(client: Arc<dyn AnalysisClient>) -> Result<Self> {
        Ok(Self::with_scanner(Scanner::new()?, client))
    }

    /// Create a workflow with a specific scanner
    pub fn with_scanner(scanner: Scanner, client: Arc<dyn AnalysisClient>) -> Self {
        Self {
            scanner,
            client,
            state: Arc::new(RwLock::new(WorkflowState::Editing)),
            log_text: Arc::new(RwLock::new(String::new())),
            mode: Arc::new(RwLock::new(AnalysisMode::default())),
        }
    }

    /// Snapshot of the current state
    pub async fn state(&self) -> WorkflowState {
        self.state.read().await.clone()
    }

    /// Current log text
    pub async fn text(&self) -> String {
        self.log_text.read().await.clone()
    }

    /// Replace the log text. Never transitions state: a changed text only
    /// takes effect when the user explicitly submits again.
    pub async fn set_text(&self, text: impl Into<String>) {
        *self.log_text.write().await = text.into();
    }

    /// Select the analysis mode (forwarded to the boundary unchanged)
    pub async fn set_mode(&self, mode: AnalysisMode) {
        *self.mode.write().await = mode;
    }

    /// Request submission of the current log text.
    ///
    /// Valid from `Editing` and `Result` (re-entry re-scans the current
    /// text; findings from a previous cycle are never reused). Blank text is
    /// rejected with [`Error::EmptyInput`] without a state change. When the
    /// scan finds nothing the confirmation step is skipped and the boundary
    /// call runs immediately; otherwise the workflow holds in
    /// `PendingReview` until [`proceed`](Self::proceed) or
    /// [`cancel`](Self::cancel).
    pub async fn submit(&self) -> Result<SubmitOutcome> {
        let findings = {
            let mut state = self.state.write().await;
            match *state {
                WorkflowState::Submitting => {
                    tracing::debug!("Submit ignored: a submission is already in flight");
                    return Ok(SubmitOutcome::InFlight);
                }
                WorkflowState::Editing | WorkflowState::Result { .. } => {}
                _ => return Ok(SubmitOutcome::Ignored),
            }

            let text = self.log_text.read().await;
            if text.trim().is_empty() {
                return Err(Error::EmptyInput);
            }

            // Entering the gating step: scan exactly once against the
            // current text.
            let findings = self.scanner.scan(&text);
            if findings.is_empty() {
                // Guard on the PENDING_REVIEW -> SUBMITTING edge: no
                // findings, no confirmation event required.
                tracing::debug!("No findings; advancing without confirmation");
                *state = WorkflowState::Submitting;
                None
            } else {
                *state = WorkflowState::PendingReview {
                    findings: findings.clone(),
                };
                Some(findings)
            }
        };

        match findings {
            Some(findings) => Ok(SubmitOutcome::ConfirmationRequired(findings)),
            None => {
                self.dispatch().await;
                Ok(SubmitOutcome::Completed)
            }
        }
    }

    /// Confirm submission of text with findings.
    ///
    /// Returns whether the event applied (only from `PendingReview`).
    pub async fn proceed(&self) -> bool {
        {
            let mut state = self.state.write().await;
            if !matches!(*state, WorkflowState::PendingReview { .. }) {
                return false;
            }
            *state = WorkflowState::Submitting;
        }
        self.dispatch().await;
        true
    }

    /// Abort the pending review and return to editing.
    ///
    /// The log text is untouched; the scan results are dropped.
    pub async fn cancel(&self) -> bool {
        let mut state = self.state.write().await;
        if matches!(*state, WorkflowState::PendingReview { .. }) {
            *state = WorkflowState::Editing;
            true
        } else {
            false
        }
    }

    /// Recover from a failed cycle and return to editing
    pub async fn retry(&self) -> bool {
        let mut state = self.state.write().await;
        if matches!(*state, WorkflowState::Failed { .. }) {
            *state = WorkflowState::Editing;
            true
        } else {
            false
        }
    }

    /// Leave a terminal state and return to editing
    pub async fn edit(&self) -> bool {
        let mut state = self.state.write().await;
        if matches!(
            *state,
            WorkflowState::Result { .. } | WorkflowState::Failed { .. }
        ) {
            *state = WorkflowState::Editing;
            true
        } else {
            false
        }
    }

    /// Run the boundary call for the current cycle and record the terminal
    /// state. Callers must have set `Submitting` beforehand; the state lock
    /// is not held across the await.
    async fn dispatch(&self) {
        let cycle = uuid::Uuid::new_v4();
        let request = {
            let text = self.log_text.read().await;
            let mode = self.mode.read().await;
            AnalysisRequest::new(text.clone(), *mode)
        };

        tracing::info!(cycle = %cycle, mode = %request.mode, "Dispatching analysis request");
        let outcome = self.client.troubleshoot(request).await;

        let mut state = self.state.write().await;
        *state = match outcome {
            Ok(response) => {
                tracing::info!(cycle = %cycle, "Analysis completed");
                WorkflowState::Result { response }
            }
            Err(ref error) => {
                let failure = Failure::from(error);
                tracing::warn!(cycle = %cycle, kind = ?failure.kind, "Analysis failed: {}", failure.message);
                WorkflowState::Failed { failure }
            }
        };
    }
}

/// Parse a user reply as a confirmation decision.
///
/// Recognizes: yes, y, proceed, approve / no, n, cancel, reject
pub fn parse_confirmation(text: &str) -> Option<bool> {
    let trimmed = text.trim().to_lowercase();
    match trimmed.as_str() {
        "yes" | "y" | "proceed" | "approve" => Some(true),
        "no" | "n" | "cancel" | "reject" => Some(false),
        _ => None,
    }
}
