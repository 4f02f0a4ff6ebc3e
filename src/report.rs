//! Analysis report export
//!
//! Pure formatters for a completed troubleshooting cycle: a Markdown report,
//! a JSON document, and an issue-tracker template. Callers own the file and
//! clipboard side effects; everything here just builds strings.

use crate::client::{AnalysisMode, AnalysisResponse};
use crate::error::Result;
use crate::scanner::PiiFinding;
use crate::severity::SeverityLevel;
use chrono::{DateTime, Utc};
use serde::Serialize;

/// Everything the exporters need for one completed cycle
#[derive(Debug, Clone, Serialize)]
pub struct AnalysisReport {
    /// Answer text produced by the service
    pub answer: String,
    /// Server-provided redacted copy, when present
    #[serde(skip_serializing_if = "Option::is_none")]
    pub redacted: Option<String>,
    /// Model identifier the service used
    #[serde(skip_serializing_if = "Option::is_none")]
    pub model_used: Option<String>,
    /// Mode the analysis ran under
    pub mode: AnalysisMode,
    /// Severity annotation for the submitted log
    pub severity: SeverityLevel,
    /// Findings the submission was gated on
    pub findings: Vec<PiiFinding>,
    /// The submitted log text
    pub log_text: String,
    /// Report creation time
    pub generated_at: DateTime<Utc>,
}

impl AnalysisReport {
    /// Assemble a report from a cycle's pieces
    pub fn new(
        response: &AnalysisResponse,
        log_text: impl Into<String>,
        mode: AnalysisMode,
        severity: SeverityLevel,
        findings: Vec<PiiFinding>,
    ) -> Self {
        Self {
            answer: response.answer.clone(),
            redacted: response.redacted.clone(),
            model_used: response.model_used.clone(),
            mode,
            severity,
            findings,
            log_text: log_text.into(),
            generated_at: Utc::now(),
        }
    }

    /// Render as a Markdown report
    pub fn to_markdown(&self) -> String {
        let mut out = String::new();
        out.push_str("# LogLore Troubleshooting Report\n\n");
        out.push_str(&format!(
            "Generated: {}  \nMode: {} | Severity: {}\n\n",
            self.generated_at.format("%Y-%m-%d %H:%M:%S UTC"),
            self.mode,
            self.severity,
        ));
        if let Some(ref model) = self.model_used {
            out.push_str(&format!("Model: {}\n\n", model));
        }

        out.push_str("## AI Solution\n\n");
        out.push_str(&self.answer);
        out.push_str("\n\n## Sensitive Data Findings\n\n");
        out.push_str(&findings_section(&self.findings));

        if let Some(ref redacted) = self.redacted {
            out.push_str("\n## Redacted Log\n\n```\n");
            out.push_str(redacted);
            out.push_str("\n```\n");
        }

        out.push_str("\n## Original Log\n\n```\n");
        out.push_str(&self.log_text);
        out.push_str("\n```\n");
        out
    }

    /// Render as a pretty-printed JSON document
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Render as an issue-tracker template.
    ///
    /// The log excerpt prefers the redacted copy when one exists so the
    /// template is safe to paste into a public tracker.
    pub fn to_issue_template(&self) -> String {
        let excerpt = self.redacted.as_deref().unwrap_or(&self.log_text);
        let mut out = String::new();
        out.push_str("## Error Report\n\n");
        out.push_str(&format!("**Severity:** {}\n", self.severity));
        out.push_str(&format!("**Analysis mode:** {}\n\n", self.mode));
        out.push_str("### Log excerpt\n\n```\n");
        out.push_str(excerpt);
        out.push_str("\n```\n\n### Suggested resolution\n\n");
        out.push_str(&self.answer);
        out.push('\n');
        out
    }
}

fn findings_section(findings: &[PiiFinding]) -> String {
    if findings.is_empty() {
        return "No sensitive data detected.\n".to_string();
    }
    let mut out = String::new();
    for finding in findings {
        out.push_str(&format!("- {}: {} match(es)\n", finding.category, finding.count));
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scanner::SensitiveCategory;

    fn sample_response(redacted: bool) -> AnalysisResponse {
        AnalysisResponse {
            answer: "Rotate the key and restart.".to_string(),
            redacted: redacted.then(|| "token [REDACTED_OPENAI_KEY] leaked".to_string()),
            model_used: Some("gemini-1.5-flash".to_string()),
        }
    }

    fn sample_report(redacted: bool) -> AnalysisReport {
        AnalysisReport::new(
            &sample_response(redacted),
            "token sk-ABCDEFGHIJKLMNOPQRST leaked",
            AnalysisMode::Advanced,
            SeverityLevel::High,
            vec![PiiFinding {
                category: SensitiveCategory::OpenaiKey,
                count: 1,
            }],
        )
    }

    #[test]
    fn test_markdown_contains_sections() {
        let markdown = sample_report(true).to_markdown();
        assert!(markdown.contains("# LogLore Troubleshooting Report"));
        assert!(markdown.contains("Rotate the key and restart."));
        assert!(markdown.contains("Severity: HIGH"));
        assert!(markdown.contains("- OPENAI_KEY: 1 match(es)"));
        assert!(markdown.contains("## Redacted Log"));
    }

    #[test]
    fn test_markdown_omits_redacted_block_when_absent() {
        let markdown = sample_report(false).to_markdown();
        assert!(!markdown.contains("## Redacted Log"));
        assert!(markdown.contains("## Original Log"));
    }

    #[test]
    fn test_empty_findings_note() {
        let mut report = sample_report(false);
        report.findings.clear();
        assert!(report.to_markdown().contains("No sensitive data detected."));
    }

    #[test]
    fn test_json_document_round_trips() {
        let json = sample_report(true).to_json().unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["answer"], "Rotate the key and restart.");
        assert_eq!(value["mode"], "advanced");
        assert_eq!(value["severity"], "HIGH");
        assert_eq!(value["findings"][0]["category"], "OPENAI_KEY");
    }

    #[test]
    fn test_issue_template_prefers_redacted_excerpt() {
        let template = sample_report(true).to_issue_template();
        assert!(template.contains("[REDACTED_OPENAI_KEY]"));
        assert!(!template.contains("sk-ABCDEFGHIJKLMNOPQRST"));
    }

    #[test]
    fn test_issue_template_falls_back_to_original() {
        let template = sample_report(false).to_issue_template();
        assert!(template.contains("sk-ABCDEFGHIJKLMNOPQRST"));
    }
}
