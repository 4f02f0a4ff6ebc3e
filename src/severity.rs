//! Log severity classification
//!
//! Maps raw log text to one of four ordered severity tiers by keyword
//! precedence: a CRITICAL-tier keyword anywhere in the text outranks any
//! number of lower-tier keywords. Classification is pure and total — it
//! always returns exactly one level and never fails. The result annotates
//! display only and has no effect on submission gating.

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

/// Severity tier for a log excerpt
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum SeverityLevel {
    Low,
    Medium,
    High,
    Critical,
}

impl std::fmt::Display for SeverityLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Low => write!(f, "LOW"),
            Self::Medium => write!(f, "MEDIUM"),
            Self::High => write!(f, "HIGH"),
            Self::Critical => write!(f, "CRITICAL"),
        }
    }
}

impl PartialOrd for SeverityLevel {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for SeverityLevel {
    fn cmp(&self, other: &Self) -> Ordering {
        let rank = |level: &Self| match level {
            Self::Low => 0,
            Self::Medium => 1,
            Self::High => 2,
            Self::Critical => 3,
        };
        rank(self).cmp(&rank(other))
    }
}

/// Keyword tiers consulted in precedence order
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SeverityConfig {
    /// Keywords that force CRITICAL
    pub critical_keywords: Vec<String>,
    /// Keywords that force HIGH when no CRITICAL keyword matched
    pub high_keywords: Vec<String>,
    /// Keywords that force MEDIUM when no higher tier matched
    pub medium_keywords: Vec<String>,
}

impl Default for SeverityConfig {
    fn default() -> Self {
        let tier = |words: &[&str]| -> Vec<String> {
            words.iter().map(|w| w.to_string()).collect()
        };
        Self {
            critical_keywords: tier(&["fatal", "critical", "emergency", "panic", "security breach"]),
            high_keywords: tier(&["error", "failed", "exception", "timeout", "denied"]),
            medium_keywords: tier(&["warning", "deprecated", "retry", "slow"]),
        }
    }
}

/// Keyword-tier severity classifier
pub struct SeverityClassifier {
    config: SeverityConfig,
}

impl SeverityClassifier {
    /// Create a classifier with the given keyword tiers
    pub fn new(config: SeverityConfig) -> Self {
        Self { config }
    }

    /// Classify text into a severity tier.
    ///
    /// Case-insensitive substring match, tiers checked in strict precedence;
    /// LOW when no tier matches.
    pub fn classify(&self, text: &str) -> SeverityLevel {
        let lower = text.to_lowercase();
        let tier_matches =
            |keywords: &[String]| keywords.iter().any(|k| lower.contains(&k.to_lowercase()));

        if tier_matches(&self.config.critical_keywords) {
            SeverityLevel::Critical
        } else if tier_matches(&self.config.high_keywords) {
            SeverityLevel::High
        } else if tier_matches(&self.config.medium_keywords) {
            SeverityLevel::Medium
        } else {
            SeverityLevel::Low
        }
    }
}

impl Default for SeverityClassifier {
    fn default() -> Self {
        Self::new(SeverityConfig::default())
    }
}
