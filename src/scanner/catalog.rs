//! Pattern catalog for sensitive-data detection
//!
//! Declarative (category, pattern) rules covering credential and key formats,
//! tokens, personal identifiers, and network identifiers. Rules are
//! independent: one span may match more than one category, and every match is
//! counted rather than resolved to a single label. Matching is
//! case-insensitive only where the format allows it; prefixes whose case
//! carries meaning (`AKIA`, `AIza`, `ghp_`, `sk-`) stay case-sensitive.

use serde::{Deserialize, Serialize};

/// Category of sensitive data a catalog rule detects
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SensitiveCategory {
    /// Stripe secret, publishable, or restricted keys
    StripeKey,
    /// AWS access key IDs
    AwsKey,
    /// Google API keys
    GoogleKey,
    /// GitHub personal access tokens
    GithubToken,
    /// OpenAI-style `sk-` keys
    OpenaiKey,
    /// JSON Web Tokens (three dot-separated base64url segments)
    Jwt,
    /// Canonical 8-4-4-4-12 hyphenated hex identifiers
    Uuid,
    /// Key/value pairs whose key names a password, secret, token, or key
    Credential,
    /// Email addresses
    Email,
    /// US Social Security Numbers
    Ssn,
    /// Payment card numbers
    CreditCard,
    /// Phone numbers
    Phone,
    /// IPv4 dotted-quad addresses
    IpAddress,
    /// Hardware MAC addresses
    MacAddress,
    /// PEM private-key header markers
    PrivateKey,
}

impl std::fmt::Display for SensitiveCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            Self::StripeKey => "STRIPE_KEY",
            Self::AwsKey => "AWS_KEY",
            Self::GoogleKey => "GOOGLE_KEY",
            Self::GithubToken => "GITHUB_TOKEN",
            Self::OpenaiKey => "OPENAI_KEY",
            Self::Jwt => "JWT",
            Self::Uuid => "UUID",
            Self::Credential => "CREDENTIAL",
            Self::Email => "EMAIL",
            Self::Ssn => "SSN",
            Self::CreditCard => "CREDIT_CARD",
            Self::Phone => "PHONE",
            Self::IpAddress => "IP_ADDRESS",
            Self::MacAddress => "MAC_ADDRESS",
            Self::PrivateKey => "PRIVATE_KEY",
        };
        write!(f, "{}", label)
    }
}

/// One catalog rule
#[derive(Debug, Clone)]
pub struct PatternRule {
    /// Category reported for matches of this rule
    pub category: SensitiveCategory,
    /// Regex source, compiled once by the scanner
    pub pattern: &'static str,
    /// Drop matches whose adjacent byte on either side is a digit.
    /// The regex crate has no lookaround, so the dotted-quad rule enforces
    /// its "not inside a longer number" constraint on match boundaries.
    pub digit_bounded: bool,
}

impl PatternRule {
    const fn new(category: SensitiveCategory, pattern: &'static str) -> Self {
        Self {
            category,
            pattern,
            digit_bounded: false,
        }
    }

    const fn digit_bounded(category: SensitiveCategory, pattern: &'static str) -> Self {
        Self {
            category,
            pattern,
            digit_bounded: true,
        }
    }
}

/// The default rule set
pub fn default_catalog() -> Vec<PatternRule> {
    use SensitiveCategory::*;
    vec![
        // Stripe
        PatternRule::new(StripeKey, r"(?i)sk_(?:live|test)_[A-Za-z0-9_\-]{8,}"),
        PatternRule::new(StripeKey, r"(?i)(?:pk|rk)_live_[A-Za-z0-9_\-]{8,}"),
        // Cloud & API keys
        PatternRule::new(AwsKey, r"\bAKIA[0-9A-Z]{12,20}\b"),
        PatternRule::new(GoogleKey, r"\bAIza[0-9A-Za-z\-_]{10,}\b"),
        PatternRule::new(GithubToken, r"\bghp_[A-Za-z0-9]{20,}\b"),
        PatternRule::new(OpenaiKey, r"\bsk-[A-Za-z0-9]{20,}\b"),
        // Standard tokens
        PatternRule::new(Jwt, r"eyJ[A-Za-z0-9_\-]+?\.[A-Za-z0-9_\-]+?\.[A-Za-z0-9_\-]+"),
        PatternRule::new(
            Uuid,
            r"(?i)\b[0-9a-f]{8}-[0-9a-f]{4}-[0-9a-f]{4}-[0-9a-f]{4}-[0-9a-f]{12}\b",
        ),
        // Credentials
        PatternRule::new(
            Credential,
            r#"(?i)"(?:password|secret|token|key)"\s*:\s*"[^"]+""#,
        ),
        PatternRule::new(
            Credential,
            r#"(?i)\b(?:password|secret|key)\b\s*[:=]\s*["']?[^"'\s;]+"#,
        ),
        // Personal info
        PatternRule::new(Email, r"\b[A-Za-z0-9._%+-]+@[A-Za-z0-9.-]+\.[A-Za-z]{2,}\b"),
        PatternRule::new(Ssn, r"\b\d{3}-\d{2}-\d{4}\b"),
        PatternRule::new(CreditCard, r"\b(?:\d{4}[-\s]?){3}\d{4}\b"),
        PatternRule::new(Phone, r"\+?\d{1,2}\s?\(?\d{3}\)?[-\s]?\d{3}[-\s]?\d{4}"),
        // Network
        PatternRule::digit_bounded(IpAddress, r"(?:\d{1,3}\.){3}\d{1,3}"),
        PatternRule::new(MacAddress, r"\b(?:[0-9A-Fa-f]{2}[:-]){5}[0-9A-Fa-f]{2}\b"),
        // Private keys
        PatternRule::new(PrivateKey, r"-----BEGIN\s+(?:RSA\s+)?PRIVATE\s+KEY-----"),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_catalog_covers_every_category() {
        let catalog = default_catalog();
        let categories: std::collections::HashSet<_> =
            catalog.iter().map(|rule| rule.category).collect();
        assert_eq!(categories.len(), 15);
    }

    #[test]
    fn test_multiple_rules_per_category() {
        let catalog = default_catalog();
        let stripe = catalog
            .iter()
            .filter(|rule| rule.category == SensitiveCategory::StripeKey)
            .count();
        assert_eq!(stripe, 2);
        let credential = catalog
            .iter()
            .filter(|rule| rule.category == SensitiveCategory::Credential)
            .count();
        assert_eq!(credential, 2);
    }

    #[test]
    fn test_only_ip_rule_is_digit_bounded() {
        let catalog = default_catalog();
        for rule in catalog {
            assert_eq!(
                rule.digit_bounded,
                rule.category == SensitiveCategory::IpAddress
            );
        }
    }

    #[test]
    fn test_category_labels() {
        assert_eq!(SensitiveCategory::OpenaiKey.to_string(), "OPENAI_KEY");
        assert_eq!(SensitiveCategory::IpAddress.to_string(), "IP_ADDRESS");
        assert_eq!(
            serde_json::to_string(&SensitiveCategory::CreditCard).unwrap(),
            "\"CREDIT_CARD\""
        );
    }
}
