//! Known-error classification
//!
//! Probe failures are mapped onto a short, fixed set of human readable
//! categories. Structured [`ProbeError`] variants are matched first. Anything
//! left over is matched on its rendered text with ordered suffix/prefix rules,
//! first match wins, and falls through unchanged when no rule applies.
//!
//! The text rules depend on the exact wording of upstream error messages and
//! must be revisited whenever the TLS or socket stack changes its phrasing.

use crate::checks::ProbeError;

pub const CONNECTION_TIMEOUT: &str = "connection timeout";
pub const SAN_MISMATCH: &str = "certificate SAN does not include domain";
pub const NO_DNS_ENTRY: &str = "no DNS entry for this host";
pub const INVALID_CERTIFICATE: &str = "invalid certificate";

enum Rule {
    Suffix(&'static str),
    Prefix(&'static str),
}

impl Rule {
    fn matches(&self, message: &str) -> bool {
        match self {
            Rule::Suffix(suffix) => message.ends_with(suffix),
            Rule::Prefix(prefix) => message.starts_with(prefix),
        }
    }
}

const TEXT_RULES: &[(Rule, &str)] = &[
    (Rule::Suffix("i/o timeout"), CONNECTION_TIMEOUT),
    (Rule::Suffix("timed out"), CONNECTION_TIMEOUT),
    (Rule::Suffix("certificate name does not match input"), SAN_MISMATCH),
    (Rule::Suffix("NotValidForName"), SAN_MISMATCH),
    (Rule::Suffix("no such host"), NO_DNS_ENTRY),
    (Rule::Suffix("Name or service not known"), NO_DNS_ENTRY),
    (
        Rule::Prefix("tls: failed to verify certificate: x509: certificate is valid for"),
        INVALID_CERTIFICATE,
    ),
    (Rule::Prefix("invalid peer certificate"), INVALID_CERTIFICATE),
];

/// Classify a rendered error message; unmatched messages are returned as-is
pub fn classify_message(message: &str) -> String {
    TEXT_RULES
        .iter()
        .find(|(rule, _)| rule.matches(message))
        .map(|(_, category)| category.to_string())
        .unwrap_or_else(|| message.to_string())
}

/// Classify a probe failure
pub fn classify(error: &ProbeError) -> String {
    match error {
        ProbeError::Timeout { .. } => CONNECTION_TIMEOUT.to_string(),
        ProbeError::NameMismatch { .. } => SAN_MISMATCH.to_string(),
        ProbeError::Resolution { .. } => NO_DNS_ENTRY.to_string(),
        ProbeError::InvalidCertificate { .. } => INVALID_CERTIFICATE.to_string(),
        other => classify_message(&other.to_string()),
    }
}
