//! Probe outcome types

use crate::checks::ProbeError;
use chrono::{DateTime, Utc};
use std::fmt;
use x509_parser::num_bigint::BigUint;

/// Distinguished Name components
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DistinguishedName {
    pub common_name: Option<String>,
    pub organization: Option<String>,
    pub organizational_unit: Option<String>,
    pub country: Option<String>,
    pub state: Option<String>,
    pub locality: Option<String>,
}

/// Escape an attribute value the way RFC 2253 string forms do
fn escape_rdn_value(value: &str) -> String {
    let last = value.chars().count().saturating_sub(1);
    let mut escaped = String::with_capacity(value.len());
    for (i, c) in value.chars().enumerate() {
        let needs_escape = matches!(c, ',' | '+' | '"' | '\\' | '<' | '>' | ';')
            || (i == 0 && (c == ' ' || c == '#'))
            || (i == last && c == ' ');
        if needs_escape {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}

/// RFC 2253 form, most specific attribute first: `CN=R3,O=Let's Encrypt,C=US`
impl fmt::Display for DistinguishedName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let attributes = [
            ("CN", &self.common_name),
            ("OU", &self.organizational_unit),
            ("O", &self.organization),
            ("L", &self.locality),
            ("ST", &self.state),
            ("C", &self.country),
        ];

        let parts: Vec<String> = attributes
            .iter()
            .filter_map(|(key, value)| {
                value
                    .as_deref()
                    .map(|v| format!("{}={}", key, escape_rdn_value(v)))
            })
            .collect();
        write!(f, "{}", parts.join(","))
    }
}

/// Leaf certificate fields read after a successful handshake
#[derive(Debug, Clone, PartialEq)]
pub struct CertificateDetails {
    pub not_before: DateTime<Utc>,
    pub not_after: DateTime<Utc>,
    pub issuer: DistinguishedName,
    pub subject: DistinguishedName,
    pub subject_alt_names: Vec<String>,
    pub serial_number: BigUint,
}

/// Outcome of one probe against one target.
///
/// Holds either the certificate details or the failure, never both.
#[derive(Debug, Clone)]
pub struct ProbeResult {
    pub domain: String,
    pub environment: String,
    pub outcome: Result<CertificateDetails, ProbeError>,
}

impl ProbeResult {
    pub fn success(domain: &str, environment: &str, details: CertificateDetails) -> Self {
        Self {
            domain: domain.to_string(),
            environment: environment.to_string(),
            outcome: Ok(details),
        }
    }

    pub fn failure(domain: &str, environment: &str, error: ProbeError) -> Self {
        Self {
            domain: domain.to_string(),
            environment: environment.to_string(),
            outcome: Err(error),
        }
    }

    pub fn details(&self) -> Option<&CertificateDetails> {
        self.outcome.as_ref().ok()
    }

    pub fn error(&self) -> Option<&ProbeError> {
        self.outcome.as_ref().err()
    }

    pub fn is_error(&self) -> bool {
        self.outcome.is_err()
    }

    pub fn not_after(&self) -> Option<DateTime<Utc>> {
        self.details().map(|d| d.not_after)
    }

    /// Text the results list filters on
    pub fn filter_value(&self) -> String {
        match &self.outcome {
            Ok(details) => format!(
                "{} {} {}",
                self.domain,
                details.issuer,
                details.not_after.format("%Y-%m-%d")
            ),
            Err(_) => self.domain.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn details() -> CertificateDetails {
        CertificateDetails {
            not_before: Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap(),
            not_after: Utc.with_ymd_and_hms(2025, 1, 1, 0, 0, 0).unwrap(),
            issuer: DistinguishedName {
                common_name: Some("R3".to_string()),
                organization: Some("Let's Encrypt".to_string()),
                country: Some("US".to_string()),
                ..Default::default()
            },
            subject: DistinguishedName::default(),
            subject_alt_names: vec!["example.com".to_string()],
            serial_number: BigUint::from(42u32),
        }
    }

    #[test]
    fn test_distinguished_name_display() {
        assert_eq!(details().issuer.to_string(), "CN=R3,O=Let's Encrypt,C=US");
        assert_eq!(DistinguishedName::default().to_string(), "");

        let full = DistinguishedName {
            common_name: Some("app.example.com".to_string()),
            organization: Some("Example Widgets".to_string()),
            organizational_unit: Some("Platform".to_string()),
            country: Some("GB".to_string()),
            state: Some("London".to_string()),
            locality: Some("Westminster".to_string()),
        };
        assert_eq!(
            full.to_string(),
            "CN=app.example.com,OU=Platform,O=Example Widgets,L=Westminster,ST=London,C=GB"
        );
    }

    #[test]
    fn test_distinguished_name_escapes_special_characters() {
        let name = DistinguishedName {
            common_name: Some(" Widgets, Inc. ".to_string()),
            organization: Some("#1 Trust+Co".to_string()),
            ..Default::default()
        };
        assert_eq!(name.to_string(), r"CN=\ Widgets\, Inc.\ ,O=\#1 Trust\+Co");
    }

    #[test]
    fn test_success_exposes_expiry() {
        let result = ProbeResult::success("example.com", "prod", details());
        assert!(!result.is_error());
        assert_eq!(
            result.not_after(),
            Some(Utc.with_ymd_and_hms(2025, 1, 1, 0, 0, 0).unwrap())
        );
        assert!(result.filter_value().contains("2025-01-01"));
    }

    #[test]
    fn test_failure_has_no_expiry() {
        let result = ProbeResult::failure(
            "nowhere.invalid",
            "prod",
            ProbeError::Timeout { seconds: 5 },
        );
        assert!(result.is_error());
        assert!(result.not_after().is_none());
        assert_eq!(result.filter_value(), "nowhere.invalid");
    }
}
