//! TLS probe
//!
//! Performs one verified TLS handshake against one target and reads the
//! leaf certificate. Failures never escape as `Err`: they are folded into
//! the returned [`ProbeResult`].

use crate::models::{CertificateDetails, DistinguishedName, ProbeResult, Target};
use crate::runner::Prober;
use chrono::{DateTime, TimeZone, Utc};
use rustls::pki_types::ServerName;
use rustls::{CertificateError, ClientConfig, RootCertStore};
use std::io;
use std::net::{IpAddr, SocketAddr};
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;
use tokio::net::TcpStream;
use tokio_rustls::TlsConnector;
use tracing::debug;
use x509_parser::prelude::*;

/// Port every target is probed on
pub const HTTPS_PORT: u16 = 443;

/// Why a probe failed
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ProbeError {
    #[error("connection timed out after {seconds}s")]
    Timeout { seconds: u64 },

    #[error("failed to resolve {host}: {message}")]
    Resolution { host: String, message: String },

    #[error("connection failed: {message}")]
    Connection { message: String },

    #[error("certificate is not valid for {domain}")]
    NameMismatch { domain: String },

    #[error("invalid peer certificate: {reason}")]
    InvalidCertificate { reason: String },

    #[error("TLS handshake failed: {message}")]
    Handshake { message: String },

    #[error("failed to parse certificate: {message}")]
    Parse { message: String },

    #[error("no certificate presented by peer")]
    NoCertificate,
}

/// Probe unit backed by rustls and the Mozilla root store
pub struct TlsProber {
    connector: TlsConnector,
    timeout: Duration,
    port: u16,
}

impl TlsProber {
    /// Create a prober whose handshakes give up after `timeout`
    pub fn new(timeout: Duration) -> Result<Self, rustls::Error> {
        let root_store = RootCertStore::from_iter(webpki_roots::TLS_SERVER_ROOTS.iter().cloned());

        let config = ClientConfig::builder_with_provider(Arc::new(
            rustls::crypto::ring::default_provider(),
        ))
        .with_safe_default_protocol_versions()?
        .with_root_certificates(root_store)
        .with_no_client_auth();

        Ok(Self {
            connector: TlsConnector::from(Arc::new(config)),
            timeout,
            port: HTTPS_PORT,
        })
    }

    /// Probe a port other than 443
    pub fn with_port(mut self, port: u16) -> Self {
        self.port = port;
        self
    }

    /// Probe one target. Resolution, connect and handshake share the deadline.
    pub async fn check(&self, target: &Target) -> ProbeResult {
        debug!("SSL query for {}", target.domain);

        let outcome = match tokio::time::timeout(self.timeout, self.fetch_leaf(&target.domain)).await
        {
            Ok(outcome) => outcome,
            Err(_) => Err(ProbeError::Timeout {
                seconds: self.timeout.as_secs(),
            }),
        };

        match &outcome {
            Ok(_) => debug!("SSL query completed for {}", target.domain),
            Err(e) => debug!("SSL query failed for {}: {}", target.domain, e),
        }

        ProbeResult {
            domain: target.domain.clone(),
            environment: target.environment.clone(),
            outcome,
        }
    }

    async fn fetch_leaf(&self, domain: &str) -> Result<CertificateDetails, ProbeError> {
        let server_name =
            ServerName::try_from(domain.to_string()).map_err(|e| ProbeError::Resolution {
                host: domain.to_string(),
                message: e.to_string(),
            })?;

        let addrs: Vec<SocketAddr> = tokio::net::lookup_host((domain, self.port))
            .await
            .map_err(|e| ProbeError::Resolution {
                host: domain.to_string(),
                message: e.to_string(),
            })?
            .collect();

        if addrs.is_empty() {
            return Err(ProbeError::Resolution {
                host: domain.to_string(),
                message: "no such host".to_string(),
            });
        }

        let stream = TcpStream::connect(&addrs[..])
            .await
            .map_err(|e| ProbeError::Connection {
                message: e.to_string(),
            })?;

        let tls_stream = self
            .connector
            .connect(server_name, stream)
            .await
            .map_err(|e| handshake_error(domain, e))?;

        let (_, client_connection) = tls_stream.get_ref();
        let leaf = client_connection
            .peer_certificates()
            .and_then(|certs| certs.first())
            .ok_or(ProbeError::NoCertificate)?;

        parse_leaf(leaf.as_ref())
    }
}

impl Prober for TlsProber {
    async fn probe(&self, target: &Target) -> ProbeResult {
        self.check(target).await
    }
}

/// Map a connector failure onto the probe error taxonomy
fn handshake_error(domain: &str, err: io::Error) -> ProbeError {
    let tls_error = err
        .get_ref()
        .and_then(|inner| inner.downcast_ref::<rustls::Error>());

    match tls_error {
        Some(rustls::Error::InvalidCertificate(
            CertificateError::NotValidForName | CertificateError::NotValidForNameContext { .. },
        )) => ProbeError::NameMismatch {
            domain: domain.to_string(),
        },
        Some(rustls::Error::InvalidCertificate(reason)) => ProbeError::InvalidCertificate {
            reason: format!("{:?}", reason),
        },
        Some(other) => ProbeError::Handshake {
            message: other.to_string(),
        },
        None => ProbeError::Handshake {
            message: err.to_string(),
        },
    }
}

/// Parse the leaf certificate from DER bytes
pub fn parse_leaf(der: &[u8]) -> Result<CertificateDetails, ProbeError> {
    let (_, cert) = X509Certificate::from_der(der).map_err(|e| ProbeError::Parse {
        message: format!("{:?}", e),
    })?;

    let validity = cert.validity();

    Ok(CertificateDetails {
        not_before: asn1_time_to_datetime(validity.not_before)?,
        not_after: asn1_time_to_datetime(validity.not_after)?,
        issuer: extract_distinguished_name(cert.issuer()),
        subject: extract_distinguished_name(cert.subject()),
        subject_alt_names: extract_san(&cert),
        serial_number: cert.tbs_certificate.serial.clone(),
    })
}

fn extract_distinguished_name(name: &X509Name) -> DistinguishedName {
    fn first<'r, 'x: 'r>(
        mut values: impl Iterator<Item = &'r AttributeTypeAndValue<'x>>,
    ) -> Option<String> {
        values
            .next()
            .and_then(|attr| attr.as_str().ok())
            .map(|s| s.to_string())
    }

    DistinguishedName {
        common_name: first(name.iter_common_name()),
        organization: first(name.iter_organization()),
        organizational_unit: first(name.iter_organizational_unit()),
        country: first(name.iter_country()),
        state: first(name.iter_state_or_province()),
        locality: first(name.iter_locality()),
    }
}

fn extract_san(cert: &X509Certificate) -> Vec<String> {
    let mut sans = Vec::new();

    if let Ok(Some(san_ext)) = cert.subject_alternative_name() {
        for name in &san_ext.value.general_names {
            match name {
                GeneralName::DNSName(dns) => sans.push(dns.to_string()),
                GeneralName::IPAddress(ip) => {
                    if let Ok(octets) = <[u8; 4]>::try_from(*ip) {
                        sans.push(IpAddr::from(octets).to_string());
                    } else if let Ok(octets) = <[u8; 16]>::try_from(*ip) {
                        sans.push(IpAddr::from(octets).to_string());
                    }
                }
                _ => {}
            }
        }
    }

    sans
}

fn asn1_time_to_datetime(time: ASN1Time) -> Result<DateTime<Utc>, ProbeError> {
    Utc.timestamp_opt(time.timestamp(), 0)
        .single()
        .ok_or_else(|| ProbeError::Parse {
            message: "invalid validity timestamp".to_string(),
        })
}
