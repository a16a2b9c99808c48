//! Data models for ssl-checker
//!
//! This module contains the data structures shared by the probe engine,
//! the session and the report generator.

pub mod probe_result;
pub mod target;

pub use probe_result::{CertificateDetails, DistinguishedName, ProbeResult};
pub use target::{Target, TargetSet};
