//! Check modules for ssl-checker
//!
//! This module contains the TLS probe that runs once per target.

pub mod probe;

pub use probe::{parse_leaf, ProbeError, TlsProber, HTTPS_PORT};
