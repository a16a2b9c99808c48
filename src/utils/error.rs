//! Custom error types for ssl-checker
//!
//! Environment and process failures are modelled here with `thiserror`.
//! They are fatal: the binary reports them and exits. Per-target probe
//! failures are not errors in this sense, see [`crate::checks::ProbeError`].

use thiserror::Error;

/// Top-level error type for the ssl-checker application
#[derive(Error, Debug)]
pub enum CheckerError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Target error: {0}")]
    Target(#[from] TargetError),

    #[error("Report generation error: {0}")]
    Report(#[from] ReportError),

    #[error("Terminal UI error: {0}")]
    Tui(#[from] TuiError),

    #[error("TLS setup error: {0}")]
    Tls(#[from] rustls::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Configuration loading errors
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read configuration file {path}: {message}")]
    ReadFailed { path: String, message: String },

    #[error("Failed to parse configuration: {message}")]
    ParseError { message: String },

    #[error("Invalid configuration value for {key}: {message}")]
    InvalidValue { key: String, message: String },

    #[error("Cannot locate the home directory for the default configuration file, pass one with --config")]
    NoHomeDirectory,

    #[error("No queries configured, nothing to do")]
    NoQueries,

    #[error("Unknown environment requested: {name}")]
    UnknownEnvironment { name: String },

    #[error("Failed to initialise logging: {message}")]
    Logging { message: String },
}

/// Target enumeration errors
#[derive(Error, Debug)]
pub enum TargetError {
    #[error("Can't find targets file for environment {environment}: {path}")]
    FileNotFound { environment: String, path: String },

    #[error("Failed to read targets file {path}: {message}")]
    ReadFailed { path: String, message: String },
}

/// Report generation errors
#[derive(Error, Debug)]
pub enum ReportError {
    #[error("Failed to write report to {path}: {message}")]
    WriteError { path: String, message: String },

    #[error("Failed to write report to standard output: {message}")]
    StdoutError { message: String },
}

/// Terminal set-up and drawing errors
#[derive(Error, Debug)]
pub enum TuiError {
    #[error("Failed to initialise terminal: {message}")]
    Init { message: String },

    #[error("Failed to draw frame: {message}")]
    Draw { message: String },
}

/// Result type alias using CheckerError
pub type Result<T> = std::result::Result<T, CheckerError>;
