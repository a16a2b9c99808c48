//! ssl-checker library
//!
//! Quickly checks the certificates of many HTTPS targets grouped by
//! environment:
//! - concurrent TLS probes with a per-probe timeout
//! - per-environment result aggregation and completion tracking
//! - an interactive results browser with markdown export
//! - a silent mode that prints the report to stdout
//!
//! # Usage
//!
//! ```rust,ignore
//! use ssl_checker::checks::TlsProber;
//! use ssl_checker::models::TargetSet;
//! use ssl_checker::report::ReportDestination;
//! use ssl_checker::runner::run_silent;
//! use std::sync::Arc;
//! use std::time::Duration;
//!
//! #[tokio::main]
//! async fn main() -> ssl_checker::Result<()> {
//!     let targets = TargetSet::new().with_environment("prod", ["example.com"]);
//!     let prober = Arc::new(TlsProber::new(Duration::from_secs(10))?);
//!     run_silent(prober, &targets, None, &ReportDestination::Stdout).await
//! }
//! ```

pub mod checks;
pub mod cli;
pub mod config;
pub mod models;
pub mod report;
pub mod runner;
pub mod tui;
pub mod utils;

// Re-export commonly used types
pub use cli::Cli;
pub use config::Settings;
pub use models::{ProbeResult, Target, TargetSet};
pub use utils::{CheckerError, Result};
