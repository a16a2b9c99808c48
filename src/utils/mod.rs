//! Utility modules for ssl-checker
//!
//! This module contains error types, logging set-up and progress indicators.

pub mod error;
pub mod logging;
pub mod progress;

pub use error::{CheckerError, ConfigError, ReportError, Result, TargetError, TuiError};
pub use progress::ProgressTracker;
