//! Report module
//!
//! Result ordering, known-error classification and the markdown report.

pub mod classify;
pub mod markdown;
pub mod ordering;

pub use classify::{classify, classify_message};
pub use markdown::{MarkdownReport, ReportDestination, DEFAULT_REPORT_FILE};
pub use ordering::{compare_results, sort_results};
