//! Terminal User Interface module
//!
//! Full-screen session built on ratatui:
//! - per-environment progress while probes run
//! - sorted, filterable results list and a detail page
//! - markdown export prompt

pub mod app;
pub mod events;
pub mod ui;
pub mod widgets;

pub use app::{run_interactive, App, AppState, TuiRunner};
