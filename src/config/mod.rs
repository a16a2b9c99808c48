//! Configuration module for ssl-checker
//!
//! Handles loading settings from TOML and resolving them into probe targets.

pub mod settings;
pub mod targets;

pub use settings::{QuerySource, Settings};
pub use targets::{from_domains, from_files, from_queries, CUSTOM_DOMAINS_ENVIRONMENT};
