//! Application settings configuration
//!
//! Defines the probe timeout, run mode, report destination and the
//! per-environment query table.

use crate::report::DEFAULT_REPORT_FILE;
use crate::utils::ConfigError;
use indexmap::IndexMap;
use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::debug;

/// Where the domains of one environment come from
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum QuerySource {
    /// Path of a file listing one domain per line
    File(String),
    /// Domains given inline
    Domains(Vec<String>),
}

/// Application settings
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Probe timeout in seconds
    pub timeout: u64,
    pub silent: bool,
    pub debug: bool,
    /// Default report path offered by the export prompt
    pub report: PathBuf,
    /// Maximum probes in flight, 0 for no limit
    pub concurrency: usize,
    pub log_file: Option<PathBuf>,
    /// Environment name to query source, in declaration order
    pub queries: IndexMap<String, QuerySource>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            timeout: 10,
            silent: false,
            debug: false,
            report: PathBuf::from(DEFAULT_REPORT_FILE),
            concurrency: 0,
            log_file: None,
            queries: IndexMap::new(),
        }
    }
}

impl Settings {
    /// Default config location, `~/.config/ssl-checker/config.toml`
    pub fn default_path() -> Result<PathBuf, ConfigError> {
        Self::path_under(dirs::home_dir())
    }

    fn path_under(home: Option<PathBuf>) -> Result<PathBuf, ConfigError> {
        let home = home.ok_or(ConfigError::NoHomeDirectory)?;
        Ok(home.join(".config").join("ssl-checker").join("config.toml"))
    }

    /// Load settings from the default config file, falling back to defaults
    pub fn load_default() -> Result<Self, ConfigError> {
        Self::load_optional(Self::default_path()?)
    }

    /// Load settings from `path`; a missing file yields the defaults
    pub fn load_optional<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        if path.exists() {
            Self::load_from_file(path)
        } else {
            debug!("No config file found at {}", path.display());
            Ok(Self::default())
        }
    }

    /// Load settings from a specific file
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::ReadFailed {
            path: path.display().to_string(),
            message: e.to_string(),
        })?;

        Self::from_toml(&content)
    }

    /// Parse settings from TOML text
    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        let settings: Self = toml::from_str(content).map_err(|e| ConfigError::ParseError {
            message: e.to_string(),
        })?;
        settings.validate()?;
        Ok(settings)
    }

    /// Reject values the probe engine cannot work with
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.timeout == 0 {
            return Err(ConfigError::InvalidValue {
                key: "timeout".to_string(),
                message: "must be at least one second".to_string(),
            });
        }
        Ok(())
    }

    pub fn probe_timeout(&self) -> Duration {
        Duration::from_secs(self.timeout)
    }

    /// Concurrency cap for the dispatcher, `None` when unbounded
    pub fn concurrency_limit(&self) -> Option<usize> {
        (self.concurrency > 0).then_some(self.concurrency)
    }

    /// Configured environment names in declaration order
    pub fn environments(&self) -> Vec<String> {
        self.queries.keys().cloned().collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let settings = Settings::from_toml("").unwrap();
        assert_eq!(settings.timeout, 10);
        assert_eq!(settings.report, PathBuf::from("./report.md"));
        assert!(settings.concurrency_limit().is_none());
        assert!(settings.queries.is_empty());
    }

    #[test]
    fn test_queries_keep_document_order() {
        let settings = Settings::from_toml(
            r#"
            timeout = 5
            concurrency = 8

            [queries]
            staging = "$HOME/staging.txt"
            prod = ["a.example", "b.example"]
            dev = []
            "#,
        )
        .unwrap();

        assert_eq!(settings.environments(), vec!["staging", "prod", "dev"]);
        assert_eq!(
            settings.queries["staging"],
            QuerySource::File("$HOME/staging.txt".to_string())
        );
        assert_eq!(
            settings.queries["prod"],
            QuerySource::Domains(vec!["a.example".to_string(), "b.example".to_string()])
        );
        assert_eq!(settings.concurrency_limit(), Some(8));
        assert_eq!(settings.probe_timeout(), Duration::from_secs(5));
    }

    #[test]
    fn test_rejects_wrong_query_type() {
        let err = Settings::from_toml("[queries]\nprod = 42\n").unwrap_err();
        assert!(matches!(err, ConfigError::ParseError { .. }));
    }

    #[test]
    fn test_rejects_zero_timeout() {
        let err = Settings::from_toml("timeout = 0\n").unwrap_err();
        assert!(matches!(err, ConfigError::InvalidValue { .. }));
    }

    #[test]
    fn test_default_path_under_home() {
        let path = Settings::path_under(Some(PathBuf::from("/home/ops"))).unwrap();
        assert_eq!(
            path,
            PathBuf::from("/home/ops/.config/ssl-checker/config.toml")
        );
    }

    #[test]
    fn test_default_path_needs_home() {
        let err = Settings::path_under(None).unwrap_err();
        assert!(matches!(err, ConfigError::NoHomeDirectory));
    }

    #[test]
    fn test_missing_file_gives_defaults() {
        let settings = Settings::load_optional("/definitely/not/here/config.toml").unwrap();
        assert_eq!(settings.timeout, 10);
    }
}
