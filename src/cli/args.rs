//! CLI argument definitions using clap

use crate::config::Settings;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "ssl-checker")]
#[command(version)]
#[command(
    about = "Quickly check certificate details of multiple HTTPS targets",
    long_about = None
)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Configuration file location
    #[arg(short, long, value_name = "FILE", global = true)]
    pub config: Option<PathBuf>,

    /// Disable the UI and print the report to stdout
    #[arg(short, long, global = true)]
    pub silent: bool,

    /// Enable debug log, written to a log file
    #[arg(short, long, global = true)]
    pub debug: bool,

    /// Timeout for SSL check queries, in seconds
    #[arg(short, long, global = true, value_name = "SECONDS")]
    pub timeout: Option<u64>,

    /// Default report file offered by the export prompt
    #[arg(short = 'o', long = "report", global = true, value_name = "FILE")]
    pub report: Option<PathBuf>,

    /// Maximum number of probes in flight (0 = unlimited)
    #[arg(long, global = true, value_name = "N")]
    pub concurrency: Option<usize>,

    /// Comma delimited list of the environments to check
    #[arg(short, long, value_name = "ENVS")]
    pub environments: Option<String>,
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Commands {
    /// Run checks against a comma delimited list of domain files
    Files {
        /// file1[,file2,...]
        #[arg(required = true)]
        list: String,
    },

    /// Run checks against a comma delimited list of domains
    Domains {
        /// domain1[,domain2,...]
        #[arg(required = true)]
        list: String,
    },

    /// List environments set in the configuration file
    Environments,
}

impl Cli {
    /// Apply command-line overrides on top of loaded settings
    pub fn apply_to(&self, settings: &mut Settings) {
        if self.silent {
            settings.silent = true;
        }
        if self.debug {
            settings.debug = true;
        }
        if let Some(timeout) = self.timeout {
            settings.timeout = timeout;
        }
        if let Some(report) = &self.report {
            settings.report = report.clone();
        }
        if let Some(concurrency) = self.concurrency {
            settings.concurrency = concurrency;
        }
    }

    /// Environment filter from `-e`, if given
    pub fn environment_filter(&self) -> Option<Vec<String>> {
        self.environments
            .as_deref()
            .map(crate::config::targets::split_list)
            .filter(|list| !list.is_empty())
    }
}
