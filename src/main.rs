//! ssl-checker - quickly check certificate details of many HTTPS targets
//!
//! Targets come from the `[queries]` table of the configuration file, from
//! domain files (`files`) or from the command line (`domains`).

use clap::Parser;
use console::style;
use ssl_checker::checks::TlsProber;
use ssl_checker::cli::{Cli, Commands};
use ssl_checker::config::{self, Settings};
use ssl_checker::models::TargetSet;
use ssl_checker::report::ReportDestination;
use ssl_checker::runner::run_silent;
use ssl_checker::tui::run_interactive;
use ssl_checker::utils::{logging, ConfigError};
use ssl_checker::Result;
use std::sync::Arc;
use tracing::{debug, warn};

#[tokio::main]
async fn main() {
    // Install the ring crypto provider for rustls
    rustls::crypto::ring::default_provider()
        .install_default()
        .expect("Failed to install rustls crypto provider");

    if let Err(e) = run().await {
        eprintln!("{} {}", style("Error:").red().bold(), e);
        std::process::exit(1);
    }
}

async fn run() -> Result<()> {
    let cli = Cli::parse();

    let mut settings = match &cli.config {
        Some(path) => Settings::load_optional(path)?,
        None => Settings::load_default()?,
    };
    cli.apply_to(&mut settings);
    settings.validate()?;

    let log_file = settings
        .log_file
        .clone()
        .unwrap_or_else(logging::default_log_file);
    let default_level = if settings.silent { "warn" } else { "error" };
    logging::init(settings.debug, &log_file, default_level)?;
    if settings.debug {
        eprintln!(
            "{} Debug is enabled, log will be found in {}",
            style("Warning:").yellow().bold(),
            log_file.display()
        );
    }

    let targets = match &cli.command {
        Some(Commands::Environments) => {
            let environments = settings.environments();
            if environments.is_empty() {
                return Err(ConfigError::NoQueries.into());
            }
            println!("Available environments: {}.", environments.join(", "));
            return Ok(());
        }
        Some(Commands::Files { list }) => config::from_files(&config::targets::split_list(list))?,
        Some(Commands::Domains { list }) => {
            config::from_domains(&config::targets::split_list(list))
        }
        None => config::from_queries(&settings.queries, cli.environment_filter().as_deref())?,
    };

    probe(&settings, &targets).await
}

async fn probe(settings: &Settings, targets: &TargetSet) -> Result<()> {
    debug!(
        "Probing {} targets in {} environments",
        targets.len(),
        targets.environments().len()
    );
    if targets.is_empty() {
        warn!("No domains to check");
    }

    let prober = Arc::new(TlsProber::new(settings.probe_timeout())?);
    let limit = settings.concurrency_limit();

    if settings.silent {
        eprintln!("Processing query!");
        run_silent(prober, targets, limit, &ReportDestination::Stdout).await
    } else {
        run_interactive(prober, targets, limit, settings.report.clone()).await
    }
}
