//! Markdown report generation
//!
//! One H1 title, then per declared environment an H2 heading and a
//! fixed-width `Domain | Expiration | Issuer` table. Widths are counted in
//! characters, per environment block.

use crate::models::ProbeResult;
use crate::report::classify::classify;
use crate::report::ordering::sort_results;
use crate::utils::ReportError;
use std::io::Write;
use std::path::{Path, PathBuf};
use tracing::info;

/// Report written when the user accepts the default export path
pub const DEFAULT_REPORT_FILE: &str = "./report.md";

const TITLE: &str = "# TLS check Domain report";
const HEADERS: [&str; 3] = ["Domain", "Expiration", "Issuer"];
const EXPIRATION_WIDTH: usize = 10;
const EXPIRATION_FORMAT: &str = "%Y-%m-%d";
const NOT_AVAILABLE: &str = "NA";

/// Where a report is written
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReportDestination {
    File(PathBuf),
    Stdout,
}

/// One rendered table row
struct Row {
    domain: String,
    expiration: String,
    issuer: String,
}

impl Row {
    fn from_result(result: &ProbeResult) -> Self {
        match &result.outcome {
            Ok(details) => Row {
                domain: result.domain.clone(),
                expiration: details.not_after.format(EXPIRATION_FORMAT).to_string(),
                issuer: details.issuer.to_string(),
            },
            Err(error) => Row {
                domain: result.domain.clone(),
                expiration: NOT_AVAILABLE.to_string(),
                issuer: classify(error),
            },
        }
    }
}

/// Markdown report generator
pub struct MarkdownReport;

impl MarkdownReport {
    /// Render the report. `results` are re-sorted with the canonical ordering,
    /// so the output matches the interactive list order.
    pub fn render(results: &[ProbeResult], environments: &[String]) -> String {
        let mut sorted = results.to_vec();
        sort_results(&mut sorted);

        let mut md = String::new();
        md.push_str(TITLE);
        md.push_str("\n\n");

        for env in environments {
            let rows: Vec<Row> = sorted
                .iter()
                .filter(|r| &r.environment == env)
                .map(Row::from_result)
                .collect();

            Self::render_environment(&mut md, env, &rows);
        }

        md
    }

    fn render_environment(md: &mut String, env: &str, rows: &[Row]) {
        let domain_width = rows
            .iter()
            .map(|r| r.domain.chars().count())
            .chain(std::iter::once(HEADERS[0].chars().count()))
            .max()
            .unwrap_or(0);
        let issuer_width = rows
            .iter()
            .map(|r| r.issuer.chars().count())
            .chain(std::iter::once(HEADERS[2].chars().count()))
            .max()
            .unwrap_or(0);

        md.push_str(&format!("## Domains for {}\n\n", env));
        md.push_str(&format!(
            "| {:>dw$} | {:<ew$} | {:<iw$} |\n",
            HEADERS[0],
            HEADERS[1],
            HEADERS[2],
            dw = domain_width,
            ew = EXPIRATION_WIDTH,
            iw = issuer_width
        ));
        md.push_str(&format!(
            "|-{}-|-{}-|-{}-|\n",
            "-".repeat(domain_width),
            "-".repeat(EXPIRATION_WIDTH),
            "-".repeat(issuer_width)
        ));

        for row in rows {
            md.push_str(&format!(
                "| {:>dw$} | {:<ew$} | {:<iw$} |\n",
                row.domain,
                row.expiration,
                row.issuer,
                dw = domain_width,
                ew = EXPIRATION_WIDTH,
                iw = issuer_width
            ));
        }

        md.push('\n');
    }

    fn write_to(
        out: &mut dyn Write,
        results: &[ProbeResult],
        environments: &[String],
    ) -> Result<(), ReportError> {
        let md = Self::render(results, environments);
        out.write_all(md.as_bytes())
            .and_then(|_| out.flush())
            .map_err(|e| ReportError::StdoutError {
                message: e.to_string(),
            })
    }

    /// Write the report to `path`, creating or truncating it
    fn save(
        path: &Path,
        results: &[ProbeResult],
        environments: &[String],
    ) -> Result<(), ReportError> {
        let md = Self::render(results, environments);
        std::fs::write(path, md).map_err(|e| ReportError::WriteError {
            path: path.display().to_string(),
            message: e.to_string(),
        })?;

        info!("Report written to {}", path.display());
        Ok(())
    }

    /// Write the report to a file or to standard output
    pub fn write(
        destination: &ReportDestination,
        results: &[ProbeResult],
        environments: &[String],
    ) -> Result<(), ReportError> {
        match destination {
            ReportDestination::File(path) => Self::save(path, results, environments),
            ReportDestination::Stdout => {
                let stdout = std::io::stdout();
                let mut lock = stdout.lock();
                Self::write_to(&mut lock, results, environments)
            }
        }
    }
}
