//! Target enumeration
//!
//! Turns configured query sources, file lists and domain lists into a
//! [`TargetSet`].

use crate::config::settings::QuerySource;
use crate::models::TargetSet;
use crate::utils::{ConfigError, Result, TargetError};
use indexmap::IndexMap;
use std::path::Path;
use tracing::debug;

/// Environment used by the `domains` subcommand
pub const CUSTOM_DOMAINS_ENVIRONMENT: &str = "customDomains";

/// Expand `$VAR` and `${VAR}` from the process environment.
///
/// Unset variables expand to an empty string. A `$` not followed by a
/// variable name is kept literally.
pub fn expand_env(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    let mut chars = input.chars().peekable();

    while let Some(c) = chars.next() {
        if c != '$' {
            out.push(c);
            continue;
        }

        let name: String = if chars.peek() == Some(&'{') {
            chars.next();
            let mut name = String::new();
            let mut closed = false;
            for c in chars.by_ref() {
                if c == '}' {
                    closed = true;
                    break;
                }
                name.push(c);
            }
            if !closed {
                out.push_str("${");
                out.push_str(&name);
                continue;
            }
            name
        } else {
            let mut name = String::new();
            while let Some(&c) = chars.peek() {
                if c.is_ascii_alphanumeric() || c == '_' {
                    name.push(c);
                    chars.next();
                } else {
                    break;
                }
            }
            if name.is_empty() {
                out.push('$');
                continue;
            }
            name
        };

        out.push_str(&std::env::var(&name).unwrap_or_default());
    }

    out
}

/// Parse a domain list: one domain per line, blank and `#` lines skipped
pub fn parse_domain_list(content: &str) -> Vec<String> {
    content
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .map(str::to_string)
        .collect()
}

/// Read the domains listed in `path` (after environment expansion)
pub fn read_domain_file(environment: &str, path: &str) -> std::result::Result<Vec<String>, TargetError> {
    let expanded = expand_env(path);
    let file = Path::new(&expanded);

    if !file.is_file() {
        return Err(TargetError::FileNotFound {
            environment: environment.to_string(),
            path: expanded,
        });
    }

    let content = std::fs::read_to_string(file).map_err(|e| TargetError::ReadFailed {
        path: expanded.clone(),
        message: e.to_string(),
    })?;

    let domains = parse_domain_list(&content);
    debug!("Loaded {} domains for {} from {}", domains.len(), environment, expanded);
    Ok(domains)
}

/// Split a comma separated argument, dropping empty items
pub fn split_list(input: &str) -> Vec<String> {
    input
        .split(',')
        .map(str::trim)
        .filter(|item| !item.is_empty())
        .map(str::to_string)
        .collect()
}

/// Build targets from the configured query table.
///
/// `filter` restricts the environments; naming an environment that is not
/// configured is an error.
pub fn from_queries(
    queries: &IndexMap<String, QuerySource>,
    filter: Option<&[String]>,
) -> Result<TargetSet> {
    if queries.is_empty() {
        return Err(ConfigError::NoQueries.into());
    }

    if let Some(filter) = filter {
        if let Some(unknown) = filter.iter().find(|name| !queries.contains_key(*name)) {
            return Err(ConfigError::UnknownEnvironment {
                name: unknown.clone(),
            }
            .into());
        }
    }

    let mut targets = TargetSet::new();
    for (environment, source) in queries {
        if let Some(filter) = filter {
            if !filter.contains(environment) {
                continue;
            }
        }

        match source {
            QuerySource::File(path) => {
                let domains = read_domain_file(environment, path)?;
                targets.add_environment(environment, domains);
            }
            QuerySource::Domains(domains) => {
                targets.add_environment(environment, domains.iter().cloned());
            }
        }
    }

    Ok(targets)
}

/// Build targets from domain files; each file becomes an environment named
/// after its base name.
pub fn from_files(files: &[String]) -> Result<TargetSet> {
    let mut targets = TargetSet::new();
    for file in files {
        let environment = Path::new(file)
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| file.clone());
        let domains = read_domain_file(&environment, file)?;
        targets.add_environment(&environment, domains);
    }
    Ok(targets)
}

/// Build targets from literal domains, grouped under `customDomains`
pub fn from_domains(domains: &[String]) -> TargetSet {
    TargetSet::new().with_environment(CUSTOM_DOMAINS_ENVIRONMENT, domains.iter().cloned())
}
