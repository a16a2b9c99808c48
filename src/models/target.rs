//! Probe targets grouped by environment

use indexmap::IndexMap;

/// A single domain to probe, tagged with its declared environment
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Target {
    pub environment: String,
    pub domain: String,
}

impl Target {
    pub fn new(environment: &str, domain: &str) -> Self {
        Self {
            environment: environment.to_string(),
            domain: domain.to_string(),
        }
    }
}

/// Resolved targets, keyed by environment in declaration order.
///
/// Domains are not deduplicated, within or across environments. An
/// environment may be declared with no domains at all.
#[derive(Debug, Clone, Default)]
pub struct TargetSet {
    environments: IndexMap<String, Vec<String>>,
}

impl TargetSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Declare an environment (if not yet declared) and append its domains
    pub fn add_environment<I, S>(&mut self, environment: &str, domains: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.environments
            .entry(environment.to_string())
            .or_default()
            .extend(domains.into_iter().map(Into::into));
    }

    /// Builder-style variant of [`TargetSet::add_environment`]
    pub fn with_environment<I, S>(mut self, environment: &str, domains: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.add_environment(environment, domains);
        self
    }

    /// Environment names in declaration order
    pub fn environments(&self) -> Vec<String> {
        self.environments.keys().cloned().collect()
    }

    /// Number of targets per environment, in declaration order
    pub fn counts(&self) -> IndexMap<String, usize> {
        self.environments
            .iter()
            .map(|(env, domains)| (env.clone(), domains.len()))
            .collect()
    }

    /// Every target across every environment
    pub fn targets(&self) -> impl Iterator<Item = Target> + '_ {
        self.environments.iter().flat_map(|(env, domains)| {
            domains.iter().map(move |domain| Target::new(env, domain))
        })
    }

    /// Total number of targets
    pub fn len(&self) -> usize {
        self.environments.values().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
