//! Probe orchestration engine
//!
//! Fans one probe per target out over the tokio runtime and funnels every
//! outcome through a single channel. Exactly one consumer owns the
//! [`ResultAggregator`]; probes never touch the counters themselves.

use crate::models::{ProbeResult, Target, TargetSet};
use crate::report::{MarkdownReport, ReportDestination};
use crate::utils::{ProgressTracker, Result};
use indexmap::IndexMap;
use std::future::Future;
use std::sync::Arc;
use tokio::sync::{mpsc, Semaphore};
use tracing::{debug, info, warn};

/// Something that turns a target into a probe result.
///
/// Implementations must always produce a result, folding failures into
/// [`ProbeResult::outcome`].
pub trait Prober: Send + Sync + 'static {
    fn probe(&self, target: &Target) -> impl Future<Output = ProbeResult> + Send;
}

/// Start one probe per target and return the receiving end of the result channel.
///
/// With `limit` unset (or zero) every probe starts at once. Otherwise at most
/// `limit` probes are in flight, the rest wait on a semaphore.
pub fn dispatch<P: Prober>(
    prober: Arc<P>,
    targets: &TargetSet,
    limit: Option<usize>,
) -> mpsc::UnboundedReceiver<ProbeResult> {
    let (tx, rx) = mpsc::unbounded_channel();
    let semaphore = limit.filter(|n| *n > 0).map(|n| Arc::new(Semaphore::new(n)));

    for target in targets.targets() {
        let prober = Arc::clone(&prober);
        let tx = tx.clone();
        let semaphore = semaphore.clone();

        tokio::spawn(async move {
            let _permit = match &semaphore {
                Some(semaphore) => semaphore.acquire().await.ok(),
                None => None,
            };

            let result = prober.probe(&target).await;
            if tx.send(result).is_err() {
                debug!("Result channel closed, dropping result for {}", target.domain);
            }
        });
    }

    debug!(
        "Dispatched {} probes across {} environments (limit: {:?})",
        targets.len(),
        targets.environments().len(),
        limit
    );

    rx
}

/// Progress of one environment
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnvironmentProgress {
    pub environment: String,
    pub received: usize,
    pub expected: usize,
}

impl EnvironmentProgress {
    /// Completed fraction; an environment without targets counts as done
    pub fn ratio(&self) -> f64 {
        if self.expected == 0 {
            1.0
        } else {
            self.received as f64 / self.expected as f64
        }
    }
}

/// Tracks expected versus received results per environment
#[derive(Debug, Clone)]
pub struct ResultAggregator {
    expected: IndexMap<String, usize>,
    received: IndexMap<String, usize>,
    results: Vec<ProbeResult>,
}

impl ResultAggregator {
    /// Expected counts are fixed up front from the target set
    pub fn new(targets: &TargetSet) -> Self {
        let expected = targets.counts();
        let received = expected.keys().map(|env| (env.clone(), 0)).collect();

        Self {
            expected,
            received,
            results: Vec::with_capacity(targets.len()),
        }
    }

    /// Record one result, returning whether the session is now complete.
    ///
    /// A result for an unknown environment, or beyond the expected count,
    /// is logged and discarded so that `received <= expected` always holds.
    pub fn record(&mut self, result: ProbeResult) -> bool {
        let expected = self.expected(&result.environment);
        match self.received.get_mut(&result.environment) {
            Some(received) if *received < expected => *received += 1,
            _ => {
                warn!(
                    "Discarding unexpected result for {} in environment {}",
                    result.domain, result.environment
                );
                return self.is_complete();
            }
        }

        self.results.push(result);

        let complete = self.is_complete();
        if complete {
            info!("All {} probes reported", self.results.len());
        }
        complete
    }

    /// True once every environment with targets has all of its results
    pub fn is_complete(&self) -> bool {
        self.expected
            .iter()
            .all(|(env, &expected)| expected == 0 || self.received(env) == expected)
    }

    pub fn expected(&self, environment: &str) -> usize {
        self.expected.get(environment).copied().unwrap_or(0)
    }

    pub fn received(&self, environment: &str) -> usize {
        self.received.get(environment).copied().unwrap_or(0)
    }

    pub fn total_expected(&self) -> usize {
        self.expected.values().sum()
    }

    /// Environment names in declaration order
    pub fn environments(&self) -> Vec<String> {
        self.expected.keys().cloned().collect()
    }

    /// Per-environment progress in declaration order
    pub fn progress(&self) -> Vec<EnvironmentProgress> {
        self.expected
            .iter()
            .map(|(env, &expected)| EnvironmentProgress {
                environment: env.clone(),
                received: self.received(env),
                expected,
            })
            .collect()
    }

    /// Results, in arrival order until [`ResultAggregator::sort`] is called
    pub fn results(&self) -> &[ProbeResult] {
        &self.results
    }

    /// Apply the canonical ordering in place
    pub fn sort(&mut self) {
        crate::report::sort_results(&mut self.results);
    }
}

/// Receive results until the aggregator is complete.
///
/// Stops early, with a warning, if every sender is gone before completion.
pub async fn collect(
    aggregator: &mut ResultAggregator,
    results: &mut mpsc::UnboundedReceiver<ProbeResult>,
    on_result: &dyn Fn(&ProbeResult),
) {
    while !aggregator.is_complete() {
        match results.recv().await {
            Some(result) => {
                on_result(&result);
                aggregator.record(result);
            }
            None => {
                warn!("Result channel closed before every probe reported");
                break;
            }
        }
    }
}

/// Non-interactive run: probe everything, then write the report to `destination`
pub async fn run_silent<P: Prober>(
    prober: Arc<P>,
    targets: &TargetSet,
    limit: Option<usize>,
    destination: &ReportDestination,
) -> Result<()> {
    let mut aggregator = ResultAggregator::new(targets);
    let mut rx = dispatch(prober, targets, limit);

    let progress = ProgressTracker::new(aggregator.total_expected() as u64);
    collect(&mut aggregator, &mut rx, &|result| progress.advance(&result.domain)).await;
    progress.finish_and_clear();

    aggregator.sort();
    MarkdownReport::write(destination, aggregator.results(), &targets.environments())?;

    Ok(())
}
