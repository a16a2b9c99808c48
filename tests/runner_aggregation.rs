use chrono::{Duration as ChronoDuration, TimeZone, Utc};
use ssl_checker::checks::ProbeError;
use ssl_checker::models::{CertificateDetails, DistinguishedName, ProbeResult, Target, TargetSet};
use ssl_checker::report::ReportDestination;
use ssl_checker::runner::{collect, dispatch, run_silent, Prober, ResultAggregator};
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tempfile::TempDir;

/// Answers from a fixed table: days until expiry, or a timeout when absent
#[derive(Default)]
struct FakeProber {
    expiry_days: HashMap<String, i64>,
    delay: Duration,
    in_flight: AtomicUsize,
    max_in_flight: AtomicUsize,
}

impl FakeProber {
    fn with(entries: &[(&str, i64)]) -> Self {
        Self {
            expiry_days: entries.iter().map(|(d, n)| (d.to_string(), *n)).collect(),
            ..Default::default()
        }
    }

    fn delayed(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }
}

impl Prober for FakeProber {
    async fn probe(&self, target: &Target) -> ProbeResult {
        let now = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
        self.max_in_flight.fetch_max(now, Ordering::SeqCst);
        tokio::time::sleep(self.delay).await;
        self.in_flight.fetch_sub(1, Ordering::SeqCst);

        match self.expiry_days.get(&target.domain) {
            Some(days) => {
                let base = Utc.with_ymd_and_hms(2030, 1, 1, 0, 0, 0).unwrap();
                ProbeResult::success(
                    &target.domain,
                    &target.environment,
                    CertificateDetails {
                        not_before: base - ChronoDuration::days(90),
                        not_after: base + ChronoDuration::days(*days),
                        issuer: DistinguishedName {
                            common_name: Some("Fake CA".to_string()),
                            ..Default::default()
                        },
                        subject: DistinguishedName::default(),
                        subject_alt_names: vec![target.domain.clone()],
                        serial_number: Default::default(),
                    },
                )
            }
            None => ProbeResult::failure(
                &target.domain,
                &target.environment,
                ProbeError::Timeout { seconds: 5 },
            ),
        }
    }
}

#[tokio::test]
async fn test_every_target_reports_exactly_once() {
    let targets = TargetSet::new()
        .with_environment("prod", ["a.example", "b.example", "a.example"])
        .with_environment("dev", ["c.example"]);
    let prober = Arc::new(FakeProber::with(&[("a.example", 10), ("c.example", 5)]));

    let mut aggregator = ResultAggregator::new(&targets);
    let mut rx = dispatch(prober, &targets, None);
    collect(&mut aggregator, &mut rx, &|_| {}).await;

    assert!(aggregator.is_complete());
    assert_eq!(aggregator.received("prod"), 3);
    assert_eq!(aggregator.received("dev"), 1);
    assert_eq!(aggregator.results().len(), aggregator.total_expected());
}

#[tokio::test]
async fn test_environment_of_timeouts_still_completes() {
    let targets = TargetSet::new()
        .with_environment("prod", ["a.example"])
        .with_environment("broken", ["x.example", "y.example"]);
    let prober = Arc::new(FakeProber::with(&[("a.example", 10)]));

    let mut aggregator = ResultAggregator::new(&targets);
    let mut rx = dispatch(prober, &targets, None);
    collect(&mut aggregator, &mut rx, &|_| {}).await;

    assert!(aggregator.is_complete());
    let broken: Vec<_> = aggregator
        .results()
        .iter()
        .filter(|r| r.environment == "broken")
        .collect();
    assert_eq!(broken.len(), 2);
    assert!(broken.iter().all(|r| r.is_error()));
}

#[tokio::test]
async fn test_concurrency_limit_is_respected() {
    let domains: Vec<String> = (0..12).map(|i| format!("host{}.example", i)).collect();
    let targets = TargetSet::new().with_environment("prod", domains);
    let prober = Arc::new(FakeProber::default().delayed(Duration::from_millis(20)));

    let mut aggregator = ResultAggregator::new(&targets);
    let mut rx = dispatch(Arc::clone(&prober), &targets, Some(3));
    collect(&mut aggregator, &mut rx, &|_| {}).await;

    assert!(aggregator.is_complete());
    assert!(prober.max_in_flight.load(Ordering::SeqCst) <= 3);
}

#[tokio::test]
async fn test_sort_after_collection() {
    let targets = TargetSet::new().with_environment(
        "prod",
        ["late.example", "broken.example", "soon.example"],
    );
    let prober = Arc::new(FakeProber::with(&[("late.example", 300), ("soon.example", 3)]));

    let mut aggregator = ResultAggregator::new(&targets);
    let mut rx = dispatch(prober, &targets, None);
    collect(&mut aggregator, &mut rx, &|_| {}).await;
    aggregator.sort();

    let order: Vec<&str> = aggregator.results().iter().map(|r| r.domain.as_str()).collect();
    assert_eq!(order, vec!["soon.example", "late.example", "broken.example"]);
}

#[tokio::test]
async fn test_collect_reports_each_arrival() {
    let targets = TargetSet::new().with_environment("prod", ["a.example", "b.example"]);
    let prober = Arc::new(FakeProber::with(&[("a.example", 1)]));
    let seen = AtomicUsize::new(0);

    let mut aggregator = ResultAggregator::new(&targets);
    let mut rx = dispatch(prober, &targets, None);
    collect(&mut aggregator, &mut rx, &|_| {
        seen.fetch_add(1, Ordering::SeqCst);
    })
    .await;

    assert_eq!(seen.load(Ordering::SeqCst), 2);
}

#[tokio::test]
async fn test_no_targets_completes_immediately() {
    let targets = TargetSet::new();
    let mut aggregator = ResultAggregator::new(&targets);
    let mut rx = dispatch(Arc::new(FakeProber::default()), &targets, None);

    collect(&mut aggregator, &mut rx, &|_| {}).await;
    assert!(aggregator.is_complete());
    assert!(aggregator.results().is_empty());
}

#[tokio::test]
async fn test_run_silent_writes_sorted_report() {
    let targets = TargetSet::new()
        .with_environment("prod", ["late.example", "down.example", "soon.example"])
        .with_environment("empty", Vec::<String>::new());
    let prober = Arc::new(FakeProber::with(&[("late.example", 300), ("soon.example", 3)]));

    let dir = TempDir::new().unwrap();
    let path = dir.path().join("report.md");
    run_silent(prober, &targets, Some(2), &ReportDestination::File(path.clone()))
        .await
        .unwrap();
    let report = std::fs::read_to_string(&path).unwrap();

    let soon = report.find("soon.example").unwrap();
    let late = report.find("late.example").unwrap();
    let down = report.find("down.example").unwrap();
    assert!(soon < late && late < down);
    assert!(report.contains("connection timeout"));
    assert!(report.contains("## Domains for empty"));
}
