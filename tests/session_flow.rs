use chrono::{TimeZone, Utc};
use ssl_checker::checks::ProbeError;
use ssl_checker::models::{CertificateDetails, DistinguishedName, ProbeResult, TargetSet};
use ssl_checker::tui::app::{COMPLETION_HOLD, EXPORT_CONFIRMATION};
use ssl_checker::tui::events::KeyAction;
use ssl_checker::tui::{App, AppState};
use std::path::PathBuf;
use std::time::{Duration, Instant};
use tempfile::TempDir;
use x509_parser::num_bigint::BigUint;

fn dated(env: &str, domain: &str, year: i32) -> ProbeResult {
    ProbeResult::success(
        domain,
        env,
        CertificateDetails {
            not_before: Utc.with_ymd_and_hms(2020, 1, 1, 0, 0, 0).unwrap(),
            not_after: Utc.with_ymd_and_hms(year, 1, 1, 0, 0, 0).unwrap(),
            issuer: DistinguishedName {
                common_name: Some("R3".to_string()),
                ..Default::default()
            },
            subject: DistinguishedName::default(),
            subject_alt_names: vec![],
            serial_number: BigUint::from(3u32),
        },
    )
}

fn failed(env: &str, domain: &str) -> ProbeResult {
    ProbeResult::failure(domain, env, ProbeError::Timeout { seconds: 5 })
}

fn targets() -> TargetSet {
    TargetSet::new()
        .with_environment("prod", ["broken.example", "late.example"])
        .with_environment("dev", ["soon.example"])
}

/// A session that has received every result and moved on to browsing
fn browsing(report_path: PathBuf) -> (App, Instant) {
    let mut app = App::new(&targets(), report_path);
    let start = Instant::now();

    app.handle_probe_result(failed("prod", "broken.example"), start);
    app.handle_probe_result(dated("prod", "late.example", 2040), start);
    app.handle_probe_result(dated("dev", "soon.example", 2030), start);
    app.tick(start + COMPLETION_HOLD);
    assert_eq!(app.state, AppState::Browsing);

    (app, start + COMPLETION_HOLD)
}

fn domains(app: &App) -> Vec<String> {
    app.aggregator
        .results()
        .iter()
        .map(|r| r.domain.clone())
        .collect()
}

#[test]
fn test_stays_loading_until_every_result() {
    let mut app = App::new(&targets(), PathBuf::from("report.md"));
    let start = Instant::now();

    app.handle_probe_result(dated("dev", "soon.example", 2030), start);
    app.tick(start + Duration::from_secs(30));
    assert_eq!(app.state, AppState::Loading);

    let progress = app.aggregator.progress();
    assert_eq!(progress[0].environment, "prod");
    assert_eq!((progress[0].received, progress[0].expected), (0, 2));
    assert_eq!((progress[1].received, progress[1].expected), (1, 1));
}

#[test]
fn test_results_sorted_on_completion() {
    let (app, _) = browsing(PathBuf::from("report.md"));
    assert_eq!(
        domains(&app),
        vec!["soon.example", "late.example", "broken.example"]
    );
    assert_eq!(app.selected, 0);
}

#[test]
fn test_detail_round_trip() {
    let (mut app, now) = browsing(PathBuf::from("report.md"));

    app.handle_key(KeyAction::Down, now).unwrap();
    app.handle_key(KeyAction::Enter, now).unwrap();
    assert_eq!(app.state, AppState::Detail);
    assert_eq!(app.detail.as_ref().unwrap().domain, "late.example");

    // List navigation is suspended while the detail page is up
    app.handle_key(KeyAction::Down, now).unwrap();
    assert_eq!(app.selected, 1);
    assert_eq!(app.detail_scroll, 1);

    app.handle_key(KeyAction::Back, now).unwrap();
    assert_eq!(app.state, AppState::Browsing);
    assert!(app.detail.is_none());
}

#[test]
fn test_navigation_is_clamped() {
    let (mut app, now) = browsing(PathBuf::from("report.md"));

    app.handle_key(KeyAction::PageDown, now).unwrap();
    assert_eq!(app.selected, 2);
    app.handle_key(KeyAction::Down, now).unwrap();
    assert_eq!(app.selected, 2);
    app.handle_key(KeyAction::Home, now).unwrap();
    assert_eq!(app.selected, 0);
    app.handle_key(KeyAction::Up, now).unwrap();
    assert_eq!(app.selected, 0);
    app.handle_key(KeyAction::End, now).unwrap();
    assert_eq!(app.selected, 2);
}

#[test]
fn test_export_with_default_path() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("report.md");
    let (mut app, now) = browsing(path.clone());

    app.handle_key(KeyAction::Char('E'), now).unwrap();
    assert_eq!(app.state, AppState::ExportPrompt);
    app.handle_key(KeyAction::Enter, now).unwrap();
    assert_eq!(app.state, AppState::Exported);

    let report = std::fs::read_to_string(&path).unwrap();
    assert!(report.contains("## Domains for prod"));
    assert!(report.contains("## Domains for dev"));
    let late = report.find("late.example").unwrap();
    let broken = report.find("broken.example").unwrap();
    assert!(late < broken);

    app.tick(now + Duration::from_secs(1));
    assert_eq!(app.state, AppState::Exported);
    app.tick(now + EXPORT_CONFIRMATION);
    assert_eq!(app.state, AppState::Browsing);
}

#[test]
fn test_export_with_edited_path() {
    let dir = TempDir::new().unwrap();
    let (mut app, now) = browsing(dir.path().join("default.md"));

    app.handle_key(KeyAction::Char('E'), now).unwrap();
    for _ in 0.."default.md".len() {
        app.handle_key(KeyAction::Backspace, now).unwrap();
    }
    for c in "custom.md".chars() {
        app.handle_key(KeyAction::Char(c), now).unwrap();
    }
    app.handle_key(KeyAction::Enter, now).unwrap();

    assert!(dir.path().join("custom.md").exists());
    assert!(!dir.path().join("default.md").exists());
    assert_eq!(app.report_path, dir.path().join("custom.md"));
}

#[test]
fn test_export_cancel_writes_nothing() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("report.md");
    let (mut app, now) = browsing(path.clone());

    app.handle_key(KeyAction::Char('E'), now).unwrap();
    app.handle_key(KeyAction::Back, now).unwrap();

    assert_eq!(app.state, AppState::Browsing);
    assert!(!path.exists());
}

#[test]
fn test_export_failure_is_fatal() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("no-such-dir").join("report.md");
    let (mut app, now) = browsing(path);

    app.handle_key(KeyAction::Char('E'), now).unwrap();
    let err = app.handle_key(KeyAction::Enter, now).unwrap_err();

    assert!(err.to_string().contains("no-such-dir"));
    assert!(app.last_error.is_some());
}

#[test]
fn test_filter_narrows_list() {
    let (mut app, now) = browsing(PathBuf::from("report.md"));

    app.handle_key(KeyAction::Char('/'), now).unwrap();
    for c in "LATE".chars() {
        app.handle_key(KeyAction::Char(c), now).unwrap();
    }
    app.handle_key(KeyAction::Enter, now).unwrap();

    assert!(!app.filtering);
    assert_eq!(app.visible().len(), 1);
    assert_eq!(app.selected_result().unwrap().domain, "late.example");

    app.handle_key(KeyAction::Back, now).unwrap();
    assert_eq!(app.visible().len(), 3);
}

#[test]
fn test_quit_from_any_state() {
    let (mut app, now) = browsing(PathBuf::from("report.md"));
    app.handle_key(KeyAction::Enter, now).unwrap();
    assert_eq!(app.state, AppState::Detail);

    app.handle_key(KeyAction::Quit, now).unwrap();
    assert!(app.should_quit());
}

#[test]
fn test_navigation_under_export_banner() {
    let dir = TempDir::new().unwrap();
    let (mut app, now) = browsing(dir.path().join("report.md"));

    app.handle_key(KeyAction::Char('E'), now).unwrap();
    app.handle_key(KeyAction::Enter, now).unwrap();
    assert_eq!(app.state, AppState::Exported);

    // Moving through the list keeps the banner up
    app.handle_key(KeyAction::Down, now).unwrap();
    assert_eq!(app.selected, 1);
    assert_eq!(app.state, AppState::Exported);

    // Opening a result dismisses it
    app.handle_key(KeyAction::Enter, now).unwrap();
    assert_eq!(app.state, AppState::Detail);
    assert_eq!(app.detail.as_ref().unwrap().domain, "late.example");

    app.tick(now + EXPORT_CONFIRMATION);
    assert_eq!(app.state, AppState::Detail);
}
