//! TUI session state and event loop
//!
//! [`App`] is the session: it owns the aggregator and every piece of view
//! state, and is only ever touched by the event loop in [`TuiRunner`].
//! Time is passed in explicitly so transitions can be driven in tests.

use crate::models::{ProbeResult, TargetSet};
use crate::report::{MarkdownReport, ReportDestination};
use crate::runner::{dispatch, Prober, ResultAggregator};
use crate::tui::events::{AppEvent, EventHandler, KeyAction};
use crate::tui::widgets::input::InputState;
use crate::utils::{CheckerError, Result, TuiError};
use crossterm::{
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io::{self, Stdout};
use std::path::PathBuf;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::mpsc;
use tracing::{debug, info, warn};

/// Pause between the last result and the results list
pub const COMPLETION_HOLD: Duration = Duration::from_secs(1);

/// How long the export confirmation stays up
pub const EXPORT_CONFIRMATION: Duration = Duration::from_secs(3);

/// Lines moved by PageUp/PageDown
const PAGE_SIZE: usize = 10;

/// Session view mode
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppState {
    /// Probes in flight, per-environment progress shown
    Loading,
    /// Sorted results list
    Browsing,
    /// Single result details
    Detail,
    /// Report filename prompt
    ExportPrompt,
    /// Export confirmation, back to browsing after a few seconds
    Exported,
    Terminated,
}

/// Session state
pub struct App {
    pub state: AppState,
    pub aggregator: ResultAggregator,

    // Results list
    pub selected: usize,
    pub filter: InputState,
    pub filtering: bool,

    // Detail view
    pub detail: Option<ProbeResult>,
    pub detail_scroll: u16,

    // Export
    pub export_input: InputState,
    pub report_path: PathBuf,
    pub last_error: Option<String>,

    environments: Vec<String>,
    completed_at: Option<Instant>,
    exported_at: Option<Instant>,
}

impl App {
    pub fn new(targets: &TargetSet, report_path: PathBuf) -> Self {
        Self {
            state: AppState::Loading,
            aggregator: ResultAggregator::new(targets),
            selected: 0,
            filter: InputState::new("Filter"),
            filtering: false,
            detail: None,
            detail_scroll: 0,
            export_input: InputState::new("Report file:"),
            report_path,
            last_error: None,
            environments: targets.environments(),
            completed_at: None,
            exported_at: None,
        }
    }

    /// Declared environments, in order
    pub fn environments(&self) -> &[String] {
        &self.environments
    }

    pub fn should_quit(&self) -> bool {
        self.state == AppState::Terminated
    }

    /// Check if app is in an input mode where text entry is expected
    pub fn is_input_mode(&self) -> bool {
        match self.state {
            AppState::ExportPrompt => true,
            AppState::Browsing => self.filtering,
            _ => false,
        }
    }

    /// Indices into the results that pass the current filter
    pub fn visible(&self) -> Vec<usize> {
        let query = self.filter.value.trim().to_lowercase();
        self.aggregator
            .results()
            .iter()
            .enumerate()
            .filter(|(_, r)| query.is_empty() || r.filter_value().to_lowercase().contains(&query))
            .map(|(i, _)| i)
            .collect()
    }

    /// Currently highlighted result, if any
    pub fn selected_result(&self) -> Option<&ProbeResult> {
        self.visible()
            .get(self.selected)
            .and_then(|&i| self.aggregator.results().get(i))
    }

    /// Feed one probe result into the session
    pub fn handle_probe_result(&mut self, result: ProbeResult, now: Instant) {
        if self.aggregator.record(result) && self.completed_at.is_none() {
            self.completed_at = Some(now);
        }
    }

    /// Drive timed transitions
    pub fn tick(&mut self, now: Instant) {
        match self.state {
            AppState::Loading if self.aggregator.is_complete() => {
                let completed_at = *self.completed_at.get_or_insert(now);
                if now.duration_since(completed_at) >= COMPLETION_HOLD {
                    self.aggregator.sort();
                    self.selected = 0;
                    self.state = AppState::Browsing;
                    debug!("All results received, browsing");
                }
            }
            AppState::Exported => {
                let shown_since = *self.exported_at.get_or_insert(now);
                if now.duration_since(shown_since) >= EXPORT_CONFIRMATION {
                    self.exported_at = None;
                    self.state = AppState::Browsing;
                }
            }
            _ => {}
        }
    }

    /// Handle keyboard input.
    ///
    /// A failed report write is recorded in `last_error` and returned, it
    /// ends the session.
    pub fn handle_key(&mut self, action: KeyAction, now: Instant) -> Result<()> {
        if action == KeyAction::Quit {
            self.state = AppState::Terminated;
            return Ok(());
        }

        match self.state {
            AppState::Browsing if self.filtering => self.handle_filter_key(action),
            AppState::Browsing => self.handle_browsing_key(action),
            AppState::Detail => self.handle_detail_key(action),
            AppState::ExportPrompt => return self.handle_export_key(action, now),
            AppState::Exported => self.handle_exported_key(action),
            AppState::Loading | AppState::Terminated => {}
        }

        Ok(())
    }

    /// The list stays usable under the export banner; anything but
    /// navigation dismisses the banner first.
    fn handle_exported_key(&mut self, action: KeyAction) {
        let navigation = matches!(
            action,
            KeyAction::Up
                | KeyAction::Down
                | KeyAction::PageUp
                | KeyAction::PageDown
                | KeyAction::Home
                | KeyAction::End
        );
        if !navigation {
            self.exported_at = None;
            self.state = AppState::Browsing;
        }
        self.handle_browsing_key(action);
    }

    fn handle_browsing_key(&mut self, action: KeyAction) {
        match action {
            KeyAction::Up => self.select_previous(1),
            KeyAction::Down => self.select_next(1),
            KeyAction::PageUp => self.select_previous(PAGE_SIZE),
            KeyAction::PageDown => self.select_next(PAGE_SIZE),
            KeyAction::Home => self.selected = 0,
            KeyAction::End => self.selected = self.visible().len().saturating_sub(1),
            KeyAction::Enter => {
                if let Some(result) = self.selected_result().cloned() {
                    self.detail = Some(result);
                    self.detail_scroll = 0;
                    self.state = AppState::Detail;
                }
            }
            KeyAction::Char('E') | KeyAction::Char('e') => {
                self.export_input =
                    InputState::new("Report file:").with_default(&self.report_path.to_string_lossy());
                self.state = AppState::ExportPrompt;
            }
            KeyAction::Char('/') => self.filtering = true,
            KeyAction::Back if !self.filter.is_empty() => {
                self.filter.clear();
                self.selected = 0;
            }
            _ => {}
        }
    }

    fn handle_filter_key(&mut self, action: KeyAction) {
        match action {
            KeyAction::Enter => self.filtering = false,
            KeyAction::Back => {
                self.filter.clear();
                self.filtering = false;
            }
            KeyAction::Up => self.select_previous(1),
            KeyAction::Down => self.select_next(1),
            KeyAction::Char(c) => self.filter.insert(c),
            KeyAction::Backspace => self.filter.delete_backward(),
            KeyAction::Delete => self.filter.delete_forward(),
            KeyAction::Left => self.filter.move_left(),
            KeyAction::Right => self.filter.move_right(),
            KeyAction::Home => self.filter.move_home(),
            KeyAction::End => self.filter.move_end(),
            _ => {}
        }
        self.clamp_selection();
    }

    fn handle_detail_key(&mut self, action: KeyAction) {
        match action {
            KeyAction::Enter | KeyAction::Back => {
                self.detail = None;
                self.state = AppState::Browsing;
            }
            KeyAction::Up => self.detail_scroll = self.detail_scroll.saturating_sub(1),
            KeyAction::Down => self.detail_scroll = self.detail_scroll.saturating_add(1),
            KeyAction::PageUp => {
                self.detail_scroll = self.detail_scroll.saturating_sub(PAGE_SIZE as u16)
            }
            KeyAction::PageDown => {
                self.detail_scroll = self.detail_scroll.saturating_add(PAGE_SIZE as u16)
            }
            KeyAction::Home => self.detail_scroll = 0,
            _ => {}
        }
    }

    fn handle_export_key(&mut self, action: KeyAction, now: Instant) -> Result<()> {
        match action {
            KeyAction::Back => self.state = AppState::Browsing,
            KeyAction::Enter => {
                let value = self.export_input.value.trim();
                let path = if value.is_empty() {
                    self.report_path.clone()
                } else {
                    PathBuf::from(value)
                };

                let destination = ReportDestination::File(path.clone());
                let written = MarkdownReport::write(
                    &destination,
                    self.aggregator.results(),
                    &self.environments,
                );
                if let Err(e) = written {
                    self.last_error = Some(e.to_string());
                    return Err(CheckerError::Report(e));
                }

                info!("Exported report to {}", path.display());
                self.report_path = path;
                self.exported_at = Some(now);
                self.state = AppState::Exported;
            }
            KeyAction::Char(c) => self.export_input.insert(c),
            KeyAction::Backspace => self.export_input.delete_backward(),
            KeyAction::Delete => self.export_input.delete_forward(),
            KeyAction::Left => self.export_input.move_left(),
            KeyAction::Right => self.export_input.move_right(),
            KeyAction::Home => self.export_input.move_home(),
            KeyAction::End => self.export_input.move_end(),
            _ => {}
        }
        Ok(())
    }

    fn select_previous(&mut self, step: usize) {
        self.selected = self.selected.saturating_sub(step);
    }

    fn select_next(&mut self, step: usize) {
        let last = self.visible().len().saturating_sub(1);
        self.selected = (self.selected + step).min(last);
    }

    fn clamp_selection(&mut self) {
        let last = self.visible().len().saturating_sub(1);
        self.selected = self.selected.min(last);
    }
}

/// Wait on the result channel until it is gone, then never resolve
async fn next_result(results: &mut Option<mpsc::UnboundedReceiver<ProbeResult>>) -> Option<ProbeResult> {
    match results {
        Some(rx) => rx.recv().await,
        None => std::future::pending().await,
    }
}

/// TUI runner that manages terminal and event loop
pub struct TuiRunner {
    terminal: Terminal<CrosstermBackend<Stdout>>,
    events: EventHandler,
}

impl TuiRunner {
    /// Set up the terminal: raw mode and alternate screen
    pub fn new() -> Result<Self> {
        let init_error = |e: io::Error| TuiError::Init {
            message: e.to_string(),
        };

        enable_raw_mode().map_err(init_error)?;
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen).map_err(init_error)?;

        let backend = CrosstermBackend::new(stdout);
        let terminal = Terminal::new(backend).map_err(init_error)?;

        let events = EventHandler::new(Duration::from_millis(100));

        Ok(Self { terminal, events })
    }

    /// Run the event loop until the user quits
    pub async fn run(
        &mut self,
        app: &mut App,
        results: mpsc::UnboundedReceiver<ProbeResult>,
    ) -> Result<()> {
        let mut results = Some(results);

        loop {
            self.terminal
                .draw(|f| crate::tui::ui::draw(f, app))
                .map_err(|e| TuiError::Draw {
                    message: e.to_string(),
                })?;

            if app.should_quit() {
                break;
            }

            tokio::select! {
                result = next_result(&mut results) => match result {
                    Some(result) => {
                        app.handle_probe_result(result, Instant::now());
                        if app.aggregator.is_complete() {
                            results = None;
                        }
                    }
                    None => {
                        warn!("Result channel closed before every probe reported");
                        results = None;
                    }
                },
                event = self.events.next() => match event {
                    Some(AppEvent::Key(key)) => {
                        // Use input mode for text entry states, navigation mode otherwise
                        let action = if app.is_input_mode() {
                            KeyAction::from_input(key)
                        } else {
                            KeyAction::from_navigation(key)
                        };
                        app.handle_key(action, Instant::now())?;
                    }
                    Some(AppEvent::Tick) => app.tick(Instant::now()),
                    Some(AppEvent::Resize(_, _)) => {
                        // Redrawn on the next iteration
                    }
                    None => break,
                },
            }
        }

        Ok(())
    }
}

impl Drop for TuiRunner {
    fn drop(&mut self) {
        // Restore terminal
        let _ = disable_raw_mode();
        let _ = execute!(self.terminal.backend_mut(), LeaveAlternateScreen);
        let _ = self.terminal.show_cursor();
    }
}

/// Interactive run: probe everything while showing progress, then browse
pub async fn run_interactive<P: Prober>(
    prober: Arc<P>,
    targets: &TargetSet,
    limit: Option<usize>,
    report_path: PathBuf,
) -> Result<()> {
    let mut app = App::new(targets, report_path);
    let mut runner = TuiRunner::new()?;
    let results = dispatch(prober, targets, limit);
    runner.run(&mut app, results).await
}
