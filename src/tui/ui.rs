//! Main UI rendering

use crate::tui::app::{App, AppState};
use crate::tui::widgets::{
    details::detail_lines,
    input::{render_input, InputDialog},
    progress::ProgressWidget,
    results::result_row,
    status::{HeaderBar, StatusBar, StatusMode},
};
use chrono::Utc;
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame,
};

const VERSION: &str = env!("CARGO_PKG_VERSION");
const RESULTS_TITLE: &str = " SSL queries results ";

/// Main draw function
pub fn draw(f: &mut Frame, app: &App) {
    let size = f.area();

    // Main layout: header, content, status bar
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(2), // Header
            Constraint::Min(5),    // Content
            Constraint::Length(2), // Status bar
        ])
        .split(size);

    let total = app.aggregator.total_expected();
    let received = app.aggregator.results().len();
    let header = HeaderBar::new("SSL Checker", VERSION)
        .with_summary(format!("{}/{} targets", received, total));
    f.render_widget(header, chunks[0]);

    match app.state {
        AppState::Loading => render_loading(f, chunks[1], app),
        AppState::Browsing | AppState::Exported => render_results(f, chunks[1], app),
        AppState::Detail => render_detail(f, chunks[1], app),
        AppState::ExportPrompt => {
            render_results(f, chunks[1], app);
            render_export_dialog(f, chunks[1], app);
        }
        AppState::Terminated => {}
    }

    let status = match app.state {
        AppState::Loading | AppState::Terminated => StatusBar::new(StatusMode::Loading),
        AppState::Browsing if app.filtering => StatusBar::new(StatusMode::Filtering),
        AppState::Browsing => StatusBar::new(StatusMode::Browsing),
        AppState::Detail => StatusBar::new(StatusMode::Detail),
        AppState::ExportPrompt => StatusBar::new(StatusMode::ExportPrompt),
        AppState::Exported => {
            StatusBar::new(StatusMode::Exported).with_message("Export successful!", Color::Green)
        }
    };
    f.render_widget(status, chunks[2]);
}

fn render_loading(f: &mut Frame, area: Rect, app: &App) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan))
        .title(" Running SSL queries ");

    let inner = block.inner(area);
    f.render_widget(block, area);

    let progress = app.aggregator.progress();
    f.render_widget(ProgressWidget::new(&progress), inner);
}

fn render_results(f: &mut Frame, area: Rect, app: &App) {
    let show_filter = app.filtering || !app.filter.is_empty();

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan))
        .title(Span::styled(
            RESULTS_TITLE,
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        ));
    let inner = block.inner(area);
    f.render_widget(block, area);

    let (filter_area, list_area) = if show_filter {
        let rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(1), Constraint::Min(0)])
            .split(inner);
        (Some(rows[0]), rows[1])
    } else {
        (None, inner)
    };

    if let Some(filter_area) = filter_area {
        let cursor = if app.filtering { "█" } else { "" };
        let line = Line::from(vec![
            Span::styled("Filter: ", Style::default().fg(Color::Yellow)),
            Span::raw(app.filter.value.clone()),
            Span::raw(cursor),
        ]);
        f.render_widget(Paragraph::new(line), filter_area);
    }

    let visible = app.visible();
    if visible.is_empty() {
        let text = if app.aggregator.results().is_empty() {
            "No targets"
        } else {
            "No matching results"
        };
        f.render_widget(
            Paragraph::new(Span::styled(text, Style::default().fg(Color::DarkGray))),
            list_area,
        );
        return;
    }

    let height = list_area.height.max(1) as usize;
    let offset = app.selected.saturating_sub(height - 1);
    let now = Utc::now();
    let results = app.aggregator.results();

    let lines: Vec<Line> = visible
        .iter()
        .enumerate()
        .skip(offset)
        .take(height)
        .map(|(row, &index)| {
            result_row(
                &results[index],
                list_area.width as usize,
                row == app.selected,
                now,
            )
        })
        .collect();

    f.render_widget(Paragraph::new(lines), list_area);
}

fn render_detail(f: &mut Frame, area: Rect, app: &App) {
    let Some(result) = app.detail.as_ref() else {
        return;
    };

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Magenta))
        .title(format!(" {} ", result.domain));

    let paragraph = Paragraph::new(detail_lines(result))
        .block(block)
        .wrap(Wrap { trim: false })
        .scroll((app.detail_scroll, 0));

    f.render_widget(paragraph, area);
}

fn render_export_dialog(f: &mut Frame, area: Rect, app: &App) {
    let dialog = InputDialog::new().width(60);
    let dialog_area = dialog.centered_area(area);

    f.render_widget(Clear, dialog_area);
    render_input(dialog_area, f.buffer_mut(), &app.export_input);

    let hint_area = Rect::new(
        dialog_area.x,
        (dialog_area.y + dialog_area.height).min(area.y + area.height.saturating_sub(1)),
        dialog_area.width,
        1,
    );
    f.render_widget(Clear, hint_area);
    f.render_widget(
        Paragraph::new(Span::styled(
            "Press Enter to confirm or escape to cancel",
            Style::default().fg(Color::DarkGray),
        )),
        hint_area,
    );
}
