//! Per-environment progress gauges shown while probes are in flight

use crate::runner::EnvironmentProgress;
use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Style},
    text::Span,
    widgets::{Gauge, Paragraph, Widget},
};

/// One labelled gauge per environment
pub struct ProgressWidget<'a> {
    progress: &'a [EnvironmentProgress],
}

impl<'a> ProgressWidget<'a> {
    pub fn new(progress: &'a [EnvironmentProgress]) -> Self {
        Self { progress }
    }
}

impl Widget for ProgressWidget<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let label_width = self
            .progress
            .iter()
            .map(|p| p.environment.chars().count())
            .max()
            .unwrap_or(0) as u16
            + 2;

        let rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints(
                self.progress
                    .iter()
                    .map(|_| Constraint::Length(1))
                    .chain(std::iter::once(Constraint::Min(0))),
            )
            .split(area);

        for (progress, row) in self.progress.iter().zip(rows.iter()) {
            let cols = Layout::default()
                .direction(Direction::Horizontal)
                .constraints([Constraint::Length(label_width), Constraint::Min(10)])
                .split(*row);

            Paragraph::new(Span::styled(
                progress.environment.clone(),
                Style::default().fg(Color::Cyan),
            ))
            .render(cols[0], buf);

            let color = if progress.received == progress.expected {
                Color::Green
            } else {
                Color::Blue
            };

            Gauge::default()
                .gauge_style(Style::default().fg(color).bg(Color::DarkGray))
                .ratio(progress.ratio().clamp(0.0, 1.0))
                .label(format!("{}/{}", progress.received, progress.expected))
                .render(cols[1], buf);
        }
    }
}
