//! Results list rows
//!
//! Each row is the domain on the left and a short summary pushed to the
//! right edge: `<issuer CN> | <expiry>` or `Error: <known error>`.

use crate::models::ProbeResult;
use crate::report::classify;
use chrono::{DateTime, Months, Utc};
use ratatui::{
    style::{Color, Modifier, Style},
    text::{Line, Span},
};

/// How close a certificate is to expiry
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExpiryBand {
    /// Less than a month left, or already expired
    Critical,
    /// Less than four months left
    Warning,
    Ok,
}

impl ExpiryBand {
    pub fn of(not_after: DateTime<Utc>, now: DateTime<Utc>) -> Self {
        let within = |months: u32| {
            now.checked_add_months(Months::new(months))
                .map(|limit| not_after < limit)
                .unwrap_or(false)
        };

        if within(1) {
            ExpiryBand::Critical
        } else if within(4) {
            ExpiryBand::Warning
        } else {
            ExpiryBand::Ok
        }
    }

    pub fn color(self) -> Color {
        match self {
            ExpiryBand::Critical => Color::Red,
            ExpiryBand::Warning => Color::Yellow,
            ExpiryBand::Ok => Color::Green,
        }
    }
}

/// Right-hand summary of a result as styled spans
fn summary(result: &ProbeResult, now: DateTime<Utc>) -> Vec<Span<'static>> {
    match &result.outcome {
        Ok(details) => {
            let issuer = details.issuer.common_name.clone().unwrap_or_default();
            let band = ExpiryBand::of(details.not_after, now);
            vec![
                Span::raw(format!("{} | ", issuer)),
                Span::styled(
                    details.not_after.format("%Y-%m-%d").to_string(),
                    Style::default().fg(band.color()),
                ),
            ]
        }
        Err(error) => vec![
            Span::styled("Error: ", Style::default().fg(Color::Yellow)),
            Span::styled(classify(error), Style::default().fg(Color::Red)),
        ],
    }
}

/// Drop characters from the front of `spans` until they fit in `width`,
/// marking the cut with `…`
fn truncate_front(spans: Vec<Span<'static>>, width: usize) -> Vec<Span<'static>> {
    let total: usize = spans.iter().map(|s| s.content.chars().count()).sum();
    if total <= width {
        return spans;
    }
    if width == 0 {
        return Vec::new();
    }

    let mut skip = total - width + 1;
    let mut out = vec![Span::raw("…")];
    for span in spans {
        let len = span.content.chars().count();
        if skip >= len {
            skip -= len;
            continue;
        }
        let kept: String = span.content.chars().skip(skip).collect();
        skip = 0;
        out.push(Span::styled(kept, span.style));
    }
    out
}

/// Build one list row for `width` columns
pub fn result_row(result: &ProbeResult, width: usize, selected: bool, now: DateTime<Utc>) -> Line<'static> {
    let marker = if selected { "│ " } else { "  " };
    let title_style = if selected {
        Style::default()
            .fg(Color::Magenta)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default()
    };

    let title = result.domain.clone();
    let used = marker.chars().count() + title.chars().count();
    // Keep one column between title and summary
    let room = width.saturating_sub(used + 1);

    let details = truncate_front(summary(result, now), room);
    let details_width: usize = details.iter().map(|s| s.content.chars().count()).sum();
    let padding = width.saturating_sub(used + details_width);

    let mut spans = vec![
        Span::styled(marker, Style::default().fg(Color::Magenta)),
        Span::styled(title, title_style),
        Span::raw(" ".repeat(padding)),
    ];
    spans.extend(details);
    Line::from(spans)
}
