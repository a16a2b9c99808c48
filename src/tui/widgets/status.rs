//! Status and header bars

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Widget},
};

/// Status bar mode/context
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum StatusMode {
    Loading,
    Browsing,
    Filtering,
    Detail,
    ExportPrompt,
    Exported,
}

/// Status bar widget showing context-sensitive help
pub struct StatusBar {
    mode: StatusMode,
    message: Option<(String, Color)>,
}

impl StatusBar {
    pub fn new(mode: StatusMode) -> Self {
        Self {
            mode,
            message: None,
        }
    }

    pub fn with_message(mut self, message: &str, color: Color) -> Self {
        self.message = Some((message.to_string(), color));
        self
    }

    fn help_text(&self) -> Vec<(&'static str, &'static str)> {
        match self.mode {
            StatusMode::Loading => vec![("q", "Quit")],
            StatusMode::Browsing => vec![
                ("↑↓", "Navigate"),
                ("Enter", "Details"),
                ("/", "Filter"),
                ("E", "Export"),
                ("q", "Quit"),
            ],
            StatusMode::Filtering => vec![("Enter", "Apply"), ("Esc", "Clear")],
            StatusMode::Detail => vec![("↑↓", "Scroll"), ("Enter", "Back"), ("q", "Quit")],
            StatusMode::ExportPrompt => vec![("Enter", "Confirm"), ("Esc", "Cancel")],
            StatusMode::Exported => vec![("↑↓", "Navigate"), ("q", "Quit")],
        }
    }
}

impl Widget for StatusBar {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let mut spans = vec![];

        for (i, (key, action)) in self.help_text().iter().enumerate() {
            if i > 0 {
                spans.push(Span::styled("  │  ", Style::default().fg(Color::DarkGray)));
            }
            spans.push(Span::styled(
                format!(" {} ", key),
                Style::default()
                    .fg(Color::Black)
                    .bg(Color::Cyan)
                    .add_modifier(Modifier::BOLD),
            ));
            spans.push(Span::raw(" "));
            spans.push(Span::styled(*action, Style::default().fg(Color::White)));
        }

        if let Some((msg, color)) = self.message {
            let help_width: usize = spans.iter().map(|s| s.width()).sum();
            if help_width + msg.chars().count() + 5 < area.width as usize {
                spans.push(Span::styled("  │  ", Style::default().fg(Color::DarkGray)));
                spans.push(Span::styled(
                    msg,
                    Style::default().fg(color).add_modifier(Modifier::BOLD),
                ));
            }
        }

        let block = Block::default()
            .borders(Borders::TOP)
            .border_style(Style::default().fg(Color::DarkGray));

        Paragraph::new(Line::from(spans)).block(block).render(area, buf);
    }
}

/// Header bar with title and a short summary on the right
pub struct HeaderBar<'a> {
    title: &'a str,
    version: &'a str,
    summary: Option<String>,
}

impl<'a> HeaderBar<'a> {
    pub fn new(title: &'a str, version: &'a str) -> Self {
        Self {
            title,
            version,
            summary: None,
        }
    }

    pub fn with_summary(mut self, summary: String) -> Self {
        self.summary = Some(summary);
        self
    }
}

impl Widget for HeaderBar<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let mut spans = vec![
            Span::styled(
                format!("  {} ", self.title),
                Style::default()
                    .fg(Color::Cyan)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::styled(format!("v{}", self.version), Style::default().fg(Color::DarkGray)),
        ];

        if let Some(summary) = self.summary {
            spans.push(Span::styled("  │  ", Style::default().fg(Color::DarkGray)));
            spans.push(Span::styled(summary, Style::default().fg(Color::Yellow)));
        }

        let block = Block::default()
            .borders(Borders::BOTTOM)
            .border_style(Style::default().fg(Color::DarkGray));

        Paragraph::new(Line::from(spans)).block(block).render(area, buf);
    }
}
