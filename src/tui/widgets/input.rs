//! Input widget for text entry

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Widget},
};

/// Input field state.
///
/// `cursor` counts characters, not bytes.
#[derive(Debug, Clone)]
pub struct InputState {
    pub value: String,
    pub cursor: usize,
    pub prompt: String,
    pub error: Option<String>,
}

impl Default for InputState {
    fn default() -> Self {
        Self {
            value: String::new(),
            cursor: 0,
            prompt: "Enter value".to_string(),
            error: None,
        }
    }
}

impl InputState {
    pub fn new(prompt: &str) -> Self {
        Self {
            prompt: prompt.to_string(),
            ..Default::default()
        }
    }

    pub fn with_default(mut self, default: &str) -> Self {
        self.value = default.to_string();
        self.cursor = default.chars().count();
        self
    }

    fn byte_index(&self, cursor: usize) -> usize {
        self.value
            .char_indices()
            .nth(cursor)
            .map(|(i, _)| i)
            .unwrap_or(self.value.len())
    }

    fn len(&self) -> usize {
        self.value.chars().count()
    }

    pub fn insert(&mut self, c: char) {
        let at = self.byte_index(self.cursor);
        self.value.insert(at, c);
        self.cursor += 1;
        self.error = None;
    }

    pub fn delete_backward(&mut self) {
        if self.cursor > 0 {
            self.cursor -= 1;
            let at = self.byte_index(self.cursor);
            self.value.remove(at);
            self.error = None;
        }
    }

    pub fn delete_forward(&mut self) {
        if self.cursor < self.len() {
            let at = self.byte_index(self.cursor);
            self.value.remove(at);
            self.error = None;
        }
    }

    pub fn move_left(&mut self) {
        self.cursor = self.cursor.saturating_sub(1);
    }

    pub fn move_right(&mut self) {
        if self.cursor < self.len() {
            self.cursor += 1;
        }
    }

    pub fn move_home(&mut self) {
        self.cursor = 0;
    }

    pub fn move_end(&mut self) {
        self.cursor = self.len();
    }

    pub fn clear(&mut self) {
        self.value.clear();
        self.cursor = 0;
        self.error = None;
    }

    pub fn set_error(&mut self, error: &str) {
        self.error = Some(error.to_string());
    }

    pub fn is_empty(&self) -> bool {
        self.value.is_empty()
    }

    /// Split the value around the cursor: before, under, after
    fn split_at_cursor(&self) -> (&str, &str, &str) {
        let start = self.byte_index(self.cursor);
        let end = self.byte_index(self.cursor + 1);
        (
            &self.value[..start],
            &self.value[start..end],
            &self.value[end..],
        )
    }
}

/// Render the input field with a block cursor
pub fn render_input(area: Rect, buf: &mut Buffer, state: &InputState) {
    Clear.render(area, buf);

    let value_style = Style::default().fg(Color::White);
    let cursor_style = Style::default().bg(Color::White).fg(Color::Black);

    let (before, under, after) = state.split_at_cursor();
    let input_line = Line::from(vec![
        Span::styled(before, value_style),
        Span::styled(if under.is_empty() { " " } else { under }, cursor_style),
        Span::styled(after, value_style),
    ]);

    let border_color = if state.error.is_some() {
        Color::Red
    } else {
        Color::Cyan
    };

    let title = match &state.error {
        Some(error) => format!(" {} - {} ", state.prompt, error),
        None => format!(" {} ", state.prompt),
    };

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(border_color))
        .title(Span::styled(
            title,
            Style::default()
                .fg(border_color)
                .add_modifier(Modifier::BOLD),
        ));

    Paragraph::new(input_line).block(block).render(area, buf);
}

/// Input dialog that centers in the terminal
pub struct InputDialog {
    pub width: u16,
    pub height: u16,
}

impl InputDialog {
    pub fn new() -> Self {
        Self {
            width: 60,
            height: 3,
        }
    }

    pub fn width(mut self, width: u16) -> Self {
        self.width = width;
        self
    }

    /// Calculate centered area for the dialog
    pub fn centered_area(&self, area: Rect) -> Rect {
        let width = self.width.min(area.width.saturating_sub(4));
        let height = self.height.min(area.height);
        let x = area.x + (area.width.saturating_sub(width)) / 2;
        let y = area.y + (area.height.saturating_sub(height)) / 2;

        Rect::new(x, y, width, height)
    }
}

impl Default for InputDialog {
    fn default() -> Self {
        Self::new()
    }
}
