//! Event handling for TUI

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use std::time::Duration;
use tokio::sync::mpsc;

/// Terminal events
#[derive(Debug, Clone)]
pub enum AppEvent {
    /// Keyboard input
    Key(KeyEvent),
    /// Tick for timed transitions and redraws
    Tick,
    /// Resize event
    Resize(u16, u16),
}

/// Event handler that polls for keyboard events
pub struct EventHandler {
    rx: mpsc::UnboundedReceiver<AppEvent>,
}

impl EventHandler {
    /// Create a new event handler
    pub fn new(tick_rate: Duration) -> Self {
        let (tx, rx) = mpsc::unbounded_channel();

        // crossterm polling blocks, keep it off the async workers
        tokio::task::spawn_blocking(move || loop {
            let app_event = if event::poll(tick_rate).unwrap_or(false) {
                match event::read() {
                    Ok(Event::Key(key)) if key.kind == KeyEventKind::Press => AppEvent::Key(key),
                    Ok(Event::Resize(w, h)) => AppEvent::Resize(w, h),
                    _ => continue,
                }
            } else {
                AppEvent::Tick
            };

            if tx.send(app_event).is_err() {
                break;
            }
        });

        Self { rx }
    }

    /// Get the next event
    pub async fn next(&mut self) -> Option<AppEvent> {
        self.rx.recv().await
    }
}

/// Key action abstraction
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum KeyAction {
    Quit,
    Back,
    Up,
    Down,
    Left,
    Right,
    Enter,
    Char(char),
    Backspace,
    Delete,
    Home,
    End,
    PageUp,
    PageDown,
    None,
}

impl KeyAction {
    /// Convert key event to action for navigation mode (list, detail view)
    /// Uses vim-style navigation keys (j/k/g/G)
    pub fn from_navigation(key: KeyEvent) -> Self {
        match key.code {
            KeyCode::Char('q') if key.modifiers.is_empty() => KeyAction::Quit,
            KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => KeyAction::Quit,
            KeyCode::Esc => KeyAction::Back,
            KeyCode::Up | KeyCode::Char('k') => KeyAction::Up,
            KeyCode::Down | KeyCode::Char('j') => KeyAction::Down,
            KeyCode::Left => KeyAction::Left,
            KeyCode::Right => KeyAction::Right,
            KeyCode::Enter => KeyAction::Enter,
            KeyCode::Backspace => KeyAction::Backspace,
            KeyCode::Delete => KeyAction::Delete,
            KeyCode::Home | KeyCode::Char('g') => KeyAction::Home,
            KeyCode::End | KeyCode::Char('G') => KeyAction::End,
            KeyCode::PageUp => KeyAction::PageUp,
            KeyCode::PageDown => KeyAction::PageDown,
            KeyCode::Char(c) => KeyAction::Char(c),
            _ => KeyAction::None,
        }
    }

    /// Convert key event to action for input mode (text entry)
    /// All characters pass through, only arrow keys for cursor movement
    pub fn from_input(key: KeyEvent) -> Self {
        match key.code {
            KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => KeyAction::Quit,
            KeyCode::Esc => KeyAction::Back,
            KeyCode::Up => KeyAction::Up,
            KeyCode::Down => KeyAction::Down,
            KeyCode::Left => KeyAction::Left,
            KeyCode::Right => KeyAction::Right,
            KeyCode::Enter => KeyAction::Enter,
            KeyCode::Backspace => KeyAction::Backspace,
            KeyCode::Delete => KeyAction::Delete,
            KeyCode::Home => KeyAction::Home,
            KeyCode::End => KeyAction::End,
            KeyCode::Char(c) => KeyAction::Char(c),
            _ => KeyAction::None,
        }
    }
}
