//! Text input widget for single-line text entry.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::{
    prelude::*,
    widgets::{Block, Borders},
};

/// Single-line text input widget
pub struct TextInputWidget<'a> {
    /// Current input value
    value: &'a str,
    /// Cursor position (character index)
    cursor: usize,
    /// Placeholder text when empty
    placeholder: &'a str,
    /// Title for the input box
    title: &'a str,
    /// Whether the input is focused
    focused: bool,
}

impl<'a> TextInputWidget<'a> {
    /// Create a new text input widget
    pub fn new(value: &'a str, cursor: usize) -> Self {
        Self {
            value,
            cursor,
            placeholder: "",
            title: "Input",
            focused: true,
        }
    }

    /// Set placeholder text
    pub fn placeholder(mut self, placeholder: &'a str) -> Self {
        self.placeholder = placeholder;
        self
    }

    /// Set title
    pub fn title(mut self, title: &'a str) -> Self {
        self.title = title;
        self
    }

    /// Set focused state
    pub fn focused(mut self, focused: bool) -> Self {
        self.focused = focused;
        self
    }

    /// First character shown so the cursor stays inside `width` columns
    fn scroll_start(&self, width: usize) -> usize {
        if width == 0 {
            return self.cursor;
        }
        (self.cursor + 1).saturating_sub(width)
    }
}

impl Widget for TextInputWidget<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let border_style = if self.focused {
            Style::default().fg(Color::Cyan)
        } else {
            Style::default().fg(Color::DarkGray)
        };

        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(border_style)
            .title(format!(" {} ", self.title));

        let inner = block.inner(area);
        block.render(area, buf);
        if inner.width == 0 || inner.height == 0 {
            return;
        }

        let text_style = Style::default();
        let cursor_style = Style::default().fg(Color::Black).bg(Color::White);
        let width = inner.width as usize;

        if self.value.is_empty() {
            let mut x = inner.x;
            if self.focused {
                buf.set_string(x, inner.y, " ", cursor_style);
                x += 1;
            }
            if !self.placeholder.is_empty() && width > 1 {
                buf.set_stringn(
                    x,
                    inner.y,
                    self.placeholder,
                    width - (x - inner.x) as usize,
                    Style::default().fg(Color::DarkGray),
                );
            }
            return;
        }

        if !self.focused {
            buf.set_stringn(inner.x, inner.y, self.value, width, text_style);
            return;
        }

        // Render the visible window with the cursor cell highlighted
        let start = self.scroll_start(width);
        let mut x = inner.x;
        for (idx, ch) in self.value.chars().enumerate().skip(start).take(width) {
            let style = if idx == self.cursor { cursor_style } else { text_style };
            buf.set_string(x, inner.y, ch.to_string(), style);
            x += 1;
        }
        if self.cursor >= self.value.chars().count() && x < inner.x + inner.width {
            buf.set_string(x, inner.y, " ", cursor_style);
        }
    }
}

/// State for text input
#[derive(Debug, Default, Clone)]
pub struct TextInputState {
    /// Current value
    pub value: String,
    /// Cursor position (character index)
    pub cursor: usize,
}

impl TextInputState {
    /// Create a new text input state
    pub fn new() -> Self {
        Self::default()
    }

    /// Create with initial value
    pub fn with_value(value: String) -> Self {
        let cursor = value.chars().count();
        Self { value, cursor }
    }

    /// Byte offset of a character index
    fn byte_index(&self, char_idx: usize) -> usize {
        self.value
            .char_indices()
            .nth(char_idx)
            .map(|(i, _)| i)
            .unwrap_or(self.value.len())
    }

    fn char_len(&self) -> usize {
        self.value.chars().count()
    }

    /// Handle a key event
    pub fn handle_key(&mut self, key: KeyEvent) -> TextInputAction {
        match key.code {
            KeyCode::Char(c) => {
                if key.modifiers.contains(KeyModifiers::CONTROL) {
                    return TextInputAction::None;
                }
                let at = self.byte_index(self.cursor);
                self.value.insert(at, c);
                self.cursor += 1;
                TextInputAction::Changed
            }
            KeyCode::Backspace => {
                if self.cursor > 0 {
                    self.cursor -= 1;
                    let at = self.byte_index(self.cursor);
                    self.value.remove(at);
                    TextInputAction::Changed
                } else {
                    TextInputAction::None
                }
            }
            KeyCode::Delete => {
                if self.cursor < self.char_len() {
                    let at = self.byte_index(self.cursor);
                    self.value.remove(at);
                    TextInputAction::Changed
                } else {
                    TextInputAction::None
                }
            }
            KeyCode::Left => {
                self.cursor = self.cursor.saturating_sub(1);
                TextInputAction::None
            }
            KeyCode::Right => {
                if self.cursor < self.char_len() {
                    self.cursor += 1;
                }
                TextInputAction::None
            }
            KeyCode::Home => {
                self.cursor = 0;
                TextInputAction::None
            }
            KeyCode::End => {
                self.cursor = self.char_len();
                TextInputAction::None
            }
            KeyCode::Enter => TextInputAction::Submit,
            KeyCode::Esc => TextInputAction::Cancel,
            _ => TextInputAction::None,
        }
    }

    /// Clear the input
    pub fn clear(&mut self) {
        self.value.clear();
        self.cursor = 0;
    }

    /// Get the current value
    pub fn value(&self) -> &str {
        &self.value
    }

    /// Check if empty
    pub fn is_empty(&self) -> bool {
        self.value.is_empty()
    }
}

/// Actions that can result from text input handling
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextInputAction {
    /// No action
    None,
    /// Value changed
    Changed,
    /// User submitted (Enter)
    Submit,
    /// User cancelled (Esc)
    Cancel,
}
