use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::text::{Line, Span};
use ratatui::widgets::Widget;

use super::theme;

const FRAMES: &[&str] = &["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"];

/// Typing indicator frames, advanced on idle ticks.
#[derive(Debug, Clone, Default)]
pub struct Spinner {
    pub tick: usize,
}

impl Spinner {
    pub fn new() -> Self {
        Self { tick: 0 }
    }

    pub fn advance(&mut self) {
        self.tick = self.tick.wrapping_add(1);
    }

    pub fn frame(&self) -> &'static str {
        FRAMES[self.tick % FRAMES.len()]
    }
}

/// Single-line compose box with a byte-offset cursor on char boundaries.
#[derive(Debug, Clone, Default)]
pub struct TextInput {
    pub value: String,
    pub cursor: usize,
}

impl TextInput {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, ch: char) {
        self.value.insert(self.cursor, ch);
        self.cursor += ch.len_utf8();
    }

    pub fn backspace(&mut self) {
        if self.cursor > 0 {
            let prev = self.value[..self.cursor]
                .char_indices()
                .next_back()
                .map_or(0, |(i, _)| i);
            self.value.replace_range(prev..self.cursor, "");
            self.cursor = prev;
        }
    }

    pub fn delete(&mut self) {
        if self.cursor < self.value.len() {
            let next = self.value[self.cursor..]
                .char_indices()
                .nth(1)
                .map_or(self.value.len(), |(i, _)| self.cursor + i);
            self.value.replace_range(self.cursor..next, "");
        }
    }

    pub fn move_left(&mut self) {
        if self.cursor > 0 {
            self.cursor = self.value[..self.cursor]
                .char_indices()
                .next_back()
                .map_or(0, |(i, _)| i);
        }
    }

    pub fn move_right(&mut self) {
        if self.cursor < self.value.len() {
            self.cursor = self.value[self.cursor..]
                .char_indices()
                .nth(1)
                .map_or(self.value.len(), |(i, _)| self.cursor + i);
        }
    }

    pub fn home(&mut self) {
        self.cursor = 0;
    }

    pub fn end(&mut self) {
        self.cursor = self.value.len();
    }

    /// Hand back the typed text and empty the box.
    pub fn take(&mut self) -> String {
        self.cursor = 0;
        std::mem::take(&mut self.value)
    }

    pub fn is_blank(&self) -> bool {
        self.value.trim().is_empty()
    }
}

/// Renders the compose box; greyed out and cursorless when disabled.
pub struct ComposeWidget<'a> {
    pub input: &'a TextInput,
    pub enabled: bool,
    pub placeholder: &'a str,
}

impl Widget for ComposeWidget<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if area.height == 0 || area.width < 4 {
            return;
        }

        let prompt = Span::styled("› ", theme::title_style());
        let line = if !self.enabled {
            Line::from(vec![prompt, Span::styled(self.placeholder, theme::dim_style())])
        } else if self.input.value.is_empty() {
            Line::from(vec![
                prompt,
                Span::styled(" ", theme::cursor_style()),
                Span::styled(self.placeholder, theme::dim_style()),
            ])
        } else {
            let (before, at, after) = split_at_cursor(&self.input.value, self.input.cursor);
            Line::from(vec![
                prompt,
                Span::styled(before, theme::body_style()),
                Span::styled(at, theme::cursor_style()),
                Span::styled(after, theme::body_style()),
            ])
        };
        line.render(area, buf);
    }
}

fn split_at_cursor(value: &str, cursor: usize) -> (String, String, String) {
    let before = value[..cursor].to_string();
    let mut rest = value[cursor..].chars();
    let at = rest.next().map_or_else(|| " ".to_string(), |c| c.to_string());
    (before, at, rest.collect())
}
