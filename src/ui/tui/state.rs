use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use super::widgets::{Spinner, TextInput};
use crate::session::{ChatSession, ExchangeTicket};

/// Lines moved per PgUp/PgDn.
const PAGE: u16 = 8;

/// Per-frame view state. Conversation state lives in `ChatSession`.
#[derive(Debug, Default)]
pub struct ChatView {
    pub input: TextInput,
    pub spinner: Spinner,
    /// Lines scrolled up from the newest message; 0 follows the tail.
    pub scroll_back: u16,
    pub should_quit: bool,
}

impl ChatView {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn follow_tail(&mut self) {
        self.scroll_back = 0;
    }

    /// Apply one key press. Returns a ticket when a turn was accepted and
    /// its exchange has to be started.
    pub fn handle_key(
        &mut self,
        session: &mut ChatSession,
        key: KeyEvent,
    ) -> Option<ExchangeTicket> {
        let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
        match key.code {
            KeyCode::Char('c') if ctrl => self.should_quit = true,
            KeyCode::Esc => self.should_quit = true,
            KeyCode::Char('l') if ctrl => {
                session.reset();
                self.follow_tail();
            }
            KeyCode::PageUp => self.scroll_back = self.scroll_back.saturating_add(PAGE),
            KeyCode::PageDown => self.scroll_back = self.scroll_back.saturating_sub(PAGE),
            KeyCode::Enter => {
                if self.input.is_blank() || session.is_awaiting_response() {
                    return None;
                }
                let text = self.input.take();
                let ticket = session.begin_turn(&text);
                self.follow_tail();
                return ticket;
            }
            // the compose box is locked while a reply is pending
            _ if session.is_awaiting_response() => {}
            KeyCode::Char(ch) if !ctrl => self.input.insert(ch),
            KeyCode::Backspace => self.input.backspace(),
            KeyCode::Delete => self.input.delete(),
            KeyCode::Left => self.input.move_left(),
            KeyCode::Right => self.input.move_right(),
            KeyCode::Home => self.input.home(),
            KeyCode::End => self.input.end(),
            _ => {}
        }
        None
    }
}
