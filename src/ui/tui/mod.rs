//! Full-screen chat view.
//!
//! The terminal loop polls for keys every 100ms while exchanges run on
//! spawned tasks, so the transcript keeps redrawing (and the spinner keeps
//! turning) while a reply is pending.

mod render;
pub mod state;
pub mod theme;
pub mod widgets;

use anyhow::Result;
use crossterm::event::{self, Event, KeyEventKind};
use crossterm::terminal::{self, EnterAlternateScreen, LeaveAlternateScreen};
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;
use std::io;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc;

use crate::client::{AssistantClient, ChatReply};
use crate::error::ExchangeError;
use crate::session::{ChatSession, ExchangeTicket};
use state::ChatView;

type Completion = (ExchangeTicket, Result<ChatReply, ExchangeError>);

/// Run the chat view until the user quits. Must be called from within a
/// multi-threaded tokio runtime.
pub fn run_chat_tui(
    session: &mut ChatSession,
    client: Arc<dyn AssistantClient>,
    assistant_name: &str,
) -> Result<()> {
    terminal::enable_raw_mode()?;
    let mut stdout = io::stdout();
    crossterm::execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = main_loop(&mut terminal, session, client, assistant_name);

    terminal::disable_raw_mode()?;
    crossterm::execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    result
}

fn main_loop(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    session: &mut ChatSession,
    client: Arc<dyn AssistantClient>,
    assistant_name: &str,
) -> Result<()> {
    let (tx, mut rx) = mpsc::unbounded_channel::<Completion>();
    let mut view = ChatView::new();

    loop {
        drain_completions(&mut rx, session, &mut view);

        terminal.draw(|frame| {
            let area = frame.area();
            render::draw_ui(area, frame.buffer_mut(), session, &view, assistant_name);
        })?;

        if view.should_quit {
            return Ok(());
        }

        // blocks this worker for at most one tick; exchanges run elsewhere
        if tokio::task::block_in_place(|| event::poll(Duration::from_millis(100)))? {
            if let Event::Key(key) = event::read()?
                && key.kind == KeyEventKind::Press
                && let Some(ticket) = view.handle_key(session, key)
            {
                // detached; the result comes back over `rx`
                let _ = spawn_exchange(Arc::clone(&client), ticket, tx.clone());
            }
        } else {
            view.spinner.advance();
        }
    }
}

/// Apply every exchange result that has arrived since the last frame.
/// Returns how many were applied.
fn drain_completions(
    rx: &mut mpsc::UnboundedReceiver<Completion>,
    session: &mut ChatSession,
    view: &mut ChatView,
) -> usize {
    let mut applied = 0;
    while let Ok((ticket, result)) = rx.try_recv() {
        session.complete_turn(ticket, result);
        view.follow_tail();
        applied += 1;
    }
    applied
}

fn spawn_exchange(
    client: Arc<dyn AssistantClient>,
    ticket: ExchangeTicket,
    tx: mpsc::UnboundedSender<Completion>,
) -> tokio::task::JoinHandle<()> {
    tokio::spawn(async move {
        let result = client.exchange(ticket.request()).await;
        // the view may already be gone; nothing left to update then
        let _ = tx.send((ticket, result));
    })
}
