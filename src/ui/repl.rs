//! Line-oriented chat on stdin/stdout.

use super::style;
use crate::client::AssistantClient;
use crate::error::ExchangeError;
use crate::session::{ChatSession, Message, Sender, TurnOutcome};
use anyhow::Result;
use std::io::Write;
use tokio::io::{AsyncBufRead, AsyncBufReadExt};

const TYPING: &str = "typing…";
const RETRY_HINT: &str = "Send your message again in a few seconds.";

/// Slash commands understood at the prompt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Command {
    Clear,
    Quit,
    Help,
}

fn parse_command(line: &str) -> Option<Command> {
    match line {
        "/clear" | "/reset" => Some(Command::Clear),
        "/quit" | "/exit" => Some(Command::Quit),
        "/help" => Some(Command::Help),
        _ => None,
    }
}

/// Render one transcript entry with its sender label, clock and sources.
pub fn format_message(message: &Message, assistant_name: &str) -> String {
    let label = match message.sender {
        Sender::User => style::accent("You"),
        Sender::Assistant => style::success(assistant_name),
    };
    let mut out = format!("{label} {}\n", style::dim(&message.timestamp));
    for line in message.text.lines() {
        out.push_str("  ");
        out.push_str(line);
        out.push('\n');
    }
    let sources = message.sources();
    if !sources.is_empty() {
        out.push_str(&format!("  {}\n", style::dim("Sources:")));
        for (i, source) in sources.iter().enumerate() {
            out.push_str(&format!("    [{}] {}\n", i + 1, style::url(source)));
        }
    }
    out
}

pub fn format_error_banner(text: &str) -> String {
    format!("{} {}\n", style::error("!"), style::error(text))
}

fn print_transcript<W: Write>(
    out: &mut W,
    session: &ChatSession,
    assistant_name: &str,
) -> Result<()> {
    for message in session.transcript() {
        writeln!(out, "{}", format_message(message, assistant_name))?;
    }
    Ok(())
}

fn print_help<W: Write>(out: &mut W) -> Result<()> {
    writeln!(
        out,
        "{}  {} start over  {} leave  {} this list\n",
        style::dim("Commands:"),
        style::yellow("/clear, /reset"),
        style::yellow("/quit, /exit"),
        style::yellow("/help")
    )?;
    Ok(())
}

/// Drive an interactive chat until EOF or `/quit`.
///
/// Each line is one user turn. The next line is not read until the
/// current exchange resolves.
pub async fn run<R, W>(
    session: &mut ChatSession,
    client: &dyn AssistantClient,
    assistant_name: &str,
    input: R,
    out: &mut W,
) -> Result<()>
where
    R: AsyncBufRead + Unpin,
    W: Write,
{
    writeln!(out, "{}\n", style::header(assistant_name))?;
    print_help(out)?;
    print_transcript(out, session, assistant_name)?;
    out.flush()?;

    let mut lines = input.lines();
    while let Some(line) = lines.next_line().await? {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        match parse_command(line) {
            Some(Command::Quit) => break,
            Some(Command::Help) => {
                print_help(out)?;
                continue;
            }
            Some(Command::Clear) => {
                session.reset();
                writeln!(out, "{}\n", style::dim("— conversation cleared —"))?;
                print_transcript(out, session, assistant_name)?;
                out.flush()?;
                continue;
            }
            None => {}
        }

        let Some(ticket) = session.begin_turn(line) else {
            continue;
        };
        if let Some(echo) = session.transcript().last() {
            writeln!(out, "{}", format_message(echo, assistant_name))?;
        }
        write!(out, "{}", style::dim(TYPING))?;
        out.flush()?;

        let result = client.exchange(ticket.request()).await;
        let outcome = session.complete_turn(ticket, result);

        // erase the typing indicator
        write!(out, "\r{}\r", " ".repeat(TYPING.chars().count()))?;
        match outcome {
            TurnOutcome::Replied(_) => {
                if let Some(reply) = session.transcript().last() {
                    writeln!(out, "{}", format_message(reply, assistant_name))?;
                }
            }
            TurnOutcome::Failed(_) => {
                if let Some(banner) = session.last_error() {
                    writeln!(out, "{}", format_error_banner(banner))?;
                }
                if session.last_error_kind().is_some_and(ExchangeError::is_cold_start) {
                    writeln!(out, "  {}\n", style::dim(RETRY_HINT))?;
                }
            }
            TurnOutcome::Discarded => {}
        }
        out.flush()?;
    }

    Ok(())
}
