use ratatui::buffer::Buffer;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::text::{Line, Span};
use ratatui::widgets::Widget;

use super::state::ChatView;
use super::theme;
use super::widgets::ComposeWidget;
use crate::session::{ChatSession, Message, Sender};

const KEYS: &str = "Enter send · Ctrl-L clear · PgUp/PgDn scroll · Esc quit";

pub(super) fn draw_ui(
    area: Rect,
    buf: &mut Buffer,
    session: &ChatSession,
    view: &ChatView,
    assistant_name: &str,
) {
    let banner_height = u16::from(session.last_error().is_some());

    // header (2) + transcript + banner (0/1) + separator + compose + keys
    let vertical = Layout::vertical([
        Constraint::Length(2),
        Constraint::Min(3),
        Constraint::Length(banner_height),
        Constraint::Length(1),
        Constraint::Length(1),
        Constraint::Length(1),
    ])
    .split(area);

    Line::from(vec![
        Span::styled(format!("  {assistant_name}"), theme::title_style()),
        Span::styled("  AI Assistant", theme::dim_style()),
    ])
    .render(Rect::new(vertical[0].x, vertical[0].y, vertical[0].width, 1), buf);
    separator(area.width).render(
        Rect::new(vertical[0].x, vertical[0].y + 1, vertical[0].width, 1),
        buf,
    );

    render_transcript(vertical[1], buf, session, view, assistant_name);

    if let Some(banner) = session.last_error() {
        Line::from(Span::styled(format!("  ! {banner}"), theme::error_style()))
            .render(vertical[2], buf);
    }

    separator(area.width).render(vertical[3], buf);

    let enabled = !session.is_awaiting_response();
    ComposeWidget {
        input: &view.input,
        enabled,
        placeholder: if enabled {
            " Write a message..."
        } else {
            "waiting for reply..."
        },
    }
    .render(vertical[4], buf);

    Line::from(Span::styled(format!("  {KEYS}"), theme::keybinding_style()))
        .render(vertical[5], buf);
}

fn separator(width: u16) -> Line<'static> {
    Line::from(Span::styled(
        format!("  {}", "─".repeat(width.saturating_sub(4) as usize)),
        theme::dim_style(),
    ))
}

fn render_transcript(
    area: Rect,
    buf: &mut Buffer,
    session: &ChatSession,
    view: &ChatView,
    assistant_name: &str,
) {
    if area.height == 0 || area.width < 8 {
        return;
    }

    let mut lines = transcript_lines(session.transcript(), assistant_name, area.width);
    if session.is_awaiting_response() {
        lines.push(Line::from(vec![
            Span::styled(format!("  {} ", view.spinner.frame()), theme::title_style()),
            Span::styled(format!("{assistant_name} is typing"), theme::dim_style()),
        ]));
    }

    let visible = area.height as usize;
    let back = (view.scroll_back as usize).min(lines.len().saturating_sub(visible));
    let bottom = lines.len() - back;
    let top = bottom.saturating_sub(visible);

    for (row, line) in lines[top..bottom].iter().enumerate() {
        let y = area.y + u16::try_from(row).unwrap_or(u16::MAX);
        line.clone().render(Rect::new(area.x, y, area.width, 1), buf);
    }
}

/// Flatten the transcript into pre-wrapped display lines, oldest first.
fn transcript_lines<'a>(
    messages: &'a [Message],
    assistant_name: &'a str,
    width: u16,
) -> Vec<Line<'a>> {
    let body_width = usize::from(width.saturating_sub(4)).max(1);
    let mut lines = Vec::new();

    for message in messages {
        let (label, style) = match message.sender {
            Sender::User => ("You", theme::user_label_style()),
            Sender::Assistant => (assistant_name, theme::assistant_label_style()),
        };
        lines.push(Line::from(vec![
            Span::styled(format!("  {label}"), style),
            Span::styled(format!(" {}", message.timestamp), theme::dim_style()),
        ]));
        for row in wrap(&message.text, body_width) {
            lines.push(Line::from(Span::styled(format!("    {row}"), theme::body_style())));
        }
        for (i, source) in message.sources().iter().enumerate() {
            lines.push(Line::from(vec![
                Span::styled(format!("    [{}] ", i + 1), theme::dim_style()),
                Span::styled(source.as_str(), theme::source_style()),
            ]));
        }
        lines.push(Line::default());
    }
    lines
}

/// Greedy word wrap on char counts. Words longer than `width` are split.
fn wrap(text: &str, width: usize) -> Vec<String> {
    let mut rows = Vec::new();
    for paragraph in text.split('\n') {
        let mut row = String::new();
        let mut row_len = 0;
        for word in paragraph.split_whitespace() {
            let mut word: Vec<char> = word.chars().collect();
            while word.len() > width {
                if row_len > 0 {
                    rows.push(std::mem::take(&mut row));
                    row_len = 0;
                }
                rows.push(word.drain(..width).collect());
            }
            if word.is_empty() {
                continue;
            }
            let needed = if row_len == 0 { word.len() } else { row_len + 1 + word.len() };
            if needed > width {
                rows.push(std::mem::take(&mut row));
                row_len = 0;
            }
            if row_len > 0 {
                row.push(' ');
                row_len += 1;
            }
            row.extend(word.iter());
            row_len += word.len();
        }
        rows.push(row);
    }
    rows
}
