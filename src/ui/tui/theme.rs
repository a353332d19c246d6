use ratatui::style::{Color, Modifier, Style};

pub const PRIMARY: Color = Color::Cyan;
pub const ACCENT: Color = Color::Green;
pub const ERROR: Color = Color::Red;
pub const DIM: Color = Color::DarkGray;
pub const TEXT: Color = Color::White;

pub fn title_style() -> Style {
    Style::default().fg(PRIMARY).add_modifier(Modifier::BOLD)
}

pub fn user_label_style() -> Style {
    Style::default().fg(PRIMARY).add_modifier(Modifier::BOLD)
}

pub fn assistant_label_style() -> Style {
    Style::default().fg(ACCENT).add_modifier(Modifier::BOLD)
}

pub fn body_style() -> Style {
    Style::default().fg(TEXT)
}

pub fn source_style() -> Style {
    Style::default().fg(PRIMARY).add_modifier(Modifier::UNDERLINED)
}

pub fn error_style() -> Style {
    Style::default().fg(ERROR).add_modifier(Modifier::BOLD)
}

pub fn dim_style() -> Style {
    Style::default().fg(DIM)
}

pub fn cursor_style() -> Style {
    Style::default().fg(Color::Black).bg(TEXT)
}

pub fn keybinding_style() -> Style {
    Style::default().fg(DIM)
}
