use console::style;
use std::fmt::Display;

/// White bold — assistant name, section headers
pub fn header<D: Display>(text: D) -> String {
    style(text).white().bold().to_string()
}

/// Dim — timestamps, hints, the typing indicator
pub fn dim<D: Display>(text: D) -> String {
    style(text).dim().to_string()
}

/// Cyan bold — the user's sender label
pub fn accent<D: Display>(text: D) -> String {
    style(text).cyan().bold().to_string()
}

/// Green bold — the assistant's sender label, confirmations
pub fn success<D: Display>(text: D) -> String {
    style(text).green().bold().to_string()
}

/// Yellow — slash commands
pub fn yellow<D: Display>(text: D) -> String {
    style(text).yellow().to_string()
}

/// Red bold — the error banner
pub fn error<D: Display>(text: D) -> String {
    style(text).red().bold().to_string()
}

/// Cyan underlined — citation sources
pub fn url<D: Display>(text: D) -> String {
    style(text).cyan().underlined().to_string()
}
