pub mod repl;
pub mod style;
#[cfg(feature = "tui")]
pub mod tui;
