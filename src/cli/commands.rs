use clap::{Parser, Subcommand};
use tracing::level_filters::LevelFilter;

/// `humanic` - chat with the Humanic AI assistant from your terminal.
#[derive(Parser, Debug)]
#[command(name = "humanic")]
#[command(version)]
#[command(about = "Terminal chat client for the Humanic AI assistant.", long_about = None)]
pub struct Cli {
    /// Log exchanges and token changes to stderr
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Keep the conversation token in memory only
    #[arg(long, global = true)]
    pub ephemeral: bool,

    /// Override the configured chat endpoint
    #[arg(long, global = true, value_name = "URL")]
    pub endpoint: Option<String>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Commands {
    /// Interactive line-by-line chat (default)
    Chat,

    /// Full-screen chat view
    Tui,

    /// Send a single message, print the reply and exit
    Send {
        /// Message text
        #[arg(short, long)]
        message: String,
    },

    /// Forget the stored conversation token
    Reset {
        /// Skip the confirmation prompt
        #[arg(short, long)]
        yes: bool,
    },

    /// Show endpoint, config paths and whether a conversation is stored
    Status,
}

impl Cli {
    pub fn command_or_default(&self) -> Commands {
        self.command.clone().unwrap_or(Commands::Chat)
    }

    /// Most verbose level written to stderr. The full-screen view owns the
    /// terminal, so it stays silent unless `--verbose` is given.
    pub fn log_filter(&self) -> LevelFilter {
        if self.verbose {
            LevelFilter::DEBUG
        } else if self.command_or_default() == Commands::Tui {
            LevelFilter::OFF
        } else {
            LevelFilter::WARN
        }
    }
}
