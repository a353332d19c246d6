#![warn(clippy::all, clippy::pedantic)]
#![allow(
    clippy::missing_errors_doc,
    clippy::missing_panics_doc,
    clippy::module_name_repetitions,
    clippy::must_use_candidate,
    clippy::new_without_default,
    clippy::return_self_not_must_use
)]

pub mod app;
pub mod cli;
pub mod client;
pub mod config;
pub mod error;
pub mod session;
pub mod ui;

pub use client::{AssistantClient, ChatReply, ChatRequest, HttpAssistantClient};
pub use config::Config;
pub use error::{ConfigError, ExchangeError};
pub use session::{
    ChatSession, ExchangeState, FileKeyValueStore, KeyValueStore, MemoryKeyValueStore, Message,
    MessageId, Sender, SessionOptions, TurnOutcome,
};
