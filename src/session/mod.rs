pub mod chat;
pub mod store;
pub mod types;

pub use chat::{ChatSession, ExchangeTicket, SessionOptions, TurnOutcome};
pub use store::{FileKeyValueStore, KeyValueStore, MemoryKeyValueStore};
pub use types::{ExchangeState, Message, MessageId, Sender};
