use thiserror::Error;

// ─── Config errors ───────────────────────────────────────────────────────────

/// Failures while locating, reading or writing `config.toml`.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to load config: {0}")]
    Load(String),

    #[error("failed to serialize config: {0}")]
    Serialize(String),

    #[error("validation failed: {0}")]
    Validation(String),

    #[error("io: {0}")]
    Io(#[from] std::io::Error),
}

// ─── Key-value store errors ─────────────────────────────────────────────────

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("io: {0}")]
    Io(#[from] std::io::Error),

    #[error("corrupt state file {path}: {message}")]
    Corrupt { path: String, message: String },

    #[error("serialize: {0}")]
    Serialize(String),

    #[error("store lock poisoned")]
    Poisoned,
}

// ─── Exchange errors ────────────────────────────────────────────────────────

/// Shown when the assistant answers 502 while its host is still booting.
pub const COLD_START_MESSAGE: &str =
    "Assistant is starting up. This can take 20-30 seconds on the first request.";

/// Shown for every other failed exchange.
pub const GENERIC_FAILURE_MESSAGE: &str = "Failed to get response from server.";

/// Failure of a single request/response exchange.
///
/// None of these are fatal: the session stays usable and the caller is
/// expected to resubmit by hand.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ExchangeError {
    /// HTTP 502: the remote service is warming up.
    #[error("assistant is cold-starting (HTTP 502)")]
    ColdStart,

    #[error("assistant returned HTTP {0}")]
    Status(u16),

    #[error("transport failure: {0}")]
    Transport(String),

    /// 2xx whose body lacks a usable reply.
    #[error("malformed response body: {0}")]
    Malformed(String),
}

impl ExchangeError {
    /// Fixed human-readable text for the error banner.
    pub fn user_message(&self) -> &'static str {
        match self {
            Self::ColdStart => COLD_START_MESSAGE,
            Self::Status(_) | Self::Transport(_) | Self::Malformed(_) => GENERIC_FAILURE_MESSAGE,
        }
    }

    pub fn is_cold_start(&self) -> bool {
        matches!(self, Self::ColdStart)
    }
}
