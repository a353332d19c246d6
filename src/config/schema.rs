use crate::error::ConfigError;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

pub const DEFAULT_ENDPOINT: &str = "https://viatras-rag.onrender.com/chat";
pub const DEFAULT_ASSISTANT_NAME: &str = "Humanic Assistant";
pub const DEFAULT_GREETING: &str =
    "Hi! I'm Humanic Assistant, your virtual AI helper. How can I help you today?";
pub const DEFAULT_SESSION_KEY: &str = "chat_session_id";

// ── Top-level config ──────────────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// State directory - computed from home, not serialized
    #[serde(skip)]
    pub state_dir: PathBuf,
    /// Path to config.toml - computed from home, not serialized
    #[serde(skip)]
    pub config_path: PathBuf,

    /// Chat endpoint of the remote assistant (POST, JSON)
    #[serde(default = "default_endpoint")]
    pub endpoint: String,

    /// Display name used in headers and sender labels
    #[serde(default = "default_assistant_name")]
    pub assistant_name: String,

    /// Seeded assistant message at the top of every transcript
    #[serde(default = "default_greeting")]
    pub greeting: String,

    /// Key under which the conversation token is persisted
    #[serde(default = "default_session_key")]
    pub session_key: String,

    /// Whole-request timeout; unset means wait indefinitely
    #[serde(default)]
    pub request_timeout_secs: Option<u64>,

    #[serde(default = "default_connect_timeout_secs")]
    pub connect_timeout_secs: u64,
}

fn default_endpoint() -> String {
    DEFAULT_ENDPOINT.into()
}

fn default_assistant_name() -> String {
    DEFAULT_ASSISTANT_NAME.into()
}

fn default_greeting() -> String {
    DEFAULT_GREETING.into()
}

fn default_session_key() -> String {
    DEFAULT_SESSION_KEY.into()
}

fn default_connect_timeout_secs() -> u64 {
    10
}

impl Default for Config {
    fn default() -> Self {
        let state_dir = PathBuf::from(".humanic");
        Self {
            config_path: state_dir.join("config.toml"),
            state_dir,
            endpoint: default_endpoint(),
            assistant_name: default_assistant_name(),
            greeting: default_greeting(),
            session_key: default_session_key(),
            request_timeout_secs: None,
            connect_timeout_secs: default_connect_timeout_secs(),
        }
    }
}

impl Config {
    /// File holding the persisted key-value entries (the session token).
    pub fn state_file(&self) -> PathBuf {
        self.state_dir.join("state.json")
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let parsed = url::Url::parse(&self.endpoint).map_err(|e| {
            ConfigError::Validation(format!("endpoint `{}` is not a URL: {e}", self.endpoint))
        })?;
        if !matches!(parsed.scheme(), "http" | "https") {
            return Err(ConfigError::Validation(format!(
                "endpoint must use http or https, got `{}`",
                parsed.scheme()
            )));
        }
        if self.session_key.trim().is_empty() {
            return Err(ConfigError::Validation("session_key must not be empty".into()));
        }
        if self.request_timeout_secs == Some(0) {
            return Err(ConfigError::Validation(
                "request_timeout_secs must be positive when set".into(),
            ));
        }
        Ok(())
    }
}
