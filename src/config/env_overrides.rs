use super::Config;
use std::path::PathBuf;

impl Config {
    pub fn apply_env_overrides(&mut self) {
        if let Ok(endpoint) = std::env::var("HUMANIC_ENDPOINT")
            && !endpoint.is_empty()
        {
            self.endpoint = endpoint;
        }

        if let Ok(dir) = std::env::var("HUMANIC_STATE_DIR")
            && !dir.is_empty()
        {
            self.state_dir = PathBuf::from(dir);
        }

        if let Ok(secs) = std::env::var("HUMANIC_REQUEST_TIMEOUT_SECS")
            && let Ok(secs) = secs.parse::<u64>()
            && secs > 0
        {
            self.request_timeout_secs = Some(secs);
        }
    }
}
