mod env_overrides;
mod loader;
pub mod schema;
#[cfg(test)]
mod test_env;

pub use schema::{
    Config, DEFAULT_ASSISTANT_NAME, DEFAULT_ENDPOINT, DEFAULT_GREETING, DEFAULT_SESSION_KEY,
};
