pub mod http;
#[cfg(test)]
pub(crate) mod testing;
pub mod traits;
pub mod types;

pub use http::{HttpAssistantClient, build_http_client};
pub use traits::AssistantClient;
pub use types::{ChatReply, ChatRequest};
