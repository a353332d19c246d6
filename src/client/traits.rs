use super::types::{ChatReply, ChatRequest};
use crate::error::ExchangeError;
use std::future::Future;
use std::pin::Pin;

/// One request/response round trip with the remote assistant.
///
/// Implementations classify every failure into an [`ExchangeError`]; they
/// never retry.
pub trait AssistantClient: Send + Sync {
    fn exchange<'a>(
        &'a self,
        request: &'a ChatRequest,
    ) -> Pin<Box<dyn Future<Output = Result<ChatReply, ExchangeError>> + Send + 'a>>;
}
