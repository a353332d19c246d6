use super::traits::AssistantClient;
use super::types::{ChatReply, ChatRequest};
use crate::error::ExchangeError;
use std::collections::VecDeque;
use std::future::Future;
use std::pin::Pin;
use std::sync::Mutex;

/// Replays canned results in order and records every request.
#[derive(Default)]
pub(crate) struct ScriptedClient {
    results: Mutex<VecDeque<Result<ChatReply, ExchangeError>>>,
    seen: Mutex<Vec<ChatRequest>>,
}

impl ScriptedClient {
    pub(crate) fn with(results: Vec<Result<ChatReply, ExchangeError>>) -> Self {
        Self {
            results: Mutex::new(results.into()),
            seen: Mutex::default(),
        }
    }

    pub(crate) fn seen(&self) -> Vec<ChatRequest> {
        self.seen.lock().unwrap().clone()
    }
}

impl AssistantClient for ScriptedClient {
    fn exchange<'a>(
        &'a self,
        request: &'a ChatRequest,
    ) -> Pin<Box<dyn Future<Output = Result<ChatReply, ExchangeError>> + Send + 'a>> {
        self.seen.lock().unwrap().push(request.clone());
        let next = self
            .results
            .lock()
            .unwrap()
            .pop_front()
            .expect("script exhausted");
        Box::pin(async move { next })
    }
}
