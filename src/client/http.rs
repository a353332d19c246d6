//! reqwest-backed client for the assistant's JSON chat endpoint.

use super::traits::AssistantClient;
use super::types::{ChatReply, ChatRequest, parse_reply};
use crate::config::Config;
use crate::error::ExchangeError;
use reqwest::{Client, StatusCode};
use std::future::Future;
use std::pin::Pin;
use std::time::Duration;
use tracing::{debug, warn};

pub fn build_http_client(
    request_timeout: Option<Duration>,
    connect_timeout: Duration,
) -> Client {
    let mut builder = Client::builder()
        .connect_timeout(connect_timeout)
        .pool_max_idle_per_host(2)
        .pool_idle_timeout(Duration::from_secs(90))
        .tcp_keepalive(Duration::from_secs(60));
    if let Some(timeout) = request_timeout {
        builder = builder.timeout(timeout);
    }
    builder.build().unwrap_or_else(|_| Client::new())
}

pub struct HttpAssistantClient {
    endpoint: String,
    client: Client,
}

impl HttpAssistantClient {
    pub fn new(endpoint: &str, client: Client) -> Self {
        Self {
            endpoint: endpoint.trim().to_string(),
            client,
        }
    }

    pub fn from_config(config: &Config) -> Self {
        let client = build_http_client(
            config.request_timeout_secs.map(Duration::from_secs),
            Duration::from_secs(config.connect_timeout_secs),
        );
        Self::new(&config.endpoint, client)
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    async fn post(&self, request: &ChatRequest) -> Result<ChatReply, ExchangeError> {
        debug!(
            endpoint = %self.endpoint,
            has_session = !request.session_id.is_empty(),
            "posting chat turn"
        );

        let response = self
            .client
            .post(&self.endpoint)
            .json(request)
            .send()
            .await
            .map_err(|e| {
                warn!(error = %e, "chat request failed before a response arrived");
                ExchangeError::Transport(e.to_string())
            })?;

        let status = response.status();
        if !status.is_success() {
            if status == StatusCode::BAD_GATEWAY {
                warn!("assistant answered 502; backend is likely cold-starting");
                return Err(ExchangeError::ColdStart);
            }
            warn!(status = status.as_u16(), "assistant returned an error status");
            return Err(ExchangeError::Status(status.as_u16()));
        }

        let body = response
            .text()
            .await
            .map_err(|e| ExchangeError::Transport(e.to_string()))?;

        parse_reply(&body).inspect_err(|e| warn!(error = %e, "unusable reply body"))
    }
}

impl AssistantClient for HttpAssistantClient {
    fn exchange<'a>(
        &'a self,
        request: &'a ChatRequest,
    ) -> Pin<Box<dyn Future<Output = Result<ChatReply, ExchangeError>> + Send + 'a>> {
        Box::pin(self.post(request))
    }
}
