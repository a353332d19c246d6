use super::store::KeyValueStore;
use super::types::{ExchangeState, Message, MessageId, MessageIdGen};
use crate::client::{AssistantClient, ChatReply, ChatRequest};
use crate::config::{Config, DEFAULT_GREETING, DEFAULT_SESSION_KEY};
use crate::error::ExchangeError;
use chrono::Local;
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Knobs a session needs from the config file.
#[derive(Debug, Clone)]
pub struct SessionOptions {
    pub greeting: String,
    pub session_key: String,
}

impl Default for SessionOptions {
    fn default() -> Self {
        Self {
            greeting: DEFAULT_GREETING.into(),
            session_key: DEFAULT_SESSION_KEY.into(),
        }
    }
}

impl From<&Config> for SessionOptions {
    fn from(config: &Config) -> Self {
        Self {
            greeting: config.greeting.clone(),
            session_key: config.session_key.clone(),
        }
    }
}

/// Proof that a turn was accepted. Carries the outbound request and must be
/// handed back to [`ChatSession::complete_turn`] with the exchange result.
#[derive(Debug)]
pub struct ExchangeTicket {
    turn: MessageId,
    request: ChatRequest,
}

impl ExchangeTicket {
    /// Id of the user message that triggered this exchange.
    pub fn turn(&self) -> MessageId {
        self.turn
    }

    pub fn request(&self) -> &ChatRequest {
        &self.request
    }
}

/// What applying an exchange result did to the session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TurnOutcome {
    /// An assistant message with this id was appended.
    Replied(MessageId),
    /// Nothing was appended; `last_error` now describes the failure.
    Failed(ExchangeError),
    /// The turn was superseded by a reset; the result was dropped.
    Discarded,
}

/// Owned conversation state: transcript, conversation token, in-flight
/// flag and the last error. Renderers read it; only the operations below
/// mutate it.
pub struct ChatSession {
    transcript: Vec<Message>,
    session_token: String,
    state: ExchangeState,
    last_error: Option<ExchangeError>,
    pending_turn: Option<MessageId>,
    ids: MessageIdGen,
    options: SessionOptions,
    store: Arc<dyn KeyValueStore>,
}

impl ChatSession {
    /// Start a session, restoring any token persisted by an earlier run.
    pub fn new(store: Arc<dyn KeyValueStore>, options: SessionOptions) -> Self {
        let session_token = match store.get(&options.session_key) {
            Ok(token) => token.unwrap_or_default(),
            Err(e) => {
                warn!(error = %e, "could not read stored session token; starting fresh");
                String::new()
            }
        };
        if !session_token.is_empty() {
            debug!("restored conversation token from storage");
        }

        let mut session = Self {
            transcript: Vec::with_capacity(8),
            session_token,
            state: ExchangeState::Idle,
            last_error: None,
            pending_turn: None,
            ids: MessageIdGen::default(),
            options,
            store,
        };
        session.seed_greeting();
        session
    }

    pub fn from_config(config: &Config, store: Arc<dyn KeyValueStore>) -> Self {
        Self::new(store, SessionOptions::from(config))
    }

    // ── Read side ────────────────────────────────────────────────────

    pub fn transcript(&self) -> &[Message] {
        &self.transcript
    }

    /// Current conversation token; `None` before the service issues one.
    pub fn session_token(&self) -> Option<&str> {
        if self.session_token.is_empty() {
            None
        } else {
            Some(&self.session_token)
        }
    }

    pub fn state(&self) -> ExchangeState {
        self.state
    }

    pub fn is_awaiting_response(&self) -> bool {
        self.state == ExchangeState::AwaitingResponse
    }

    /// Banner text for the most recent failed exchange.
    pub fn last_error(&self) -> Option<&'static str> {
        self.last_error.as_ref().map(ExchangeError::user_message)
    }

    /// The failure behind [`Self::last_error`], for callers that react to
    /// specific kinds such as a cold start.
    pub fn last_error_kind(&self) -> Option<&ExchangeError> {
        self.last_error.as_ref()
    }

    // ── Write side ───────────────────────────────────────────────────

    /// Accept a user turn: append the user message and mark the session as
    /// awaiting a response. Returns `None` (and changes nothing) for blank
    /// input or while another exchange is in flight.
    pub fn begin_turn(&mut self, text: &str) -> Option<ExchangeTicket> {
        let text = text.trim();
        if text.is_empty() {
            return None;
        }
        if !self.state.is_idle() {
            debug!("turn refused: exchange already in flight");
            return None;
        }

        let now = Local::now();
        let id = self.ids.next_at(now);
        self.transcript.push(Message::user(id, text.to_string(), now));
        self.last_error = None;
        self.state = ExchangeState::AwaitingResponse;
        self.pending_turn = Some(id);

        info!(turn = %id, has_session = !self.session_token.is_empty(), "exchange started");

        Some(ExchangeTicket {
            turn: id,
            request: ChatRequest {
                message: text.to_string(),
                session_id: self.session_token.clone(),
            },
        })
    }

    /// Apply the result of the exchange started by `ticket`.
    pub fn complete_turn(
        &mut self,
        ticket: ExchangeTicket,
        result: Result<ChatReply, ExchangeError>,
    ) -> TurnOutcome {
        // one exchange at a time, so any completion ends the in-flight state
        self.state = ExchangeState::Idle;

        if self.pending_turn != Some(ticket.turn) {
            info!(turn = %ticket.turn, "dropping response for a superseded turn");
            return TurnOutcome::Discarded;
        }
        self.pending_turn = None;

        match result {
            Ok(reply) => {
                if let Some(token) = reply.session_id
                    && token != self.session_token
                {
                    self.adopt_token(token);
                }

                let now = Local::now();
                let id = self.ids.next_at(now);
                self.transcript
                    .push(Message::assistant(id, reply.text, reply.sources, now));
                info!(turn = %ticket.turn, reply = %id, "exchange completed");
                TurnOutcome::Replied(id)
            }
            Err(e) => {
                warn!(turn = %ticket.turn, error = %e, "exchange failed");
                self.last_error = Some(e.clone());
                TurnOutcome::Failed(e)
            }
        }
    }

    /// Submit `text` and drive its exchange to completion through `client`.
    ///
    /// Returns `None` when the turn is refused.
    pub async fn submit_user_turn(
        &mut self,
        client: &dyn AssistantClient,
        text: &str,
    ) -> Option<TurnOutcome> {
        let ticket = self.begin_turn(text)?;
        let result = client.exchange(ticket.request()).await;
        Some(self.complete_turn(ticket, result))
    }

    /// Start over: fresh greeting, no token, no error. An exchange still in
    /// flight keeps running but its result will be discarded.
    pub fn reset(&mut self) {
        self.transcript.clear();
        self.seed_greeting();
        self.session_token.clear();
        if let Err(e) = self.store.remove(&self.options.session_key) {
            warn!(error = %e, "could not remove stored session token");
        }
        self.last_error = None;
        self.pending_turn = None;
        info!("session reset");
    }

    fn seed_greeting(&mut self) {
        let now = Local::now();
        let id = self.ids.next_at(now);
        self.transcript.push(Message {
            sources: None,
            ..Message::assistant(id, self.options.greeting.clone(), Vec::new(), now)
        });
    }

    fn adopt_token(&mut self, token: String) {
        if let Err(e) = self.store.set(&self.options.session_key, &token) {
            warn!(error = %e, "could not persist session token; keeping it in memory");
        }
        info!(rotated = !self.session_token.is_empty(), "conversation token updated");
        self.session_token = token;
    }
}
