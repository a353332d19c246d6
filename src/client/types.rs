use crate::error::ExchangeError;
use serde::{Deserialize, Serialize};

/// Outbound body: `{ "message": ..., "session_id": ... }`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChatRequest {
    pub message: String,
    /// Empty string until the service issues a token.
    pub session_id: String,
}

/// Raw 2xx body as the service sends it.
#[derive(Debug, Deserialize)]
pub(crate) struct ChatResponse {
    #[serde(default)]
    response: Option<String>,
    #[serde(default)]
    sources: Option<Vec<String>>,
    #[serde(default)]
    session_id: Option<String>,
}

/// A successful reply, normalized.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChatReply {
    pub text: String,
    pub sources: Vec<String>,
    /// Token issued with this reply, if any. Never empty.
    pub session_id: Option<String>,
}

impl ChatReply {
    pub fn text_only(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            sources: Vec::new(),
            session_id: None,
        }
    }

    pub fn with_sources(mut self, sources: Vec<String>) -> Self {
        self.sources = sources;
        self
    }

    pub fn with_session_id(mut self, session_id: impl Into<String>) -> Self {
        self.session_id = Some(session_id.into());
        self
    }
}

impl TryFrom<ChatResponse> for ChatReply {
    type Error = ExchangeError;

    fn try_from(raw: ChatResponse) -> Result<Self, Self::Error> {
        let text = raw
            .response
            .ok_or_else(|| ExchangeError::Malformed("missing `response` field".into()))?;
        Ok(Self {
            text,
            sources: raw.sources.unwrap_or_default(),
            session_id: raw.session_id.filter(|id| !id.is_empty()),
        })
    }
}

/// Decode a 2xx body; anything unusable is a malformed reply.
pub(crate) fn parse_reply(body: &str) -> Result<ChatReply, ExchangeError> {
    let raw: ChatResponse =
        serde_json::from_str(body).map_err(|e| ExchangeError::Malformed(e.to_string()))?;
    ChatReply::try_from(raw)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn request_serializes_wire_shape() {
        let req = ChatRequest {
            message: "hello".into(),
            session_id: String::new(),
        };
        let json = serde_json::to_value(&req).unwrap();
        assert_eq!(json, serde_json::json!({"message": "hello", "session_id": ""}));
    }

    #[test]
    fn full_reply_parses() {
        let reply =
            parse_reply(r#"{"response":"hi","sources":["a.pdf","b.pdf"],"session_id":"abc123"}"#)
                .unwrap();
        assert_eq!(reply.text, "hi");
        assert_eq!(reply.sources, vec!["a.pdf", "b.pdf"]);
        assert_eq!(reply.session_id.as_deref(), Some("abc123"));
    }

    #[test]
    fn optional_fields_default() {
        let reply = parse_reply(r#"{"response":"hi"}"#).unwrap();
        assert!(reply.sources.is_empty());
        assert!(reply.session_id.is_none());
    }

    #[test]
    fn null_sources_become_empty() {
        let reply = parse_reply(r#"{"response":"hi","sources":null}"#).unwrap();
        assert!(reply.sources.is_empty());
    }

    #[test]
    fn empty_session_id_is_ignored() {
        let reply = parse_reply(r#"{"response":"hi","session_id":""}"#).unwrap();
        assert!(reply.session_id.is_none());
    }

    #[test]
    fn missing_response_is_malformed() {
        let err = parse_reply(r#"{"sources":[],"session_id":"abc"}"#).unwrap_err();
        assert!(matches!(err, ExchangeError::Malformed(_)));
    }

    #[test]
    fn non_json_body_is_malformed() {
        let err = parse_reply("<html>oops</html>").unwrap_err();
        assert!(matches!(err, ExchangeError::Malformed(_)));
    }

    #[test]
    fn wrong_type_response_is_malformed() {
        let err = parse_reply(r#"{"response":42}"#).unwrap_err();
        assert!(matches!(err, ExchangeError::Malformed(_)));
    }

    #[test]
    fn unknown_fields_are_tolerated() {
        let reply = parse_reply(r#"{"response":"hi","latency_ms":120}"#).unwrap();
        assert_eq!(reply.text, "hi");
    }
}
