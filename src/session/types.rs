use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Who authored a transcript entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Sender {
    User,
    Assistant,
}

impl Sender {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::User => "user",
            Self::Assistant => "assistant",
        }
    }
}

impl fmt::Display for Sender {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Opaque message identifier. Strictly increasing in creation order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct MessageId(u64);

impl fmt::Display for MessageId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Hands out ids seeded from wall-clock milliseconds, bumped past the last
/// id when two messages land in the same millisecond.
#[derive(Debug, Default)]
pub(crate) struct MessageIdGen {
    last: u64,
}

impl MessageIdGen {
    pub(crate) fn next_at(&mut self, now: DateTime<Local>) -> MessageId {
        let millis = u64::try_from(now.timestamp_millis()).unwrap_or(0);
        self.last = millis.max(self.last + 1);
        MessageId(self.last)
    }
}

/// One immutable transcript entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    pub id: MessageId,
    pub text: String,
    pub sender: Sender,
    /// Local wall-clock time at creation, `HH:MM`.
    pub timestamp: String,
    /// Citations returned with an assistant reply; `None` on user messages.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sources: Option<Vec<String>>,
}

impl Message {
    pub(crate) fn user(id: MessageId, text: String, at: DateTime<Local>) -> Self {
        Self {
            id,
            text,
            sender: Sender::User,
            timestamp: format_clock(at),
            sources: None,
        }
    }

    pub(crate) fn assistant(
        id: MessageId,
        text: String,
        sources: Vec<String>,
        at: DateTime<Local>,
    ) -> Self {
        Self {
            id,
            text,
            sender: Sender::Assistant,
            timestamp: format_clock(at),
            sources: Some(sources),
        }
    }

    /// Citations, empty for user messages and the seeded greeting.
    pub fn sources(&self) -> &[String] {
        self.sources.as_deref().unwrap_or(&[])
    }
}

pub(crate) fn format_clock(at: DateTime<Local>) -> String {
    at.format("%H:%M").to_string()
}

/// Whether an exchange is in flight.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ExchangeState {
    #[default]
    Idle,
    AwaitingResponse,
}

impl ExchangeState {
    pub fn is_idle(self) -> bool {
        self == Self::Idle
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn ids_increase_within_same_millisecond() {
        let mut ids = MessageIdGen::default();
        let now = Local::now();
        let a = ids.next_at(now);
        let b = ids.next_at(now);
        let c = ids.next_at(now);
        assert!(a < b && b < c);
    }

    #[test]
    fn ids_never_go_backwards_when_clock_does() {
        let mut ids = MessageIdGen::default();
        let later = Local.with_ymd_and_hms(2026, 1, 1, 12, 0, 0).unwrap();
        let earlier = Local.with_ymd_and_hms(2025, 1, 1, 12, 0, 0).unwrap();
        let a = ids.next_at(later);
        let b = ids.next_at(earlier);
        assert!(b > a);
    }

    #[test]
    fn clock_format_is_hours_and_minutes() {
        let at = Local.with_ymd_and_hms(2026, 3, 4, 9, 5, 59).unwrap();
        assert_eq!(format_clock(at), "09:05");
    }

    #[test]
    fn user_messages_carry_no_sources() {
        let mut ids = MessageIdGen::default();
        let msg = Message::user(ids.next_at(Local::now()), "hi".into(), Local::now());
        assert_eq!(msg.sender, Sender::User);
        assert!(msg.sources.is_none());
        assert!(msg.sources().is_empty());
    }

    #[test]
    fn sender_serializes_lowercase() {
        assert_eq!(serde_json::to_string(&Sender::Assistant).unwrap(), "\"assistant\"");
        assert_eq!(Sender::User.to_string(), "user");
    }

    #[test]
    fn default_state_is_idle() {
        assert!(ExchangeState::default().is_idle());
        assert!(!ExchangeState::AwaitingResponse.is_idle());
    }
}
