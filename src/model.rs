//! Payload types stored by the caching layer
//!
//! These mirror the wire shapes of the services that share this cache: the
//! chat service's conversation sessions and the sentiment service's verdicts
//! and fetched articles. Everything here serializes to JSON.

use chrono::Utc;
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// One message in a conversation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConversationTurn {
    /// Who produced the message, "user" or "assistant"
    pub role: String,
    pub content: String,
    /// Unix timestamp in seconds
    pub timestamp: i64,
}

/// Conversation state for one chat session
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionData {
    pub session_id: String,
    pub conversation_history: Vec<ConversationTurn>,
    /// Unix timestamp in seconds
    pub created_at: i64,
    /// Unix timestamp in seconds, bumped on every turn
    pub last_activity: i64,
}

impl SessionData {
    /// Create an empty session with a fresh random id
    pub fn new() -> Self {
        Self::with_id(Uuid::new_v4().to_string())
    }

    /// Create an empty session with a caller-chosen id
    pub fn with_id(session_id: impl Into<String>) -> Self {
        let now = Utc::now().timestamp();
        Self {
            session_id: session_id.into(),
            conversation_history: Vec::new(),
            created_at: now,
            last_activity: now,
        }
    }

    /// Append a turn and bump the activity timestamp
    pub fn push_turn(&mut self, role: impl Into<String>, content: impl Into<String>) {
        let now = Utc::now().timestamp();
        self.conversation_history.push(ConversationTurn {
            role: role.into(),
            content: content.into(),
            timestamp: now,
        });
        self.last_activity = now;
    }
}

impl Default for SessionData {
    fn default() -> Self {
        Self::new()
    }
}

/// Overall market sentiment classification
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Sentiment {
    Bullish,
    Neutral,
    Bearish,
}

impl fmt::Display for Sentiment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Sentiment::Bullish => write!(f, "bullish"),
            Sentiment::Neutral => write!(f, "neutral"),
            Sentiment::Bearish => write!(f, "bearish"),
        }
    }
}

/// A source cited by a sentiment verdict
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceCitation {
    pub title: String,
    pub url: String,
}

/// Computed sentiment verdict for one token and timeframe
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SentimentVerdict {
    pub sentiment: Sentiment,
    /// Confidence score in `[0.0, 1.0]`
    pub confidence: f64,
    pub summary: String,
    pub cited_sources: Vec<SourceCitation>,
}

/// A fetched web article used as sentiment evidence
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Article {
    pub url: String,
    pub title: String,
    pub content: String,
    /// Publication date as reported by the source, if known
    pub published_date: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sentiment_serializes_lowercase() {
        assert_eq!(
            serde_json::to_string(&Sentiment::Bullish).unwrap(),
            "\"bullish\""
        );
        let parsed: Sentiment = serde_json::from_str("\"bearish\"").unwrap();
        assert_eq!(parsed, Sentiment::Bearish);
    }

    #[test]
    fn test_sentiment_display() {
        assert_eq!(Sentiment::Neutral.to_string(), "neutral");
    }

    #[test]
    fn test_new_sessions_get_unique_ids() {
        let a = SessionData::new();
        let b = SessionData::new();
        assert_ne!(a.session_id, b.session_id);
        assert!(a.conversation_history.is_empty());
    }

    #[test]
    fn test_push_turn_updates_activity() {
        let mut session = SessionData::with_id("s1");
        session.push_turn("user", "hello");
        session.push_turn("assistant", "hi there");

        assert_eq!(session.conversation_history.len(), 2);
        assert_eq!(session.conversation_history[0].role, "user");
        assert_eq!(session.conversation_history[1].content, "hi there");
        assert!(session.last_activity >= session.created_at);
    }

    #[test]
    fn test_verdict_roundtrip() {
        let verdict = SentimentVerdict {
            sentiment: Sentiment::Bullish,
            confidence: 0.72,
            summary: "Momentum is building".to_string(),
            cited_sources: vec![SourceCitation {
                title: "Daily wrap".to_string(),
                url: "https://example.com/wrap".to_string(),
            }],
        };
        let json = serde_json::to_string(&verdict).unwrap();
        let parsed: SentimentVerdict = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, verdict);
    }
}
