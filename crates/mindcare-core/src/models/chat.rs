use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Lexical sentiment of a single chat message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MessageSentiment {
    Positive,
    Neutral,
    Negative,
}

impl MessageSentiment {
    /// Label shown on the mood indicator.
    pub fn mood_label(&self) -> &'static str {
        match self {
            MessageSentiment::Positive => "Positive",
            MessageSentiment::Neutral => "Neutral",
            MessageSentiment::Negative => "Needs Support",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Sender {
    User,
    Companion,
}

/// One entry in a session transcript.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub id: Uuid,
    pub text: String,
    pub sender: Sender,
    pub timestamp: jiff::Timestamp,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub sentiment: Option<MessageSentiment>,
}

impl ChatMessage {
    pub fn user(text: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            text: text.into(),
            sender: Sender::User,
            timestamp: jiff::Timestamp::now(),
            sentiment: None,
        }
    }

    pub fn companion(text: impl Into<String>, sentiment: MessageSentiment) -> Self {
        Self {
            id: Uuid::new_v4(),
            text: text.into(),
            sender: Sender::Companion,
            timestamp: jiff::Timestamp::now(),
            sentiment: Some(sentiment),
        }
    }
}
