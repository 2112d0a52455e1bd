use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SessionType {
    #[default]
    AiChat,
    HumanCounselor,
}

impl SessionType {
    pub fn as_str(&self) -> &'static str {
        match self {
            SessionType::AiChat => "ai_chat",
            SessionType::HumanCounselor => "human_counselor",
        }
    }
}

/// Row in the `chat_sessions` table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatSessionRecord {
    pub id: Uuid,
    pub user_id: String,
    pub session_type: SessionType,
    pub created_at: jiff::Timestamp,
}

impl ChatSessionRecord {
    pub fn new(user_id: impl Into<String>, session_type: SessionType) -> Self {
        Self {
            id: Uuid::new_v4(),
            user_id: user_id.into(),
            session_type,
            created_at: jiff::Timestamp::now(),
        }
    }
}
