use serde::{Deserialize, Serialize};
use uuid::Uuid;

pub const ASSESSMENT_COMPLETED: &str = "assessment_completed";
pub const CHAT_STARTED: &str = "chat_started";

/// Row in the `user_activities` table. Append-only: logging the same
/// activity twice yields two rows.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActivityRecord {
    pub id: Uuid,
    pub user_id: String,
    pub activity_type: String,
    pub description: String,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub metadata: Option<serde_json::Value>,
    pub created_at: jiff::Timestamp,
}

impl ActivityRecord {
    pub fn new(
        user_id: impl Into<String>,
        activity_type: impl Into<String>,
        description: impl Into<String>,
        metadata: Option<serde_json::Value>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            user_id: user_id.into(),
            activity_type: activity_type.into(),
            description: description.into(),
            metadata,
            created_at: jiff::Timestamp::now(),
        }
    }
}
