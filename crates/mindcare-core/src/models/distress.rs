use serde::{Deserialize, Serialize};

/// Recorded whenever a distress phrase or crisis keyword is matched.
/// Entries are only ever appended to the log, never edited or removed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DistressLogEntry {
    pub user_id: Option<String>,
    pub timestamp: jiff::Timestamp,
    pub trigger_message: String,
    pub redirected: bool,
}

impl DistressLogEntry {
    pub fn new(user_id: Option<String>, trigger_message: impl Into<String>, redirected: bool) -> Self {
        Self {
            user_id,
            timestamp: jiff::Timestamp::now(),
            trigger_message: trigger_message.into(),
            redirected,
        }
    }
}
