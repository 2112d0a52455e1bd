//! Local keys name the JSON blobs kept in ephemeral per-user storage.
//! Record keys define the object layout of the append-only record store:
//! `<table>/<user_id>/<record_id>.json`.

use uuid::Uuid;

pub const SENTIMENT_SCORE: &str = "sentimentScore";
pub const DISTRESS_LOGS: &str = "distressLogs";
pub const NEEDS_COUNSELOR: &str = "needsCounselor";
pub const COUNSELOR_REFERRAL: &str = "counselorReferral";
pub const COUNSELOR_CHAT: &str = "counselorChat";
pub const FEEDBACK_LIST: &str = "feedbackList";

pub const USER_ACTIVITIES: &str = "user_activities";
pub const SENTIMENT_ASSESSMENTS: &str = "sentiment_assessments";
pub const CHAT_SESSIONS: &str = "chat_sessions";

pub fn table_prefix(table: &str, user_id: &str) -> String {
    format!("{table}/{user_id}/")
}

pub fn activity(user_id: &str, id: Uuid) -> String {
    format!("{USER_ACTIVITIES}/{user_id}/{id}.json")
}

pub fn assessment(user_id: &str, id: Uuid) -> String {
    format!("{SENTIMENT_ASSESSMENTS}/{user_id}/{id}.json")
}

pub fn chat_session(user_id: &str, id: Uuid) -> String {
    format!("{CHAT_SESSIONS}/{user_id}/{id}.json")
}
