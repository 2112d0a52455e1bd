use std::sync::Arc;

use mindcare_audit::events::{AuditAction, AuditEvent};
use mindcare_audit::tracker::ActivityTracker;
use mindcare_core::models::activity::{ASSESSMENT_COMPLETED, ActivityRecord, CHAT_STARTED};
use mindcare_core::models::assessment::{AssessmentRecord, AssessmentResult, SentimentTier};
use mindcare_core::models::chat_session::{ChatSessionRecord, SessionType};
use mindcare_storage::error::StorageError;
use mindcare_storage::records::{BoxFuture, MemoryRecordStore, RecordStore};

/// Rejects every write, as an unreachable backend would.
struct OfflineStore;

fn offline<T: Send + 'static>() -> BoxFuture<'static, Result<T, StorageError>> {
    Box::pin(async { Err(StorageError::Unavailable("offline".to_string())) })
}

impl RecordStore for OfflineStore {
    fn insert_activity(&self, _: ActivityRecord) -> BoxFuture<'_, Result<(), StorageError>> {
        offline()
    }

    fn insert_assessment(&self, _: AssessmentRecord) -> BoxFuture<'_, Result<(), StorageError>> {
        offline()
    }

    fn insert_chat_session(&self, _: ChatSessionRecord) -> BoxFuture<'_, Result<(), StorageError>> {
        offline()
    }

    fn list_activities(&self, _: String) -> BoxFuture<'_, Result<Vec<ActivityRecord>, StorageError>> {
        offline()
    }

    fn list_assessments(
        &self,
        _: String,
    ) -> BoxFuture<'_, Result<Vec<AssessmentRecord>, StorageError>> {
        offline()
    }
}

fn neutral_result() -> AssessmentResult {
    AssessmentResult {
        answers: vec![3; 10],
        total_score: 30,
        average_score: 3.0,
        sentiment_level: SentimentTier::Neutral,
        completed_at: jiff::Timestamp::now(),
    }
}

#[tokio::test]
async fn anonymous_tracker_writes_nothing() {
    let store = Arc::new(MemoryRecordStore::new());
    let tracker = ActivityTracker::new(store.clone(), None);

    tracker.log_activity("page_view", "Viewed home", None).await;
    tracker.log_assessment(&neutral_result()).await;
    assert_eq!(tracker.log_chat_session(SessionType::AiChat).await, None);

    assert!(store.list_activities(String::new()).await.unwrap().is_empty());
}

#[tokio::test]
async fn logging_twice_appends_twice() {
    let store = Arc::new(MemoryRecordStore::new());
    let tracker = ActivityTracker::new(store.clone(), Some("u1".to_string()));

    tracker.log_activity("page_view", "Viewed home", None).await;
    tracker.log_activity("page_view", "Viewed home", None).await;

    let rows = store.list_activities("u1".to_string()).await.unwrap();
    assert_eq!(rows.len(), 2);
}

#[tokio::test]
async fn assessment_logs_record_and_activity() {
    let store = Arc::new(MemoryRecordStore::new());
    let tracker = ActivityTracker::new(store.clone(), Some("u1".to_string()));

    tracker.log_assessment(&neutral_result()).await;

    let assessments = store.list_assessments("u1".to_string()).await.unwrap();
    assert_eq!(assessments.len(), 1);
    assert_eq!(assessments[0].total_score, 30);

    let activities = store.list_activities("u1".to_string()).await.unwrap();
    assert_eq!(activities.len(), 1);
    assert_eq!(activities[0].activity_type, ASSESSMENT_COMPLETED);
    assert_eq!(
        activities[0].description,
        "Sentiment assessment completed with Neutral result"
    );
    let metadata = activities[0].metadata.as_ref().unwrap();
    assert_eq!(metadata["total_score"], 30);
    assert_eq!(metadata["average_score"], 3.0);
}

#[tokio::test]
async fn chat_session_returns_id_and_logs_start() {
    let store = Arc::new(MemoryRecordStore::new());
    let tracker = ActivityTracker::new(store.clone(), Some("u1".to_string()));

    let id = tracker.log_chat_session(SessionType::AiChat).await.unwrap();

    let sessions = store.chat_sessions("u1").await;
    assert_eq!(sessions.len(), 1);
    assert_eq!(sessions[0].id, id);

    let activities = store.list_activities("u1".to_string()).await.unwrap();
    assert_eq!(activities[0].activity_type, CHAT_STARTED);
    assert_eq!(activities[0].description, "Started ai_chat session");
    assert_eq!(
        activities[0].metadata.as_ref().unwrap()["session_id"],
        id.to_string()
    );
}

#[tokio::test]
async fn persistence_failures_are_swallowed() {
    let tracker = ActivityTracker::new(Arc::new(OfflineStore), Some("u1".to_string()));

    tracker.log_activity("page_view", "Viewed home", None).await;
    tracker.log_assessment(&neutral_result()).await;
    assert_eq!(tracker.log_chat_session(SessionType::HumanCounselor).await, None);
}

#[test]
fn audit_event_carries_details() {
    let event = AuditEvent::new(AuditAction::DistressDetected, "chat_session", "s1", None)
        .with_details(serde_json::json!({ "redirected": true }));
    let value = serde_json::to_value(&event).unwrap();
    assert_eq!(value["action"], "distress_detected");
    assert!(value["user_id"].is_null());
    assert_eq!(value["details"]["redirected"], true);
    event.emit();
}
