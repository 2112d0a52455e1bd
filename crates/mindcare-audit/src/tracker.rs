//! Best-effort activity logging.
//!
//! Nothing here ever fails the caller: without a signed-in user every call is
//! a no-op, and persistence errors are logged and swallowed.

use std::sync::Arc;

use serde_json::json;
use tracing::{error, info};
use uuid::Uuid;

use mindcare_core::models::activity::{ASSESSMENT_COMPLETED, ActivityRecord, CHAT_STARTED};
use mindcare_core::models::assessment::{AssessmentRecord, AssessmentResult};
use mindcare_core::models::chat_session::{ChatSessionRecord, SessionType};
use mindcare_storage::error::StorageError;
use mindcare_storage::records::RecordStore;

use crate::events::{AuditAction, AuditEvent};

#[derive(Clone)]
pub struct ActivityTracker {
    store: Arc<dyn RecordStore>,
    user_id: Option<String>,
}

impl ActivityTracker {
    pub fn new(store: Arc<dyn RecordStore>, user_id: Option<String>) -> Self {
        Self { store, user_id }
    }

    pub fn user_id(&self) -> Option<&str> {
        self.user_id.as_deref()
    }

    pub async fn log_activity(
        &self,
        activity_type: &str,
        description: &str,
        metadata: Option<serde_json::Value>,
    ) {
        let Some(user_id) = &self.user_id else {
            return;
        };

        let record = ActivityRecord::new(user_id.clone(), activity_type, description, metadata);
        match self.store.insert_activity(record).await {
            Ok(()) => info!(activity_type, description, "activity logged"),
            Err(e) => error!(activity_type, error = %e, "error logging activity"),
        }
    }

    /// Persist a scored assessment, then log the matching activity.
    pub async fn log_assessment(&self, result: &AssessmentResult) {
        let Some(user_id) = &self.user_id else {
            return;
        };

        let record = AssessmentRecord::from_result(user_id.clone(), result);
        let record_id = record.id;
        if let Err(e) = self.store.insert_assessment(record).await {
            error!(error = %e, "error logging assessment");
            return;
        }

        AuditEvent::new(
            AuditAction::AssessmentCompleted,
            "sentiment_assessment",
            record_id.to_string(),
            Some(user_id.clone()),
        )
        .with_details(json!({ "sentiment_level": result.sentiment_level.label() }))
        .emit();

        self.log_activity(
            ASSESSMENT_COMPLETED,
            &format!(
                "Sentiment assessment completed with {} result",
                result.sentiment_level
            ),
            Some(json!({
                "total_score": result.total_score,
                "average_score": result.average_score,
            })),
        )
        .await;
    }

    /// Record the start of a chat session. Returns the session id, or `None`
    /// when nobody is signed in or the insert failed.
    pub async fn log_chat_session(&self, session_type: SessionType) -> Option<Uuid> {
        let user_id = self.user_id.as_ref()?;

        match self.insert_chat_session(user_id, session_type).await {
            Ok(id) => {
                self.log_activity(
                    CHAT_STARTED,
                    &format!("Started {} session", session_type.as_str()),
                    Some(json!({ "session_id": id })),
                )
                .await;
                Some(id)
            }
            Err(e) => {
                error!(error = %e, "error logging chat session");
                None
            }
        }
    }

    async fn insert_chat_session(
        &self,
        user_id: &str,
        session_type: SessionType,
    ) -> Result<Uuid, StorageError> {
        let record = ChatSessionRecord::new(user_id, session_type);
        let id = record.id;
        self.store.insert_chat_session(record).await?;

        AuditEvent::new(
            AuditAction::ChatStarted,
            "chat_session",
            id.to_string(),
            Some(user_id.to_string()),
        )
        .emit();
        Ok(id)
    }
}
