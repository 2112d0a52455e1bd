//! Append-only record store for activity, assessment, and chat-session rows.
//!
//! Every insert creates a new object; nothing is updated or deduplicated.
//! Reads exist only for the dashboard.

use std::future::Future;
use std::pin::Pin;

use aws_sdk_s3::Client;
use serde::de::DeserializeOwned;
use serde::Serialize;
use tokio::sync::Mutex;
use tracing::info;

use mindcare_core::models::activity::ActivityRecord;
use mindcare_core::models::assessment::AssessmentRecord;
use mindcare_core::models::chat_session::ChatSessionRecord;
use mindcare_core::storage_keys;

use crate::error::StorageError;
use crate::objects;

pub type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;

/// Remote persistence collaborator, scoped by an opaque user identifier.
///
/// Methods return boxed futures for dyn compatibility.
pub trait RecordStore: Send + Sync {
    fn insert_activity(&self, record: ActivityRecord) -> BoxFuture<'_, Result<(), StorageError>>;

    fn insert_assessment(&self, record: AssessmentRecord)
    -> BoxFuture<'_, Result<(), StorageError>>;

    fn insert_chat_session(
        &self,
        record: ChatSessionRecord,
    ) -> BoxFuture<'_, Result<(), StorageError>>;

    fn list_activities(
        &self,
        user_id: String,
    ) -> BoxFuture<'_, Result<Vec<ActivityRecord>, StorageError>>;

    fn list_assessments(
        &self,
        user_id: String,
    ) -> BoxFuture<'_, Result<Vec<AssessmentRecord>, StorageError>>;
}

// ── S3 ───────────────────────────────────────────────────────────────────────

/// Stores each record as `<table>/<user_id>/<record_id>.json`.
pub struct S3RecordStore {
    client: Client,
    bucket: String,
}

impl S3RecordStore {
    pub fn new(client: Client, bucket: impl Into<String>) -> Self {
        Self {
            client,
            bucket: bucket.into(),
        }
    }

    async fn put<T: Serialize>(&self, key: String, record: &T) -> Result<(), StorageError> {
        objects::put_json(&self.client, &self.bucket, &key, record).await?;
        info!(key = %key, "record inserted");
        Ok(())
    }

    async fn list<T: DeserializeOwned>(&self, prefix: String) -> Result<Vec<T>, StorageError> {
        let keys = objects::list_json_keys(&self.client, &self.bucket, &prefix).await?;

        let mut records = Vec::with_capacity(keys.len());
        for key in &keys {
            records.push(objects::get_json(&self.client, &self.bucket, key).await?);
        }
        Ok(records)
    }
}

impl RecordStore for S3RecordStore {
    fn insert_activity(&self, record: ActivityRecord) -> BoxFuture<'_, Result<(), StorageError>> {
        Box::pin(async move {
            let key = storage_keys::activity(&record.user_id, record.id);
            self.put(key, &record).await
        })
    }

    fn insert_assessment(
        &self,
        record: AssessmentRecord,
    ) -> BoxFuture<'_, Result<(), StorageError>> {
        Box::pin(async move {
            let key = storage_keys::assessment(&record.user_id, record.id);
            self.put(key, &record).await
        })
    }

    fn insert_chat_session(
        &self,
        record: ChatSessionRecord,
    ) -> BoxFuture<'_, Result<(), StorageError>> {
        Box::pin(async move {
            let key = storage_keys::chat_session(&record.user_id, record.id);
            self.put(key, &record).await
        })
    }

    fn list_activities(
        &self,
        user_id: String,
    ) -> BoxFuture<'_, Result<Vec<ActivityRecord>, StorageError>> {
        Box::pin(async move {
            self.list(storage_keys::table_prefix(storage_keys::USER_ACTIVITIES, &user_id))
                .await
        })
    }

    fn list_assessments(
        &self,
        user_id: String,
    ) -> BoxFuture<'_, Result<Vec<AssessmentRecord>, StorageError>> {
        Box::pin(async move {
            self.list(storage_keys::table_prefix(
                storage_keys::SENTIMENT_ASSESSMENTS,
                &user_id,
            ))
            .await
        })
    }
}

// ── In-memory ────────────────────────────────────────────────────────────────

#[derive(Default)]
struct Tables {
    activities: Vec<ActivityRecord>,
    assessments: Vec<AssessmentRecord>,
    chat_sessions: Vec<ChatSessionRecord>,
}

/// Process-local record store. Used for tests and for running without AWS.
#[derive(Default)]
pub struct MemoryRecordStore {
    tables: Mutex<Tables>,
}

impl MemoryRecordStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn chat_sessions(&self, user_id: &str) -> Vec<ChatSessionRecord> {
        let tables = self.tables.lock().await;
        tables
            .chat_sessions
            .iter()
            .filter(|r| r.user_id == user_id)
            .cloned()
            .collect()
    }
}

impl RecordStore for MemoryRecordStore {
    fn insert_activity(&self, record: ActivityRecord) -> BoxFuture<'_, Result<(), StorageError>> {
        Box::pin(async move {
            self.tables.lock().await.activities.push(record);
            Ok(())
        })
    }

    fn insert_assessment(
        &self,
        record: AssessmentRecord,
    ) -> BoxFuture<'_, Result<(), StorageError>> {
        Box::pin(async move {
            self.tables.lock().await.assessments.push(record);
            Ok(())
        })
    }

    fn insert_chat_session(
        &self,
        record: ChatSessionRecord,
    ) -> BoxFuture<'_, Result<(), StorageError>> {
        Box::pin(async move {
            self.tables.lock().await.chat_sessions.push(record);
            Ok(())
        })
    }

    fn list_activities(
        &self,
        user_id: String,
    ) -> BoxFuture<'_, Result<Vec<ActivityRecord>, StorageError>> {
        Box::pin(async move {
            let tables = self.tables.lock().await;
            Ok(tables
                .activities
                .iter()
                .filter(|r| r.user_id == user_id)
                .cloned()
                .collect())
        })
    }

    fn list_assessments(
        &self,
        user_id: String,
    ) -> BoxFuture<'_, Result<Vec<AssessmentRecord>, StorageError>> {
        Box::pin(async move {
            let tables = self.tables.lock().await;
            Ok(tables
                .assessments
                .iter()
                .filter(|r| r.user_id == user_id)
                .cloned()
                .collect())
        })
    }
}
