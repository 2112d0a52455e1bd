use axum::extract::State;
use axum::http::StatusCode;
use axum::{Extension, Json};
use serde::Serialize;

use mindcare_audit::events::{AuditAction, AuditEvent};
use mindcare_core::models::feedback::{FeedbackEntry, FeedbackForm};
use mindcare_core::storage_keys;
use mindcare_storage::state as local_state;

use crate::error::ApiError;
use crate::middleware::user::CurrentUser;
use crate::state::AppState;

const FEEDBACK_THANKS: &str =
    "Thank you for your feedback! Your input helps us improve MindCare for everyone.";

#[derive(Serialize)]
pub struct FeedbackResponse {
    pub entry: FeedbackEntry,
    pub message: &'static str,
}

pub async fn submit_feedback(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
    Json(form): Json<FeedbackForm>,
) -> Result<(StatusCode, Json<FeedbackResponse>), ApiError> {
    let entry = FeedbackEntry::submit(form)?;

    let local = state.local.scoped(user.id()).await?;
    let count = local_state::append_json(local.as_ref(), storage_keys::FEEDBACK_LIST, entry.clone())?;

    AuditEvent::new(
        AuditAction::FeedbackSubmitted,
        "feedback",
        count.to_string(),
        user.0.clone(),
    )
    .with_details(serde_json::json!({
        "rating": entry.form.rating,
        "category": entry.form.category,
    }))
    .emit();

    Ok((
        StatusCode::CREATED,
        Json(FeedbackResponse {
            entry,
            message: FEEDBACK_THANKS,
        }),
    ))
}
