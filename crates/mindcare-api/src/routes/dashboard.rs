use axum::extract::{Path, State};
use axum::{Extension, Json};

use mindcare_assessment::analytics::{Dashboard, build_dashboard};

use crate::error::ApiError;
use crate::middleware::user::CurrentUser;
use crate::state::AppState;

/// Dashboards are only visible to the user they belong to.
pub async fn get_dashboard(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
    Path(user_id): Path<String>,
) -> Result<Json<Dashboard>, ApiError> {
    if user.id() != Some(user_id.as_str()) {
        return Err(ApiError::NotFound(format!("dashboard not found: {user_id}")));
    }

    let assessments = state.records.list_assessments(user_id.clone()).await?;
    let activities = state.records.list_activities(user_id.clone()).await?;

    tracing::debug!(
        user_id = %user_id,
        assessments = assessments.len(),
        activities = activities.len(),
        "building dashboard"
    );

    Ok(Json(build_dashboard(&assessments, &activities)))
}
