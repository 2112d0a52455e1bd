use axum::extract::State;
use axum::{Extension, Json};
use serde::{Deserialize, Serialize};

use mindcare_assessment::questionnaire::{Question, questionnaire};
use mindcare_assessment::scoring::score_answers;
use mindcare_audit::tracker::ActivityTracker;
use mindcare_companion::navigation::Route;
use mindcare_core::models::assessment::{AssessmentResult, ScoreHandoff};
use mindcare_core::storage_keys;
use mindcare_storage::state as local_state;

use crate::error::ApiError;
use crate::middleware::user::CurrentUser;
use crate::state::AppState;

/// Pause on the result screen before moving on.
const RESULT_DISPLAY_MS: u64 = 2000;

#[derive(Deserialize)]
pub struct SubmitAssessmentRequest {
    pub answers: Vec<u8>,
}

#[derive(Serialize)]
pub struct NextScreen {
    pub route: Route,
    pub path: &'static str,
    pub after_ms: u64,
}

#[derive(Serialize)]
pub struct SubmitAssessmentResponse {
    pub result: AssessmentResult,
    pub next: NextScreen,
}

pub async fn get_questionnaire() -> Json<Vec<Question>> {
    Json(questionnaire().to_vec())
}

/// Score a completed questionnaire. Signed-in users get an assessment record
/// and activity entry; everyone gets the local hand-off blob so the screen
/// after sign-in can pick the score up.
pub async fn submit_assessment(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
    Json(req): Json<SubmitAssessmentRequest>,
) -> Result<Json<SubmitAssessmentResponse>, ApiError> {
    let result = score_answers(&req.answers)?;

    let local = state.local.scoped(user.id()).await?;
    local_state::save_json(
        local.as_ref(),
        storage_keys::SENTIMENT_SCORE,
        &ScoreHandoff::from(&result),
    )?;

    let tracker = ActivityTracker::new(state.records.clone(), user.0.clone());
    tracker.log_assessment(&result).await;

    let route = if user.id().is_some() {
        Route::Home
    } else {
        Route::Login
    };

    Ok(Json(SubmitAssessmentResponse {
        result,
        next: NextScreen {
            route,
            path: route.path(),
            after_ms: RESULT_DISPLAY_MS,
        },
    }))
}
