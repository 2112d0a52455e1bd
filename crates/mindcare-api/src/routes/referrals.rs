use axum::extract::State;
use axum::http::StatusCode;
use axum::{Extension, Json};
use serde::{Deserialize, Serialize};

use mindcare_companion::counselor::{self, LiveSupportPanel};
use mindcare_core::models::referral::{
    CounselorMessage, REFERRAL_ACKNOWLEDGEMENT, ReferralForm, ReferralRequest,
};

use crate::error::ApiError;
use crate::middleware::user::CurrentUser;
use crate::state::AppState;

#[derive(Serialize)]
pub struct ReferralResponse {
    pub request: ReferralRequest,
    pub acknowledgement: &'static str,
}

#[derive(Serialize)]
pub struct SupportView {
    pub open: bool,
    pub needs_counselor: bool,
    pub messages: Vec<CounselorMessage>,
}

#[derive(Deserialize)]
pub struct SupportMessageRequest {
    pub text: String,
}

#[derive(Serialize)]
pub struct SupportMessageResponse {
    pub reply: Option<CounselorMessage>,
    pub messages: Vec<CounselorMessage>,
}

pub async fn submit_referral(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
    Json(form): Json<ReferralForm>,
) -> Result<(StatusCode, Json<ReferralResponse>), ApiError> {
    let local = state.local.scoped(user.id()).await?;
    let request = counselor::submit_referral(local.as_ref(), form, user.0.clone())?;

    Ok((
        StatusCode::CREATED,
        Json(ReferralResponse {
            request,
            acknowledgement: REFERRAL_ACKNOWLEDGEMENT,
        }),
    ))
}

pub async fn get_support(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
) -> Result<Json<SupportView>, ApiError> {
    let local = state.local.scoped(user.id()).await?;
    let needs_counselor = counselor::needs_counselor(local.as_ref())?;
    let panel = LiveSupportPanel::load(local)?;

    Ok(Json(SupportView {
        open: panel.is_open(),
        needs_counselor,
        messages: panel.messages().to_vec(),
    }))
}

pub async fn send_support_message(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
    Json(req): Json<SupportMessageRequest>,
) -> Result<Json<SupportMessageResponse>, ApiError> {
    let local = state.local.scoped(user.id()).await?;
    let mut panel = LiveSupportPanel::load(local)?;

    let reply = panel.send(&req.text)?.cloned();

    Ok(Json(SupportMessageResponse {
        reply,
        messages: panel.messages().to_vec(),
    }))
}
