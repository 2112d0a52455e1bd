use std::sync::Arc;

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::{Extension, Json};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use mindcare_audit::tracker::ActivityTracker;
use mindcare_companion::config::CompanionConfig;
use mindcare_companion::navigation::{Route, WatchNavigator};
use mindcare_companion::session::{
    CompanionSession, EscalationState, SessionState, SubmitOutcome,
};
use mindcare_core::models::chat::{ChatMessage, MessageSentiment};
use mindcare_core::models::chat_session::SessionType;

use crate::error::ApiError;
use crate::middleware::user::CurrentUser;
use crate::state::{AppState, OpenSession};

#[derive(Deserialize, Default)]
pub struct OpenSessionRequest {
    #[serde(default)]
    pub user_name: Option<String>,
    #[serde(default)]
    pub speech_enabled: bool,
}

#[derive(Deserialize)]
pub struct SendMessageRequest {
    pub text: String,
}

#[derive(Serialize)]
pub struct SessionView {
    pub id: Uuid,
    pub state: SessionState,
    pub mood: MessageSentiment,
    pub mood_label: &'static str,
    pub escalation: EscalationState,
    pub messages: Vec<ChatMessage>,
    /// Hand-off scheduled but not yet performed.
    pub pending_handoff: Option<Route>,
    /// Last route the coordinator asked the client to show.
    pub navigation: Option<Route>,
}

impl SessionView {
    fn of(id: Uuid, open: &OpenSession) -> Self {
        let session = &open.session;
        Self {
            id,
            state: session.state(),
            mood: session.mood(),
            mood_label: session.mood().mood_label(),
            escalation: session.escalation(),
            messages: session.messages().to_vec(),
            pending_handoff: session.pending_handoff(),
            navigation: open.navigator.pending(),
        }
    }
}

#[derive(Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum MessageOutcome {
    Ignored,
    Replied {
        reply: ChatMessage,
        sentiment: MessageSentiment,
        crisis: bool,
    },
    Escalated {
        route: Route,
        path: &'static str,
        after_ms: u64,
    },
}

impl From<SubmitOutcome> for MessageOutcome {
    fn from(outcome: SubmitOutcome) -> Self {
        match outcome {
            SubmitOutcome::Ignored => MessageOutcome::Ignored,
            SubmitOutcome::Replied {
                reply,
                sentiment,
                crisis,
            } => MessageOutcome::Replied {
                reply,
                sentiment,
                crisis,
            },
            SubmitOutcome::Escalated { route, delay } => MessageOutcome::Escalated {
                route,
                path: route.path(),
                after_ms: delay.as_millis() as u64,
            },
        }
    }
}

#[derive(Serialize)]
pub struct MessageResponse {
    #[serde(flatten)]
    pub outcome: MessageOutcome,
    pub session: SessionView,
}

/// Sessions are only visible to the user that opened them.
fn owned<'a>(
    open: Option<&'a mut OpenSession>,
    id: Uuid,
    user: &CurrentUser,
) -> Result<&'a mut OpenSession, ApiError> {
    match open {
        Some(open) if open.user_id.as_deref() == user.id() => Ok(open),
        _ => Err(ApiError::NotFound(format!("session not found: {id}"))),
    }
}

pub async fn open_session(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
    Json(req): Json<OpenSessionRequest>,
) -> Result<(StatusCode, Json<SessionView>), ApiError> {
    let local = state.local.scoped(user.id()).await?;
    let navigator = Arc::new(WatchNavigator::new());

    let config = CompanionConfig {
        escalation_delay: state.escalation_delay,
        speech_enabled: req.speech_enabled,
        user_name: req.user_name,
        user_id: user.0.clone(),
    };
    let mut session = CompanionSession::new(config, local, navigator.clone());
    session.start();

    let tracker = ActivityTracker::new(state.records.clone(), user.0.clone());
    let id = tracker
        .log_chat_session(SessionType::AiChat)
        .await
        .unwrap_or_else(Uuid::new_v4);

    let open = OpenSession::new(session, navigator, user.0.clone());
    let view = SessionView::of(id, &open);
    state.sessions.lock().await.insert(id, open);

    tracing::info!(session_id = %id, "companion session opened");
    Ok((StatusCode::CREATED, Json(view)))
}

pub async fn get_session(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
    Path(id): Path<Uuid>,
) -> Result<Json<SessionView>, ApiError> {
    let mut sessions = state.sessions.lock().await;
    let open = owned(sessions.get_mut(&id), id, &user)?;
    Ok(Json(SessionView::of(id, open)))
}

pub async fn send_message(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
    Path(id): Path<Uuid>,
    Json(req): Json<SendMessageRequest>,
) -> Result<Json<MessageResponse>, ApiError> {
    let mut sessions = state.sessions.lock().await;
    let open = owned(sessions.get_mut(&id), id, &user)?;

    let outcome = open.session.submit(&req.text)?;

    Ok(Json(MessageResponse {
        outcome: outcome.into(),
        session: SessionView::of(id, open),
    }))
}

/// Navigating away. Tears the session down and cancels any pending hand-off.
/// The session stays addressable as `terminal` until it ages out, so later
/// messages get a conflict rather than not-found. Closing twice is a no-op.
pub async fn close_session(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, ApiError> {
    let mut sessions = state.sessions.lock().await;
    let open = owned(sessions.get_mut(&id), id, &user)?;
    open.session.close();
    Ok(StatusCode::NO_CONTENT)
}
