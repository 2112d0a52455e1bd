pub mod config;
pub mod error;
pub mod middleware;
pub mod routes;
pub mod state;

use axum::Router;
use axum::middleware as axum_mw;
use axum::routing::{get, post};
use tower_http::cors::{Any, CorsLayer};

use state::AppState;

/// Build the HTTP router over the given state.
pub fn app(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/health", get(routes::health::health_check))
        .route("/questionnaire", get(routes::assessments::get_questionnaire))
        .route("/assessments", post(routes::assessments::submit_assessment))
        .route("/sessions", post(routes::sessions::open_session))
        .route(
            "/sessions/{id}",
            get(routes::sessions::get_session).delete(routes::sessions::close_session),
        )
        .route(
            "/sessions/{id}/messages",
            post(routes::sessions::send_message),
        )
        .route("/referrals", post(routes::referrals::submit_referral))
        .route("/referrals/support", get(routes::referrals::get_support))
        .route(
            "/referrals/support/messages",
            post(routes::referrals::send_support_message),
        )
        .route("/feedback", post(routes::feedback::submit_feedback))
        .route("/dashboard/{user_id}", get(routes::dashboard::get_dashboard))
        .layer(axum_mw::from_fn(middleware::user::identify_user))
        .layer(axum_mw::from_fn(middleware::audit::audit_log))
        .layer(cors)
        .with_state(state)
}
