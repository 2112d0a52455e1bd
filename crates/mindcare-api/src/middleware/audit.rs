use axum::extract::Request;
use axum::middleware::Next;
use axum::response::Response;

/// Logs every API request as a structured `api_request` event. Bodies are
/// never logged; chat and referral payloads are sensitive.
pub async fn audit_log(req: Request, next: Next) -> Response {
    let method = req.method().clone();
    let uri = req.uri().path().to_string();
    let anonymous = !req.headers().contains_key(super::user::USER_ID_HEADER);

    let response = next.run(req).await;

    let status = response.status().as_u16();
    tracing::info!(
        method = %method,
        path = %uri,
        status = status,
        anonymous = anonymous,
        "api_request"
    );

    response
}
