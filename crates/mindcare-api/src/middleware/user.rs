use axum::extract::Request;
use axum::middleware::Next;
use axum::response::Response;

pub const USER_ID_HEADER: &str = "x-user-id";

/// Reads the optional `x-user-id` header and inserts `CurrentUser` into
/// request extensions. Identity is supplied by the caller and is opaque
/// here; a missing or blank header means an anonymous user.
pub async fn identify_user(mut req: Request, next: Next) -> Response {
    let user_id = req
        .headers()
        .get(USER_ID_HEADER)
        .and_then(|v| v.to_str().ok())
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string);

    req.extensions_mut().insert(CurrentUser(user_id));
    next.run(req).await
}

#[derive(Clone, Debug, Default)]
pub struct CurrentUser(pub Option<String>);

impl CurrentUser {
    pub fn id(&self) -> Option<&str> {
        self.0.as_deref()
    }
}
