use axum::extract::Request;
use axum::extract::State;
use axum::http::StatusCode;
use axum::http::{self};
use axum::middleware::Next;
use axum::response::IntoResponse;
use axum::response::Response;
use axum::Json;
use serde_json::json;

use crate::domain::user::models::UserId;
use crate::domain::user::ports::UserServicePort;
use crate::inbound::http::router::AppState;

/// Extension type to store the authenticated user in request extensions
#[derive(Debug, Clone)]
pub struct AuthenticatedUser {
    pub user_id: UserId,
    pub username: String,
}

fn unauthorized(message: &str) -> Response {
    (
        StatusCode::UNAUTHORIZED,
        Json(json!({ "error": message })),
    )
        .into_response()
}

/// Middleware that verifies bearer tokens and resolves the subject to a
/// stored user.
///
/// Expired and invalid tokens are distinguished in logs but both map to
/// 401. A token whose subject no longer exists is also 401: the token
/// outlives the account, not the other way around.
pub async fn authenticate(
    State(state): State<AppState>,
    mut req: Request,
    next: Next,
) -> Result<Response, Response> {
    // Extract token from Authorization header
    let token = extract_token_from_header(&req)?;

    let claims = state.jwt_handler.verify(token).map_err(|e| {
        match e {
            auth::JwtError::TokenExpired => tracing::debug!("Rejected expired token"),
            _ => tracing::warn!("Token verification failed: {}", e),
        }
        unauthorized("Invalid or expired token")
    })?;

    let user_id = UserId::from_string(&claims.sub).map_err(|e| {
        tracing::warn!("Token subject is not a user id: {}", e);
        unauthorized("Invalid token format")
    })?;

    // Resolve the subject against the credential store; covers tokens
    // issued for a since-deleted account
    let user = state.user_service.get_user(&user_id).await.map_err(|e| {
        tracing::debug!("Token subject did not resolve: {}", e);
        unauthorized("Invalid or expired token")
    })?;

    req.extensions_mut().insert(AuthenticatedUser {
        user_id: user.id,
        username: user.username.as_str().to_string(),
    });

    Ok(next.run(req).await)
}

fn extract_token_from_header(req: &Request) -> Result<&str, Response> {
    let auth_header = req
        .headers()
        .get(http::header::AUTHORIZATION)
        .ok_or_else(|| unauthorized("Missing Authorization header"))?;

    let auth_str = auth_header
        .to_str()
        .map_err(|_| unauthorized("Invalid Authorization header"))?;

    let Some(token) = auth_str.strip_prefix("Bearer ") else {
        return Err(unauthorized(
            "Invalid Authorization header format. Expected: Bearer <token>",
        ));
    };

    Ok(token)
}
