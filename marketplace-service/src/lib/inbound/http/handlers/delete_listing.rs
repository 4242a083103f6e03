use axum::extract::Path;
use axum::extract::State;
use axum::http::StatusCode;
use axum::Extension;

use super::ApiError;
use super::ApiSuccess;
use crate::domain::listing::models::ListingId;
use crate::domain::listing::ports::ListingServicePort;
use crate::inbound::http::middleware::AuthenticatedUser;
use crate::inbound::http::router::AppState;

pub async fn delete_listing(
    State(state): State<AppState>,
    Extension(auth_user): Extension<AuthenticatedUser>,
    Path(listing_id): Path<String>,
) -> Result<ApiSuccess<()>, ApiError> {
    let listing_id = ListingId::from_string(&listing_id)
        .map_err(|e| ApiError::BadRequest(e.to_string()))?;

    state
        .listing_service
        .delete_listing(&listing_id, &auth_user.user_id)
        .await
        .map_err(ApiError::from)
        .map(|_| ApiSuccess::new(StatusCode::NO_CONTENT, ()))
}
