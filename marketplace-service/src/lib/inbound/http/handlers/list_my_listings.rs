use axum::extract::State;
use axum::http::StatusCode;
use axum::Extension;

use super::ApiError;
use super::ApiSuccess;
use super::ListingData;
use crate::domain::listing::ports::ListingServicePort;
use crate::inbound::http::middleware::AuthenticatedUser;
use crate::inbound::http::router::AppState;

/// List the authenticated user's own listings.
pub async fn list_my_listings(
    State(state): State<AppState>,
    Extension(auth_user): Extension<AuthenticatedUser>,
) -> Result<ApiSuccess<Vec<ListingData>>, ApiError> {
    state
        .listing_service
        .list_by_owner(&auth_user.user_id)
        .await
        .map_err(ApiError::from)
        .map(|listings| {
            ApiSuccess::new(
                StatusCode::OK,
                listings.iter().map(ListingData::from).collect(),
            )
        })
}
