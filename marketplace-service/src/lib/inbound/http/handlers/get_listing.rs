use axum::extract::Path;
use axum::extract::State;
use axum::http::StatusCode;

use super::ApiError;
use super::ApiSuccess;
use super::ListingData;
use crate::domain::listing::models::ListingId;
use crate::domain::listing::ports::ListingServicePort;
use crate::inbound::http::router::AppState;

pub async fn get_listing(
    State(state): State<AppState>,
    Path(listing_id): Path<String>,
) -> Result<ApiSuccess<ListingData>, ApiError> {
    let listing_id = ListingId::from_string(&listing_id)
        .map_err(|e| ApiError::BadRequest(e.to_string()))?;

    state
        .listing_service
        .get_listing(&listing_id)
        .await
        .map_err(ApiError::from)
        .map(|ref listing| ApiSuccess::new(StatusCode::OK, listing.into()))
}
