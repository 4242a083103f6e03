use axum::extract::Path;
use axum::extract::State;
use axum::http::StatusCode;
use axum::Extension;
use axum::Json;
use serde::Deserialize;

use super::ApiError;
use super::ApiSuccess;
use super::ListingData;
use crate::domain::listing::models::ListingId;
use crate::domain::listing::models::UpdateListingCommand;
use crate::domain::listing::ports::ListingServicePort;
use crate::inbound::http::middleware::AuthenticatedUser;
use crate::inbound::http::router::AppState;

/// HTTP request body for updating a listing (raw JSON)
#[derive(Debug, Deserialize)]
pub struct UpdateListingRequest {
    pub title: Option<String>,
    pub description: Option<String>,
    pub service_type: Option<String>,
    pub category: Option<String>,
    pub province: Option<String>,
    pub city: Option<String>,
    pub street: Option<String>,
    pub street_number: Option<String>,
    pub price: Option<i64>,
}

impl From<UpdateListingRequest> for UpdateListingCommand {
    fn from(req: UpdateListingRequest) -> Self {
        UpdateListingCommand {
            title: req.title,
            description: req.description,
            service_type: req.service_type,
            category: req.category,
            province: req.province,
            city: req.city,
            street: req.street,
            street_number: req.street_number,
            price: req.price,
        }
    }
}

pub async fn update_listing(
    State(state): State<AppState>,
    Extension(auth_user): Extension<AuthenticatedUser>,
    Path(listing_id): Path<String>,
    Json(req): Json<UpdateListingRequest>,
) -> Result<ApiSuccess<ListingData>, ApiError> {
    let listing_id = ListingId::from_string(&listing_id)
        .map_err(|e| ApiError::BadRequest(e.to_string()))?;

    state
        .listing_service
        .update_listing(&listing_id, &auth_user.user_id, req.into())
        .await
        .map_err(ApiError::from)
        .map(|ref listing| ApiSuccess::new(StatusCode::OK, listing.into()))
}
