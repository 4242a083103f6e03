use axum::extract::Query;
use axum::extract::State;
use axum::http::StatusCode;
use serde::Deserialize;

use super::ApiError;
use super::ApiSuccess;
use super::ListingData;
use crate::domain::listing::models::ListingFilter;
use crate::domain::listing::ports::ListingServicePort;
use crate::inbound::http::router::AppState;

/// Search listings by optional query filters.
///
/// Absent parameters do not constrain the result; present ones are
/// combined by conjunction.
pub async fn search_listings(
    State(state): State<AppState>,
    Query(query): Query<SearchListingsQuery>,
) -> Result<ApiSuccess<Vec<ListingData>>, ApiError> {
    let filter = query.into_filter();

    state
        .listing_service
        .search_listings(&filter)
        .await
        .map_err(ApiError::from)
        .map(|listings| {
            ApiSuccess::new(
                StatusCode::OK,
                listings.iter().map(ListingData::from).collect(),
            )
        })
}

#[derive(Debug, Clone, Deserialize)]
pub struct SearchListingsQuery {
    service_type: Option<String>,
    category: Option<String>,
    province: Option<String>,
    city: Option<String>,
    min_price: Option<i64>,
    max_price: Option<i64>,
}

impl SearchListingsQuery {
    fn into_filter(self) -> ListingFilter {
        ListingFilter {
            service_type: self.service_type,
            category: self.category,
            province: self.province,
            city: self.city,
            min_price: self.min_price,
            max_price: self.max_price,
        }
    }
}
