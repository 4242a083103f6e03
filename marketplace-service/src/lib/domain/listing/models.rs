use std::fmt;

use chrono::DateTime;
use chrono::Utc;
use uuid::Uuid;

use crate::listing::errors::ListingIdError;
use crate::user::models::UserId;

/// A bicycle-service classified ad.
#[derive(Debug, Clone)]
pub struct Listing {
    pub id: ListingId,
    pub owner_id: UserId,
    pub title: String,
    pub description: String,
    /// Kind of service offered (repair, tuning, rental, ...)
    pub service_type: String,
    /// Category of bike the service targets
    pub category: String,
    pub province: String,
    pub city: String,
    pub street: String,
    pub street_number: String,
    pub price: i64,
    /// Path of the stored photo, relative to the media directory
    pub photo_path: String,
    pub created_at: DateTime<Utc>,
}

/// Listing unique identifier type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ListingId(pub Uuid);

impl ListingId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Parse a listing ID from string.
    ///
    /// # Errors
    /// * `InvalidFormat` - String is not a valid UUID
    pub fn from_string(s: &str) -> Result<Self, ListingIdError> {
        Uuid::parse_str(s)
            .map(ListingId)
            .map_err(|e| ListingIdError::InvalidFormat(e.to_string()))
    }
}

impl Default for ListingId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for ListingId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Photo bytes received with a create-listing request.
///
/// The extension is taken from the upload and re-checked by the photo
/// store; the stored file name is generated server-side.
#[derive(Debug, Clone)]
pub struct PhotoUpload {
    pub extension: String,
    pub bytes: Vec<u8>,
}

/// Command to publish a new listing.
#[derive(Debug)]
pub struct CreateListingCommand {
    pub owner_id: UserId,
    pub title: String,
    pub description: String,
    pub service_type: String,
    pub category: String,
    pub province: String,
    pub city: String,
    pub street: String,
    pub street_number: String,
    pub price: i64,
    pub photo: PhotoUpload,
}

/// Command to update an existing listing.
///
/// All fields optional; the photo is fixed at creation.
#[derive(Debug, Default)]
pub struct UpdateListingCommand {
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

/// Optional search filters, combined by conjunction.
///
/// Only filters whose argument is present constrain the result set; an
/// empty filter matches every listing.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListingFilter {
    pub service_type: Option<String>,
    pub category: Option<String>,
    pub province: Option<String>,
    pub city: Option<String>,
    pub min_price: Option<i64>,
    pub max_price: Option<i64>,
}

impl ListingFilter {
    pub fn is_empty(&self) -> bool {
        self.service_type.is_none()
            && self.category.is_none()
            && self.province.is_none()
            && self.city.is_none()
            && self.min_price.is_none()
            && self.max_price.is_none()
    }
}
