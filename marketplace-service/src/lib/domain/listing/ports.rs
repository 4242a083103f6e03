use async_trait::async_trait;

use crate::domain::listing::errors::ListingError;
use crate::domain::listing::errors::PhotoStoreError;
use crate::domain::listing::models::CreateListingCommand;
use crate::domain::listing::models::Listing;
use crate::domain::listing::models::ListingFilter;
use crate::domain::listing::models::ListingId;
use crate::domain::listing::models::UpdateListingCommand;
use crate::user::models::UserId;

/// Port for listing domain service operations.
#[async_trait]
pub trait ListingServicePort: Send + Sync + 'static {
    /// Publish a new listing, storing its photo first.
    ///
    /// # Errors
    /// * `InvalidPrice` - Negative price
    /// * `Photo` - Photo could not be stored
    /// * `DatabaseError` - Database operation failed
    async fn create_listing(&self, command: CreateListingCommand)
        -> Result<Listing, ListingError>;

    /// Retrieve a single listing.
    ///
    /// # Errors
    /// * `NotFound` - Listing does not exist
    /// * `DatabaseError` - Database operation failed
    async fn get_listing(&self, id: &ListingId) -> Result<Listing, ListingError>;

    /// Search listings by a conjunction of the present filters,
    /// newest first.
    ///
    /// # Errors
    /// * `DatabaseError` - Database operation failed
    async fn search_listings(&self, filter: &ListingFilter) -> Result<Vec<Listing>, ListingError>;

    /// Retrieve all listings owned by a user, newest first.
    ///
    /// # Errors
    /// * `DatabaseError` - Database operation failed
    async fn list_by_owner(&self, owner_id: &UserId) -> Result<Vec<Listing>, ListingError>;

    /// Update a listing's fields. Only the owner may update.
    ///
    /// # Errors
    /// * `NotFound` - Listing does not exist
    /// * `NotOwner` - Actor does not own the listing
    /// * `InvalidPrice` - Negative price
    /// * `DatabaseError` - Database operation failed
    async fn update_listing(
        &self,
        id: &ListingId,
        actor: &UserId,
        command: UpdateListingCommand,
    ) -> Result<Listing, ListingError>;

    /// Delete a listing. Only the owner may delete.
    ///
    /// # Errors
    /// * `NotFound` - Listing does not exist
    /// * `NotOwner` - Actor does not own the listing
    /// * `DatabaseError` - Database operation failed
    async fn delete_listing(&self, id: &ListingId, actor: &UserId) -> Result<(), ListingError>;
}

/// Persistence operations for the listing aggregate.
#[async_trait]
pub trait ListingRepository: Send + Sync + 'static {
    /// Persist new listing to storage.
    ///
    /// # Errors
    /// * `DatabaseError` - Database operation failed
    async fn create(&self, listing: Listing) -> Result<Listing, ListingError>;

    /// Retrieve listing by identifier.
    ///
    /// # Errors
    /// * `DatabaseError` - Database operation failed
    async fn find_by_id(&self, id: &ListingId) -> Result<Option<Listing>, ListingError>;

    /// Retrieve listings matching the present filters, newest first.
    ///
    /// # Errors
    /// * `DatabaseError` - Database operation failed
    async fn search(&self, filter: &ListingFilter) -> Result<Vec<Listing>, ListingError>;

    /// Retrieve listings owned by a user, newest first.
    ///
    /// # Errors
    /// * `DatabaseError` - Database operation failed
    async fn find_by_owner(&self, owner_id: &UserId) -> Result<Vec<Listing>, ListingError>;

    /// Update existing listing in storage.
    ///
    /// # Errors
    /// * `NotFound` - Listing does not exist
    /// * `DatabaseError` - Database operation failed
    async fn update(&self, listing: Listing) -> Result<Listing, ListingError>;

    /// Remove listing from storage.
    ///
    /// # Errors
    /// * `NotFound` - Listing does not exist
    /// * `DatabaseError` - Database operation failed
    async fn delete(&self, id: &ListingId) -> Result<(), ListingError>;
}

/// Storage for uploaded listing photos.
#[async_trait]
pub trait PhotoStore: Send + Sync + 'static {
    /// Store photo bytes and return the stored path.
    ///
    /// The file name is generated by the store; the caller only
    /// supplies the extension.
    ///
    /// # Errors
    /// * `UnsupportedFormat` - Extension is not an accepted image format
    /// * `WriteFailed` - Bytes could not be written
    async fn save(&self, extension: &str, bytes: Vec<u8>) -> Result<String, PhotoStoreError>;
}
