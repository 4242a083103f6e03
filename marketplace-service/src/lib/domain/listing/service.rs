use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;

use crate::domain::listing::errors::ListingError;
use crate::domain::listing::models::CreateListingCommand;
use crate::domain::listing::models::Listing;
use crate::domain::listing::models::ListingFilter;
use crate::domain::listing::models::ListingId;
use crate::domain::listing::models::UpdateListingCommand;
use crate::domain::listing::ports::ListingRepository;
use crate::domain::listing::ports::ListingServicePort;
use crate::domain::listing::ports::PhotoStore;
use crate::user::models::UserId;

/// Domain service implementation for listing operations.
pub struct ListingService<LR, PS>
where
    LR: ListingRepository,
    PS: PhotoStore,
{
    repository: Arc<LR>,
    photo_store: Arc<PS>,
}

impl<LR, PS> ListingService<LR, PS>
where
    LR: ListingRepository,
    PS: PhotoStore,
{
    pub fn new(repository: Arc<LR>, photo_store: Arc<PS>) -> Self {
        Self {
            repository,
            photo_store,
        }
    }

    /// Fetch a listing and check the actor owns it.
    async fn owned_listing(
        &self,
        id: &ListingId,
        actor: &UserId,
    ) -> Result<Listing, ListingError> {
        let listing = self
            .repository
            .find_by_id(id)
            .await?
            .ok_or(ListingError::NotFound(id.to_string()))?;

        if listing.owner_id != *actor {
            return Err(ListingError::NotOwner(id.to_string()));
        }

        Ok(listing)
    }
}

#[async_trait]
impl<LR, PS> ListingServicePort for ListingService<LR, PS>
where
    LR: ListingRepository,
    PS: PhotoStore,
{
    async fn create_listing(
        &self,
        command: CreateListingCommand,
    ) -> Result<Listing, ListingError> {
        if command.price < 0 {
            return Err(ListingError::InvalidPrice(command.price));
        }

        let photo_path = self
            .photo_store
            .save(&command.photo.extension, command.photo.bytes)
            .await?;

        let listing = Listing {
            id: ListingId::new(),
            owner_id: command.owner_id,
            title: command.title,
            description: command.description,
            service_type: command.service_type,
            category: command.category,
            province: command.province,
            city: command.city,
            street: command.street,
            street_number: command.street_number,
            price: command.price,
            photo_path,
            created_at: Utc::now(),
        };

        self.repository.create(listing).await
    }

    async fn get_listing(&self, id: &ListingId) -> Result<Listing, ListingError> {
        self.repository
            .find_by_id(id)
            .await?
            .ok_or(ListingError::NotFound(id.to_string()))
    }

    async fn search_listings(&self, filter: &ListingFilter) -> Result<Vec<Listing>, ListingError> {
        self.repository.search(filter).await
    }

    async fn list_by_owner(&self, owner_id: &UserId) -> Result<Vec<Listing>, ListingError> {
        self.repository.find_by_owner(owner_id).await
    }

    async fn update_listing(
        &self,
        id: &ListingId,
        actor: &UserId,
        command: UpdateListingCommand,
    ) -> Result<Listing, ListingError> {
        if let Some(price) = command.price {
            if price < 0 {
                return Err(ListingError::InvalidPrice(price));
            }
        }

        let mut listing = self.owned_listing(id, actor).await?;

        if let Some(title) = command.title {
            listing.title = title;
        }
        if let Some(description) = command.description {
            listing.description = description;
        }
        if let Some(service_type) = command.service_type {
            listing.service_type = service_type;
        }
        if let Some(category) = command.category {
            listing.category = category;
        }
        if let Some(province) = command.province {
            listing.province = province;
        }
        if let Some(city) = command.city {
            listing.city = city;
        }
        if let Some(street) = command.street {
            listing.street = street;
        }
        if let Some(street_number) = command.street_number {
            listing.street_number = street_number;
        }
        if let Some(price) = command.price {
            listing.price = price;
        }

        self.repository.update(listing).await
    }

    async fn delete_listing(&self, id: &ListingId, actor: &UserId) -> Result<(), ListingError> {
        self.owned_listing(id, actor).await?;
        self.repository.delete(id).await
    }
}

#[cfg(test)]
mod tests {
    use mockall::mock;
    use mockall::predicate::*;

    use super::*;
    use crate::domain::listing::errors::PhotoStoreError;
    use crate::domain::listing::models::PhotoUpload;

    mock! {
        pub TestListingRepository {}

        #[async_trait]
        impl ListingRepository for TestListingRepository {
            async fn create(&self, listing: Listing) -> Result<Listing, ListingError>;
            async fn find_by_id(&self, id: &ListingId) -> Result<Option<Listing>, ListingError>;
            async fn search(&self, filter: &ListingFilter) -> Result<Vec<Listing>, ListingError>;
            async fn find_by_owner(&self, owner_id: &UserId) -> Result<Vec<Listing>, ListingError>;
            async fn update(&self, listing: Listing) -> Result<Listing, ListingError>;
            async fn delete(&self, id: &ListingId) -> Result<(), ListingError>;
        }
    }

    mock! {
        pub TestPhotoStore {}

        #[async_trait]
        impl PhotoStore for TestPhotoStore {
            async fn save(&self, extension: &str, bytes: Vec<u8>) -> Result<String, PhotoStoreError>;
        }
    }

    fn create_command(owner_id: UserId, price: i64) -> CreateListingCommand {
        CreateListingCommand {
            owner_id,
            title: "Full tune-up".to_string(),
            description: "Drivetrain clean and gear adjustment".to_string(),
            service_type: "repair".to_string(),
            category: "road".to_string(),
            province: "Mazowieckie".to_string(),
            city: "Warszawa".to_string(),
            street: "Polna".to_string(),
            street_number: "12".to_string(),
            price,
            photo: PhotoUpload {
                extension: "jpg".to_string(),
                bytes: vec![0xff, 0xd8, 0xff],
            },
        }
    }

    fn stored_listing(id: ListingId, owner_id: UserId) -> Listing {
        Listing {
            id,
            owner_id,
            title: "Full tune-up".to_string(),
            description: "Drivetrain clean and gear adjustment".to_string(),
            service_type: "repair".to_string(),
            category: "road".to_string(),
            province: "Mazowieckie".to_string(),
            city: "Warszawa".to_string(),
            street: "Polna".to_string(),
            street_number: "12".to_string(),
            price: 150,
            photo_path: "photos/abc.jpg".to_string(),
            created_at: Utc::now(),
        }
    }

    #[tokio::test]
    async fn test_create_listing_stores_photo_then_persists() {
        let mut repository = MockTestListingRepository::new();
        let mut photo_store = MockTestPhotoStore::new();

        photo_store
            .expect_save()
            .withf(|ext, bytes| ext == "jpg" && !bytes.is_empty())
            .times(1)
            .returning(|_, _| Ok("photos/abc.jpg".to_string()));

        repository
            .expect_create()
            .withf(|listing| listing.photo_path == "photos/abc.jpg" && listing.price == 150)
            .times(1)
            .returning(|listing| Ok(listing));

        let service = ListingService::new(Arc::new(repository), Arc::new(photo_store));

        let owner = UserId::new();
        let listing = service.create_listing(create_command(owner, 150)).await.unwrap();
        assert_eq!(listing.owner_id, owner);
        assert_eq!(listing.photo_path, "photos/abc.jpg");
    }

    #[tokio::test]
    async fn test_create_listing_rejects_negative_price() {
        let repository = MockTestListingRepository::new();
        let mut photo_store = MockTestPhotoStore::new();
        photo_store.expect_save().times(0);

        let service = ListingService::new(Arc::new(repository), Arc::new(photo_store));

        let result = service.create_listing(create_command(UserId::new(), -5)).await;
        assert!(matches!(result.unwrap_err(), ListingError::InvalidPrice(-5)));
    }

    #[tokio::test]
    async fn test_create_listing_photo_store_failure() {
        let mut repository = MockTestListingRepository::new();
        let mut photo_store = MockTestPhotoStore::new();

        photo_store
            .expect_save()
            .times(1)
            .returning(|ext, _| Err(PhotoStoreError::UnsupportedFormat(ext.to_string())));
        repository.expect_create().times(0);

        let service = ListingService::new(Arc::new(repository), Arc::new(photo_store));

        let result = service.create_listing(create_command(UserId::new(), 150)).await;
        assert!(matches!(result.unwrap_err(), ListingError::Photo(_)));
    }

    #[tokio::test]
    async fn test_get_listing_not_found() {
        let mut repository = MockTestListingRepository::new();
        repository
            .expect_find_by_id()
            .times(1)
            .returning(|_| Ok(None));

        let service =
            ListingService::new(Arc::new(repository), Arc::new(MockTestPhotoStore::new()));

        let result = service.get_listing(&ListingId::new()).await;
        assert!(matches!(result.unwrap_err(), ListingError::NotFound(_)));
    }

    #[tokio::test]
    async fn test_search_passes_filter_through() {
        let mut repository = MockTestListingRepository::new();

        let filter = ListingFilter {
            city: Some("Warszawa".to_string()),
            max_price: Some(200),
            ..Default::default()
        };
        let expected = filter.clone();

        repository
            .expect_search()
            .withf(move |f| *f == expected)
            .times(1)
            .returning(|_| Ok(vec![]));

        let service =
            ListingService::new(Arc::new(repository), Arc::new(MockTestPhotoStore::new()));

        let listings = service.search_listings(&filter).await.unwrap();
        assert!(listings.is_empty());
    }

    #[tokio::test]
    async fn test_update_listing_owner_only() {
        let listing_id = ListingId::new();
        let owner = UserId::new();
        let stranger = UserId::new();

        let mut repository = MockTestListingRepository::new();
        let stored = stored_listing(listing_id, owner);
        repository
            .expect_find_by_id()
            .times(1)
            .returning(move |_| Ok(Some(stored.clone())));
        repository.expect_update().times(0);

        let service =
            ListingService::new(Arc::new(repository), Arc::new(MockTestPhotoStore::new()));

        let command = UpdateListingCommand {
            price: Some(99),
            ..Default::default()
        };
        let result = service.update_listing(&listing_id, &stranger, command).await;
        assert!(matches!(result.unwrap_err(), ListingError::NotOwner(_)));
    }

    #[tokio::test]
    async fn test_update_listing_applies_partial_fields() {
        let listing_id = ListingId::new();
        let owner = UserId::new();

        let mut repository = MockTestListingRepository::new();
        let stored = stored_listing(listing_id, owner);
        repository
            .expect_find_by_id()
            .times(1)
            .returning(move |_| Ok(Some(stored.clone())));
        repository
            .expect_update()
            .withf(|listing| {
                listing.price == 99
                    && listing.title == "Winter service"
                    && listing.city == "Warszawa"
            })
            .times(1)
            .returning(|listing| Ok(listing));

        let service =
            ListingService::new(Arc::new(repository), Arc::new(MockTestPhotoStore::new()));

        let command = UpdateListingCommand {
            title: Some("Winter service".to_string()),
            price: Some(99),
            ..Default::default()
        };
        let updated = service.update_listing(&listing_id, &owner, command).await.unwrap();
        assert_eq!(updated.title, "Winter service");
    }

    #[tokio::test]
    async fn test_delete_listing_owner_only() {
        let listing_id = ListingId::new();
        let owner = UserId::new();
        let stranger = UserId::new();

        let mut repository = MockTestListingRepository::new();
        let stored = stored_listing(listing_id, owner);
        repository
            .expect_find_by_id()
            .times(1)
            .returning(move |_| Ok(Some(stored.clone())));
        repository.expect_delete().times(0);

        let service =
            ListingService::new(Arc::new(repository), Arc::new(MockTestPhotoStore::new()));

        let result = service.delete_listing(&listing_id, &stranger).await;
        assert!(matches!(result.unwrap_err(), ListingError::NotOwner(_)));
    }

    #[tokio::test]
    async fn test_delete_listing_success() {
        let listing_id = ListingId::new();
        let owner = UserId::new();

        let mut repository = MockTestListingRepository::new();
        let stored = stored_listing(listing_id, owner);
        repository
            .expect_find_by_id()
            .times(1)
            .returning(move |_| Ok(Some(stored.clone())));
        repository
            .expect_delete()
            .withf(move |id| *id == listing_id)
            .times(1)
            .returning(|_| Ok(()));

        let service =
            ListingService::new(Arc::new(repository), Arc::new(MockTestPhotoStore::new()));

        assert!(service.delete_listing(&listing_id, &owner).await.is_ok());
    }
}
