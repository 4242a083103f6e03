use axum::extract::Multipart;
use axum::extract::State;
use axum::http::StatusCode;
use axum::Extension;

use super::ApiError;
use super::ApiSuccess;
use super::ListingData;
use crate::domain::listing::models::CreateListingCommand;
use crate::domain::listing::models::PhotoUpload;
use crate::domain::listing::ports::ListingServicePort;
use crate::inbound::http::middleware::AuthenticatedUser;
use crate::inbound::http::router::AppState;
use crate::user::models::UserId;

/// Publish a new listing.
///
/// Multipart form: text fields plus a `photo` file part. The photo's
/// stored name is generated server-side; only the extension is taken
/// from the upload.
pub async fn create_listing(
    State(state): State<AppState>,
    Extension(auth_user): Extension<AuthenticatedUser>,
    multipart: Multipart,
) -> Result<ApiSuccess<ListingData>, ApiError> {
    let form = CreateListingForm::from_multipart(multipart).await?;
    let command = form.try_into_command(auth_user.user_id)?;

    state
        .listing_service
        .create_listing(command)
        .await
        .map_err(ApiError::from)
        .map(|ref listing| ApiSuccess::new(StatusCode::CREATED, listing.into()))
}

/// Fields collected from the multipart body before validation.
#[derive(Debug, Default)]
struct CreateListingForm {
    title: Option<String>,
    description: Option<String>,
    service_type: Option<String>,
    category: Option<String>,
    province: Option<String>,
    city: Option<String>,
    street: Option<String>,
    street_number: Option<String>,
    price: Option<String>,
    photo: Option<PhotoUpload>,
}

impl CreateListingForm {
    async fn from_multipart(mut multipart: Multipart) -> Result<Self, ApiError> {
        let mut form = Self::default();

        while let Some(field) = multipart
            .next_field()
            .await
            .map_err(|e| ApiError::BadRequest(format!("Invalid multipart body: {}", e)))?
        {
            let Some(name) = field.name().map(str::to_string) else {
                continue;
            };

            if name == "photo" {
                let extension = field
                    .file_name()
                    .and_then(|f| f.rsplit_once('.'))
                    .map(|(_, ext)| ext.to_string())
                    .ok_or_else(|| {
                        ApiError::UnprocessableEntity(
                            "Photo file name must carry an extension".to_string(),
                        )
                    })?;
                let bytes = field.bytes().await.map_err(|e| {
                    ApiError::BadRequest(format!("Failed to read photo bytes: {}", e))
                })?;
                form.photo = Some(PhotoUpload {
                    extension,
                    bytes: bytes.to_vec(),
                });
                continue;
            }

            let value = field
                .text()
                .await
                .map_err(|e| ApiError::BadRequest(format!("Invalid field {}: {}", name, e)))?;

            match name.as_str() {
                "title" => form.title = Some(value),
                "description" => form.description = Some(value),
                "service_type" => form.service_type = Some(value),
                "category" => form.category = Some(value),
                "province" => form.province = Some(value),
                "city" => form.city = Some(value),
                "street" => form.street = Some(value),
                "street_number" => form.street_number = Some(value),
                "price" => form.price = Some(value),
                // Unknown fields are ignored
                _ => {}
            }
        }

        Ok(form)
    }

    fn try_into_command(self, owner_id: UserId) -> Result<CreateListingCommand, ApiError> {
        let price = self
            .price
            .ok_or_else(|| missing_field("price"))?
            .parse::<i64>()
            .map_err(|_| {
                ApiError::UnprocessableEntity("price must be an integer".to_string())
            })?;

        Ok(CreateListingCommand {
            owner_id,
            title: self.title.ok_or_else(|| missing_field("title"))?,
            description: self
                .description
                .ok_or_else(|| missing_field("description"))?,
            service_type: self
                .service_type
                .ok_or_else(|| missing_field("service_type"))?,
            category: self.category.ok_or_else(|| missing_field("category"))?,
            province: self.province.ok_or_else(|| missing_field("province"))?,
            city: self.city.ok_or_else(|| missing_field("city"))?,
            street: self.street.ok_or_else(|| missing_field("street"))?,
            street_number: self
                .street_number
                .ok_or_else(|| missing_field("street_number"))?,
            price,
            photo: self.photo.ok_or_else(|| missing_field("photo"))?,
        })
    }
}

fn missing_field(name: &str) -> ApiError {
    ApiError::UnprocessableEntity(format!("Missing field: {}", name))
}
