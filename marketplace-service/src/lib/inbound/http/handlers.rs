use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::response::Response;
use axum::Json;
use chrono::DateTime;
use chrono::Utc;
use serde::Serialize;

use crate::comment::errors::CommentError;
use crate::domain::listing::errors::ListingError;
use crate::domain::listing::errors::PhotoStoreError;
use crate::domain::listing::models::Listing;
use crate::user::errors::UserError;

pub mod authenticate;
pub mod create_comment;
pub mod create_listing;
pub mod create_user;
pub mod delete_listing;
pub mod get_current_user;
pub mod get_listing;
pub mod list_comments;
pub mod list_my_listings;
pub mod search_listings;
pub mod update_listing;
pub mod update_user;

#[derive(Debug, Clone)]
pub struct ApiSuccess<T: Serialize + PartialEq>(StatusCode, Json<ApiResponseBody<T>>);

impl<T> PartialEq for ApiSuccess<T>
where
    T: Serialize + PartialEq,
{
    fn eq(&self, other: &Self) -> bool {
        self.0 == other.0 && self.1 .0 == other.1 .0
    }
}

impl<T: Serialize + PartialEq> ApiSuccess<T> {
    pub fn new(status: StatusCode, data: T) -> Self {
        ApiSuccess(status, Json(ApiResponseBody::new(status, data)))
    }
}

impl<T: Serialize + PartialEq> IntoResponse for ApiSuccess<T> {
    fn into_response(self) -> Response {
        (self.0, self.1).into_response()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiError {
    InternalServerError(String),
    UnprocessableEntity(String),
    BadRequest(String),
    NotFound(String),
    Conflict(String),
    Unauthorized(String),
    Forbidden(String),
}

impl From<anyhow::Error> for ApiError {
    fn from(e: anyhow::Error) -> Self {
        Self::InternalServerError(e.to_string())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            ApiError::InternalServerError(msg) => (StatusCode::INTERNAL_SERVER_ERROR, msg),
            ApiError::UnprocessableEntity(msg) => (StatusCode::UNPROCESSABLE_ENTITY, msg),
            ApiError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
            ApiError::NotFound(msg) => (StatusCode::NOT_FOUND, msg),
            ApiError::Conflict(msg) => (StatusCode::CONFLICT, msg),
            ApiError::Unauthorized(msg) => (StatusCode::UNAUTHORIZED, msg),
            ApiError::Forbidden(msg) => (StatusCode::FORBIDDEN, msg),
        };

        (status, Json(ApiResponseBody::new_error(status, message))).into_response()
    }
}

impl From<UserError> for ApiError {
    fn from(err: UserError) -> Self {
        match err {
            UserError::NotFound(_) => ApiError::NotFound(err.to_string()),
            UserError::UsernameAlreadyExists(_) | UserError::EmailAlreadyExists(_) => {
                ApiError::Conflict(err.to_string())
            }
            UserError::InvalidCredentials => ApiError::Unauthorized(err.to_string()),
            UserError::InvalidUsername(_)
            | UserError::InvalidEmail(_)
            | UserError::InvalidUserId(_) => ApiError::UnprocessableEntity(err.to_string()),
            UserError::DatabaseError(_) | UserError::Unknown(_) => {
                ApiError::InternalServerError(err.to_string())
            }
        }
    }
}

impl From<ListingError> for ApiError {
    fn from(err: ListingError) -> Self {
        match err {
            ListingError::NotFound(_) => ApiError::NotFound(err.to_string()),
            ListingError::NotOwner(_) => ApiError::Forbidden(err.to_string()),
            ListingError::InvalidPrice(_) | ListingError::InvalidListingId(_) => {
                ApiError::UnprocessableEntity(err.to_string())
            }
            ListingError::Photo(PhotoStoreError::UnsupportedFormat(_)) => {
                ApiError::UnprocessableEntity(err.to_string())
            }
            ListingError::Photo(PhotoStoreError::WriteFailed(_))
            | ListingError::DatabaseError(_)
            | ListingError::Unknown(_) => ApiError::InternalServerError(err.to_string()),
        }
    }
}

impl From<CommentError> for ApiError {
    fn from(err: CommentError) -> Self {
        match err {
            CommentError::SubjectUserNotFound(_) => ApiError::NotFound(err.to_string()),
            CommentError::InvalidRating(_)
            | CommentError::InvalidAuthorEmail(_)
            | CommentError::InvalidCommentId(_) => ApiError::UnprocessableEntity(err.to_string()),
            CommentError::DatabaseError(_) | CommentError::Unknown(_) => {
                ApiError::InternalServerError(err.to_string())
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ApiResponseBody<T: Serialize + PartialEq> {
    status_code: u16,
    data: T,
}

impl<T: Serialize + PartialEq> ApiResponseBody<T> {
    pub fn new(status_code: StatusCode, data: T) -> Self {
        Self {
            status_code: status_code.as_u16(),
            data,
        }
    }
}

impl ApiResponseBody<ApiErrorData> {
    pub fn new_error(status_code: StatusCode, message: String) -> Self {
        Self {
            status_code: status_code.as_u16(),
            data: ApiErrorData { message },
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ApiErrorData {
    pub message: String,
}

/// Listing representation shared by the listing handlers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ListingData {
    pub id: String,
    pub owner_id: String,
    pub title: String,
    pub description: String,
    pub service_type: String,
    pub category: String,
    pub province: String,
    pub city: String,
    pub street: String,
    pub street_number: String,
    pub price: i64,
    pub photo_path: String,
    pub created_at: DateTime<Utc>,
}

impl From<&Listing> for ListingData {
    fn from(listing: &Listing) -> Self {
        Self {
            id: listing.id.to_string(),
            owner_id: listing.owner_id.to_string(),
            title: listing.title.clone(),
            description: listing.description.clone(),
            service_type: listing.service_type.clone(),
            category: listing.category.clone(),
            province: listing.province.clone(),
            city: listing.city.clone(),
            street: listing.street.clone(),
            street_number: listing.street_number.clone(),
            price: listing.price,
            photo_path: listing.photo_path.clone(),
            created_at: listing.created_at,
        }
    }
}
