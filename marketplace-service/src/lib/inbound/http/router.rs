use std::sync::Arc;
use std::time::Duration;

use auth::JwtHandler;
use axum::body::Body;
use axum::http::Request;
use axum::http::Response;
use axum::middleware;
use axum::routing::delete;
use axum::routing::get;
use axum::routing::patch;
use axum::routing::post;
use axum::Router;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::Span;

use super::handlers::authenticate::authenticate;
use super::handlers::create_comment::create_comment;
use super::handlers::create_listing::create_listing;
use super::handlers::create_user::create_user;
use super::handlers::delete_listing::delete_listing;
use super::handlers::get_current_user::get_current_user;
use super::handlers::get_listing::get_listing;
use super::handlers::list_comments::list_comments;
use super::handlers::list_my_listings::list_my_listings;
use super::handlers::search_listings::search_listings;
use super::handlers::update_listing::update_listing;
use super::handlers::update_user::update_user;
use super::middleware::authenticate as auth_middleware;
use crate::domain::comment::service::CommentService;
use crate::domain::listing::service::ListingService;
use crate::domain::user::service::UserService;
use crate::outbound::media::FsPhotoStore;
use crate::outbound::repositories::PostgresCommentRepository;
use crate::outbound::repositories::PostgresListingRepository;
use crate::outbound::repositories::PostgresUserRepository;

#[derive(Clone)]
pub struct AppState {
    pub user_service: Arc<UserService<PostgresUserRepository>>,
    pub listing_service: Arc<ListingService<PostgresListingRepository, FsPhotoStore>>,
    pub comment_service: Arc<CommentService<PostgresCommentRepository>>,
    pub jwt_handler: Arc<JwtHandler>,
    /// Access token lifetime used at login
    pub access_token_ttl: chrono::Duration,
}

pub fn create_router(
    user_service: Arc<UserService<PostgresUserRepository>>,
    listing_service: Arc<ListingService<PostgresListingRepository, FsPhotoStore>>,
    comment_service: Arc<CommentService<PostgresCommentRepository>>,
    jwt_handler: Arc<JwtHandler>,
    access_token_ttl: chrono::Duration,
) -> Router {
    let state = AppState {
        user_service,
        listing_service,
        comment_service,
        jwt_handler,
        access_token_ttl,
    };

    let public_routes = Router::new()
        .route("/api/auth/login", post(authenticate))
        .route("/api/users", post(create_user))
        .route("/api/listings", get(search_listings))
        .route("/api/listings/:listing_id", get(get_listing))
        .route("/api/users/:user_id/comments", post(create_comment))
        .route("/api/users/:user_id/comments", get(list_comments));

    let protected_routes = Router::new()
        .route("/api/users/me", get(get_current_user))
        .route("/api/users/me", patch(update_user))
        .route("/api/users/me/listings", get(list_my_listings))
        .route("/api/listings", post(create_listing))
        .route("/api/listings/:listing_id", patch(update_listing))
        .route("/api/listings/:listing_id", delete(delete_listing))
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            auth_middleware,
        ));

    let trace_layer = TraceLayer::new_for_http()
        .make_span_with(|request: &Request<Body>| {
            tracing::info_span!(
                "http_request",
                method = %request.method(),
                uri = %request.uri(),
                version = ?request.version(),
            )
        })
        .on_request(|request: &Request<Body>, _span: &Span| {
            tracing::info!(
                method = %request.method(),
                uri = %request.uri(),
                "Request started"
            );
        })
        .on_response(
            |response: &Response<Body>, latency: Duration, _span: &Span| {
                tracing::info!(
                    status = response.status().as_u16(),
                    latency_ms = latency.as_millis(),
                    "Request completed"
                );
            },
        );

    Router::new()
        .merge(public_routes)
        .merge(protected_routes)
        .layer(trace_layer)
        .layer(CorsLayer::permissive())
        .with_state(state)
}
