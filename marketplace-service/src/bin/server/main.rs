use std::sync::Arc;

use auth::JwtHandler;
use marketplace_service::config::Config;
use marketplace_service::domain::comment::service::CommentService;
use marketplace_service::domain::listing::service::ListingService;
use marketplace_service::domain::user::service::UserService;
use marketplace_service::inbound::http::router::create_router;
use marketplace_service::outbound::media::FsPhotoStore;
use marketplace_service::outbound::repositories::PostgresCommentRepository;
use marketplace_service::outbound::repositories::PostgresListingRepository;
use marketplace_service::outbound::repositories::PostgresUserRepository;
use sqlx::postgres::PgPoolOptions;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

#[tokio::main]
async fn main() -> Result<(), anyhow::Error> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "marketplace_service=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!(
        service = "marketplace-service",
        version = env!("CARGO_PKG_VERSION"),
        "Service starting"
    );

    // An invalid secret or lifetime aborts here, before anything binds
    let config = Config::load()?;

    tracing::info!(
        http_port = config.server.http_port,
        photo_dir = %config.media.photo_dir,
        access_token_minutes = config.jwt.access_token_minutes,
        "Configuration loaded"
    );

    let pg_pool = PgPoolOptions::new()
        .max_connections(5)
        .connect(&config.database.url)
        .await?;
    tracing::info!(
        max_connections = 5,
        database = "postgresql",
        "Database connection pool created"
    );

    sqlx::migrate!("./migrations").run(&pg_pool).await?;
    tracing::info!(database = "postgresql", "Database migrations completed");

    let jwt_handler = Arc::new(JwtHandler::new(config.jwt.secret.as_bytes()));

    let user_repository = Arc::new(PostgresUserRepository::new(pg_pool.clone()));
    let listing_repository = Arc::new(PostgresListingRepository::new(pg_pool.clone()));
    let comment_repository = Arc::new(PostgresCommentRepository::new(pg_pool));
    let photo_store = Arc::new(FsPhotoStore::new(&config.media.photo_dir));

    let user_service = Arc::new(UserService::new(user_repository));
    let listing_service = Arc::new(ListingService::new(listing_repository, photo_store));
    let comment_service = Arc::new(CommentService::new(comment_repository));

    let http_address = format!("0.0.0.0:{}", config.server.http_port);
    let http_listener = tokio::net::TcpListener::bind(&http_address).await?;
    tracing::info!(
        address = %http_address,
        port = config.server.http_port,
        protocol = "http",
        "Http server listening"
    );

    let http_application = create_router(
        user_service,
        listing_service,
        comment_service,
        jwt_handler,
        chrono::Duration::minutes(config.jwt.access_token_minutes),
    );

    axum::serve(http_listener, http_application).await?;

    Ok(())
}
