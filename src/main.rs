//! Campreserv Booking Desk Service
//!
//! REST service for the staff-facing booking flow.

use axum::{
    routing::{delete, get, post, put},
    Router,
};
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use campreserv_booking::{
    api,
    config::{AppConfig, DraftStoreKind},
    services::Services,
    store::{
        memory::{MemoryDeadLetterSink, MemoryDraftStore},
        redis::{RedisDeadLetterSink, RedisDraftStore},
        DynDeadLetterSink, DynDraftStore,
    },
    upstream::{DynCampgroundApi, HttpCampgroundApi},
    AppState,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables from .env file
    dotenvy::dotenv().ok();

    // Load configuration
    let config = AppConfig::load().expect("Failed to load configuration");

    // Initialize tracing
    let filter = tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        format!(
            "campreserv_booking={},tower_http=debug",
            config.logging.level
        )
        .into()
    });

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting Booking Desk v{}", env!("CARGO_PKG_VERSION"));

    // Core API client
    let api_client: DynCampgroundApi = Arc::new(
        HttpCampgroundApi::new(&config.upstream).expect("Failed to build core API client"),
    );

    tracing::info!("Core API at {}", config.upstream.base_url);

    // Draft persistence and dead-letter log
    let (draft_store, dead_letters): (DynDraftStore, DynDeadLetterSink) =
        match config.bookings.draft_store {
            DraftStoreKind::Redis => {
                let store =
                    RedisDraftStore::new(&config.redis.url, config.bookings.draft_ttl_hours)
                        .await
                        .expect("Failed to connect to Redis");
                let sink = RedisDeadLetterSink::from_store(&store);
                tracing::info!("Connected to Redis");
                (Arc::new(store), Arc::new(sink))
            }
            DraftStoreKind::Memory => {
                tracing::warn!("Using in-memory draft store; drafts will not survive restarts");
                (
                    Arc::new(MemoryDraftStore::new()),
                    Arc::new(MemoryDeadLetterSink::new()),
                )
            }
        };

    // Save server address before moving config
    let server_host = config.server.host.clone();
    let server_port = config.server.port;

    // Create services
    let services = Services::new(api_client, draft_store, dead_letters, &config.bookings);

    // Create application state
    let state = AppState {
        config: Arc::new(config),
        services: Arc::new(services),
    };

    // Build router
    let app = create_router(state);

    // Start server
    let addr = SocketAddr::new(
        server_host.parse().expect("Invalid host address"),
        server_port,
    );

    tracing::info!("Server listening on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

/// Create the application router with all routes
fn create_router(state: AppState) -> Router {
    // CORS configuration
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    // API v1 routes
    let api_v1 = Router::new()
        // Health check
        .route("/health", get(api::health::health_check))
        .route("/ready", get(api::health::readiness_check))
        // Booking drafts
        .route("/bookings/draft", get(api::drafts::get_draft))
        .route("/bookings/draft", put(api::drafts::put_draft))
        .route("/bookings/draft", delete(api::drafts::discard_draft))
        .route("/bookings/draft/restore", post(api::drafts::restore_draft))
        // Availability
        .route("/availability", get(api::availability::list_sites))
        .route(
            "/availability/suggestions",
            get(api::availability::list_suggestions),
        )
        // Guests
        .route("/guests", get(api::guests::list_guests))
        .route("/guests", post(api::guests::create_guest))
        // Bookings
        .route("/bookings/validate", post(api::bookings::validate_draft))
        .route("/bookings/pricing", post(api::bookings::price_draft))
        .route("/bookings/submit", post(api::bookings::submit))
        .route("/bookings/hold", post(api::bookings::place_hold))
        .route(
            "/reservations/:id/payment-completed",
            post(api::bookings::payment_completed),
        )
        .route(
            "/reservations/:id/payment-abandoned",
            post(api::bookings::payment_abandoned),
        )
        .with_state(state);

    // OpenAPI documentation
    let openapi = api::openapi::create_openapi_router();

    Router::new()
        .nest("/api/v1", api_v1)
        .merge(openapi)
        .layer(TraceLayer::new_for_http())
        .layer(cors)
}
