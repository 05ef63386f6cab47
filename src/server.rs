//! # Server Configuration
//!
//! Router construction, request middleware and the HTTP listener for the
//! booking directory.

use std::sync::Arc;

use axum::{
    Router,
    extract::Request,
    http::HeaderValue,
    middleware::{self, Next},
    response::Response,
    routing::{get, post},
};
use sea_orm::DatabaseConnection;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::config::AppConfig;
use crate::handlers::{self, artists, shows, venues};
use crate::telemetry::{self, TRACE_ID_HEADER, TraceContext};

/// Application state containing shared resources
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub db: DatabaseConnection,
}

/// Creates and configures the Axum application router
pub fn create_app(state: AppState) -> Router {
    Router::new()
        .route("/", get(handlers::root))
        .route("/health", get(handlers::health))
        .route("/venues", get(venues::list_venues).post(venues::create_venue))
        .route("/venues/search", post(venues::search_venues))
        .route(
            "/venues/{id}",
            get(venues::get_venue)
                .put(venues::update_venue)
                .delete(venues::delete_venue),
        )
        .route(
            "/artists",
            get(artists::list_artists).post(artists::create_artist),
        )
        .route("/artists/search", post(artists::search_artists))
        .route(
            "/artists/{id}",
            get(artists::get_artist)
                .put(artists::update_artist)
                .delete(artists::delete_artist),
        )
        .route("/shows", get(shows::list_shows).post(shows::create_show))
        .with_state(state)
        .merge(SwaggerUi::new("/docs").url("/openapi.json", ApiDoc::openapi()))
        .layer(middleware::from_fn(trace_id_middleware))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
}

/// Runs each request inside a [`TraceContext`] and echoes its id back in the
/// `X-Trace-Id` response header.
async fn trace_id_middleware(request: Request, next: Next) -> Response {
    let context = TraceContext::from_client(
        request
            .headers()
            .get(TRACE_ID_HEADER)
            .and_then(|value| value.to_str().ok()),
    );
    let trace_id = context.trace_id.clone();

    let mut response = telemetry::with_trace_context(context, next.run(request)).await;
    if let Ok(value) = HeaderValue::from_str(&trace_id) {
        response.headers_mut().insert(TRACE_ID_HEADER, value);
    }
    response
}

/// Starts the server with the given configuration
pub async fn run_server(
    config: AppConfig,
    db: DatabaseConnection,
) -> Result<(), Box<dyn std::error::Error>> {
    let addr = config
        .bind_addr()
        .map_err(|e| format!("Invalid server address: {}", e))?;

    let state = AppState {
        config: Arc::new(config),
        db,
    };
    let profile = state.config.profile.clone();
    let app = create_app(state);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!(%addr, %profile, "Booking directory listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %err, "Failed to listen for shutdown signal");
        return;
    }
    tracing::info!("Shutdown signal received");
}

/// OpenAPI documentation
#[derive(OpenApi)]
#[openapi(
    paths(
        crate::handlers::root,
        crate::handlers::health,
        crate::handlers::venues::list_venues,
        crate::handlers::venues::create_venue,
        crate::handlers::venues::search_venues,
        crate::handlers::venues::get_venue,
        crate::handlers::venues::update_venue,
        crate::handlers::venues::delete_venue,
        crate::handlers::artists::list_artists,
        crate::handlers::artists::create_artist,
        crate::handlers::artists::search_artists,
        crate::handlers::artists::get_artist,
        crate::handlers::artists::update_artist,
        crate::handlers::artists::delete_artist,
        crate::handlers::shows::list_shows,
        crate::handlers::shows::create_show,
    ),
    components(
        schemas(
            crate::models::ServiceInfo,
            crate::models::venue::VenueDraft,
            crate::models::artist::ArtistDraft,
            crate::models::show::ShowDraft,
            crate::handlers::HomeResponse,
            crate::handlers::HealthResponse,
            crate::handlers::SearchRequest,
            crate::booking::Saved,
            crate::booking::Deleted,
            crate::booking::DirectoryEntry,
            crate::booking::RecentListings,
            crate::booking::SearchResults,
            crate::booking::SearchResultItem,
            crate::booking::VenueArea,
            crate::booking::VenueSummary,
            crate::booking::VenueDetail,
            crate::booking::VenueShow,
            crate::booking::ArtistDetail,
            crate::booking::ArtistShow,
            crate::booking::ShowBooked,
            crate::booking::ShowSummary,
            crate::error::ApiError,
        )
    ),
    tags(
        (name = "root", description = "Service information and health"),
        (name = "venues", description = "Venue directory"),
        (name = "artists", description = "Artist directory"),
        (name = "shows", description = "Show bookings"),
    ),
    info(
        title = "Booking Directory API",
        description = "Venues, artists and the shows that link them",
        version = env!("CARGO_PKG_VERSION"),
    )
)]
pub struct ApiDoc;
