//! # Campus API
//!
//! The API crate provides the web server for the campus facility
//! reservation backend: student accounts, organizers, activity requests,
//! and parking and locker reservations.
//!
//! ## Architecture
//!
//! This crate follows a layered architecture:
//!
//! - **Routes**: Define API endpoints and URL structure
//! - **Handlers**: Translate HTTP requests into store and service calls
//! - **Middleware**: Error mapping, password hashing, and admin extraction
//! - **Config**: Handle environment and application configuration
//!
//! Handlers only see the storage traits from `campus_core`, so the same
//! router runs against [`campus_db::PgStore`] in production and against
//! the in-memory store in tests.

/// Configuration module for API settings
pub mod config;
/// Request handlers that implement business logic
pub mod handlers;
/// Middleware for authentication, logging, and error handling
pub mod middleware;
/// Route definitions and API endpoint structure
pub mod routes;

use std::{sync::Arc, time::Duration};

use axum::{
    BoxError, Json, Router,
    error_handling::HandleErrorLayer,
    http::{HeaderName, HeaderValue, Method, StatusCode, header},
};
use campus_core::{
    ReservationService,
    repository::{
        AccountRepository, ActivityRepository, OrganizerRepository, ReservationStore,
        StudentDirectory,
    },
};
use eyre::Result;
use serde_json::{Value, json};
use tokio::net::TcpListener;
use tower::ServiceBuilder;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::{error, info, warn};
use tracing_subscriber::FmtSubscriber;

use crate::middleware::{auth::ADMIN_ACCOUNT_HEADER, error_handling::SERVER_ERROR_MESSAGE};

/// Shared application state that is accessible to all request handlers
///
/// # Example
///
/// ```
/// use std::sync::Arc;
/// use campus_api::{ApiState, build_router};
/// use campus_db::mock::MemoryStore;
///
/// let state = Arc::new(ApiState::from_store(Arc::new(MemoryStore::new())));
/// let app = build_router(state);
/// ```
pub struct ApiState {
    pub accounts: Arc<dyn AccountRepository>,
    pub students: Arc<dyn StudentDirectory>,
    pub organizers: Arc<dyn OrganizerRepository>,
    pub activities: Arc<dyn ActivityRepository>,
    /// Admission service in front of the reservation store
    pub reservations: ReservationService,
}

impl ApiState {
    /// Builds the state from one store implementing every trait.
    pub fn from_store<S>(store: Arc<S>) -> Self
    where
        S: AccountRepository
            + StudentDirectory
            + OrganizerRepository
            + ActivityRepository
            + ReservationStore
            + 'static,
    {
        Self {
            accounts: store.clone(),
            students: store.clone(),
            organizers: store.clone(),
            activities: store.clone(),
            reservations: ReservationService::new(store),
        }
    }
}

/// Builds the application router with all routes and request tracing.
pub fn build_router(state: Arc<ApiState>) -> Router {
    Router::new()
        // Health check endpoints
        .merge(routes::health::routes())
        // Account, student and admin endpoints
        .merge(routes::accounts::routes())
        // Organizer and activity endpoints
        .merge(routes::organizers::routes())
        .merge(routes::activities::routes())
        // Parking and locker reservation endpoints
        .merge(routes::reservations::routes())
        // Attach shared state to all routes
        .with_state(state)
        .layer(TraceLayer::new_for_http())
}

fn cors_layer(origins: &[String]) -> CorsLayer {
    let origins: Vec<HeaderValue> = origins
        .iter()
        .filter_map(|origin| match origin.parse() {
            Ok(value) => Some(value),
            Err(_) => {
                warn!("Ignoring invalid CORS origin: {}", origin);
                None
            }
        })
        .collect();

    CorsLayer::new()
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([
            header::CONTENT_TYPE,
            header::AUTHORIZATION,
            header::ACCEPT,
            HeaderName::from_static(ADMIN_ACCOUNT_HEADER),
        ])
        .allow_origin(origins)
        .allow_credentials(true)
}

async fn handle_timeout_error(err: BoxError) -> (StatusCode, Json<Value>) {
    if err.is::<tower::timeout::error::Elapsed>() {
        (
            StatusCode::REQUEST_TIMEOUT,
            Json(json!({ "error": "Request timed out" })),
        )
    } else {
        error!(error = %err, "Unhandled middleware error");
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(json!({ "error": SERVER_ERROR_MESSAGE })),
        )
    }
}

/// Starts the API server with the provided configuration and state
///
/// This function sets up logging, applies CORS and the request timeout,
/// and serves the router until the process is stopped.
///
/// # Example
///
/// ```no_run
/// use std::sync::Arc;
/// use campus_api::{ApiState, config::ApiConfig, start_server};
/// use campus_db::{PgStore, create_pool};
///
/// # async fn run() -> eyre::Result<()> {
/// let config = ApiConfig::from_env()?;
/// let pool = create_pool(&config.database_url, config.database_max_connections).await?;
/// let state = Arc::new(ApiState::from_store(Arc::new(PgStore::new(pool))));
/// start_server(config, state).await?;
/// # Ok(())
/// # }
/// ```
pub async fn start_server(config: config::ApiConfig, state: Arc<ApiState>) -> Result<()> {
    // Initialize tracing for logging
    let subscriber = FmtSubscriber::builder()
        .with_max_level(config.log_level)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let app = build_router(state);

    // Apply CORS configuration if origins are specified
    let app = match &config.cors_origins {
        Some(origins) => app.layer(cors_layer(origins)),
        None => app,
    };

    // Add request timeout middleware
    let app = app.layer(
        ServiceBuilder::new()
            .layer(HandleErrorLayer::new(handle_timeout_error))
            .timeout(Duration::from_secs(config.request_timeout)),
    );

    // Start the HTTP server
    let addr = config.server_addr();
    let listener = TcpListener::bind(&addr).await?;
    info!("Server listening on http://{}", addr);
    axum::serve(listener, app).await?;

    Ok(())
}
