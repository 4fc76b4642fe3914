//! # Timetable API
//!
//! The API crate serves the weekly timetable over HTTP: course management,
//! slot assignment and drag-drop, share links, calendar and image export, and
//! AI schedule suggestions.
//!
//! ## Architecture
//!
//! - **Routes**: Define API endpoints and URL structure
//! - **Handlers**: Translate requests into store operations
//! - **Middleware**: Error mapping
//! - **Advisor**: Outbound client of the text-generation gateway
//! - **Config**: Environment configuration
//!
//! All timetable state lives in one [`TimetableStore`] behind a mutex, so
//! mutations and their storage writes never interleave.

/// AI gateway client
pub mod advisor;
/// Configuration module for API settings
pub mod config;
/// Request handlers
pub mod handlers;
/// Error mapping
pub mod middleware;
/// Route definitions and API endpoint structure
pub mod routes;

use std::sync::Arc;
use std::time::Duration;

use axum::{
    Router,
    http::{HeaderValue, Method, header},
};
use chrono_tz::Tz;
use eyre::Result;
use timetable_core::{advisor::ScheduleAdvisor, store::TimetableStore};
use tokio::{
    net::TcpListener,
    sync::{Mutex, Semaphore},
};
use tower::ServiceBuilder;
use tower_http::{cors::CorsLayer, timeout::TimeoutLayer, trace::TraceLayer};
use tracing::{Level, info, warn};
use tracing_subscriber::FmtSubscriber;

/// Shared application state that is accessible to all request handlers
pub struct ApiState {
    pub store: Mutex<TimetableStore>,
    pub advisor: Arc<dyn ScheduleAdvisor>,
    /// Page address that share links point at
    pub public_url: String,
    /// Zone in which calendar events are anchored
    pub timezone: Tz,
    /// One permit: at most one suggestion request in flight
    pub suggest_gate: Semaphore,
}

impl ApiState {
    pub fn new(
        store: TimetableStore,
        advisor: Arc<dyn ScheduleAdvisor>,
        public_url: impl Into<String>,
        timezone: Tz,
    ) -> Self {
        Self {
            store: Mutex::new(store),
            advisor,
            public_url: public_url.into(),
            timezone,
            suggest_gate: Semaphore::new(1),
        }
    }
}

/// Builds the application router with all routes attached to `state`.
pub fn build_router(state: Arc<ApiState>) -> Router {
    Router::new()
        // Health check endpoints
        .merge(routes::health::routes())
        // Course management endpoints
        .merge(routes::courses::routes())
        // Grid, slots, drag-drop and exports
        .merge(routes::timetable::routes())
        // Share links
        .merge(routes::share::routes())
        // AI suggestions
        .merge(routes::suggestions::routes())
        .with_state(state)
}

fn cors_layer(origins: &[String]) -> CorsLayer {
    let origins = origins
        .iter()
        .filter_map(|origin| match origin.parse::<HeaderValue>() {
            Ok(value) => Some(value),
            Err(_) => {
                warn!(%origin, "Ignoring invalid CORS origin");
                None
            }
        })
        .collect::<Vec<_>>();

    CorsLayer::new()
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([header::CONTENT_TYPE, header::ACCEPT])
        .allow_origin(origins)
}

/// Installs the global log subscriber. Call once, before the store is opened,
/// so that problems with the persisted record are reported.
pub fn init_tracing(level: Level) -> Result<()> {
    let subscriber = FmtSubscriber::builder().with_max_level(level).finish();
    tracing::subscriber::set_global_default(subscriber)?;
    Ok(())
}

/// Starts the API server with the provided configuration and state
///
/// Layers CORS and the request timeout over the router and serves until the
/// listener fails.
pub async fn start_server(config: config::ApiConfig, state: Arc<ApiState>) -> Result<()> {
    let app = build_router(state);

    // Apply CORS configuration if origins are specified
    let app = match &config.cors_origins {
        Some(origins) => app.layer(cors_layer(origins)),
        None => app,
    };

    // Request tracing and timeout
    let app = app.layer(
        ServiceBuilder::new()
            .layer(TraceLayer::new_for_http())
            .layer(TimeoutLayer::new(Duration::from_secs(config.request_timeout))),
    );

    // Start the HTTP server
    let addr = config.server_addr();
    let listener = TcpListener::bind(&addr).await?;
    info!("Server listening on http://{}", addr);
    axum::serve(listener, app).await?;

    Ok(())
}
