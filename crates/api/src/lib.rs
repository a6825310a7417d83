//! # MediSys API
//!
//! HTTP service the booking UI talks to. It loads doctors, schedules and
//! bookings from the hospital backend, runs the availability engine, and
//! forwards confirmed bookings.
//!
//! ## Architecture
//!
//! - **Routes**: API endpoints and URL structure
//! - **Handlers**: request processing
//! - **Middleware**: session extraction and error mapping
//! - **Config**: environment configuration

/// Configuration module for API settings
pub mod config;
/// Request handlers
pub mod handlers;
/// Session extraction and error handling
pub mod middleware;
/// Route definitions
pub mod routes;

use std::{sync::Arc, time::Duration};

use axum::{
    http::{header, HeaderValue, Method},
    Router,
};
use chrono::{DateTime, Utc};
use chrono_tz::Tz;
use eyre::{Result, WrapErr};
use medisys_client::ClinicBackend;
use tokio::net::TcpListener;
use tower::ServiceBuilder;
use tower_http::{cors::CorsLayer, timeout::TimeoutLayer, trace::TraceLayer};
use tracing::info;
use tracing_subscriber::FmtSubscriber;

/// Source of the current instant.
pub type Clock = Arc<dyn Fn() -> DateTime<Utc> + Send + Sync>;

/// Shared application state that is accessible to all request handlers
pub struct ApiState {
    /// Hospital backend holding doctors, schedules and appointments
    pub backend: Arc<dyn ClinicBackend>,

    /// Zone in which schedule wall-clock times are interpreted
    pub timezone: Tz,

    clock: Clock,
}

impl ApiState {
    pub fn new(backend: Arc<dyn ClinicBackend>, timezone: Tz) -> Self {
        Self {
            backend,
            timezone,
            clock: Arc::new(Utc::now),
        }
    }

    /// Replaces the system clock, e.g. to pin "now" in tests.
    pub fn with_clock(mut self, clock: impl Fn() -> DateTime<Utc> + Send + Sync + 'static) -> Self {
        self.clock = Arc::new(clock);
        self
    }

    /// The current instant in the clinic's zone.
    pub fn now(&self) -> DateTime<Tz> {
        (self.clock)().with_timezone(&self.timezone)
    }
}

/// Builds the application router with every route and request tracing.
pub fn build_router(state: Arc<ApiState>) -> Router {
    Router::new()
        // Health check endpoints
        .merge(routes::health::routes())
        .merge(routes::auth::routes())
        .merge(routes::doctor::routes())
        .merge(routes::availability::routes())
        .merge(routes::appointment::routes())
        .merge(routes::schedule::routes())
        .with_state(state)
        .layer(TraceLayer::new_for_http())
}

/// Starts the API server with the provided configuration and backend
///
/// Installs the tracing subscriber, applies CORS and the request timeout,
/// then serves until the listener fails.
pub async fn start_server(config: config::ApiConfig, backend: Arc<dyn ClinicBackend>) -> Result<()> {
    // Initialize tracing for logging
    let subscriber = FmtSubscriber::builder()
        .with_max_level(config.log_level)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let state = Arc::new(ApiState::new(backend, config.timezone));
    let app = build_router(state);

    // Apply CORS configuration if origins are specified
    let app = match &config.cors_origins {
        Some(origins) => app.layer(cors_layer(origins)?),
        None => app,
    };

    let app = app.layer(
        ServiceBuilder::new()
            .layer(TimeoutLayer::new(Duration::from_secs(config.request_timeout)))
            .into_inner(),
    );

    let addr = config.server_addr();
    let listener = TcpListener::bind(&addr)
        .await
        .wrap_err_with(|| format!("Failed to bind {}", addr))?;
    info!(
        "Server listening on http://{} (clinic zone {}, backend {})",
        addr, config.timezone, config.backend.base_url
    );
    axum::serve(listener, app).await?;

    Ok(())
}

fn cors_layer(origins: &[String]) -> Result<CorsLayer> {
    let origins = origins
        .iter()
        .map(|origin| {
            origin
                .parse::<HeaderValue>()
                .wrap_err_with(|| format!("Invalid CORS origin {:?}", origin))
        })
        .collect::<Result<Vec<_>>>()?;

    Ok(CorsLayer::new()
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION, header::ACCEPT])
        .allow_origin(origins)
        .allow_credentials(true))
}
