//! HTTP API server with observability for the hotel booking service.
//!
//! Provides REST endpoints for booking, cancelling and quoting stays,
//! with structured logging (tracing) and Prometheus metrics.

pub mod config;
pub mod error;
pub mod routes;

use std::sync::Arc;

use axum::Router;
use axum::routing::{get, post};
use booking::{
    BookingOrchestrator, InMemoryAvailabilityResolver, InMemoryPaymentGateway,
    LoggingNotificationDispatcher,
};
use booking_store::BookingStore;
use domain::{FixedRateConverter, PricingCalculator};
use metrics_exporter_prometheus::PrometheusHandle;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use config::Config;
use routes::AppState;

/// Creates the Axum application router with all routes and shared state.
pub fn create_app<S: BookingStore + 'static>(
    state: Arc<AppState<S>>,
    metrics_handle: PrometheusHandle,
) -> Router {
    let metrics_router = Router::new()
        .route("/metrics", get(routes::system::metrics))
        .with_state(metrics_handle);

    Router::new()
        .route("/health", get(routes::system::health))
        .route("/bookings", post(routes::bookings::create::<S>))
        .route("/bookings/quote", post(routes::bookings::quote::<S>))
        .route(
            "/bookings/{id}",
            get(routes::bookings::get::<S>).delete(routes::bookings::cancel::<S>),
        )
        .route("/rooms/available", get(routes::rooms::available::<S>))
        .with_state(state)
        .merge(metrics_router)
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .layer(TraceLayer::new_for_http())
}

/// Creates the application state around the given booking store, with the
/// room inventory, exchange rate and orchestrator settings from `config`.
pub fn create_state<S: BookingStore + 'static>(store: S, config: &Config) -> Arc<AppState<S>> {
    let rooms = InMemoryAvailabilityResolver::with_rooms(config.rooms.iter().cloned());
    let payment = InMemoryPaymentGateway::new();

    let orchestrator = BookingOrchestrator::new(
        rooms,
        payment.clone(),
        store,
        LoggingNotificationDispatcher,
        PricingCalculator::new(FixedRateConverter::new(config.eur_rate)),
    )
    .with_config(config.booking_config());

    Arc::new(AppState {
        orchestrator,
        payment,
    })
}
