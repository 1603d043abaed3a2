//! HTTP API server with observability for the book reviews service.
//!
//! Provides REST endpoints to create, list and count book reviews,
//! with structured logging (tracing) and Prometheus metrics.

pub mod config;
pub mod error;
pub mod routes;

use std::sync::Arc;

use axum::Router;
use axum::routing::{get, post};
use domain::{BookExistenceClient, ReviewService};
use metrics_exporter_prometheus::PrometheusHandle;
use review_store::ReviewStore;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use routes::reviews::AppState;

/// Creates the Axum application router with all routes and shared state.
pub fn create_app<S, B>(state: Arc<AppState<S, B>>, metrics_handle: PrometheusHandle) -> Router
where
    S: ReviewStore + 'static,
    B: BookExistenceClient + 'static,
{
    let metrics_router = Router::new()
        .route("/metrics", get(routes::metrics::get))
        .with_state(metrics_handle);

    Router::new()
        .route("/health", get(routes::health::check))
        .route(
            "/api/reviews",
            post(routes::reviews::create::<S, B>).get(routes::reviews::list::<S, B>),
        )
        .route("/api/reviews/_counts", post(routes::reviews::counts::<S, B>))
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

/// Creates the application state over a review store and a book client.
pub fn create_default_state<S, B>(store: S, books: B) -> Arc<AppState<S, B>>
where
    S: ReviewStore + 'static,
    B: BookExistenceClient + 'static,
{
    Arc::new(AppState {
        review_service: ReviewService::new(store, books),
    })
}
