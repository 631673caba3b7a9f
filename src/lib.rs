//! POS API Library
//!
//! Product catalog (standard and perishable products) with a minimal
//! add-to-cart and checkout flow, served over axum and persisted with sea-orm.
#![forbid(unsafe_code)]
#![deny(rust_2018_idioms)]
#![allow(elided_lifetimes_in_paths)]
#![warn(clippy::all, clippy::perf, clippy::dbg_macro)]

// Core modules
pub mod config;
pub mod db;
pub mod entities;
pub mod errors;
pub mod handlers;
pub mod middleware_helpers;
pub mod migrator;
pub mod models;
pub mod openapi;
pub mod repositories;
pub mod services;
pub mod tracing;

use axum::Router;
use sea_orm::DatabaseConnection;
use std::sync::Arc;

// App state definition
#[derive(Clone)]
pub struct AppState {
    pub db: Arc<DatabaseConnection>,
    pub config: config::AppConfig,
    pub services: handlers::AppServices,
}

impl AppState {
    /// Builds the service container for `db` and keeps both alongside `config`
    pub fn new(db: Arc<DatabaseConnection>, config: config::AppConfig) -> Self {
        let services = handlers::AppServices::new(db.clone(), &config);
        Self {
            db,
            config,
            services,
        }
    }
}

/// Catalog, till and health routes without middleware
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/products", handlers::products::products_routes())
        .nest(
            "/Point_Of_Sale",
            handlers::point_of_sale::point_of_sale_routes(),
        )
        .merge(handlers::health::health_routes())
}

/// API routes plus Swagger UI, wrapped in request logging, HTTP tracing and
/// request-id propagation
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .merge(api_routes())
        .with_state(state)
        .merge(openapi::swagger_ui())
        .layer(axum::middleware::from_fn(request_logging_middleware))
        .layer(crate::tracing::configure_http_tracing())
        .layer(axum::middleware::from_fn(
            middleware_helpers::request_id_middleware,
        ))
}

// Request logging middleware
async fn request_logging_middleware(
    request: axum::http::Request<axum::body::Body>,
    next: axum::middleware::Next,
) -> axum::response::Response {
    let method = request.method().clone();
    let uri = request.uri().clone();
    let start = std::time::Instant::now();

    ::tracing::debug!(method = %method, uri = %uri, "Incoming request");

    let response = next.run(request).await;

    let duration = start.elapsed();
    let status = response.status();

    ::tracing::info!(
        method = %method,
        uri = %uri,
        status = status.as_u16(),
        elapsed_ms = u64::try_from(duration.as_millis()).unwrap_or(u64::MAX),
        "Request completed"
    );
    metrics::counter!("pos_http.requests", 1, "status" => status.as_u16().to_string());

    response
}
