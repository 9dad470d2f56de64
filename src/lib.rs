//! Product catalog API
//!
//! Serves the product catalog (paginated listing and detail) and accepts
//! contact messages and product inquiries, notifying an administrator of each.
#![forbid(unsafe_code)]
#![deny(rust_2018_idioms)]
#![allow(elided_lifetimes_in_paths)]
#![warn(clippy::all, clippy::perf, clippy::dbg_macro)]

pub mod cache;
pub mod config;
pub mod db;
pub mod entities;
pub mod errors;
pub mod handlers;
pub mod health;
pub mod migrator;
pub mod models;
pub mod notifications;
pub mod openapi;
pub mod services;
pub mod tracing;

use axum::{middleware, Router};
use sea_orm::DatabaseConnection;
use std::sync::Arc;
use std::time::Instant;
use tower_http::services::ServeDir;

use crate::cache::{middleware::ResponseCache, InMemoryCache};
use crate::notifications::NotificationDispatcher;

// App state definition
#[derive(Clone)]
pub struct AppState {
    pub db: Arc<DatabaseConnection>,
    pub config: config::AppConfig,
    pub services: handlers::AppServices,
    pub started_at: Instant,
}

impl AppState {
    pub fn new(
        db: Arc<DatabaseConnection>,
        config: config::AppConfig,
        notifier: NotificationDispatcher,
    ) -> Self {
        let services = handlers::AppServices::new(db.clone(), &config, notifier);
        Self {
            db,
            config,
            services,
            started_at: Instant::now(),
        }
    }
}

/// Builds the full HTTP router: catalog, submissions, health, media and API docs.
pub fn app_router(state: AppState) -> Router {
    let response_cache = ResponseCache::new(
        Arc::new(InMemoryCache::new(state.config.cache.capacity)),
        state.config.cache_ttl(),
    );
    let media_mount = state.config.media.mount_path();
    let media_files = ServeDir::new(&state.config.media.root);

    Router::new()
        .merge(handlers::products::products_routes(response_cache))
        .merge(handlers::submissions::submission_routes())
        .merge(health::health_routes())
        .nest_service(&media_mount, media_files)
        .merge(openapi::swagger_ui())
        .with_state(state)
        // HTTP tracing layer for consistent request/response telemetry
        .layer(crate::tracing::configure_http_tracing())
        // Ensure every request carries a request id for traceability
        .layer(middleware::from_fn(crate::tracing::request_id_middleware))
}
