use std::sync::Arc;

use axum::{routing::get, routing::post, Router};
use sqlx::PgPool;
use tower_http::compression::CompressionLayer;
use tower_http::trace::TraceLayer;

pub mod config;
pub mod db;
pub mod duration;
pub mod error;
pub mod handlers;
pub mod models;
pub mod views;

use config::Config;

#[derive(Clone)]
pub struct AppState {
    pub db: PgPool,
    pub config: Arc<Config>,
}

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(handlers::health::health_check))
        .route("/readyz", get(handlers::health::readyz))
        .route(
            "/",
            get(handlers::sleep_logs::index).post(handlers::sleep_logs::create_log),
        )
        .route("/sleep-data", get(handlers::sleep_logs::sleep_data))
        .route(
            "/edit_log/:id",
            get(handlers::sleep_logs::edit_form).post(handlers::sleep_logs::update_log),
        )
        .route("/delete_log/:id", post(handlers::sleep_logs::delete_log))
        .fallback(handlers::sleep_logs::not_found)
        .layer(CompressionLayer::new())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
