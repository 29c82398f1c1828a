//! Fleet Dashboard
//!
//! Backend del dashboard de monitorización de flota: store de vehículos en
//! memoria con latencia simulada, sesión del listado (búsqueda, filtro,
//! orden, paginación), panel de edición, alta local y exportación CSV.

pub mod config;
pub mod controllers;
pub mod dto;
pub mod middleware;
pub mod models;
pub mod repositories;
pub mod routes;
pub mod services;
pub mod state;
pub mod utils;
pub mod views;

use axum::{response::Json, routing::get, Router};
use serde_json::json;
use tower_http::{compression::CompressionLayer, trace::TraceLayer};

use middleware::cors::cors_layer;
use state::AppState;

/// Crear el router completo de la aplicación
pub fn create_app(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health_endpoint))
        .nest("/api/vehicle", routes::vehicle_routes::create_vehicle_router())
        .nest("/api/dashboard", routes::dashboard_routes::create_dashboard_router())
        .layer(CompressionLayer::new())
        .layer(TraceLayer::new_for_http())
        .layer(cors_layer(&state.config))
        .with_state(state)
}

/// Endpoint de prueba simple
async fn health_endpoint() -> Json<serde_json::Value> {
    Json(json!({
        "message": "Fleet dashboard API running",
        "status": "ok",
        "timestamp": chrono::Utc::now().to_rfc3339(),
    }))
}
