//! Middleware de CORS
//!
//! Este módulo maneja la configuración de CORS para permitir
//! requests desde el navegador del dashboard.

use axum::http::{HeaderName, HeaderValue, Method};
use tower_http::cors::CorsLayer;

use crate::config::EnvironmentConfig;

/// Elegir la política de CORS según la configuración
///
/// Sin `CORS_ORIGINS`, desarrollo acepta cualquier origen y el resto de
/// entornos no acepta ninguno.
pub fn cors_layer(config: &EnvironmentConfig) -> CorsLayer {
    if !config.cors_origins.is_empty() {
        return cors_middleware_with_origins(&config.cors_origins);
    }

    if config.is_development() {
        cors_middleware()
    } else {
        log::warn!(
            "⚠️ CORS_ORIGINS vacío en entorno {}: no se aceptan orígenes externos",
            config.environment
        );
        cors_middleware_with_origins(&[])
    }
}

/// Crear middleware de CORS configurado para desarrollo
/// NOTA: Permite cualquier origen - solo para desarrollo
pub fn cors_middleware() -> CorsLayer {
    CorsLayer::very_permissive()
}

/// Crear middleware de CORS con orígenes específicos
pub fn cors_middleware_with_origins(origins: &[String]) -> CorsLayer {
    let allowed: Vec<HeaderValue> = origins
        .iter()
        .filter_map(|origin| HeaderValue::from_str(origin).ok())
        .collect();

    CorsLayer::new()
        .allow_origin(allowed)
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::PATCH,
            Method::OPTIONS,
        ])
        .allow_headers([
            HeaderName::from_static("content-type"),
            HeaderName::from_static("accept"),
            HeaderName::from_static("origin"),
            HeaderName::from_static("x-requested-with"),
        ])
        .expose_headers([HeaderName::from_static("content-disposition")])
        .max_age(std::time::Duration::from_secs(3600))
}
