//! CORS policy built from configuration

use axum::http::{header, HeaderValue, Method};
use tower_http::cors::{AllowOrigin, CorsLayer};

use crate::config::CorsConfig;
use crate::domain::DomainError;

/// Builds the CORS layer; `*` in the origin list allows any origin
pub fn build_cors_layer(config: &CorsConfig) -> Result<CorsLayer, DomainError> {
    config.validate()?;

    let origin = if config.allows_any_origin() {
        AllowOrigin::any()
    } else {
        let origins = config
            .allowed_origins
            .iter()
            .map(|origin| {
                HeaderValue::from_str(origin).map_err(|_| {
                    DomainError::configuration(format!("Invalid CORS origin '{}'", origin))
                })
            })
            .collect::<Result<Vec<_>, _>>()?;

        AllowOrigin::list(origins)
    };

    Ok(CorsLayer::new()
        .allow_origin(origin)
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE, header::ACCEPT, header::AUTHORIZATION])
        .allow_credentials(config.allow_credentials))
}
