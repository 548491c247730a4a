//! CORS layer configuration.

use axum::http::{HeaderValue, Method};
use tower_http::cors::{AllowHeaders, AllowOrigin, Any, CorsLayer};

use campus_core::config::CorsConfig;

/// Builds a CORS tower layer from configuration.
///
/// Credentialed CORS cannot use wildcards, so `"*"` mirrors the request
/// origin and headers when credentials are allowed.
pub fn build_cors_layer(config: &CorsConfig) -> CorsLayer {
    let wildcard = config.allowed_origins.iter().any(|o| o == "*");

    let methods: Vec<Method> = config
        .allowed_methods
        .iter()
        .filter_map(|m| m.parse().ok())
        .collect();

    let mut layer = CorsLayer::new().allow_methods(methods);

    layer = match (wildcard, config.allow_credentials) {
        (true, true) => layer
            .allow_origin(AllowOrigin::mirror_request())
            .allow_headers(AllowHeaders::mirror_request()),
        (true, false) => layer.allow_origin(Any).allow_headers(Any),
        (false, _) => {
            let origins: Vec<HeaderValue> = config
                .allowed_origins
                .iter()
                .filter_map(|o| o.parse().ok())
                .collect();
            layer
                .allow_origin(origins)
                .allow_headers(AllowHeaders::mirror_request())
        }
    };

    layer.allow_credentials(config.allow_credentials)
}
