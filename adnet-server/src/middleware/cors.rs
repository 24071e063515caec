// CORS middleware
use axum::http::Method;
use tower_http::cors::{Any, CorsLayer};

/// SDK clients and the dashboard are served from arbitrary origins; access
/// control is done with API keys, not origins.
pub fn cors_layer() -> CorsLayer {
    CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::PUT, Method::HEAD, Method::OPTIONS])
        .allow_headers(Any)
        .allow_credentials(false)
        .max_age(std::time::Duration::from_secs(3600))
}
