use axum::{
    extract::{DefaultBodyLimit, State},
    http::{header, StatusCode},
    response::IntoResponse,
    routing::get,
    Router,
};
use tower_http::trace::TraceLayer;

use crate::api;
use crate::middleware::cors_layer;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    let public_routes = Router::<AppState>::new()
        .route("/health", get(health_check))
        .route("/healthz", get(health_check))
        .route("/version", get(version_info))
        .route("/metrics", get(metrics));

    api::router(&state)
        .merge(public_routes)
        .with_state(state)
        .layer(DefaultBodyLimit::max(10 * 1024 * 1024))
        .layer(TraceLayer::new_for_http())
        .layer(cors_layer())
}

async fn health_check(State(state): State<AppState>) -> impl IntoResponse {
    let stats = state.service().cache_stats();
    (
        StatusCode::OK,
        axum::Json(serde_json::json!({
            "status": "ok",
            "store": state.service().store_backend(),
            "cache": stats,
            "cache_hit_ratio": stats.hit_ratio(),
        })),
    )
}

async fn version_info() -> impl IntoResponse {
    (
        StatusCode::OK,
        axum::Json(serde_json::json!({
            "version": option_env!("GIT_VERSION").unwrap_or("dev"),
            "build_time": option_env!("BUILD_TIME").unwrap_or("unknown"),
            "cargo_version": env!("CARGO_PKG_VERSION"),
        })),
    )
}

async fn metrics(State(state): State<AppState>) -> impl IntoResponse {
    match state.metrics() {
        Some(handle) => (
            StatusCode::OK,
            [(header::CONTENT_TYPE, "text/plain; version=0.0.4")],
            handle.render(),
        ),
        None => (
            StatusCode::SERVICE_UNAVAILABLE,
            [(header::CONTENT_TYPE, "text/plain")],
            "metrics recorder not installed".to_string(),
        ),
    }
}
