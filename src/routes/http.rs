// GET handlers: container status, liveness, version

use axum::{Json, extract::State, http::StatusCode, response::IntoResponse};

use super::AppState;

/// Package name and version, from Cargo.toml at build time.
const NAME: &str = env!("CARGO_PKG_NAME");
const VERSION: &str = env!("CARGO_PKG_VERSION");

/// GET / — one snapshot per container, in runtime listing order.
pub(super) async fn containers_handler(State(state): State<AppState>) -> impl IntoResponse {
    match state.aggregator.aggregate().await {
        Ok(snapshots) => (StatusCode::OK, Json(serde_json::json!(snapshots))),
        Err(e) => {
            tracing::warn!(error = %e, operation = "list_containers", "container listing failed");
            (
                StatusCode::BAD_GATEWAY,
                Json(serde_json::json!({ "error": e.to_string() })),
            )
        }
    }
}

/// GET /self — liveness of this server, independent of the container runtime.
pub(super) async fn self_handler() -> impl IntoResponse {
    Json(serde_json::json!({
        "status": "ok",
        "timestamp": chrono::Utc::now().to_rfc3339_opts(chrono::SecondsFormat::Micros, true),
    }))
}

/// GET /version — returns service name and version (from Cargo.toml at build time).
pub(super) async fn version_handler() -> impl IntoResponse {
    Json(serde_json::json!({
        "name": NAME,
        "version": VERSION,
    }))
}

pub(super) async fn not_found_handler() -> impl IntoResponse {
    (
        StatusCode::NOT_FOUND,
        Json(serde_json::json!({ "error": "not found" })),
    )
}
