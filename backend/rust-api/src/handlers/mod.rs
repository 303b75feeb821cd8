use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use serde_json::json;
use std::sync::Arc;

use crate::metrics;
use crate::services::AppState;

pub mod analytics;

pub async fn health_check(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    let mut dependencies = serde_json::Map::new();

    let healthy = match tokio::time::timeout(
        std::time::Duration::from_secs(1),
        state.provider.ping(),
    )
    .await
    {
        Ok(Ok(())) => {
            dependencies.insert("dataset_provider".to_string(), json!({ "status": "healthy" }));
            true
        }
        Ok(Err(e)) => {
            dependencies.insert(
                "dataset_provider".to_string(),
                json!({ "status": "unhealthy", "error": format!("{}", e) }),
            );
            false
        }
        Err(_) => {
            dependencies.insert(
                "dataset_provider".to_string(),
                json!({ "status": "unhealthy", "error": "ping timeout after 1s" }),
            );
            false
        }
    };

    let status_code = if healthy {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    (
        status_code,
        Json(json!({
            "status": if healthy { "healthy" } else { "degraded" },
            "service": "diagramlab-api",
            "version": env!("CARGO_PKG_VERSION"),
            "dependencies": dependencies
        })),
    )
}

pub async fn metrics_handler() -> impl IntoResponse {
    match metrics::render_metrics() {
        Ok(metrics_text) => (StatusCode::OK, metrics_text),
        Err(e) => (
            StatusCode::INTERNAL_SERVER_ERROR,
            format!("Failed to render metrics: {}", e),
        ),
    }
}
