use axum::{
    http::{header, Method},
    routing::get,
    Router,
};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

pub mod config;
pub mod handlers;
pub mod metrics;
pub mod models;
pub mod services;
pub mod utils;

pub use config::Config;
pub use services::AppState;

pub fn create_router(app_state: std::sync::Arc<services::AppState>) -> Router {
    // The analytics endpoint is read-only; auth/CSRF live in the gateway in
    // front of this service.
    let cors = CorsLayer::new()
        .allow_methods([Method::GET, Method::OPTIONS])
        .allow_headers([header::AUTHORIZATION, header::CONTENT_TYPE])
        .allow_origin(tower_http::cors::Any); // TODO: restrict to specific origins in production

    Router::new()
        .route("/health", get(handlers::health_check))
        .route("/metrics", get(handlers::metrics_handler))
        .route(
            "/api/v1/diagrams/{id}/analytics",
            get(handlers::analytics::get_diagram_analytics),
        )
        .with_state(app_state)
        .layer(cors)
        .layer(TraceLayer::new_for_http())
}
