use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::{header, StatusCode},
    response::IntoResponse,
    Json,
};
use chrono::NaiveDate;
use serde::Deserialize;

use crate::{
    metrics::{
        ANALYTICS_DATASET_SESSIONS, ANALYTICS_REQUESTS_TOTAL, ANALYTICS_REQUEST_DURATION_SECONDS,
    },
    services::{analytics, dataset_loader::DateRange, AppState},
    utils::time::{end_of_day, start_of_day},
};

#[derive(Debug, Deserialize)]
pub(crate) struct AnalyticsQuery {
    from: Option<String>,
    to: Option<String>,
}

/// `GET /api/v1/diagrams/{id}/analytics?from=YYYY-MM-DD&to=YYYY-MM-DD`
///
/// Diagram existence and `from > to` normalization are the calling layer's
/// responsibility; this handler only validates date formats. Reports are
/// range-dependent and grow with new sessions, so responses are marked
/// non-cacheable.
pub(crate) async fn get_diagram_analytics(
    State(state): State<Arc<AppState>>,
    Path(diagram_id): Path<String>,
    Query(query): Query<AnalyticsQuery>,
) -> Result<impl IntoResponse, ApiError> {
    let range = build_range(&query)?;

    let timer = ANALYTICS_REQUEST_DURATION_SECONDS.start_timer();
    let dataset = match state.provider.fetch(&diagram_id, &range).await {
        Ok(dataset) => dataset,
        Err(err) => {
            ANALYTICS_REQUESTS_TOTAL.with_label_values(&["error"]).inc();
            tracing::error!("Dataset fetch failed for diagram {}: {}", diagram_id, err);
            return Err(ApiError::internal(format!(
                "Failed to load analytics dataset: {}",
                err
            )));
        }
    };

    let report = analytics::build_report(&dataset);
    timer.observe_duration();
    ANALYTICS_REQUESTS_TOTAL
        .with_label_values(&["success"])
        .inc();
    ANALYTICS_DATASET_SESSIONS.observe(dataset.sessions.len() as f64);

    tracing::info!(
        "Analytics report built for diagram {} ({} sessions in range)",
        diagram_id,
        dataset.sessions.len()
    );

    Ok(([(header::CACHE_CONTROL, "no-store")], Json(report)))
}

fn build_range(query: &AnalyticsQuery) -> Result<DateRange, ApiError> {
    let from = query
        .from
        .as_deref()
        .map(|value| parse_date(value, "from"))
        .transpose()?
        .map(start_of_day);
    // Inclusive upper bound: extend `to` to the end of its day.
    let to = query
        .to
        .as_deref()
        .map(|value| parse_date(value, "to"))
        .transpose()?
        .map(end_of_day);

    Ok(DateRange { from, to })
}

fn parse_date(value: &str, field: &str) -> Result<NaiveDate, ApiError> {
    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .map_err(|_| ApiError::bad_request(format!("Invalid {}: expected YYYY-MM-DD", field)))
}

#[derive(Debug)]
pub(crate) enum ApiError {
    BadRequest(String),
    Internal(String),
}

impl ApiError {
    fn bad_request(message: impl Into<String>) -> Self {
        ApiError::BadRequest(message.into())
    }

    fn internal(message: impl Into<String>) -> Self {
        ApiError::Internal(message.into())
    }
}

impl From<anyhow::Error> for ApiError {
    fn from(err: anyhow::Error) -> Self {
        ApiError::internal(err.to_string())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> axum::response::Response {
        let (status, message) = match self {
            ApiError::BadRequest(message) => (StatusCode::BAD_REQUEST, message),
            ApiError::Internal(message) => (StatusCode::INTERNAL_SERVER_ERROR, message),
        };

        (status, Json(message)).into_response()
    }
}
