use std::sync::Arc;

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Router,
};
use serde_json::json;

use super::service::{DashboardRequest, DashboardService};
use crate::recruitment::error::PipelineError;

/// Router builder exposing the dashboard data endpoints.
pub fn dashboard_router(service: Arc<DashboardService>) -> Router {
    Router::new()
        .route("/api/v1/dashboard", post(snapshot_handler))
        .route("/api/v1/dashboard/options", get(options_handler))
        .with_state(service)
}

pub(crate) async fn snapshot_handler(
    State(service): State<Arc<DashboardService>>,
    axum::Json(request): axum::Json<DashboardRequest>,
) -> Response {
    match service.snapshot(&request) {
        Ok(snapshot) => (StatusCode::OK, axum::Json(snapshot)).into_response(),
        Err(error) => pipeline_error_response(error),
    }
}

pub(crate) async fn options_handler(State(service): State<Arc<DashboardService>>) -> Response {
    match service.filter_options(None) {
        Ok(options) => (StatusCode::OK, axum::Json(options)).into_response(),
        Err(error) => pipeline_error_response(error),
    }
}

/// HTTP status for a failed dashboard computation.
pub fn pipeline_status(error: &PipelineError) -> StatusCode {
    match error {
        PipelineError::InvalidFilterColumn(_) | PipelineError::UnknownColumn(_) => {
            StatusCode::BAD_REQUEST
        }
        PipelineError::UnparseableDate { .. } => StatusCode::UNPROCESSABLE_ENTITY,
    }
}

fn pipeline_error_response(error: PipelineError) -> Response {
    let payload = json!({ "error": error.to_string() });
    (pipeline_status(&error), axum::Json(payload)).into_response()
}
