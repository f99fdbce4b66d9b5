use crate::infra::AppState;
use axum::http::{header, StatusCode};
use axum::response::IntoResponse;
use axum::Extension;
use axum::Json;
use recruit_dash::error::AppError;
use recruit_dash::recruitment::dashboard::{
    dashboard_router, DashboardRequest, DashboardService, DashboardSnapshot,
};
use recruit_dash::recruitment::{FilterSpec, LoadOptions, RecordTable};
use serde::Deserialize;
use serde_json::json;
use std::io::Cursor;
use std::sync::Arc;

/// Dashboard over a CSV export posted with the request instead of the
/// dataset loaded at startup.
#[derive(Debug, Deserialize)]
pub(crate) struct AdhocDashboardRequest {
    pub(crate) csv: String,
    #[serde(default)]
    pub(crate) filters: FilterSpec,
    #[serde(default)]
    pub(crate) include_rows: bool,
    #[serde(default)]
    pub(crate) normalize_status: bool,
}

pub(crate) fn with_dashboard_routes(service: Arc<DashboardService>) -> axum::Router {
    dashboard_router(service)
        .route("/health", axum::routing::get(healthcheck))
        .route("/ready", axum::routing::get(readiness_endpoint))
        .route("/metrics", axum::routing::get(metrics_endpoint))
        .route(
            "/api/v1/dashboard/adhoc",
            axum::routing::post(adhoc_dashboard_endpoint),
        )
}

pub(crate) async fn healthcheck() -> Json<serde_json::Value> {
    Json(json!({ "status": "ok" }))
}

pub(crate) async fn readiness_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    let ready = state.readiness.load(std::sync::atomic::Ordering::Relaxed);
    let status = if ready {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    let payload = if ready {
        json!({ "status": "ready" })
    } else {
        json!({ "status": "initializing" })
    };

    (status, Json(payload))
}

pub(crate) async fn metrics_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, "text/plain; version=0.0.4")],
        state.metrics.render(),
    )
}

pub(crate) async fn adhoc_dashboard_endpoint(
    Extension(state): Extension<AppState>,
    Json(payload): Json<AdhocDashboardRequest>,
) -> Result<Json<DashboardSnapshot>, AppError> {
    adhoc_snapshot(payload, state.strict_filters).map(Json)
}

fn adhoc_snapshot(
    payload: AdhocDashboardRequest,
    strict_filters: bool,
) -> Result<DashboardSnapshot, AppError> {
    let AdhocDashboardRequest {
        csv,
        filters,
        include_rows,
        normalize_status,
    } = payload;

    let table = RecordTable::from_reader(
        Cursor::new(csv.into_bytes()),
        LoadOptions { normalize_status },
    )?;
    let service = DashboardService::new(Arc::new(table), strict_filters);
    let snapshot = service.snapshot(&DashboardRequest {
        filters,
        include_rows,
    })?;
    Ok(snapshot)
}
