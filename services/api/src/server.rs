use crate::cli::ServeArgs;
use crate::infra::{load_table, AppState};
use crate::routes::with_dashboard_routes;
use axum::Extension;
use axum_prometheus::PrometheusMetricLayer;
use recruit_dash::config::AppConfig;
use recruit_dash::error::AppError;
use recruit_dash::recruitment::dashboard::DashboardService;
use recruit_dash::recruitment::LoadOptions;
use recruit_dash::telemetry;
use std::sync::atomic::Ordering;
use std::sync::Arc;
use tracing::info;

pub(crate) async fn run(mut args: ServeArgs) -> Result<(), AppError> {
    let mut config = AppConfig::load()?;

    if let Some(host) = args.host.take() {
        config.server.host = host;
    }
    if let Some(port) = args.port.take() {
        config.server.port = port;
    }
    if let Some(dataset) = args.dataset.take() {
        config.dataset.path = Some(dataset);
    }

    telemetry::init(&config.telemetry)?;

    let table = load_table(
        config.dataset.path.as_deref(),
        LoadOptions {
            normalize_status: config.dataset.normalize_status,
        },
    )?;
    let strict_filters = config.environment.strict_filters();
    let service = Arc::new(DashboardService::new(Arc::new(table), strict_filters));

    let (prometheus_layer, prometheus_handle) = PrometheusMetricLayer::pair();
    let readiness_flag = Arc::new(std::sync::atomic::AtomicBool::new(false));
    let app_state = AppState {
        readiness: readiness_flag.clone(),
        metrics: Arc::new(prometheus_handle),
        strict_filters,
    };

    let app = with_dashboard_routes(service)
        .layer(Extension(app_state))
        .layer(prometheus_layer);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    readiness_flag.store(true, Ordering::Release);

    info!(?config.environment, %addr, strict_filters, "recruitment dashboard ready");

    axum::serve(listener, app).await?;
    Ok(())
}
