use crate::cli::ServeArgs;
use crate::infra::{AppState, InMemoryDrillCatalog};
use crate::routes::with_planning_routes;
use axum::Extension;
use axum_prometheus::PrometheusMetricLayer;
use drill_planner::config::AppConfig;
use drill_planner::error::AppError;
use drill_planner::planning::PlanningService;
use drill_planner::telemetry;
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

    telemetry::init(&config.telemetry)?;

    let (prometheus_layer, prometheus_handle) = PrometheusMetricLayer::pair();
    let readiness_flag = Arc::new(std::sync::atomic::AtomicBool::new(false));
    let app_state = AppState {
        readiness: readiness_flag.clone(),
        metrics: Arc::new(prometheus_handle),
    };

    let catalog = Arc::new(InMemoryDrillCatalog::load(&config.planner.catalog_path)?);
    let drill_count = catalog.len();
    let planning_service = Arc::new(PlanningService::from_config(catalog, &config.planner)?);

    let app = with_planning_routes(planning_service)
        .layer(Extension(app_state))
        .layer(prometheus_layer);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    readiness_flag.store(true, Ordering::Release);

    info!(?config.environment, %addr, drills = drill_count, "drill planner ready");

    axum::serve(listener, app).await?;
    Ok(())
}
