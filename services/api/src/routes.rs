use crate::infra::AppState;
use axum::http::{header, StatusCode};
use axum::response::IntoResponse;
use axum::Extension;
use axum::Json;
use drill_planner::catalog::{DrillCatalog, DrillImporter};
use drill_planner::error::AppError;
use drill_planner::planning::{planning_router, DrillCandidate, PlanningService};
use serde::{Deserialize, Serialize};
use serde_json::json;
use std::io::Cursor;
use std::sync::Arc;

/// Catalog text submitted for a dry-run import.
#[derive(Debug, Deserialize)]
pub(crate) struct CatalogPreviewRequest {
    pub(crate) catalog_text: String,
    /// Category applied to drills that omit one, as a `<category>_drills` file would.
    #[serde(default)]
    pub(crate) category: Option<String>,
    #[serde(default)]
    pub(crate) source_name: Option<String>,
}

#[derive(Debug, Serialize)]
pub(crate) struct CatalogPreviewResponse {
    pub(crate) source_name: String,
    pub(crate) count: usize,
    pub(crate) drills: Vec<DrillCandidate>,
}

pub(crate) fn with_planning_routes<C>(service: Arc<PlanningService<C>>) -> axum::Router
where
    C: DrillCatalog + 'static,
{
    planning_router(service)
        .route("/health", axum::routing::get(healthcheck))
        .route("/ready", axum::routing::get(readiness_endpoint))
        .route("/metrics", axum::routing::get(metrics_endpoint))
        .route(
            "/api/v1/drills/preview",
            axum::routing::post(catalog_preview_endpoint),
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

pub(crate) async fn catalog_preview_endpoint(
    Json(payload): Json<CatalogPreviewRequest>,
) -> Result<Json<CatalogPreviewResponse>, AppError> {
    let CatalogPreviewRequest {
        catalog_text,
        category,
        source_name,
    } = payload;

    let source_name = source_name.unwrap_or_else(|| "preview".to_string());
    let reader = Cursor::new(catalog_text.into_bytes());
    let drills = DrillImporter::from_reader(reader, &source_name, category.as_deref())?;

    Ok(Json(CatalogPreviewResponse {
        source_name,
        count: drills.len(),
        drills,
    }))
}
