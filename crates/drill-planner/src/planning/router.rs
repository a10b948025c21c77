use std::sync::Arc;

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::post,
    Router,
};
use serde_json::json;

use super::domain::PreferenceProfile;
use super::service::{PlanningService, PlanningServiceError};
use super::view::SessionView;
use super::PlanningError;
use crate::catalog::DrillCatalog;

/// Router builder exposing session generation and score diagnostics.
pub fn planning_router<C>(service: Arc<PlanningService<C>>) -> Router
where
    C: DrillCatalog + 'static,
{
    Router::new()
        .route("/api/v1/sessions/generate", post(generate_handler::<C>))
        .route("/api/v1/drills/scores", post(scores_handler::<C>))
        .with_state(service)
}

pub(crate) async fn generate_handler<C>(
    State(service): State<Arc<PlanningService<C>>>,
    axum::Json(prefs): axum::Json<PreferenceProfile>,
) -> Response
where
    C: DrillCatalog + 'static,
{
    match service.generate(&prefs) {
        Ok(session) => {
            let view = SessionView::from_session(&session);
            (StatusCode::OK, axum::Json(view)).into_response()
        }
        Err(error) => error_response(error),
    }
}

pub(crate) async fn scores_handler<C>(
    State(service): State<Arc<PlanningService<C>>>,
    axum::Json(prefs): axum::Json<PreferenceProfile>,
) -> Response
where
    C: DrillCatalog + 'static,
{
    match service.score(&prefs) {
        Ok(breakdown) => (StatusCode::OK, axum::Json(breakdown)).into_response(),
        Err(error) => error_response(error),
    }
}

fn error_response(error: PlanningServiceError) -> Response {
    let status = match &error {
        PlanningServiceError::Planning(PlanningError::InvalidBudget { .. }) => {
            StatusCode::UNPROCESSABLE_ENTITY
        }
        _ => StatusCode::INTERNAL_SERVER_ERROR,
    };
    let payload = json!({
        "error": error.to_string(),
    });
    (status, axum::Json(payload)).into_response()
}
