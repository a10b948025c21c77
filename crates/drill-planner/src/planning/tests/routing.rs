use super::common::*;
use axum::extract::State;
use axum::http::StatusCode;
use serde_json::{json, Value};
use std::sync::Arc;
use tower::ServiceExt;

use crate::planning::router::{generate_handler, scores_handler};
use crate::planning::{planning_router, AssemblyPolicy, PlanningService, ScoringConfig};

fn post_json(uri: &str, payload: &Value) -> axum::http::Request<axum::body::Body> {
    axum::http::Request::post(uri)
        .header(axum::http::header::CONTENT_TYPE, "application/json")
        .body(axum::body::Body::from(
            serde_json::to_vec(payload).expect("serialize payload"),
        ))
        .expect("request builds")
}

#[tokio::test]
async fn generate_route_returns_session_view() {
    let router = planning_router(Arc::new(build_service(sample_catalog())));

    let response = router
        .oneshot(post_json(
            "/api/v1/sessions/generate",
            &json!({
                "duration_budget_minutes": 60,
                "available_equipment": ["ball", "cones"],
                "training_location": "small_field",
                "difficulty": "intermediate",
                "target_skills": [{"category": "passing", "sub_skills": ["short_passing"]}]
            }),
        ))
        .await
        .expect("route executes");

    assert_eq!(response.status(), StatusCode::OK);
    let payload = read_json_body(response).await;
    let drills = payload["drills"].as_array().expect("drills array");
    assert!(!drills.is_empty());
    assert!(payload["total_duration"].as_u64().expect("total") <= 72);
    assert_eq!(drills[0]["position"], json!(0));
    assert!(payload.get("notice").is_none());
}

#[tokio::test]
async fn generate_handler_rejects_zero_budget() {
    let service = Arc::new(build_service(sample_catalog()));

    let response = generate_handler::<MemoryCatalog>(
        State(service),
        axum::Json(crate::planning::PreferenceProfile::new(0)),
    )
    .await;

    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    let payload = read_json_body(response).await;
    assert!(payload["error"]
        .as_str()
        .expect("error message")
        .contains("budget"));
}

#[tokio::test]
async fn generate_handler_reports_catalog_outages() {
    let service = Arc::new(
        PlanningService::new(
            Arc::new(UnavailableCatalog),
            ScoringConfig::default(),
            AssemblyPolicy::default(),
            None,
        )
        .expect("valid config"),
    );

    let response =
        generate_handler::<UnavailableCatalog>(State(service), axum::Json(passing_prefs(30)))
            .await;

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
}

#[tokio::test]
async fn generate_route_returns_notice_for_empty_sessions() {
    let router = planning_router(Arc::new(build_service(vec![goals_drill("Finishing")])));

    let response = router
        .oneshot(post_json(
            "/api/v1/sessions/generate",
            &json!({ "duration_budget_minutes": 30 }),
        ))
        .await
        .expect("route executes");

    assert_eq!(response.status(), StatusCode::OK);
    let payload = read_json_body(response).await;
    assert_eq!(payload["drills"], json!([]));
    assert_eq!(payload["notice"], json!("insufficient matching drills"));
}

#[tokio::test]
async fn scores_handler_returns_breakdowns() {
    let service = Arc::new(build_service(sample_catalog()));

    let response =
        scores_handler::<MemoryCatalog>(State(service), axum::Json(passing_prefs(60))).await;

    assert_eq!(response.status(), StatusCode::OK);
    let payload = read_json_body(response).await;
    let entries = payload.as_array().expect("array payload");
    assert_eq!(entries.len(), sample_catalog().len());
    assert!(entries[0]["scores"].get("primary_skill").is_some());
    let excluded: Vec<&Value> = entries
        .iter()
        .filter(|entry| entry["excluded_by"] == json!("equipment"))
        .collect();
    assert_eq!(excluded.len(), 1);
}

#[tokio::test]
async fn malformed_payloads_are_rejected_by_the_extractor() {
    let router = planning_router(Arc::new(build_service(sample_catalog())));

    let response = router
        .oneshot(post_json(
            "/api/v1/drills/scores",
            &json!({ "available_equipment": ["ball"] }),
        ))
        .await
        .expect("route executes");

    assert!(response.status().is_client_error());
}
