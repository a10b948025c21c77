use std::sync::Arc;

use axum::response::Response;
use rand::rngs::StdRng;
use rand::SeedableRng;
use serde_json::Value;

use crate::catalog::{CatalogError, DrillCatalog};
use crate::planning::domain::{DrillCandidate, DrillKind, PreferenceProfile, TargetSkill};
use crate::planning::{
    AssemblyPolicy, DrillScorer, PlanningService, ScoringConfig, SessionAssembler,
};

pub(super) const SEED: u64 = 7;

pub(super) fn rng(seed: u64) -> StdRng {
    StdRng::seed_from_u64(seed)
}

pub(super) fn deterministic_scorer() -> DrillScorer {
    DrillScorer::new(ScoringConfig::default().without_jitter()).expect("valid config")
}

pub(super) fn deterministic_assembler() -> SessionAssembler {
    SessionAssembler::new(
        ScoringConfig::default().without_jitter(),
        AssemblyPolicy::default(),
    )
    .expect("valid config")
}

pub(super) fn approx(left: f64, right: f64) -> bool {
    (left - right).abs() < 1e-9
}

/// Drill from the wall-passing exact-match scenario.
pub(super) fn wall_pass_drill() -> DrillCandidate {
    DrillCandidate::new("Wall Pass Mastery")
        .with_primary_skill("passing", "wall_passing")
        .with_equipment(["ball"])
        .with_duration(15)
        .with_locations(["indoor_court"])
        .with_difficulty("intermediate")
}

pub(super) fn wall_pass_prefs() -> PreferenceProfile {
    PreferenceProfile::new(60)
        .with_target(TargetSkill::new("passing", ["wall_passing"]))
        .with_equipment(["ball"])
        .with_location("indoor_court")
        .with_difficulty("intermediate")
}

/// A drill that fully matches [`passing_prefs`] apart from its duration.
pub(super) fn passing_drill(title: &str, minutes: u32) -> DrillCandidate {
    DrillCandidate::new(title)
        .with_primary_skill("passing", "short_passing")
        .with_secondary_skill("first_touch", "ground_control")
        .with_equipment(["ball", "cones"])
        .with_locations(["small_field"])
        .with_difficulty("intermediate")
        .with_intensity("medium")
        .with_training_styles(["medium_intensity"])
        .with_duration(minutes)
}

pub(super) fn passing_prefs(budget: u32) -> PreferenceProfile {
    PreferenceProfile::new(budget)
        .with_target(TargetSkill::new("passing", ["short_passing"]))
        .with_equipment(["ball", "cones"])
        .with_location("small_field")
        .with_difficulty("intermediate")
        .with_training_style("medium_intensity")
}

pub(super) fn rep_drill(title: &str, minutes: u32, sets: u32) -> DrillCandidate {
    passing_drill(title, minutes)
        .with_kind(DrillKind::RepBased)
        .with_volume(Some(sets), Some(12), Some(30))
}

pub(super) fn goals_drill(title: &str) -> DrillCandidate {
    DrillCandidate::new(title)
        .with_primary_skill("shooting", "power_shots")
        .with_equipment(["ball", "goals"])
        .with_duration(15)
}

/// Deterministic pseudo-random catalog mixing every drill shape the assembler handles.
pub(super) fn generated_catalog(seed: u64, size: usize) -> Vec<DrillCandidate> {
    use rand::Rng;

    let mut source = rng(seed);
    let categories = [
        ("passing", "short_passing"),
        ("passing", "long_passing"),
        ("dribbling", "close_control"),
        ("shooting", "power_shots"),
        ("first_touch", "ground_control"),
    ];
    let equipment_pool = ["ball", "cones", "wall", "goals", "ladder"];
    let levels = ["beginner", "intermediate", "advanced"];

    (0..size)
        .map(|index| {
            let (category, sub_skill) = categories[source.gen_range(0..categories.len())];
            let mut drill = DrillCandidate::new(format!("Drill {index}"))
                .with_primary_skill(category, sub_skill)
                .with_difficulty(levels[source.gen_range(0..levels.len())])
                .with_duration(source.gen_range(3..=40));
            let equipment: Vec<&str> = equipment_pool
                .iter()
                .copied()
                .filter(|_| source.gen_bool(0.35))
                .collect();
            drill = drill.with_equipment(equipment);
            if source.gen_bool(0.4) {
                drill = drill
                    .with_kind(DrillKind::SetBased)
                    .with_volume(Some(source.gen_range(1..=6)), Some(10), Some(30));
            }
            if source.gen_bool(0.5) {
                drill = drill.with_locations(["small_field", "backyard"]);
            }
            drill
        })
        .collect()
}

#[derive(Default)]
pub(super) struct MemoryCatalog {
    drills: Vec<DrillCandidate>,
}

impl MemoryCatalog {
    pub(super) fn new(drills: Vec<DrillCandidate>) -> Self {
        Self { drills }
    }
}

impl DrillCatalog for MemoryCatalog {
    fn all_drills(&self) -> Result<Vec<DrillCandidate>, CatalogError> {
        Ok(self.drills.clone())
    }
}

pub(super) struct UnavailableCatalog;

impl DrillCatalog for UnavailableCatalog {
    fn all_drills(&self) -> Result<Vec<DrillCandidate>, CatalogError> {
        Err(CatalogError::Unavailable("catalog offline".to_string()))
    }
}

pub(super) fn build_service(drills: Vec<DrillCandidate>) -> PlanningService<MemoryCatalog> {
    PlanningService::new(
        Arc::new(MemoryCatalog::new(drills)),
        ScoringConfig::default(),
        AssemblyPolicy::default(),
        Some(SEED),
    )
    .expect("valid config")
}

pub(super) fn sample_catalog() -> Vec<DrillCandidate> {
    vec![
        passing_drill("Triangle Passing", 20),
        passing_drill("Gate Passing", 15),
        rep_drill("Switch Play", 24, 4),
        goals_drill("Finishing Under Pressure"),
        wall_pass_drill(),
    ]
}

pub(super) async fn read_json_body(response: Response) -> Value {
    let body = axum::body::to_bytes(response.into_body(), 64 * 1024)
        .await
        .expect("read body");
    serde_json::from_slice(&body).expect("json payload")
}
