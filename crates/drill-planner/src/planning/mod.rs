//! Drill scoring and training session assembly.
//!
//! [`DrillScorer`] ranks catalog drills against a [`PreferenceProfile`] and
//! [`SessionAssembler`] greedily fills a session under the profile's time budget. Both are
//! pure apart from the jitter draw, which comes from a caller-supplied random source.

pub mod assembly;
pub mod domain;
pub mod router;
pub mod scoring;
pub mod service;
pub mod skills;
pub mod view;

#[cfg(test)]
mod tests;

pub use assembly::{assemble_session, AssemblyPolicy, SelectedDrillEntry, Session, SessionAssembler};
pub use domain::{
    Difficulty, DrillCandidate, DrillId, DrillKind, PreferenceProfile, SkillFocus, TargetSkill,
};
pub use router::planning_router;
pub use scoring::{
    score_drill, Criterion, DrillScorer, FallbackReason, NeutralFallback, ScoredDrill,
    ScoringConfig, ScoringWeights,
};
pub use service::{PlanningService, PlanningServiceError};
pub use skills::{backend_id_for_label, target_skills_from_labels};
pub use view::{ScoreBreakdownView, SessionDrillView, SessionView};

/// Caller contract violations; data gaps never surface here.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum PlanningError {
    #[error("session budget must be positive, got {minutes} minutes")]
    InvalidBudget { minutes: u32 },
    #[error("score jitter must be within [0, 1), got {value}")]
    InvalidJitter { value: f64 },
}
