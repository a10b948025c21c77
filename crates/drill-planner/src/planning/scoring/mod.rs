mod config;
mod rules;

pub use config::{ScoringConfig, ScoringWeights, DEFAULT_JITTER, PARTIAL_EQUIPMENT_DISCOUNT};

use std::collections::BTreeMap;

use rand::Rng;
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::domain::{DrillCandidate, PreferenceProfile};
use super::PlanningError;

/// Named scoring criteria, in rubric order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Criterion {
    PrimarySkill,
    SecondarySkill,
    Equipment,
    Location,
    Difficulty,
    Intensity,
    Duration,
    TrainingStyle,
}

impl Criterion {
    pub const ALL: [Criterion; 8] = [
        Criterion::PrimarySkill,
        Criterion::SecondarySkill,
        Criterion::Equipment,
        Criterion::Location,
        Criterion::Difficulty,
        Criterion::Intensity,
        Criterion::Duration,
        Criterion::TrainingStyle,
    ];

    /// Criteria whose zero sub-score removes a drill from assembly.
    pub const HARD_EXCLUDES: [Criterion; 3] =
        [Criterion::Equipment, Criterion::Location, Criterion::Duration];

    pub const fn label(self) -> &'static str {
        match self {
            Criterion::PrimarySkill => "primary_skill",
            Criterion::SecondarySkill => "secondary_skill",
            Criterion::Equipment => "equipment",
            Criterion::Location => "location",
            Criterion::Difficulty => "difficulty",
            Criterion::Intensity => "intensity",
            Criterion::Duration => "duration",
            Criterion::TrainingStyle => "training_style",
        }
    }
}

/// Why a criterion fell back to a neutral or zero score instead of being matched.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum FallbackReason {
    NoPrimarySkill,
    NoTargetSkills,
    /// The drill does not declare the attribute.
    NotDeclared,
    /// The preference profile does not specify the attribute.
    NotRequested,
    Unrecognized { value: String },
}

/// Record of a data-completeness gap absorbed during scoring.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NeutralFallback {
    pub criterion: Criterion,
    pub reason: FallbackReason,
}

/// One scoring pass over a drill: unweighted sub-scores and the jittered total.
#[derive(Debug, Clone, Serialize)]
pub struct ScoredDrill<'a> {
    pub drill: &'a DrillCandidate,
    pub scores: BTreeMap<Criterion, f64>,
    /// Weighted sum before jitter, including the partial-equipment discount.
    pub weighted_total: f64,
    pub jitter_factor: f64,
    pub total_score: f64,
    pub fallbacks: Vec<NeutralFallback>,
}

impl ScoredDrill<'_> {
    pub fn score(&self, criterion: Criterion) -> f64 {
        self.scores.get(&criterion).copied().unwrap_or(0.0)
    }

    /// First hard-exclude criterion that scored zero, if any.
    pub fn hard_exclusion(&self) -> Option<Criterion> {
        Criterion::HARD_EXCLUDES
            .into_iter()
            .find(|criterion| self.score(*criterion) <= 0.0)
    }
}

/// Stateless multi-criteria scorer; the random source is supplied per call.
#[derive(Debug, Clone)]
pub struct DrillScorer {
    config: ScoringConfig,
}

impl DrillScorer {
    pub fn new(config: ScoringConfig) -> Result<Self, PlanningError> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &ScoringConfig {
        &self.config
    }

    pub fn score<'a, R>(
        &self,
        drill: &'a DrillCandidate,
        prefs: &PreferenceProfile,
        rng: &mut R,
    ) -> ScoredDrill<'a>
    where
        R: Rng + ?Sized,
    {
        let mut scores = BTreeMap::new();
        let mut fallbacks = Vec::new();
        let mut weighted_total = 0.0;

        for criterion in Criterion::ALL {
            let outcome = rules::evaluate(criterion, drill, prefs, &self.config);
            if let Some(fallback) = outcome.fallback {
                debug!(
                    drill = %drill.id,
                    criterion = criterion.label(),
                    reason = ?fallback.reason,
                    score = outcome.value,
                    "neutral fallback applied"
                );
                fallbacks.push(fallback);
            }

            let mut contribution = outcome.value * self.config.weights.weight(criterion);
            if criterion == Criterion::Equipment && outcome.value > 0.0 && outcome.value < 1.0 {
                contribution *= self.config.partial_equipment_discount;
            }
            weighted_total += contribution;
            scores.insert(criterion, outcome.value);
        }

        let jitter_factor = self.jitter_factor(rng);

        ScoredDrill {
            drill,
            scores,
            weighted_total,
            jitter_factor,
            total_score: weighted_total * jitter_factor,
            fallbacks,
        }
    }

    /// Scores every candidate and orders them best first; ties keep catalog order.
    pub fn rank<'a, R>(
        &self,
        candidates: &'a [DrillCandidate],
        prefs: &PreferenceProfile,
        rng: &mut R,
    ) -> Vec<ScoredDrill<'a>>
    where
        R: Rng + ?Sized,
    {
        let mut ranked: Vec<ScoredDrill<'a>> = candidates
            .iter()
            .map(|drill| self.score(drill, prefs, rng))
            .collect();
        ranked.sort_by(|left, right| right.total_score.total_cmp(&left.total_score));
        ranked
    }

    fn jitter_factor<R>(&self, rng: &mut R) -> f64
    where
        R: Rng + ?Sized,
    {
        let jitter = self.config.jitter;
        if jitter <= 0.0 {
            return 1.0;
        }
        rng.gen_range((1.0 - jitter)..=(1.0 + jitter))
    }
}

impl Default for DrillScorer {
    fn default() -> Self {
        Self {
            config: ScoringConfig::default(),
        }
    }
}

/// Scores a single drill with the reference configuration.
pub fn score_drill<'a, R>(
    drill: &'a DrillCandidate,
    prefs: &PreferenceProfile,
    rng: &mut R,
) -> ScoredDrill<'a>
where
    R: Rng + ?Sized,
{
    DrillScorer::default().score(drill, prefs, rng)
}
