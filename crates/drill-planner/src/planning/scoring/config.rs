use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use super::Criterion;
use crate::planning::PlanningError;

pub const DEFAULT_JITTER: f64 = 0.15;
pub const PARTIAL_EQUIPMENT_DISCOUNT: f64 = 0.8;

/// Relative importance of each criterion in the weighted total.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScoringWeights {
    pub primary_skill: f64,
    pub secondary_skill: f64,
    pub equipment: f64,
    pub location: f64,
    pub difficulty: f64,
    pub intensity: f64,
    pub duration: f64,
    pub training_style: f64,
}

impl ScoringWeights {
    pub fn weight(&self, criterion: Criterion) -> f64 {
        match criterion {
            Criterion::PrimarySkill => self.primary_skill,
            Criterion::SecondarySkill => self.secondary_skill,
            Criterion::Equipment => self.equipment,
            Criterion::Location => self.location,
            Criterion::Difficulty => self.difficulty,
            Criterion::Intensity => self.intensity,
            Criterion::Duration => self.duration,
            Criterion::TrainingStyle => self.training_style,
        }
    }

    pub fn sum(&self) -> f64 {
        Criterion::ALL
            .iter()
            .map(|criterion| self.weight(*criterion))
            .sum()
    }
}

impl Default for ScoringWeights {
    fn default() -> Self {
        Self {
            primary_skill: 8.0,
            secondary_skill: 6.0,
            equipment: 4.0,
            location: 4.0,
            difficulty: 3.0,
            intensity: 2.0,
            duration: 1.0,
            training_style: 2.0,
        }
    }
}

/// Immutable scorer configuration; build one per deployment or per test.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoringConfig {
    #[serde(default)]
    pub weights: ScoringWeights,
    /// Half-width of the uniform multiplier applied to the weighted total.
    #[serde(default = "default_jitter")]
    pub jitter: f64,
    /// Applied to the equipment contribution when its sub-score is strictly between 0 and 1.
    #[serde(default = "default_partial_equipment_discount")]
    pub partial_equipment_discount: f64,
    /// Equipment that cannot be substituted when missing.
    #[serde(default = "default_critical_equipment")]
    pub critical_equipment: BTreeSet<String>,
    /// Equipment a player can improvise around at a penalty.
    #[serde(default = "default_adaptable_equipment")]
    pub adaptable_equipment: BTreeSet<String>,
    /// Requirement set that earns the basic-kit score instead of full credit.
    #[serde(default = "default_basic_kit")]
    pub basic_kit: BTreeSet<String>,
}

impl ScoringConfig {
    pub fn with_jitter(mut self, jitter: f64) -> Self {
        self.jitter = jitter;
        self
    }

    pub fn without_jitter(self) -> Self {
        self.with_jitter(0.0)
    }

    pub fn with_weights(mut self, weights: ScoringWeights) -> Self {
        self.weights = weights;
        self
    }

    pub fn validate(&self) -> Result<(), PlanningError> {
        if !self.jitter.is_finite() || !(0.0..1.0).contains(&self.jitter) {
            return Err(PlanningError::InvalidJitter { value: self.jitter });
        }
        Ok(())
    }
}

impl Default for ScoringConfig {
    fn default() -> Self {
        Self {
            weights: ScoringWeights::default(),
            jitter: DEFAULT_JITTER,
            partial_equipment_discount: PARTIAL_EQUIPMENT_DISCOUNT,
            critical_equipment: default_critical_equipment(),
            adaptable_equipment: default_adaptable_equipment(),
            basic_kit: default_basic_kit(),
        }
    }
}

fn default_jitter() -> f64 {
    DEFAULT_JITTER
}

fn default_partial_equipment_discount() -> f64 {
    PARTIAL_EQUIPMENT_DISCOUNT
}

fn default_critical_equipment() -> BTreeSet<String> {
    ["ball", "goals"].into_iter().map(String::from).collect()
}

fn default_adaptable_equipment() -> BTreeSet<String> {
    ["cones", "wall"].into_iter().map(String::from).collect()
}

fn default_basic_kit() -> BTreeSet<String> {
    ["ball"].into_iter().map(String::from).collect()
}
