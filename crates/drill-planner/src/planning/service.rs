use std::sync::Arc;

use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing::info;

use super::assembly::{AssemblyPolicy, Session, SessionAssembler};
use super::domain::PreferenceProfile;
use super::scoring::ScoringConfig;
use super::view::ScoreBreakdownView;
use super::PlanningError;
use crate::catalog::{CatalogError, DrillCatalog};
use crate::config::PlannerConfig;

/// Service composing the drill catalog with the session assembler.
pub struct PlanningService<C> {
    catalog: Arc<C>,
    assembler: Arc<SessionAssembler>,
    seed: Option<u64>,
}

impl<C> PlanningService<C>
where
    C: DrillCatalog + 'static,
{
    pub fn new(
        catalog: Arc<C>,
        scoring: ScoringConfig,
        policy: AssemblyPolicy,
        seed: Option<u64>,
    ) -> Result<Self, PlanningError> {
        let assembler = Arc::new(SessionAssembler::new(scoring, policy)?);
        Ok(Self {
            catalog,
            assembler,
            seed,
        })
    }

    pub fn from_config(catalog: Arc<C>, config: &PlannerConfig) -> Result<Self, PlanningError> {
        let scoring = ScoringConfig::default().with_jitter(config.jitter);
        let policy = AssemblyPolicy {
            skill_balance: config.skill_balance,
            ..AssemblyPolicy::default()
        };
        Self::new(catalog, scoring, policy, config.seed)
    }

    pub fn assembler(&self) -> &SessionAssembler {
        &self.assembler
    }

    /// Assemble a session from the current catalog.
    pub fn generate(&self, prefs: &PreferenceProfile) -> Result<Session, PlanningServiceError> {
        let candidates = self.catalog.all_drills()?;
        let mut rng = self.rng();
        let session = self.assembler.assemble(&candidates, prefs, &mut rng)?;

        if session.is_empty() {
            info!(
                budget = prefs.duration_budget_minutes,
                candidates = candidates.len(),
                "no drills matched the preference profile"
            );
        }
        Ok(session)
    }

    /// Ranked score breakdowns for every catalog drill, best first.
    pub fn score(
        &self,
        prefs: &PreferenceProfile,
    ) -> Result<Vec<ScoreBreakdownView>, PlanningServiceError> {
        if prefs.duration_budget_minutes == 0 {
            return Err(PlanningError::InvalidBudget {
                minutes: prefs.duration_budget_minutes,
            }
            .into());
        }

        let candidates = self.catalog.all_drills()?;
        let mut rng = self.rng();
        let ranked = self.assembler.scorer().rank(&candidates, prefs, &mut rng);
        Ok(ranked.iter().map(ScoreBreakdownView::from).collect())
    }

    fn rng(&self) -> StdRng {
        match self.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        }
    }
}

/// Error raised by the planning service.
#[derive(Debug, thiserror::Error)]
pub enum PlanningServiceError {
    #[error(transparent)]
    Planning(#[from] PlanningError),
    #[error(transparent)]
    Catalog(#[from] CatalogError),
}
