mod policy;

pub use policy::AssemblyPolicy;

use std::collections::HashSet;

use rand::Rng;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use super::domain::{DrillCandidate, PreferenceProfile};
use super::scoring::{DrillScorer, ScoredDrill, ScoringConfig};
use super::PlanningError;
use policy::{intensity_modifier, shorten, skill_balanced_order};

/// A drill placed in a session with its per-session prescription.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SelectedDrillEntry {
    pub drill: DrillCandidate,
    pub position: usize,
    pub duration_minutes: u32,
    pub sets: Option<u32>,
    pub reps: Option<u32>,
    pub rest: Option<u32>,
    /// Whether duration or sets were cut to fit the budget.
    pub adjusted: bool,
    pub intensity_modifier: f64,
    pub score: f64,
    pub is_completed: bool,
    pub sets_done: u32,
}

/// Ordered training session handed to the session consumer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Session {
    pub budget_minutes: u32,
    pub entries: Vec<SelectedDrillEntry>,
    pub total_duration_minutes: u32,
    pub focus_areas: Vec<String>,
}

impl Session {
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }
}

/// Greedy, budget-constrained session builder on top of [`DrillScorer`].
#[derive(Debug, Clone, Default)]
pub struct SessionAssembler {
    scorer: DrillScorer,
    policy: AssemblyPolicy,
}

impl SessionAssembler {
    pub fn new(scoring: ScoringConfig, policy: AssemblyPolicy) -> Result<Self, PlanningError> {
        Ok(Self {
            scorer: DrillScorer::new(scoring)?,
            policy,
        })
    }

    pub fn scorer(&self) -> &DrillScorer {
        &self.scorer
    }

    pub fn policy(&self) -> &AssemblyPolicy {
        &self.policy
    }

    pub fn assemble<R>(
        &self,
        candidates: &[DrillCandidate],
        prefs: &PreferenceProfile,
        rng: &mut R,
    ) -> Result<Session, PlanningError>
    where
        R: Rng + ?Sized,
    {
        let budget = prefs.duration_budget_minutes;
        if budget == 0 {
            return Err(PlanningError::InvalidBudget { minutes: budget });
        }

        let ranked = self.scorer.rank(candidates, prefs, rng);
        let max_drills = self.policy.max_drills(budget);
        let ceiling = self.policy.overrun_ceiling(budget);
        let min_minutes = self.policy.min_minutes_for(prefs);

        let order = if self.policy.skill_balance {
            skill_balanced_order(&ranked, prefs, self.policy.balance_slots(budget))
        } else {
            (0..ranked.len()).collect()
        };

        let mut remaining = budget;
        let mut used = 0u32;
        let mut entries: Vec<SelectedDrillEntry> = Vec::new();

        for scored in order.iter().map(|index| &ranked[*index]) {
            if remaining == 0 {
                break;
            }
            if max_drills.is_some_and(|cap| entries.len() >= cap) {
                debug!(cap = entries.len(), "long session drill cap reached");
                break;
            }
            if let Some(criterion) = scored.hard_exclusion() {
                debug!(
                    drill = %scored.drill.id,
                    criterion = criterion.label(),
                    "skipping hard-excluded drill"
                );
                continue;
            }

            let base = self.policy.base_minutes(scored.drill);
            if base <= remaining {
                debug!(drill = %scored.drill.id, minutes = base, "accepted drill");
                entries.push(self.entry(scored, prefs, entries.len(), base, None));
                remaining -= base;
                used += base;
                continue;
            }

            match shorten(scored.drill, base, remaining, ceiling - used, min_minutes) {
                Some(shortened) => {
                    debug!(
                        drill = %scored.drill.id,
                        from = base,
                        to = shortened.duration,
                        "accepted shortened drill"
                    );
                    let mut entry = self.entry(
                        scored,
                        prefs,
                        entries.len(),
                        shortened.duration,
                        Some(shortened.sets),
                    );
                    entry.adjusted = true;
                    entries.push(entry);
                    used += shortened.duration;
                    remaining = 0;
                }
                None => {
                    debug!(
                        drill = %scored.drill.id,
                        minutes = base,
                        remaining,
                        "drill does not fit"
                    );
                }
            }
        }

        let focus_areas = self.focus_areas(&entries);
        info!(
            candidates = candidates.len(),
            selected = entries.len(),
            minutes = used,
            budget,
            "session assembled"
        );

        Ok(Session {
            budget_minutes: budget,
            entries,
            total_duration_minutes: used,
            focus_areas,
        })
    }

    fn entry(
        &self,
        scored: &ScoredDrill<'_>,
        prefs: &PreferenceProfile,
        position: usize,
        duration_minutes: u32,
        sets: Option<Option<u32>>,
    ) -> SelectedDrillEntry {
        let drill = scored.drill;
        SelectedDrillEntry {
            drill: drill.clone(),
            position,
            duration_minutes,
            sets: sets.unwrap_or(drill.sets),
            reps: drill.reps,
            rest: drill.rest,
            adjusted: false,
            intensity_modifier: intensity_modifier(
                prefs.difficulty.as_deref(),
                drill.difficulty.as_deref(),
            ),
            score: scored.total_score,
            is_completed: false,
            sets_done: 0,
        }
    }

    fn focus_areas(&self, entries: &[SelectedDrillEntry]) -> Vec<String> {
        let mut seen = HashSet::new();
        entries
            .iter()
            .flat_map(|entry| entry.drill.sub_skills(self.policy.include_secondary_focus))
            .filter(|sub_skill| seen.insert(sub_skill.to_ascii_lowercase()))
            .map(str::to_string)
            .collect()
    }
}

/// Assembles a session with the reference scoring configuration and policy.
pub fn assemble_session<R>(
    candidates: &[DrillCandidate],
    prefs: &PreferenceProfile,
    rng: &mut R,
) -> Result<Session, PlanningError>
where
    R: Rng + ?Sized,
{
    SessionAssembler::default().assemble(candidates, prefs, rng)
}
