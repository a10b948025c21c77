use serde::{Deserialize, Serialize};

use super::super::domain::{same_tag, Difficulty, DrillCandidate, DrillKind, PreferenceProfile};
use super::super::scoring::ScoredDrill;

/// Selection limits applied while filling a session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AssemblyPolicy {
    /// Fraction of the budget a session may run over once a drill is shortened.
    pub overrun_tolerance: f64,
    pub long_session_threshold_minutes: u32,
    pub long_session_max_drills: usize,
    /// Shortest a drill may be cut to when filling the tail of a session.
    pub min_adjusted_minutes: u32,
    pub limited_equipment_min_minutes: u32,
    /// Profiles owning at most this many items count as limited equipment.
    pub limited_equipment_max_items: usize,
    /// Minutes assumed for drills that declare no duration.
    pub default_drill_minutes: u32,
    pub include_secondary_focus: bool,
    /// Front-load drills per target category in proportion to the sub-skills requested.
    pub skill_balance: bool,
}

impl Default for AssemblyPolicy {
    fn default() -> Self {
        Self {
            overrun_tolerance: 0.2,
            long_session_threshold_minutes: 90,
            long_session_max_drills: 6,
            min_adjusted_minutes: 5,
            limited_equipment_min_minutes: 3,
            limited_equipment_max_items: 1,
            default_drill_minutes: 10,
            include_secondary_focus: true,
            skill_balance: false,
        }
    }
}

impl AssemblyPolicy {
    pub fn max_drills(&self, budget_minutes: u32) -> Option<usize> {
        (budget_minutes >= self.long_session_threshold_minutes)
            .then_some(self.long_session_max_drills)
    }

    pub fn overrun_ceiling(&self, budget_minutes: u32) -> u32 {
        let ceiling = f64::from(budget_minutes) * (1.0 + self.overrun_tolerance.max(0.0));
        ceiling.floor() as u32
    }

    pub fn min_minutes_for(&self, prefs: &PreferenceProfile) -> u32 {
        if prefs.available_equipment.len() <= self.limited_equipment_max_items {
            self.limited_equipment_min_minutes
        } else {
            self.min_adjusted_minutes
        }
    }

    /// Slots shared out between target categories when skill balancing is on.
    pub fn balance_slots(&self, budget_minutes: u32) -> usize {
        match budget_minutes {
            0..=15 => 2,
            16..=30 => 3,
            31..=45 => 4,
            46..=60 => 5,
            61..=90 => 6,
            _ => 7,
        }
    }

    pub fn base_minutes(&self, drill: &DrillCandidate) -> u32 {
        drill
            .duration
            .filter(|minutes| *minutes > 0)
            .unwrap_or(self.default_drill_minutes)
    }
}

/// Shortened prescription for the drill that closes out a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Shortened {
    pub duration: u32,
    pub sets: Option<u32>,
}

/// Shrinks a drill into the remaining budget.
///
/// Time-based drills are truncated to exactly `remaining` minutes. Rep and set based
/// drills drop whole sets, keeping the per-set pace; the rounded result may exceed
/// `remaining` but never `allowance`.
pub(crate) fn shorten(
    drill: &DrillCandidate,
    base_minutes: u32,
    remaining: u32,
    allowance: u32,
    min_minutes: u32,
) -> Option<Shortened> {
    if remaining == 0 || remaining >= base_minutes {
        return None;
    }

    match drill.kind {
        DrillKind::TimeBased => (remaining >= min_minutes).then_some(Shortened {
            duration: remaining,
            sets: drill.sets,
        }),
        DrillKind::RepBased | DrillKind::SetBased => {
            let sets = drill.sets.filter(|sets| *sets > 1)?;
            let per_set = f64::from(base_minutes) / f64::from(sets);
            let kept = ((f64::from(remaining) / per_set).round() as u32).clamp(1, sets - 1);
            let duration = ((f64::from(kept) * per_set).ceil() as u32).min(base_minutes);

            (duration >= min_minutes && duration <= allowance).then_some(Shortened {
                duration,
                sets: Some(kept),
            })
        }
    }
}

/// Walk order for a skill-balanced session, as indices into `ranked`.
///
/// Each target category gets `max(1, round(share * slots))` of its best eligible drills,
/// where `share` is its fraction of the requested sub-skills. Those drills lead in score
/// order and every other drill follows in ranked order, so the walk can still backfill.
pub(crate) fn skill_balanced_order(
    ranked: &[ScoredDrill<'_>],
    prefs: &PreferenceProfile,
    slots: usize,
) -> Vec<usize> {
    let mut demand: Vec<(&str, usize)> = Vec::new();
    for target in &prefs.target_skills {
        let count = target.sub_skills.len().max(1);
        match demand
            .iter()
            .position(|(category, _)| same_tag(category, &target.category))
        {
            Some(slot) => demand[slot].1 += count,
            None => demand.push((target.category.as_str(), count)),
        }
    }

    let requested: usize = demand.iter().map(|(_, count)| count).sum();
    if requested == 0 {
        return (0..ranked.len()).collect();
    }

    let mut leading: Vec<usize> = Vec::new();
    for (category, count) in &demand {
        let share = *count as f64 / requested as f64;
        let quota = ((share * slots as f64).round() as usize).max(1);
        let picks = ranked
            .iter()
            .enumerate()
            .filter(|(_, scored)| scored.hard_exclusion().is_none())
            .filter(|(_, scored)| {
                scored
                    .drill
                    .primary_skill
                    .as_ref()
                    .is_some_and(|focus| same_tag(&focus.category, category))
            })
            .map(|(index, _)| index)
            .take(quota);
        leading.extend(picks);
    }
    leading.sort_by(|left, right| {
        ranked[*right]
            .total_score
            .total_cmp(&ranked[*left].total_score)
    });

    let mut order = leading.clone();
    order.extend((0..ranked.len()).filter(|index| !leading.contains(index)));
    order
}

/// Scales effort by how the player's level compares to the drill's.
pub(crate) fn intensity_modifier(player: Option<&str>, drill: Option<&str>) -> f64 {
    let level = |raw: Option<&str>| {
        raw.and_then(Difficulty::parse)
            .unwrap_or(Difficulty::Beginner)
            .rank()
    };

    match level(player).cmp(&level(drill)) {
        std::cmp::Ordering::Greater => 1.2,
        std::cmp::Ordering::Equal => 1.0,
        std::cmp::Ordering::Less => 0.8,
    }
}
