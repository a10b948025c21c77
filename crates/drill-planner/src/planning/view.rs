use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::assembly::{SelectedDrillEntry, Session};
use super::domain::DrillId;
use super::scoring::{Criterion, NeutralFallback, ScoredDrill};

pub const EMPTY_SESSION_NOTICE: &str = "insufficient matching drills";
const GENERAL_SKILL: &str = "general";

/// Transport payload for an assembled session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionView {
    pub total_duration: u32,
    pub budget_minutes: u32,
    pub focus_areas: Vec<String>,
    pub drills: Vec<SessionDrillView>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notice: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionDrillView {
    pub uuid: DrillId,
    pub title: String,
    pub position: usize,
    pub duration: u32,
    pub sets: Option<u32>,
    pub reps: Option<u32>,
    pub rest: Option<u32>,
    pub primary_skill: String,
    pub adjusted: bool,
    pub intensity_modifier: f64,
    pub is_completed: bool,
    pub sets_done: u32,
}

impl SessionView {
    pub fn from_session(session: &Session) -> Self {
        let notice = session
            .is_empty()
            .then(|| EMPTY_SESSION_NOTICE.to_string());

        Self {
            total_duration: session.total_duration_minutes,
            budget_minutes: session.budget_minutes,
            focus_areas: session.focus_areas.clone(),
            drills: session.entries.iter().map(SessionDrillView::from_entry).collect(),
            notice,
        }
    }
}

impl From<&Session> for SessionView {
    fn from(session: &Session) -> Self {
        Self::from_session(session)
    }
}

impl SessionDrillView {
    fn from_entry(entry: &SelectedDrillEntry) -> Self {
        let drill = &entry.drill;
        Self {
            uuid: drill.id,
            title: drill.title.clone(),
            position: entry.position,
            duration: entry.duration_minutes,
            sets: entry.sets.or(drill.sets),
            reps: entry.reps.or(drill.reps),
            rest: entry.rest.or(drill.rest),
            primary_skill: drill
                .primary_skill
                .as_ref()
                .map(|focus| focus.sub_skill.clone())
                .unwrap_or_else(|| GENERAL_SKILL.to_string()),
            adjusted: entry.adjusted,
            intensity_modifier: entry.intensity_modifier,
            is_completed: entry.is_completed,
            sets_done: entry.sets_done,
        }
    }
}

/// Owned score breakdown for diagnostics endpoints and the CLI.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoreBreakdownView {
    pub drill_id: DrillId,
    pub title: String,
    pub scores: BTreeMap<Criterion, f64>,
    pub weighted_total: f64,
    pub jitter_factor: f64,
    pub total_score: f64,
    pub fallbacks: Vec<NeutralFallback>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub excluded_by: Option<Criterion>,
}

impl From<&ScoredDrill<'_>> for ScoreBreakdownView {
    fn from(scored: &ScoredDrill<'_>) -> Self {
        Self {
            drill_id: scored.drill.id,
            title: scored.drill.title.clone(),
            scores: scored.scores.clone(),
            weighted_total: scored.weighted_total,
            jitter_factor: scored.jitter_factor,
            total_score: scored.total_score,
            fallbacks: scored.fallbacks.clone(),
            excluded_by: scored.hard_exclusion(),
        }
    }
}
