use std::collections::BTreeSet;
use std::fmt;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::catalog::normalize_tag;

/// Stable catalog identifier for a drill.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DrillId(pub Uuid);

impl DrillId {
    pub fn generate() -> Self {
        Self(Uuid::new_v4())
    }
}

impl fmt::Display for DrillId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// One `{category, sub_skill}` pair trained by a drill.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SkillFocus {
    pub category: String,
    pub sub_skill: String,
}

impl SkillFocus {
    pub fn new(category: impl Into<String>, sub_skill: impl Into<String>) -> Self {
        Self {
            category: category.into(),
            sub_skill: sub_skill.into(),
        }
    }
}

/// Skill goal requested by the player: a category and the sub-skills wanted within it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TargetSkill {
    pub category: String,
    #[serde(default)]
    pub sub_skills: Vec<String>,
}

impl TargetSkill {
    pub fn new<I, S>(category: impl Into<String>, sub_skills: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            category: category.into(),
            sub_skills: sub_skills.into_iter().map(Into::into).collect(),
        }
    }

    pub(crate) fn matches_category(&self, category: &str) -> bool {
        same_tag(&self.category, category)
    }

    pub(crate) fn contains_sub_skill(&self, sub_skill: &str) -> bool {
        self.sub_skills.iter().any(|wanted| same_tag(wanted, sub_skill))
    }
}

/// Ordinal skill level shared by drills and players.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Difficulty {
    Beginner,
    Intermediate,
    Advanced,
}

impl Difficulty {
    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "beginner" => Some(Self::Beginner),
            "intermediate" => Some(Self::Intermediate),
            "advanced" => Some(Self::Advanced),
            _ => None,
        }
    }

    pub const fn rank(self) -> u8 {
        match self {
            Difficulty::Beginner => 0,
            Difficulty::Intermediate => 1,
            Difficulty::Advanced => 2,
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Difficulty::Beginner => "beginner",
            Difficulty::Intermediate => "intermediate",
            Difficulty::Advanced => "advanced",
        }
    }
}

/// How a drill's volume is prescribed, which decides how it can be shortened.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DrillKind {
    #[default]
    TimeBased,
    RepBased,
    SetBased,
}

impl DrillKind {
    /// Lenient parse used by catalog import; unrecognized values fall back to time based.
    pub fn parse(raw: &str) -> Self {
        match raw.trim().to_ascii_lowercase().replace(['-', ' '], "_").as_str() {
            "rep_based" | "reps" => Self::RepBased,
            "set_based" | "sets" => Self::SetBased,
            _ => Self::TimeBased,
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            DrillKind::TimeBased => "time_based",
            DrillKind::RepBased => "rep_based",
            DrillKind::SetBased => "set_based",
        }
    }
}

/// Immutable catalog fact describing one drill.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DrillCandidate {
    pub id: DrillId,
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub kind: DrillKind,
    #[serde(default)]
    pub primary_skill: Option<SkillFocus>,
    #[serde(default)]
    pub secondary_skills: Vec<SkillFocus>,
    #[serde(default)]
    pub equipment: BTreeSet<String>,
    #[serde(default)]
    pub suitable_locations: BTreeSet<String>,
    #[serde(default)]
    pub difficulty: Option<String>,
    #[serde(default)]
    pub intensity: Option<String>,
    #[serde(default)]
    pub training_styles: Vec<String>,
    /// Base duration in minutes.
    #[serde(default)]
    pub duration: Option<u32>,
    #[serde(default)]
    pub sets: Option<u32>,
    #[serde(default)]
    pub reps: Option<u32>,
    /// Rest between sets in seconds.
    #[serde(default)]
    pub rest: Option<u32>,
    #[serde(default)]
    pub instructions: Vec<String>,
    #[serde(default)]
    pub tips: Vec<String>,
}

impl DrillCandidate {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            id: DrillId::generate(),
            title: title.into(),
            description: String::new(),
            kind: DrillKind::TimeBased,
            primary_skill: None,
            secondary_skills: Vec::new(),
            equipment: BTreeSet::new(),
            suitable_locations: BTreeSet::new(),
            difficulty: None,
            intensity: None,
            training_styles: Vec::new(),
            duration: None,
            sets: None,
            reps: None,
            rest: None,
            instructions: Vec::new(),
            tips: Vec::new(),
        }
    }

    pub fn with_kind(mut self, kind: DrillKind) -> Self {
        self.kind = kind;
        self
    }

    pub fn with_primary_skill(
        mut self,
        category: impl Into<String>,
        sub_skill: impl Into<String>,
    ) -> Self {
        self.primary_skill = Some(SkillFocus::new(category, sub_skill));
        self
    }

    pub fn with_secondary_skill(
        mut self,
        category: impl Into<String>,
        sub_skill: impl Into<String>,
    ) -> Self {
        self.secondary_skills
            .push(SkillFocus::new(category, sub_skill));
        self
    }

    pub fn with_equipment<I, S>(mut self, items: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.equipment = items.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_locations<I, S>(mut self, locations: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.suitable_locations = locations.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_difficulty(mut self, difficulty: impl Into<String>) -> Self {
        self.difficulty = Some(difficulty.into());
        self
    }

    pub fn with_intensity(mut self, intensity: impl Into<String>) -> Self {
        self.intensity = Some(intensity.into());
        self
    }

    pub fn with_training_styles<I, S>(mut self, styles: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.training_styles = styles.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_duration(mut self, minutes: u32) -> Self {
        self.duration = Some(minutes);
        self
    }

    pub fn with_volume(mut self, sets: Option<u32>, reps: Option<u32>, rest: Option<u32>) -> Self {
        self.sets = sets;
        self.reps = reps;
        self.rest = rest;
        self
    }

    /// Sub-skills this drill trains, primary first.
    pub fn sub_skills(&self, include_secondary: bool) -> impl Iterator<Item = &str> + '_ {
        let secondary: &[SkillFocus] = if include_secondary {
            &self.secondary_skills
        } else {
            &[]
        };
        self.primary_skill
            .iter()
            .chain(secondary.iter())
            .map(|focus| focus.sub_skill.as_str())
    }
}

/// Per-request session preferences supplied by the preference store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PreferenceProfile {
    pub duration_budget_minutes: u32,
    #[serde(default)]
    pub available_equipment: BTreeSet<String>,
    #[serde(default)]
    pub training_style: Option<String>,
    #[serde(default)]
    pub training_location: Option<String>,
    #[serde(default)]
    pub difficulty: Option<String>,
    #[serde(default)]
    pub target_skills: Vec<TargetSkill>,
}

impl PreferenceProfile {
    pub fn new(duration_budget_minutes: u32) -> Self {
        Self {
            duration_budget_minutes,
            available_equipment: BTreeSet::new(),
            training_style: None,
            training_location: None,
            difficulty: None,
            target_skills: Vec::new(),
        }
    }

    pub fn with_equipment<I, S>(mut self, items: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.available_equipment = items.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_training_style(mut self, style: impl Into<String>) -> Self {
        self.training_style = Some(style.into());
        self
    }

    pub fn with_location(mut self, location: impl Into<String>) -> Self {
        self.training_location = Some(location.into());
        self
    }

    pub fn with_difficulty(mut self, difficulty: impl Into<String>) -> Self {
        self.difficulty = Some(difficulty.into());
        self
    }

    pub fn with_target(mut self, target: TargetSkill) -> Self {
        self.target_skills.push(target);
        self
    }
}

/// Tag comparison used by every matching rule; both sides go through [`normalize_tag`].
pub(crate) fn same_tag(left: &str, right: &str) -> bool {
    normalize_tag(left) == normalize_tag(right)
}

pub(crate) fn lowered<'a, I>(tags: I) -> BTreeSet<String>
where
    I: IntoIterator<Item = &'a String>,
{
    tags.into_iter()
        .map(|tag| normalize_tag(tag))
        .filter(|tag| !tag.is_empty())
        .collect()
}
