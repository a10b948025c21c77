use super::super::domain::{lowered, same_tag, Difficulty, DrillCandidate, PreferenceProfile};
use super::config::ScoringConfig;
use super::{Criterion, FallbackReason, NeutralFallback};

const NEUTRAL: f64 = 0.5;
const CATEGORY_ONLY_CREDIT: f64 = 0.3;
const SECONDARY_CAP: f64 = 0.5;
const ADAPTED_EQUIPMENT: f64 = 0.6;
const BASIC_KIT: f64 = 0.8;
const TRIVIAL_PORTION: f64 = 0.10;
const DOMINANT_PORTION: f64 = 0.50;

/// Unweighted sub-score plus the fallback that produced it, if any.
pub(crate) struct CriterionScore {
    pub value: f64,
    pub fallback: Option<NeutralFallback>,
}

impl CriterionScore {
    fn scored(value: f64) -> Self {
        Self {
            value,
            fallback: None,
        }
    }

    fn fallback(criterion: Criterion, value: f64, reason: FallbackReason) -> Self {
        Self {
            value,
            fallback: Some(NeutralFallback { criterion, reason }),
        }
    }
}

pub(crate) fn evaluate(
    criterion: Criterion,
    drill: &DrillCandidate,
    prefs: &PreferenceProfile,
    config: &ScoringConfig,
) -> CriterionScore {
    match criterion {
        Criterion::PrimarySkill => primary_skill(drill, prefs),
        Criterion::SecondarySkill => secondary_skill(drill, prefs),
        Criterion::Equipment => equipment(drill, prefs, config),
        Criterion::Location => location(drill, prefs),
        Criterion::Difficulty => difficulty(drill, prefs),
        Criterion::Intensity => intensity(drill, prefs),
        Criterion::Duration => duration(drill, prefs),
        Criterion::TrainingStyle => training_style(drill, prefs),
    }
}

fn primary_skill(drill: &DrillCandidate, prefs: &PreferenceProfile) -> CriterionScore {
    let Some(primary) = &drill.primary_skill else {
        return CriterionScore::fallback(
            Criterion::PrimarySkill,
            0.0,
            FallbackReason::NoPrimarySkill,
        );
    };
    if prefs.target_skills.is_empty() {
        return CriterionScore::fallback(
            Criterion::PrimarySkill,
            0.0,
            FallbackReason::NoTargetSkills,
        );
    }

    let mut score = 0.0;
    for target in &prefs.target_skills {
        if !target.matches_category(&primary.category) {
            continue;
        }
        if target.contains_sub_skill(&primary.sub_skill) {
            return CriterionScore::scored(1.0);
        }
        score = CATEGORY_ONLY_CREDIT;
    }
    CriterionScore::scored(score)
}

fn secondary_skill(drill: &DrillCandidate, prefs: &PreferenceProfile) -> CriterionScore {
    // Without a primary focus the drill earns no skill credit at all.
    if drill.primary_skill.is_none() || prefs.target_skills.is_empty() {
        return CriterionScore::scored(0.0);
    }

    let credit: f64 = drill
        .secondary_skills
        .iter()
        .map(|focus| {
            let mut same_category = prefs
                .target_skills
                .iter()
                .filter(|target| target.matches_category(&focus.category))
                .peekable();
            if same_category.peek().is_none() {
                0.0
            } else if same_category.any(|target| target.contains_sub_skill(&focus.sub_skill)) {
                1.0
            } else {
                CATEGORY_ONLY_CREDIT
            }
        })
        .sum();

    CriterionScore::scored(credit.min(SECONDARY_CAP))
}

fn equipment(
    drill: &DrillCandidate,
    prefs: &PreferenceProfile,
    config: &ScoringConfig,
) -> CriterionScore {
    let required = lowered(&drill.equipment);
    if required.is_empty() {
        return CriterionScore::scored(1.0);
    }

    let owned = lowered(&prefs.available_equipment);
    let basic_kit = lowered(&config.basic_kit);
    if required == basic_kit {
        let value = if basic_kit.is_subset(&owned) {
            BASIC_KIT
        } else {
            0.0
        };
        return CriterionScore::scored(value);
    }

    let missing: Vec<&String> = required.difference(&owned).collect();
    if missing.is_empty() {
        return CriterionScore::scored(1.0);
    }

    let critical = lowered(&config.critical_equipment);
    if missing.iter().any(|item| critical.contains(*item)) {
        return CriterionScore::scored(0.0);
    }

    let adaptable = lowered(&config.adaptable_equipment);
    if missing.iter().all(|item| adaptable.contains(*item)) {
        return CriterionScore::scored(ADAPTED_EQUIPMENT);
    }

    CriterionScore::scored(0.0)
}

fn location(drill: &DrillCandidate, prefs: &PreferenceProfile) -> CriterionScore {
    if drill.suitable_locations.is_empty() {
        return CriterionScore::fallback(Criterion::Location, NEUTRAL, FallbackReason::NotDeclared);
    }
    let Some(wanted) = prefs.training_location.as_deref() else {
        return CriterionScore::fallback(
            Criterion::Location,
            NEUTRAL,
            FallbackReason::NotRequested,
        );
    };

    let suitable = drill
        .suitable_locations
        .iter()
        .any(|location| same_tag(location, wanted));
    CriterionScore::scored(if suitable { 1.0 } else { 0.0 })
}

fn difficulty(drill: &DrillCandidate, prefs: &PreferenceProfile) -> CriterionScore {
    let Some(drill_raw) = drill.difficulty.as_deref() else {
        return CriterionScore::fallback(
            Criterion::Difficulty,
            NEUTRAL,
            FallbackReason::NotDeclared,
        );
    };
    let Some(player_raw) = prefs.difficulty.as_deref() else {
        return CriterionScore::fallback(
            Criterion::Difficulty,
            NEUTRAL,
            FallbackReason::NotRequested,
        );
    };

    let parsed = (Difficulty::parse(drill_raw), Difficulty::parse(player_raw));
    let (drill_level, player_level) = match parsed {
        (Some(drill_level), Some(player_level)) => (drill_level, player_level),
        (None, _) => return unrecognized(Criterion::Difficulty, drill_raw),
        (_, None) => return unrecognized(Criterion::Difficulty, player_raw),
    };

    let value = match drill_level.rank().abs_diff(player_level.rank()) {
        0 => 1.0,
        1 => 0.5,
        _ => 0.2,
    };
    CriterionScore::scored(value)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum IntensityLevel {
    Low,
    Medium,
    High,
}

fn intensity_level(raw: &str) -> Option<IntensityLevel> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "low" | "low_intensity" => Some(IntensityLevel::Low),
        "medium" | "medium_intensity" => Some(IntensityLevel::Medium),
        "high" | "high_intensity" => Some(IntensityLevel::High),
        _ => None,
    }
}

fn intensity(drill: &DrillCandidate, prefs: &PreferenceProfile) -> CriterionScore {
    let Some(drill_raw) = drill.intensity.as_deref() else {
        return CriterionScore::fallback(
            Criterion::Intensity,
            NEUTRAL,
            FallbackReason::NotDeclared,
        );
    };
    let Some(style_raw) = prefs.training_style.as_deref() else {
        return CriterionScore::fallback(
            Criterion::Intensity,
            NEUTRAL,
            FallbackReason::NotRequested,
        );
    };

    match (intensity_level(drill_raw), intensity_level(style_raw)) {
        (Some(drill_level), Some(wanted)) => {
            CriterionScore::scored(if drill_level == wanted { 1.0 } else { NEUTRAL })
        }
        (None, _) => unrecognized(Criterion::Intensity, drill_raw),
        (_, None) => unrecognized(Criterion::Intensity, style_raw),
    }
}

fn training_style(drill: &DrillCandidate, prefs: &PreferenceProfile) -> CriterionScore {
    if drill.training_styles.is_empty() {
        return CriterionScore::fallback(
            Criterion::TrainingStyle,
            NEUTRAL,
            FallbackReason::NotDeclared,
        );
    }
    let Some(wanted) = prefs.training_style.as_deref() else {
        return CriterionScore::fallback(
            Criterion::TrainingStyle,
            NEUTRAL,
            FallbackReason::NotRequested,
        );
    };

    let matched = drill
        .training_styles
        .iter()
        .any(|style| same_tag(style, wanted));
    CriterionScore::scored(if matched { 1.0 } else { 0.0 })
}

fn duration(drill: &DrillCandidate, prefs: &PreferenceProfile) -> CriterionScore {
    let Some(minutes) = drill.duration else {
        return CriterionScore::fallback(Criterion::Duration, NEUTRAL, FallbackReason::NotDeclared);
    };

    let budget = prefs.duration_budget_minutes;
    if budget == 0 || minutes > budget {
        return CriterionScore::scored(0.0);
    }

    let portion = f64::from(minutes) / f64::from(budget);
    let value = if portion < TRIVIAL_PORTION {
        0.5
    } else if portion > DOMINANT_PORTION {
        0.7
    } else {
        1.0
    };
    CriterionScore::scored(value)
}

fn unrecognized(criterion: Criterion, raw: &str) -> CriterionScore {
    CriterionScore::fallback(
        criterion,
        NEUTRAL,
        FallbackReason::Unrecognized {
            value: raw.to_string(),
        },
    )
}
