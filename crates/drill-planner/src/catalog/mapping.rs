use tracing::warn;

use super::normalizer::{normalize_label, normalize_tag};
use super::parser::DrillRecord;
use crate::planning::domain::{DrillCandidate, DrillId, DrillKind, SkillFocus};

/// Converts a raw record into a catalog drill, inferring the primary category from the
/// file it came from when the record omits one.
pub(crate) fn to_candidate(record: DrillRecord, file_category: Option<&str>) -> DrillCandidate {
    let primary = record.primary_skill.unwrap_or_default();
    let category = primary
        .category
        .as_deref()
        .map(normalize_tag)
        .filter(|category| !category.is_empty());

    if let (Some(declared), Some(expected)) = (category.as_deref(), file_category) {
        if declared != expected {
            warn!(
                title = %record.title,
                declared,
                expected,
                "drill category does not match its catalog file"
            );
        }
    }

    let primary_skill = category
        .or_else(|| file_category.map(str::to_string))
        .zip(
            primary
                .sub_skill
                .as_deref()
                .map(normalize_tag)
                .filter(|sub_skill| !sub_skill.is_empty()),
        )
        .map(|(category, sub_skill)| SkillFocus {
            category,
            sub_skill,
        });

    let secondary_skills = record
        .secondary_skills
        .iter()
        .flat_map(|skill| {
            let category = normalize_tag(&skill.category);
            skill
                .sub_skill
                .iter()
                .map(move |sub_skill| {
                    SkillFocus::new(category.clone(), normalize_tag(sub_skill))
                })
        })
        .collect();

    DrillCandidate {
        id: record.uuid.map(DrillId).unwrap_or_else(DrillId::generate),
        title: normalize_whitespace(&record.title),
        description: record.description,
        kind: record
            .kind
            .as_deref()
            .map(DrillKind::parse)
            .unwrap_or_default(),
        primary_skill,
        secondary_skills,
        equipment: tags(&record.equipment),
        suitable_locations: tags(&record.suitable_locations),
        difficulty: record.difficulty.as_deref().map(normalize_label),
        intensity: record.intensity.as_deref().map(normalize_tag),
        training_styles: tags(&record.training_styles),
        duration: record.duration,
        sets: record.sets,
        reps: record.reps,
        rest: record.rest,
        instructions: record.instructions,
        tips: record.tips,
    }
}

fn tags<T>(values: &[String]) -> T
where
    T: FromIterator<String>,
{
    values
        .iter()
        .map(|value| normalize_tag(value))
        .filter(|tag| !tag.is_empty())
        .collect()
}

fn normalize_whitespace(value: &str) -> String {
    value.split_whitespace().collect::<Vec<_>>().join(" ")
}
