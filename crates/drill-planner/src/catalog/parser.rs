use serde::{Deserialize, Deserializer};
use uuid::Uuid;

use super::CatalogError;

/// Raw drill entry as it appears in catalog files.
#[derive(Debug, Deserialize)]
pub(crate) struct DrillRecord {
    #[serde(default)]
    pub uuid: Option<Uuid>,
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default, rename = "type")]
    pub kind: Option<String>,
    #[serde(default)]
    pub duration: Option<u32>,
    #[serde(default)]
    pub sets: Option<u32>,
    #[serde(default)]
    pub reps: Option<u32>,
    #[serde(default)]
    pub rest: Option<u32>,
    #[serde(default)]
    pub intensity: Option<String>,
    #[serde(default, deserialize_with = "one_or_many")]
    pub training_styles: Vec<String>,
    #[serde(default, deserialize_with = "one_or_many")]
    pub equipment: Vec<String>,
    #[serde(default, deserialize_with = "one_or_many")]
    pub suitable_locations: Vec<String>,
    #[serde(default)]
    pub difficulty: Option<String>,
    #[serde(default)]
    pub primary_skill: Option<PrimarySkillRecord>,
    #[serde(default)]
    pub secondary_skills: Vec<SecondarySkillRecord>,
    #[serde(default)]
    pub instructions: Vec<String>,
    #[serde(default)]
    pub tips: Vec<String>,
}

#[derive(Debug, Default, Deserialize)]
pub(crate) struct PrimarySkillRecord {
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub sub_skill: Option<String>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct SecondarySkillRecord {
    pub category: String,
    #[serde(deserialize_with = "one_or_many")]
    pub sub_skill: Vec<String>,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum OneOrMany {
    One(String),
    Many(Vec<String>),
}

fn one_or_many<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<OneOrMany>::deserialize(deserializer)?;
    Ok(match value {
        Some(OneOrMany::One(single)) => vec![single],
        Some(OneOrMany::Many(many)) => many,
        None => Vec::new(),
    })
}

/// Parses the JSON array embedded in a catalog file, ignoring any surrounding prose.
pub(crate) fn parse_records(
    content: &str,
    source_name: &str,
) -> Result<Vec<DrillRecord>, CatalogError> {
    let array = extract_json_array(content).ok_or_else(|| CatalogError::MissingArray {
        source_name: source_name.to_string(),
    })?;

    serde_json::from_str(array).map_err(|source| CatalogError::Json {
        source_name: source_name.to_string(),
        source,
    })
}

fn extract_json_array(content: &str) -> Option<&str> {
    let start = content.find('[')?;
    let end = content.rfind(']')?;
    (end > start).then(|| &content[start..=end])
}
