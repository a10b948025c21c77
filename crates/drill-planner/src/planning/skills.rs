use std::collections::HashMap;
use std::sync::OnceLock;

use tracing::warn;

use super::domain::TargetSkill;
use crate::catalog::normalize_label;

static SKILL_LABEL_MAP: OnceLock<HashMap<String, &'static str>> = OnceLock::new();

/// Backend identifier (`category-sub_skill`) for a display label such as "Short passing".
pub fn backend_id_for_label(label: &str) -> Option<&'static str> {
    skill_label_map().get(&normalize_label(label)).copied()
}

/// Groups display labels into target skills, keeping first-seen category order.
pub fn target_skills_from_labels<I, S>(labels: I) -> Vec<TargetSkill>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut targets: Vec<TargetSkill> = Vec::new();

    for label in labels {
        let label = label.as_ref();
        let Some((category, sub_skill)) = backend_id_for_label(label).and_then(split_backend_id)
        else {
            warn!(label, "ignoring unknown skill label");
            continue;
        };

        match targets
            .iter_mut()
            .find(|target| target.category == category)
        {
            Some(target) => {
                if !target.sub_skills.iter().any(|known| known == sub_skill) {
                    target.sub_skills.push(sub_skill.to_string());
                }
            }
            None => targets.push(TargetSkill::new(category, [sub_skill])),
        }
    }

    targets
}

fn split_backend_id(id: &str) -> Option<(&str, &str)> {
    id.split_once('-')
}

fn skill_label_map() -> &'static HashMap<String, &'static str> {
    SKILL_LABEL_MAP.get_or_init(|| {
        const LABEL_TO_SKILL: &[(&str, &str)] = &[
            // Dribbling
            ("Close control", "dribbling-close_control"),
            ("Speed dribbling", "dribbling-speed_dribbling"),
            ("1v1 moves", "dribbling-1v1_moves"),
            ("Change of direction", "dribbling-change_of_direction"),
            ("Ball mastery", "dribbling-ball_mastery"),
            // First touch
            ("Ground control", "first_touch-ground_control"),
            ("Aerial control", "first_touch-aerial_control"),
            ("Turn with ball", "first_touch-turn_with_ball"),
            ("Touch and move", "first_touch-touch_and_move"),
            ("Juggling", "first_touch-juggling"),
            // Passing
            ("Short passing", "passing-short_passing"),
            ("Long passing", "passing-long_passing"),
            ("One touch passing", "passing-one_touch_passing"),
            ("Technique", "passing-technique"),
            ("Passing with movement", "passing-passing_with_movement"),
            // Shooting
            ("Power shots", "shooting-power_shots"),
            ("Finesse shots", "shooting-finesse_shots"),
            ("First time shots", "shooting-first_time_shots"),
            ("1v1 to shoot", "shooting-1v1_to_shoot"),
            ("Shooting on the run", "shooting-shooting_on_the_run"),
            ("Volleying", "shooting-volleying"),
            // Defending
            ("Tackling", "defending-tackling"),
            ("Marking", "defending-marking"),
            ("Intercepting", "defending-intercepting"),
            ("Aerial defending", "defending-aerial_defending"),
            // Goalkeeping
            ("Catching", "goalkeeping-catching"),
            ("Shot stopping", "goalkeeping-shot_stopping"),
            ("Diving", "goalkeeping-diving"),
            ("Reflexes", "goalkeeping-reflexes"),
            ("Hand eye coordination", "goalkeeping-hand_eye_coordination"),
            // Shared labels resolve to the later category.
            ("Positioning", "goalkeeping-positioning"),
            // Fitness
            ("Speed", "fitness-speed"),
            ("Agility", "fitness-agility"),
            ("Endurance", "fitness-endurance"),
        ];

        LABEL_TO_SKILL
            .iter()
            .map(|(label, id)| (normalize_label(label), *id))
            .collect()
    })
}
