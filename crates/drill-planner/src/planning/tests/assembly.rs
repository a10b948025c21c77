use std::collections::HashSet;

use super::common::*;
use crate::planning::domain::{DrillCandidate, PreferenceProfile, TargetSkill};
use crate::planning::{
    assemble_session, AssemblyPolicy, PlanningError, ScoringConfig, Session, SessionAssembler,
};

fn titles(session: &Session) -> Vec<&str> {
    session
        .entries
        .iter()
        .map(|entry| entry.drill.title.as_str())
        .collect()
}

#[test]
fn exact_match_drill_is_selected() {
    let session = assemble_session(&[wall_pass_drill()], &wall_pass_prefs(), &mut rng(SEED))
        .expect("valid budget");

    assert_eq!(titles(&session), vec!["Wall Pass Mastery"]);
    assert_eq!(session.total_duration_minutes, 15);
    assert_eq!(session.focus_areas, vec!["wall_passing".to_string()]);

    let entry = &session.entries[0];
    assert_eq!(entry.position, 0);
    assert!(!entry.adjusted);
    assert_eq!(entry.intensity_modifier, 1.0);
    assert!(!entry.is_completed);
    assert_eq!(entry.sets_done, 0);
}

#[test]
fn overlong_drill_is_not_selected() {
    let assembler = SessionAssembler::default();

    for seed in 0..20 {
        let session = assembler
            .assemble(&[passing_drill("Marathon rondo", 70)], &passing_prefs(60), &mut rng(seed))
            .expect("valid budget");

        assert!(session.is_empty());
        assert_eq!(session.total_duration_minutes, 0);
    }
}

#[test]
fn long_sessions_are_capped_at_six_drills() {
    let assembler = SessionAssembler::default();
    let ten_minute: Vec<DrillCandidate> = (0..12)
        .map(|index| passing_drill(&format!("Ten {index}"), 10))
        .collect();
    let fifteen_minute: Vec<DrillCandidate> = (0..10)
        .map(|index| passing_drill(&format!("Fifteen {index}"), 15))
        .collect();

    for seed in 0..20 {
        let session = assembler
            .assemble(&ten_minute, &passing_prefs(90), &mut rng(seed))
            .expect("valid budget");
        assert_eq!(session.len(), 6);
        assert_eq!(session.total_duration_minutes, 60);

        let session = assembler
            .assemble(&fifteen_minute, &passing_prefs(90), &mut rng(seed))
            .expect("valid budget");
        assert_eq!(session.len(), 6);
        assert_eq!(session.total_duration_minutes, 90);
    }
}

#[test]
fn shorter_sessions_are_not_capped() {
    let assembler = deterministic_assembler();
    let catalog: Vec<DrillCandidate> = (0..10)
        .map(|index| passing_drill(&format!("Five {index}"), 5))
        .collect();

    let session = assembler
        .assemble(&catalog, &passing_prefs(45), &mut rng(SEED))
        .expect("valid budget");

    assert_eq!(session.len(), 9);
    assert_eq!(session.total_duration_minutes, 45);
}

#[test]
fn missing_critical_equipment_yields_an_empty_session() {
    let catalog: Vec<DrillCandidate> = (0..8)
        .map(|index| goals_drill(&format!("Finishing {index}")))
        .collect();
    let prefs = PreferenceProfile::new(60)
        .with_target(TargetSkill::new("shooting", ["power_shots"]));

    for seed in 0..20 {
        let session = assemble_session(&catalog, &prefs, &mut rng(seed)).expect("valid budget");
        assert!(session.is_empty());
        assert_eq!(session.total_duration_minutes, 0);
        assert!(session.focus_areas.is_empty());
    }
}

#[test]
fn empty_catalog_yields_an_empty_session() {
    let session = assemble_session(&[], &passing_prefs(30), &mut rng(SEED)).expect("valid budget");
    assert!(session.is_empty());
    assert_eq!(session.budget_minutes, 30);
}

#[test]
fn zero_budget_is_a_caller_error() {
    let result = assemble_session(&[wall_pass_drill()], &PreferenceProfile::new(0), &mut rng(SEED));

    assert_eq!(result, Err(PlanningError::InvalidBudget { minutes: 0 }));
}

#[test]
fn last_time_based_drill_is_truncated_to_fill_the_budget() {
    let assembler = deterministic_assembler();
    let catalog = vec![passing_drill("Opener", 20), passing_drill("Closer", 20)];

    let session = assembler
        .assemble(&catalog, &passing_prefs(30), &mut rng(SEED))
        .expect("valid budget");

    assert_eq!(titles(&session), vec!["Opener", "Closer"]);
    assert_eq!(session.entries[1].duration_minutes, 10);
    assert!(session.entries[1].adjusted);
    assert!(!session.entries[0].adjusted);
    assert_eq!(session.total_duration_minutes, 30);
}

#[test]
fn rep_based_drills_drop_sets_to_fit() {
    let assembler = deterministic_assembler();
    let catalog = vec![passing_drill("Opener", 18), rep_drill("Switch Play", 24, 4)];

    let session = assembler
        .assemble(&catalog, &passing_prefs(30), &mut rng(SEED))
        .expect("valid budget");

    let closer = &session.entries[1];
    assert_eq!(closer.drill.title, "Switch Play");
    assert_eq!(closer.duration_minutes, 12);
    assert_eq!(closer.sets, Some(2));
    assert_eq!(closer.reps, Some(12));
    assert!(closer.adjusted);
    assert_eq!(session.total_duration_minutes, 30);
}

#[test]
fn set_rounding_may_overrun_within_tolerance() {
    let assembler = deterministic_assembler();
    let catalog = vec![passing_drill("Opener", 16), rep_drill("Switch Play", 30, 4)];

    let session = assembler
        .assemble(&catalog, &passing_prefs(30), &mut rng(SEED))
        .expect("valid budget");

    assert_eq!(session.entries[1].duration_minutes, 15);
    assert_eq!(session.entries[1].sets, Some(2));
    assert_eq!(session.total_duration_minutes, 31);
    assert!(session.total_duration_minutes <= 36);
}

#[test]
fn unshrinkable_drills_are_skipped_without_ending_the_scan() {
    let assembler = deterministic_assembler();
    let catalog = vec![
        passing_drill("Main block", 25),
        rep_drill("Single set", 20, 1),
        passing_drill("Cooldown", 5).with_difficulty("advanced"),
    ];

    let session = assembler
        .assemble(&catalog, &passing_prefs(30), &mut rng(SEED))
        .expect("valid budget");

    assert_eq!(titles(&session), vec!["Main block", "Cooldown"]);
    assert_eq!(session.total_duration_minutes, 30);
}

#[test]
fn limited_equipment_allows_shorter_closing_drills() {
    let assembler = deterministic_assembler();
    let catalog = vec![
        passing_drill("Main block", 27),
        passing_drill("Finisher", 10).with_difficulty("advanced"),
    ];

    let stocked = assembler
        .assemble(&catalog, &passing_prefs(30), &mut rng(SEED))
        .expect("valid budget");
    assert_eq!(titles(&stocked), vec!["Main block"]);
    assert_eq!(stocked.total_duration_minutes, 27);

    let limited = passing_prefs(30).with_equipment(["ball"]);
    let session = assembler
        .assemble(&catalog, &limited, &mut rng(SEED))
        .expect("valid budget");
    assert_eq!(titles(&session), vec!["Main block", "Finisher"]);
    assert_eq!(session.entries[1].duration_minutes, 3);
    assert_eq!(session.total_duration_minutes, 30);
}

#[test]
fn drills_without_duration_use_the_default_length() {
    let assembler = deterministic_assembler();
    let mut untimed = passing_drill("Untimed", 0);
    untimed.duration = None;

    let session = assembler
        .assemble(&[untimed], &passing_prefs(30), &mut rng(SEED))
        .expect("valid budget");

    assert_eq!(session.entries[0].duration_minutes, 10);
    assert_eq!(session.total_duration_minutes, 10);
}

#[test]
fn focus_areas_are_deduplicated_in_selection_order() {
    let catalog = vec![
        passing_drill("Triangle Passing", 20),
        passing_drill("Gate Passing", 20),
        wall_pass_drill()
            .with_equipment(["ball", "cones"])
            .with_locations(["small_field"])
            .with_duration(20),
    ];
    let prefs = passing_prefs(60).with_target(TargetSkill::new("passing", ["wall_passing"]));

    let session = deterministic_assembler()
        .assemble(&catalog, &prefs, &mut rng(SEED))
        .expect("valid budget");
    assert_eq!(session.len(), 3);
    let mut expected: Vec<String> = session
        .entries
        .iter()
        .flat_map(|entry| entry.drill.sub_skills(true).map(str::to_string).collect::<Vec<_>>())
        .collect();
    let mut seen = HashSet::new();
    expected.retain(|sub_skill| seen.insert(sub_skill.clone()));
    assert_eq!(session.focus_areas, expected);
    assert_eq!(session.focus_areas.len(), 3);

    let primary_only = SessionAssembler::new(
        ScoringConfig::default().without_jitter(),
        AssemblyPolicy {
            include_secondary_focus: false,
            ..AssemblyPolicy::default()
        },
    )
    .expect("valid config");
    let session = primary_only
        .assemble(&catalog, &prefs, &mut rng(SEED))
        .expect("valid budget");
    assert!(!session.focus_areas.contains(&"ground_control".to_string()));
    assert_eq!(session.focus_areas.len(), 2);
}

#[test]
fn entries_scale_intensity_by_level_gap() {
    let catalog = vec![
        passing_drill("Level match", 10),
        passing_drill("Stretch", 10).with_difficulty("advanced"),
        passing_drill("Warmup", 10).with_difficulty("beginner"),
    ];

    let session = deterministic_assembler()
        .assemble(&catalog, &passing_prefs(30), &mut rng(SEED))
        .expect("valid budget");

    let modifier = |title: &str| {
        session
            .entries
            .iter()
            .find(|entry| entry.drill.title == title)
            .map(|entry| entry.intensity_modifier)
    };
    assert_eq!(modifier("Level match"), Some(1.0));
    assert_eq!(modifier("Stretch"), Some(0.8));
    assert_eq!(modifier("Warmup"), Some(1.2));
}

#[test]
fn generated_sessions_respect_budget_cap_and_positions() {
    let assembler = SessionAssembler::default();
    let budgets = [10, 15, 30, 45, 60, 89, 90, 120];

    for seed in 0..50 {
        let catalog = generated_catalog(seed, 40);
        for budget in budgets {
            let prefs = PreferenceProfile::new(budget)
                .with_equipment(["ball", "cones"])
                .with_location("small_field")
                .with_difficulty("intermediate")
                .with_target(TargetSkill::new("passing", ["short_passing"]));

            let session = assembler
                .assemble(&catalog, &prefs, &mut rng(seed))
                .expect("valid budget");

            let ceiling = (f64::from(budget) * 1.2).floor() as u32;
            assert!(session.total_duration_minutes <= ceiling, "seed {seed} budget {budget}");
            assert_eq!(
                session.total_duration_minutes,
                session
                    .entries
                    .iter()
                    .map(|entry| entry.duration_minutes)
                    .sum::<u32>()
            );
            if budget >= 90 {
                assert!(session.len() <= 6);
            }

            let mut ids = HashSet::new();
            for (index, entry) in session.entries.iter().enumerate() {
                assert_eq!(entry.position, index);
                assert!(ids.insert(entry.drill.id));
                assert!(!entry.drill.equipment.contains("goals"));
                assert!(entry.drill.duration.unwrap_or(10) <= budget);
                if !entry.adjusted {
                    assert_eq!(Some(entry.duration_minutes), entry.drill.duration);
                }
            }
        }
    }
}

fn balanced_assembler() -> SessionAssembler {
    SessionAssembler::new(
        ScoringConfig::default().without_jitter(),
        AssemblyPolicy {
            skill_balance: true,
            ..AssemblyPolicy::default()
        },
    )
    .expect("valid config")
}

fn mixed_catalog() -> Vec<DrillCandidate> {
    vec![
        passing_drill("Triangle", 10),
        passing_drill("Gate", 10),
        passing_drill("Overlap", 10),
        passing_drill("Cone Weave", 10)
            .with_primary_skill("dribbling", "close_control")
            .with_difficulty("advanced"),
    ]
}

fn mixed_prefs(budget: u32) -> PreferenceProfile {
    passing_prefs(budget).with_target(TargetSkill::new("Dribbling", ["close_control"]))
}

#[test]
fn skill_balance_is_off_by_default() {
    let session = deterministic_assembler()
        .assemble(&mixed_catalog(), &mixed_prefs(30), &mut rng(SEED))
        .expect("valid budget");

    assert_eq!(session.len(), 3);
    assert!(!titles(&session).contains(&"Cone Weave"));
}

#[test]
fn skill_balance_reserves_slots_for_each_target_category() {
    let session = balanced_assembler()
        .assemble(&mixed_catalog(), &mixed_prefs(30), &mut rng(SEED))
        .expect("valid budget");

    let picked = titles(&session);
    assert_eq!(picked.len(), 3);
    assert!(picked.contains(&"Cone Weave"));
    assert_eq!(picked.iter().filter(|title| **title != "Cone Weave").count(), 2);
    assert_eq!(session.total_duration_minutes, 30);
    assert_eq!(*picked.last().expect("entries"), "Cone Weave");
}

#[test]
fn skill_balance_backfills_and_keeps_hard_excludes() {
    let mut catalog = mixed_catalog();
    catalog.push(goals_drill("Finishing"));
    let prefs = mixed_prefs(60).with_target(TargetSkill::new("shooting", ["power_shots"]));

    let session = balanced_assembler()
        .assemble(&catalog, &prefs, &mut rng(SEED))
        .expect("valid budget");

    let picked = titles(&session);
    assert_eq!(picked.len(), 4);
    assert!(!picked.contains(&"Finishing"));
    assert_eq!(session.total_duration_minutes, 40);
}

#[test]
fn skill_balance_without_targets_keeps_ranked_order() {
    let catalog = mixed_catalog();
    let prefs = PreferenceProfile::new(30).with_equipment(["ball", "cones"]);

    let balanced = balanced_assembler()
        .assemble(&catalog, &prefs, &mut rng(SEED))
        .expect("valid budget");
    let plain = deterministic_assembler()
        .assemble(&catalog, &prefs, &mut rng(SEED))
        .expect("valid budget");

    assert_eq!(titles(&balanced), titles(&plain));
}
