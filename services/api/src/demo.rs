use crate::infra::InMemoryDrillCatalog;
use chrono::{Local, NaiveDate};
use clap::Args;
use drill_planner::catalog::DrillImporter;
use drill_planner::config::{AppConfig, PlannerConfig};
use drill_planner::error::AppError;
use drill_planner::planning::{
    target_skills_from_labels, AssemblyPolicy, DrillCandidate, DrillKind, PlanningService,
    PreferenceProfile, ScoreBreakdownView, ScoringConfig, Session, SessionView, TargetSkill,
};
use std::path::PathBuf;
use std::sync::Arc;

/// Player preferences shared by the `plan` and `score` commands.
#[derive(Args, Debug, Clone)]
pub(crate) struct ProfileArgs {
    /// Session length in minutes
    #[arg(long, default_value_t = 60)]
    pub(crate) minutes: u32,
    /// Equipment the player owns (comma separated)
    #[arg(long, value_delimiter = ',')]
    pub(crate) equipment: Vec<String>,
    /// Where the session takes place (e.g. small_field, backyard)
    #[arg(long)]
    pub(crate) location: Option<String>,
    /// Player level: beginner, intermediate or advanced
    #[arg(long)]
    pub(crate) difficulty: Option<String>,
    /// Preferred training style (e.g. medium_intensity)
    #[arg(long)]
    pub(crate) style: Option<String>,
    /// Skill labels to train, e.g. --skill "Short passing" (repeatable)
    #[arg(long = "skill")]
    pub(crate) skills: Vec<String>,
}

impl Default for ProfileArgs {
    fn default() -> Self {
        Self {
            minutes: 60,
            equipment: Vec::new(),
            location: None,
            difficulty: None,
            style: None,
            skills: Vec::new(),
        }
    }
}

impl ProfileArgs {
    pub(crate) fn to_profile(&self) -> PreferenceProfile {
        let mut profile = PreferenceProfile::new(self.minutes).with_equipment(
            self.equipment
                .iter()
                .map(|item| item.trim().to_string())
                .filter(|item| !item.is_empty()),
        );
        profile.training_location = self.location.clone();
        profile.difficulty = self.difficulty.clone();
        profile.training_style = self.style.clone();
        profile.target_skills = target_skills_from_labels(&self.skills);
        profile
    }
}

#[derive(Args, Debug, Default)]
pub(crate) struct PlanArgs {
    #[command(flatten)]
    pub(crate) profile: ProfileArgs,
    /// Drill catalog file or directory (defaults to PLANNER_CATALOG_PATH)
    #[arg(long)]
    pub(crate) catalog: Option<PathBuf>,
    /// Seed for reproducible sessions
    #[arg(long)]
    pub(crate) seed: Option<u64>,
    /// Session date shown in the header (YYYY-MM-DD). Defaults to today.
    #[arg(long, value_parser = crate::infra::parse_date)]
    pub(crate) date: Option<NaiveDate>,
    /// Print the session payload as JSON instead of a table
    #[arg(long)]
    pub(crate) json: bool,
    /// Reserve slots for every requested skill category
    #[arg(long)]
    pub(crate) balance_skills: bool,
}

#[derive(Args, Debug, Default)]
pub(crate) struct ScoreArgs {
    #[command(flatten)]
    pub(crate) profile: ProfileArgs,
    /// Drill catalog file or directory (defaults to PLANNER_CATALOG_PATH)
    #[arg(long)]
    pub(crate) catalog: Option<PathBuf>,
    /// Seed for reproducible jitter
    #[arg(long)]
    pub(crate) seed: Option<u64>,
    /// Only show the best N drills
    #[arg(long)]
    pub(crate) top: Option<usize>,
}

#[derive(Args, Debug, Default)]
pub(crate) struct DemoArgs {
    /// Seed for reproducible sessions
    #[arg(long, default_value_t = 7)]
    pub(crate) seed: u64,
    /// Session length in minutes
    #[arg(long, default_value_t = 45)]
    pub(crate) minutes: u32,
}

pub(crate) fn run_plan(args: PlanArgs) -> Result<(), AppError> {
    let PlanArgs {
        profile,
        catalog,
        seed,
        date,
        json,
        balance_skills,
    } = args;

    let service = planning_service(catalog, seed, balance_skills)?;
    let prefs = profile.to_profile();
    let session = service.generate(&prefs)?;
    let view = SessionView::from_session(&session);

    if json {
        match serde_json::to_string_pretty(&view) {
            Ok(payload) => println!("{payload}"),
            Err(err) => println!("Session payload unavailable: {err}"),
        }
        return Ok(());
    }

    let date = date.unwrap_or_else(|| Local::now().date_naive());
    render_session(&session, &view, date);
    Ok(())
}

pub(crate) fn run_score(args: ScoreArgs) -> Result<(), AppError> {
    let ScoreArgs {
        profile,
        catalog,
        seed,
        top,
    } = args;

    let service = planning_service(catalog, seed, false)?;
    let breakdown = service.score(&profile.to_profile())?;
    let shown = top.unwrap_or(breakdown.len());
    render_scores(&breakdown[..shown.min(breakdown.len())]);
    Ok(())
}

pub(crate) fn run_demo(args: DemoArgs) -> Result<(), AppError> {
    let DemoArgs { seed, minutes } = args;

    println!("Drill planner demo");
    let catalog = Arc::new(InMemoryDrillCatalog::new(sample_catalog()));
    let service = PlanningService::new(
        catalog,
        ScoringConfig::default(),
        AssemblyPolicy::default(),
        Some(seed),
    )?;

    let prefs = demo_profile(minutes);
    println!(
        "- {} minute session | equipment: {} | location: {}",
        prefs.duration_budget_minutes,
        join_or_none(prefs.available_equipment.iter().map(String::as_str)),
        prefs.training_location.as_deref().unwrap_or("any")
    );

    let session = service.generate(&prefs)?;
    let view = SessionView::from_session(&session);
    render_session(&session, &view, Local::now().date_naive());

    println!("\nScore breakdown");
    let breakdown = service.score(&prefs)?;
    render_scores(&breakdown);

    let sparse = PreferenceProfile::new(minutes)
        .with_target(TargetSkill::new("shooting", ["power_shots"]));
    let empty = service.generate(&sparse)?;
    let empty_view = SessionView::from_session(&empty);
    println!(
        "\nWithout a ball: {}",
        empty_view.notice.as_deref().unwrap_or("session available")
    );

    Ok(())
}

fn planning_service(
    catalog: Option<PathBuf>,
    seed: Option<u64>,
    balance_skills: bool,
) -> Result<PlanningService<InMemoryDrillCatalog>, AppError> {
    let planner = AppConfig::load()?.planner;
    let planner = PlannerConfig {
        catalog_path: catalog.unwrap_or(planner.catalog_path),
        seed: seed.or(planner.seed),
        skill_balance: balance_skills || planner.skill_balance,
        ..planner
    };

    let drills = DrillImporter::load(&planner.catalog_path)?;
    let catalog = Arc::new(InMemoryDrillCatalog::new(drills));
    Ok(PlanningService::from_config(catalog, &planner)?)
}

pub(crate) fn render_session(session: &Session, view: &SessionView, date: NaiveDate) {
    println!(
        "\nSession for {} ({} of {} minutes)",
        date, view.total_duration, view.budget_minutes
    );
    if let Some(notice) = &view.notice {
        println!("  {notice}; try relaxing equipment or location constraints");
        return;
    }

    for (entry, drill) in session.entries.iter().zip(&view.drills) {
        let volume = match (drill.sets, drill.reps) {
            (Some(sets), Some(reps)) if reps > 0 => format!("{sets} x {reps}"),
            (Some(sets), _) => format!("{sets} sets"),
            _ => "continuous".to_string(),
        };
        println!(
            "  {}. {} [{}] {} min | {} | intensity x{:.1}{}",
            drill.position + 1,
            drill.title,
            drill.primary_skill,
            drill.duration,
            volume,
            drill.intensity_modifier,
            if entry.adjusted { " (shortened)" } else { "" }
        );
    }
    println!("  Focus areas: {}", join_or_none(view.focus_areas.iter().map(String::as_str)));
}

pub(crate) fn render_scores(breakdown: &[ScoreBreakdownView]) {
    for entry in breakdown {
        let status = entry
            .excluded_by
            .map(|criterion| format!("excluded by {}", criterion.label()))
            .unwrap_or_else(|| "eligible".to_string());
        println!(
            "  {:>6.2}  {} ({}; jitter x{:.3})",
            entry.total_score, entry.title, status, entry.jitter_factor
        );
        let parts: Vec<String> = entry
            .scores
            .iter()
            .map(|(criterion, score)| format!("{}={:.2}", criterion.label(), score))
            .collect();
        println!("          {}", parts.join(" "));
        if !entry.fallbacks.is_empty() {
            let fallbacks: Vec<&str> = entry
                .fallbacks
                .iter()
                .map(|fallback| fallback.criterion.label())
                .collect();
            println!("          neutral: {}", fallbacks.join(", "));
        }
    }
}

fn join_or_none<'a>(items: impl Iterator<Item = &'a str>) -> String {
    let joined: Vec<&str> = items.collect();
    if joined.is_empty() {
        "none".to_string()
    } else {
        joined.join(", ")
    }
}

fn demo_profile(minutes: u32) -> PreferenceProfile {
    let mut prefs = PreferenceProfile::new(minutes)
        .with_equipment(["ball", "cones"])
        .with_location("small_field")
        .with_difficulty("intermediate")
        .with_training_style("medium_intensity");
    prefs.target_skills = target_skills_from_labels(["Short passing", "Ground control"]);
    prefs
}

pub(crate) fn sample_catalog() -> Vec<DrillCandidate> {
    vec![
        DrillCandidate::new("Triangle Passing")
            .with_primary_skill("passing", "short_passing")
            .with_secondary_skill("passing", "passing_with_movement")
            .with_equipment(["ball", "cones"])
            .with_locations(["small_field", "full_field"])
            .with_difficulty("intermediate")
            .with_intensity("medium")
            .with_training_styles(["medium_intensity"])
            .with_duration(20),
        DrillCandidate::new("Receive and Turn")
            .with_kind(DrillKind::RepBased)
            .with_primary_skill("first_touch", "turn_with_ball")
            .with_secondary_skill("first_touch", "ground_control")
            .with_equipment(["ball", "cones"])
            .with_locations(["small_field", "backyard"])
            .with_difficulty("intermediate")
            .with_intensity("medium")
            .with_training_styles(["medium_intensity"])
            .with_duration(16)
            .with_volume(Some(4), Some(6), Some(30)),
        DrillCandidate::new("Wall Pass Mastery")
            .with_primary_skill("passing", "wall_passing")
            .with_equipment(["ball", "wall"])
            .with_locations(["backyard", "small_field"])
            .with_difficulty("beginner")
            .with_duration(15),
        DrillCandidate::new("Cone Weave")
            .with_kind(DrillKind::SetBased)
            .with_primary_skill("dribbling", "close_control")
            .with_equipment(["ball", "cones"])
            .with_locations(["small_field"])
            .with_difficulty("beginner")
            .with_intensity("high")
            .with_training_styles(["high_intensity"])
            .with_duration(12)
            .with_volume(Some(4), Some(2), Some(30)),
        DrillCandidate::new("Finishing Under Pressure")
            .with_primary_skill("shooting", "power_shots")
            .with_equipment(["ball", "goals"])
            .with_locations(["full_field"])
            .with_difficulty("advanced")
            .with_duration(20),
    ]
}
