#![deny(warnings)]

//! Core domain models and invariants for Studio Tycoon.
//!
//! This crate defines the serializable types shared by the simulation:
//! staff, projects and their stages, the studio aggregate, plus validation
//! helpers that guard the basic invariants of each.

pub mod catalog;
pub mod config;
pub mod directory;
pub mod generation;

pub use catalog::ProjectCatalog;
pub use config::{
    AutomationMode, AutomationSettings, BalanceConfig, ConfigError, PriorityMode,
    WorkloadDistribution,
};
pub use directory::StaffDirectory;
pub use generation::CandidateGenerator;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Upper bound for every bounded staff attribute (stats, energy, mood, burnout).
pub const ATTRIBUTE_MAX: f32 = 100.0;

/// Unique identifier for a staff member, e.g. "staff-0007".
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct StaffId(pub String);

impl fmt::Display for StaffId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Unique identifier for a project, e.g. "project-0003".
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct ProjectId(pub String);

impl fmt::Display for ProjectId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Studio job roles. A project holds at most one staff member per role.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum StaffRole {
    Engineer,
    Producer,
    Songwriter,
    MixEngineer,
    MasteringEngineer,
    SoundDesigner,
}

impl StaffRole {
    /// All roles in declaration order.
    pub const ALL: [StaffRole; 6] = [
        StaffRole::Engineer,
        StaffRole::Producer,
        StaffRole::Songwriter,
        StaffRole::MixEngineer,
        StaffRole::MasteringEngineer,
        StaffRole::SoundDesigner,
    ];
}

impl fmt::Display for StaffRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            StaffRole::Engineer => "Engineer",
            StaffRole::Producer => "Producer",
            StaffRole::Songwriter => "Songwriter",
            StaffRole::MixEngineer => "Mix Engineer",
            StaffRole::MasteringEngineer => "Mastering Engineer",
            StaffRole::SoundDesigner => "Sound Designer",
        };
        f.write_str(name)
    }
}

/// Runtime status of a hired staff member.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum StaffStatus {
    Idle,
    Working,
    Resting,
    Training,
}

/// Primary stats, each within [0, 100].
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct StaffStats {
    pub creativity: f32,
    pub technical: f32,
    pub speed: f32,
}

/// Production boost when working a project of the matching genre.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GenreAffinity {
    /// Genre name, compared case-insensitively.
    pub genre: String,
    /// Bonus in percent, e.g. 20.0 for +20%.
    pub bonus: f32,
}

/// Stat targeted by a training course.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum TrainingFocus {
    Creativity,
    Technical,
    Speed,
}

/// A training course in progress.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Training {
    pub focus: TrainingFocus,
    pub days_remaining: u32,
}

/// A hireable or hired staff member.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct StaffMember {
    pub id: StaffId,
    pub name: String,
    pub role: StaffRole,
    pub stats: StaffStats,
    /// Energy in [0, 100]; drained by work, restored by rest.
    pub energy: f32,
    /// Mood in [0, 100].
    pub mood: f32,
    /// Burnout in [0, 100].
    pub burnout: f32,
    pub status: StaffStatus,
    /// Non-owning reference to the active project this member works on.
    pub assigned_project_id: Option<ProjectId>,
    /// Share of the working day spent on the assigned project, in [0, 1].
    pub allocation: f32,
    /// Level in the current role (>= 1).
    pub level_in_role: u32,
    /// XP towards the next level; keeps the remainder after a level-up.
    pub xp_in_role: u32,
    pub genre_affinity: Option<GenreAffinity>,
    /// Daily salary.
    pub salary: Decimal,
    pub training: Option<Training>,
}

impl StaffMember {
    /// A fresh, rested, unassigned staff member at level 1.
    pub fn new(id: StaffId, name: impl Into<String>, role: StaffRole, stats: StaffStats) -> Self {
        Self {
            id,
            name: name.into(),
            role,
            stats,
            energy: ATTRIBUTE_MAX,
            mood: 60.0,
            burnout: 0.0,
            status: StaffStatus::Idle,
            assigned_project_id: None,
            allocation: 0.0,
            level_in_role: 1,
            xp_in_role: 0,
            genre_affinity: None,
            salary: Decimal::new(100, 0),
            training: None,
        }
    }

    /// Whether the member may be picked for project work (idle or already working).
    pub fn is_available(&self) -> bool {
        matches!(self.status, StaffStatus::Idle | StaffStatus::Working)
    }

    /// Affinity bonus percent when the member works a project of `genre`.
    pub fn affinity_bonus(&self, genre: &str) -> Option<f32> {
        self.genre_affinity
            .as_ref()
            .filter(|a| a.genre.eq_ignore_ascii_case(genre))
            .map(|a| a.bonus)
    }

    pub fn stat(&self, focus: TrainingFocus) -> f32 {
        match focus {
            TrainingFocus::Creativity => self.stats.creativity,
            TrainingFocus::Technical => self.stats.technical,
            TrainingFocus::Speed => self.stats.speed,
        }
    }

    pub fn stat_mut(&mut self, focus: TrainingFocus) -> &mut f32 {
        match focus {
            TrainingFocus::Creativity => &mut self.stats.creativity,
            TrainingFocus::Technical => &mut self.stats.technical,
            TrainingFocus::Speed => &mut self.stats.speed,
        }
    }

    /// Bind to a project as `Working`.
    pub fn bind(&mut self, project: ProjectId, allocation: f32) {
        self.assigned_project_id = Some(project);
        self.allocation = allocation.clamp(0.0, 1.0);
        self.status = StaffStatus::Working;
    }

    /// Drop any project binding and return to `Idle`.
    pub fn release(&mut self) {
        self.assigned_project_id = None;
        self.allocation = 0.0;
        if self.status == StaffStatus::Working {
            self.status = StaffStatus::Idle;
        }
    }
}

/// One ordered unit of work inside a project.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Stage {
    pub stage_name: String,
    pub work_units_base: f32,
    pub work_units_completed: f32,
    pub completed: bool,
    /// Contribution-weighted craft accumulated while the stage was current.
    #[serde(default)]
    pub quality_points: f32,
    /// Days this stage spent as the current stage of an active project.
    #[serde(default)]
    pub days_active: u32,
}

impl Stage {
    pub fn new(stage_name: impl Into<String>, work_units_base: f32) -> Self {
        Self {
            stage_name: stage_name.into(),
            work_units_base,
            work_units_completed: 0.0,
            completed: false,
            quality_points: 0.0,
            days_active: 0,
        }
    }

    /// Fraction of the stage done, in [0, 1].
    pub fn progress(&self) -> f32 {
        if self.work_units_base <= 0.0 {
            return 1.0;
        }
        (self.work_units_completed / self.work_units_base).clamp(0.0, 1.0)
    }

    pub fn remaining(&self) -> f32 {
        (self.work_units_base - self.work_units_completed).max(0.0)
    }
}

/// Optional stat thresholds a project declares.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct StatRequirements {
    pub creativity: Option<f32>,
    pub technical: Option<f32>,
}

/// A recording project offered to or run by the studio.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Project {
    pub id: ProjectId,
    pub title: String,
    pub genre: String,
    pub client_type: String,
    /// Entity the relationship systems attribute this job to.
    #[serde(default)]
    pub client_id: Option<String>,
    /// Difficulty (>= 1).
    pub difficulty: u32,
    /// Nominal duration; advisory, feeds deadline urgency only.
    pub duration_days_total: u32,
    /// Days spent in the active pool so far.
    #[serde(default)]
    pub days_elapsed: u32,
    /// Payout at a final score of 100.
    pub payout_base: Decimal,
    /// Reputation at a final score of 100.
    pub rep_gain_base: u32,
    #[serde(default)]
    pub requirements: StatRequirements,
    pub stages: Vec<Stage>,
    /// Index of the current stage; equals `stages.len()` once complete.
    pub current_stage_index: usize,
    pub quality_score: f32,
    pub efficiency_score: f32,
    /// Automation multiplier that creeps towards 1.0 while work gets done.
    pub efficiency_modifier: f32,
}

impl Project {
    pub fn current_stage(&self) -> Option<&Stage> {
        self.stages.get(self.current_stage_index)
    }

    pub fn current_stage_mut(&mut self) -> Option<&mut Stage> {
        self.stages.get_mut(self.current_stage_index)
    }

    /// True once the stage index has moved past the last stage.
    pub fn is_complete(&self) -> bool {
        self.current_stage_index >= self.stages.len()
    }

    pub fn completed_stage_count(&self) -> usize {
        self.stages.iter().filter(|s| s.completed).count()
    }

    /// Completed stages over total stages.
    pub fn completion_fraction(&self) -> f32 {
        if self.stages.is_empty() {
            return 0.0;
        }
        self.completed_stage_count() as f32 / self.stages.len() as f32
    }

    pub fn total_work_units(&self) -> f32 {
        self.stages.iter().map(|s| s.work_units_base).sum()
    }

    /// Work units still required across the current and later stages.
    pub fn remaining_work_units(&self) -> f32 {
        self.stages
            .iter()
            .skip(self.current_stage_index)
            .map(Stage::remaining)
            .sum()
    }

    /// Overall progress in percent: completed stages plus the current stage's fraction.
    pub fn progress_percent(&self) -> f32 {
        if self.stages.is_empty() {
            return 0.0;
        }
        let partial = self.current_stage().map(Stage::progress).unwrap_or(0.0);
        let done = self.completed_stage_count() as f32 + partial;
        (done / self.stages.len() as f32 * 100.0).min(100.0)
    }
}

/// Binding of one staff member to one active project.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Assignment {
    pub staff_id: StaffId,
    pub project_id: ProjectId,
    /// Fraction of the member's time, in [0, 1].
    pub allocation: f32,
    /// 1-based rank of the project when the optimizer made the assignment;
    /// 0 for manual bindings and bindings read back from the roster.
    pub priority: u32,
}

/// XP granted to one staff member by a resolution.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct StaffXp {
    pub staff_id: StaffId,
    pub xp: u32,
    pub level_after: u32,
}

/// Outcome of a completed project, handed to downstream collaborators.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ProjectReport {
    pub project_id: ProjectId,
    pub title: String,
    pub genre: String,
    pub client_type: String,
    pub client_id: Option<String>,
    pub quality_score: f32,
    pub efficiency_score: f32,
    pub final_score: u32,
    pub payout: Decimal,
    pub reputation_gained: i64,
    pub influence_gained: i64,
    pub staff_xp: Vec<StaffXp>,
    pub days_taken: u32,
    /// Finished within the nominal duration.
    pub on_time: bool,
    pub completed_on: NaiveDate,
}

/// Studio-level counters and history.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct StudioAggregate {
    pub money: Decimal,
    pub reputation: i64,
    pub influence: i64,
    pub player_level: u32,
    /// Names of owned equipment items.
    pub equipment: Vec<String>,
    pub date: NaiveDate,
    /// Days simulated so far.
    pub day: u32,
    /// Append-only history of finished projects.
    pub completed_projects: Vec<Project>,
    /// Append-only financial history.
    pub reports: Vec<ProjectReport>,
}

impl StudioAggregate {
    pub fn new(money: Decimal, player_level: u32, date: NaiveDate) -> Self {
        Self {
            money,
            reputation: 0,
            influence: 0,
            player_level,
            equipment: Vec::new(),
            date,
            day: 0,
            completed_projects: Vec::new(),
            reports: Vec::new(),
        }
    }
}

/// Full serializable studio state: aggregate, roster, catalog and automation.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct StudioState {
    pub aggregate: StudioAggregate,
    pub staff: StaffDirectory,
    pub projects: ProjectCatalog,
    pub mode: AutomationMode,
    pub settings: AutomationSettings,
}

impl StudioState {
    pub fn new(aggregate: StudioAggregate) -> Self {
        Self {
            aggregate,
            staff: StaffDirectory::default(),
            projects: ProjectCatalog::default(),
            mode: AutomationMode::default(),
            settings: AutomationSettings::default(),
        }
    }
}

/// Validation errors for domain invariants.
#[derive(Debug, Error, PartialEq)]
pub enum ValidationError {
    /// A bounded attribute fell outside [0, 100] or is not finite.
    #[error("{field} = {value} is outside [0, 100]")]
    AttributeOutOfRange { field: &'static str, value: f32 },
    /// Names and titles must not be blank.
    #[error("name must not be empty")]
    EmptyName,
    /// Level in role starts at 1.
    #[error("level in role must be >= 1")]
    ZeroLevel,
    /// Difficulty starts at 1.
    #[error("difficulty must be >= 1")]
    ZeroDifficulty,
    /// Projects need at least one stage.
    #[error("project has no stages")]
    NoStages,
    /// Stage work requirement must be strictly positive.
    #[error("stage {0} must require > 0 work units")]
    NonPositiveWork(String),
    /// Price or cost must be non-negative.
    #[error("negative monetary value is invalid")]
    NegativeMoney,
    /// Status and assignment disagree.
    #[error("staff {0} status does not match its assignment")]
    InconsistentAssignment(StaffId),
    /// Stage index or completion flags are out of order.
    #[error("project {0} stage progress is inconsistent")]
    InconsistentStages(ProjectId),
}

fn check_attribute(field: &'static str, value: f32) -> Result<(), ValidationError> {
    if !value.is_finite() || !(0.0..=ATTRIBUTE_MAX).contains(&value) {
        return Err(ValidationError::AttributeOutOfRange { field, value });
    }
    Ok(())
}

/// Validate a staff member's bounded attributes and status/assignment pairing.
pub fn validate_staff(s: &StaffMember) -> Result<(), ValidationError> {
    if s.name.trim().is_empty() {
        return Err(ValidationError::EmptyName);
    }
    check_attribute("creativity", s.stats.creativity)?;
    check_attribute("technical", s.stats.technical)?;
    check_attribute("speed", s.stats.speed)?;
    check_attribute("energy", s.energy)?;
    check_attribute("mood", s.mood)?;
    check_attribute("burnout", s.burnout)?;
    if s.level_in_role == 0 {
        return Err(ValidationError::ZeroLevel);
    }
    if s.salary < Decimal::ZERO {
        return Err(ValidationError::NegativeMoney);
    }
    let working = s.status == StaffStatus::Working;
    if working != s.assigned_project_id.is_some() {
        return Err(ValidationError::InconsistentAssignment(s.id.clone()));
    }
    Ok(())
}

/// Validate a project's economics and stage layout.
pub fn validate_project(p: &Project) -> Result<(), ValidationError> {
    if p.title.trim().is_empty() {
        return Err(ValidationError::EmptyName);
    }
    if p.difficulty == 0 {
        return Err(ValidationError::ZeroDifficulty);
    }
    if p.payout_base < Decimal::ZERO {
        return Err(ValidationError::NegativeMoney);
    }
    if p.stages.is_empty() {
        return Err(ValidationError::NoStages);
    }
    for s in &p.stages {
        if !(s.work_units_base.is_finite() && s.work_units_base > 0.0) {
            return Err(ValidationError::NonPositiveWork(s.stage_name.clone()));
        }
        if s.work_units_completed < 0.0 || s.work_units_completed > s.work_units_base {
            return Err(ValidationError::InconsistentStages(p.id.clone()));
        }
    }
    // Every stage before the cursor is done, none after it is.
    for (i, s) in p.stages.iter().enumerate() {
        if s.completed != (i < p.current_stage_index) {
            return Err(ValidationError::InconsistentStages(p.id.clone()));
        }
    }
    Ok(())
}

#[cfg(test)]
pub(crate) mod fixtures {
    use super::*;

    pub fn staff(id: &str, role: StaffRole) -> StaffMember {
        StaffMember::new(
            StaffId(id.to_string()),
            format!("Staff {id}"),
            role,
            StaffStats {
                creativity: 50.0,
                technical: 50.0,
                speed: 50.0,
            },
        )
    }

    pub fn project(id: &str, stages: &[f32]) -> Project {
        Project {
            id: ProjectId(id.to_string()),
            title: format!("Project {id}"),
            genre: "Rock".to_string(),
            client_type: "Independent Artist".to_string(),
            client_id: None,
            difficulty: 1,
            duration_days_total: 10,
            days_elapsed: 0,
            payout_base: Decimal::new(1000, 0),
            rep_gain_base: 50,
            requirements: StatRequirements::default(),
            stages: stages
                .iter()
                .enumerate()
                .map(|(i, w)| Stage::new(format!("Stage {i}"), *w))
                .collect(),
            current_stage_index: 0,
            quality_score: 0.0,
            efficiency_score: 0.0,
            efficiency_modifier: 0.5,
        }
    }
}
