#![deny(warnings)]

//! Studio runtime: the composition root that owns all studio state and drives
//! the daily tick.
//!
//! A day runs as one synchronous pass: optional re-optimization in full-auto
//! mode, work on every active project, resolution of any project that finished
//! its last stage, then staff wellbeing and the calendar. In automated modes
//! drained staff are sent to rest before any work happens. Player actions are
//! methods on [`Studio`] that either succeed completely or return a
//! [`StudioError`] without touching state.

mod resolver;
mod view;
mod wellbeing;
mod work;

pub use resolver::ProjectResolver;
pub use view::{estimated_days_remaining, project_views, staff_views, ProjectView, StaffView};
pub use wellbeing::{daily_update, WellbeingEvent};
pub use work::{StageCompletion, TickOutcome, WorkSimulator};

use chrono::NaiveDate;
use rust_decimal::Decimal;
use studio_ai::{optimize, rank_projects, OptimizationPlan, ProjectPriority};
use studio_core::generation::GeneratorCursor;
use studio_core::{
    validate_project, validate_staff, AutomationMode, AutomationSettings, BalanceConfig,
    CandidateGenerator, Project, ProjectId, ProjectReport, StaffId, StaffMember, StaffRole,
    StaffStatus, StudioAggregate, StudioState, Training, TrainingFocus, ValidationError,
};
use studio_econ::{compute_capacity, hiring_cost, ProjectCapacity, StudioFootprint};
use thiserror::Error;
use tracing::{debug, info, warn};

/// Rejected player actions. State is unchanged whenever one is returned.
#[derive(Debug, Error, PartialEq)]
pub enum StudioError {
    #[error("studio at capacity: {active} of {max} project slots in use")]
    CapacityExceeded { active: usize, max: usize },
    #[error("insufficient funds: need {needed}, have {available}")]
    InsufficientFunds { needed: Decimal, available: Decimal },
    #[error("project {project} already has a {role}")]
    RoleSlotFilled { project: ProjectId, role: StaffRole },
    #[error("unknown staff member {0}")]
    UnknownStaff(StaffId),
    #[error("unknown project {0}")]
    UnknownProject(ProjectId),
    #[error("project {0} is already active")]
    AlreadyActive(ProjectId),
    #[error("staff member {staff} is unavailable: {reason}")]
    StaffUnavailable { staff: StaffId, reason: &'static str },
    #[error("staff member {staff} is already assigned to {project}")]
    StaffAlreadyAssigned { staff: StaffId, project: ProjectId },
    #[error("training unlocks at player level {required}")]
    TrainingLocked { required: u32 },
    #[error("invalid automation settings: {0}")]
    InvalidSettings(String),
    #[error(transparent)]
    Invalid(#[from] ValidationError),
}

/// Receives every project report as soon as it is committed. Relationship and
/// market systems hook in here.
pub trait ReportSink {
    fn on_project_resolved(&mut self, report: &ProjectReport);
}

/// Everything that happened during one simulated day.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct DayReport {
    /// Day number after the advance.
    pub day: u32,
    pub stages_completed: Vec<StageCompletion>,
    pub resolved: Vec<ProjectReport>,
    pub wellbeing: Vec<WellbeingEvent>,
    pub skipped_assignments: usize,
}

pub struct Studio {
    state: StudioState,
    config: BalanceConfig,
    seed: u64,
    generator: CandidateGenerator,
    sinks: Vec<Box<dyn ReportSink>>,
}

impl Studio {
    pub fn new(
        config: BalanceConfig,
        seed: u64,
        money: Decimal,
        player_level: u32,
        date: NaiveDate,
    ) -> Self {
        let state = StudioState::new(StudioAggregate::new(money, player_level, date));
        Self::from_state(state, config, seed, GeneratorCursor::default())
    }

    /// Resume from a previously saved state. `cursor` keeps generated ids
    /// from colliding with those already in the state.
    pub fn from_state(
        state: StudioState,
        config: BalanceConfig,
        seed: u64,
        cursor: GeneratorCursor,
    ) -> Self {
        Self {
            state,
            config,
            seed,
            generator: CandidateGenerator::with_cursor(seed, cursor),
            sinks: Vec::new(),
        }
    }

    pub fn state(&self) -> &StudioState {
        &self.state
    }

    pub fn config(&self) -> &BalanceConfig {
        &self.config
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    pub fn generator_cursor(&self) -> GeneratorCursor {
        self.generator.cursor()
    }

    pub fn into_state(self) -> StudioState {
        self.state
    }

    pub fn register_sink(&mut self, sink: Box<dyn ReportSink>) {
        self.sinks.push(sink);
    }

    pub fn capacity(&self) -> ProjectCapacity {
        compute_capacity(&StudioFootprint::of(&self.state))
    }

    pub fn can_admit(&self) -> bool {
        self.capacity().can_admit()
    }

    /// Put an externally supplied project on the offer board.
    pub fn offer_project(&mut self, project: Project) -> Result<(), StudioError> {
        validate_project(&project)?;
        self.state.projects.offer(project);
        Ok(())
    }

    /// Generate `n` offers scaled to the player level.
    pub fn generate_offers(&mut self, n: usize) -> Vec<ProjectId> {
        let offers = self.generator.project_offers(
            n,
            self.state.aggregate.player_level,
            self.config.initial_project_efficiency,
        );
        offers
            .into_iter()
            .map(|p| {
                let id = p.id.clone();
                self.state.projects.offer(p);
                id
            })
            .collect()
    }

    /// Put an externally supplied candidate in the hiring pool.
    pub fn add_candidate(&mut self, candidate: StaffMember) -> Result<(), StudioError> {
        validate_staff(&candidate)?;
        self.state.staff.add_candidate(candidate);
        Ok(())
    }

    /// Replace the hiring pool with freshly generated candidates, for a fee.
    pub fn refresh_candidates(&mut self) -> Result<(), StudioError> {
        self.charge(self.config.candidate_refresh_cost)?;
        let fresh = self
            .generator
            .staff_candidates(self.config.candidate_refresh_count);
        info!(count = fresh.len(), "candidate pool refreshed");
        self.state.staff.set_candidates(fresh);
        Ok(())
    }

    /// Hire a candidate from the pool. Returns the fee paid.
    pub fn hire(&mut self, id: &StaffId) -> Result<Decimal, StudioError> {
        let salary = self
            .state
            .staff
            .candidate(id)
            .map(|c| c.salary)
            .ok_or_else(|| StudioError::UnknownStaff(id.clone()))?;
        let fee = hiring_cost(salary, &self.config);
        self.charge(fee)?;
        if let Some(member) = self.state.staff.take_candidate(id) {
            info!(staff = %member.id, role = %member.role, fee = %fee, "staff hired");
            self.state.staff.insert_hired(member);
            self.lineup_changed();
        }
        Ok(fee)
    }

    /// Let a member go. Rejected when the smaller roster could no longer
    /// carry the active lineup.
    pub fn fire(&mut self, id: &StaffId) -> Result<StaffMember, StudioError> {
        if self.state.staff.get(id).is_none() {
            return Err(StudioError::UnknownStaff(id.clone()));
        }
        let mut footprint = StudioFootprint::of(&self.state);
        footprint.hired_staff -= 1;
        let after = compute_capacity(&footprint);
        if after.current_projects > after.max_projects {
            return Err(StudioError::CapacityExceeded {
                active: after.current_projects,
                max: after.max_projects,
            });
        }
        let member = self
            .state
            .staff
            .remove_hired(id)
            .ok_or_else(|| StudioError::UnknownStaff(id.clone()))?;
        info!(staff = %member.id, "staff let go");
        self.lineup_changed();
        Ok(member)
    }

    /// Deduct one day of salaries for the whole roster.
    pub fn run_payroll(&mut self) -> Result<Decimal, StudioError> {
        let total: Decimal = self.state.staff.hired().iter().map(|s| s.salary).sum();
        self.charge(total)?;
        debug!(total = %total, "payroll paid");
        Ok(total)
    }

    pub fn buy_equipment(&mut self, name: &str, price: Decimal) -> Result<(), StudioError> {
        if name.trim().is_empty() {
            return Err(ValidationError::EmptyName.into());
        }
        if price.is_sign_negative() {
            return Err(ValidationError::NegativeMoney.into());
        }
        self.charge(price)?;
        self.state.aggregate.equipment.push(name.to_string());
        info!(item = name, price = %price, "equipment bought");
        Ok(())
    }

    /// Move an offer into the active lineup.
    pub fn start_project(&mut self, id: &ProjectId) -> Result<(), StudioError> {
        if self.state.projects.get_available(id).is_none() {
            warn!(project = %id, "start requested for unknown offer");
            return Err(StudioError::UnknownProject(id.clone()));
        }
        self.ensure_capacity()?;
        if let Some(project) = self.state.projects.take_available(id) {
            self.admit(project);
        }
        Ok(())
    }

    /// Admit a project directly, bypassing the offer board.
    pub fn add_project(&mut self, project: Project) -> Result<(), StudioError> {
        validate_project(&project)?;
        if self.state.projects.is_active(&project.id) {
            return Err(StudioError::AlreadyActive(project.id));
        }
        self.ensure_capacity()?;
        self.admit(project);
        Ok(())
    }

    /// Drop an active project. Its staff are released in the same step.
    pub fn cancel_project(&mut self, id: &ProjectId) -> Result<Project, StudioError> {
        let project = self.state.projects.take_active(id).ok_or_else(|| {
            warn!(project = %id, "cancel requested for inactive project");
            StudioError::UnknownProject(id.clone())
        })?;
        let released = self.state.staff.release_project(id);
        info!(project = %id, released = released.len(), "project cancelled");
        self.lineup_changed();
        Ok(project)
    }

    fn ensure_capacity(&self) -> Result<(), StudioError> {
        let capacity = self.capacity();
        if capacity.can_admit() {
            Ok(())
        } else {
            Err(StudioError::CapacityExceeded {
                active: capacity.current_projects,
                max: capacity.max_projects,
            })
        }
    }

    fn admit(&mut self, project: Project) {
        info!(project = %project.id, title = %project.title, "project started");
        self.state.projects.activate(project);
        self.lineup_changed();
    }

    fn lineup_changed(&mut self) {
        if self.state.mode.is_automated() {
            self.optimize_assignments();
        }
    }

    pub fn assign_staff(&mut self, staff: &StaffId, project: &ProjectId) -> Result<(), StudioError> {
        let Some(member) = self.state.staff.get(staff) else {
            warn!(staff = %staff, "assignment for unknown staff");
            return Err(StudioError::UnknownStaff(staff.clone()));
        };
        if !self.state.projects.is_active(project) {
            warn!(project = %project, "assignment to inactive project");
            return Err(StudioError::UnknownProject(project.clone()));
        }
        if let Some(current) = &member.assigned_project_id {
            return Err(StudioError::StaffAlreadyAssigned {
                staff: staff.clone(),
                project: current.clone(),
            });
        }
        if member.status != StaffStatus::Idle {
            return Err(StudioError::StaffUnavailable {
                staff: staff.clone(),
                reason: "not idle",
            });
        }
        if member.energy < self.config.min_energy_to_work {
            return Err(StudioError::StaffUnavailable {
                staff: staff.clone(),
                reason: "too tired",
            });
        }
        let role = member.role;
        if self.state.staff.has_role_on(project, role) {
            return Err(StudioError::RoleSlotFilled {
                project: project.clone(),
                role,
            });
        }
        if let Some(member) = self.state.staff.get_mut(staff) {
            member.bind(project.clone(), 1.0);
        }
        debug!(staff = %staff, project = %project, "staff assigned");
        Ok(())
    }

    pub fn unassign_staff(&mut self, staff: &StaffId) -> Result<(), StudioError> {
        let member = self
            .state
            .staff
            .get_mut(staff)
            .ok_or_else(|| StudioError::UnknownStaff(staff.clone()))?;
        member.release();
        Ok(())
    }

    /// Send a member to rest, or call a resting member back. Returns the new
    /// status.
    pub fn toggle_rest(&mut self, staff: &StaffId) -> Result<StaffStatus, StudioError> {
        let member = self
            .state
            .staff
            .get_mut(staff)
            .ok_or_else(|| StudioError::UnknownStaff(staff.clone()))?;
        match member.status {
            StaffStatus::Training => {
                return Err(StudioError::StaffUnavailable {
                    staff: staff.clone(),
                    reason: "in training",
                })
            }
            StaffStatus::Resting => member.status = StaffStatus::Idle,
            StaffStatus::Idle | StaffStatus::Working => {
                member.release();
                member.status = StaffStatus::Resting;
            }
        }
        Ok(member.status)
    }

    pub fn start_training(
        &mut self,
        staff: &StaffId,
        focus: TrainingFocus,
    ) -> Result<(), StudioError> {
        let required = self.config.training_min_player_level;
        if self.state.aggregate.player_level < required {
            return Err(StudioError::TrainingLocked { required });
        }
        let member = self
            .state
            .staff
            .get(staff)
            .ok_or_else(|| StudioError::UnknownStaff(staff.clone()))?;
        if member.status != StaffStatus::Idle {
            return Err(StudioError::StaffUnavailable {
                staff: staff.clone(),
                reason: "not idle",
            });
        }
        if member.energy < self.config.min_energy_to_work {
            return Err(StudioError::StaffUnavailable {
                staff: staff.clone(),
                reason: "too tired",
            });
        }
        self.charge(self.config.training_cost)?;
        let days = self.config.training_days.max(1);
        if let Some(member) = self.state.staff.get_mut(staff) {
            member.status = StaffStatus::Training;
            member.training = Some(Training {
                focus,
                days_remaining: days,
            });
        }
        info!(staff = %staff, ?focus, days, "training started");
        Ok(())
    }

    pub fn set_mode(&mut self, mode: AutomationMode) {
        info!(?mode, "automation mode changed");
        self.state.mode = mode;
    }

    pub fn update_settings(&mut self, settings: AutomationSettings) -> Result<(), StudioError> {
        settings
            .validate()
            .map_err(|e| StudioError::InvalidSettings(e.to_string()))?;
        self.state.settings = settings;
        Ok(())
    }

    /// Active projects ranked under the current priority mode.
    pub fn priorities(&self) -> Vec<ProjectPriority> {
        rank_projects(
            self.state.projects.active(),
            self.state.settings.priority_mode,
            &self.config,
        )
    }

    /// Rebuild every binding of idle and working staff from scratch.
    pub fn optimize_assignments(&mut self) -> OptimizationPlan {
        let plan = optimize(
            self.state.projects.active(),
            self.state.staff.hired(),
            &self.state.settings,
            &self.config,
        );
        self.state.staff.release_available();
        for a in &plan.assignments {
            match self.state.staff.get_mut(&a.staff_id) {
                Some(member) => member.bind(a.project_id.clone(), a.allocation),
                None => warn!(staff = %a.staff_id, "planned staff vanished"),
            }
        }
        plan
    }

    /// Simulate one day.
    pub fn advance_day(&mut self) -> DayReport {
        let mode = self.state.mode;
        if mode == AutomationMode::FullAuto {
            self.optimize_assignments();
        }
        if mode.is_automated() {
            let rested = self.rest_exhausted();
            if rested > 0 && mode == AutomationMode::SemiAuto {
                self.optimize_assignments();
            }
        }

        let assignments = self.state.staff.assignments();
        let outcome = WorkSimulator::new(&self.config).tick(
            self.state.projects.active_mut(),
            &mut self.state.staff,
            &assignments,
        );

        let mut resolved = Vec::new();
        for id in &outcome.projects_completed {
            let Some(project) = self.state.projects.take_active(id) else {
                warn!(project = %id, "completed project already left the lineup");
                continue;
            };
            let report = ProjectResolver::new(&self.config).resolve(project, &mut self.state);
            for sink in self.sinks.iter_mut() {
                sink.on_project_resolved(&report);
            }
            resolved.push(report);
        }

        let mut wellbeing = Vec::new();
        for member in self.state.staff.hired_mut() {
            wellbeing.extend(daily_update(member, &self.config));
        }
        let returned = !outcome.recovered.is_empty()
            || wellbeing
                .iter()
                .any(|e| matches!(e, WellbeingEvent::TrainingFinished { .. }));

        let agg = &mut self.state.aggregate;
        agg.day += 1;
        agg.date = agg.date.succ_opt().unwrap_or(agg.date);
        debug!(day = agg.day, date = %agg.date, "day advanced");

        if !resolved.is_empty() || returned {
            self.lineup_changed();
        }

        DayReport {
            day: self.state.aggregate.day,
            stages_completed: outcome.stages_completed,
            resolved,
            wellbeing,
            skipped_assignments: outcome.skipped_assignments,
        }
    }

    pub fn project_views(&self) -> Vec<ProjectView> {
        project_views(&self.state, &self.config)
    }

    pub fn staff_views(&self) -> Vec<StaffView> {
        staff_views(&self.state)
    }

    /// Send staff too drained to contribute to rest: working members at zero
    /// energy, and idle members below the minimum energy to work. Returns how
    /// many were sent.
    fn rest_exhausted(&mut self) -> usize {
        let floor = self.config.min_energy_to_work;
        let mut rested = 0;
        for member in self.state.staff.hired_mut() {
            let exhausted = match member.status {
                StaffStatus::Working => member.energy <= 0.0,
                StaffStatus::Idle => member.energy < floor,
                StaffStatus::Resting | StaffStatus::Training => false,
            };
            if exhausted {
                member.release();
                member.status = StaffStatus::Resting;
                debug!(staff = %member.id, energy = member.energy, "exhausted staff sent to rest");
                rested += 1;
            }
        }
        rested
    }

    fn charge(&mut self, amount: Decimal) -> Result<(), StudioError> {
        let available = self.state.aggregate.money;
        if available < amount {
            return Err(StudioError::InsufficientFunds {
                needed: amount,
                available,
            });
        }
        self.state.aggregate.money -= amount;
        Ok(())
    }
}


#[cfg(test)]
mod tests {
    use super::fixtures::{project, staff};
    use super::*;

    fn studio(money: i64, level: u32) -> Studio {
        let date = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        Studio::new(
            BalanceConfig::default(),
            7,
            Decimal::new(money, 0),
            level,
            date,
        )
    }

    fn hire_direct(studio: &mut Studio, member: StaffMember) {
        studio.state.staff.insert_hired(member);
    }

    #[test]
    fn hire_charges_three_days_of_salary() {
        let mut s = studio(1_000, 1);
        s.add_candidate(staff("c", StaffRole::Engineer)).unwrap();
        let fee = s.hire(&StaffId("c".into())).unwrap();
        assert_eq!(fee, Decimal::new(300, 0));
        assert_eq!(s.state().aggregate.money, Decimal::new(700, 0));
        assert_eq!(s.state().staff.headcount(), 1);
        assert!(s.state().staff.candidates().is_empty());
    }

    #[test]
    fn hire_rejected_when_broke() {
        let mut s = studio(100, 1);
        s.add_candidate(staff("c", StaffRole::Engineer)).unwrap();
        let err = s.hire(&StaffId("c".into())).unwrap_err();
        assert!(matches!(err, StudioError::InsufficientFunds { .. }));
        assert_eq!(s.state().aggregate.money, Decimal::new(100, 0));
        assert_eq!(s.state().staff.candidates().len(), 1);
        assert_eq!(s.state().staff.headcount(), 0);
    }

    #[test]
    fn refresh_candidates_costs_and_replaces_pool() {
        let mut s = studio(60, 1);
        s.add_candidate(staff("old", StaffRole::Engineer)).unwrap();
        s.refresh_candidates().unwrap();
        assert_eq!(s.state().aggregate.money, Decimal::new(10, 0));
        let pool = s.state().staff.candidates();
        assert_eq!(pool.len(), 3);
        assert!(pool.iter().all(|c| c.id.0 != "old"));
        assert!(s.refresh_candidates().is_err());
    }

    #[test]
    fn fire_releases_binding() {
        let mut s = studio(0, 1);
        s.add_project(project("p", &[10.0])).unwrap();
        hire_direct(&mut s, staff("a", StaffRole::Engineer));
        s.assign_staff(&StaffId("a".into()), &ProjectId("p".into()))
            .unwrap();
        let gone = s.fire(&StaffId("a".into())).unwrap();
        assert_eq!(gone.assigned_project_id, None);
        assert_eq!(s.state().staff.assigned_to(&ProjectId("p".into())).count(), 0);
        assert!(matches!(
            s.fire(&StaffId("a".into())),
            Err(StudioError::UnknownStaff(_))
        ));
    }

    #[test]
    fn firing_below_lineup_capacity_is_rejected() {
        let mut s = studio(0, 1);
        for (id, role) in [
            ("a", StaffRole::Producer),
            ("b", StaffRole::Engineer),
            ("c", StaffRole::Songwriter),
        ] {
            hire_direct(&mut s, staff(id, role));
        }
        for id in ["p", "q", "r"] {
            s.add_project(project(id, &[10.0])).unwrap();
        }
        assert_eq!(s.capacity().max_projects, 3);

        let a = StaffId("a".into());
        assert_eq!(
            s.fire(&a).unwrap_err(),
            StudioError::CapacityExceeded { active: 3, max: 2 }
        );
        assert_eq!(s.state().staff.headcount(), 3);
        assert!(s.state().staff.get(&a).is_some());

        s.cancel_project(&ProjectId("r".into())).unwrap();
        assert!(s.fire(&a).is_ok());
        assert!(s.state().projects.active_len() <= s.capacity().max_projects);
    }

    #[test]
    fn automated_modes_rest_drained_staff() {
        let mut s = studio(0, 1);
        s.add_project(project("p", &[500.0])).unwrap();
        let mut drained = staff("a", StaffRole::Engineer);
        drained.energy = 10.0;
        hire_direct(&mut s, drained);
        let a = StaffId("a".into());

        s.advance_day();
        assert_eq!(s.state().staff.get(&a).unwrap().status, StaffStatus::Idle);

        s.set_mode(AutomationMode::FullAuto);
        s.advance_day();
        let member = s.state().staff.get(&a).unwrap();
        assert_eq!(member.status, StaffStatus::Resting);
        assert_eq!(member.assigned_project_id, None);
        assert_eq!(member.energy, 30.0);
    }

    #[test]
    fn assignment_preconditions() {
        let mut s = studio(0, 1);
        s.add_project(project("p", &[10.0])).unwrap();
        s.add_project(project("q", &[10.0])).unwrap();
        hire_direct(&mut s, staff("a", StaffRole::Engineer));
        let mut tired = staff("t", StaffRole::Producer);
        tired.energy = 10.0;
        hire_direct(&mut s, tired);
        let a = StaffId("a".into());
        let p = ProjectId("p".into());

        assert_eq!(
            s.assign_staff(&StaffId("ghost".into()), &p),
            Err(StudioError::UnknownStaff(StaffId("ghost".into())))
        );
        assert_eq!(
            s.assign_staff(&a, &ProjectId("nope".into())),
            Err(StudioError::UnknownProject(ProjectId("nope".into())))
        );
        assert!(matches!(
            s.assign_staff(&StaffId("t".into()), &p),
            Err(StudioError::StaffUnavailable { .. })
        ));

        s.assign_staff(&a, &p).unwrap();
        assert_eq!(
            s.assign_staff(&a, &ProjectId("q".into())),
            Err(StudioError::StaffAlreadyAssigned {
                staff: a.clone(),
                project: p.clone()
            })
        );
        s.unassign_staff(&a).unwrap();
        assert_eq!(s.state().staff.get(&a).unwrap().status, StaffStatus::Idle);
    }

    #[test]
    fn rest_toggle_unbinds_and_returns() {
        let mut s = studio(0, 1);
        s.add_project(project("p", &[10.0])).unwrap();
        hire_direct(&mut s, staff("a", StaffRole::Engineer));
        let a = StaffId("a".into());
        s.assign_staff(&a, &ProjectId("p".into())).unwrap();
        assert_eq!(s.toggle_rest(&a), Ok(StaffStatus::Resting));
        assert_eq!(s.state().staff.get(&a).unwrap().assigned_project_id, None);
        assert!(matches!(
            s.assign_staff(&a, &ProjectId("p".into())),
            Err(StudioError::StaffUnavailable { .. })
        ));
        assert_eq!(s.toggle_rest(&a), Ok(StaffStatus::Idle));
    }

    #[test]
    fn training_requires_level_and_funds() {
        let a = StaffId("a".into());
        let mut low = studio(10_000, 2);
        hire_direct(&mut low, staff("a", StaffRole::Engineer));
        assert_eq!(
            low.start_training(&a, TrainingFocus::Speed),
            Err(StudioError::TrainingLocked { required: 3 })
        );

        let mut broke = studio(100, 3);
        hire_direct(&mut broke, staff("a", StaffRole::Engineer));
        assert!(matches!(
            broke.start_training(&a, TrainingFocus::Speed),
            Err(StudioError::InsufficientFunds { .. })
        ));
        assert_eq!(broke.state().staff.get(&a).unwrap().status, StaffStatus::Idle);

        let mut s = studio(1_000, 3);
        hire_direct(&mut s, staff("a", StaffRole::Engineer));
        s.start_training(&a, TrainingFocus::Speed).unwrap();
        assert_eq!(s.state().aggregate.money, Decimal::new(500, 0));
        for _ in 0..3 {
            s.advance_day();
        }
        let member = s.state().staff.get(&a).unwrap();
        assert_eq!(member.status, StaffStatus::Idle);
        assert_eq!(member.stats.speed, 55.0);
    }

    #[test]
    fn equipment_raises_capacity() {
        let mut s = studio(1_000, 1);
        assert_eq!(s.capacity().max_projects, 2);
        for i in 0..10 {
            s.buy_equipment(&format!("Mic {i}"), Decimal::new(10, 0))
                .unwrap();
        }
        assert_eq!(s.capacity().max_projects, 3);
        assert_eq!(s.state().aggregate.money, Decimal::new(900, 0));
        assert!(s.buy_equipment("Desk", Decimal::new(-1, 0)).is_err());
        assert!(s.buy_equipment("Desk", Decimal::new(5_000, 0)).is_err());
    }

    #[test]
    fn payroll_deducts_all_salaries() {
        let mut s = studio(250, 1);
        hire_direct(&mut s, staff("a", StaffRole::Engineer));
        hire_direct(&mut s, staff("b", StaffRole::Producer));
        assert_eq!(s.run_payroll(), Ok(Decimal::new(200, 0)));
        assert_eq!(s.state().aggregate.money, Decimal::new(50, 0));
        assert!(s.run_payroll().is_err());
        assert_eq!(s.state().aggregate.money, Decimal::new(50, 0));
    }

    #[test]
    fn generated_offers_can_be_started() {
        let mut s = studio(0, 4);
        let ids = s.generate_offers(3);
        assert_eq!(ids.len(), 3);
        assert_eq!(s.state().projects.available().len(), 3);
        s.start_project(&ids[0]).unwrap();
        assert!(s.state().projects.is_active(&ids[0]));
        assert_eq!(
            s.start_project(&ids[0]),
            Err(StudioError::UnknownProject(ids[0].clone()))
        );
    }

    #[test]
    fn settings_are_validated() {
        let mut s = studio(0, 1);
        let bad = AutomationSettings {
            min_staff_per_project: 4,
            max_staff_per_project: 2,
            ..AutomationSettings::default()
        };
        assert!(matches!(
            s.update_settings(bad),
            Err(StudioError::InvalidSettings(_))
        ));
    }

    #[test]
    fn calendar_advances_daily() {
        let mut s = studio(0, 1);
        let report = s.advance_day();
        assert_eq!(report.day, 1);
        assert_eq!(
            s.state().aggregate.date,
            NaiveDate::from_ymd_opt(2024, 1, 2).unwrap()
        );
    }
}
