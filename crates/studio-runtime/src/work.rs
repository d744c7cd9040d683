//! Per-tick stage progress for every active project.

use serde::{Deserialize, Serialize};
use studio_core::{
    Assignment, BalanceConfig, Project, ProjectId, StaffDirectory, StaffId, StaffMember,
    StaffStatus, ATTRIBUTE_MAX,
};
use tracing::{debug, info, warn};

/// A stage that finished during a tick.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct StageCompletion {
    pub project_id: ProjectId,
    pub stage_index: usize,
    pub stage_name: String,
    /// Contribution-weighted craft of the work put into the stage, [0, 100].
    pub quality: f32,
    /// Nominal days over actual days, [0, 100].
    pub efficiency: f32,
}

/// What a tick produced.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct TickOutcome {
    pub stages_completed: Vec<StageCompletion>,
    /// Projects whose last stage finished; they still sit in the active pool.
    pub projects_completed: Vec<ProjectId>,
    /// Assignments ignored because they were stale or inconsistent.
    pub skipped_assignments: usize,
    /// Resting staff who reached full energy and are idle again.
    pub recovered: Vec<StaffId>,
}

/// Advances stage progress from staff assignments.
pub struct WorkSimulator<'a> {
    cfg: &'a BalanceConfig,
}

impl<'a> WorkSimulator<'a> {
    pub fn new(cfg: &'a BalanceConfig) -> Self {
        Self { cfg }
    }

    /// Output multiplier from energy, mood, burnout and genre affinity.
    pub fn staff_efficiency(&self, s: &StaffMember, genre: &str) -> f32 {
        let mut eff = (s.energy / ATTRIBUTE_MAX) * (s.mood / ATTRIBUTE_MAX);
        if s.energy < self.cfg.low_energy_threshold {
            eff *= self.cfg.low_energy_penalty;
        }
        if s.burnout >= self.cfg.burnout_high {
            eff *= self.cfg.burnout_penalty;
        }
        if let Some(bonus) = s.affinity_bonus(genre) {
            eff *= 1.0 + bonus / 100.0;
        }
        eff.max(0.0)
    }

    /// Quality a member brings to each unit of work, [0, 100].
    pub fn craft(&self, s: &StaffMember, genre: &str) -> f32 {
        let base = (s.stats.creativity + s.stats.technical) / 2.0;
        let boost = 1.0 + s.affinity_bonus(genre).unwrap_or(0.0) / 100.0;
        (base * boost).clamp(0.0, ATTRIBUTE_MAX)
    }

    /// Run one tick. Invalid assignments are logged and skipped; the tick
    /// always covers every other project and staff member.
    pub fn tick(
        &self,
        projects: &mut [Project],
        staff: &mut StaffDirectory,
        assignments: &[Assignment],
    ) -> TickOutcome {
        let mut outcome = TickOutcome::default();
        // (work units, craft points) per project index
        let mut totals = vec![(0.0f32, 0.0f32); projects.len()];
        let mut contributors: Vec<StaffId> = Vec::new();

        for a in assignments {
            let Some(pi) = projects
                .iter()
                .position(|p| p.id == a.project_id && !p.is_complete())
            else {
                warn!(staff = %a.staff_id, project = %a.project_id, "assignment to inactive project skipped");
                outcome.skipped_assignments += 1;
                continue;
            };
            let Some(member) = staff.get(&a.staff_id) else {
                warn!(staff = %a.staff_id, "assignment for unknown staff skipped");
                outcome.skipped_assignments += 1;
                continue;
            };
            if member.status != StaffStatus::Working
                || member.assigned_project_id.as_ref() != Some(&a.project_id)
            {
                debug!(staff = %a.staff_id, status = ?member.status, "staff not working this project");
                outcome.skipped_assignments += 1;
                continue;
            }
            if contributors.contains(&a.staff_id) {
                warn!(staff = %a.staff_id, "duplicate assignment skipped");
                outcome.skipped_assignments += 1;
                continue;
            }

            let project = &projects[pi];
            let contribution = a.allocation.clamp(0.0, 1.0)
                * self.staff_efficiency(member, &project.genre)
                * project.efficiency_modifier;
            totals[pi].0 += contribution;
            totals[pi].1 += contribution * self.craft(member, &project.genre);
            contributors.push(a.staff_id.clone());
        }

        for (project, (work, points)) in projects.iter_mut().zip(totals) {
            if project.is_complete() {
                continue;
            }
            project.days_elapsed += 1;
            self.advance(project, work, points, &mut outcome);
        }

        for s in staff.hired_mut() {
            match s.status {
                StaffStatus::Working if contributors.contains(&s.id) => {
                    s.energy = (s.energy - self.cfg.energy_work_cost).max(0.0);
                }
                StaffStatus::Resting => {
                    s.energy = (s.energy + self.cfg.energy_rest_regen).min(ATTRIBUTE_MAX);
                    if s.energy >= ATTRIBUTE_MAX {
                        s.status = StaffStatus::Idle;
                        outcome.recovered.push(s.id.clone());
                    }
                }
                _ => {}
            }
        }

        outcome
    }

    fn advance(&self, project: &mut Project, work: f32, points: f32, outcome: &mut TickOutcome) {
        let stage_count = project.stages.len() as f32;
        let total_work = project.total_work_units();
        let duration = project.duration_days_total as f32;
        let index = project.current_stage_index;
        let project_id = project.id.clone();
        let Some(stage) = project.current_stage_mut() else {
            return;
        };

        stage.days_active += 1;
        if work > 0.0 {
            let remaining = stage.remaining();
            if work >= remaining {
                stage.work_units_completed = stage.work_units_base;
                stage.quality_points += points * (remaining / work);
            } else {
                stage.work_units_completed += work;
                stage.quality_points += points;
            }
        }

        let finished = if stage.work_units_completed >= stage.work_units_base {
            stage.completed = true;
            let quality = if stage.work_units_completed > 0.0 {
                (stage.quality_points / stage.work_units_completed).clamp(0.0, ATTRIBUTE_MAX)
            } else {
                0.0
            };
            let nominal_days = if total_work > 0.0 {
                duration * stage.work_units_base / total_work
            } else {
                0.0
            };
            let efficiency =
                (ATTRIBUTE_MAX * nominal_days / stage.days_active.max(1) as f32).min(ATTRIBUTE_MAX);
            Some(StageCompletion {
                project_id,
                stage_index: index,
                stage_name: stage.stage_name.clone(),
                quality,
                efficiency,
            })
        } else {
            None
        };

        if work > 0.0 {
            project.efficiency_modifier =
                (project.efficiency_modifier + self.cfg.efficiency_growth).min(1.0);
        }

        if let Some(done) = finished {
            project.quality_score += done.quality / stage_count;
            project.efficiency_score += done.efficiency / stage_count;
            project.current_stage_index += 1;
            debug!(project = %project.id, stage = %done.stage_name, "stage completed");
            if project.is_complete() {
                info!(project = %project.id, "project finished all stages");
                outcome.projects_completed.push(project.id.clone());
            }
            outcome.stages_completed.push(done);
        }
    }
}
