//! Read-only projections for rendering layers.

use serde::{Deserialize, Serialize};
use studio_ai::rank_projects;
use studio_core::{
    BalanceConfig, Project, ProjectId, StaffId, StaffMember, StaffStatus, StudioState,
    ATTRIBUTE_MAX,
};

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ProjectView {
    pub project_id: ProjectId,
    pub title: String,
    pub progress_percent: f32,
    pub current_stage: Option<String>,
    pub assigned_staff_ids: Vec<StaffId>,
    /// 1-based rank under the current priority mode.
    pub priority_rank: u32,
    pub is_automated: bool,
    pub estimated_days_remaining: Option<u32>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct StaffView {
    pub staff_id: StaffId,
    pub name: String,
    pub status: StaffStatus,
    pub energy: f32,
    pub mood: f32,
    pub assigned_project_id: Option<ProjectId>,
}

/// Days left at the current pace of `assigned`, rounded up. `None` when
/// nobody is producing.
pub fn estimated_days_remaining(project: &Project, assigned: &[&StaffMember]) -> Option<u32> {
    let pace: f32 = assigned
        .iter()
        .map(|s| (s.energy / ATTRIBUTE_MAX) * (s.mood / ATTRIBUTE_MAX))
        .sum();
    if pace <= 0.0 {
        return None;
    }
    Some((project.remaining_work_units() / pace).ceil() as u32)
}

pub fn project_views(state: &StudioState, cfg: &BalanceConfig) -> Vec<ProjectView> {
    let active = state.projects.active();
    let ranking = rank_projects(active, state.settings.priority_mode, cfg);
    active
        .iter()
        .map(|p| {
            let assigned: Vec<&StaffMember> = state.staff.assigned_to(&p.id).collect();
            let priority_rank = ranking
                .iter()
                .position(|r| r.project_id == p.id)
                .map_or(0, |i| i as u32 + 1);
            ProjectView {
                project_id: p.id.clone(),
                title: p.title.clone(),
                progress_percent: p.progress_percent(),
                current_stage: p.current_stage().map(|s| s.stage_name.clone()),
                assigned_staff_ids: assigned.iter().map(|s| s.id.clone()).collect(),
                priority_rank,
                is_automated: state.mode.is_automated(),
                estimated_days_remaining: estimated_days_remaining(p, &assigned),
            }
        })
        .collect()
}

pub fn staff_views(state: &StudioState) -> Vec<StaffView> {
    state
        .staff
        .hired()
        .iter()
        .map(|s| StaffView {
            staff_id: s.id.clone(),
            name: s.name.clone(),
            status: s.status,
            energy: s.energy,
            mood: s.mood,
            assigned_project_id: s.assigned_project_id.clone(),
        })
        .collect()
}
