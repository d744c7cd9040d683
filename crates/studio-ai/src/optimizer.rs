use crate::matcher::rank_staff_for_project;
use crate::priority::{deadline_factor, rank_projects, ProjectPriority};
use serde::{Deserialize, Serialize};
use studio_core::{
    Assignment, AutomationSettings, BalanceConfig, Project, ProjectId, StaffMember,
    WorkloadDistribution,
};
use tracing::debug;

/// Result of one optimization pass.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct OptimizationPlan {
    /// Active projects, highest priority first.
    pub priorities: Vec<ProjectPriority>,
    /// Conflict-free bindings; at most one per staff member.
    pub assignments: Vec<Assignment>,
}

impl OptimizationPlan {
    pub fn for_project(&self, id: &ProjectId) -> impl Iterator<Item = &Assignment> + '_ {
        let id = id.clone();
        self.assignments.iter().filter(move |a| a.project_id == id)
    }

    /// 1-based rank of `id`, if it was ranked.
    pub fn rank_of(&self, id: &ProjectId) -> Option<u32> {
        self.priorities
            .iter()
            .position(|p| &p.project_id == id)
            .map(|i| i as u32 + 1)
    }
}

fn allocation(
    distribution: WorkloadDistribution,
    rank: usize,
    project: &Project,
    project_count: usize,
    cfg: &BalanceConfig,
) -> f32 {
    let even = 1.0 / project_count.max(1) as f32;
    match distribution {
        WorkloadDistribution::Even => even,
        WorkloadDistribution::FocusOne if rank == 0 => 1.0,
        WorkloadDistribution::FocusOne => even,
        WorkloadDistribution::Adaptive => {
            let urgency = deadline_factor(project);
            (cfg.adaptive_base + urgency * cfg.adaptive_urgency_weight).min(1.0)
        }
    }
}

/// Bind available staff to active projects.
///
/// Existing bindings are ignored: every idle or working member is treated as
/// free, so applying the plan replaces all prior assignments. Projects are
/// served in priority order in two passes, first up to the minimum staff per
/// project and then up to the maximum, so the minimum reaches higher-ranked
/// projects before lower-ranked ones are topped up. Within a project no role
/// appears twice. Staff below the minimum energy to work are left out. Allocation is greedy; low-priority projects may get nobody
/// when staff are scarce.
pub fn optimize(
    projects: &[Project],
    staff: &[StaffMember],
    settings: &AutomationSettings,
    cfg: &BalanceConfig,
) -> OptimizationPlan {
    let priorities = rank_projects(projects, settings.priority_mode, cfg);
    let pool: Vec<&StaffMember> = staff
        .iter()
        .filter(|s| s.is_available() && s.energy >= cfg.min_energy_to_work)
        .collect();

    let ranked: Vec<(&Project, Vec<&StaffMember>)> = priorities
        .iter()
        .filter_map(|prio| projects.iter().find(|p| p.id == prio.project_id))
        .map(|p| {
            let order = rank_staff_for_project(p, pool.iter().copied())
                .into_iter()
                .map(|(s, _)| s)
                .collect();
            (p, order)
        })
        .collect();

    let max = settings.max_staff_per_project;
    let min = settings.min_staff_per_project.min(max);
    let mut slots: Vec<Vec<&StaffMember>> = vec![Vec::new(); ranked.len()];
    let mut taken: Vec<&StaffMember> = Vec::new();

    for quota in [min, max] {
        for (rank, (_, candidates)) in ranked.iter().enumerate() {
            for &candidate in candidates {
                if slots[rank].len() >= quota {
                    break;
                }
                if taken.iter().any(|t| t.id == candidate.id) {
                    continue;
                }
                if slots[rank].iter().any(|s| s.role == candidate.role) {
                    continue;
                }
                taken.push(candidate);
                slots[rank].push(candidate);
            }
        }
    }

    let mut assignments = Vec::with_capacity(taken.len());
    for (rank, ((project, _), chosen)) in ranked.iter().zip(&slots).enumerate() {
        if chosen.is_empty() {
            debug!(project = %project.id, "no staff available for project");
            continue;
        }
        let share = allocation(
            settings.workload_distribution,
            rank,
            project,
            projects.len(),
            cfg,
        );
        for s in chosen {
            assignments.push(Assignment {
                staff_id: s.id.clone(),
                project_id: project.id.clone(),
                allocation: share,
                priority: rank as u32 + 1,
            });
        }
    }

    debug!(
        projects = ranked.len(),
        pool = pool.len(),
        assigned = assignments.len(),
        "staff optimization pass"
    );
    OptimizationPlan {
        priorities,
        assignments,
    }
}
