use serde::{Deserialize, Serialize};
use studio_core::{BalanceConfig, PriorityMode, Project, ProjectId};
use studio_econ::profit_factor;

/// Normalized inputs to a project's priority, each in [0, 1].
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct PriorityFactors {
    pub deadline: f32,
    pub profit: f32,
    pub reputation: f32,
    pub completion: f32,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ProjectPriority {
    pub project_id: ProjectId,
    pub score: f32,
    pub factors: PriorityFactors,
}

/// Deadline urgency: 1.0 with a day or less left, 0.3 while half the
/// duration remains, otherwise `1 - remaining/total` floored at 0.3.
pub fn deadline_factor(project: &Project) -> f32 {
    let total = project.duration_days_total as f32;
    let remaining = project.duration_days_total as f32 - project.days_elapsed as f32;
    if remaining <= 1.0 {
        return 1.0;
    }
    if remaining >= total * 0.5 {
        return 0.3;
    }
    (1.0 - remaining / total).max(0.3)
}

fn factors(project: &Project, cfg: &BalanceConfig) -> PriorityFactors {
    PriorityFactors {
        deadline: deadline_factor(project),
        profit: profit_factor(project.payout_base, cfg),
        reputation: (project.rep_gain_base as f32 / cfg.reputation_normalizer).min(1.0),
        completion: project.completion_fraction(),
    }
}

fn weighted(mode: PriorityMode, f: &PriorityFactors) -> f32 {
    match mode {
        PriorityMode::Deadline => f.deadline * 0.6 + f.completion * 0.4,
        PriorityMode::Profit => f.profit * 0.6 + f.completion * 0.4,
        PriorityMode::Reputation => f.reputation * 0.6 + f.completion * 0.4,
        PriorityMode::Balanced => (f.deadline + f.profit + f.reputation + f.completion) / 4.0,
    }
}

/// Projects ordered from highest to lowest priority. Equal scores keep the
/// input (activation) order.
pub fn rank_projects(
    projects: &[Project],
    mode: PriorityMode,
    cfg: &BalanceConfig,
) -> Vec<ProjectPriority> {
    let mut ranked: Vec<ProjectPriority> = projects
        .iter()
        .map(|p| {
            let factors = factors(p, cfg);
            ProjectPriority {
                project_id: p.id.clone(),
                score: weighted(mode, &factors),
                factors,
            }
        })
        .collect();
    ranked.sort_by(|a, b| b.score.total_cmp(&a.score));
    ranked
}
