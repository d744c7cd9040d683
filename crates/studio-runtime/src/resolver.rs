use chrono::NaiveDate;
use studio_core::{BalanceConfig, Project, ProjectReport, StaffXp, StudioState, ATTRIBUTE_MAX};
use studio_econ::grant_xp;
use tracing::info;

/// Turns a finished project into money, reputation, influence and staff XP.
///
/// `resolve` takes the project by value; callers remove it from the active
/// pool first, so a project can only ever be paid out once.
pub struct ProjectResolver<'a> {
    cfg: &'a BalanceConfig,
}

impl<'a> ProjectResolver<'a> {
    pub fn new(cfg: &'a BalanceConfig) -> Self {
        Self { cfg }
    }

    pub fn resolve(&self, project: Project, state: &mut StudioState) -> ProjectReport {
        let outcome = studio_econ::resolve(
            project.quality_score,
            project.efficiency_score,
            project.payout_base,
            project.rep_gain_base,
            project.difficulty,
            self.cfg,
        );

        let agg = &mut state.aggregate;
        agg.money += outcome.payout;
        agg.reputation += outcome.reputation_gained;
        agg.influence += outcome.influence_gained;
        let completed_on: NaiveDate = agg.date;

        let mood_lift = outcome.final_score as f32 / 10.0;
        let mut staff_xp = Vec::new();
        for id in state.staff.release_project(&project.id) {
            let Some(member) = state.staff.get_mut(&id) else {
                continue;
            };
            grant_xp(member, outcome.xp_gain);
            member.mood = (member.mood + mood_lift).min(ATTRIBUTE_MAX);
            staff_xp.push(StaffXp {
                staff_id: id,
                xp: outcome.xp_gain,
                level_after: member.level_in_role,
            });
        }

        let report = ProjectReport {
            project_id: project.id.clone(),
            title: project.title.clone(),
            genre: project.genre.clone(),
            client_type: project.client_type.clone(),
            client_id: project.client_id.clone(),
            quality_score: project.quality_score,
            efficiency_score: project.efficiency_score,
            final_score: outcome.final_score,
            payout: outcome.payout,
            reputation_gained: outcome.reputation_gained,
            influence_gained: outcome.influence_gained,
            staff_xp,
            days_taken: project.days_elapsed,
            on_time: project.days_elapsed <= project.duration_days_total,
            completed_on,
        };
        info!(
            project = %report.project_id,
            score = report.final_score,
            payout = %report.payout,
            reputation = report.reputation_gained,
            "project resolved"
        );

        state.aggregate.reports.push(report.clone());
        state.aggregate.completed_projects.push(project);
        report
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures::{project, staff, state};
    use rust_decimal::Decimal;
    use studio_core::{ProjectId, StaffId, StaffRole, StaffStatus};

    #[test]
    fn pays_out_and_releases_participants() {
        let cfg = BalanceConfig::default();
        let mut state = state(Decimal::new(1_000, 0), 1);
        let mut p = project("p", &[10.0]);
        p.payout_base = Decimal::new(1_000, 0);
        p.rep_gain_base = 50;
        p.difficulty = 2;
        p.quality_score = 80.0;
        p.efficiency_score = 60.0;
        p.days_elapsed = 12;
        state.staff.insert_hired(staff("a", StaffRole::Engineer));
        state.staff.insert_hired(staff("b", StaffRole::Producer));
        state
            .staff
            .get_mut(&StaffId("a".into()))
            .unwrap()
            .bind(p.id.clone(), 1.0);

        let report = ProjectResolver::new(&cfg).resolve(p, &mut state);

        assert_eq!(report.final_score, 70);
        assert_eq!(report.payout, Decimal::new(700, 0));
        assert_eq!(report.reputation_gained, 35);
        assert_eq!(report.influence_gained, 14);
        assert!(!report.on_time);
        assert_eq!(report.staff_xp.len(), 1);
        assert_eq!(report.staff_xp[0].xp, 14);

        assert_eq!(state.aggregate.money, Decimal::new(1_700, 0));
        assert_eq!(state.aggregate.reputation, 35);
        assert_eq!(state.aggregate.influence, 14);
        assert_eq!(state.aggregate.reports.len(), 1);
        assert_eq!(state.aggregate.completed_projects[0].id, ProjectId("p".into()));

        let a = state.staff.get(&StaffId("a".into())).unwrap();
        assert_eq!(a.status, StaffStatus::Idle);
        assert_eq!(a.assigned_project_id, None);
        assert_eq!(a.xp_in_role, 14);
        assert_eq!(a.mood, 67.0);
        let b = state.staff.get(&StaffId("b".into())).unwrap();
        assert_eq!(b.xp_in_role, 0);
        assert_eq!(b.mood, 60.0);
    }

    #[test]
    fn zero_quality_pays_nothing() {
        let cfg = BalanceConfig::default();
        let mut state = state(Decimal::new(10, 0), 1);
        let report = ProjectResolver::new(&cfg).resolve(project("p", &[1.0]), &mut state);
        assert_eq!(report.final_score, 0);
        assert_eq!(report.payout, Decimal::ZERO);
        assert_eq!(state.aggregate.money, Decimal::new(10, 0));
        assert!(report.on_time);
    }
}
