#![allow(dead_code)]

use chrono::NaiveDate;
use rust_decimal::Decimal;
use studio_core::{
    BalanceConfig, Project, ProjectId, Stage, StaffId, StaffMember, StaffRole, StaffStats,
    StatRequirements,
};
use studio_runtime::Studio;

pub fn start_date() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 3, 1).unwrap()
}

pub fn studio(money: i64, level: u32) -> Studio {
    studio_with(BalanceConfig::default(), money, level)
}

pub fn studio_with(cfg: BalanceConfig, money: i64, level: u32) -> Studio {
    Studio::new(cfg, 99, Decimal::new(money, 0), level, start_date())
}

pub fn member(id: &str, role: StaffRole) -> StaffMember {
    let mut s = StaffMember::new(
        StaffId(id.to_string()),
        format!("Member {id}"),
        role,
        StaffStats {
            creativity: 60.0,
            technical: 60.0,
            speed: 50.0,
        },
    );
    s.salary = Decimal::new(10, 0);
    s
}

pub fn project(id: &str, stages: &[f32]) -> Project {
    Project {
        id: ProjectId(id.to_string()),
        title: format!("Session {id}"),
        genre: "Rock".to_string(),
        client_type: "Record Label".to_string(),
        client_id: Some(format!("label-{id}")),
        difficulty: 2,
        duration_days_total: 10,
        days_elapsed: 0,
        payout_base: Decimal::new(1_000, 0),
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

/// Hire through the pool so the studio pays the usual fee.
pub fn hire(studio: &mut Studio, staff: StaffMember) -> StaffId {
    let id = staff.id.clone();
    studio.add_candidate(staff).unwrap();
    studio.hire(&id).unwrap();
    id
}
