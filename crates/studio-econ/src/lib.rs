#![deny(warnings)]

//! Economic models for Studio Tycoon: project capacity and completion payouts.
//!
//! This crate provides pure helpers for:
//! - Concurrent project capacity from studio level, equipment and headcount
//! - Final score, payout, reputation and influence for a finished project
//! - Staff XP grants and the level curve
//! - Hiring fees

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use studio_core::{BalanceConfig, StaffMember, StudioState};
use tracing::debug;

/// Hard ceiling on concurrently active projects.
pub const MAX_CONCURRENT_PROJECTS: usize = 5;

/// Inputs to the capacity computation.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct StudioFootprint {
    pub player_level: u32,
    pub equipment_count: usize,
    pub hired_staff: usize,
    pub working_staff: usize,
    pub active_projects: usize,
}

impl StudioFootprint {
    pub fn of(state: &StudioState) -> Self {
        Self {
            player_level: state.aggregate.player_level,
            equipment_count: state.aggregate.equipment.len(),
            hired_staff: state.staff.headcount(),
            working_staff: state.staff.working_count(),
            active_projects: state.projects.active_len(),
        }
    }
}

/// Capacity snapshot.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct ProjectCapacity {
    pub max_projects: usize,
    pub current_projects: usize,
    /// Staff adequacy for the current load, in [0, 1].
    pub efficiency: f32,
    /// Share of hired staff currently working, in [0, 1].
    pub staff_utilization: f32,
}

impl ProjectCapacity {
    /// Whether one more project may be admitted.
    pub fn can_admit(&self) -> bool {
        self.current_projects < self.max_projects
    }
}

/// Compute concurrent project capacity.
///
/// `max = min(5, max(2, level/3) + equipment/10 + staff/3)`, all divisions floored.
///
/// Example:
/// let cap = compute_capacity(&StudioFootprint { player_level: 6, hired_staff: 3, ..Default::default() });
/// assert_eq!(cap.max_projects, 3);
pub fn compute_capacity(f: &StudioFootprint) -> ProjectCapacity {
    let base = ((f.player_level / 3) as usize).max(2);
    let equipment_bonus = f.equipment_count / 10;
    let staff_bonus = f.hired_staff / 3;
    let max_projects = (base + equipment_bonus + staff_bonus).min(MAX_CONCURRENT_PROJECTS);

    let efficiency = if f.active_projects > 0 {
        (f.hired_staff as f32 / (f.active_projects * 2) as f32).min(1.0)
    } else {
        0.0
    };
    let staff_utilization = if f.hired_staff > 0 {
        f.working_staff as f32 / f.hired_staff as f32
    } else {
        0.0
    };

    ProjectCapacity {
        max_projects,
        current_projects: f.active_projects,
        efficiency,
        staff_utilization,
    }
}

/// Economic outcome of a finished project.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Resolution {
    pub final_score: u32,
    pub payout: Decimal,
    pub reputation_gained: i64,
    pub influence_gained: i64,
    /// XP granted to every participating staff member.
    pub xp_gain: u32,
}

/// `floor((quality + efficiency) / 2)`, never negative.
pub fn final_score(quality: f32, efficiency: f32) -> u32 {
    let avg = ((quality + efficiency) / 2.0).floor();
    if avg.is_finite() && avg > 0.0 {
        avg as u32
    } else {
        0
    }
}

/// `floor(base * score / 100)`.
pub fn payout(base: Decimal, final_score: u32) -> Decimal {
    (base * Decimal::from(final_score) / Decimal::ONE_HUNDRED).floor()
}

/// `floor(base * score / 100)`.
pub fn reputation_gain(base: u32, final_score: u32) -> i64 {
    (u64::from(base) * u64::from(final_score) / 100) as i64
}

/// `floor(score / 10 + reputation / 5)`.
pub fn influence_gain(final_score: u32, reputation_gained: i64) -> i64 {
    (f64::from(final_score) / 10.0 + reputation_gained as f64 / 5.0).floor() as i64
}

/// `floor(score * difficulty / divisor)`; harder, better work earns more.
pub fn xp_gain(final_score: u32, difficulty: u32, divisor: u32) -> u32 {
    final_score.saturating_mul(difficulty) / divisor.max(1)
}

/// Resolve all economic outputs at once.
pub fn resolve(
    quality: f32,
    efficiency: f32,
    payout_base: Decimal,
    rep_gain_base: u32,
    difficulty: u32,
    cfg: &BalanceConfig,
) -> Resolution {
    let score = final_score(quality, efficiency);
    let reputation_gained = reputation_gain(rep_gain_base, score);
    Resolution {
        final_score: score,
        payout: payout(payout_base, score),
        reputation_gained,
        influence_gained: influence_gain(score, reputation_gained),
        xp_gain: xp_gain(score, difficulty, cfg.xp_divisor),
    }
}

/// XP needed to go from `level` to `level + 1`: `floor(100 * level^1.5)`.
pub fn xp_to_next_level(level: u32) -> u32 {
    if level == 0 {
        return 100;
    }
    (100.0 * f64::from(level).powf(1.5)).floor() as u32
}

/// Grant XP in role, handling any number of level-ups. Returns levels gained.
pub fn grant_xp(staff: &mut StaffMember, amount: u32) -> u32 {
    let mut xp = staff.xp_in_role.saturating_add(amount);
    let mut level = staff.level_in_role.max(1);
    let mut level_ups = 0;
    loop {
        let needed = xp_to_next_level(level);
        if xp < needed {
            break;
        }
        xp -= needed;
        level += 1;
        level_ups += 1;
    }
    staff.xp_in_role = xp;
    staff.level_in_role = level;
    if level_ups > 0 {
        debug!(staff = %staff.id, new_level = level, "staff levelled up");
    }
    level_ups
}

/// One-off fee to hire a candidate.
pub fn hiring_cost(salary: Decimal, cfg: &BalanceConfig) -> Decimal {
    salary * cfg.hiring_salary_multiplier
}

/// Profit potential in [0, 1] relative to the configured normalizer.
pub fn profit_factor(payout_base: Decimal, cfg: &BalanceConfig) -> f32 {
    let ratio = payout_base / cfg.profit_normalizer;
    ratio.to_f32().unwrap_or(0.0).clamp(0.0, 1.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use studio_core::{StaffId, StaffRole, StaffStats};

    fn member() -> StaffMember {
        StaffMember::new(
            StaffId("s".into()),
            "S",
            StaffRole::Engineer,
            StaffStats {
                creativity: 50.0,
                technical: 50.0,
                speed: 50.0,
            },
        )
    }

    #[test]
    fn level_six_three_staff_gives_three() {
        let cap = compute_capacity(&StudioFootprint {
            player_level: 6,
            equipment_count: 0,
            hired_staff: 3,
            working_staff: 0,
            active_projects: 3,
        });
        assert_eq!(cap.max_projects, 3);
        assert!(!cap.can_admit());
    }

    #[test]
    fn capacity_has_floor_of_two_and_ceiling_of_five() {
        let low = compute_capacity(&StudioFootprint::default());
        assert_eq!(low.max_projects, 2);
        let high = compute_capacity(&StudioFootprint {
            player_level: 30,
            equipment_count: 40,
            hired_staff: 30,
            ..StudioFootprint::default()
        });
        assert_eq!(high.max_projects, MAX_CONCURRENT_PROJECTS);
    }

    #[test]
    fn efficiency_zero_without_projects() {
        let cap = compute_capacity(&StudioFootprint {
            hired_staff: 4,
            working_staff: 2,
            ..StudioFootprint::default()
        });
        assert_eq!(cap.efficiency, 0.0);
        assert_eq!(cap.staff_utilization, 0.5);
        let busy = compute_capacity(&StudioFootprint {
            hired_staff: 3,
            active_projects: 2,
            ..StudioFootprint::default()
        });
        assert_eq!(busy.efficiency, 0.75);
    }

    #[test]
    fn resolution_example() {
        let r = resolve(
            60.0,
            80.0,
            Decimal::new(1000, 0),
            50,
            2,
            &BalanceConfig::default(),
        );
        assert_eq!(r.final_score, 70);
        assert_eq!(r.payout, Decimal::new(700, 0));
        assert_eq!(r.reputation_gained, 35);
        assert_eq!(r.influence_gained, 14);
        assert_eq!(r.xp_gain, 14);
    }

    #[test]
    fn payout_floors_fractional_amounts() {
        assert_eq!(payout(Decimal::new(999, 0), 33), Decimal::new(329, 0));
        assert_eq!(reputation_gain(7, 50), 3);
    }

    #[test]
    fn xp_curve() {
        assert_eq!(xp_to_next_level(0), 100);
        assert_eq!(xp_to_next_level(1), 100);
        assert_eq!(xp_to_next_level(2), 282);
        assert_eq!(xp_to_next_level(4), 800);
    }

    #[test]
    fn grant_crosses_several_levels() {
        let mut m = member();
        let ups = grant_xp(&mut m, 100 + 282 + 10);
        assert_eq!(ups, 2);
        assert_eq!(m.level_in_role, 3);
        assert_eq!(m.xp_in_role, 10);
    }

    #[test]
    fn hiring_is_three_days_salary() {
        let cost = hiring_cost(Decimal::new(120, 0), &BalanceConfig::default());
        assert_eq!(cost, Decimal::new(360, 0));
    }

    #[test]
    fn profit_factor_saturates() {
        let cfg = BalanceConfig::default();
        assert_eq!(profit_factor(Decimal::new(25_000, 0), &cfg), 0.5);
        assert_eq!(profit_factor(Decimal::new(90_000, 0), &cfg), 1.0);
    }

    proptest! {
        #[test]
        fn capacity_bounded(level in 0u32..100, eq in 0usize..100, staff in 0usize..100, active in 0usize..10) {
            let cap = compute_capacity(&StudioFootprint {
                player_level: level,
                equipment_count: eq,
                hired_staff: staff,
                working_staff: staff / 2,
                active_projects: active,
            });
            prop_assert!((2..=MAX_CONCURRENT_PROJECTS).contains(&cap.max_projects));
            prop_assert!((0.0..=1.0).contains(&cap.efficiency));
            prop_assert!((0.0..=1.0).contains(&cap.staff_utilization));
        }

        #[test]
        fn payout_never_exceeds_base_at_or_below_100(base in 0i64..1_000_000, score in 0u32..=100) {
            let b = Decimal::new(base, 0);
            let p = payout(b, score);
            prop_assert!(p <= b);
            prop_assert!(p >= Decimal::ZERO);
        }
    }
}
