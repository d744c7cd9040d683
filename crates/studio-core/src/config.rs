//! Balance constants and automation settings.
//!
//! The numbers here are tuning knobs rather than invariants; they can be
//! overridden from a YAML file without touching the simulation code.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use thiserror::Error;

/// Errors raised while loading configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid yaml: {0}")]
    Yaml(#[from] serde_yaml::Error),
    #[error("invalid setting: {0}")]
    Invalid(String),
}

/// Tunable game-balance parameters.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BalanceConfig {
    /// Energy lost per tick by working staff.
    pub energy_work_cost: f32,
    /// Energy regained per tick by resting staff.
    pub energy_rest_regen: f32,
    /// Below this energy, work output is scaled by `low_energy_penalty`.
    pub low_energy_threshold: f32,
    pub low_energy_penalty: f32,
    /// Minimum energy to be assigned or to start training.
    pub min_energy_to_work: f32,
    /// Starting automation efficiency for newly admitted projects.
    pub initial_project_efficiency: f32,
    /// Efficiency gained by a project after each tick that produced work.
    pub efficiency_growth: f32,
    /// Adaptive workload: `adaptive_base + urgency * adaptive_urgency_weight`.
    pub adaptive_base: f32,
    pub adaptive_urgency_weight: f32,
    pub burnout_high: f32,
    pub burnout_critical: f32,
    /// Output multiplier for staff at or above `burnout_high`.
    pub burnout_penalty: f32,
    /// Payout treated as a profit factor of 1.0.
    pub profit_normalizer: Decimal,
    /// Reputation gain treated as a reputation factor of 1.0.
    pub reputation_normalizer: f32,
    pub xp_divisor: u32,
    /// Hiring fee as a multiple of daily salary.
    pub hiring_salary_multiplier: Decimal,
    pub candidate_refresh_cost: Decimal,
    pub candidate_refresh_count: usize,
    pub training_cost: Decimal,
    pub training_days: u32,
    pub training_stat_gain: f32,
    pub training_min_player_level: u32,
}

impl Default for BalanceConfig {
    fn default() -> Self {
        Self {
            energy_work_cost: 15.0,
            energy_rest_regen: 20.0,
            low_energy_threshold: 20.0,
            low_energy_penalty: 0.3,
            min_energy_to_work: 30.0,
            initial_project_efficiency: 0.5,
            efficiency_growth: 0.01,
            adaptive_base: 0.6,
            adaptive_urgency_weight: 0.4,
            burnout_high: 70.0,
            burnout_critical: 90.0,
            burnout_penalty: 0.75,
            profit_normalizer: Decimal::new(50_000, 0),
            reputation_normalizer: 1000.0,
            xp_divisor: 10,
            hiring_salary_multiplier: Decimal::new(3, 0),
            candidate_refresh_cost: Decimal::new(50, 0),
            candidate_refresh_count: 3,
            training_cost: Decimal::new(500, 0),
            training_days: 3,
            training_stat_gain: 5.0,
            training_min_player_level: 3,
        }
    }
}

impl BalanceConfig {
    /// Parse from YAML; missing keys keep their defaults.
    pub fn from_yaml_str(text: &str) -> Result<Self, ConfigError> {
        let cfg: BalanceConfig = serde_yaml::from_str(text)?;
        cfg.validate()?;
        Ok(cfg)
    }

    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let text = fs::read_to_string(path)?;
        Self::from_yaml_str(&text)
    }

    /// Reject settings that would break the tick bounds.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let fractions = [
            ("low_energy_penalty", self.low_energy_penalty),
            ("initial_project_efficiency", self.initial_project_efficiency),
            ("burnout_penalty", self.burnout_penalty),
        ];
        for (name, v) in fractions {
            if !(0.0..=1.0).contains(&v) {
                return Err(ConfigError::Invalid(format!("{name} must be within [0,1]")));
            }
        }
        if self.energy_work_cost < 0.0 || self.energy_rest_regen < 0.0 {
            return Err(ConfigError::Invalid("energy rates must be >= 0".into()));
        }
        if self.efficiency_growth < 0.0 {
            return Err(ConfigError::Invalid("efficiency_growth must be >= 0".into()));
        }
        if self.profit_normalizer <= Decimal::ZERO || self.reputation_normalizer <= 0.0 {
            return Err(ConfigError::Invalid("normalizers must be > 0".into()));
        }
        if self.xp_divisor == 0 {
            return Err(ConfigError::Invalid("xp_divisor must be > 0".into()));
        }
        Ok(())
    }
}

/// How project priority is scored.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PriorityMode {
    Deadline,
    Profit,
    Reputation,
    #[default]
    Balanced,
}

/// How a staff member's time is split across projects.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WorkloadDistribution {
    Even,
    FocusOne,
    #[default]
    Adaptive,
}

/// When the optimizer runs.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum AutomationMode {
    /// Only on explicit request.
    #[default]
    Manual,
    /// Whenever the active lineup or the available roster changes.
    SemiAuto,
    /// On lineup changes and at the start of every tick.
    FullAuto,
}

impl AutomationMode {
    pub fn is_automated(self) -> bool {
        !matches!(self, AutomationMode::Manual)
    }
}

/// Optimizer knobs chosen by the player.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AutomationSettings {
    pub priority_mode: PriorityMode,
    pub workload_distribution: WorkloadDistribution,
    pub min_staff_per_project: usize,
    pub max_staff_per_project: usize,
}

impl Default for AutomationSettings {
    fn default() -> Self {
        Self {
            priority_mode: PriorityMode::Balanced,
            workload_distribution: WorkloadDistribution::Adaptive,
            min_staff_per_project: 1,
            max_staff_per_project: 3,
        }
    }
}

impl AutomationSettings {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.min_staff_per_project > self.max_staff_per_project {
            return Err(ConfigError::Invalid(
                "min_staff_per_project exceeds max_staff_per_project".into(),
            ));
        }
        Ok(())
    }
}
