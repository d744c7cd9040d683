#![deny(warnings)]

//! Staff-to-project matching and automated assignment.
//!
//! - [`match_score`] rates how well a staff member fits a project.
//! - [`rank_projects`] orders the active lineup by the player's priority mode.
//! - [`optimize`] greedily binds available staff to ranked projects.

mod matcher;
mod optimizer;
mod priority;

pub use matcher::{match_score, rank_staff_for_project};
pub use optimizer::{optimize, OptimizationPlan};
pub use priority::{deadline_factor, rank_projects, PriorityFactors, ProjectPriority};
