//! Staff roster: the candidate pool and hired staff.

use crate::{Assignment, ProjectId, StaffId, StaffMember, StaffRole, StaffStatus};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Owns every staff member the studio knows about.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct StaffDirectory {
    hired: Vec<StaffMember>,
    candidates: Vec<StaffMember>,
}

impl StaffDirectory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn hired(&self) -> &[StaffMember] {
        &self.hired
    }

    pub fn hired_mut(&mut self) -> &mut [StaffMember] {
        &mut self.hired
    }

    pub fn candidates(&self) -> &[StaffMember] {
        &self.candidates
    }

    pub fn headcount(&self) -> usize {
        self.hired.len()
    }

    pub fn working_count(&self) -> usize {
        self.hired
            .iter()
            .filter(|s| s.status == StaffStatus::Working)
            .count()
    }

    pub fn get(&self, id: &StaffId) -> Option<&StaffMember> {
        self.hired.iter().find(|s| &s.id == id)
    }

    pub fn get_mut(&mut self, id: &StaffId) -> Option<&mut StaffMember> {
        self.hired.iter_mut().find(|s| &s.id == id)
    }

    pub fn candidate(&self, id: &StaffId) -> Option<&StaffMember> {
        self.candidates.iter().find(|s| &s.id == id)
    }

    /// Replace the candidate pool.
    pub fn set_candidates(&mut self, candidates: Vec<StaffMember>) {
        self.candidates = candidates;
    }

    pub fn add_candidate(&mut self, candidate: StaffMember) {
        self.candidates.push(candidate);
    }

    /// Remove a candidate from the pool, if present.
    pub fn take_candidate(&mut self, id: &StaffId) -> Option<StaffMember> {
        let idx = self.candidates.iter().position(|s| &s.id == id)?;
        Some(self.candidates.remove(idx))
    }

    /// Add a member to the roster as idle and unassigned.
    pub fn insert_hired(&mut self, mut staff: StaffMember) {
        staff.assigned_project_id = None;
        staff.allocation = 0.0;
        staff.status = StaffStatus::Idle;
        debug!(staff = %staff.id, "staff joined roster");
        self.hired.push(staff);
    }

    /// Remove a member from the roster; the member is unassigned first.
    pub fn remove_hired(&mut self, id: &StaffId) -> Option<StaffMember> {
        let idx = self.hired.iter().position(|s| &s.id == id)?;
        let mut staff = self.hired.remove(idx);
        staff.release();
        Some(staff)
    }

    /// Staff currently bound to `project`.
    pub fn assigned_to<'a>(
        &'a self,
        project: &'a ProjectId,
    ) -> impl Iterator<Item = &'a StaffMember> + 'a {
        self.hired
            .iter()
            .filter(move |s| s.assigned_project_id.as_ref() == Some(project))
    }

    /// Whether `project` already has a member of `role` bound to it.
    pub fn has_role_on(&self, project: &ProjectId, role: StaffRole) -> bool {
        self.assigned_to(project).any(|s| s.role == role)
    }

    /// Release every member bound to `project`, returning their ids.
    pub fn release_project(&mut self, project: &ProjectId) -> Vec<StaffId> {
        let mut released = Vec::new();
        for s in self
            .hired
            .iter_mut()
            .filter(|s| s.assigned_project_id.as_ref() == Some(project))
        {
            s.release();
            released.push(s.id.clone());
        }
        released
    }

    /// Release every idle or working member.
    pub fn release_available(&mut self) {
        for s in self.hired.iter_mut().filter(|s| s.is_available()) {
            s.release();
        }
    }

    /// Current bindings, derived from the roster. The roster keeps no rank, so
    /// every binding comes back unranked (`priority == 0`).
    pub fn assignments(&self) -> Vec<Assignment> {
        self.hired
            .iter()
            .filter_map(|s| {
                s.assigned_project_id.as_ref().map(|p| Assignment {
                    staff_id: s.id.clone(),
                    project_id: p.clone(),
                    allocation: s.allocation,
                    priority: 0,
                })
            })
            .collect()
    }
}
