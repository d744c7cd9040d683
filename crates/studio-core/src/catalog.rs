//! Project pools: offers waiting to be accepted and the active lineup.

use crate::{Project, ProjectId};
use serde::{Deserialize, Serialize};

/// Owns available and active projects. Completed projects live in the
/// studio aggregate's history.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct ProjectCatalog {
    available: Vec<Project>,
    active: Vec<Project>,
}

impl ProjectCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn available(&self) -> &[Project] {
        &self.available
    }

    /// Active projects in activation order.
    pub fn active(&self) -> &[Project] {
        &self.active
    }

    pub fn active_mut(&mut self) -> &mut [Project] {
        &mut self.active
    }

    pub fn active_len(&self) -> usize {
        self.active.len()
    }

    pub fn is_active(&self, id: &ProjectId) -> bool {
        self.active.iter().any(|p| &p.id == id)
    }

    pub fn get_active(&self, id: &ProjectId) -> Option<&Project> {
        self.active.iter().find(|p| &p.id == id)
    }

    pub fn get_available(&self, id: &ProjectId) -> Option<&Project> {
        self.available.iter().find(|p| &p.id == id)
    }

    pub fn offer(&mut self, project: Project) {
        self.available.push(project);
    }

    pub fn take_available(&mut self, id: &ProjectId) -> Option<Project> {
        let idx = self.available.iter().position(|p| &p.id == id)?;
        Some(self.available.remove(idx))
    }

    /// Append to the active lineup. Capacity is the caller's concern.
    pub fn activate(&mut self, project: Project) {
        self.active.push(project);
    }

    /// Remove from the active lineup. A second call for the same id yields `None`.
    pub fn take_active(&mut self, id: &ProjectId) -> Option<Project> {
        let idx = self.active.iter().position(|p| &p.id == id)?;
        Some(self.active.remove(idx))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures::project;

    #[test]
    fn offer_activate_take() {
        let mut cat = ProjectCatalog::new();
        cat.offer(project("a", &[10.0]));
        cat.offer(project("b", &[10.0]));
        let a = cat.take_available(&ProjectId("a".into())).unwrap();
        cat.activate(a);
        assert!(cat.is_active(&ProjectId("a".into())));
        assert_eq!(cat.available().len(), 1);

        assert!(cat.take_active(&ProjectId("a".into())).is_some());
        assert!(cat.take_active(&ProjectId("a".into())).is_none());
        assert_eq!(cat.active_len(), 0);
    }

    #[test]
    fn activation_order_is_kept() {
        let mut cat = ProjectCatalog::new();
        for id in ["x", "y", "z"] {
            cat.activate(project(id, &[5.0]));
        }
        let ids: Vec<_> = cat.active().iter().map(|p| p.id.0.as_str()).collect();
        assert_eq!(ids, ["x", "y", "z"]);
    }
}
