//! Project entity shown on the board.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique identifier for a project.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ProjectId(String);

impl ProjectId {
    /// Generate a fresh random identifier
    pub fn generate() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    /// Get the full ID as a string
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for ProjectId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl AsRef<str> for ProjectId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Which column a project lives in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProjectStatus {
    #[default]
    Active,
    Finished,
}

impl ProjectStatus {
    /// Lowercase name, as used for column ids
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Active => "active",
            Self::Finished => "finished",
        }
    }

    /// The other column
    pub fn toggled(&self) -> Self {
        match self {
            Self::Active => Self::Finished,
            Self::Finished => Self::Active,
        }
    }
}

impl std::fmt::Display for ProjectStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A project on the board.
///
/// Only `status` changes after creation, and only through
/// [`ProjectStore::move_project`](crate::services::ProjectStore::move_project).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Project {
    pub id: ProjectId,
    pub title: String,
    pub description: String,
    /// Number of people assigned, always > 0
    pub people: u32,
    pub status: ProjectStatus,
}

impl Project {
    /// Create a new active project with a freshly generated id
    pub(crate) fn new(title: String, description: String, people: u32) -> Self {
        Self {
            id: ProjectId::generate(),
            title,
            description,
            people,
            status: ProjectStatus::Active,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_new_project_is_active() {
        let project = Project::new("A".into(), "desc".into(), 3);
        assert_eq!(project.status, ProjectStatus::Active);
        assert_eq!(project.people, 3);
    }

    #[test]
    fn test_generated_ids_are_distinct() {
        let ids: HashSet<ProjectId> = (0..500).map(|_| ProjectId::generate()).collect();
        assert_eq!(ids.len(), 500);
    }

    #[test]
    fn test_status_toggle() {
        assert_eq!(ProjectStatus::Active.toggled(), ProjectStatus::Finished);
        assert_eq!(ProjectStatus::Finished.toggled(), ProjectStatus::Active);
        assert_eq!(ProjectStatus::default(), ProjectStatus::Active);
        assert_eq!(ProjectStatus::Finished.to_string(), "finished");
    }
}
