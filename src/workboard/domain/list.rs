//! Task list and tag vocabulary entities.

use super::{ListId, TagId, WorkspaceId};
use serde::{Deserialize, Serialize};

/// A task list inside a workspace, carrying an ordered set of status labels.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskList {
    id: ListId,
    workspace_id: WorkspaceId,
    name: String,
    statuses: Vec<String>,
}

impl TaskList {
    /// Creates a new task list with the given ordered status labels.
    #[must_use]
    pub fn new(
        workspace_id: WorkspaceId,
        name: impl Into<String>,
        statuses: impl IntoIterator<Item = String>,
    ) -> Self {
        Self {
            id: ListId::new(),
            workspace_id,
            name: name.into(),
            statuses: statuses.into_iter().collect(),
        }
    }

    /// Returns the list identifier.
    #[must_use]
    pub const fn id(&self) -> ListId {
        self.id
    }

    /// Returns the owning workspace identifier.
    #[must_use]
    pub const fn workspace_id(&self) -> WorkspaceId {
        self.workspace_id
    }

    /// Returns the list name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the ordered status labels.
    #[must_use]
    pub fn statuses(&self) -> &[String] {
        &self.statuses
    }

    /// Returns the first status label, the default custom status for tasks
    /// created without an explicit one.
    #[must_use]
    pub fn default_status_label(&self) -> Option<&str> {
        self.statuses.first().map(String::as_str)
    }
}

/// A workspace tag.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tag {
    id: TagId,
    workspace_id: WorkspaceId,
    name: String,
}

impl Tag {
    /// Creates a new tag.
    #[must_use]
    pub fn new(workspace_id: WorkspaceId, name: impl Into<String>) -> Self {
        Self {
            id: TagId::new(),
            workspace_id,
            name: name.into(),
        }
    }

    /// Returns the tag identifier.
    #[must_use]
    pub const fn id(&self) -> TagId {
        self.id
    }

    /// Returns the owning workspace identifier.
    #[must_use]
    pub const fn workspace_id(&self) -> WorkspaceId {
        self.workspace_id
    }

    /// Returns the tag name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }
}
