//! In-memory membership oracle for tests and embedders without a directory
//! service.

use async_trait::async_trait;
use std::collections::HashSet;
use std::sync::{Arc, RwLock};

use crate::workboard::{
    domain::{UserId, WorkspaceId},
    ports::{MembershipError, MembershipOracle, MembershipResult},
};

/// Thread-safe in-memory membership set.
#[derive(Debug, Clone, Default)]
pub struct InMemoryMembership {
    members: Arc<RwLock<HashSet<(WorkspaceId, UserId)>>>,
}

impl InMemoryMembership {
    /// Creates an empty membership set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Records a user as a member of a workspace.
    ///
    /// # Errors
    ///
    /// Returns a lookup error when the membership lock is poisoned.
    pub fn add_member(&self, workspace: WorkspaceId, user: UserId) -> MembershipResult<()> {
        let mut members = self
            .members
            .write()
            .map_err(|err| MembershipError::lookup(std::io::Error::other(err.to_string())))?;
        members.insert((workspace, user));
        Ok(())
    }
}

#[async_trait]
impl MembershipOracle for InMemoryMembership {
    async fn is_member(&self, workspace: WorkspaceId, user: UserId) -> MembershipResult<bool> {
        let members = self
            .members
            .read()
            .map_err(|err| MembershipError::lookup(std::io::Error::other(err.to_string())))?;
        Ok(members.contains(&(workspace, user)))
    }
}
