//! Membership oracle port for workspace boundary checks.

use crate::workboard::domain::{UserId, WorkspaceId};
use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

/// Result type for membership lookups.
pub type MembershipResult<T> = Result<T, MembershipError>;

/// External collaborator answering workspace membership questions.
///
/// Used to validate creators and assignees and to filter mention targets
/// before persistence and notification.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait MembershipOracle: Send + Sync {
    /// Returns whether the user is a member of the workspace.
    async fn is_member(&self, workspace: WorkspaceId, user: UserId) -> MembershipResult<bool>;
}

/// Errors returned by membership oracle implementations.
#[derive(Debug, Clone, Error)]
pub enum MembershipError {
    /// Membership lookup failed.
    #[error("membership lookup error: {0}")]
    Lookup(Arc<dyn std::error::Error + Send + Sync>),
}

impl MembershipError {
    /// Wraps a lookup error.
    pub fn lookup(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Lookup(Arc::new(err))
    }
}
