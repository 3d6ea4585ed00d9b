//! Identifier newtypes for the workboard domain.

use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

macro_rules! entity_id {
    ($(#[$docs:meta])* $name:ident) => {
        $(#[$docs])*
        #[derive(
            Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
        )]
        #[serde(transparent)]
        pub struct $name(Uuid);

        impl $name {
            /// Creates a new random identifier.
            #[must_use]
            pub fn new() -> Self {
                Self(Uuid::new_v4())
            }

            /// Creates an identifier from an existing UUID.
            #[must_use]
            pub const fn from_uuid(uuid: Uuid) -> Self {
                Self(uuid)
            }

            /// Returns the wrapped UUID.
            #[must_use]
            pub const fn into_inner(self) -> Uuid {
                self.0
            }
        }

        impl Default for $name {
            fn default() -> Self {
                Self::new()
            }
        }

        impl AsRef<Uuid> for $name {
            fn as_ref(&self) -> &Uuid {
                &self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }
    };
}

entity_id!(
    /// Unique identifier for a task record.
    TaskId
);

entity_id!(
    /// Unique identifier for a workspace, the multi-tenant boundary scoping
    /// every entity and permission check.
    WorkspaceId
);

entity_id!(
    /// Unique identifier for a workspace member.
    UserId
);

entity_id!(
    /// Unique identifier for a task list within a workspace.
    ListId
);

entity_id!(
    /// Unique identifier for a comment on a task.
    CommentId
);

entity_id!(
    /// Unique identifier for a workspace tag.
    TagId
);

entity_id!(
    /// Unique identifier for a chat channel.
    ChannelId
);
