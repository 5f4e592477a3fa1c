//! Role-based access control for team-collaboration backends.
//!
//! `teamguard` owns the decision logic a team feature set hangs off of: the
//! closed role and permission taxonomy, the authored role→permission matrix,
//! the role priority order, and the membership lifecycle operations that
//! must respect that order (add, remove, change role, leave, transfer
//! ownership).
//!
//! The crate reads and writes exactly one piece of persisted state, the
//! team membership row, through the [`TeamMembershipRepository`] trait.
//! Everything else (HTTP, sessions, the CRUD features being protected) is
//! a caller concern.
//!
//! # Quick start
//!
//! ```rust,ignore
//! use teamguard::{Enforcer, MockTeamMembershipRepository, Permission};
//!
//! let memberships = MockTeamMembershipRepository::new();
//! let enforcer = Enforcer::new(memberships);
//!
//! // guard a protected operation
//! let role = enforcer
//!     .require_permission(team_id, actor_id, Permission::PlannerDelete)
//!     .await?;
//! ```

pub mod actions;
pub mod events;
pub mod rbac;
pub mod teams;

#[cfg(feature = "sqlite")]
pub mod sqlite;

pub use actions::{
    AddMemberAction, AddMemberInput, LeaveTeamAction, MembershipConfig, RemoveMemberAction,
    TransferOwnershipAction, UpdateMemberRoleAction,
};
pub use events::{register_event_listeners, TeamEvent};
pub use rbac::{can_remove_member, permissions_of, Enforcer, Permission, Role};
pub use teams::{CreateMembership, TeamMembership, TeamMembershipRepository};

#[cfg(feature = "mocks")]
pub use teams::MockTeamMembershipRepository;

use std::fmt;

/// Authorization and lifecycle errors.
///
/// All variants are recoverable by the caller; the transport edge decides
/// the status code. A denial is a final answer for the request, never
/// retried here.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthzError {
    /// The acting user has no membership in the team.
    NotAMember,
    /// The actor's role does not grant the named permission.
    InsufficientPermission(Permission),
    /// The actor's role ranks below the required minimum role.
    InsufficientRank(Role),
    /// A lifecycle rule rejected the requested transition.
    InvalidTransition(TransitionViolation),
    /// The membership row carries a role string the taxonomy does not know.
    UnknownRole(String),
    /// A referenced membership does not exist.
    NotFound,
    /// The membership store failed; carries the backend's message.
    DatabaseError(String),
}

/// The specific lifecycle rule an operation violated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransitionViolation {
    /// Actor and target are the same user.
    SelfAction,
    /// The target currently holds the owner role; ownership changes only
    /// through the dedicated transfer operation.
    TargetIsOwner,
    /// The role being assigned is not strictly below the actor's own rank.
    RankNotBelowActor,
    /// The target already has a membership in the team.
    AlreadyMember,
    /// Ownership cannot be transferred to the current owner.
    SelfTransfer,
    /// An owner must transfer ownership before leaving the team.
    OwnerMustTransferFirst,
    /// `can_remove_member` denied the removal.
    RemovalNotPermitted,
}

impl std::error::Error for AuthzError {}

impl fmt::Display for AuthzError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AuthzError::NotAMember => write!(f, "Not a member of this team"),
            AuthzError::InsufficientPermission(p) => {
                write!(f, "Missing required permission: {}", p.as_str())
            }
            AuthzError::InsufficientRank(r) => {
                write!(f, "Requires minimum role: {}", r.as_str())
            }
            AuthzError::InvalidTransition(v) => write!(f, "{v}"),
            AuthzError::UnknownRole(s) => write!(f, "Unknown role: {s}"),
            AuthzError::NotFound => write!(f, "Membership not found"),
            AuthzError::DatabaseError(msg) => write!(f, "Database error: {msg}"),
        }
    }
}

impl fmt::Display for TransitionViolation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::SelfAction => write!(f, "Cannot perform this action on yourself"),
            Self::TargetIsOwner => {
                write!(f, "The owner's role can only change via ownership transfer")
            }
            Self::RankNotBelowActor => {
                write!(f, "Cannot assign a role at or above your own rank")
            }
            Self::AlreadyMember => write!(f, "User is already a team member"),
            Self::SelfTransfer => write!(f, "Cannot transfer ownership to yourself"),
            Self::OwnerMustTransferFirst => {
                write!(f, "Transfer ownership before leaving the team")
            }
            Self::RemovalNotPermitted => {
                write!(f, "Not permitted to remove this member")
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display_carries_identifier() {
        let err = AuthzError::InsufficientPermission(Permission::TeamDelete);
        assert!(err.to_string().contains("team_delete"));

        let err = AuthzError::InsufficientRank(Role::Admin);
        assert!(err.to_string().contains("admin"));

        let err = AuthzError::UnknownRole("superuser".to_owned());
        assert!(err.to_string().contains("superuser"));
    }

    #[test]
    fn test_violation_messages_distinct() {
        let all = [
            TransitionViolation::SelfAction,
            TransitionViolation::TargetIsOwner,
            TransitionViolation::RankNotBelowActor,
            TransitionViolation::AlreadyMember,
            TransitionViolation::SelfTransfer,
            TransitionViolation::OwnerMustTransferFirst,
            TransitionViolation::RemovalNotPermitted,
        ];
        let mut messages: Vec<String> = all.iter().map(ToString::to_string).collect();
        messages.sort();
        messages.dedup();
        assert_eq!(messages.len(), all.len());
    }
}
