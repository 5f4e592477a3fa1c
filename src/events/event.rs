use chrono::{DateTime, Utc};

use crate::rbac::Role;

/// Membership lifecycle events emitted by the actions.
///
/// Events are always fired; with no registered listeners they are a
/// no-op. [`MemberRemoved`](TeamEvent::MemberRemoved) and
/// [`MemberLeft`](TeamEvent::MemberLeft) are the trigger points for
/// callers that need to cascade (e.g. unassigning the user from the
/// team's todos).
#[derive(Debug, Clone)]
pub enum TeamEvent {
    MemberAdded {
        team_id: i64,
        user_id: i64,
        role: Role,
        added_by: i64,
        at: DateTime<Utc>,
    },
    MemberRemoved {
        team_id: i64,
        user_id: i64,
        removed_by: i64,
        at: DateTime<Utc>,
    },
    MemberLeft {
        team_id: i64,
        user_id: i64,
        at: DateTime<Utc>,
    },
    RoleChanged {
        team_id: i64,
        user_id: i64,
        old_role: Role,
        new_role: Role,
        changed_by: i64,
        at: DateTime<Utc>,
    },
    OwnershipTransferred {
        team_id: i64,
        old_owner_id: i64,
        new_owner_id: i64,
        at: DateTime<Utc>,
    },
}

impl TeamEvent {
    /// Returns a dot-separated event name for logging/tracing.
    pub fn name(&self) -> &'static str {
        match self {
            Self::MemberAdded { .. } => "team.member.added",
            Self::MemberRemoved { .. } => "team.member.removed",
            Self::MemberLeft { .. } => "team.member.left",
            Self::RoleChanged { .. } => "team.member.role_changed",
            Self::OwnershipTransferred { .. } => "team.ownership.transferred",
        }
    }

    /// Returns the timestamp when this event occurred.
    pub fn timestamp(&self) -> DateTime<Utc> {
        match self {
            Self::MemberAdded { at, .. }
            | Self::MemberRemoved { at, .. }
            | Self::MemberLeft { at, .. }
            | Self::RoleChanged { at, .. }
            | Self::OwnershipTransferred { at, .. } => *at,
        }
    }

    /// The team the event belongs to.
    pub fn team_id(&self) -> i64 {
        match self {
            Self::MemberAdded { team_id, .. }
            | Self::MemberRemoved { team_id, .. }
            | Self::MemberLeft { team_id, .. }
            | Self::RoleChanged { team_id, .. }
            | Self::OwnershipTransferred { team_id, .. } => *team_id,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_event_names() {
        let now = Utc::now();

        assert_eq!(
            TeamEvent::MemberAdded {
                team_id: 1,
                user_id: 2,
                role: Role::Editor,
                added_by: 3,
                at: now
            }
            .name(),
            "team.member.added"
        );

        assert_eq!(
            TeamEvent::MemberRemoved {
                team_id: 1,
                user_id: 2,
                removed_by: 3,
                at: now
            }
            .name(),
            "team.member.removed"
        );

        assert_eq!(
            TeamEvent::MemberLeft {
                team_id: 1,
                user_id: 2,
                at: now
            }
            .name(),
            "team.member.left"
        );

        assert_eq!(
            TeamEvent::RoleChanged {
                team_id: 1,
                user_id: 2,
                old_role: Role::Editor,
                new_role: Role::Admin,
                changed_by: 3,
                at: now
            }
            .name(),
            "team.member.role_changed"
        );

        assert_eq!(
            TeamEvent::OwnershipTransferred {
                team_id: 1,
                old_owner_id: 2,
                new_owner_id: 3,
                at: now
            }
            .name(),
            "team.ownership.transferred"
        );
    }

    #[test]
    fn test_event_accessors() {
        let now = Utc::now();
        let event = TeamEvent::MemberLeft {
            team_id: 7,
            user_id: 2,
            at: now,
        };

        assert_eq!(event.timestamp(), now);
        assert_eq!(event.team_id(), 7);
    }
}
