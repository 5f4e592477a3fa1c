//! The closed set of fine-grained permissions.

use std::fmt;

use serde::{Deserialize, Serialize};

/// A capability token, grouped by the resource it protects.
///
/// Permissions are opaque: no structural relationship exists between them
/// beyond their membership in the role→permission matrix.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Permission {
    // team management
    TeamCreate,
    TeamUpdate,
    TeamDelete,
    TeamInvite,
    TeamRemoveOwner,
    TeamRemoveAdmin,
    TeamRemoveMember,
    TeamViewAnalytics,

    // planner management
    PlannerCreate,
    PlannerUpdate,
    PlannerDelete,
    PlannerAssign,
    PlannerView,
    PlannerApprove,

    // todo management
    TodoCreate,
    TodoUpdate,
    TodoDelete,
    TodoAssign,
    TodoView,
    TodoComplete,

    // post management
    PostCreate,
    PostUpdate,
    PostDelete,
    PostView,
    PostApprove,
}

impl Permission {
    /// All permissions, grouped by resource.
    pub const ALL: [Permission; 25] = [
        Permission::TeamCreate,
        Permission::TeamUpdate,
        Permission::TeamDelete,
        Permission::TeamInvite,
        Permission::TeamRemoveOwner,
        Permission::TeamRemoveAdmin,
        Permission::TeamRemoveMember,
        Permission::TeamViewAnalytics,
        Permission::PlannerCreate,
        Permission::PlannerUpdate,
        Permission::PlannerDelete,
        Permission::PlannerAssign,
        Permission::PlannerView,
        Permission::PlannerApprove,
        Permission::TodoCreate,
        Permission::TodoUpdate,
        Permission::TodoDelete,
        Permission::TodoAssign,
        Permission::TodoView,
        Permission::TodoComplete,
        Permission::PostCreate,
        Permission::PostUpdate,
        Permission::PostDelete,
        Permission::PostView,
        Permission::PostApprove,
    ];

    /// String form used in error messages and transport payloads.
    pub fn as_str(self) -> &'static str {
        match self {
            Permission::TeamCreate => "team_create",
            Permission::TeamUpdate => "team_update",
            Permission::TeamDelete => "team_delete",
            Permission::TeamInvite => "team_invite",
            Permission::TeamRemoveOwner => "team_remove_owner",
            Permission::TeamRemoveAdmin => "team_remove_admin",
            Permission::TeamRemoveMember => "team_remove_member",
            Permission::TeamViewAnalytics => "team_view_analytics",
            Permission::PlannerCreate => "planner_create",
            Permission::PlannerUpdate => "planner_update",
            Permission::PlannerDelete => "planner_delete",
            Permission::PlannerAssign => "planner_assign",
            Permission::PlannerView => "planner_view",
            Permission::PlannerApprove => "planner_approve",
            Permission::TodoCreate => "todo_create",
            Permission::TodoUpdate => "todo_update",
            Permission::TodoDelete => "todo_delete",
            Permission::TodoAssign => "todo_assign",
            Permission::TodoView => "todo_view",
            Permission::TodoComplete => "todo_complete",
            Permission::PostCreate => "post_create",
            Permission::PostUpdate => "post_update",
            Permission::PostDelete => "post_delete",
            Permission::PostView => "post_view",
            Permission::PostApprove => "post_approve",
        }
    }

    /// Parse from the string form.
    pub fn parse(s: &str) -> Option<Permission> {
        Permission::ALL.into_iter().find(|p| p.as_str() == s)
    }

    /// Human-readable description for admin UIs.
    pub fn description(self) -> &'static str {
        match self {
            Permission::TeamCreate => "Create teams",
            Permission::TeamUpdate => "Edit team details",
            Permission::TeamDelete => "Delete the team",
            Permission::TeamInvite => "Invite members to the team",
            Permission::TeamRemoveOwner => "Remove the owner",
            Permission::TeamRemoveAdmin => "Remove admins",
            Permission::TeamRemoveMember => "Remove regular members",
            Permission::TeamViewAnalytics => "View team analytics",
            Permission::PlannerCreate => "Create planners",
            Permission::PlannerUpdate => "Edit planners",
            Permission::PlannerDelete => "Delete planners",
            Permission::PlannerAssign => "Assign planner owners",
            Permission::PlannerView => "View planners",
            Permission::PlannerApprove => "Approve planners",
            Permission::TodoCreate => "Create todos",
            Permission::TodoUpdate => "Edit todos",
            Permission::TodoDelete => "Delete todos",
            Permission::TodoAssign => "Assign todos",
            Permission::TodoView => "View todos",
            Permission::TodoComplete => "Mark todos complete",
            Permission::PostCreate => "Write posts",
            Permission::PostUpdate => "Edit posts",
            Permission::PostDelete => "Delete posts",
            Permission::PostView => "View posts",
            Permission::PostApprove => "Approve posts",
        }
    }
}

impl fmt::Display for Permission {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_string_roundtrip() {
        for permission in Permission::ALL {
            assert_eq!(Permission::parse(permission.as_str()), Some(permission));
        }
        assert_eq!(Permission::parse("team_destroy"), None);
    }

    #[test]
    fn test_all_is_exhaustive_and_unique() {
        let mut names: Vec<&str> = Permission::ALL.iter().map(|p| p.as_str()).collect();
        names.sort_unstable();
        names.dedup();
        assert_eq!(names.len(), 25);
    }

    #[test]
    fn test_serde_uses_snake_case() {
        let json = serde_json::to_string(&Permission::TeamViewAnalytics).unwrap();
        assert_eq!(json, "\"team_view_analytics\"");
        let back: Permission = serde_json::from_str("\"planner_approve\"").unwrap();
        assert_eq!(back, Permission::PlannerApprove);
    }
}
