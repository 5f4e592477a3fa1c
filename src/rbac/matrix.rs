//! The authored role→permission matrix.
//!
//! This table is product data, not a derivation from rank. Higher rank
//! does not imply a superset of a lower rank's grants: admins cannot
//! create or delete teams, managers cannot delete planners. Do not
//! "normalize" it into a monotonic hierarchy.

use super::{Permission, Role};

use Permission::*;

const OWNER: &[Permission] = &[
    // team management - everything
    TeamCreate,
    TeamUpdate,
    TeamDelete,
    TeamInvite,
    TeamRemoveOwner,
    TeamRemoveAdmin,
    TeamRemoveMember,
    TeamViewAnalytics,
    // planner management - everything
    PlannerCreate,
    PlannerUpdate,
    PlannerDelete,
    PlannerAssign,
    PlannerView,
    PlannerApprove,
    // todo management - everything
    TodoCreate,
    TodoUpdate,
    TodoDelete,
    TodoAssign,
    TodoView,
    TodoComplete,
    // post management - everything
    PostCreate,
    PostUpdate,
    PostDelete,
    PostView,
    PostApprove,
];

const ADMIN: &[Permission] = &[
    // team management - restricted
    TeamUpdate,
    TeamInvite,
    TeamRemoveMember,
    TeamViewAnalytics,
    // planner management - everything
    PlannerCreate,
    PlannerUpdate,
    PlannerDelete,
    PlannerAssign,
    PlannerView,
    PlannerApprove,
    // todo management - everything
    TodoCreate,
    TodoUpdate,
    TodoDelete,
    TodoAssign,
    TodoView,
    TodoComplete,
    // post management - everything
    PostCreate,
    PostUpdate,
    PostDelete,
    PostView,
    PostApprove,
];

const MANAGER: &[Permission] = &[
    // team management - restricted
    TeamInvite,
    TeamRemoveMember,
    TeamViewAnalytics,
    // planner management - create/update/assign/view
    PlannerCreate,
    PlannerUpdate,
    PlannerAssign,
    PlannerView,
    // todo management - everything
    TodoCreate,
    TodoUpdate,
    TodoDelete,
    TodoAssign,
    TodoView,
    TodoComplete,
    // post management - create/update/view
    PostCreate,
    PostUpdate,
    PostView,
];

const EDITOR: &[Permission] = &[
    // no team management
    PlannerCreate,
    PlannerUpdate,
    PlannerView,
    TodoCreate,
    TodoUpdate,
    TodoView,
    TodoComplete,
    PostCreate,
    PostUpdate,
    PostView,
];

const VIEWER: &[Permission] = &[PlannerView, TodoView, PostView];

const GUEST: &[Permission] = &[PlannerView, TodoView, PostView];

/// The set of permissions granted to a role. Pure static lookup.
pub fn permissions_of(role: Role) -> &'static [Permission] {
    match role {
        Role::Owner => OWNER,
        Role::Admin => ADMIN,
        Role::Manager => MANAGER,
        Role::Editor => EDITOR,
        Role::Viewer => VIEWER,
        Role::Guest => GUEST,
    }
}

impl Role {
    /// Whether this role holds `permission` per the matrix.
    pub fn has_permission(self, permission: Permission) -> bool {
        permissions_of(self).contains(&permission)
    }
}
