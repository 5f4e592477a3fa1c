//! Membership lifecycle operations.
//!
//! One action struct per operation, generic over the membership store.
//! Every action resolves the actor's role fresh, applies its rule checks
//! in a fixed order, mutates through the repository, and fires a
//! [`TeamEvent`](crate::events::TeamEvent).

mod add_member;
mod leave_team;
mod remove_member;
mod transfer_ownership;
mod update_role;

pub use add_member::{AddMemberAction, AddMemberInput, MembershipConfig};
pub use leave_team::LeaveTeamAction;
pub use remove_member::RemoveMemberAction;
pub use transfer_ownership::TransferOwnershipAction;
pub use update_role::UpdateMemberRoleAction;
