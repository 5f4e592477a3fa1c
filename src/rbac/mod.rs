//! The access-control engine: taxonomy, matrix, priority order, guards.

mod guards;
mod matrix;
mod permission;
mod role;
mod rules;

pub use guards::Enforcer;
pub use matrix::permissions_of;
pub use permission::Permission;
pub use role::Role;
pub use rules::can_remove_member;
