//! Membership state: the one table this crate reads and writes.

mod repository;
mod types;

pub use repository::{CreateMembership, TeamMembershipRepository};
pub use types::TeamMembership;

#[cfg(feature = "mocks")]
mod mocks;

#[cfg(feature = "mocks")]
pub use mocks::MockTeamMembershipRepository;
