//! `SQLite` implementations of the membership store.
//!
//! Available with the `sqlite` feature.

mod membership;
pub mod migrations;

pub use membership::SqliteTeamMembershipRepository;
