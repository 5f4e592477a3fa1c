//! Core membership types.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::rbac::Role;

/// Links a user to a team with a role.
///
/// At most one membership exists per (team, user) pair. The role is
/// stored as a string in the database and parsed through the closed
/// [`Role`] taxonomy; this crate retains no history of past roles.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TeamMembership {
    /// Unique identifier.
    pub id: i64,
    /// The team this membership belongs to.
    pub team_id: i64,
    /// The user who is a member.
    pub user_id: i64,
    /// The role as stored (parsed via [`Role::parse`]).
    pub role: String,
    /// When the user joined the team.
    pub joined_at: DateTime<Utc>,
    /// When the membership was last updated.
    pub updated_at: DateTime<Utc>,
}

impl TeamMembership {
    /// Parse the stored role string into the typed taxonomy.
    ///
    /// Returns `None` if the role string is not recognized.
    pub fn parse_role(&self) -> Option<Role> {
        Role::parse(&self.role)
    }
}
