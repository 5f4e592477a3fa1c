//! The closed set of team roles and their priority order.

use std::cmp::Ordering;
use std::fmt;

use serde::{Deserialize, Serialize};

/// A team member's role.
///
/// Roles form a strict total order by [`priority`](Role::priority):
/// `Owner > Admin > Manager > Editor > Viewer > Guest`. Priorities are
/// used only for comparison, never for arithmetic.
///
/// The role is stored as a string in the membership row; [`Role::as_str`]
/// and [`Role::parse`] convert between the two forms.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Owner,
    Admin,
    Manager,
    Editor,
    Viewer,
    Guest,
}

impl Role {
    /// All roles, highest priority first.
    pub const ALL: [Role; 6] = [
        Role::Owner,
        Role::Admin,
        Role::Manager,
        Role::Editor,
        Role::Viewer,
        Role::Guest,
    ];

    /// String form used for database storage.
    pub fn as_str(self) -> &'static str {
        match self {
            Role::Owner => "owner",
            Role::Admin => "admin",
            Role::Manager => "manager",
            Role::Editor => "editor",
            Role::Viewer => "viewer",
            Role::Guest => "guest",
        }
    }

    /// Parse from the database string form.
    pub fn parse(s: &str) -> Option<Role> {
        match s {
            "owner" => Some(Role::Owner),
            "admin" => Some(Role::Admin),
            "manager" => Some(Role::Manager),
            "editor" => Some(Role::Editor),
            "viewer" => Some(Role::Viewer),
            "guest" => Some(Role::Guest),
            _ => None,
        }
    }

    /// Rank used for superiority comparisons. Injective and stable.
    pub fn priority(self) -> u8 {
        match self {
            Role::Owner => 6,
            Role::Admin => 5,
            Role::Manager => 4,
            Role::Editor => 3,
            Role::Viewer => 2,
            Role::Guest => 1,
        }
    }

    /// Returns true if this role ranks at or above `minimum`.
    pub fn at_least(self, minimum: Role) -> bool {
        self.priority() >= minimum.priority()
    }

    /// Returns true if this role ranks strictly above `other`.
    pub fn outranks(self, other: Role) -> bool {
        self.priority() > other.priority()
    }

    /// Human-readable description for role pickers and admin UIs.
    pub fn description(self) -> &'static str {
        match self {
            Role::Owner => "Owner - holds every permission",
            Role::Admin => "Admin - holds nearly every permission",
            Role::Manager => "Manager - manages members and content",
            Role::Editor => "Editor - creates and edits content",
            Role::Viewer => "Viewer - read-only access",
            Role::Guest => "Guest - limited read-only access",
        }
    }
}

impl PartialOrd for Role {
    fn partial_cmp(&self, other: &Role) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Role {
    fn cmp(&self, other: &Role) -> Ordering {
        self.priority().cmp(&other.priority())
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_string_roundtrip() {
        for role in Role::ALL {
            assert_eq!(Role::parse(role.as_str()), Some(role));
        }
        assert_eq!(Role::parse("superuser"), None);
        assert_eq!(Role::parse(""), None);
    }

    #[test]
    fn test_priority_is_strict_total_order() {
        // injective
        for a in Role::ALL {
            for b in Role::ALL {
                if a != b {
                    assert_ne!(a.priority(), b.priority(), "{a} vs {b}");
                    // exactly one of > / < holds
                    assert!((a > b) ^ (a < b), "{a} vs {b}");
                }
            }
        }

        // transitive across all six roles: ALL is sorted descending
        let mut sorted = Role::ALL.to_vec();
        sorted.sort_by(|a, b| b.cmp(a));
        assert_eq!(sorted, Role::ALL.to_vec());
    }

    #[test]
    fn test_expected_ordering() {
        assert!(Role::Owner > Role::Admin);
        assert!(Role::Admin > Role::Manager);
        assert!(Role::Manager > Role::Editor);
        assert!(Role::Editor > Role::Viewer);
        assert!(Role::Viewer > Role::Guest);
    }

    #[test]
    fn test_at_least_and_outranks() {
        assert!(Role::Admin.at_least(Role::Admin));
        assert!(Role::Admin.at_least(Role::Guest));
        assert!(!Role::Admin.at_least(Role::Owner));

        assert!(Role::Owner.outranks(Role::Admin));
        assert!(!Role::Admin.outranks(Role::Admin));
    }

    #[test]
    fn test_serde_uses_storage_form() {
        let json = serde_json::to_string(&Role::Manager).unwrap();
        assert_eq!(json, "\"manager\"");
        let back: Role = serde_json::from_str("\"guest\"").unwrap();
        assert_eq!(back, Role::Guest);
    }
}
