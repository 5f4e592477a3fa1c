//! Pure lifecycle eligibility rules.

use super::Role;

/// Whether `actor` may remove `target` from a team.
///
/// This is the single source of truth for removal eligibility and must be
/// consulted before any membership row is deleted. It is pure and total
/// over its inputs:
///
/// - nobody may remove themself
/// - an owner may remove anyone else
/// - an admin may remove targets ranked manager or below
/// - a manager may remove targets ranked editor or below
/// - every other actor role may remove nobody
pub fn can_remove_member(
    actor_id: i64,
    target_id: i64,
    actor_role: Role,
    target_role: Role,
) -> bool {
    if actor_id == target_id {
        return false;
    }

    match actor_role {
        Role::Owner => true,
        Role::Admin => !target_role.outranks(Role::Manager),
        Role::Manager => !target_role.outranks(Role::Editor),
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_self_removal_always_denied() {
        for actor_role in Role::ALL {
            for target_role in Role::ALL {
                assert!(!can_remove_member(7, 7, actor_role, target_role));
            }
        }
    }

    #[test]
    fn test_owner_removes_anyone_else() {
        for target_role in Role::ALL {
            assert!(can_remove_member(1, 2, Role::Owner, target_role));
        }
    }

    #[test]
    fn test_admin_limits() {
        assert!(!can_remove_member(1, 2, Role::Admin, Role::Owner));
        assert!(!can_remove_member(1, 2, Role::Admin, Role::Admin));
        assert!(can_remove_member(1, 2, Role::Admin, Role::Manager));
        assert!(can_remove_member(1, 2, Role::Admin, Role::Editor));
        assert!(can_remove_member(1, 2, Role::Admin, Role::Viewer));
        assert!(can_remove_member(1, 2, Role::Admin, Role::Guest));
    }

    #[test]
    fn test_manager_limits() {
        assert!(!can_remove_member(1, 2, Role::Manager, Role::Owner));
        assert!(!can_remove_member(1, 2, Role::Manager, Role::Admin));
        assert!(!can_remove_member(1, 2, Role::Manager, Role::Manager));
        assert!(can_remove_member(1, 2, Role::Manager, Role::Editor));
        assert!(can_remove_member(1, 2, Role::Manager, Role::Viewer));
        assert!(can_remove_member(1, 2, Role::Manager, Role::Guest));
    }

    #[test]
    fn test_lower_roles_remove_nobody() {
        for actor_role in [Role::Editor, Role::Viewer, Role::Guest] {
            for target_role in Role::ALL {
                assert!(
                    !can_remove_member(1, 2, actor_role, target_role),
                    "{actor_role} removing {target_role}"
                );
            }
        }
    }
}
