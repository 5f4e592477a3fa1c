use chrono::Utc;

use crate::events::{dispatch, TeamEvent};
use crate::rbac::{can_remove_member, Enforcer};
use crate::teams::TeamMembershipRepository;
use crate::{AuthzError, TransitionViolation};

/// Action to remove a member from a team.
///
/// Eligibility is decided entirely by
/// [`can_remove_member`](crate::rbac::can_remove_member); this action
/// resolves both roles fresh, consults the rule, and deletes the row.
/// Callers needing to cascade (unassigning the user from team resources)
/// should listen for [`TeamEvent::MemberRemoved`].
pub struct RemoveMemberAction<M>
where
    M: TeamMembershipRepository,
{
    enforcer: Enforcer<M>,
}

impl<M> RemoveMemberAction<M>
where
    M: TeamMembershipRepository,
{
    pub fn new(membership_repo: M) -> Self {
        Self {
            enforcer: Enforcer::new(membership_repo),
        }
    }

    /// Removes `target_id` from the team on behalf of `actor_id`.
    ///
    /// # Returns
    ///
    /// - `Ok(())` - member removed
    /// - `Err(AuthzError::NotAMember)` - actor is not in the team
    /// - `Err(AuthzError::NotFound)` - target is not in the team
    /// - `Err(AuthzError::InvalidTransition(RemovalNotPermitted))` -
    ///   the eligibility rule denied the removal (including self-removal)
    #[cfg_attr(
        feature = "tracing",
        tracing::instrument(name = "remove_member", skip(self), err)
    )]
    pub async fn execute(
        &self,
        team_id: i64,
        actor_id: i64,
        target_id: i64,
    ) -> Result<(), AuthzError> {
        let actor_role = self
            .enforcer
            .resolve_role(team_id, actor_id)
            .await?
            .ok_or(AuthzError::NotAMember)?;

        let target_role = self
            .enforcer
            .resolve_role(team_id, target_id)
            .await?
            .ok_or(AuthzError::NotFound)?;

        if !can_remove_member(actor_id, target_id, actor_role, target_role) {
            log::debug!(
                target: "teamguard",
                "msg=\"removal denied\", team_id={team_id}, actor_id={actor_id}, actor_role=\"{actor_role}\", target_id={target_id}, target_role=\"{target_role}\""
            );
            return Err(AuthzError::InvalidTransition(
                TransitionViolation::RemovalNotPermitted,
            ));
        }

        self.enforcer
            .membership_repo()
            .delete_by_team_and_user(team_id, target_id)
            .await?;

        log::info!(
            target: "teamguard",
            "msg=\"member removed\", team_id={team_id}, user_id={target_id}, removed_by={actor_id}"
        );

        dispatch(TeamEvent::MemberRemoved {
            team_id,
            user_id: target_id,
            removed_by: actor_id,
            at: Utc::now(),
        })
        .await;

        Ok(())
    }
}

#[cfg(all(test, feature = "mocks"))]
mod tests {
    use super::*;
    use crate::rbac::Role;
    use crate::teams::{CreateMembership, MockTeamMembershipRepository};

    async fn repo_with_team() -> MockTeamMembershipRepository {
        let repo = MockTeamMembershipRepository::new();
        repo.create(CreateMembership::owner(1, 10)).await.unwrap();
        repo.create(CreateMembership::new(1, 20, Role::Admin))
            .await
            .unwrap();
        repo.create(CreateMembership::new(1, 30, Role::Manager))
            .await
            .unwrap();
        repo.create(CreateMembership::new(1, 40, Role::Editor))
            .await
            .unwrap();
        repo
    }

    #[tokio::test]
    async fn test_owner_removes_admin() {
        let action = RemoveMemberAction::new(repo_with_team().await);

        action.execute(1, 10, 20).await.unwrap();

        let gone = action
            .enforcer
            .membership_repo()
            .find_by_team_and_user(1, 20)
            .await
            .unwrap();
        assert!(gone.is_none());
    }

    #[tokio::test]
    async fn test_admin_cannot_remove_owner() {
        let action = RemoveMemberAction::new(repo_with_team().await);

        let err = action.execute(1, 20, 10).await.unwrap_err();
        assert_eq!(
            err,
            AuthzError::InvalidTransition(TransitionViolation::RemovalNotPermitted)
        );
    }

    #[tokio::test]
    async fn test_manager_removes_editor() {
        let action = RemoveMemberAction::new(repo_with_team().await);
        action.execute(1, 30, 40).await.unwrap();
    }

    #[tokio::test]
    async fn test_manager_cannot_remove_admin() {
        let action = RemoveMemberAction::new(repo_with_team().await);

        let err = action.execute(1, 30, 20).await.unwrap_err();
        assert_eq!(
            err,
            AuthzError::InvalidTransition(TransitionViolation::RemovalNotPermitted)
        );
    }

    #[tokio::test]
    async fn test_self_removal_denied() {
        let action = RemoveMemberAction::new(repo_with_team().await);

        let err = action.execute(1, 10, 10).await.unwrap_err();
        assert_eq!(
            err,
            AuthzError::InvalidTransition(TransitionViolation::RemovalNotPermitted)
        );
    }

    #[tokio::test]
    async fn test_actor_not_in_team() {
        let action = RemoveMemberAction::new(repo_with_team().await);

        let err = action.execute(1, 99, 40).await.unwrap_err();
        assert_eq!(err, AuthzError::NotAMember);
    }

    #[tokio::test]
    async fn test_target_not_in_team() {
        let action = RemoveMemberAction::new(repo_with_team().await);

        let err = action.execute(1, 10, 99).await.unwrap_err();
        assert_eq!(err, AuthzError::NotFound);
    }
}
