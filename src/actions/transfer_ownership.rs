use chrono::Utc;

use crate::events::{dispatch, TeamEvent};
use crate::rbac::{Enforcer, Role};
use crate::teams::TeamMembershipRepository;
use crate::{AuthzError, TransitionViolation};

/// Action to transfer team ownership.
///
/// Only the current owner may invoke it; the target must already be a
/// member and must not be the owner themself. On success the target
/// becomes `owner` and the old owner becomes `editor` in one atomic
/// repository call, so the team never observes zero or two owners.
pub struct TransferOwnershipAction<M>
where
    M: TeamMembershipRepository,
{
    enforcer: Enforcer<M>,
}

impl<M> TransferOwnershipAction<M>
where
    M: TeamMembershipRepository,
{
    pub fn new(membership_repo: M) -> Self {
        Self {
            enforcer: Enforcer::new(membership_repo),
        }
    }

    /// Transfers ownership from `actor_id` to `new_owner_id`.
    ///
    /// # Returns
    ///
    /// - `Ok(())` - ownership transferred
    /// - `Err(AuthzError::NotAMember)` - actor is not in the team
    /// - `Err(AuthzError::InsufficientRank(Owner))` - actor is not the owner
    /// - `Err(AuthzError::NotFound)` - target is not in the team
    /// - `Err(AuthzError::InvalidTransition(SelfTransfer))` - target is
    ///   the actor
    #[cfg_attr(
        feature = "tracing",
        tracing::instrument(name = "transfer_ownership", skip(self), err)
    )]
    pub async fn execute(
        &self,
        team_id: i64,
        actor_id: i64,
        new_owner_id: i64,
    ) -> Result<(), AuthzError> {
        // the actor's role is read fresh: a repeated transfer sees the
        // demoted role from the first one
        self.enforcer.require_role(team_id, actor_id, Role::Owner).await?;

        self.enforcer
            .resolve_role(team_id, new_owner_id)
            .await?
            .ok_or(AuthzError::NotFound)?;

        if actor_id == new_owner_id {
            return Err(AuthzError::InvalidTransition(
                TransitionViolation::SelfTransfer,
            ));
        }

        self.enforcer
            .membership_repo()
            .transfer_owner(team_id, actor_id, new_owner_id)
            .await?;

        log::info!(
            target: "teamguard",
            "msg=\"ownership transferred\", team_id={team_id}, old_owner_id={actor_id}, new_owner_id={new_owner_id}"
        );

        dispatch(TeamEvent::OwnershipTransferred {
            team_id,
            old_owner_id: actor_id,
            new_owner_id,
            at: Utc::now(),
        })
        .await;

        Ok(())
    }
}

#[cfg(all(test, feature = "mocks"))]
mod tests {
    use super::*;
    use crate::teams::{CreateMembership, MockTeamMembershipRepository};

    async fn repo_with_team() -> MockTeamMembershipRepository {
        let repo = MockTeamMembershipRepository::new();
        repo.create(CreateMembership::owner(1, 10)).await.unwrap();
        repo.create(CreateMembership::new(1, 20, Role::Admin))
            .await
            .unwrap();
        repo
    }

    #[tokio::test]
    async fn test_transfer_success() {
        let action = TransferOwnershipAction::new(repo_with_team().await);

        action.execute(1, 10, 20).await.unwrap();

        let repo = action.enforcer.membership_repo();
        let old = repo.find_by_team_and_user(1, 10).await.unwrap().unwrap();
        let new = repo.find_by_team_and_user(1, 20).await.unwrap().unwrap();
        assert_eq!(old.role, "editor");
        assert_eq!(new.role, "owner");
    }

    #[tokio::test]
    async fn test_only_owner_may_transfer() {
        let action = TransferOwnershipAction::new(repo_with_team().await);

        let err = action.execute(1, 20, 10).await.unwrap_err();
        assert_eq!(err, AuthzError::InsufficientRank(Role::Owner));
    }

    #[tokio::test]
    async fn test_self_transfer_rejected() {
        let action = TransferOwnershipAction::new(repo_with_team().await);

        let err = action.execute(1, 10, 10).await.unwrap_err();
        assert_eq!(
            err,
            AuthzError::InvalidTransition(TransitionViolation::SelfTransfer)
        );
    }

    #[tokio::test]
    async fn test_target_must_be_member() {
        let action = TransferOwnershipAction::new(repo_with_team().await);

        let err = action.execute(1, 10, 99).await.unwrap_err();
        assert_eq!(err, AuthzError::NotFound);
    }

    #[tokio::test]
    async fn test_repeat_transfer_uses_updated_roles() {
        let action = TransferOwnershipAction::new(repo_with_team().await);

        action.execute(1, 10, 20).await.unwrap();

        // the old owner is an editor now, so a second attempt by them fails
        let err = action.execute(1, 10, 20).await.unwrap_err();
        assert_eq!(err, AuthzError::InsufficientRank(Role::Owner));

        // and the new owner transferring back works
        action.execute(1, 20, 10).await.unwrap();
        let repo = action.enforcer.membership_repo();
        let back = repo.find_by_team_and_user(1, 10).await.unwrap().unwrap();
        assert_eq!(back.role, "owner");
    }
}
