use chrono::Utc;

use crate::events::{dispatch, TeamEvent};
use crate::rbac::{Enforcer, Role};
use crate::teams::{TeamMembership, TeamMembershipRepository};
use crate::{AuthzError, TransitionViolation};

/// Action to change a member's role.
///
/// The checks run in a fixed order and that order is part of the
/// contract, because each failure reports a different error:
///
/// 1. actor == target → `SelfAction` (no self-promotion or -demotion)
/// 2. target currently owner → `TargetIsOwner` (ownership moves only
///    through [`TransferOwnershipAction`](crate::TransferOwnershipAction))
/// 3. new role ranks at or above the actor's own → `RankNotBelowActor`
///
/// An actor can therefore only hand out roles strictly below their own
/// rank, which closes privilege escalation to peer level or above.
pub struct UpdateMemberRoleAction<M>
where
    M: TeamMembershipRepository,
{
    enforcer: Enforcer<M>,
}

impl<M> UpdateMemberRoleAction<M>
where
    M: TeamMembershipRepository,
{
    pub fn new(membership_repo: M) -> Self {
        Self {
            enforcer: Enforcer::new(membership_repo),
        }
    }

    /// Sets `target_id`'s role to `new_role` on behalf of `actor_id`.
    ///
    /// # Returns
    ///
    /// - `Ok(membership)` - the updated membership
    /// - `Err(AuthzError::NotAMember)` - actor is not in the team
    /// - `Err(AuthzError::NotFound)` - target is not in the team
    /// - `Err(AuthzError::InvalidTransition(_))` - one of the three
    ///   ordered checks failed
    #[cfg_attr(
        feature = "tracing",
        tracing::instrument(name = "update_member_role", skip(self), err)
    )]
    pub async fn execute(
        &self,
        team_id: i64,
        actor_id: i64,
        target_id: i64,
        new_role: Role,
    ) -> Result<TeamMembership, AuthzError> {
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

        if actor_id == target_id {
            return Err(AuthzError::InvalidTransition(
                TransitionViolation::SelfAction,
            ));
        }

        if target_role == Role::Owner {
            return Err(AuthzError::InvalidTransition(
                TransitionViolation::TargetIsOwner,
            ));
        }

        if new_role.at_least(actor_role) {
            return Err(AuthzError::InvalidTransition(
                TransitionViolation::RankNotBelowActor,
            ));
        }

        let membership = self
            .enforcer
            .membership_repo()
            .update_role(team_id, target_id, new_role)
            .await?;

        log::info!(
            target: "teamguard",
            "msg=\"role changed\", team_id={team_id}, user_id={target_id}, old_role=\"{target_role}\", new_role=\"{new_role}\", changed_by={actor_id}"
        );

        dispatch(TeamEvent::RoleChanged {
            team_id,
            user_id: target_id,
            old_role: target_role,
            new_role,
            changed_by: actor_id,
            at: Utc::now(),
        })
        .await;

        Ok(membership)
    }
}
