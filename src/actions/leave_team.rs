use chrono::Utc;

use crate::events::{dispatch, TeamEvent};
use crate::rbac::{Enforcer, Role};
use crate::teams::TeamMembershipRepository;
use crate::{AuthzError, TransitionViolation};

/// Action for a user to leave a team.
///
/// An owner cannot leave; they must transfer ownership first, which keeps
/// every team owned. [`TeamEvent::MemberLeft`] is the cascade point for
/// owning features that reference the departing user.
pub struct LeaveTeamAction<M>
where
    M: TeamMembershipRepository,
{
    enforcer: Enforcer<M>,
}

impl<M> LeaveTeamAction<M>
where
    M: TeamMembershipRepository,
{
    pub fn new(membership_repo: M) -> Self {
        Self {
            enforcer: Enforcer::new(membership_repo),
        }
    }

    /// Removes the acting user's own membership.
    ///
    /// # Returns
    ///
    /// - `Ok(())` - membership removed
    /// - `Err(AuthzError::NotAMember)` - user is not in the team
    /// - `Err(AuthzError::InvalidTransition(OwnerMustTransferFirst))` -
    ///   user is the team owner
    #[cfg_attr(
        feature = "tracing",
        tracing::instrument(name = "leave_team", skip(self), err)
    )]
    pub async fn execute(&self, team_id: i64, user_id: i64) -> Result<(), AuthzError> {
        let role = self
            .enforcer
            .resolve_role(team_id, user_id)
            .await?
            .ok_or(AuthzError::NotAMember)?;

        if role == Role::Owner {
            return Err(AuthzError::InvalidTransition(
                TransitionViolation::OwnerMustTransferFirst,
            ));
        }

        self.enforcer
            .membership_repo()
            .delete_by_team_and_user(team_id, user_id)
            .await?;

        log::info!(
            target: "teamguard",
            "msg=\"member left\", team_id={team_id}, user_id={user_id}, role=\"{role}\""
        );

        dispatch(TeamEvent::MemberLeft {
            team_id,
            user_id,
            at: Utc::now(),
        })
        .await;

        Ok(())
    }
}
