use chrono::Utc;

use crate::events::{dispatch, TeamEvent};
use crate::rbac::{Enforcer, Permission, Role};
use crate::teams::{CreateMembership, TeamMembership, TeamMembershipRepository};
use crate::{AuthzError, TransitionViolation};

/// Configuration for adding members.
#[derive(Debug, Clone)]
pub struct MembershipConfig {
    /// Role assigned when the caller does not supply one. Default: editor.
    pub default_role: Role,
}

impl Default for MembershipConfig {
    fn default() -> Self {
        Self {
            default_role: Role::Editor,
        }
    }
}

/// Input data for adding a team member.
#[derive(Debug, Clone)]
pub struct AddMemberInput {
    pub team_id: i64,
    /// The authenticated user performing the add.
    pub actor_id: i64,
    /// The user being added.
    pub user_id: i64,
    /// Role for the new member; falls back to the configured default.
    pub role: Option<Role>,
}

/// Action to add a member to a team.
///
/// Checks, in order:
/// 1. The actor holds `team_invite` in this team.
/// 2. The granted role ranks strictly below the actor's own, the same
///    rule [`UpdateMemberRoleAction`](crate::UpdateMemberRoleAction)
///    applies. In particular no one can add a second owner.
/// 3. The target is not already a member.
///
/// The new membership is created with the supplied role, or the
/// configured default.
pub struct AddMemberAction<M>
where
    M: TeamMembershipRepository,
{
    enforcer: Enforcer<M>,
    config: MembershipConfig,
}

impl<M> AddMemberAction<M>
where
    M: TeamMembershipRepository,
{
    /// Creates a new `AddMemberAction` with default configuration.
    pub fn new(membership_repo: M) -> Self {
        Self::with_config(membership_repo, MembershipConfig::default())
    }

    /// Creates a new `AddMemberAction` with custom configuration.
    pub fn with_config(membership_repo: M, config: MembershipConfig) -> Self {
        Self {
            enforcer: Enforcer::new(membership_repo),
            config,
        }
    }

    /// Adds the member and returns the created membership.
    ///
    /// # Returns
    ///
    /// - `Ok(membership)` - member added
    /// - `Err(AuthzError::NotAMember)` - actor is not in the team
    /// - `Err(AuthzError::InsufficientPermission(_))` - actor cannot invite
    /// - `Err(AuthzError::InvalidTransition(RankNotBelowActor))` - the
    ///   granted role ranks at or above the actor's own
    /// - `Err(AuthzError::InvalidTransition(AlreadyMember))` - target is
    ///   already in the team
    #[cfg_attr(
        feature = "tracing",
        tracing::instrument(name = "add_member", skip_all, err)
    )]
    pub async fn execute(&self, input: AddMemberInput) -> Result<TeamMembership, AuthzError> {
        let actor_role = self
            .enforcer
            .require_permission(input.team_id, input.actor_id, Permission::TeamInvite)
            .await?;

        let role = input.role.unwrap_or(self.config.default_role);

        // same rank rule as role changes; keeps the team at one owner
        if role.at_least(actor_role) {
            return Err(AuthzError::InvalidTransition(
                TransitionViolation::RankNotBelowActor,
            ));
        }

        let repo = self.enforcer.membership_repo();

        if repo
            .find_by_team_and_user(input.team_id, input.user_id)
            .await?
            .is_some()
        {
            return Err(AuthzError::InvalidTransition(
                TransitionViolation::AlreadyMember,
            ));
        }
        let membership = repo
            .create(CreateMembership::new(input.team_id, input.user_id, role))
            .await?;

        log::info!(
            target: "teamguard",
            "msg=\"member added\", team_id={}, user_id={}, role=\"{}\", added_by={}",
            membership.team_id,
            membership.user_id,
            membership.role,
            input.actor_id
        );

        dispatch(TeamEvent::MemberAdded {
            team_id: input.team_id,
            user_id: input.user_id,
            role,
            added_by: input.actor_id,
            at: Utc::now(),
        })
        .await;

        Ok(membership)
    }
}
