//! Enforcement guards wrapping protected operations.

use crate::teams::TeamMembershipRepository;
use crate::AuthzError;

use super::{Permission, Role};

/// Resolves an actor's role in a team and enforces permission or rank
/// requirements before a protected operation runs.
///
/// The enforcer is transport-agnostic: callers pass the already
/// authenticated user id and the team id in scope. Each check reads the
/// membership row fresh; there is no caching, because a stale role after
/// a demotion is a security bug, not a latency optimization.
///
/// # Example
///
/// ```rust,ignore
/// let enforcer = Enforcer::new(membership_repo);
///
/// // handler pre-condition: actor must be able to delete planners
/// enforcer
///     .require_permission(team_id, actor_id, Permission::PlannerDelete)
///     .await?;
/// delete_planner(planner_id).await?;
/// ```
pub struct Enforcer<M>
where
    M: TeamMembershipRepository,
{
    membership_repo: M,
}

impl<M> Enforcer<M>
where
    M: TeamMembershipRepository,
{
    /// Creates an enforcer over the given membership store.
    pub fn new(membership_repo: M) -> Self {
        Self { membership_repo }
    }

    /// Returns the user's role in the team, or `None` when no membership
    /// row exists. Absence of a membership means absence of any
    /// permission; there is no "no access" role.
    ///
    /// A membership row whose role string is not in the taxonomy is
    /// surfaced as [`AuthzError::UnknownRole`] rather than treated as a
    /// denial, so corrupted data is visible instead of silently locked out.
    #[cfg_attr(feature = "tracing", tracing::instrument(skip(self), err))]
    pub async fn resolve_role(
        &self,
        team_id: i64,
        user_id: i64,
    ) -> Result<Option<Role>, AuthzError> {
        let membership = self
            .membership_repo
            .find_by_team_and_user(team_id, user_id)
            .await?;

        match membership {
            None => Ok(None),
            Some(m) => m
                .parse_role()
                .map(Some)
                .ok_or_else(|| AuthzError::UnknownRole(m.role.clone())),
        }
    }

    /// Asserts that the user's role in the team grants `permission`.
    ///
    /// Returns the resolved role on success so callers can reuse it
    /// without a second read. "Not a member" and "member without the
    /// permission" are distinct failures.
    #[cfg_attr(feature = "tracing", tracing::instrument(skip(self), err))]
    pub async fn require_permission(
        &self,
        team_id: i64,
        user_id: i64,
        permission: Permission,
    ) -> Result<Role, AuthzError> {
        let Some(role) = self.resolve_role(team_id, user_id).await? else {
            log::debug!(
                target: "teamguard",
                "msg=\"permission denied\", team_id={team_id}, user_id={user_id}, permission=\"{permission}\", reason=\"not a member\""
            );
            return Err(AuthzError::NotAMember);
        };

        if !role.has_permission(permission) {
            log::debug!(
                target: "teamguard",
                "msg=\"permission denied\", team_id={team_id}, user_id={user_id}, role=\"{role}\", permission=\"{permission}\""
            );
            return Err(AuthzError::InsufficientPermission(permission));
        }

        Ok(role)
    }

    /// Asserts that the user's role ranks at or above `minimum`.
    #[cfg_attr(feature = "tracing", tracing::instrument(skip(self), err))]
    pub async fn require_role(
        &self,
        team_id: i64,
        user_id: i64,
        minimum: Role,
    ) -> Result<Role, AuthzError> {
        let Some(role) = self.resolve_role(team_id, user_id).await? else {
            log::debug!(
                target: "teamguard",
                "msg=\"rank check failed\", team_id={team_id}, user_id={user_id}, minimum=\"{minimum}\", reason=\"not a member\""
            );
            return Err(AuthzError::NotAMember);
        };

        if !role.at_least(minimum) {
            log::debug!(
                target: "teamguard",
                "msg=\"rank check failed\", team_id={team_id}, user_id={user_id}, role=\"{role}\", minimum=\"{minimum}\""
            );
            return Err(AuthzError::InsufficientRank(minimum));
        }

        Ok(role)
    }

    /// The underlying membership store.
    pub fn membership_repo(&self) -> &M {
        &self.membership_repo
    }
}
