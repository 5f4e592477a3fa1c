use std::sync::Arc;

use async_trait::async_trait;

use crate::rbac::Role;
use crate::AuthzError;

use super::TeamMembership;

/// Data for creating a membership row.
#[derive(Debug, Clone)]
pub struct CreateMembership {
    pub team_id: i64,
    pub user_id: i64,
    pub role: Role,
}

impl CreateMembership {
    pub fn new(team_id: i64, user_id: i64, role: Role) -> Self {
        Self {
            team_id,
            user_id,
            role,
        }
    }

    /// Membership for a team creator. A team starts with exactly one
    /// owner; the lifecycle actions keep it that way.
    pub fn owner(team_id: i64, user_id: i64) -> Self {
        Self::new(team_id, user_id, Role::Owner)
    }
}

/// The membership store seam.
///
/// One row per active (team, user) pair. All reads performed by the
/// guards and lifecycle actions go through this trait fresh, with no
/// caching layered in between.
#[async_trait]
pub trait TeamMembershipRepository: Send + Sync {
    async fn create(&self, data: CreateMembership) -> Result<TeamMembership, AuthzError>;

    async fn find_by_team_and_user(
        &self,
        team_id: i64,
        user_id: i64,
    ) -> Result<Option<TeamMembership>, AuthzError>;

    async fn find_by_team(&self, team_id: i64) -> Result<Vec<TeamMembership>, AuthzError>;

    async fn find_by_user(&self, user_id: i64) -> Result<Vec<TeamMembership>, AuthzError>;

    /// Updates the role field in place. Fails with
    /// [`AuthzError::NotFound`] when no row exists.
    async fn update_role(
        &self,
        team_id: i64,
        user_id: i64,
        role: Role,
    ) -> Result<TeamMembership, AuthzError>;

    async fn delete_by_team_and_user(&self, team_id: i64, user_id: i64)
        -> Result<(), AuthzError>;

    /// Applies both role writes of an ownership transfer atomically:
    /// `to_user_id` becomes owner and `from_user_id` becomes editor, or
    /// neither change lands. Fails with [`AuthzError::NotFound`] when
    /// either membership is missing.
    async fn transfer_owner(
        &self,
        team_id: i64,
        from_user_id: i64,
        to_user_id: i64,
    ) -> Result<(), AuthzError>;
}

// Lets several actions share one store.
#[async_trait]
impl<T> TeamMembershipRepository for Arc<T>
where
    T: TeamMembershipRepository + ?Sized,
{
    async fn create(&self, data: CreateMembership) -> Result<TeamMembership, AuthzError> {
        (**self).create(data).await
    }

    async fn find_by_team_and_user(
        &self,
        team_id: i64,
        user_id: i64,
    ) -> Result<Option<TeamMembership>, AuthzError> {
        (**self).find_by_team_and_user(team_id, user_id).await
    }

    async fn find_by_team(&self, team_id: i64) -> Result<Vec<TeamMembership>, AuthzError> {
        (**self).find_by_team(team_id).await
    }

    async fn find_by_user(&self, user_id: i64) -> Result<Vec<TeamMembership>, AuthzError> {
        (**self).find_by_user(user_id).await
    }

    async fn update_role(
        &self,
        team_id: i64,
        user_id: i64,
        role: Role,
    ) -> Result<TeamMembership, AuthzError> {
        (**self).update_role(team_id, user_id, role).await
    }

    async fn delete_by_team_and_user(
        &self,
        team_id: i64,
        user_id: i64,
    ) -> Result<(), AuthzError> {
        (**self).delete_by_team_and_user(team_id, user_id).await
    }

    async fn transfer_owner(
        &self,
        team_id: i64,
        from_user_id: i64,
        to_user_id: i64,
    ) -> Result<(), AuthzError> {
        (**self).transfer_owner(team_id, from_user_id, to_user_id).await
    }
}
