//! In-memory membership store for tests and quick starts.

use std::collections::HashMap;
use std::sync::atomic::{AtomicI64, Ordering};
use std::sync::RwLock;

use async_trait::async_trait;
use chrono::Utc;

use crate::rbac::Role;
use crate::AuthzError;

use super::repository::{CreateMembership, TeamMembershipRepository};
use super::types::TeamMembership;

/// In-memory [`TeamMembershipRepository`] keyed by (team_id, user_id).
pub struct MockTeamMembershipRepository {
    memberships: RwLock<HashMap<(i64, i64), TeamMembership>>,
    next_id: AtomicI64,
}

impl MockTeamMembershipRepository {
    pub fn new() -> Self {
        Self {
            memberships: RwLock::new(HashMap::new()),
            next_id: AtomicI64::new(1),
        }
    }

    /// Inserts a row with an arbitrary role string, bypassing the typed
    /// taxonomy. Exists so tests can simulate out-of-band writes and
    /// corrupted data.
    pub async fn create_raw(
        &self,
        team_id: i64,
        user_id: i64,
        role: &str,
    ) -> Result<TeamMembership, AuthzError> {
        let id = self.next_id.fetch_add(1, Ordering::SeqCst);
        let now = Utc::now();
        let membership = TeamMembership {
            id,
            team_id,
            user_id,
            role: role.to_owned(),
            joined_at: now,
            updated_at: now,
        };

        let mut memberships = self
            .memberships
            .write()
            .map_err(|_| AuthzError::DatabaseError("lock poisoned".into()))?;
        memberships.insert((team_id, user_id), membership.clone());

        Ok(membership)
    }
}

impl Default for MockTeamMembershipRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl TeamMembershipRepository for MockTeamMembershipRepository {
    async fn create(&self, data: CreateMembership) -> Result<TeamMembership, AuthzError> {
        let id = self.next_id.fetch_add(1, Ordering::SeqCst);
        let now = Utc::now();
        let membership = TeamMembership {
            id,
            team_id: data.team_id,
            user_id: data.user_id,
            role: data.role.as_str().to_owned(),
            joined_at: now,
            updated_at: now,
        };

        let mut memberships = self
            .memberships
            .write()
            .map_err(|_| AuthzError::DatabaseError("lock poisoned".into()))?;

        // mirrors the unique (team_id, user_id) index of the real schema
        if memberships.contains_key(&(data.team_id, data.user_id)) {
            return Err(AuthzError::DatabaseError(
                "membership already exists".into(),
            ));
        }

        memberships.insert((data.team_id, data.user_id), membership.clone());

        Ok(membership)
    }

    async fn find_by_team_and_user(
        &self,
        team_id: i64,
        user_id: i64,
    ) -> Result<Option<TeamMembership>, AuthzError> {
        let memberships = self
            .memberships
            .read()
            .map_err(|_| AuthzError::DatabaseError("lock poisoned".into()))?;
        Ok(memberships.get(&(team_id, user_id)).cloned())
    }

    async fn find_by_team(&self, team_id: i64) -> Result<Vec<TeamMembership>, AuthzError> {
        let memberships = self
            .memberships
            .read()
            .map_err(|_| AuthzError::DatabaseError("lock poisoned".into()))?;
        let mut rows: Vec<TeamMembership> = memberships
            .values()
            .filter(|m| m.team_id == team_id)
            .cloned()
            .collect();
        rows.sort_by_key(|m| m.id);
        Ok(rows)
    }

    async fn find_by_user(&self, user_id: i64) -> Result<Vec<TeamMembership>, AuthzError> {
        let memberships = self
            .memberships
            .read()
            .map_err(|_| AuthzError::DatabaseError("lock poisoned".into()))?;
        let mut rows: Vec<TeamMembership> = memberships
            .values()
            .filter(|m| m.user_id == user_id)
            .cloned()
            .collect();
        rows.sort_by_key(|m| m.id);
        Ok(rows)
    }

    async fn update_role(
        &self,
        team_id: i64,
        user_id: i64,
        role: Role,
    ) -> Result<TeamMembership, AuthzError> {
        let mut memberships = self
            .memberships
            .write()
            .map_err(|_| AuthzError::DatabaseError("lock poisoned".into()))?;

        let membership = memberships
            .get_mut(&(team_id, user_id))
            .ok_or(AuthzError::NotFound)?;

        membership.role = role.as_str().to_owned();
        membership.updated_at = Utc::now();

        Ok(membership.clone())
    }

    async fn delete_by_team_and_user(
        &self,
        team_id: i64,
        user_id: i64,
    ) -> Result<(), AuthzError> {
        let mut memberships = self
            .memberships
            .write()
            .map_err(|_| AuthzError::DatabaseError("lock poisoned".into()))?;
        memberships.remove(&(team_id, user_id));
        Ok(())
    }

    async fn transfer_owner(
        &self,
        team_id: i64,
        from_user_id: i64,
        to_user_id: i64,
    ) -> Result<(), AuthzError> {
        // both writes happen under one lock: all-or-nothing
        let mut memberships = self
            .memberships
            .write()
            .map_err(|_| AuthzError::DatabaseError("lock poisoned".into()))?;

        if !memberships.contains_key(&(team_id, from_user_id))
            || !memberships.contains_key(&(team_id, to_user_id))
        {
            return Err(AuthzError::NotFound);
        }

        let now = Utc::now();
        if let Some(m) = memberships.get_mut(&(team_id, to_user_id)) {
            m.role = Role::Owner.as_str().to_owned();
            m.updated_at = now;
        }
        if let Some(m) = memberships.get_mut(&(team_id, from_user_id)) {
            m.role = Role::Editor.as_str().to_owned();
            m.updated_at = now;
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_create_and_find() {
        let repo = MockTeamMembershipRepository::new();

        let created = repo
            .create(CreateMembership::new(1, 2, Role::Editor))
            .await
            .unwrap();
        assert_eq!(created.role, "editor");

        let found = repo.find_by_team_and_user(1, 2).await.unwrap().unwrap();
        assert_eq!(found.id, created.id);

        assert!(repo.find_by_team_and_user(1, 3).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_duplicate_create_rejected() {
        let repo = MockTeamMembershipRepository::new();
        repo.create(CreateMembership::new(1, 2, Role::Editor))
            .await
            .unwrap();

        let result = repo.create(CreateMembership::new(1, 2, Role::Viewer)).await;
        assert!(matches!(result, Err(AuthzError::DatabaseError(_))));
    }

    #[tokio::test]
    async fn test_update_role_missing_row() {
        let repo = MockTeamMembershipRepository::new();
        let result = repo.update_role(1, 2, Role::Viewer).await;
        assert_eq!(result.unwrap_err(), AuthzError::NotFound);
    }

    #[tokio::test]
    async fn test_transfer_owner_requires_both_rows() {
        let repo = MockTeamMembershipRepository::new();
        repo.create(CreateMembership::owner(1, 10)).await.unwrap();

        let result = repo.transfer_owner(1, 10, 99).await;
        assert_eq!(result.unwrap_err(), AuthzError::NotFound);

        // nothing changed
        let owner = repo.find_by_team_and_user(1, 10).await.unwrap().unwrap();
        assert_eq!(owner.role, "owner");
    }

    #[tokio::test]
    async fn test_transfer_owner_swaps_roles() {
        let repo = MockTeamMembershipRepository::new();
        repo.create(CreateMembership::owner(1, 10)).await.unwrap();
        repo.create(CreateMembership::new(1, 20, Role::Admin))
            .await
            .unwrap();

        repo.transfer_owner(1, 10, 20).await.unwrap();

        let old = repo.find_by_team_and_user(1, 10).await.unwrap().unwrap();
        let new = repo.find_by_team_and_user(1, 20).await.unwrap().unwrap();
        assert_eq!(old.role, "editor");
        assert_eq!(new.role, "owner");
    }
}
