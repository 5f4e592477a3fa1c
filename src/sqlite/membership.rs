//! `SQLite` implementation of [`TeamMembershipRepository`].

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{FromRow, SqlitePool};

use crate::rbac::Role;
use crate::teams::{CreateMembership, TeamMembership, TeamMembershipRepository};
use crate::AuthzError;

/// `SQLite`-backed membership repository.
#[derive(Clone)]
pub struct SqliteTeamMembershipRepository {
    pool: SqlitePool,
}

impl SqliteTeamMembershipRepository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[derive(FromRow)]
struct MemberRecord {
    id: i64,
    team_id: i64,
    user_id: i64,
    role: String,
    joined_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl From<MemberRecord> for TeamMembership {
    fn from(row: MemberRecord) -> Self {
        TeamMembership {
            id: row.id,
            team_id: row.team_id,
            user_id: row.user_id,
            role: row.role,
            joined_at: row.joined_at,
            updated_at: row.updated_at,
        }
    }
}

#[async_trait]
impl TeamMembershipRepository for SqliteTeamMembershipRepository {
    #[cfg_attr(feature = "tracing", tracing::instrument(skip(self), err))]
    async fn create(&self, data: CreateMembership) -> Result<TeamMembership, AuthzError> {
        let row: MemberRecord = sqlx::query_as(
            r"
            INSERT INTO team_members (team_id, user_id, role)
            VALUES (?, ?, ?)
            RETURNING id, team_id, user_id, role, joined_at, updated_at
            ",
        )
        .bind(data.team_id)
        .bind(data.user_id)
        .bind(data.role.as_str())
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            log::error!(target: "teamguard", "msg=\"database error\", operation=\"create_membership\", error=\"{e}\"");
            AuthzError::DatabaseError(e.to_string())
        })?;

        Ok(row.into())
    }

    #[cfg_attr(feature = "tracing", tracing::instrument(skip(self), err))]
    async fn find_by_team_and_user(
        &self,
        team_id: i64,
        user_id: i64,
    ) -> Result<Option<TeamMembership>, AuthzError> {
        let row: Option<MemberRecord> = sqlx::query_as(
            "SELECT id, team_id, user_id, role, joined_at, updated_at FROM team_members WHERE team_id = ? AND user_id = ?",
        )
        .bind(team_id)
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            log::error!(target: "teamguard", "msg=\"database error\", operation=\"find_membership\", error=\"{e}\"");
            AuthzError::DatabaseError(e.to_string())
        })?;

        Ok(row.map(Into::into))
    }

    #[cfg_attr(feature = "tracing", tracing::instrument(skip(self), err))]
    async fn find_by_team(&self, team_id: i64) -> Result<Vec<TeamMembership>, AuthzError> {
        let rows: Vec<MemberRecord> = sqlx::query_as(
            "SELECT id, team_id, user_id, role, joined_at, updated_at FROM team_members WHERE team_id = ? ORDER BY joined_at ASC",
        )
        .bind(team_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            log::error!(target: "teamguard", "msg=\"database error\", operation=\"find_members_by_team\", error=\"{e}\"");
            AuthzError::DatabaseError(e.to_string())
        })?;

        Ok(rows.into_iter().map(Into::into).collect())
    }

    #[cfg_attr(feature = "tracing", tracing::instrument(skip(self), err))]
    async fn find_by_user(&self, user_id: i64) -> Result<Vec<TeamMembership>, AuthzError> {
        let rows: Vec<MemberRecord> = sqlx::query_as(
            "SELECT id, team_id, user_id, role, joined_at, updated_at FROM team_members WHERE user_id = ? ORDER BY joined_at ASC",
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            log::error!(target: "teamguard", "msg=\"database error\", operation=\"find_members_by_user\", error=\"{e}\"");
            AuthzError::DatabaseError(e.to_string())
        })?;

        Ok(rows.into_iter().map(Into::into).collect())
    }

    #[cfg_attr(feature = "tracing", tracing::instrument(skip(self), err))]
    async fn update_role(
        &self,
        team_id: i64,
        user_id: i64,
        role: Role,
    ) -> Result<TeamMembership, AuthzError> {
        let now = Utc::now();

        let row: MemberRecord = sqlx::query_as(
            r"
            UPDATE team_members SET role = ?, updated_at = ?
            WHERE team_id = ? AND user_id = ?
            RETURNING id, team_id, user_id, role, joined_at, updated_at
            ",
        )
        .bind(role.as_str())
        .bind(now)
        .bind(team_id)
        .bind(user_id)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| match e {
            sqlx::Error::RowNotFound => AuthzError::NotFound,
            _ => {
                log::error!(target: "teamguard", "msg=\"database error\", operation=\"update_member_role\", error=\"{e}\"");
                AuthzError::DatabaseError(e.to_string())
            }
        })?;

        Ok(row.into())
    }

    #[cfg_attr(feature = "tracing", tracing::instrument(skip(self), err))]
    async fn delete_by_team_and_user(&self, team_id: i64, user_id: i64) -> Result<(), AuthzError> {
        sqlx::query("DELETE FROM team_members WHERE team_id = ? AND user_id = ?")
            .bind(team_id)
            .bind(user_id)
            .execute(&self.pool)
            .await
            .map_err(|e| {
                log::error!(target: "teamguard", "msg=\"database error\", operation=\"delete_membership\", error=\"{e}\"");
                AuthzError::DatabaseError(e.to_string())
            })?;

        Ok(())
    }

    #[cfg_attr(feature = "tracing", tracing::instrument(skip(self), err))]
    async fn transfer_owner(
        &self,
        team_id: i64,
        from_user_id: i64,
        to_user_id: i64,
    ) -> Result<(), AuthzError> {
        // both role writes commit together or not at all
        let mut tx = self.pool.begin().await.map_err(|e| {
            log::error!(target: "teamguard", "msg=\"database error\", operation=\"transfer_owner\", error=\"{e}\"");
            AuthzError::DatabaseError(e.to_string())
        })?;

        let now = Utc::now();

        let promoted = sqlx::query(
            "UPDATE team_members SET role = ?, updated_at = ? WHERE team_id = ? AND user_id = ?",
        )
        .bind(Role::Owner.as_str())
        .bind(now)
        .bind(team_id)
        .bind(to_user_id)
        .execute(&mut *tx)
        .await
        .map_err(|e| AuthzError::DatabaseError(e.to_string()))?;

        let demoted = sqlx::query(
            "UPDATE team_members SET role = ?, updated_at = ? WHERE team_id = ? AND user_id = ?",
        )
        .bind(Role::Editor.as_str())
        .bind(now)
        .bind(team_id)
        .bind(from_user_id)
        .execute(&mut *tx)
        .await
        .map_err(|e| AuthzError::DatabaseError(e.to_string()))?;

        if promoted.rows_affected() == 0 || demoted.rows_affected() == 0 {
            tx.rollback()
                .await
                .map_err(|e| AuthzError::DatabaseError(e.to_string()))?;
            return Err(AuthzError::NotFound);
        }

        tx.commit().await.map_err(|e| {
            log::error!(target: "teamguard", "msg=\"database error\", operation=\"transfer_owner\", error=\"{e}\"");
            AuthzError::DatabaseError(e.to_string())
        })?;

        Ok(())
    }
}
