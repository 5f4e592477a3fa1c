//! Embedded database migrations for `SQLite`.
//!
//! Migrations are embedded at compile time and run programmatically,
//! tracked in the `_teamguard_migrations` table.
//!
//! # Example
//!
//! ```rust,ignore
//! use sqlx::SqlitePool;
//! use teamguard::sqlite::migrations;
//!
//! async fn setup(pool: &SqlitePool) -> Result<(), sqlx::Error> {
//!     migrations::run(pool).await
//! }
//! ```

use sqlx::{Executor, SqlitePool};

const MIGRATIONS: &[(&str, &str)] = &[(
    "20250110000001_create_team_members_table",
    include_str!("../../migrations_sqlite/20250110000001_create_team_members_table.sql"),
)];

/// Runs all pending migrations.
pub async fn run(pool: &SqlitePool) -> Result<(), sqlx::Error> {
    pool.execute(
        r"
        CREATE TABLE IF NOT EXISTS _teamguard_migrations (
            name TEXT PRIMARY KEY,
            applied_at TEXT NOT NULL DEFAULT (strftime('%Y-%m-%dT%H:%M:%fZ', 'now'))
        )
        ",
    )
    .await?;

    for (name, sql) in MIGRATIONS {
        let applied: bool = sqlx::query_scalar(
            "SELECT EXISTS(SELECT 1 FROM _teamguard_migrations WHERE name = ?)",
        )
        .bind(*name)
        .fetch_one(pool)
        .await?;

        if !applied {
            // SQLite executes one statement at a time; the bundled
            // migrations keep semicolons out of string literals so naive
            // splitting is safe
            for statement in sql.split(';') {
                let trimmed = statement.trim();
                if !trimmed.is_empty() {
                    pool.execute(trimmed).await?;
                }
            }

            sqlx::query("INSERT INTO _teamguard_migrations (name) VALUES (?)")
                .bind(*name)
                .execute(pool)
                .await?;
        }
    }

    Ok(())
}
