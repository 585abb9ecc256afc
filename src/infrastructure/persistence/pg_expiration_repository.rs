//! PostgreSQL implementation of expiration repository.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use std::sync::Arc;

use crate::domain::entities::Expiration;
use crate::domain::repositories::ExpirationRepository;
use crate::error::AppError;

#[derive(sqlx::FromRow)]
struct ExpirationRow {
    alias: String,
    expire_at: DateTime<Utc>,
}

impl From<ExpirationRow> for Expiration {
    fn from(r: ExpirationRow) -> Self {
        Expiration::new(r.alias, r.expire_at)
    }
}

/// PostgreSQL repository for the `link_expirations` table.
pub struct PgExpirationRepository {
    pool: Arc<PgPool>,
}

impl PgExpirationRepository {
    /// Creates a new repository with a database connection pool.
    pub fn new(pool: Arc<PgPool>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ExpirationRepository for PgExpirationRepository {
    async fn find(&self, alias: &str) -> Result<Option<Expiration>, AppError> {
        let row = sqlx::query_as::<_, ExpirationRow>(
            "SELECT alias, expire_at FROM link_expirations WHERE alias = $1",
        )
        .bind(alias)
        .fetch_optional(self.pool.as_ref())
        .await?;

        Ok(row.map(Expiration::from))
    }

    async fn find_many(&self, aliases: &[String]) -> Result<Vec<Expiration>, AppError> {
        if aliases.is_empty() {
            return Ok(Vec::new());
        }

        let rows = sqlx::query_as::<_, ExpirationRow>(
            "SELECT alias, expire_at FROM link_expirations WHERE alias = ANY($1)",
        )
        .bind(aliases)
        .fetch_all(self.pool.as_ref())
        .await?;

        Ok(rows.into_iter().map(Expiration::from).collect())
    }

    async fn prune_orphans(&self) -> Result<u64, AppError> {
        let result = sqlx::query(
            r#"
            DELETE FROM link_expirations e
            WHERE NOT EXISTS (SELECT 1 FROM links l WHERE l.alias = e.alias)
            "#,
        )
        .execute(self.pool.as_ref())
        .await?;

        Ok(result.rows_affected())
    }
}
