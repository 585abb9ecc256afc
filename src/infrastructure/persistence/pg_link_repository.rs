//! PostgreSQL implementation of link repository.
//!
//! Links and their expiration records live in separate tables joined by alias
//! value. Every write touching both runs in one transaction.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde_json::json;
use sqlx::PgPool;
use std::sync::Arc;

use crate::domain::entities::{Link, NewLink};
use crate::domain::repositories::LinkRepository;
use crate::error::AppError;
use crate::utils::db_error::{LINKS_ALIAS_KEY, is_unique_violation_on};

#[derive(sqlx::FromRow)]
struct LinkRow {
    id: i64,
    alias: String,
    original_url: String,
    owner_id: i64,
    password_hash: Option<String>,
    is_dangerous: bool,
    created_at: DateTime<Utc>,
}

impl From<LinkRow> for Link {
    fn from(r: LinkRow) -> Self {
        Link::new(
            r.id,
            r.alias,
            r.original_url,
            r.owner_id,
            r.password_hash,
            r.is_dangerous,
            r.created_at,
        )
    }
}

/// PostgreSQL repository for link storage and retrieval.
pub struct PgLinkRepository {
    pool: Arc<PgPool>,
}

impl PgLinkRepository {
    /// Creates a new repository with a database connection pool.
    pub fn new(pool: Arc<PgPool>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl LinkRepository for PgLinkRepository {
    async fn create(&self, new_link: NewLink) -> Result<Link, AppError> {
        let mut tx = self.pool.begin().await?;

        let row = sqlx::query_as::<_, LinkRow>(
            r#"
            INSERT INTO links (alias, original_url, owner_id, password_hash, is_dangerous)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING id, alias, original_url, owner_id, password_hash, is_dangerous, created_at
            "#,
        )
        .bind(&new_link.alias)
        .bind(&new_link.original_url)
        .bind(new_link.owner_id)
        .bind(&new_link.password_hash)
        .bind(new_link.is_dangerous)
        .fetch_one(&mut *tx)
        .await
        .map_err(|e| {
            if is_unique_violation_on(&e, LINKS_ALIAS_KEY) {
                AppError::conflict(
                    "Alias already exists.",
                    json!({ "alias": new_link.alias }),
                )
            } else {
                AppError::from(e)
            }
        })?;

        match new_link.expire_at {
            Some(expire_at) => {
                sqlx::query(
                    r#"
                    INSERT INTO link_expirations (alias, expire_at)
                    VALUES ($1, $2)
                    ON CONFLICT (alias) DO UPDATE SET expire_at = EXCLUDED.expire_at
                    "#,
                )
                .bind(&row.alias)
                .bind(expire_at)
                .execute(&mut *tx)
                .await?;
            }
            None => {
                // A record left behind under this alias must not apply to the new link.
                sqlx::query("DELETE FROM link_expirations WHERE alias = $1")
                    .bind(&row.alias)
                    .execute(&mut *tx)
                    .await?;
            }
        }

        tx.commit().await?;

        Ok(row.into())
    }

    async fn find_by_alias(&self, alias: &str) -> Result<Option<Link>, AppError> {
        let row = sqlx::query_as::<_, LinkRow>(
            r#"
            SELECT id, alias, original_url, owner_id, password_hash, is_dangerous, created_at
            FROM links
            WHERE alias = $1
            "#,
        )
        .bind(alias)
        .fetch_optional(self.pool.as_ref())
        .await?;

        Ok(row.map(Link::from))
    }

    async fn list_by_owner(&self, owner_id: i64) -> Result<Vec<Link>, AppError> {
        let rows = sqlx::query_as::<_, LinkRow>(
            r#"
            SELECT id, alias, original_url, owner_id, password_hash, is_dangerous, created_at
            FROM links
            WHERE owner_id = $1
            ORDER BY created_at DESC, id DESC
            "#,
        )
        .bind(owner_id)
        .fetch_all(self.pool.as_ref())
        .await?;

        Ok(rows.into_iter().map(Link::from).collect())
    }

    async fn delete_owned(&self, alias: &str, owner_id: i64) -> Result<bool, AppError> {
        let mut tx = self.pool.begin().await?;

        let deleted = sqlx::query("DELETE FROM links WHERE alias = $1 AND owner_id = $2")
            .bind(alias)
            .bind(owner_id)
            .execute(&mut *tx)
            .await?
            .rows_affected()
            > 0;

        if deleted {
            sqlx::query("DELETE FROM link_expirations WHERE alias = $1")
                .bind(alias)
                .execute(&mut *tx)
                .await?;
        }

        tx.commit().await?;

        Ok(deleted)
    }
}
