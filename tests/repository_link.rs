mod common;

use chrono::{Duration, DurationRound, Utc};
use shortlink::domain::entities::NewLink;
use shortlink::domain::repositories::LinkRepository;
use shortlink::error::AppError;
use shortlink::infrastructure::persistence::PgLinkRepository;
use sqlx::PgPool;
use std::sync::Arc;

fn new_link(alias: &str, owner_id: i64) -> NewLink {
    NewLink {
        alias: alias.to_string(),
        original_url: "https://example.com".to_string(),
        owner_id,
        password_hash: None,
        is_dangerous: false,
        expire_at: None,
    }
}

async fn expiration_count(pool: &PgPool, alias: &str) -> i64 {
    sqlx::query_scalar("SELECT COUNT(*) FROM link_expirations WHERE alias = $1")
        .bind(alias)
        .fetch_one(pool)
        .await
        .unwrap()
}

async fn link_count(pool: &PgPool, alias: &str) -> i64 {
    sqlx::query_scalar("SELECT COUNT(*) FROM links WHERE alias = $1")
        .bind(alias)
        .fetch_one(pool)
        .await
        .unwrap()
}

#[sqlx::test]
async fn test_create_link(pool: PgPool) {
    let owner_id = common::create_test_user(&pool, "alice").await;
    let repo = PgLinkRepository::new(Arc::new(pool.clone()));

    let link = repo
        .create(NewLink {
            password_hash: Some("$argon2id$hash".to_string()),
            is_dangerous: true,
            ..new_link("abc123", owner_id)
        })
        .await
        .unwrap();

    assert_eq!(link.alias, "abc123");
    assert_eq!(link.original_url, "https://example.com");
    assert_eq!(link.owner_id, owner_id);
    assert!(link.is_protected());
    assert!(link.is_dangerous);
    assert_eq!(expiration_count(&pool, "abc123").await, 0);
}

#[sqlx::test]
async fn test_create_link_writes_expiration(pool: PgPool) {
    let owner_id = common::create_test_user(&pool, "alice").await;
    let repo = PgLinkRepository::new(Arc::new(pool.clone()));

    let expire_at = (Utc::now() + Duration::days(3))
        .duration_trunc(Duration::seconds(1))
        .unwrap();

    repo.create(NewLink {
        expire_at: Some(expire_at),
        ..new_link("dated", owner_id)
    })
    .await
    .unwrap();

    let stored: chrono::DateTime<Utc> =
        sqlx::query_scalar("SELECT expire_at FROM link_expirations WHERE alias = $1")
            .bind("dated")
            .fetch_one(&pool)
            .await
            .unwrap();

    assert_eq!(stored, expire_at);
}

#[sqlx::test]
async fn test_create_link_replaces_orphaned_expiration(pool: PgPool) {
    let owner_id = common::create_test_user(&pool, "alice").await;
    common::create_test_expiration(&pool, "reused", Utc::now() - Duration::days(1)).await;
    let repo = PgLinkRepository::new(Arc::new(pool.clone()));

    let expire_at = (Utc::now() + Duration::days(7))
        .duration_trunc(Duration::seconds(1))
        .unwrap();

    repo.create(NewLink {
        expire_at: Some(expire_at),
        ..new_link("reused", owner_id)
    })
    .await
    .unwrap();

    let stored: chrono::DateTime<Utc> =
        sqlx::query_scalar("SELECT expire_at FROM link_expirations WHERE alias = $1")
            .bind("reused")
            .fetch_one(&pool)
            .await
            .unwrap();

    assert_eq!(stored, expire_at);
}

#[sqlx::test]
async fn test_create_link_without_expiration_drops_orphaned_record(pool: PgPool) {
    let owner_id = common::create_test_user(&pool, "alice").await;
    common::create_test_expiration(&pool, "stale", Utc::now() - Duration::days(1)).await;
    let repo = PgLinkRepository::new(Arc::new(pool.clone()));

    repo.create(new_link("stale", owner_id)).await.unwrap();

    assert_eq!(expiration_count(&pool, "stale").await, 0);
}

#[sqlx::test]
async fn test_create_duplicate_alias_is_conflict(pool: PgPool) {
    let alice = common::create_test_user(&pool, "alice").await;
    let bob = common::create_test_user(&pool, "bob").await;
    let repo = PgLinkRepository::new(Arc::new(pool.clone()));

    repo.create(new_link("taken", alice)).await.unwrap();

    let err = repo
        .create(NewLink {
            original_url: "https://other.com".to_string(),
            expire_at: Some(Utc::now() + Duration::days(1)),
            ..new_link("taken", bob)
        })
        .await
        .unwrap_err();

    assert!(matches!(err, AppError::Conflict { .. }));
    assert_eq!(err.message(), "Alias already exists.");

    // The failed insert rolls back together with its expiration.
    assert_eq!(link_count(&pool, "taken").await, 1);
    assert_eq!(expiration_count(&pool, "taken").await, 0);

    let kept = repo.find_by_alias("taken").await.unwrap().unwrap();
    assert_eq!(kept.owner_id, alice);
    assert_eq!(kept.original_url, "https://example.com");
}

#[sqlx::test]
async fn test_find_by_alias_not_found(pool: PgPool) {
    let repo = PgLinkRepository::new(Arc::new(pool));

    let result = repo.find_by_alias("notfound").await;

    assert!(result.is_ok());
    assert!(result.unwrap().is_none());
}

#[sqlx::test]
async fn test_list_by_owner_newest_first(pool: PgPool) {
    let alice = common::create_test_user(&pool, "alice").await;
    let bob = common::create_test_user(&pool, "bob").await;
    let repo = PgLinkRepository::new(Arc::new(pool));

    repo.create(new_link("first", alice)).await.unwrap();
    repo.create(new_link("second", alice)).await.unwrap();
    repo.create(new_link("bobs", bob)).await.unwrap();

    let links = repo.list_by_owner(alice).await.unwrap();
    let aliases: Vec<&str> = links.iter().map(|l| l.alias.as_str()).collect();

    assert_eq!(aliases, vec!["second", "first"]);
}

#[sqlx::test]
async fn test_delete_owned_removes_link_and_expiration(pool: PgPool) {
    let owner_id = common::create_test_user(&pool, "alice").await;
    let repo = PgLinkRepository::new(Arc::new(pool.clone()));

    repo.create(NewLink {
        expire_at: Some(Utc::now() + Duration::days(1)),
        ..new_link("mine", owner_id)
    })
    .await
    .unwrap();

    assert!(repo.delete_owned("mine", owner_id).await.unwrap());

    assert_eq!(link_count(&pool, "mine").await, 0);
    assert_eq!(expiration_count(&pool, "mine").await, 0);
}

#[sqlx::test]
async fn test_delete_owned_by_other_user_is_noop(pool: PgPool) {
    let alice = common::create_test_user(&pool, "alice").await;
    let mallory = common::create_test_user(&pool, "mallory").await;
    let repo = PgLinkRepository::new(Arc::new(pool.clone()));

    repo.create(NewLink {
        expire_at: Some(Utc::now() + Duration::days(1)),
        ..new_link("alices", alice)
    })
    .await
    .unwrap();

    assert!(!repo.delete_owned("alices", mallory).await.unwrap());

    assert_eq!(link_count(&pool, "alices").await, 1);
    assert_eq!(expiration_count(&pool, "alices").await, 1);
}

#[sqlx::test]
async fn test_delete_unknown_alias_keeps_orphaned_expiration(pool: PgPool) {
    let owner_id = common::create_test_user(&pool, "alice").await;
    common::create_test_expiration(&pool, "ghost", Utc::now()).await;
    let repo = PgLinkRepository::new(Arc::new(pool.clone()));

    assert!(!repo.delete_owned("ghost", owner_id).await.unwrap());

    assert_eq!(expiration_count(&pool, "ghost").await, 1);
}
