mod common;

use chrono::{Duration, DurationRound, Utc};
use shortlink::domain::entities::NewLink;
use shortlink::domain::repositories::{ExpirationRepository, LinkRepository};
use shortlink::infrastructure::persistence::{PgExpirationRepository, PgLinkRepository};
use sqlx::PgPool;
use std::sync::Arc;

async fn create_test_link(pool: &PgPool, alias: &str, owner_id: i64) {
    PgLinkRepository::new(Arc::new(pool.clone()))
        .create(NewLink {
            alias: alias.to_string(),
            original_url: "https://example.com".to_string(),
            owner_id,
            password_hash: None,
            is_dangerous: false,
            expire_at: None,
        })
        .await
        .unwrap();
}

#[sqlx::test]
async fn test_find(pool: PgPool) {
    let expire_at = Utc::now().duration_trunc(Duration::seconds(1)).unwrap();
    common::create_test_expiration(&pool, "dated", expire_at).await;
    let repo = PgExpirationRepository::new(Arc::new(pool));

    let found = repo.find("dated").await.unwrap().unwrap();
    assert_eq!(found.alias, "dated");
    assert_eq!(found.expire_at, expire_at);

    assert!(repo.find("undated").await.unwrap().is_none());
}

#[sqlx::test]
async fn test_find_many(pool: PgPool) {
    let now = Utc::now();
    common::create_test_expiration(&pool, "one", now).await;
    common::create_test_expiration(&pool, "two", now + Duration::days(1)).await;
    common::create_test_expiration(&pool, "unrelated", now).await;
    let repo = PgExpirationRepository::new(Arc::new(pool));

    let aliases = vec!["one".to_string(), "two".to_string(), "missing".to_string()];
    let mut found: Vec<String> = repo
        .find_many(&aliases)
        .await
        .unwrap()
        .into_iter()
        .map(|e| e.alias)
        .collect();
    found.sort();

    assert_eq!(found, vec!["one", "two"]);
}

#[sqlx::test]
async fn test_find_many_empty_input(pool: PgPool) {
    common::create_test_expiration(&pool, "one", Utc::now()).await;
    let repo = PgExpirationRepository::new(Arc::new(pool));

    assert!(repo.find_many(&[]).await.unwrap().is_empty());
}

#[sqlx::test]
async fn test_prune_orphans(pool: PgPool) {
    let owner_id = common::create_test_user(&pool, "alice").await;
    create_test_link(&pool, "live", owner_id).await;

    let now = Utc::now();
    common::create_test_expiration(&pool, "live", now + Duration::days(1)).await;
    common::create_test_expiration(&pool, "orphan1", now).await;
    common::create_test_expiration(&pool, "orphan2", now).await;
    let repo = PgExpirationRepository::new(Arc::new(pool));

    assert_eq!(repo.prune_orphans().await.unwrap(), 2);

    assert!(repo.find("live").await.unwrap().is_some());
    assert!(repo.find("orphan1").await.unwrap().is_none());
    assert!(repo.find("orphan2").await.unwrap().is_none());

    assert_eq!(repo.prune_orphans().await.unwrap(), 0);
}
