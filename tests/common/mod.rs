#![allow(dead_code)]

use async_trait::async_trait;
use axum::extract::ConnectInfo;
use axum_test::TestServer;
use chrono::{DateTime, Utc};
use serde_json::json;
use sqlx::PgPool;
use std::collections::HashMap;
use std::net::SocketAddr;
use std::sync::Mutex;
use std::sync::atomic::{AtomicI64, Ordering};
use std::sync::Arc;
use tower::Layer;
use tower_sessions::MemoryStore;

use shortlink::domain::entities::{Expiration, Link, NewLink, NewUser, User};
use shortlink::domain::repositories::{ExpirationRepository, LinkRepository, UserRepository};
use shortlink::error::AppError;
use shortlink::routes::{RouterSettings, router};
use shortlink::state::AppState;
use shortlink::utils::password::hash_password;

/// Inserts an account row and returns its id.
pub async fn create_test_user(pool: &PgPool, username: &str) -> i64 {
    sqlx::query_scalar(
        "INSERT INTO users (username, password_hash, email) VALUES ($1, $2, $3) RETURNING id",
    )
    .bind(username)
    .bind("$argon2id$v=19$m=19456,t=2,p=1$c2FsdHNhbHQ$aGFzaA")
    .bind(format!("{username}@example.com"))
    .fetch_one(pool)
    .await
    .unwrap()
}

/// Inserts an expiration row directly, with or without a matching link.
pub async fn create_test_expiration(pool: &PgPool, alias: &str, expire_at: DateTime<Utc>) {
    sqlx::query("INSERT INTO link_expirations (alias, expire_at) VALUES ($1, $2)")
        .bind(alias)
        .bind(expire_at)
        .execute(pool)
        .await
        .unwrap();
}

/// In-memory stand-in for the three PostgreSQL stores.
#[derive(Default)]
pub struct InMemoryDb {
    next_id: AtomicI64,
    users: Mutex<Vec<User>>,
    links: Mutex<Vec<Link>>,
    expirations: Mutex<HashMap<String, DateTime<Utc>>>,
}

impl InMemoryDb {
    fn next_id(&self) -> i64 {
        self.next_id.fetch_add(1, Ordering::SeqCst) + 1
    }

    pub fn link(&self, alias: &str) -> Option<Link> {
        self.links
            .lock()
            .unwrap()
            .iter()
            .find(|l| l.alias == alias)
            .cloned()
    }

    pub fn links(&self) -> Vec<Link> {
        self.links.lock().unwrap().clone()
    }

    pub fn expiration(&self, alias: &str) -> Option<DateTime<Utc>> {
        self.expirations.lock().unwrap().get(alias).copied()
    }

    pub fn user(&self, username: &str) -> Option<User> {
        self.users
            .lock()
            .unwrap()
            .iter()
            .find(|u| u.username == username)
            .cloned()
    }

    pub fn remove_user(&self, username: &str) {
        self.users.lock().unwrap().retain(|u| u.username != username);
    }

    /// Inserts an expiration record without a matching link.
    pub fn insert_expiration(&self, alias: &str, expire_at: DateTime<Utc>) {
        self.expirations
            .lock()
            .unwrap()
            .insert(alias.to_string(), expire_at);
    }
}

#[async_trait]
impl UserRepository for InMemoryDb {
    async fn create(&self, new_user: NewUser) -> Result<User, AppError> {
        let mut users = self.users.lock().unwrap();
        if users.iter().any(|u| u.username == new_user.username) {
            return Err(AppError::conflict(
                "Username already exists.",
                json!({ "username": new_user.username }),
            ));
        }

        let user = User::new(
            self.next_id(),
            new_user.username,
            new_user.password_hash,
            new_user.email,
            Utc::now(),
        );
        users.push(user.clone());
        Ok(user)
    }

    async fn find_by_username(&self, username: &str) -> Result<Option<User>, AppError> {
        Ok(self.user(username))
    }

    async fn list(&self) -> Result<Vec<User>, AppError> {
        Ok(self.users.lock().unwrap().clone())
    }
}

#[async_trait]
impl LinkRepository for InMemoryDb {
    async fn create(&self, new_link: NewLink) -> Result<Link, AppError> {
        let mut links = self.links.lock().unwrap();
        if links.iter().any(|l| l.alias == new_link.alias) {
            return Err(AppError::conflict(
                "Alias already exists.",
                json!({ "alias": new_link.alias }),
            ));
        }

        let link = Link::new(
            self.next_id(),
            new_link.alias.clone(),
            new_link.original_url,
            new_link.owner_id,
            new_link.password_hash,
            new_link.is_dangerous,
            Utc::now(),
        );
        links.push(link.clone());

        let mut expirations = self.expirations.lock().unwrap();
        match new_link.expire_at {
            Some(expire_at) => {
                expirations.insert(new_link.alias, expire_at);
            }
            None => {
                expirations.remove(&new_link.alias);
            }
        }

        Ok(link)
    }

    async fn find_by_alias(&self, alias: &str) -> Result<Option<Link>, AppError> {
        Ok(self.link(alias))
    }

    async fn list_by_owner(&self, owner_id: i64) -> Result<Vec<Link>, AppError> {
        let mut owned: Vec<Link> = self
            .links
            .lock()
            .unwrap()
            .iter()
            .filter(|l| l.owner_id == owner_id)
            .cloned()
            .collect();
        owned.sort_by(|a, b| b.id.cmp(&a.id));
        Ok(owned)
    }

    async fn delete_owned(&self, alias: &str, owner_id: i64) -> Result<bool, AppError> {
        let mut links = self.links.lock().unwrap();
        let before = links.len();
        links.retain(|l| !(l.alias == alias && l.owner_id == owner_id));
        let deleted = links.len() != before;

        if deleted {
            self.expirations.lock().unwrap().remove(alias);
        }

        Ok(deleted)
    }
}

#[async_trait]
impl ExpirationRepository for InMemoryDb {
    async fn find(&self, alias: &str) -> Result<Option<Expiration>, AppError> {
        Ok(self
            .expiration(alias)
            .map(|t| Expiration::new(alias.to_string(), t)))
    }

    async fn find_many(&self, aliases: &[String]) -> Result<Vec<Expiration>, AppError> {
        let expirations = self.expirations.lock().unwrap();
        Ok(aliases
            .iter()
            .filter_map(|a| expirations.get(a).map(|t| Expiration::new(a.clone(), *t)))
            .collect())
    }

    async fn prune_orphans(&self) -> Result<u64, AppError> {
        let links = self.links.lock().unwrap();
        let mut expirations = self.expirations.lock().unwrap();
        let before = expirations.len();
        expirations.retain(|alias, _| links.iter().any(|l| &l.alias == alias));
        Ok((before - expirations.len()) as u64)
    }
}

#[derive(Clone)]
struct MockConnectInfoLayer;

impl<S> Layer<S> for MockConnectInfoLayer {
    type Service = MockConnectInfoService<S>;

    fn layer(&self, inner: S) -> Self::Service {
        MockConnectInfoService { inner }
    }
}

#[derive(Clone)]
struct MockConnectInfoService<S> {
    inner: S,
}

impl<S, B> tower::Service<axum::http::Request<B>> for MockConnectInfoService<S>
where
    S: tower::Service<axum::http::Request<B>> + Clone + Send + 'static,
    S::Future: Send + 'static,
    B: Send + 'static,
{
    type Response = S::Response;
    type Error = S::Error;
    type Future = S::Future;

    fn poll_ready(
        &mut self,
        cx: &mut std::task::Context<'_>,
    ) -> std::task::Poll<Result<(), Self::Error>> {
        self.inner.poll_ready(cx)
    }

    fn call(&mut self, mut req: axum::http::Request<B>) -> Self::Future {
        let addr: SocketAddr = "127.0.0.1:12345".parse().unwrap();
        req.extensions_mut().insert(ConnectInfo(addr));
        self.inner.call(req)
    }
}

pub struct TestApp {
    pub server: TestServer,
    pub db: Arc<InMemoryDb>,
}

/// Builds the full router over in-memory stores, with a cookie-saving client.
pub fn spawn_app() -> TestApp {
    let db = Arc::new(InMemoryDb::default());
    let state = AppState::new(db.clone(), db.clone(), db.clone());

    let settings = RouterSettings {
        secret_key: "test-secret-key".to_string(),
        secure_cookie: false,
        behind_proxy: false,
        html_snippet: None,
    };

    let app = router(state, MemoryStore::default(), settings).layer(MockConnectInfoLayer);

    let server = TestServer::builder().save_cookies().build(app).unwrap();

    TestApp { server, db }
}

impl TestApp {
    /// Creates an account directly in the store.
    pub async fn seed_user(&self, username: &str, password: &str) -> User {
        UserRepository::create(
            self.db.as_ref(),
            NewUser {
                username: username.to_string(),
                password_hash: hash_password(password).unwrap(),
                email: format!("{username}@example.com"),
            },
        )
        .await
        .unwrap()
    }

    /// Creates a link directly in the store.
    pub async fn seed_link(
        &self,
        owner: &User,
        alias: &str,
        url: &str,
        password: Option<&str>,
        dangerous: bool,
        expire_at: Option<DateTime<Utc>>,
    ) -> Link {
        LinkRepository::create(
            self.db.as_ref(),
            NewLink {
                alias: alias.to_string(),
                original_url: url.to_string(),
                owner_id: owner.id,
                password_hash: password.map(|p| hash_password(p).unwrap()),
                is_dangerous: dangerous,
                expire_at,
            },
        )
        .await
        .unwrap()
    }

    pub async fn login(&self, username: &str, password: &str) {
        let response = self
            .server
            .post("/login")
            .form(&[("username", username), ("password", password)])
            .await;

        assert_eq!(response.header("location"), "/dashboard");
    }

    pub async fn logout(&self) {
        self.server.get("/logout").await;
    }
}
