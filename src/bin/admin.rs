//! CLI administration tool for shortlink.
//!
//! Provides account listing, statistics and maintenance commands that work
//! directly against the database.
//!
//! # Usage
//!
//! ```bash
//! # View statistics
//! cargo run --bin admin -- stats
//!
//! # List registered users
//! cargo run --bin admin -- user list
//!
//! # Remove expiration records whose link no longer exists
//! cargo run --bin admin -- expirations prune
//!
//! # Check database connection
//! cargo run --bin admin -- db check
//!
//! # Remove expired sessions
//! cargo run --bin admin -- db prune-sessions
//! ```
//!
//! # Environment Variables
//!
//! - `DATABASE_URL`, or `DB_HOST`/`DB_PORT`/`DB_USER`/`DB_PASSWORD`/`DB_NAME`

use shortlink::config::{Config, mask_connection_string};
use shortlink::domain::repositories::{ExpirationRepository, UserRepository};
use shortlink::infrastructure::persistence::{PgExpirationRepository, PgUserRepository};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colored::*;
use dialoguer::Confirm;
use sqlx::PgPool;
use std::sync::Arc;
use tower_sessions::session_store::ExpiredDeletion;
use tower_sessions_sqlx_store::PostgresStore;

/// CLI tool for managing shortlink.
#[derive(Parser)]
#[command(name = "admin")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

/// Top-level command groups.
#[derive(Subcommand)]
enum Commands {
    /// Show statistics
    Stats,

    /// Inspect accounts
    User {
        #[command(subcommand)]
        action: UserAction,
    },

    /// Maintain expiration records
    Expirations {
        #[command(subcommand)]
        action: ExpirationAction,
    },

    /// Database operations
    Db {
        #[command(subcommand)]
        action: DbAction,
    },
}

#[derive(Subcommand)]
enum UserAction {
    /// List all users
    List,
}

#[derive(Subcommand)]
enum ExpirationAction {
    /// Delete expiration records whose alias has no link
    Prune {
        /// Skip confirmation prompt
        #[arg(short = 'y', long)]
        yes: bool,
    },
}

/// Database operation subcommands.
#[derive(Subcommand)]
enum DbAction {
    /// Check database connection
    Check,

    /// Show database info
    Info,

    /// Delete expired sessions
    PruneSessions,
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    let database_url = Config::load_database_url()?;

    let pool = PgPool::connect(&database_url)
        .await
        .with_context(|| {
            format!(
                "Failed to connect to database {}",
                mask_connection_string(&database_url)
            )
        })?;

    match cli.command {
        Commands::Stats => handle_stats(&pool).await?,
        Commands::User { action } => handle_user_action(action, &pool).await?,
        Commands::Expirations { action } => handle_expiration_action(action, &pool).await?,
        Commands::Db { action } => handle_db_action(action, &pool).await?,
    }

    Ok(())
}

/// Displays system statistics.
///
/// Shows:
/// - Number of users
/// - Number of links, and how many are password protected or dangerous
/// - Number of expiration records, expired ones, and orphans
async fn handle_stats(pool: &PgPool) -> Result<()> {
    println!("{}", "📊 Statistics".bright_blue().bold());
    println!();

    let users_count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM users")
        .fetch_one(pool)
        .await?;

    let links_count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM links")
        .fetch_one(pool)
        .await?;

    let protected_count: i64 =
        sqlx::query_scalar("SELECT COUNT(*) FROM links WHERE password_hash IS NOT NULL")
            .fetch_one(pool)
            .await?;

    let dangerous_count: i64 =
        sqlx::query_scalar("SELECT COUNT(*) FROM links WHERE is_dangerous")
            .fetch_one(pool)
            .await?;

    let expirations_count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM link_expirations")
        .fetch_one(pool)
        .await?;

    let expired_count: i64 =
        sqlx::query_scalar("SELECT COUNT(*) FROM link_expirations WHERE expire_at < NOW()")
            .fetch_one(pool)
            .await?;

    let orphan_count = count_orphan_expirations(pool).await?;

    println!(
        "  Users:        {}",
        users_count.to_string().bright_green().bold()
    );
    println!(
        "  Links:        {}",
        links_count.to_string().bright_green().bold()
    );
    println!(
        "    protected:  {}",
        protected_count.to_string().bright_white()
    );
    println!(
        "    dangerous:  {}",
        dangerous_count.to_string().bright_white()
    );
    println!(
        "  Expirations:  {}",
        expirations_count.to_string().bright_green().bold()
    );
    println!("    expired:    {}", expired_count.to_string().yellow());
    println!("    orphaned:   {}", orphan_count.to_string().red());
    println!();

    Ok(())
}

/// Dispatches account commands.
async fn handle_user_action(action: UserAction, pool: &PgPool) -> Result<()> {
    let repo = PgUserRepository::new(Arc::new(pool.clone()));

    match action {
        UserAction::List => list_users(&repo).await?,
    }

    Ok(())
}

/// Lists all registered users.
///
/// # Output Format
///
/// ```text
/// 👤 Users
///
///   ID  Username             Email                          Created
///   ───────────────────────────────────────────────────────────────────────────
///   1   alice                alice@example.com              2025-01-15 10:30
/// ```
async fn list_users(repo: &PgUserRepository) -> Result<()> {
    println!("{}", "👤 Users".bright_blue().bold());
    println!();

    let users = repo
        .list()
        .await
        .map_err(|e| anyhow::anyhow!("Failed to list users: {}", e))?;

    if users.is_empty() {
        println!("{}", "  No users found".yellow());
        return Ok(());
    }

    println!(
        "  {:<3} {:<20} {:<30} {:<20}",
        "ID".bright_white().bold(),
        "Username".bright_white().bold(),
        "Email".bright_white().bold(),
        "Created".bright_white().bold()
    );
    println!("  {}", "─".repeat(75).bright_black());

    for user in &users {
        println!(
            "  {:<3} {:<20} {:<30} {}",
            user.id.to_string().bright_black(),
            user.username.cyan(),
            user.email,
            user.created_at
                .format("%Y-%m-%d %H:%M")
                .to_string()
                .bright_black(),
        );
    }

    println!();
    println!("  Total: {}", users.len().to_string().bright_white().bold());
    println!();

    Ok(())
}

/// Dispatches expiration maintenance commands.
async fn handle_expiration_action(action: ExpirationAction, pool: &PgPool) -> Result<()> {
    match action {
        ExpirationAction::Prune { yes } => prune_expirations(pool, yes).await?,
    }

    Ok(())
}

/// Deletes expiration records left behind by links removed outside the app.
///
/// Requires confirmation unless `--yes` is given.
async fn prune_expirations(pool: &PgPool, skip_confirm: bool) -> Result<()> {
    println!("{}", "🧹 Prune orphaned expirations".bright_blue().bold());
    println!();

    let orphans = count_orphan_expirations(pool).await?;

    if orphans == 0 {
        println!("{}", "  Nothing to prune".green());
        return Ok(());
    }

    println!(
        "  Orphaned records: {}",
        orphans.to_string().bright_yellow().bold()
    );
    println!();

    if !skip_confirm {
        let confirmed = Confirm::new()
            .with_prompt("Delete these records?")
            .default(false)
            .interact()?;

        if !confirmed {
            println!("{}", "❌ Cancelled".red());
            return Ok(());
        }
    }

    let repo = PgExpirationRepository::new(Arc::new(pool.clone()));
    let deleted = repo
        .prune_orphans()
        .await
        .map_err(|e| anyhow::anyhow!("Failed to prune expirations: {}", e))?;

    println!();
    println!(
        "{} {}",
        "✅ Deleted".green().bold(),
        format!("{deleted} record(s)").bright_white()
    );
    println!();

    Ok(())
}

async fn count_orphan_expirations(pool: &PgPool) -> Result<i64> {
    let count: i64 = sqlx::query_scalar(
        r#"
        SELECT COUNT(*) FROM link_expirations e
        WHERE NOT EXISTS (SELECT 1 FROM links l WHERE l.alias = e.alias)
        "#,
    )
    .fetch_one(pool)
    .await?;

    Ok(count)
}

/// Handles database diagnostic commands.
async fn handle_db_action(action: DbAction, pool: &PgPool) -> Result<()> {
    match action {
        DbAction::Check => {
            println!("{}", "🔍 Checking database connection...".bright_blue());

            sqlx::query("SELECT 1").fetch_one(pool).await?;

            println!("{}", "✅ Database connection OK".green().bold());
        }
        DbAction::Info => {
            println!("{}", "ℹ️  Database Information".bright_blue().bold());
            println!();

            let version: String = sqlx::query_scalar("SELECT version()")
                .fetch_one(pool)
                .await?;

            println!("  PostgreSQL: {}", version.bright_white());
            println!();
        }
        DbAction::PruneSessions => {
            println!("{}", "🧹 Deleting expired sessions...".bright_blue());

            PostgresStore::new(pool.clone())
                .delete_expired()
                .await
                .context("Failed to delete expired sessions")?;

            println!("{}", "✅ Expired sessions deleted".green().bold());
        }
    }

    Ok(())
}
