/// Unique constraint guarding link aliases.
pub const LINKS_ALIAS_KEY: &str = "links_alias_key";

/// Unique constraint guarding usernames.
pub const USERS_USERNAME_KEY: &str = "users_username_key";

/// Returns true if `e` is a unique violation of the named constraint.
pub fn is_unique_violation_on(e: &sqlx::Error, constraint: &str) -> bool {
    let Some(db_err) = e.as_database_error() else {
        return false;
    };

    if !db_err.is_unique_violation() {
        return false;
    }

    db_err.constraint() == Some(constraint)
}
