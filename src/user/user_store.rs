//! User persistence trait.

use super::auth::PasswordCredentials;
use super::user_models::UserRecord;
use anyhow::Result;

/// Storage backend for registered users.
pub trait UserStore: Send + Sync {
    /// Insert a new user, returning the assigned id. Fails when the
    /// email is already taken.
    fn create_user(&self, email: &str, credentials: PasswordCredentials) -> Result<usize>;

    /// Look a user up by email (case-insensitive).
    fn get_user_by_email(&self, email: &str) -> Result<Option<UserRecord>>;

    /// Look a user up by id.
    fn get_user_by_id(&self, user_id: usize) -> Result<Option<UserRecord>>;

    /// Total number of registered users.
    fn count_users(&self) -> Result<usize>;
}
