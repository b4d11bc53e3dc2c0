//! SQLite-backed user store.

use super::auth::{CredentialHasher, PasswordCredentials};
use super::user_models::UserRecord;
use super::user_store::UserStore;
use anyhow::{bail, Context, Result};
use rusqlite::{params, Connection, OptionalExtension, Row};
use std::path::Path;
use std::sync::Mutex;
use std::time::{Duration, SystemTime, UNIX_EPOCH};
use tracing::info;

const CREATE_USER_TABLE: &str = "
CREATE TABLE IF NOT EXISTS user (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    email TEXT NOT NULL UNIQUE COLLATE NOCASE,
    salt TEXT NOT NULL,
    hash TEXT NOT NULL,
    hasher TEXT NOT NULL,
    created INTEGER NOT NULL DEFAULT (strftime('%s', 'now'))
);
";

const CREATE_EMAIL_INDEX: &str = "CREATE INDEX IF NOT EXISTS idx_user_email ON user (email);";

/// Single-table SQLite user store.
pub struct SqliteUserStore {
    connection: Mutex<Connection>,
}

impl SqliteUserStore {
    /// Open (or create) the store at the given path and ensure the
    /// schema exists.
    pub fn new<T: AsRef<Path>>(db_path: T) -> Result<Self> {
        let connection = Connection::open(db_path.as_ref())
            .with_context(|| format!("Failed to open user db at {:?}", db_path.as_ref()))?;
        connection.execute_batch(CREATE_USER_TABLE)?;
        connection.execute_batch(CREATE_EMAIL_INDEX)?;
        info!("User store ready at {:?}", db_path.as_ref());
        Ok(Self {
            connection: Mutex::new(connection),
        })
    }

    /// In-memory store, mainly for tests.
    pub fn in_memory() -> Result<Self> {
        let connection = Connection::open_in_memory()?;
        connection.execute_batch(CREATE_USER_TABLE)?;
        connection.execute_batch(CREATE_EMAIL_INDEX)?;
        Ok(Self {
            connection: Mutex::new(connection),
        })
    }

    fn row_to_user(row: &Row<'_>) -> rusqlite::Result<(usize, String, String, String, String, i64)> {
        Ok((
            row.get(0)?,
            row.get(1)?,
            row.get(2)?,
            row.get(3)?,
            row.get(4)?,
            row.get(5)?,
        ))
    }

    fn build_record(
        (id, email, salt, hash, hasher, created): (usize, String, String, String, String, i64),
    ) -> Result<UserRecord> {
        let hasher: CredentialHasher = hasher.parse()?;
        Ok(UserRecord {
            id,
            email,
            credentials: PasswordCredentials { salt, hash, hasher },
            created: UNIX_EPOCH + Duration::from_secs(created.max(0) as u64),
        })
    }
}

impl UserStore for SqliteUserStore {
    fn create_user(&self, email: &str, credentials: PasswordCredentials) -> Result<usize> {
        let connection = self.connection.lock().unwrap();

        let existing: Option<usize> = connection
            .query_row(
                "SELECT id FROM user WHERE email = ?1;",
                params![email],
                |row| row.get(0),
            )
            .optional()?;
        if existing.is_some() {
            bail!("User with email {} already exists", email);
        }

        let created = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .context("System clock before epoch")?
            .as_secs() as i64;
        connection.execute(
            "INSERT INTO user (email, salt, hash, hasher, created) VALUES (?1, ?2, ?3, ?4, ?5);",
            params![
                email,
                credentials.salt,
                credentials.hash,
                credentials.hasher.to_string(),
                created
            ],
        )?;
        Ok(connection.last_insert_rowid() as usize)
    }

    fn get_user_by_email(&self, email: &str) -> Result<Option<UserRecord>> {
        let connection = self.connection.lock().unwrap();
        let row = connection
            .query_row(
                "SELECT id, email, salt, hash, hasher, created FROM user WHERE email = ?1;",
                params![email],
                Self::row_to_user,
            )
            .optional()?;
        row.map(Self::build_record).transpose()
    }

    fn get_user_by_id(&self, user_id: usize) -> Result<Option<UserRecord>> {
        let connection = self.connection.lock().unwrap();
        let row = connection
            .query_row(
                "SELECT id, email, salt, hash, hasher, created FROM user WHERE id = ?1;",
                params![user_id],
                Self::row_to_user,
            )
            .optional()?;
        row.map(Self::build_record).transpose()
    }

    fn count_users(&self) -> Result<usize> {
        let connection = self.connection.lock().unwrap();
        let count: usize =
            connection.query_row("SELECT COUNT(*) FROM user;", [], |row| row.get(0))?;
        Ok(count)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn credentials() -> PasswordCredentials {
        PasswordCredentials::from_password("test-password").unwrap()
    }

    #[test]
    fn create_and_fetch_user() {
        let store = SqliteUserStore::in_memory().unwrap();
        let id = store.create_user("user@example.com", credentials()).unwrap();

        let record = store.get_user_by_email("user@example.com").unwrap().unwrap();
        assert_eq!(record.id, id);
        assert_eq!(record.email, "user@example.com");
        assert!(record.credentials.verify("test-password").unwrap());

        let by_id = store.get_user_by_id(id).unwrap().unwrap();
        assert_eq!(by_id.email, "user@example.com");
    }

    #[test]
    fn duplicate_email_is_rejected() {
        let store = SqliteUserStore::in_memory().unwrap();
        store.create_user("user@example.com", credentials()).unwrap();

        assert!(store.create_user("user@example.com", credentials()).is_err());
        // the unique index is case-insensitive
        assert!(store.create_user("USER@example.com", credentials()).is_err());
    }

    #[test]
    fn missing_users_come_back_as_none() {
        let store = SqliteUserStore::in_memory().unwrap();
        assert!(store.get_user_by_email("ghost@example.com").unwrap().is_none());
        assert!(store.get_user_by_id(999).unwrap().is_none());
    }

    #[test]
    fn count_tracks_registrations() {
        let store = SqliteUserStore::in_memory().unwrap();
        assert_eq!(store.count_users().unwrap(), 0);
        store.create_user("a@example.com", credentials()).unwrap();
        store.create_user("b@example.com", credentials()).unwrap();
        assert_eq!(store.count_users().unwrap(), 2);
    }

    #[test]
    fn store_persists_across_reopen() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("users.db");
        {
            let store = SqliteUserStore::new(&path).unwrap();
            store.create_user("user@example.com", credentials()).unwrap();
        }
        let reopened = SqliteUserStore::new(&path).unwrap();
        assert_eq!(reopened.count_users().unwrap(), 1);
    }
}
