//! User entities.

use super::auth::PasswordCredentials;
use serde::Serialize;
use std::time::SystemTime;

/// A registered user as stored in the database.
#[derive(Clone, Debug)]
pub struct UserRecord {
    pub id: usize,
    pub email: String,
    pub credentials: PasswordCredentials,
    pub created: SystemTime,
}

/// User shape exposed in API responses.
#[derive(Clone, Debug, Serialize)]
pub struct UserInfo {
    pub id: usize,
    pub email: String,
}

impl From<&UserRecord> for UserInfo {
    fn from(record: &UserRecord) -> Self {
        Self {
            id: record.id,
            email: record.email.clone(),
        }
    }
}
