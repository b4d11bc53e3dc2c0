pub mod auth;
pub mod jwt;
mod sqlite_user_store;
pub mod user_models;
mod user_store;

pub use auth::{CredentialHasher, PasswordCredentials};
pub use jwt::{Claims, JwtKeys};
pub use sqlite_user_store::SqliteUserStore;
pub use user_models::{UserInfo, UserRecord};
pub use user_store::UserStore;
