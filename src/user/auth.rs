//! Password hashing for user credentials.

use anyhow::{bail, Result};
use std::str::FromStr;

mod titleforge_argon2 {
    use anyhow::{anyhow, Result};
    use argon2::{
        password_hash::{
            rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString,
        },
        Argon2,
    };

    pub fn generate_b64_salt() -> String {
        SaltString::generate(&mut OsRng).to_string()
    }

    pub fn hash<T: AsRef<str>>(plain: &[u8], b64_salt: T) -> Result<String> {
        let argon2 = Argon2::default();
        let salt = SaltString::from_b64(b64_salt.as_ref()).map_err(|err| anyhow!("{}", err))?;
        let hash_string = argon2
            .hash_password(plain, &salt)
            .map_err(|err| anyhow!("{}", err))?
            .to_string();
        Ok(hash_string)
    }

    pub fn verify<T: AsRef<str>>(plain_pw: &[u8], target_hash: T) -> Result<bool> {
        let argon2 = Argon2::default();
        let password_hash =
            PasswordHash::new(target_hash.as_ref()).map_err(|err| anyhow!("{}", err))?;
        Ok(argon2.verify_password(plain_pw, &password_hash).is_ok())
    }
}

/// Hash algorithm tag persisted alongside each credential row, so the
/// algorithm can evolve without invalidating stored hashes.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum CredentialHasher {
    Argon2,
}

impl FromStr for CredentialHasher {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "argon2" => Ok(CredentialHasher::Argon2),
            _ => bail!("Unknown hasher {}", s),
        }
    }
}

impl std::fmt::Display for CredentialHasher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CredentialHasher::Argon2 => write!(f, "argon2"),
        }
    }
}

impl CredentialHasher {
    pub fn generate_b64_salt(&self) -> String {
        match self {
            CredentialHasher::Argon2 => titleforge_argon2::generate_b64_salt(),
        }
    }

    pub fn hash<T: AsRef<str>>(&self, plain: &[u8], b64_salt: T) -> Result<String> {
        match self {
            CredentialHasher::Argon2 => titleforge_argon2::hash(plain, b64_salt),
        }
    }

    pub fn verify<T: AsRef<str>>(&self, plain_pw: T, target_hash: T) -> Result<bool> {
        match self {
            CredentialHasher::Argon2 => {
                titleforge_argon2::verify(plain_pw.as_ref().as_bytes(), target_hash)
            }
        }
    }
}

/// Salted password credentials as stored for one user.
#[derive(Clone, Debug)]
pub struct PasswordCredentials {
    pub salt: String,
    pub hash: String,
    pub hasher: CredentialHasher,
}

impl PasswordCredentials {
    /// Hash a fresh password with a newly generated salt.
    pub fn from_password(password: &str) -> Result<Self> {
        let hasher = CredentialHasher::Argon2;
        let salt = hasher.generate_b64_salt();
        let hash = hasher.hash(password.as_bytes(), &salt)?;
        Ok(Self { salt, hash, hasher })
    }

    /// Check a password attempt against the stored hash.
    pub fn verify(&self, password: &str) -> Result<bool> {
        self.hasher.verify(password, self.hash.as_str())
    }
}
