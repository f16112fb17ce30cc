//! Handling for the passwords stored against players and administrators.
//! Entity logic only ever talks to [`CredentialStore`] so the storage
//! scheme can be swapped through the config.

use super::{ServiceError, ServiceResult};
use argon2::{
    password_hash::{rand_core::OsRng, PasswordVerifier, SaltString},
    Argon2, PasswordHash, PasswordHasher,
};
use log::error;

/// Converts raw passwords into the value kept in the database and checks
/// raw passwords against stored values
pub trait CredentialStore: Send + Sync {
    /// Produces the value to store for the provided raw password
    ///
    /// `password` The raw password
    fn seal(&self, password: &str) -> ServiceResult<String>;

    /// Checks whether the raw password matches the stored value
    ///
    /// `password` The raw password
    /// `stored`   The value kept in the database
    fn verify(&self, password: &str, stored: &str) -> bool;
}

/// Stores passwords exactly as they were provided
pub struct PlainText;

impl CredentialStore for PlainText {
    fn seal(&self, password: &str) -> ServiceResult<String> {
        Ok(password.to_string())
    }

    fn verify(&self, password: &str, stored: &str) -> bool {
        password == stored
    }
}

/// Stores passwords as salted Argon2 hashes in PHC string form
pub struct Argon2Hashed;

impl CredentialStore for Argon2Hashed {
    fn seal(&self, password: &str) -> ServiceResult<String> {
        let salt = SaltString::generate(&mut OsRng);
        let hash = Argon2::default()
            .hash_password(password.as_bytes(), &salt)
            .map_err(|err| {
                error!("Failed to hash password: {}", err);
                ServiceError::Credentials
            })?;
        Ok(hash.to_string())
    }

    fn verify(&self, password: &str, stored: &str) -> bool {
        let hash = match PasswordHash::new(stored) {
            Ok(value) => value,
            Err(_) => return false,
        };
        Argon2::default()
            .verify_password(password.as_bytes(), &hash)
            .is_ok()
    }
}

/// Seals the password for a record being written, keeping the currently
/// stored value when the raw password still matches it
///
/// `store`    The credential store in use
/// `password` The raw password from the request
/// `current`  The value currently stored for the record if any
pub fn seal_replacing(
    store: &dyn CredentialStore,
    password: &str,
    current: Option<&str>,
) -> ServiceResult<String> {
    match current {
        Some(current) if store.verify(password, current) => Ok(current.to_string()),
        _ => store.seal(password),
    }
}
