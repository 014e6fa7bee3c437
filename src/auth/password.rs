//! Argon2id password hashing and verification (PHC string format).

use argon2::password_hash::rand_core::OsRng;
use argon2::password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString};
use argon2::Argon2;

use crate::errors::ServerError;

pub const MIN_PASSWORD_CHARS: usize = 8;

pub fn hash_password(password: &str) -> Result<String, ServerError> {
    let salt = SaltString::generate(&mut OsRng);
    Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map(|h| h.to_string())
        .map_err(|e| {
            log::error!("password hashing failed: {e}");
            ServerError::InternalError
        })
}

/// `Ok(false)` on mismatch; a malformed stored hash is an internal error.
pub fn verify_password(password: &str, hash: &str) -> Result<bool, ServerError> {
    let parsed = PasswordHash::new(hash).map_err(|e| {
        log::error!("stored password hash is malformed: {e}");
        ServerError::InternalError
    })?;
    match Argon2::default().verify_password(password.as_bytes(), &parsed) {
        Ok(()) => Ok(true),
        Err(argon2::password_hash::Error::Password) => Ok(false),
        Err(e) => {
            log::error!("password verification failed: {e}");
            Err(ServerError::InternalError)
        }
    }
}

pub fn validate_password_strength(password: &str) -> Result<(), ServerError> {
    if password.chars().count() < MIN_PASSWORD_CHARS {
        return Err(ServerError::Validation(format!(
            "password must be at least {MIN_PASSWORD_CHARS} characters long"
        )));
    }
    Ok(())
}
