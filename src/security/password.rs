//! Argon2 password digests.
//!
//! Hashing is deliberately slow, so both operations run on the blocking
//! thread pool instead of the async reactor.

use argon2::{
    Argon2, PasswordHash, PasswordVerifier,
    password_hash::{PasswordHasher, SaltString, rand_core::OsRng},
};

use tokio::sync::OnceCell;

use crate::error::AppError;

/// Digest of a throwaway password, hashed on first use with the same
/// parameters as real digests.
pub(crate) static DUMMY_DIGEST: OnceCell<String> = OnceCell::const_new();

/// Hash a plaintext password into a PHC string with a fresh random salt.
pub async fn hash_password(password: String) -> Result<String, AppError> {
    tokio::task::spawn_blocking(move || {
        let salt = SaltString::generate(&mut OsRng);
        Argon2::default()
            .hash_password(password.as_bytes(), &salt)
            .map(|hash| hash.to_string())
            .map_err(|err| AppError::Internal(format!("unable to hash password: {err}")))
    })
    .await
    .map_err(|err| AppError::Internal(format!("hashing task failed: {err}")))?
}

/// Check a plaintext password against a stored digest.
///
/// A digest that cannot be parsed never verifies.
pub async fn verify_password(password: String, digest: String) -> Result<bool, AppError> {
    tokio::task::spawn_blocking(move || {
        let Ok(parsed) = PasswordHash::new(&digest) else {
            tracing::error!("stored password digest is not a valid PHC string");
            return false;
        };
        Argon2::default()
            .verify_password(password.as_bytes(), &parsed)
            .is_ok()
    })
    .await
    .map_err(|err| AppError::Internal(format!("verification task failed: {err}")))
}

/// Digest to verify against when there is no stored one, so a lookup miss
/// costs the same Argon2 work as a wrong password.
pub async fn dummy_digest() -> Result<String, AppError> {
    DUMMY_DIGEST
        .get_or_try_init(|| hash_password("not-a-real-password".to_string()))
        .await
        .cloned()
}
