//! Password hashing helpers.
//!
//! Stored credentials are an Argon2 PHC string computed over `password + salt`,
//! where `salt` is a separate random hex value kept next to the hash. Argon2
//! still embeds its own salt in the PHC string; the extra salt is kept so
//! existing stored credentials keep verifying.

use argon2::{
    password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};
use rand::{rngs::OsRng, RngCore};
use tracing::error;

const SALT_BYTES: usize = 24;

/// Random 24-byte salt, lowercase hex (48 chars).
pub fn generate_random_salt() -> String {
    let mut bytes = [0u8; SALT_BYTES];
    OsRng.fill_bytes(&mut bytes);
    hex::encode(bytes)
}

pub fn password_hash(password: &str, salt: &str) -> anyhow::Result<String> {
    let input = format!("{password}{salt}");
    let phc_salt = SaltString::generate(&mut OsRng);
    let hash = Argon2::default()
        .hash_password(input.as_bytes(), &phc_salt)
        .map_err(|e| {
            error!(error = %e, "argon2 hash_password error");
            anyhow::anyhow!(e.to_string())
        })?
        .to_string();
    Ok(hash)
}

/// Checks `password + salt` against a stored PHC hash.
///
/// A missing salt or hash is a plain mismatch. Only a malformed hash is an error.
pub fn password_verify(password: &str, salt: Option<&str>, hash: Option<&str>) -> anyhow::Result<bool> {
    let (Some(salt), Some(hash)) = (salt, hash) else {
        return Ok(false);
    };
    if salt.is_empty() || hash.is_empty() {
        return Ok(false);
    }
    let parsed = PasswordHash::new(hash).map_err(|e| {
        error!(error = %e, "argon2 parse hash error");
        anyhow::anyhow!(e.to_string())
    })?;
    let input = format!("{password}{salt}");
    match Argon2::default().verify_password(input.as_bytes(), &parsed) {
        Ok(()) => Ok(true),
        Err(argon2::password_hash::Error::Password) => Ok(false),
        Err(e) => {
            error!(error = %e, "argon2 verify_password error");
            Err(anyhow::anyhow!(e.to_string()))
        }
    }
}
