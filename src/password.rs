//! Password hashing with PBKDF2-HMAC-SHA256.
//!
//! Hashes and salts are stored as lowercase hex, matching rows written by
//! earlier versions of the tracker (16-byte salt, 100,000 rounds, 32-byte
//! digest).

use rand_core::{OsRng, RngCore};
use sha2::Sha256;

use crate::error::{AppError, Result};

/// Salt byte length before hex encoding.
pub const SALT_BYTES: usize = 16;

/// Derived key length before hex encoding.
pub const HASH_BYTES: usize = 32;

/// PBKDF2 rounds. Changing this invalidates every stored hash.
pub const PBKDF2_ROUNDS: u32 = 100_000;

/// Fixed salt used to burn the same amount of time for unknown usernames.
const DUMMY_SALT: [u8; SALT_BYTES] = [0u8; SALT_BYTES];

/// Hex-encoded salt and hash ready to be stored in the `users` table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PasswordRecord {
    pub password_hash: String,
    pub salt: String,
}

pub fn generate_salt() -> [u8; SALT_BYTES] {
    let mut salt = [0u8; SALT_BYTES];
    OsRng.fill_bytes(&mut salt);
    salt
}

pub fn derive(password: &str, salt: &[u8]) -> [u8; HASH_BYTES] {
    let mut out = [0u8; HASH_BYTES];
    pbkdf2::pbkdf2_hmac::<Sha256>(password.as_bytes(), salt, PBKDF2_ROUNDS, &mut out);
    out
}

pub fn hash_password(password: &str) -> PasswordRecord {
    let salt = generate_salt();
    let hash = derive(password, &salt);
    PasswordRecord {
        password_hash: hex::encode(hash),
        salt: hex::encode(salt),
    }
}

/// Check `password` against a stored hex hash and hex salt.
///
/// A salt that is not valid hex means the row is corrupt and is reported as
/// an internal error rather than a failed login.
pub fn verify_password(password: &str, stored_hash: &str, stored_salt: &str) -> Result<bool> {
    let salt = hex::decode(stored_salt)
        .map_err(|e| AppError::Internal(format!("stored salt is not hex: {}", e)))?;
    let attempt = hex::encode(derive(password, &salt));
    Ok(constant_time_eq(
        attempt.as_bytes(),
        stored_hash.to_ascii_lowercase().as_bytes(),
    ))
}

/// Run one derivation and discard the result.
pub fn dummy_verify(password: &str) {
    let _ = derive(password, &DUMMY_SALT);
}

/// Constant-time byte comparison. Only the length check short-circuits.
pub fn constant_time_eq(a: &[u8], b: &[u8]) -> bool {
    if a.len() != b.len() {
        return false;
    }
    let mut diff = 0u8;
    for (x, y) in a.iter().zip(b.iter()) {
        diff |= x ^ y;
    }
    diff == 0
}
