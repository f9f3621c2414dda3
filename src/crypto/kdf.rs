//! Password-based key derivation (PBKDF2-HMAC-SHA256)

use hmac::Hmac;
use sha2::Sha256;
use zeroize::{Zeroize, ZeroizeOnDrop};

use super::CryptoError;

/// PBKDF2 iteration count. The dashboard derives keys with the same value.
pub const PBKDF2_ITERATIONS: u32 = 100_000;

/// AES-256 key length in bytes
pub const KEY_LEN: usize = 32;

/// Salt length in bytes
pub const SALT_LEN: usize = 16;

/// Symmetric key derived from a password. Wiped on drop.
#[derive(Zeroize, ZeroizeOnDrop)]
pub struct DerivedKey([u8; KEY_LEN]);

impl DerivedKey {
    pub fn as_bytes(&self) -> &[u8; KEY_LEN] {
        &self.0
    }
}

impl std::fmt::Debug for DerivedKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("DerivedKey([REDACTED])")
    }
}

/// Derive the artifact key for `password` and `salt`.
pub fn derive_key(password: &str, salt: &[u8]) -> Result<DerivedKey, CryptoError> {
    derive_key_with_rounds(password, salt, PBKDF2_ITERATIONS)
}

pub(crate) fn derive_key_with_rounds(
    password: &str,
    salt: &[u8],
    rounds: u32,
) -> Result<DerivedKey, CryptoError> {
    let mut key = [0u8; KEY_LEN];
    pbkdf2::pbkdf2::<Hmac<Sha256>>(password.as_bytes(), salt, rounds, &mut key)
        .map_err(|e| CryptoError::KeyDerivation(e.to_string()))?;

    Ok(DerivedKey(key))
}
