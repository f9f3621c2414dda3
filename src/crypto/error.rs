//! Crypto Errors

/// Errors that can occur while sealing or opening an artifact
#[derive(Debug, thiserror::Error)]
pub enum CryptoError {
    /// OS random number generator failed
    #[error("Random number generator failure: {0}")]
    Rng(String),

    /// PBKDF2 could not produce a key
    #[error("Key derivation failed: {0}")]
    KeyDerivation(String),

    /// Cipher could not be initialised
    #[error("Cipher initialisation failed: {0}")]
    Cipher(String),

    /// Bad password or corrupted ciphertext
    #[error("Decryption failed: invalid password or corrupted data")]
    Decryption,

    /// Envelope fields are not valid base64 or have the wrong length
    #[error("Malformed envelope: {0}")]
    MalformedEnvelope(String),

    /// Artifact could not be converted to or from JSON
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl CryptoError {
    /// Errors caused by the input rather than the environment
    pub fn is_input_error(&self) -> bool {
        matches!(
            self,
            CryptoError::Decryption | CryptoError::MalformedEnvelope(_)
        )
    }
}
