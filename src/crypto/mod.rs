//! Crypto module
//!
//! Password-based encryption at rest for published artifacts:
//! PBKDF2-HMAC-SHA256 key derivation, AES-256-CBC with PKCS#7 padding
//! and a base64 JSON envelope.

pub mod cipher;
mod envelope;
mod error;
pub mod kdf;

pub use envelope::{encrypt_artifact, open, open_as, seal, EncryptedArtifact, Sealed};
pub use error::CryptoError;
pub use kdf::{derive_key, DerivedKey, PBKDF2_ITERATIONS};
