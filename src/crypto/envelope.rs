//! Artifact envelope
//!
//! Wraps a serialized artifact as `{encrypted, data, salt}` where `data`
//! is base64(IV || ciphertext). The dashboard decrypts it in the browser
//! with the same password, PBKDF2 parameters and cipher.

use base64::{engine::general_purpose::STANDARD, Engine};
use rand::rngs::OsRng;
use rand::RngCore;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use super::cipher::{decrypt_cbc, encrypt_cbc, BLOCK_SIZE};
use super::kdf::{derive_key, SALT_LEN};
use super::CryptoError;

/// Encrypted artifact as written to disk
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EncryptedArtifact {
    pub encrypted: bool,
    /// base64(IV || ciphertext)
    pub data: String,
    /// base64 of the raw 16-byte salt
    pub salt: String,
}

/// Result of sealing an artifact
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Sealed<'a, T: Serialize> {
    /// Encryption disabled; the artifact is published as-is
    Plain(&'a T),
    Encrypted(EncryptedArtifact),
}

impl<T: Serialize> Sealed<'_, T> {
    pub fn is_encrypted(&self) -> bool {
        matches!(self, Sealed::Encrypted(_))
    }
}

/// Seal `artifact` for publication.
///
/// With no password (or an empty one) the artifact passes through
/// unchanged and a warning is logged. Otherwise a fresh salt and IV are
/// drawn for every call.
pub fn seal<'a, T: Serialize>(
    artifact: &'a T,
    password: Option<&str>,
) -> Result<Sealed<'a, T>, CryptoError> {
    match password.filter(|p| !p.is_empty()) {
        Some(password) => encrypt_artifact(artifact, password).map(Sealed::Encrypted),
        None => {
            tracing::warn!("DASHBOARD_PASSWORD not set. Skipping encryption.");
            Ok(Sealed::Plain(artifact))
        }
    }
}

/// Encrypt `artifact` under `password`.
pub fn encrypt_artifact<T: Serialize + ?Sized>(
    artifact: &T,
    password: &str,
) -> Result<EncryptedArtifact, CryptoError> {
    let mut salt = [0u8; SALT_LEN];
    fill_random(&mut salt)?;
    let key = derive_key(password, &salt)?;

    let mut iv = [0u8; BLOCK_SIZE];
    fill_random(&mut iv)?;

    let plaintext = serde_json::to_vec(artifact)?;
    let ciphertext = encrypt_cbc(&key, &iv, &plaintext)?;

    let mut combined = Vec::with_capacity(BLOCK_SIZE + ciphertext.len());
    combined.extend_from_slice(&iv);
    combined.extend_from_slice(&ciphertext);

    Ok(EncryptedArtifact {
        encrypted: true,
        data: STANDARD.encode(combined),
        salt: STANDARD.encode(salt),
    })
}

/// Decrypt an envelope back to the exact JSON bytes that were sealed.
pub fn open(envelope: &EncryptedArtifact, password: &str) -> Result<Vec<u8>, CryptoError> {
    if !envelope.encrypted {
        return Err(CryptoError::MalformedEnvelope("encrypted flag is false".to_string()));
    }

    let salt = STANDARD
        .decode(&envelope.salt)
        .map_err(|e| CryptoError::MalformedEnvelope(format!("Invalid salt encoding: {}", e)))?;
    let combined = STANDARD
        .decode(&envelope.data)
        .map_err(|e| CryptoError::MalformedEnvelope(format!("Invalid data encoding: {}", e)))?;

    if combined.len() < BLOCK_SIZE {
        return Err(CryptoError::MalformedEnvelope(format!(
            "data too short: {} bytes",
            combined.len()
        )));
    }
    let (iv, ciphertext) = combined.split_at(BLOCK_SIZE);

    let key = derive_key(password, &salt)?;
    decrypt_cbc(&key, iv, ciphertext)
}

/// Decrypt an envelope and deserialize the artifact.
pub fn open_as<T: DeserializeOwned>(
    envelope: &EncryptedArtifact,
    password: &str,
) -> Result<T, CryptoError> {
    let plaintext = open(envelope, password)?;
    Ok(serde_json::from_slice(&plaintext)?)
}

fn fill_random(buf: &mut [u8]) -> Result<(), CryptoError> {
    OsRng
        .try_fill_bytes(buf)
        .map_err(|e| CryptoError::Rng(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::io;
    use std::sync::{Arc, Mutex};

    #[test]
    fn test_secret123_round_trip() {
        let artifact = json!({"a": 1});
        let envelope = encrypt_artifact(&artifact, "secret123").unwrap();

        assert!(envelope.encrypted);
        assert_eq!(STANDARD.decode(&envelope.salt).unwrap().len(), SALT_LEN);

        let plaintext = open(&envelope, "secret123").unwrap();
        assert_eq!(plaintext, serde_json::to_vec(&artifact).unwrap());

        let restored: serde_json::Value = open_as(&envelope, "secret123").unwrap();
        assert_eq!(restored, artifact);
    }

    #[test]
    fn test_fresh_salt_and_iv_each_call() {
        let artifact = json!({"a": 1});
        let first = encrypt_artifact(&artifact, "secret123").unwrap();
        let second = encrypt_artifact(&artifact, "secret123").unwrap();

        assert_ne!(first.salt, second.salt);
        assert_ne!(first.data, second.data);
        let data_a = STANDARD.decode(&first.data).unwrap();
        let data_b = STANDARD.decode(&second.data).unwrap();
        assert_ne!(data_a[..BLOCK_SIZE], data_b[..BLOCK_SIZE]);
    }

    #[test]
    fn test_data_is_iv_plus_whole_blocks() {
        let envelope = encrypt_artifact(&json!([1, 2, 3]), "pw").unwrap();
        let combined = STANDARD.decode(&envelope.data).unwrap();
        assert!(combined.len() >= 2 * BLOCK_SIZE);
        assert_eq!(combined.len() % BLOCK_SIZE, 0);
    }

    #[test]
    fn test_wrong_password_fails_or_differs() {
        let artifact = json!({"total": 1234.5, "label": "income"});
        let envelope = encrypt_artifact(&artifact, "right").unwrap();

        // A wrong key almost always breaks the padding; if it happens to
        // unpad cleanly the bytes still cannot match.
        match open(&envelope, "wrong") {
            Err(err) => assert!(matches!(err, CryptoError::Decryption)),
            Ok(bytes) => assert_ne!(bytes, serde_json::to_vec(&artifact).unwrap()),
        }
    }

    #[test]
    fn test_seal_without_password_passes_through() {
        let artifact = json!({"a": 1});

        let sealed = seal(&artifact, None).unwrap();
        assert!(!sealed.is_encrypted());
        assert_eq!(serde_json::to_string(&sealed).unwrap(), r#"{"a":1}"#);

        let sealed = seal(&artifact, Some("")).unwrap();
        assert_eq!(sealed, Sealed::Plain(&artifact));
    }

    /// Collects formatted log output in memory
    #[derive(Clone, Default)]
    struct CapturedLogs(Arc<Mutex<Vec<u8>>>);

    impl io::Write for CapturedLogs {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    impl CapturedLogs {
        fn contents(&self) -> String {
            String::from_utf8(self.0.lock().unwrap().clone()).unwrap()
        }
    }

    fn with_captured_logs<R>(f: impl FnOnce() -> R) -> (R, String) {
        let logs = CapturedLogs::default();
        let writer = logs.clone();
        let subscriber = tracing_subscriber::fmt()
            .with_writer(move || writer.clone())
            .with_ansi(false)
            .finish();

        let result = tracing::subscriber::with_default(subscriber, f);
        (result, logs.contents())
    }

    #[test]
    fn test_seal_without_password_logs_warning() {
        let artifact = json!({"a": 1});

        for password in [None, Some("")] {
            let (sealed, logs) = with_captured_logs(|| seal(&artifact, password).unwrap());
            assert!(!sealed.is_encrypted());
            assert!(logs.contains("WARN"), "missing level in: {logs}");
            assert!(logs.contains("DASHBOARD_PASSWORD not set. Skipping encryption."));
        }

        let (sealed, logs) = with_captured_logs(|| seal(&artifact, Some("secret123")).unwrap());
        assert!(sealed.is_encrypted());
        assert!(!logs.contains("DASHBOARD_PASSWORD not set"));
    }

    #[test]
    fn test_seal_with_password_serializes_envelope() {
        let artifact = json!({"a": 1});
        let sealed = seal(&artifact, Some("secret123")).unwrap();
        assert!(sealed.is_encrypted());

        let value = serde_json::to_value(&sealed).unwrap();
        assert_eq!(value["encrypted"], json!(true));
        assert!(value["data"].is_string());
        assert!(value["salt"].is_string());
        assert_eq!(value.as_object().unwrap().len(), 3);
    }

    #[test]
    fn test_malformed_envelope() {
        let envelope = EncryptedArtifact {
            encrypted: true,
            data: "not base64!".to_string(),
            salt: STANDARD.encode([0u8; SALT_LEN]),
        };
        let err = open(&envelope, "pw").unwrap_err();
        assert!(err.is_input_error());

        let short = EncryptedArtifact {
            encrypted: true,
            data: STANDARD.encode([0u8; 8]),
            salt: STANDARD.encode([0u8; SALT_LEN]),
        };
        assert!(matches!(open(&short, "pw"), Err(CryptoError::MalformedEnvelope(_))));
    }
}
