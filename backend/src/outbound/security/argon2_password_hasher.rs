//! Argon2id password digests in PHC string format.
//!
//! Hashing is CPU-bound, so both operations run on the blocking pool to
//! keep request workers responsive.

use argon2::Argon2;
use argon2::password_hash::rand_core::OsRng;
use argon2::password_hash::{
    PasswordHash, PasswordHasher as _, PasswordVerifier as _, SaltString,
};
use async_trait::async_trait;
use tracing::warn;
use zeroize::Zeroizing;

use crate::domain::ports::{PasswordHashError, PasswordHasher};

/// [`PasswordHasher`] backed by `Argon2::default()` with a random salt per
/// digest.
#[derive(Debug, Clone, Copy, Default)]
pub struct Argon2PasswordHasher;

fn hash_blocking(plain: &str) -> Result<String, PasswordHashError> {
    let salt = SaltString::generate(&mut OsRng);
    Argon2::default()
        .hash_password(plain.as_bytes(), &salt)
        .map(|digest| digest.to_string())
        .map_err(|err| PasswordHashError::hash(err.to_string()))
}

fn verify_blocking(plain: &str, digest: &str) -> bool {
    match PasswordHash::new(digest) {
        Ok(parsed) => Argon2::default()
            .verify_password(plain.as_bytes(), &parsed)
            .is_ok(),
        Err(err) => {
            warn!(error = %err, "stored password digest is malformed");
            false
        }
    }
}

#[async_trait]
impl PasswordHasher for Argon2PasswordHasher {
    async fn hash(&self, plain: &str) -> Result<String, PasswordHashError> {
        let plain = Zeroizing::new(plain.to_owned());
        tokio::task::spawn_blocking(move || hash_blocking(&plain))
            .await
            .map_err(|err| PasswordHashError::hash(err.to_string()))?
    }

    async fn verify(&self, plain: &str, digest: &str) -> Result<bool, PasswordHashError> {
        let plain = Zeroizing::new(plain.to_owned());
        let digest = digest.to_owned();
        tokio::task::spawn_blocking(move || verify_blocking(&plain, &digest))
            .await
            .map_err(|err| PasswordHashError::hash(err.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[tokio::test]
    async fn digest_verifies_only_the_original_password() {
        let hasher = Argon2PasswordHasher;
        let digest = hasher.hash("wonderland").await.expect("hash");
        assert!(digest.starts_with("$argon2id$"));
        assert!(hasher.verify("wonderland", &digest).await.expect("verify"));
        assert!(!hasher.verify("looking-glass", &digest).await.expect("verify"));
    }

    #[rstest]
    #[tokio::test]
    async fn salts_differ_between_digests() {
        let hasher = Argon2PasswordHasher;
        let first = hasher.hash("same").await.expect("hash");
        let second = hasher.hash("same").await.expect("hash");
        assert_ne!(first, second);
    }

    #[rstest]
    #[tokio::test]
    async fn malformed_digest_never_matches() {
        let verified = Argon2PasswordHasher
            .verify("anything", "not-a-phc-string")
            .await
            .expect("verify");
        assert!(!verified);
    }
}
