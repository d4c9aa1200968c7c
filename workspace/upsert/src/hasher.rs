//! Password hashing for new accounts.
//!
//! The point-of-sale application authenticates with Django, so stored hashes
//! use Django's `pbkdf2_sha256$<iterations>$<salt>$<digest>` layout.

use std::num::NonZeroU32;

use base64::{Engine as _, engine::general_purpose};
use rand::{Rng, distributions::Alphanumeric};
use ring::pbkdf2;

use crate::error::{Result, SyncError};

/// Django's default iteration count for PBKDF2-SHA256.
pub const DEFAULT_ITERATIONS: u32 = 870_000;

const ALGORITHM: &str = "pbkdf2_sha256";
const SALT_LEN: usize = 22;
const DIGEST_LEN: usize = 32;

/// Derives the stored password of an account from a secret.
pub trait PasswordHasher: Send + Sync {
    fn encode(&self, password: &str) -> String;
}

#[derive(Debug, Clone, Copy)]
pub struct Pbkdf2Sha256Hasher {
    iterations: NonZeroU32,
}

impl Pbkdf2Sha256Hasher {
    pub fn new(iterations: u32) -> Result<Self> {
        let iterations = NonZeroU32::new(iterations).ok_or_else(|| {
            SyncError::InvalidSettings("password iterations must be at least 1".to_string())
        })?;
        Ok(Self { iterations })
    }

    fn encode_with_salt(&self, password: &str, salt: &str) -> String {
        let mut digest = [0u8; DIGEST_LEN];
        pbkdf2::derive(
            pbkdf2::PBKDF2_HMAC_SHA256,
            self.iterations,
            salt.as_bytes(),
            password.as_bytes(),
            &mut digest,
        );

        format!(
            "{}${}${}${}",
            ALGORITHM,
            self.iterations,
            salt,
            general_purpose::STANDARD.encode(digest)
        )
    }
}

impl PasswordHasher for Pbkdf2Sha256Hasher {
    fn encode(&self, password: &str) -> String {
        let salt: String = rand::thread_rng()
            .sample_iter(&Alphanumeric)
            .take(SALT_LEN)
            .map(char::from)
            .collect();
        self.encode_with_salt(password, &salt)
    }
}

/// Checks a password against an encoded hash. Any hash that is not a
/// well-formed `pbkdf2_sha256` entry fails verification.
pub fn verify_password(password: &str, encoded: &str) -> bool {
    let mut parts = encoded.splitn(4, '$');
    let (Some(algorithm), Some(iterations), Some(salt), Some(digest)) =
        (parts.next(), parts.next(), parts.next(), parts.next())
    else {
        return false;
    };

    if algorithm != ALGORITHM {
        return false;
    }
    let Some(iterations) = iterations.parse::<u32>().ok().and_then(NonZeroU32::new) else {
        return false;
    };
    let Ok(digest) = general_purpose::STANDARD.decode(digest) else {
        return false;
    };

    pbkdf2::verify(
        pbkdf2::PBKDF2_HMAC_SHA256,
        iterations,
        salt.as_bytes(),
        password.as_bytes(),
        &digest,
    )
    .is_ok()
}
