//! Password hashing behind an opaque capability.

use argon2::password_hash::rand_core::OsRng;
use argon2::password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString};
use argon2::{Algorithm, Argon2, Params, Version};

use crate::error::{ShopError, ShopResult};

/// Turns plaintext passwords into digests and checks them later.
pub trait CredentialHasher: Send + Sync + 'static {
    fn hash(&self, plaintext: &str) -> ShopResult<String>;

    /// `Ok(false)` on mismatch; `Err` only for a malformed digest.
    fn verify(&self, plaintext: &str, digest: &str) -> ShopResult<bool>;
}

/// Argon2id hasher producing PHC-format strings.
#[derive(Debug, Clone)]
pub struct Argon2Hasher {
    params: Params,
}

impl Argon2Hasher {
    pub fn new(memory_kib: u32, iterations: u32) -> ShopResult<Self> {
        let params = Params::new(memory_kib, iterations, 1, None)
            .map_err(|e| ShopError::Credential(format!("invalid hash parameters: {e}")))?;
        Ok(Self { params })
    }

    fn argon2(&self) -> Argon2<'static> {
        Argon2::new(Algorithm::Argon2id, Version::V0x13, self.params.clone())
    }
}

impl CredentialHasher for Argon2Hasher {
    fn hash(&self, plaintext: &str) -> ShopResult<String> {
        let salt = SaltString::generate(&mut OsRng);
        self.argon2()
            .hash_password(plaintext.as_bytes(), &salt)
            .map(|hash| hash.to_string())
            .map_err(|e| ShopError::Credential(format!("hashing failed: {e}")))
    }

    fn verify(&self, plaintext: &str, digest: &str) -> ShopResult<bool> {
        let parsed = PasswordHash::new(digest)
            .map_err(|e| ShopError::Credential(format!("invalid hash format: {e}")))?;
        match self.argon2().verify_password(plaintext.as_bytes(), &parsed) {
            Ok(()) => Ok(true),
            Err(argon2::password_hash::Error::Password) => Ok(false),
            Err(e) => Err(ShopError::Credential(format!("verify error: {e}"))),
        }
    }
}
