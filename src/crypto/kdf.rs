//! Password-based key derivation.
//!
//! Two derivations exist side by side:
//!
//! - **PBKDF2-HMAC-SHA256** (`derive_key`), used by tiers 4 and 5 and by
//!   the account credential hasher.
//! - **Single SHA-256 digest** (`digest_key`) of `password || hex(salt)`,
//!   used by tiers 2 and 3.  It has no stretching at all and exists only
//!   so envelopes written by earlier releases keep decrypting.

use rand::RngCore;
use sha2::{Digest, Sha256};

use crate::errors::{Result, VaultError};

/// Length of the per-envelope salt in bytes (one AES block).
pub const SALT_LEN: usize = 16;

/// Length of a derived key in bytes (256 bits).
pub const KEY_LEN: usize = 32;

/// PBKDF2 rounds used by tier 4 and by account credentials.
pub const STANDARD_ITERATIONS: u32 = 100_000;

/// PBKDF2 rounds used by tier 5.
pub const STRONG_ITERATIONS: u32 = 200_000;

/// Derive a 32-byte key with PBKDF2-HMAC-SHA256.
///
/// The same password + salt + iteration count always yields the same key.
pub fn derive_key(password: &[u8], salt: &[u8], iterations: u32) -> Result<[u8; KEY_LEN]> {
    if iterations < 1 {
        return Err(VaultError::KeyDerivationFailed(
            "PBKDF2 iterations must be at least 1".into(),
        ));
    }

    let mut key = [0u8; KEY_LEN];
    pbkdf2::pbkdf2_hmac::<Sha256>(password, salt, iterations, &mut key);
    Ok(key)
}

/// Derive a key as `SHA256(password || hex(salt))`.
///
/// Callers truncate the digest to the AES key size they need.
pub fn digest_key(password: &[u8], salt: &[u8]) -> [u8; KEY_LEN] {
    let mut hasher = Sha256::new();
    hasher.update(password);
    hasher.update(hex::encode(salt).as_bytes());
    hasher.finalize().into()
}

/// Generate a cryptographically random 16-byte salt.
pub fn generate_salt() -> [u8; SALT_LEN] {
    let mut salt = [0u8; SALT_LEN];
    rand::rng().fill_bytes(&mut salt);
    salt
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn digest_key_hashes_password_then_hex_salt() {
        let salt = [0xABu8; SALT_LEN];
        let mut manual = Sha256::new();
        manual.update(b"pw");
        manual.update("abababababababababababababababab".as_bytes());
        let expected: [u8; KEY_LEN] = manual.finalize().into();

        assert_eq!(digest_key(b"pw", &salt), expected);
    }

    #[test]
    fn derive_key_rejects_zero_iterations() {
        assert!(derive_key(b"pw", &[0u8; SALT_LEN], 0).is_err());
    }

    #[test]
    fn derive_key_matches_rfc_7914_vector() {
        // PBKDF2-HMAC-SHA256, P="passwd", S="salt", c=1, dkLen=32.
        let key = derive_key(b"passwd", b"salt", 1).unwrap();
        assert_eq!(
            hex::encode(key),
            "55ac046e56e3089fec1691c22544b605f94185216dde0465e68b9d57c20dacbc"
        );
    }

    #[test]
    fn generated_salts_differ() {
        assert_ne!(generate_salt(), generate_salt());
    }
}
