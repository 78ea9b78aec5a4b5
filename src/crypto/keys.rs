//! Cipher key material for the tiered envelopes.
//!
//! Every tier that encrypts builds a `CipherKey` from the password and the
//! envelope salt.  The key length decides the AES variant: tier 2 keeps
//! the first 16 bytes of its digest (AES-128), tiers 3-5 use all 32.

use sha2::{Digest, Sha256};
use zeroize::Zeroize;

use super::kdf::{derive_key, digest_key, KEY_LEN};
use crate::errors::Result;

/// Label appended to `password || hex(salt)` when deriving the tier 5 MAC key.
const HMAC_LABEL: &[u8] = b"hmac";

/// A symmetric key that zeroes its memory when dropped.
#[derive(Zeroize)]
#[zeroize(drop)]
pub struct CipherKey {
    bytes: [u8; KEY_LEN],
    len: usize,
}

impl CipherKey {
    /// Digest-derived key truncated to `len` bytes (16 or 32).
    pub fn from_digest(password: &[u8], salt: &[u8], len: usize) -> Self {
        Self {
            bytes: digest_key(password, salt),
            len: len.min(KEY_LEN),
        }
    }

    /// Full-length PBKDF2-derived key.
    pub fn from_pbkdf2(password: &[u8], salt: &[u8], iterations: u32) -> Result<Self> {
        Ok(Self {
            bytes: derive_key(password, salt, iterations)?,
            len: KEY_LEN,
        })
    }

    /// The usable key bytes.
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes[..self.len]
    }
}

/// Derive the tier 5 HMAC key: `SHA256(password || hex(salt) || "hmac")`.
pub fn derive_hmac_key(password: &[u8], salt: &[u8]) -> [u8; KEY_LEN] {
    let mut hasher = Sha256::new();
    hasher.update(password);
    hasher.update(hex::encode(salt).as_bytes());
    hasher.update(HMAC_LABEL);
    hasher.finalize().into()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn digest_key_truncates_to_requested_length() {
        let salt = [7u8; 16];
        let short = CipherKey::from_digest(b"pw", &salt, 16);
        let full = CipherKey::from_digest(b"pw", &salt, 32);

        assert_eq!(short.as_bytes().len(), 16);
        assert_eq!(full.as_bytes().len(), 32);
        assert_eq!(short.as_bytes(), &full.as_bytes()[..16]);
    }

    #[test]
    fn hmac_key_differs_from_cipher_key() {
        let salt = [1u8; 16];
        let cipher = CipherKey::from_digest(b"pw", &salt, 32);
        assert_ne!(cipher.as_bytes(), &derive_hmac_key(b"pw", &salt)[..]);
    }
}
