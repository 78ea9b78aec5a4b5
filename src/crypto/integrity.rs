//! HMAC-SHA256 tags for tier 5 envelopes.

use hmac::{Hmac, Mac};
use sha2::Sha256;

use crate::errors::{Result, VaultError};

/// Size of the HMAC-SHA256 tag in bytes.
pub const TAG_LEN: usize = 32;

/// Compute the tag over `data`.
pub fn compute_tag(hmac_key: &[u8], data: &[u8]) -> Result<[u8; TAG_LEN]> {
    let mut mac = Hmac::<Sha256>::new_from_slice(hmac_key)
        .map_err(|e| VaultError::EncryptionFailed(format!("invalid HMAC key: {e}")))?;
    mac.update(data);
    Ok(mac.finalize().into_bytes().into())
}

/// Verify `expected` against the tag over `data` in constant time.
pub fn verify_tag(hmac_key: &[u8], data: &[u8], expected: &[u8]) -> Result<()> {
    let mut mac = Hmac::<Sha256>::new_from_slice(hmac_key)
        .map_err(|_| VaultError::IntegrityCheckFailed)?;
    mac.update(data);
    mac.verify_slice(expected)
        .map_err(|_| VaultError::IntegrityCheckFailed)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn verify_accepts_own_tag() {
        let tag = compute_tag(b"key", b"data").unwrap();
        assert!(verify_tag(b"key", b"data", &tag).is_ok());
    }

    #[test]
    fn verify_rejects_other_key_and_data() {
        let tag = compute_tag(b"key", b"data").unwrap();
        assert!(matches!(
            verify_tag(b"other", b"data", &tag),
            Err(VaultError::IntegrityCheckFailed)
        ));
        assert!(verify_tag(b"key", b"datb", &tag).is_err());
        assert!(verify_tag(b"key", b"data", &tag[..31]).is_err());
    }
}
