//! Account password records.
//!
//! Unrelated to vault content encryption.  A record is
//! `hex(salt) || hex(PBKDF2-HMAC-SHA256(password, hex(salt), 100 000))`:
//! 32 + 64 = 96 ASCII characters.  Note the PBKDF2 salt is the *hex text*
//! of the random bytes, not the bytes themselves.

use rand::RngCore;
use subtle::ConstantTimeEq;

use super::kdf::{derive_key, STANDARD_ITERATIONS};
use crate::errors::{Result, VaultError};

/// Random salt length in bytes before hex encoding.
const SALT_BYTES: usize = 16;

/// Offset where the digest starts inside a record.
const SALT_HEX_LEN: usize = SALT_BYTES * 2;

/// Total record length in characters.
pub const RECORD_LEN: usize = SALT_HEX_LEN + 64;

/// Hash `password` into a fresh record.
pub fn hash_password(password: &str) -> Result<String> {
    let mut salt = [0u8; SALT_BYTES];
    rand::rng().fill_bytes(&mut salt);
    let salt_hex = hex::encode(salt);

    let digest = derive_key(password.as_bytes(), salt_hex.as_bytes(), STANDARD_ITERATIONS)?;
    Ok(format!("{salt_hex}{}", hex::encode(digest)))
}

/// Check `password` against a stored record.
///
/// A record of the wrong shape is a data-integrity failure, reported as an
/// error rather than a plain `false`.
pub fn verify_password(record: &str, password: &str) -> Result<bool> {
    if record.len() != RECORD_LEN || !record.is_ascii() {
        return Err(VaultError::CorruptCredential(format!(
            "expected a {RECORD_LEN}-character record, got {} characters",
            record.chars().count()
        )));
    }
    let (salt_hex, stored_hex) = record.split_at(SALT_HEX_LEN);

    let digest = derive_key(password.as_bytes(), salt_hex.as_bytes(), STANDARD_ITERATIONS)?;
    let candidate_hex = hex::encode(digest);

    Ok(candidate_hex.as_bytes().ct_eq(stored_hex.as_bytes()).into())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn record_is_ninety_six_hex_characters() {
        let record = hash_password("correct horse").unwrap();
        assert_eq!(record.len(), RECORD_LEN);
        assert!(record.chars().all(|c| c.is_ascii_hexdigit()));
    }

    #[test]
    fn verifies_known_record() {
        // salt text "00000000000000000000000000000000", one known password.
        let salt_hex = "0".repeat(SALT_HEX_LEN);
        let digest = derive_key(b"pw", salt_hex.as_bytes(), STANDARD_ITERATIONS).unwrap();
        let record = format!("{salt_hex}{}", hex::encode(digest));

        assert!(verify_password(&record, "pw").unwrap());
        assert!(!verify_password(&record, "pW").unwrap());
    }

    #[test]
    fn malformed_records_are_errors() {
        assert!(matches!(
            verify_password("abc", "pw"),
            Err(VaultError::CorruptCredential(_))
        ));
        let too_long = "a".repeat(RECORD_LEN + 1);
        assert!(verify_password(&too_long, "pw").is_err());
    }
}
