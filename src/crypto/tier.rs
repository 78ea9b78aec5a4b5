//! The five encryption tiers.
//!
//! Each tier is a self-contained envelope format.  Nothing inside an
//! envelope says which tier produced it: the caller must remember the tier
//! (vault items keep it in `level`) or try them all (encrypted import).
//!
//! | Tier | Key                               | Cipher      | Envelope (before base64)     |
//! |------|-----------------------------------|-------------|------------------------------|
//! | 1    | none                              | none        | `content`                    |
//! | 2    | `SHA256(pw ‖ hex(salt))[..16]`     | AES-128-CBC | `salt ‖ ct`                  |
//! | 3    | `SHA256(pw ‖ hex(salt))`           | AES-256-CBC | `salt ‖ ct`                  |
//! | 4    | PBKDF2-SHA256, 100 000 rounds     | AES-256-CBC | `salt ‖ ct`                  |
//! | 5    | PBKDF2-SHA256, 200 000 rounds     | AES-256-CBC | `salt ‖ ct ‖ HMAC-SHA256(ct)` |
//!
//! In tiers 2-5 the 16-byte salt doubles as the CBC IV.  That is weak, but
//! it is the wire format of every envelope already stored, so a stronger
//! scheme has to arrive as a new tier rather than a change to these.

use std::fmt;

use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;

use super::encryption;
use super::integrity::{self, TAG_LEN};
use super::kdf::{generate_salt, SALT_LEN, STANDARD_ITERATIONS, STRONG_ITERATIONS};
use super::keys::{derive_hmac_key, CipherKey};
use crate::errors::{Result, VaultError};

/// Byte-level transform behind one tier: plaintext bytes to raw envelope
/// bytes and back.  Base64 transport encoding is applied by [`Tier`].
pub trait TierCipher: Sync {
    /// Produce a fresh envelope.  Every call draws a new salt.
    fn seal(&self, plaintext: &[u8], password: &str) -> Result<Vec<u8>>;

    /// Recover the plaintext from an envelope.
    fn open(&self, envelope: &[u8], password: &str) -> Result<Vec<u8>>;
}

/// Tier 1: base64 transport only.  The password is ignored.
struct PlainEncoding;

/// Tiers 2 and 3: unstretched digest key.
struct DigestCbc {
    key_len: usize,
}

/// Tier 4: PBKDF2 key, no integrity tag.
struct Pbkdf2Cbc {
    iterations: u32,
}

/// Tier 5: PBKDF2 key plus encrypt-then-MAC.
struct AuthenticatedCbc {
    iterations: u32,
}

static PLAIN_ENCODING: PlainEncoding = PlainEncoding;
static DIGEST_AES128: DigestCbc = DigestCbc { key_len: 16 };
static DIGEST_AES256: DigestCbc = DigestCbc { key_len: 32 };
static PBKDF2_AES256: Pbkdf2Cbc = Pbkdf2Cbc {
    iterations: STANDARD_ITERATIONS,
};
static AUTHENTICATED_AES256: AuthenticatedCbc = AuthenticatedCbc {
    iterations: STRONG_ITERATIONS,
};

impl TierCipher for PlainEncoding {
    fn seal(&self, plaintext: &[u8], _password: &str) -> Result<Vec<u8>> {
        Ok(plaintext.to_vec())
    }

    fn open(&self, envelope: &[u8], _password: &str) -> Result<Vec<u8>> {
        Ok(envelope.to_vec())
    }
}

impl TierCipher for DigestCbc {
    fn seal(&self, plaintext: &[u8], password: &str) -> Result<Vec<u8>> {
        let salt = generate_salt();
        let key = CipherKey::from_digest(password.as_bytes(), &salt, self.key_len);
        Ok(salted(&salt, encryption::encrypt(key.as_bytes(), &salt, plaintext)?))
    }

    fn open(&self, envelope: &[u8], password: &str) -> Result<Vec<u8>> {
        let (salt, ciphertext) = split_salt(envelope)?;
        let key = CipherKey::from_digest(password.as_bytes(), salt, self.key_len);
        encryption::decrypt(key.as_bytes(), salt, ciphertext)
    }
}

impl TierCipher for Pbkdf2Cbc {
    fn seal(&self, plaintext: &[u8], password: &str) -> Result<Vec<u8>> {
        let salt = generate_salt();
        let key = CipherKey::from_pbkdf2(password.as_bytes(), &salt, self.iterations)?;
        Ok(salted(&salt, encryption::encrypt(key.as_bytes(), &salt, plaintext)?))
    }

    fn open(&self, envelope: &[u8], password: &str) -> Result<Vec<u8>> {
        let (salt, ciphertext) = split_salt(envelope)?;
        let key = CipherKey::from_pbkdf2(password.as_bytes(), salt, self.iterations)?;
        encryption::decrypt(key.as_bytes(), salt, ciphertext)
    }
}

impl TierCipher for AuthenticatedCbc {
    fn seal(&self, plaintext: &[u8], password: &str) -> Result<Vec<u8>> {
        let salt = generate_salt();
        let key = CipherKey::from_pbkdf2(password.as_bytes(), &salt, self.iterations)?;
        let ciphertext = encryption::encrypt(key.as_bytes(), &salt, plaintext)?;

        let hmac_key = derive_hmac_key(password.as_bytes(), &salt);
        let tag = integrity::compute_tag(&hmac_key, &ciphertext)?;

        let mut envelope = salted(&salt, ciphertext);
        envelope.extend_from_slice(&tag);
        Ok(envelope)
    }

    fn open(&self, envelope: &[u8], password: &str) -> Result<Vec<u8>> {
        if envelope.len() < SALT_LEN + TAG_LEN {
            return Err(VaultError::Decode(format!(
                "tier 5 envelope must be at least {} bytes, got {}",
                SALT_LEN + TAG_LEN,
                envelope.len()
            )));
        }
        let (salt, rest) = envelope.split_at(SALT_LEN);
        let (ciphertext, tag) = rest.split_at(rest.len() - TAG_LEN);

        // The tag is checked before the key is derived: unauthenticated
        // ciphertext is never decrypted.
        let hmac_key = derive_hmac_key(password.as_bytes(), salt);
        integrity::verify_tag(&hmac_key, ciphertext, tag)?;

        let key = CipherKey::from_pbkdf2(password.as_bytes(), salt, self.iterations)?;
        encryption::decrypt(key.as_bytes(), salt, ciphertext)
    }
}

fn salted(salt: &[u8], ciphertext: Vec<u8>) -> Vec<u8> {
    let mut out = Vec::with_capacity(salt.len() + ciphertext.len());
    out.extend_from_slice(salt);
    out.extend_from_slice(&ciphertext);
    out
}

fn split_salt(envelope: &[u8]) -> Result<(&[u8], &[u8])> {
    if envelope.len() < SALT_LEN {
        return Err(VaultError::Decode(format!(
            "envelope must be at least {SALT_LEN} bytes, got {}",
            envelope.len()
        )));
    }
    Ok(envelope.split_at(SALT_LEN))
}

/// An encryption tier, from 1 (encoding only) to 5 (authenticated).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[repr(u8)]
pub enum Tier {
    Encoded = 1,
    Aes128 = 2,
    Aes256 = 3,
    Aes256Pbkdf2 = 4,
    Aes256Authenticated = 5,
}

impl Tier {
    /// Every tier, weakest first.
    pub const ALL: [Tier; 5] = [
        Tier::Encoded,
        Tier::Aes128,
        Tier::Aes256,
        Tier::Aes256Pbkdf2,
        Tier::Aes256Authenticated,
    ];

    /// The integer stored in a vault item's `level` field.
    pub const fn level(self) -> u8 {
        self as u8
    }

    /// Every tier, strongest first.  This is the order encrypted import
    /// tries them in.
    pub fn strongest_first() -> impl Iterator<Item = Tier> {
        Self::ALL.into_iter().rev()
    }

    /// Short human description.
    pub fn description(self) -> &'static str {
        match self {
            Tier::Encoded => "base64 encoding, no encryption",
            Tier::Aes128 => "AES-128-CBC, SHA-256 key",
            Tier::Aes256 => "AES-256-CBC, SHA-256 key",
            Tier::Aes256Pbkdf2 => "AES-256-CBC, PBKDF2 100k",
            Tier::Aes256Authenticated => "AES-256-CBC, PBKDF2 200k, HMAC-SHA256",
        }
    }

    /// The byte-level strategy for this tier.
    pub fn cipher(self) -> &'static dyn TierCipher {
        match self {
            Tier::Encoded => &PLAIN_ENCODING,
            Tier::Aes128 => &DIGEST_AES128,
            Tier::Aes256 => &DIGEST_AES256,
            Tier::Aes256Pbkdf2 => &PBKDF2_AES256,
            Tier::Aes256Authenticated => &AUTHENTICATED_AES256,
        }
    }

    /// Encrypt `content` and return the base64 envelope.
    pub fn encrypt(self, content: &str, password: &str) -> Result<String> {
        tracing::debug!(tier = self.level(), "sealing envelope");
        let envelope = self.cipher().seal(content.as_bytes(), password)?;
        Ok(BASE64.encode(envelope))
    }

    /// Decrypt a base64 envelope produced by this tier.
    ///
    /// Tiers 1-4 have no integrity check: a wrong password usually ends in
    /// a decode error (invalid UTF-8), but can also return garbage text.
    pub fn decrypt(self, envelope: &str, password: &str) -> Result<String> {
        tracing::debug!(tier = self.level(), "opening envelope");
        let raw = BASE64
            .decode(envelope.trim())
            .map_err(|e| VaultError::Decode(format!("envelope is not valid base64: {e}")))?;
        let plaintext = self.cipher().open(&raw, password)?;
        String::from_utf8(plaintext)
            .map_err(|_| VaultError::Decode("decrypted content is not valid UTF-8".into()))
    }
}

impl TryFrom<u8> for Tier {
    type Error = VaultError;

    fn try_from(level: u8) -> Result<Self> {
        match level {
            1 => Ok(Tier::Encoded),
            2 => Ok(Tier::Aes128),
            3 => Ok(Tier::Aes256),
            4 => Ok(Tier::Aes256Pbkdf2),
            5 => Ok(Tier::Aes256Authenticated),
            other => Err(VaultError::InvalidTier(other)),
        }
    }
}

impl From<Tier> for u8 {
    fn from(tier: Tier) -> Self {
        tier.level()
    }
}

impl fmt::Display for Tier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.level())
    }
}

/// Encrypt `content` at the integer `tier`.
pub fn encrypt(content: &str, password: &str, tier: u8) -> Result<String> {
    Tier::try_from(tier)?.encrypt(content, password)
}

/// Decrypt `envelope` at the integer `tier`.
pub fn decrypt(envelope: &str, password: &str, tier: u8) -> Result<String> {
    Tier::try_from(tier)?.decrypt(envelope, password)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn levels_roundtrip_through_u8() {
        for tier in Tier::ALL {
            assert_eq!(Tier::try_from(tier.level()).unwrap(), tier);
        }
        assert!(matches!(Tier::try_from(0), Err(VaultError::InvalidTier(0))));
        assert!(matches!(Tier::try_from(6), Err(VaultError::InvalidTier(6))));
    }

    #[test]
    fn strongest_first_runs_five_to_one() {
        let order: Vec<u8> = Tier::strongest_first().map(Tier::level).collect();
        assert_eq!(order, vec![5, 4, 3, 2, 1]);
    }

    #[test]
    fn tier_one_is_plain_base64() {
        let envelope = Tier::Encoded.encrypt("hello", "ignored").unwrap();
        assert_eq!(envelope, "aGVsbG8=");
    }

    #[test]
    fn digest_tiers_prefix_the_salt() {
        for tier in [Tier::Aes128, Tier::Aes256] {
            let raw = BASE64.decode(tier.encrypt("abc", "pw").unwrap()).unwrap();
            assert_eq!(raw.len(), SALT_LEN + 16);
        }
    }

    #[test]
    fn short_envelopes_are_decode_errors() {
        let short = BASE64.encode([1u8; 8]);
        assert!(matches!(
            Tier::Aes256.decrypt(&short, "pw"),
            Err(VaultError::Decode(_))
        ));
        let short_tagged = BASE64.encode([1u8; SALT_LEN + TAG_LEN - 1]);
        assert!(matches!(
            Tier::Aes256Authenticated.decrypt(&short_tagged, "pw"),
            Err(VaultError::Decode(_))
        ));
    }

    #[test]
    fn malformed_base64_is_a_decode_error() {
        assert!(matches!(
            Tier::Encoded.decrypt("not base64!!", "pw"),
            Err(VaultError::Decode(_))
        ));
    }
}
