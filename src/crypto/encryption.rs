//! AES-CBC with zero-byte padding.
//!
//! The block transform used by tiers 2-5.  The key length picks the
//! variant: 16 bytes runs AES-128, 32 bytes runs AES-256.
//!
//! Padding appends `16 - len % 16` zero bytes, so a full block of zeros
//! is added when the input is already aligned.  Decryption strips every
//! trailing zero byte, which means plaintext that genuinely ends in `0x00`
//! loses those bytes on a round trip.  Existing envelopes depend on this
//! exact layout, so it must not be swapped for PKCS#7.

use aes::{Aes128, Aes256};
use cbc::cipher::block_padding::NoPadding;
use cbc::cipher::{BlockDecryptMut, BlockEncryptMut, KeyIvInit};

use crate::errors::{Result, VaultError};

/// AES block size in bytes.
pub const BLOCK_LEN: usize = 16;

type Aes128CbcEnc = cbc::Encryptor<Aes128>;
type Aes128CbcDec = cbc::Decryptor<Aes128>;
type Aes256CbcEnc = cbc::Encryptor<Aes256>;
type Aes256CbcDec = cbc::Decryptor<Aes256>;

/// Encrypt `plaintext` under `key` with the given IV.
///
/// Returns the raw ciphertext, always a non-zero multiple of 16 bytes.
pub fn encrypt(key: &[u8], iv: &[u8], plaintext: &[u8]) -> Result<Vec<u8>> {
    let mut buf = zero_pad(plaintext);
    let len = buf.len();

    let written = match key.len() {
        16 => Aes128CbcEnc::new_from_slices(key, iv)
            .map_err(|e| VaultError::EncryptionFailed(format!("invalid key or IV: {e}")))?
            .encrypt_padded_mut::<NoPadding>(&mut buf, len)
            .map(<[u8]>::len),
        32 => Aes256CbcEnc::new_from_slices(key, iv)
            .map_err(|e| VaultError::EncryptionFailed(format!("invalid key or IV: {e}")))?
            .encrypt_padded_mut::<NoPadding>(&mut buf, len)
            .map(<[u8]>::len),
        other => {
            return Err(VaultError::EncryptionFailed(format!(
                "unsupported AES key length {other}"
            )))
        }
    }
    .map_err(|_| VaultError::EncryptionFailed("block encryption failed".into()))?;

    buf.truncate(written);
    Ok(buf)
}

/// Decrypt `ciphertext` produced by `encrypt` and strip the zero padding.
///
/// Fails with a decode error when the ciphertext is not block aligned.
/// A wrong key does *not* fail here; it yields garbage bytes.
pub fn decrypt(key: &[u8], iv: &[u8], ciphertext: &[u8]) -> Result<Vec<u8>> {
    if ciphertext.len() % BLOCK_LEN != 0 {
        return Err(VaultError::Decode(format!(
            "ciphertext length {} is not a multiple of {BLOCK_LEN}",
            ciphertext.len()
        )));
    }

    let mut buf = ciphertext.to_vec();
    let plain_len = match key.len() {
        16 => Aes128CbcDec::new_from_slices(key, iv)
            .map_err(|e| VaultError::Decode(format!("invalid key or IV: {e}")))?
            .decrypt_padded_mut::<NoPadding>(&mut buf)
            .map(<[u8]>::len),
        32 => Aes256CbcDec::new_from_slices(key, iv)
            .map_err(|e| VaultError::Decode(format!("invalid key or IV: {e}")))?
            .decrypt_padded_mut::<NoPadding>(&mut buf)
            .map(<[u8]>::len),
        other => {
            return Err(VaultError::Decode(format!(
                "unsupported AES key length {other}"
            )))
        }
    }
    .map_err(|_| VaultError::Decode("block decryption failed".into()))?;

    buf.truncate(plain_len);
    strip_zero_padding(&mut buf);
    Ok(buf)
}

/// Append `16 - len % 16` zero bytes.
pub fn zero_pad(data: &[u8]) -> Vec<u8> {
    let pad = BLOCK_LEN - data.len() % BLOCK_LEN;
    let mut out = Vec::with_capacity(data.len() + pad);
    out.extend_from_slice(data);
    out.resize(data.len() + pad, 0);
    out
}

/// Remove every trailing zero byte.
pub fn strip_zero_padding(data: &mut Vec<u8>) {
    let end = data.iter().rposition(|&b| b != 0).map_or(0, |i| i + 1);
    data.truncate(end);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_pad_always_adds_at_least_one_byte() {
        assert_eq!(zero_pad(b"").len(), 16);
        assert_eq!(zero_pad(&[1u8; 15]).len(), 16);
        assert_eq!(zero_pad(&[1u8; 16]).len(), 32);
        assert_eq!(zero_pad(&[1u8; 17]).len(), 32);
    }

    #[test]
    fn strip_removes_all_trailing_zeros_only() {
        let mut data = vec![0, 1, 0, 2, 0, 0];
        strip_zero_padding(&mut data);
        assert_eq!(data, vec![0, 1, 0, 2]);

        let mut zeros = vec![0u8; 5];
        strip_zero_padding(&mut zeros);
        assert!(zeros.is_empty());
    }

    #[test]
    fn aes128_and_aes256_roundtrip() {
        let iv = [9u8; 16];
        for key in [vec![1u8; 16], vec![2u8; 32]] {
            let ct = encrypt(&key, &iv, b"block me").unwrap();
            assert_eq!(ct.len(), 16);
            assert_eq!(decrypt(&key, &iv, &ct).unwrap(), b"block me");
        }
    }

    #[test]
    fn aes256_matches_nist_sp800_38a_first_block() {
        // F.2.5 CBC-AES256.Encrypt, block #1.  The zero-pad block appended
        // after it is ignored here.
        let key = hex::decode("603deb1015ca71be2b73aef0857d77811f352c073b6108d72d9810a30914dff4")
            .unwrap();
        let iv = hex::decode("000102030405060708090a0b0c0d0e0f").unwrap();
        let pt = hex::decode("6bc1bee22e409f96e93d7e117393172a").unwrap();

        let ct = encrypt(&key, &iv, &pt).unwrap();
        assert_eq!(
            hex::encode(&ct[..16]),
            "f58c4c04d6e5f1ba779eabfb5f7bfbd6"
        );
    }

    #[test]
    fn unaligned_ciphertext_is_a_decode_error() {
        let err = decrypt(&[0u8; 32], &[0u8; 16], &[1u8; 15]).unwrap_err();
        assert!(matches!(err, VaultError::Decode(_)));
    }

    #[test]
    fn unsupported_key_length_is_rejected() {
        assert!(encrypt(&[0u8; 24], &[0u8; 16], b"x").is_err());
    }
}
