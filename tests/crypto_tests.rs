//! Integration tests for the tiered cipher and credential records.

use securevault::crypto::integrity::TAG_LEN;
use securevault::crypto::kdf::SALT_LEN;
use securevault::crypto::{decrypt, encrypt, hash_password, verify_password, Tier};
use securevault::errors::{ErrorKind, VaultError};

use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;

// ---------------------------------------------------------------------------
// Round trips
// ---------------------------------------------------------------------------

#[test]
fn every_tier_roundtrips_text() {
    let samples = ["hello", "", "exactly sixteen!", "ünïcödé ✓ text", "line\nbreaks\n"];
    for tier in 1..=5u8 {
        for sample in samples {
            let envelope = encrypt(sample, "pw-123", tier).unwrap();
            assert_eq!(
                decrypt(&envelope, "pw-123", tier).unwrap(),
                sample,
                "tier {tier} failed for {sample:?}"
            );
        }
    }
}

#[test]
fn trailing_zero_bytes_are_lost_on_cipher_tiers() {
    let original = "data\0\0";
    for tier in 2..=5u8 {
        let envelope = encrypt(original, "pw", tier).unwrap();
        assert_eq!(decrypt(&envelope, "pw", tier).unwrap(), "data");
    }
}

#[test]
fn tier_one_ignores_the_password() {
    let envelope = encrypt("public", "", 1).unwrap();
    assert_eq!(envelope, BASE64.encode("public"));
    assert_eq!(decrypt(&envelope, "anything at all", 1).unwrap(), "public");
}

#[test]
fn cipher_tiers_use_a_fresh_salt_each_time() {
    for tier in 2..=5u8 {
        let a = encrypt("same text", "pw", tier).unwrap();
        let b = encrypt("same text", "pw", tier).unwrap();
        assert_ne!(a, b, "tier {tier} reused its salt");
    }
}

#[test]
fn envelope_layout_matches_tier() {
    let text = "0123456789"; // pads to one block
    for tier in 2..=4u8 {
        let raw = BASE64.decode(encrypt(text, "pw", tier).unwrap()).unwrap();
        assert_eq!(raw.len(), SALT_LEN + 16);
    }
    let raw = BASE64.decode(encrypt(text, "pw", 5).unwrap()).unwrap();
    assert_eq!(raw.len(), SALT_LEN + 16 + TAG_LEN);
}

// ---------------------------------------------------------------------------
// Failures
// ---------------------------------------------------------------------------

#[test]
fn tier_two_wrong_password_never_returns_plaintext() {
    let envelope = encrypt("hello", "secret123", 2).unwrap();
    assert_eq!(decrypt(&envelope, "secret123", 2).unwrap(), "hello");

    match decrypt(&envelope, "wrongpass", 2) {
        Ok(text) => assert_ne!(text, "hello"),
        Err(e) => assert_eq!(e.kind(), ErrorKind::Decode),
    }
}

#[test]
fn tier_five_wrong_password_is_an_integrity_error() {
    let envelope = encrypt("guarded", "right", 5).unwrap();
    let err = decrypt(&envelope, "wrong", 5).unwrap_err();
    assert!(matches!(err, VaultError::IntegrityCheckFailed));
    assert_eq!(err.kind(), ErrorKind::Integrity);
}

#[test]
fn tier_five_detects_any_flipped_bit() {
    let envelope = encrypt("guarded content", "pw", 5).unwrap();
    let raw = BASE64.decode(&envelope).unwrap();

    // Every bit of the ciphertext and the tag.
    for index in SALT_LEN..raw.len() {
        for bit in 0..8 {
            let mut tampered = raw.clone();
            tampered[index] ^= 1 << bit;
            let err = decrypt(&BASE64.encode(&tampered), "pw", 5).unwrap_err();
            assert!(
                matches!(err, VaultError::IntegrityCheckFailed),
                "byte {index} bit {bit} went undetected"
            );
        }
    }
}

#[test]
fn unknown_tier_is_rejected() {
    assert!(matches!(encrypt("x", "pw", 0), Err(VaultError::InvalidTier(0))));
    assert!(matches!(decrypt("eA==", "pw", 6), Err(VaultError::InvalidTier(6))));
}

#[test]
fn malformed_envelopes_are_decode_errors() {
    for tier in 1..=5u8 {
        let err = decrypt("%%% not base64 %%%", "pw", tier).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Decode, "tier {tier}");
    }

    // Salt present but ciphertext not block-aligned.
    let short = BASE64.encode([7u8; SALT_LEN + 5]);
    for tier in 2..=4u8 {
        assert_eq!(decrypt(&short, "pw", tier).unwrap_err().kind(), ErrorKind::Decode);
    }

    // Too short to hold salt and tag.
    let tiny = BASE64.encode([1u8; 20]);
    assert_eq!(decrypt(&tiny, "pw", 5).unwrap_err().kind(), ErrorKind::Decode);
}

#[test]
fn tier_enum_and_integer_dispatch_agree() {
    for tier in Tier::ALL {
        let envelope = tier.encrypt("same path", "pw").unwrap();
        assert_eq!(decrypt(&envelope, "pw", tier.level()).unwrap(), "same path");
    }
}

// ---------------------------------------------------------------------------
// Credentials
// ---------------------------------------------------------------------------

#[test]
fn credential_records_verify_only_their_password() {
    let record = hash_password("open sesame").unwrap();
    assert_eq!(record.len(), 96);
    assert!(record.chars().all(|c| c.is_ascii_hexdigit()));

    assert!(verify_password(&record, "open sesame").unwrap());
    assert!(!verify_password(&record, "open sesame!").unwrap());
    assert!(!verify_password(&record, "").unwrap());
}

#[test]
fn corrupt_credential_record_is_an_error() {
    assert!(matches!(
        verify_password("abc", "pw"),
        Err(VaultError::CorruptCredential(_))
    ));
}
