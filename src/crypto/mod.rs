//! Cryptographic primitives for SecureVault.
//!
//! This module provides:
//! - The five encryption tiers and their envelope formats (`tier`)
//! - AES-CBC with zero padding (`encryption`)
//! - PBKDF2 and digest key derivation (`kdf`, `keys`)
//! - HMAC-SHA256 tags for tier 5 (`integrity`)
//! - Account password records (`credential`)
//! - Password generation and strength scoring (`generator`)

pub mod credential;
pub mod encryption;
pub mod generator;
pub mod integrity;
pub mod kdf;
pub mod keys;
pub mod tier;

// Re-export the most commonly used items so callers can write:
//   use crate::crypto::{Tier, encrypt, decrypt, ...};
pub use credential::{hash_password, verify_password};
pub use generator::{check_strength, generate_password, PasswordPolicy, StrengthReport};
pub use kdf::{derive_key, generate_salt};
pub use tier::{decrypt, encrypt, Tier, TierCipher};
