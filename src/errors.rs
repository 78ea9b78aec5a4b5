use thiserror::Error;

/// All errors that can occur in SecureVault.
#[derive(Debug, Error)]
pub enum VaultError {
    // --- Input validation ---
    #[error("Invalid input: {0}")]
    Validation(String),

    #[error("Encryption tier {0} does not exist — choose a tier from 1 to 5")]
    InvalidTier(u8),

    // --- Crypto errors ---
    #[error("Encryption failed: {0}")]
    EncryptionFailed(String),

    #[error("Integrity check failed — wrong password or tampered data")]
    IntegrityCheckFailed,

    #[error("Decryption failed: {0}")]
    Decode(String),

    #[error("Key derivation failed: {0}")]
    KeyDerivationFailed(String),

    // --- Vault errors ---
    #[error("Item '{0}' not found")]
    ItemNotFound(String),

    #[error("Import failed — wrong password or corrupt file")]
    ImportFailed,

    #[error("Not a valid SecureVault export: {0}")]
    InvalidExport(String),

    #[error("Vault store is unavailable: a previous writer panicked")]
    StorePoisoned,

    // --- Account errors ---
    #[error("Stored credential is corrupt: {0}")]
    CorruptCredential(String),

    #[error("User '{0}' already exists")]
    UserAlreadyExists(String),

    #[error("Wrong username or password")]
    InvalidCredentials,

    // --- Config errors ---
    #[error("Config file error: {0}")]
    ConfigError(String),

    // --- IO errors ---
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    // --- Serialization errors ---
    #[error("Serialization error: {0}")]
    SerializationError(String),

    // --- Audit errors ---
    #[error("Audit error: {0}")]
    AuditError(String),

    // --- CLI errors ---
    #[error("Command failed: {0}")]
    CommandFailed(String),

    #[error("User cancelled operation")]
    UserCancelled,
}

/// Coarse classification of a [`VaultError`], for callers that want to
/// report a failure kind next to the human-readable message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Missing or invalid input, rejected before any cipher runs.
    Validation,
    /// Tier 5 authentication tag mismatch.
    Integrity,
    /// Transport-level failure decoding or decrypting an envelope.
    Decode,
    /// The referenced item does not exist.
    NotFound,
    /// No tier and parse combination reproduced a valid export.
    ImportFormat,
    /// Account registration or login failure.
    Credential,
    /// Persistence, configuration, audit or crypto backend failure.
    Storage,
    /// Interactive CLI failure.
    Interaction,
}

impl VaultError {
    /// Classify this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Validation(_) | Self::InvalidTier(_) => ErrorKind::Validation,
            Self::IntegrityCheckFailed => ErrorKind::Integrity,
            Self::Decode(_) => ErrorKind::Decode,
            Self::ItemNotFound(_) => ErrorKind::NotFound,
            Self::ImportFailed | Self::InvalidExport(_) => ErrorKind::ImportFormat,
            Self::CorruptCredential(_) | Self::UserAlreadyExists(_) | Self::InvalidCredentials => {
                ErrorKind::Credential
            }
            Self::EncryptionFailed(_)
            | Self::KeyDerivationFailed(_)
            | Self::StorePoisoned
            | Self::ConfigError(_)
            | Self::Io(_)
            | Self::SerializationError(_)
            | Self::AuditError(_) => ErrorKind::Storage,
            Self::CommandFailed(_) | Self::UserCancelled => ErrorKind::Interaction,
        }
    }
}

/// Convenience type alias for SecureVault results.
pub type Result<T> = std::result::Result<T, VaultError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cipher_failures_map_to_their_kinds() {
        assert_eq!(VaultError::IntegrityCheckFailed.kind(), ErrorKind::Integrity);
        assert_eq!(VaultError::Decode("bad".into()).kind(), ErrorKind::Decode);
        assert_eq!(VaultError::InvalidTier(9).kind(), ErrorKind::Validation);
        assert_eq!(VaultError::ImportFailed.kind(), ErrorKind::ImportFormat);
        assert_eq!(
            VaultError::ItemNotFound("abc".into()).kind(),
            ErrorKind::NotFound
        );
    }

    #[test]
    fn import_failure_message_is_generic() {
        let msg = VaultError::ImportFailed.to_string();
        assert!(msg.contains("wrong password or corrupt file"));
    }

    #[test]
    fn invalid_export_message_does_not_mention_passwords() {
        let err = VaultError::InvalidExport("checksum mismatch".into());
        assert_eq!(err.kind(), ErrorKind::ImportFormat);
        assert!(!err.to_string().contains("password"));
    }
}
