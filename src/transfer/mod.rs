//! Moving the whole collection in and out of the vault.
//!
//! - `payload`: the structured document every export wraps
//! - `codec`: encrypted and plain export, brute-force encrypted import
//! - `render`: metadata-only CSV and TXT listings

pub mod codec;
pub mod payload;
pub mod render;

use std::fmt;
use std::path::Path;
use std::str::FromStr;

use crate::crypto::Tier;
use crate::errors::{Result, VaultError};
use crate::vault::VaultItem;

pub use codec::{
    export, export_encrypted, export_plain, import, import_encrypted, import_into, import_plain,
};
pub use payload::ExportPayload;

/// Output format for `export`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ExportFormat {
    /// Payload JSON sealed with a tier, written as a base64 `.encript` file.
    #[default]
    Encrypted,
    /// Payload JSON, unencrypted.
    Json,
    /// Item metadata as CSV.
    Csv,
    /// Human-readable listing.
    Txt,
}

impl ExportFormat {
    pub fn extension(self) -> &'static str {
        match self {
            ExportFormat::Encrypted => "encript",
            ExportFormat::Json => "json",
            ExportFormat::Csv => "csv",
            ExportFormat::Txt => "txt",
        }
    }

    /// Whether this format needs a password.
    pub fn is_encrypted(self) -> bool {
        self == ExportFormat::Encrypted
    }
}

impl fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ExportFormat::Encrypted => "encrypted",
            ExportFormat::Json => "json",
            ExportFormat::Csv => "csv",
            ExportFormat::Txt => "txt",
        };
        f.write_str(name)
    }
}

impl FromStr for ExportFormat {
    type Err = VaultError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "encrypted" | "encript" => Ok(ExportFormat::Encrypted),
            "json" => Ok(ExportFormat::Json),
            "csv" => Ok(ExportFormat::Csv),
            "txt" | "text" => Ok(ExportFormat::Txt),
            other => Err(VaultError::Validation(format!(
                "unknown export format '{other}' — use encrypted, json, csv or txt"
            ))),
        }
    }
}

/// What kind of file an import reads.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImportSource {
    Encrypted,
    Json,
}

impl ImportSource {
    /// Pick the source from an explicit format name, else the file extension.
    pub fn detect(path: &Path, explicit: Option<&str>) -> Result<Self> {
        if let Some(name) = explicit {
            return match name.parse::<ExportFormat>()? {
                ExportFormat::Encrypted => Ok(ImportSource::Encrypted),
                ExportFormat::Json => Ok(ImportSource::Json),
                other => Err(VaultError::Validation(format!(
                    "{other} exports cannot be imported"
                ))),
            };
        }

        match path
            .extension()
            .and_then(|e| e.to_str())
            .map(str::to_ascii_lowercase)
            .as_deref()
        {
            Some("encript") => Ok(ImportSource::Encrypted),
            Some("json") => Ok(ImportSource::Json),
            _ => Err(VaultError::Validation(format!(
                "cannot tell the format of '{}' — use a .encript or .json file, or pass --format",
                path.display()
            ))),
        }
    }
}

/// Items recovered by an import.
#[derive(Debug, Clone, PartialEq)]
pub struct ImportOutcome {
    pub items: Vec<VaultItem>,
    /// The tier that opened an encrypted export; `None` for plain imports.
    pub tier: Option<Tier>,
}
