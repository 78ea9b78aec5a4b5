use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::crypto::Tier;
use crate::errors::{Result, VaultError};

/// Project-level configuration, loaded from `.securevault.toml`.
///
/// Every field has a sensible default so SecureVault works out-of-the-box
/// without any config file at all.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    /// Directory (relative to the working directory) holding `items.json`,
    /// `users.json` and `audit.db`.
    #[serde(default = "default_data_dir")]
    pub data_dir: String,

    /// Tier used by `encrypt` when `--tier` is not given.
    #[serde(default = "default_tier")]
    pub default_tier: u8,

    /// Tier used by encrypted `export` when `--tier` is not given.
    #[serde(default = "default_export_tier")]
    pub export_tier: u8,

    /// Length of passwords produced by `generate`.
    #[serde(default = "default_generator_length")]
    pub generator_length: usize,

    /// Shortest password `user register` accepts.
    #[serde(default = "default_min_password_len")]
    pub min_password_len: usize,
}

// ── Serde default helpers ────────────────────────────────────────────

fn default_data_dir() -> String {
    "data".to_string()
}

fn default_tier() -> u8 {
    1
}

fn default_export_tier() -> u8 {
    5
}

fn default_generator_length() -> usize {
    16
}

fn default_min_password_len() -> usize {
    crate::accounts::MIN_PASSWORD_LEN
}

// ── Implementation ───────────────────────────────────────────────────

impl Default for Settings {
    fn default() -> Self {
        Self {
            data_dir: default_data_dir(),
            default_tier: default_tier(),
            export_tier: default_export_tier(),
            generator_length: default_generator_length(),
            min_password_len: default_min_password_len(),
        }
    }
}

impl Settings {
    /// Name of the config file we look for in the project root.
    pub const FILE_NAME: &'static str = ".securevault.toml";

    /// Load settings from `<project_dir>/.securevault.toml`.
    ///
    /// If the file does not exist, sensible defaults are returned.
    /// If the file exists but cannot be parsed, or names a tier that does
    /// not exist, an error is returned.
    pub fn load(project_dir: &Path) -> Result<Self> {
        let config_path = project_dir.join(Self::FILE_NAME);

        if !config_path.exists() {
            return Ok(Self::default());
        }

        let contents = std::fs::read_to_string(&config_path)?;

        let settings: Settings = toml::from_str(&contents).map_err(|e| {
            VaultError::ConfigError(format!("Failed to parse {}: {e}", config_path.display()))
        })?;

        settings.validate()?;
        Ok(settings)
    }

    fn validate(&self) -> Result<()> {
        for (field, value) in [
            ("default_tier", self.default_tier),
            ("export_tier", self.export_tier),
        ] {
            if Tier::try_from(value).is_err() {
                return Err(VaultError::ConfigError(format!(
                    "{field} = {value} is not a tier (1-5)"
                )));
            }
        }
        if self.generator_length == 0 {
            return Err(VaultError::ConfigError(
                "generator_length must be at least 1".into(),
            ));
        }
        Ok(())
    }

    /// Resolve the data directory against `project_dir`.
    pub fn data_path(&self, project_dir: &Path) -> PathBuf {
        project_dir.join(&self.data_dir)
    }

    /// `default_tier` as a `Tier`.
    pub fn default_tier(&self) -> Result<Tier> {
        Tier::try_from(self.default_tier)
    }

    /// `export_tier` as a `Tier`.
    pub fn export_tier(&self) -> Result<Tier> {
        Tier::try_from(self.export_tier)
    }
}

// ── Tests ────────────────────────────────────────────────────────────
