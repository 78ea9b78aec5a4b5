//! Vault items and their encryption lifecycle.
//!
//! An item is either `Plaintext` (`encrypted = false`, `level = 0`) or
//! `Encrypted(tier)` (`encrypted = true`, `level = tier`).  The two stored
//! fields are kept for compatibility with existing `items.json` files;
//! [`VaultItem::state`] is the only way the rest of the crate reads them.

use std::fmt;
use std::str::FromStr;

use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;
use chrono::{Local, NaiveDateTime};
use rand::RngCore;
use serde::{Deserialize, Serialize};

use crate::crypto::Tier;
use crate::errors::{Result, VaultError};

/// Kind of content an item holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ItemType {
    #[default]
    Text,
    Password,
    Note,
    /// Content is base64 of the raw file bytes.
    File,
}

impl ItemType {
    pub const ALL: [ItemType; 4] = [
        ItemType::Text,
        ItemType::Password,
        ItemType::Note,
        ItemType::File,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            ItemType::Text => "text",
            ItemType::Password => "password",
            ItemType::Note => "note",
            ItemType::File => "file",
        }
    }
}

impl fmt::Display for ItemType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ItemType {
    type Err = VaultError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "text" => Ok(ItemType::Text),
            "password" => Ok(ItemType::Password),
            "note" => Ok(ItemType::Note),
            "file" => Ok(ItemType::File),
            other => Err(VaultError::Validation(format!(
                "unknown item type '{other}' — use text, password, note or file"
            ))),
        }
    }
}

/// Encryption state derived from `encrypted` + `level`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ItemState {
    Plaintext,
    Encrypted(Tier),
}

/// A single stored item.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VaultItem {
    /// 32 hex characters, generated on creation.
    pub id: String,

    pub name: String,

    #[serde(rename = "type", default)]
    pub item_type: ItemType,

    /// Plaintext, or a base64 envelope while encrypted.
    #[serde(default)]
    pub content: String,

    #[serde(default)]
    pub category: String,

    #[serde(default)]
    pub tags: Vec<String>,

    #[serde(default)]
    pub encrypted: bool,

    #[serde(default)]
    pub level: u8,

    pub created: NaiveDateTime,

    pub modified: NaiveDateTime,
}

/// Fields supplied when adding an item.
#[derive(Debug, Clone, Default)]
pub struct NewItem {
    pub name: String,
    pub item_type: ItemType,
    pub content: String,
    pub category: String,
    pub tags: Vec<String>,
}

/// Partial update; `None` leaves a field untouched.
#[derive(Debug, Clone, Default)]
pub struct ItemUpdate {
    pub name: Option<String>,
    pub item_type: Option<ItemType>,
    pub content: Option<String>,
    pub category: Option<String>,
    pub tags: Option<Vec<String>>,
}

impl ItemUpdate {
    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.item_type.is_none()
            && self.content.is_none()
            && self.category.is_none()
            && self.tags.is_none()
    }
}

/// Current local time, the timestamp flavour `items.json` has always used.
pub(crate) fn now() -> NaiveDateTime {
    Local::now().naive_local()
}

/// 16 random bytes, hex encoded.
pub(crate) fn generate_id() -> String {
    let mut bytes = [0u8; 16];
    rand::rng().fill_bytes(&mut bytes);
    hex::encode(bytes)
}

impl VaultItem {
    /// Build a fresh plaintext item.
    pub fn new(draft: NewItem) -> Self {
        let now = now();
        Self {
            id: generate_id(),
            name: draft.name,
            item_type: draft.item_type,
            content: draft.content,
            category: draft.category,
            tags: draft.tags,
            encrypted: false,
            level: 0,
            created: now,
            modified: now,
        }
    }

    /// Build a `file` item holding `bytes`.
    pub fn from_file(name: &str, bytes: &[u8], category: &str) -> Self {
        Self::new(NewItem {
            name: name.to_string(),
            item_type: ItemType::File,
            content: BASE64.encode(bytes),
            category: category.to_string(),
            tags: Vec::new(),
        })
    }

    /// Interpret `encrypted` + `level`.
    ///
    /// Items loaded from disk may break the `encrypted == (level != 0)`
    /// rule; those are rejected rather than guessed at.
    pub fn state(&self) -> Result<ItemState> {
        match (self.encrypted, self.level) {
            (false, 0) => Ok(ItemState::Plaintext),
            (true, level) if level != 0 => Tier::try_from(level)
                .map(ItemState::Encrypted)
                .map_err(|_| self.inconsistent()),
            _ => Err(self.inconsistent()),
        }
    }

    fn inconsistent(&self) -> VaultError {
        VaultError::Validation(format!(
            "item '{}' has inconsistent state (encrypted={}, level={})",
            self.id, self.encrypted, self.level
        ))
    }

    /// `Plaintext` -> `Encrypted(tier)`.
    ///
    /// The envelope is computed before any field changes, so on failure
    /// the item is untouched.
    pub fn encrypt(&mut self, password: &str, tier: Tier) -> Result<()> {
        if let ItemState::Encrypted(current) = self.state()? {
            return Err(VaultError::Validation(format!(
                "item '{}' is already encrypted at tier {current} — decrypt it first",
                self.id
            )));
        }

        let envelope = tier.encrypt(&self.content, password)?;

        self.content = envelope;
        self.encrypted = true;
        self.level = tier.level();
        self.touch();
        Ok(())
    }

    /// `Encrypted(tier)` -> `Plaintext`, using the stored tier.
    pub fn decrypt(&mut self, password: &str) -> Result<()> {
        let tier = match self.state()? {
            ItemState::Encrypted(tier) => tier,
            ItemState::Plaintext => {
                return Err(VaultError::Validation(format!(
                    "item '{}' is not encrypted",
                    self.id
                )))
            }
        };

        let plaintext = tier.decrypt(&self.content, password)?;

        self.content = plaintext;
        self.encrypted = false;
        self.level = 0;
        self.touch();
        Ok(())
    }

    /// Apply a partial update.
    ///
    /// Content can only be replaced while the item is plaintext; writing
    /// over an envelope would leave `level` describing data that is gone.
    pub fn apply(&mut self, update: ItemUpdate) -> Result<()> {
        if update.content.is_some() && self.state()? != ItemState::Plaintext {
            return Err(VaultError::Validation(format!(
                "item '{}' is encrypted — decrypt it before changing its content",
                self.id
            )));
        }

        if let Some(name) = update.name {
            self.name = name;
        }
        if let Some(item_type) = update.item_type {
            self.item_type = item_type;
        }
        if let Some(content) = update.content {
            self.content = content;
        }
        if let Some(category) = update.category {
            self.category = category;
        }
        if let Some(tags) = update.tags {
            self.tags = tags;
        }
        self.touch();
        Ok(())
    }

    /// Raw bytes of a plaintext `file` item.
    pub fn file_bytes(&self) -> Result<Vec<u8>> {
        if self.item_type != ItemType::File {
            return Err(VaultError::Validation(format!(
                "item '{}' is a {} item, not a file",
                self.id, self.item_type
            )));
        }
        if self.state()? != ItemState::Plaintext {
            return Err(VaultError::Validation(format!(
                "item '{}' is encrypted — decrypt it before downloading",
                self.id
            )));
        }
        BASE64
            .decode(self.content.trim())
            .map_err(|e| VaultError::Decode(format!("file content is not valid base64: {e}")))
    }

    fn touch(&mut self) {
        self.modified = now();
    }
}
