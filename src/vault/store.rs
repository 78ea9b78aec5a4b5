//! High-level item operations used by CLI commands.
//!
//! `VaultStore` owns the item collection behind a single `RwLock`.  Every
//! mutation runs as a transaction: clone the collection, apply the change,
//! persist the clone, then publish it.  A failure at any step leaves both
//! memory and disk as they were, and two writers in the same process can
//! no longer overwrite each other's changes.
//!
//! Separate processes sharing one data directory are not coordinated:
//! the last `items.json` written wins.

use std::path::{Path, PathBuf};
use std::sync::{RwLock, RwLockReadGuard};

use crate::crypto::Tier;
use crate::errors::{Result, VaultError};

use super::format;
use super::item::{ItemUpdate, NewItem, VaultItem};
use super::query::{self, ItemFilter, VaultStats};

/// File name of the item collection inside the data directory.
pub const ITEMS_FILE: &str = "items.json";

/// The item collection.  Create one with `VaultStore::open` or
/// `VaultStore::in_memory`.
pub struct VaultStore {
    /// Path to `items.json`, or `None` for a store that never touches disk.
    path: Option<PathBuf>,

    items: RwLock<Vec<VaultItem>>,
}

impl VaultStore {
    // ------------------------------------------------------------------
    // Construction
    // ------------------------------------------------------------------

    /// Open the collection in `data_dir`, starting empty if the file is
    /// missing.  Nothing is written until the first mutation.
    pub fn open(data_dir: &Path) -> Result<Self> {
        let path = data_dir.join(ITEMS_FILE);
        let items: Vec<VaultItem> = format::read_json(&path)?;
        tracing::debug!(path = %path.display(), count = items.len(), "opened vault");

        Ok(Self {
            path: Some(path),
            items: RwLock::new(items),
        })
    }

    /// A store that lives only in memory.
    pub fn in_memory() -> Self {
        Self {
            path: None,
            items: RwLock::new(Vec::new()),
        }
    }

    // ------------------------------------------------------------------
    // Transactions
    // ------------------------------------------------------------------

    fn read(&self) -> Result<RwLockReadGuard<'_, Vec<VaultItem>>> {
        self.items.read().map_err(|_| VaultError::StorePoisoned)
    }

    /// Run `change` against a copy of the collection under the write lock,
    /// persist the copy, then swap it in.
    fn transact<T>(&self, change: impl FnOnce(&mut Vec<VaultItem>) -> Result<T>) -> Result<T> {
        let mut guard = self.items.write().map_err(|_| VaultError::StorePoisoned)?;

        let mut next = guard.clone();
        let out = change(&mut next)?;
        self.persist(&next)?;
        *guard = next;

        Ok(out)
    }

    /// Like `transact`, for a change to one item.
    fn transact_item<T>(
        &self,
        id: &str,
        change: impl FnOnce(&mut VaultItem) -> Result<T>,
    ) -> Result<T> {
        self.transact(|items| {
            let item = items
                .iter_mut()
                .find(|i| i.id == id)
                .ok_or_else(|| VaultError::ItemNotFound(id.to_string()))?;
            change(item)
        })
    }

    fn persist(&self, items: &[VaultItem]) -> Result<()> {
        match &self.path {
            Some(path) => format::write_json_atomic(path, items),
            None => Ok(()),
        }
    }

    // ------------------------------------------------------------------
    // Item operations
    // ------------------------------------------------------------------

    /// Add a plaintext item and return it.
    pub fn add_item(&self, draft: NewItem) -> Result<VaultItem> {
        let item = VaultItem::new(draft);
        let added = item.clone();
        self.transact(move |items| {
            items.push(item);
            Ok(())
        })?;
        tracing::info!(id = %added.id, kind = %added.item_type, "added item");
        Ok(added)
    }

    /// Add a `file` item holding `bytes`.
    pub fn add_file(&self, name: &str, bytes: &[u8], category: &str) -> Result<VaultItem> {
        let item = VaultItem::from_file(name, bytes, category);
        let added = item.clone();
        self.transact(move |items| {
            items.push(item);
            Ok(())
        })?;
        tracing::info!(id = %added.id, size = bytes.len(), "added file");
        Ok(added)
    }

    /// Fetch a copy of one item.
    pub fn get_item(&self, id: &str) -> Result<VaultItem> {
        self.read()?
            .iter()
            .find(|i| i.id == id)
            .cloned()
            .ok_or_else(|| VaultError::ItemNotFound(id.to_string()))
    }

    /// Items matching `filter`, in insertion order.
    pub fn list_items(&self, filter: &ItemFilter) -> Result<Vec<VaultItem>> {
        Ok(self
            .read()?
            .iter()
            .filter(|i| filter.matches(i))
            .cloned()
            .collect())
    }

    /// Apply a partial update and return the updated item.
    pub fn update_item(&self, id: &str, update: ItemUpdate) -> Result<VaultItem> {
        if update.is_empty() {
            return Err(VaultError::Validation("nothing to update".into()));
        }
        self.transact_item(id, |item| {
            item.apply(update)?;
            Ok(item.clone())
        })
    }

    /// Remove an item and return it.
    pub fn delete_item(&self, id: &str) -> Result<VaultItem> {
        let removed = self.transact(|items| {
            let pos = items
                .iter()
                .position(|i| i.id == id)
                .ok_or_else(|| VaultError::ItemNotFound(id.to_string()))?;
            Ok(items.remove(pos))
        })?;
        tracing::info!(id, "deleted item");
        Ok(removed)
    }

    /// Encrypt an item's content at `tier`.
    pub fn encrypt_item(&self, id: &str, password: &str, tier: Tier) -> Result<VaultItem> {
        require_password(password)?;
        let item = self.transact_item(id, |item| {
            item.encrypt(password, tier)?;
            Ok(item.clone())
        })?;
        tracing::info!(id, tier = tier.level(), "encrypted item");
        Ok(item)
    }

    /// Decrypt an item with the tier recorded in its `level`.
    pub fn decrypt_item(&self, id: &str, password: &str) -> Result<VaultItem> {
        require_password(password)?;
        let item = self.transact_item(id, |item| {
            item.decrypt(password)?;
            Ok(item.clone())
        })?;
        tracing::info!(id, "decrypted item");
        Ok(item)
    }

    /// File name and raw bytes of a plaintext `file` item.
    pub fn file_contents(&self, id: &str) -> Result<(String, Vec<u8>)> {
        let item = self.get_item(id)?;
        let bytes = item.file_bytes()?;
        Ok((item.name, bytes))
    }

    /// Counts over the whole collection.
    pub fn stats(&self) -> Result<VaultStats> {
        Ok(VaultStats::collect(&self.read()?))
    }

    /// Distinct non-empty categories.
    pub fn categories(&self) -> Result<Vec<String>> {
        Ok(query::categories(&self.read()?))
    }

    /// A copy of every item.
    pub fn snapshot(&self) -> Result<Vec<VaultItem>> {
        Ok(self.read()?.clone())
    }

    /// Replace the whole collection (used by import; no merge).
    pub fn replace_all(&self, items: Vec<VaultItem>) -> Result<()> {
        let count = items.len();
        self.transact(move |current| {
            *current = items;
            Ok(())
        })?;
        tracing::info!(count, "replaced vault contents");
        Ok(())
    }

    // ------------------------------------------------------------------
    // Accessors
    // ------------------------------------------------------------------

    /// Path to `items.json`, if this store is backed by a file.
    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    /// Number of items.
    pub fn item_count(&self) -> Result<usize> {
        Ok(self.read()?.len())
    }
}

/// Empty passwords are rejected at the store boundary.  The tier layer
/// itself accepts them (tier 1 ignores the password entirely).
pub(crate) fn require_password(password: &str) -> Result<()> {
    if password.is_empty() {
        return Err(VaultError::Validation("password cannot be empty".into()));
    }
    Ok(())
}
