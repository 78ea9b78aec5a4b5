//! Vault module — the item collection and its encryption lifecycle.
//!
//! This module provides:
//! - `VaultItem`, its type and state, drafts and updates (`item`)
//! - Filtering and statistics (`query`)
//! - Atomic JSON files on disk (`format`)
//! - The `VaultStore` collection with single-writer transactions (`store`)

pub mod format;
pub mod item;
pub mod query;
pub mod store;

// Re-export the most commonly used items.
pub use item::{ItemState, ItemType, ItemUpdate, NewItem, VaultItem};
pub use query::{ItemFilter, VaultStats};
pub use store::VaultStore;
