//! The structured export document.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

use crate::errors::{Result, VaultError};
use crate::vault::item::now;
use crate::vault::VaultItem;

/// Version string written into new exports.
pub const EXPORT_VERSION: &str = env!("CARGO_PKG_VERSION");

/// `{ items, version, exported_at, checksum }`, pretty-printed.
///
/// Older exports have no `checksum`; they still load.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExportPayload {
    #[serde(default)]
    pub items: Vec<VaultItem>,

    #[serde(default)]
    pub version: String,

    #[serde(default)]
    pub exported_at: Option<NaiveDateTime>,

    /// SHA-256 hex of the compact JSON of `items`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub checksum: Option<String>,
}

impl ExportPayload {
    /// Wrap `items`, stamping the version, time and checksum.
    pub fn new(items: Vec<VaultItem>) -> Result<Self> {
        let checksum = items_checksum(&items)?;
        Ok(Self {
            items,
            version: EXPORT_VERSION.to_string(),
            exported_at: Some(now()),
            checksum: Some(checksum),
        })
    }

    /// Parse a payload and check its checksum when one is present.
    pub fn parse(text: &str) -> Result<Self> {
        let payload: Self = serde_json::from_str(text)
            .map_err(|e| VaultError::SerializationError(format!("export payload: {e}")))?;
        payload.verify()?;
        Ok(payload)
    }

    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string_pretty(self)
            .map_err(|e| VaultError::SerializationError(format!("export payload: {e}")))
    }

    /// A missing checksum passes; a present one must match.
    pub fn verify(&self) -> Result<()> {
        match &self.checksum {
            Some(expected) if !expected.eq_ignore_ascii_case(&items_checksum(&self.items)?) => {
                Err(VaultError::IntegrityCheckFailed)
            }
            _ => Ok(()),
        }
    }
}

fn items_checksum(items: &[VaultItem]) -> Result<String> {
    let bytes = serde_json::to_vec(items)
        .map_err(|e| VaultError::SerializationError(format!("export items: {e}")))?;
    Ok(hex::encode(Sha256::digest(&bytes)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::vault::NewItem;

    fn sample() -> Vec<VaultItem> {
        vec![VaultItem::new(NewItem {
            name: "A".into(),
            ..NewItem::default()
        })]
    }

    #[test]
    fn fresh_payload_verifies() {
        let payload = ExportPayload::new(sample()).unwrap();
        let text = payload.to_json().unwrap();
        let back = ExportPayload::parse(&text).unwrap();
        assert_eq!(back.items, payload.items);
        assert_eq!(back.version, EXPORT_VERSION);
    }

    #[test]
    fn tampered_items_fail_the_checksum() {
        let mut payload = ExportPayload::new(sample()).unwrap();
        payload.items[0].name = "B".into();
        let text = payload.to_json().unwrap();
        assert!(matches!(
            ExportPayload::parse(&text),
            Err(VaultError::IntegrityCheckFailed)
        ));
    }

    #[test]
    fn payload_without_checksum_loads() {
        let text = r#"{
            "items": [],
            "version": "1.0.0",
            "exported_at": "2024-05-01T09:00:00.000001"
        }"#;
        let payload = ExportPayload::parse(text).unwrap();
        assert!(payload.items.is_empty());
        assert!(payload.checksum.is_none());
    }

    #[test]
    fn non_payload_json_is_rejected() {
        assert!(ExportPayload::parse("[1, 2, 3]").is_err());
        assert!(ExportPayload::parse("not json").is_err());
    }
}
