//! Export and import of the full item collection.
//!
//! Encrypted exports carry no tier marker, so importing one means trying
//! every tier from strongest to weakest and keeping the first that both
//! decrypts and parses.  Tiers 1-4 have no authentication tag; the
//! payload checksum is what stops a wrong password from importing garbage
//! that happens to parse.  Tier 1 ignores the password entirely, so a
//! tier-1 export opens with any password.

use crate::crypto::Tier;
use crate::errors::{Result, VaultError};
use crate::vault::store::require_password;
use crate::vault::{VaultItem, VaultStore};

use super::payload::ExportPayload;
use super::render;
use super::{ExportFormat, ImportOutcome, ImportSource};

/// Serialize `items` into a payload and seal it at `tier`.
pub fn export_encrypted(items: &[VaultItem], password: &str, tier: Tier) -> Result<String> {
    require_password(password)?;
    let json = ExportPayload::new(items.to_vec())?.to_json()?;
    let body = tier.encrypt(&json, password)?;
    tracing::info!(count = items.len(), tier = tier.level(), "exported encrypted payload");
    Ok(body)
}

/// Serialize `items` into a plain payload.
pub fn export_plain(items: &[VaultItem]) -> Result<String> {
    ExportPayload::new(items.to_vec())?.to_json()
}

/// Produce the file body for any export format.
///
/// `password` is only read for `ExportFormat::Encrypted`.
pub fn export(
    items: &[VaultItem],
    format: ExportFormat,
    password: Option<&str>,
    tier: Tier,
) -> Result<String> {
    match format {
        ExportFormat::Encrypted => {
            let password = password.ok_or_else(|| {
                VaultError::Validation("encrypted export requires a password".into())
            })?;
            export_encrypted(items, password, tier)
        }
        ExportFormat::Json => export_plain(items),
        ExportFormat::Csv => Ok(render::to_csv(items)),
        ExportFormat::Txt => Ok(render::to_txt(items, crate::vault::item::now())),
    }
}

/// Open an encrypted export, trying tiers 5 down to 1.
///
/// Every per-tier failure collapses into one `ImportFailed`.
pub fn import_encrypted(body: &str, password: &str) -> Result<ImportOutcome> {
    require_password(password)?;
    let body = body.trim();

    for tier in Tier::strongest_first() {
        let attempt = tier
            .decrypt(body, password)
            .and_then(|json| ExportPayload::parse(&json));

        match attempt {
            Ok(payload) => {
                tracing::info!(
                    tier = tier.level(),
                    count = payload.items.len(),
                    "encrypted import matched"
                );
                return Ok(ImportOutcome {
                    items: payload.items,
                    tier: Some(tier),
                });
            }
            Err(e) => tracing::debug!(tier = tier.level(), kind = ?e.kind(), "tier rejected"),
        }
    }

    Err(VaultError::ImportFailed)
}

/// Parse a plain JSON export.
pub fn import_plain(body: &str) -> Result<ImportOutcome> {
    let payload = ExportPayload::parse(body).map_err(|e| {
        tracing::debug!(error = %e, "plain import rejected");
        match e {
            VaultError::IntegrityCheckFailed => {
                VaultError::InvalidExport("items do not match the checksum".into())
            }
            other => VaultError::InvalidExport(other.to_string()),
        }
    })?;
    Ok(ImportOutcome {
        items: payload.items,
        tier: None,
    })
}

/// Decode a file body of the given source kind.
pub fn import(body: &str, source: ImportSource, password: Option<&str>) -> Result<ImportOutcome> {
    match source {
        ImportSource::Encrypted => {
            let password = password.ok_or_else(|| {
                VaultError::Validation("encrypted import requires a password".into())
            })?;
            import_encrypted(body, password)
        }
        ImportSource::Json => import_plain(body),
    }
}

/// Decode `body` and replace the store's collection with the result.
///
/// Nothing is written unless decoding succeeds.
pub fn import_into(
    store: &VaultStore,
    body: &str,
    source: ImportSource,
    password: Option<&str>,
) -> Result<ImportOutcome> {
    let outcome = import(body, source, password)?;
    store.replace_all(outcome.items.clone())?;
    Ok(outcome)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::vault::NewItem;

    fn items() -> Vec<VaultItem> {
        vec![
            VaultItem::new(NewItem {
                name: "A".into(),
                content: "first".into(),
                ..NewItem::default()
            }),
            VaultItem::new(NewItem {
                name: "B".into(),
                content: "second".into(),
                category: "work".into(),
                ..NewItem::default()
            }),
        ]
    }

    #[test]
    fn each_fast_tier_is_detected_on_import() {
        let original = items();
        for tier in [Tier::Encoded, Tier::Aes128, Tier::Aes256] {
            let body = export_encrypted(&original, "master", tier).unwrap();
            let outcome = import_encrypted(&body, "master").unwrap();
            assert_eq!(outcome.items, original);
            assert_eq!(outcome.tier, Some(tier));
        }
    }

    #[test]
    fn wrong_password_is_one_generic_error() {
        let body = export_encrypted(&items(), "master", Tier::Aes256).unwrap();
        assert!(matches!(
            import_encrypted(&body, "wrong"),
            Err(VaultError::ImportFailed)
        ));
    }

    #[test]
    fn surrounding_whitespace_is_ignored() {
        let body = export_encrypted(&items(), "master", Tier::Aes128).unwrap();
        let padded = format!("\n  {body}\n\n");
        assert!(import_encrypted(&padded, "master").is_ok());
    }

    #[test]
    fn garbage_body_fails_import() {
        assert!(matches!(
            import_encrypted("definitely not base64!!", "pw"),
            Err(VaultError::ImportFailed)
        ));
    }

    #[test]
    fn empty_password_is_rejected_up_front() {
        assert!(matches!(
            export_encrypted(&items(), "", Tier::Aes128),
            Err(VaultError::Validation(_))
        ));
        assert!(matches!(
            import_encrypted("abc", ""),
            Err(VaultError::Validation(_))
        ));
    }

    #[test]
    fn broken_plain_json_is_not_a_password_error() {
        let err = import_plain("{ not json").unwrap_err();
        assert!(matches!(err, VaultError::InvalidExport(_)));
        assert!(!err.to_string().contains("password"));

        let body = export(&items(), ExportFormat::Json, None, Tier::Encoded).unwrap();
        let tampered = body.replacen("\"first\"", "\"edited\"", 1);
        assert_ne!(tampered, body);
        assert!(matches!(
            import_plain(&tampered),
            Err(VaultError::InvalidExport(_))
        ));
    }

    #[test]
    fn plain_export_roundtrips() {
        let original = items();
        let body = export(&original, ExportFormat::Json, None, Tier::Encoded).unwrap();
        let outcome = import(&body, ImportSource::Json, None).unwrap();
        assert_eq!(outcome.items, original);
        assert_eq!(outcome.tier, None);
    }

    #[test]
    fn encrypted_export_needs_a_password() {
        assert!(export(&items(), ExportFormat::Encrypted, None, Tier::Aes256).is_err());
    }

    #[test]
    fn import_into_replaces_the_collection() {
        let store = VaultStore::in_memory();
        store
            .add_item(NewItem {
                name: "old".into(),
                ..NewItem::default()
            })
            .unwrap();

        let body = export_plain(&items()).unwrap();
        let outcome = import_into(&store, &body, ImportSource::Json, None).unwrap();

        let names: Vec<_> = store.snapshot().unwrap().into_iter().map(|i| i.name).collect();
        assert_eq!(names, vec!["A", "B"]);
        assert_eq!(outcome.items.len(), 2);
    }

    #[test]
    fn failed_import_leaves_store_untouched() {
        let store = VaultStore::in_memory();
        store
            .add_item(NewItem {
                name: "keep".into(),
                ..NewItem::default()
            })
            .unwrap();

        assert!(import_into(&store, "{ broken", ImportSource::Json, None).is_err());
        assert_eq!(store.item_count().unwrap(), 1);
    }
}
