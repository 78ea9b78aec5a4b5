//! Metadata-only listings.  Neither rendering decrypts anything; encrypted
//! items show their envelope.

use std::fmt::Write;

use chrono::NaiveDateTime;

use crate::vault::VaultItem;

const CSV_HEADER: [&str; 8] = [
    "ID", "Name", "Type", "Category", "Encrypted", "Level", "Created", "Modified",
];

/// Characters of content shown per item in the TXT listing.
pub const TXT_PREVIEW_CHARS: usize = 100;

fn timestamp(ts: &NaiveDateTime) -> String {
    ts.format("%Y-%m-%dT%H:%M:%S%.f").to_string()
}

fn yes_no(flag: bool) -> &'static str {
    if flag {
        "Yes"
    } else {
        "No"
    }
}

/// Quote a CSV field when it contains a delimiter, quote or line break.
fn csv_field(value: &str) -> String {
    if value.contains([',', '"', '\n', '\r']) {
        format!("\"{}\"", value.replace('"', "\"\""))
    } else {
        value.to_string()
    }
}

/// One header row plus one row per item, CRLF line endings.
pub fn to_csv(items: &[VaultItem]) -> String {
    let mut out = CSV_HEADER.join(",");
    out.push_str("\r\n");

    for item in items {
        let row = [
            csv_field(&item.id),
            csv_field(&item.name),
            item.item_type.to_string(),
            csv_field(&item.category),
            yes_no(item.encrypted).to_string(),
            item.level.to_string(),
            timestamp(&item.created),
            timestamp(&item.modified),
        ];
        out.push_str(&row.join(","));
        out.push_str("\r\n");
    }
    out
}

/// Human-readable listing headed by `generated_at`.
pub fn to_txt(items: &[VaultItem], generated_at: NaiveDateTime) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        "SecureVault Export - {}",
        generated_at.format("%Y-%m-%d %H:%M:%S")
    );
    let _ = writeln!(out, "{}\n", "=".repeat(60));

    for item in items {
        let category = if item.category.is_empty() {
            "N/A"
        } else {
            &item.category
        };
        let preview: String = item.content.chars().take(TXT_PREVIEW_CHARS).collect();

        let _ = writeln!(out, "Name: {}", item.name);
        let _ = writeln!(out, "Type: {}", item.item_type);
        let _ = writeln!(out, "Category: {category}");
        let _ = writeln!(out, "Encrypted: {}", yes_no(item.encrypted));
        if item.encrypted {
            let _ = writeln!(out, "Level: {}", item.level);
        }
        let _ = writeln!(out, "Content: {preview}...");
        let _ = writeln!(out, "{}\n", "-".repeat(60));
    }
    out
}
