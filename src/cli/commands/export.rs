//! `securevault export` — export every item.
//!
//! Supported formats:
//! - `encrypted` (default): payload sealed at a tier, base64 `.encript` body
//! - `json`: the payload unencrypted
//! - `csv`, `txt`: item metadata listings (content is never decrypted)

use std::fs;
use std::path::Path;

use crate::cli::output;
use crate::cli::{open_store, prompt_new_password, settings, Cli};
use crate::crypto::Tier;
use crate::errors::{Result, VaultError};
use crate::transfer::{self, ExportFormat};
use crate::vault::store::ITEMS_FILE;

/// Execute the `export` command.
pub fn execute(cli: &Cli, format: &str, tier: Option<u8>, output_path: Option<&str>) -> Result<()> {
    let format: ExportFormat = format.parse()?;
    let tier = match tier {
        Some(level) => Tier::try_from(level)?,
        None => settings()?.export_tier()?,
    };

    let store = open_store(cli)?;
    let items = store.snapshot()?;

    let password = if format.is_encrypted() {
        Some(prompt_new_password("Export password", 1)?)
    } else {
        None
    };

    let content = transfer::export(&items, format, password.as_deref().map(String::as_str), tier)?;

    // Write to file or stdout.
    match output_path {
        Some(dest) => {
            let dest_path = Path::new(dest);

            // Safety: refuse to overwrite the live collection.
            if dest_path
                .file_name()
                .is_some_and(|name| name == ITEMS_FILE)
            {
                return Err(VaultError::CommandFailed(format!(
                    "refusing to export over an {ITEMS_FILE} file"
                )));
            }

            fs::write(dest_path, &content).map_err(|e| {
                VaultError::CommandFailed(format!("failed to write export file: {e}"))
            })?;

            output::success(&format!(
                "Exported {} items to {} (format: {})",
                items.len(),
                dest,
                format
            ));
            if format.is_encrypted() && dest_path.extension().map_or(true, |e| e != "encript") {
                output::tip("Name encrypted exports *.encript so `import` detects them.");
            }
        }
        None => {
            // Write to stdout (no success message, just raw output).
            print!("{content}");
        }
    }

    let detail = if format.is_encrypted() {
        format!("{} items, format: {format}, tier {tier}", items.len())
    } else {
        format!("{} items, format: {format}", items.len())
    };
    crate::audit::log_audit(cli, "export", None, Some(&detail));

    Ok(())
}
