//! `securevault import` — replace the collection with an export's items.
//!
//! Supported sources:
//! - `.encript` files: the password is tried against tiers 5 down to 1
//! - `.json` files: plain payloads, no password

use std::fs;
use std::path::Path;

use crate::cli::output;
use crate::cli::{confirm, open_store, prompt_password, Cli};
use crate::errors::{Result, VaultError};
use crate::transfer::{self, ImportSource};

/// Execute the `import` command.
pub fn execute(cli: &Cli, file_path: &str, format: Option<&str>, force: bool) -> Result<()> {
    let source = Path::new(file_path);

    if !source.exists() {
        return Err(VaultError::CommandFailed(format!(
            "import file not found: {}",
            source.display()
        )));
    }

    let kind = ImportSource::detect(source, format)?;
    let body = fs::read_to_string(source)
        .map_err(|e| VaultError::CommandFailed(format!("failed to read file: {e}")))?;

    let store = open_store(cli)?;
    let existing = store.item_count()?;

    if existing > 0
        && !force
        && !confirm(&format!("Replace all {existing} existing item(s)?"))?
    {
        output::info("Cancelled.");
        return Ok(());
    }

    let password = match kind {
        ImportSource::Encrypted => Some(prompt_password("Import password")?),
        ImportSource::Json => None,
    };

    let outcome = transfer::import_into(
        &store,
        &body,
        kind,
        password.as_deref().map(String::as_str),
    )?;

    let detail = match outcome.tier {
        Some(tier) => format!("{} items from {}, tier {tier}", outcome.items.len(), source.display()),
        None => format!("{} items from {}", outcome.items.len(), source.display()),
    };
    crate::audit::log_audit(cli, "import", None, Some(&detail));

    match outcome.tier {
        Some(tier) => output::success(&format!(
            "Imported {} items from {} (tier {tier})",
            outcome.items.len(),
            source.display()
        )),
        None => output::success(&format!(
            "Imported {} items from {}",
            outcome.items.len(),
            source.display()
        )),
    }

    Ok(())
}
