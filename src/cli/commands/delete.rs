//! `securevault delete` — remove an item from the vault.

use crate::cli::output;
use crate::cli::{confirm, open_store, Cli};
use crate::errors::Result;

/// Execute the `delete` command.
pub fn execute(cli: &Cli, id: &str, force: bool) -> Result<()> {
    let store = open_store(cli)?;

    // Fail on an unknown id before asking anything.
    let item = store.get_item(id)?;

    if !force && !confirm(&format!("Delete '{}' ({id})?", item.name))? {
        output::info("Cancelled.");
        return Ok(());
    }

    let removed = store.delete_item(id)?;

    crate::audit::log_audit(cli, "delete", Some(id), Some(&removed.name));
    output::success(&format!("Deleted '{}'", removed.name));

    Ok(())
}
