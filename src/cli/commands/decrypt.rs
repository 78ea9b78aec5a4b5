//! `securevault decrypt` — decrypt an item with its recorded tier.

use crate::cli::output;
use crate::cli::{open_store, prompt_password, Cli};
use crate::errors::Result;

/// Execute the `decrypt` command.
pub fn execute(cli: &Cli, id: &str) -> Result<()> {
    let store = open_store(cli)?;
    let before = store.get_item(id)?;

    let password = prompt_password("Decryption password")?;
    let item = store.decrypt_item(id, &password)?;

    crate::audit::log_audit(
        cli,
        "decrypt",
        Some(id),
        Some(&format!("tier {}", before.level)),
    );

    output::success(&format!("Decrypted '{}'", item.name));
    if before.level != 5 {
        output::tip("Tiers 1-4 cannot detect a wrong password; check the content looks right.");
    }

    Ok(())
}
