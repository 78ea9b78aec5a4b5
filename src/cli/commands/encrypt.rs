//! `securevault encrypt` — encrypt an item at a tier.

use crate::cli::output;
use crate::cli::{open_store, prompt_new_password, settings, Cli};
use crate::crypto::Tier;
use crate::errors::Result;

/// Execute the `encrypt` command.
pub fn execute(cli: &Cli, id: &str, tier: Option<u8>) -> Result<()> {
    let tier = match tier {
        Some(level) => Tier::try_from(level)?,
        None => settings()?.default_tier()?,
    };

    let store = open_store(cli)?;
    // Fail on an unknown id before prompting.
    store.get_item(id)?;

    let password = prompt_new_password("Encryption password", 1)?;
    let item = store.encrypt_item(id, &password, tier)?;

    crate::audit::log_audit(
        cli,
        "encrypt",
        Some(id),
        Some(&format!("tier {}", tier.level())),
    );

    output::success(&format!(
        "Encrypted '{}' at tier {} ({})",
        item.name,
        tier,
        tier.description()
    ));
    if tier == Tier::Encoded {
        output::warning("Tier 1 is base64 only — anyone can read it without the password.");
    }

    Ok(())
}
