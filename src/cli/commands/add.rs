//! `securevault add` — store a text, password or note item.

use std::io::{self, IsTerminal, Read};

use crate::cli::output;
use crate::cli::{open_store, Cli};
use crate::errors::{Result, VaultError};
use crate::vault::{ItemType, NewItem};

/// Execute the `add` command.
pub fn execute(
    cli: &Cli,
    name: &str,
    content: Option<&str>,
    item_type: &str,
    category: &str,
    tags: &[String],
) -> Result<()> {
    let item_type: ItemType = item_type.parse()?;
    if item_type == ItemType::File {
        return Err(VaultError::Validation(
            "use `securevault upload <PATH>` to store files".into(),
        ));
    }
    if name.trim().is_empty() {
        return Err(VaultError::Validation("item name cannot be empty".into()));
    }

    // Determine the content from one of three sources.
    let content = if let Some(c) = content {
        if item_type == ItemType::Password {
            output::warning("Password given on the command line — it may appear in shell history.");
        }
        c.to_string()
    } else if !io::stdin().is_terminal() {
        let mut buf = String::new();
        io::stdin().read_to_string(&mut buf)?;
        buf.trim_end().to_string()
    } else if item_type == ItemType::Password {
        dialoguer::Password::new()
            .with_prompt(format!("Enter password for {name}"))
            .interact()
            .map_err(|e| VaultError::CommandFailed(format!("input prompt: {e}")))?
    } else {
        dialoguer::Input::<String>::new()
            .with_prompt(format!("Enter content for {name}"))
            .allow_empty(true)
            .interact_text()
            .map_err(|e| VaultError::CommandFailed(format!("input prompt: {e}")))?
    };

    let store = open_store(cli)?;
    let item = store.add_item(NewItem {
        name: name.trim().to_string(),
        item_type,
        content,
        category: category.trim().to_string(),
        tags: tags
            .iter()
            .map(|t| t.trim().to_string())
            .filter(|t| !t.is_empty())
            .collect(),
    })?;

    crate::audit::log_audit(
        cli,
        "add",
        Some(&item.id),
        Some(&format!("type: {}", item.item_type)),
    );

    output::success(&format!(
        "Added {} '{}' ({} total)",
        item.item_type,
        item.name,
        store.item_count()?
    ));
    output::tip(&format!("id: {}", item.id));

    Ok(())
}
