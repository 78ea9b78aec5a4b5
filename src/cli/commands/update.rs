//! `securevault update` — change an item's fields.

use crate::cli::output;
use crate::cli::{open_store, Cli};
use crate::errors::Result;
use crate::vault::{ItemType, ItemUpdate};

/// Fields passed on the command line; `None` leaves a field alone.
pub struct UpdateArgs<'a> {
    pub name: Option<&'a str>,
    pub item_type: Option<&'a str>,
    pub content: Option<&'a str>,
    pub category: Option<&'a str>,
    pub tags: Option<&'a [String]>,
}

/// Execute the `update` command.
pub fn execute(cli: &Cli, id: &str, args: UpdateArgs<'_>) -> Result<()> {
    let update = ItemUpdate {
        name: args.name.map(|n| n.trim().to_string()),
        item_type: args.item_type.map(str::parse::<ItemType>).transpose()?,
        content: args.content.map(str::to_string),
        category: args.category.map(|c| c.trim().to_string()),
        tags: args.tags.map(|tags| {
            tags.iter()
                .map(|t| t.trim().to_string())
                .filter(|t| !t.is_empty())
                .collect()
        }),
    };

    let store = open_store(cli)?;
    let item = store.update_item(id, update)?;

    crate::audit::log_audit(cli, "update", Some(id), None);
    output::success(&format!("Updated '{}'", item.name));

    Ok(())
}
