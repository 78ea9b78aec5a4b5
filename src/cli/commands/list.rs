//! `securevault list` — display items in a table.

use crate::cli::output;
use crate::cli::{open_store, Cli};
use crate::errors::Result;
use crate::vault::{ItemFilter, ItemType};

/// Execute the `list` command.
pub fn execute(
    cli: &Cli,
    search: Option<&str>,
    category: Option<&str>,
    item_type: Option<&str>,
    encrypted_only: bool,
) -> Result<()> {
    let filter = ItemFilter {
        search: search.map(str::to_string),
        category: category.map(str::to_string),
        item_type: item_type.map(str::parse::<ItemType>).transpose()?,
        encrypted_only,
    };

    let store = open_store(cli)?;
    let items = store.list_items(&filter)?;

    output::info(&format!(
        "{} of {} item(s)",
        items.len(),
        store.item_count()?
    ));

    output::print_items_table(&items);

    Ok(())
}
