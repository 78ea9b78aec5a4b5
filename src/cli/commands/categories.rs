//! `securevault categories` — list categories in use.

use crate::cli::output;
use crate::cli::{open_store, Cli};
use crate::errors::Result;

/// Execute the `categories` command.
pub fn execute(cli: &Cli) -> Result<()> {
    let store = open_store(cli)?;
    let categories = store.categories()?;

    if categories.is_empty() {
        output::info("No categories yet.");
        output::tip("Pass --category when adding an item.");
        return Ok(());
    }

    for category in categories {
        println!("{category}");
    }
    Ok(())
}
