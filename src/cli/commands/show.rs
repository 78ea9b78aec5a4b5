//! `securevault show` — print one item.

use crate::cli::output;
use crate::cli::{open_store, Cli};
use crate::errors::Result;

/// Execute the `show` command.
pub fn execute(cli: &Cli, id: &str) -> Result<()> {
    let store = open_store(cli)?;
    let item = store.get_item(id)?;
    output::print_item(&item);

    if item.encrypted {
        output::tip(&format!("Run `securevault decrypt {id}` to read the content."));
    }

    Ok(())
}
