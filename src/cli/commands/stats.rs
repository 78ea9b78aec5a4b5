//! `securevault stats` — item counts by type, tier and category.

use crate::cli::output;
use crate::cli::{open_store, Cli};
use crate::errors::Result;

/// Execute the `stats` command.
pub fn execute(cli: &Cli) -> Result<()> {
    let store = open_store(cli)?;
    output::print_stats(&store.stats()?);
    Ok(())
}
