//! `securevault version` — display version and check for updates.

use console::style;

use crate::errors::Result;
use crate::version_check::check_updates;

/// Execute the `version` command.
pub fn execute() -> Result<()> {
    let info = check_updates(env!("CARGO_PKG_VERSION"));
    println!("securevault {}", info.current);

    if info.update_available {
        println!(
            "\n{} {} → {}",
            style("Update available:").yellow().bold(),
            style(&info.current).red(),
            style(&info.latest).green().bold()
        );
    } else if cfg!(feature = "version-check") {
        println!("{}", style("You're up to date!").green());
    }

    Ok(())
}
