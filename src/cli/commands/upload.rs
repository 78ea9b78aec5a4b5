//! `securevault upload` — store a file as a `file` item.

use std::fs;
use std::path::Path;

use crate::cli::output;
use crate::cli::{open_store, Cli};
use crate::errors::{Result, VaultError};

/// Execute the `upload` command.
pub fn execute(cli: &Cli, path: &str, name: Option<&str>, category: &str) -> Result<()> {
    let source = Path::new(path);

    if !source.is_file() {
        return Err(VaultError::CommandFailed(format!(
            "file not found: {}",
            source.display()
        )));
    }

    let name = match name {
        Some(n) if !n.trim().is_empty() => n.trim().to_string(),
        _ => source
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .ok_or_else(|| VaultError::Validation("cannot derive a name from the path".into()))?,
    };

    let bytes = fs::read(source)?;

    let store = open_store(cli)?;
    let item = store.add_file(&name, &bytes, category.trim())?;

    crate::audit::log_audit(
        cli,
        "upload",
        Some(&item.id),
        Some(&format!("{} bytes", bytes.len())),
    );

    output::success(&format!("Stored '{}' ({} bytes)", item.name, bytes.len()));
    output::tip(&format!("id: {}", item.id));

    Ok(())
}
