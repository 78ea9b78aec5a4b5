//! `securevault download` — write a stored file back to disk.

use std::fs;
use std::path::{Path, PathBuf};

use crate::cli::output;
use crate::cli::{open_store, Cli};
use crate::errors::{Result, VaultError};

/// Execute the `download` command.
pub fn execute(cli: &Cli, id: &str, output_path: Option<&str>) -> Result<()> {
    let store = open_store(cli)?;
    let (name, bytes) = store.file_contents(id)?;

    let dest = match output_path {
        Some(p) => PathBuf::from(p),
        None => default_destination(&name)?,
    };

    fs::write(&dest, &bytes)
        .map_err(|e| VaultError::CommandFailed(format!("failed to write {}: {e}", dest.display())))?;

    crate::audit::log_audit(cli, "download", Some(id), None);
    output::success(&format!("Wrote {} bytes to {}", bytes.len(), dest.display()));

    Ok(())
}

/// Only the final component of the stored name is used, so a name like
/// `../x` cannot escape the working directory.
fn default_destination(name: &str) -> Result<PathBuf> {
    Path::new(name)
        .file_name()
        .map(PathBuf::from)
        .ok_or_else(|| {
            VaultError::Validation(format!("stored name '{name}' is not a file name — pass --output"))
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn destination_strips_directories() {
        assert_eq!(
            default_destination("../../etc/passwd").unwrap(),
            PathBuf::from("passwd")
        );
        assert_eq!(default_destination("report.pdf").unwrap(), PathBuf::from("report.pdf"));
    }

    #[test]
    fn destination_rejects_bare_parent() {
        assert!(default_destination("..").is_err());
    }
}
