//! `securevault completions` — print a shell completion script.
//!
//!   securevault completions bash > ~/.local/share/bash-completion/completions/securevault
//!   securevault completions zsh > ~/.zfunc/_securevault

use std::io;

use clap::{CommandFactory, ValueEnum};
use clap_complete::{generate, Shell};

use crate::cli::Cli;
use crate::errors::{Result, VaultError};

/// Execute the `completions` command.
pub fn execute(shell: &str) -> Result<()> {
    let shell = parse_shell(shell)?;
    let mut cmd = Cli::command();
    let bin = cmd.get_name().to_string();
    generate(shell, &mut cmd, bin, &mut io::stdout());
    Ok(())
}

/// Any shell clap_complete knows, case-insensitively, plus `ps` for PowerShell.
fn parse_shell(name: &str) -> Result<Shell> {
    if name.eq_ignore_ascii_case("ps") {
        return Ok(Shell::PowerShell);
    }
    <Shell as ValueEnum>::from_str(name, true).map_err(|_| {
        let known: Vec<String> = Shell::value_variants()
            .iter()
            .filter_map(|s| s.to_possible_value())
            .map(|v| v.get_name().to_string())
            .collect();
        VaultError::CommandFailed(format!(
            "unknown shell '{name}' — supported: {}",
            known.join(", ")
        ))
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_shells_parse_in_any_case() {
        assert_eq!(parse_shell("bash").unwrap(), Shell::Bash);
        assert_eq!(parse_shell("ZSH").unwrap(), Shell::Zsh);
        assert_eq!(parse_shell("Fish").unwrap(), Shell::Fish);
        assert_eq!(parse_shell("powershell").unwrap(), Shell::PowerShell);
        assert_eq!(parse_shell("ps").unwrap(), Shell::PowerShell);
    }

    #[test]
    fn unknown_shell_lists_alternatives() {
        let err = parse_shell("csh").unwrap_err().to_string();
        assert!(err.contains("bash"));
        assert!(parse_shell("").is_err());
    }
}
