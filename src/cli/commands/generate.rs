//! `securevault generate` — print a random password.

use console::style;

use crate::cli::settings;
use crate::crypto::{check_strength, generate_password, PasswordPolicy};
use crate::errors::{Result, VaultError};

/// Character classes switched off on the command line.
#[derive(Debug, Default, Clone, Copy)]
pub struct Exclusions {
    pub uppercase: bool,
    pub lowercase: bool,
    pub numbers: bool,
    pub special: bool,
}

/// Execute the `generate` command.
pub fn execute(length: Option<usize>, exclude: Exclusions) -> Result<()> {
    let length = match length {
        Some(n) => n,
        None => settings()?.generator_length,
    };
    if length == 0 {
        return Err(VaultError::Validation("length must be at least 1".into()));
    }

    let policy = PasswordPolicy {
        length,
        uppercase: !exclude.uppercase,
        lowercase: !exclude.lowercase,
        numbers: !exclude.numbers,
        special: !exclude.special,
    };

    let password = generate_password(&policy);
    let report = check_strength(&password);

    println!("{password}");
    eprintln!(
        "{} {} ({}%)",
        style("strength:").dim(),
        report.strength.label(),
        report.percentage
    );

    Ok(())
}
