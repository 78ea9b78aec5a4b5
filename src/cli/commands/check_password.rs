//! `securevault check-password` — score a password.

use console::style;

use crate::cli::prompt_password;
use crate::crypto::check_strength;
use crate::errors::Result;

/// Execute the `check-password` command.
pub fn execute(password: Option<&str>) -> Result<()> {
    let prompted;
    let password = match password {
        Some(p) => p,
        None => {
            prompted = prompt_password("Password to check")?;
            prompted.as_str()
        }
    };

    let report = check_strength(password);

    println!(
        "{} {} ({}/{}, {}%)",
        style("Strength:").bold(),
        report.strength.label(),
        report.score,
        report.max_score,
        report.percentage
    );
    for hint in &report.feedback {
        println!("  {} {hint}", style("\u{2192}").dim());
    }

    Ok(())
}
