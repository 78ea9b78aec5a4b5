//! `securevault user` — manage user accounts.
//!
//! Subcommands:
//! - `securevault user register <NAME>` — create an account
//! - `securevault user login <NAME>`    — check a username and password

use crate::accounts::UserRegistry;
use crate::cli::output;
use crate::cli::{data_dir, prompt_new_password, prompt_password, settings, Cli};
use crate::errors::Result;

fn open_registry(cli: &Cli) -> Result<(UserRegistry, usize)> {
    let min_len = settings()?.min_password_len;
    let registry = UserRegistry::open(&data_dir(cli)?)?.with_min_password_len(min_len);
    Ok((registry, min_len))
}

/// Execute `securevault user register`.
pub fn execute_register(cli: &Cli, username: &str) -> Result<()> {
    let (registry, min_len) = open_registry(cli)?;
    let password = prompt_new_password("Choose account password", min_len)?;

    let username = registry.register(username, &password)?;

    crate::audit::log_audit(cli, "user-register", None, Some(&username));
    output::success(&format!("Registered user '{username}'"));

    Ok(())
}

/// Execute `securevault user login`.
pub fn execute_login(cli: &Cli, username: &str) -> Result<()> {
    let (registry, _) = open_registry(cli)?;
    let password = prompt_password("Account password")?;

    let result = registry.authenticate(username, &password);

    let outcome = if result.is_ok() { "ok" } else { "rejected" };
    crate::audit::log_audit(
        cli,
        "user-login",
        None,
        Some(&format!("{}: {outcome}", username.trim())),
    );

    result?;
    output::success(&format!("Signed in as '{}'", username.trim()));

    Ok(())
}
