//! CLI module — Clap argument parser, output helpers, and command implementations.

pub mod commands;
pub mod output;

use std::path::PathBuf;

use clap::Parser;

use zeroize::Zeroizing;

use crate::config::Settings;
use crate::errors::{Result, VaultError};
use crate::vault::VaultStore;

/// Environment variable read before prompting for a password.
pub const PASSWORD_ENV: &str = "SECUREVAULT_PASSWORD";

/// SecureVault CLI: notes, passwords and files under five encryption tiers.
#[derive(Parser)]
#[command(
    name = "securevault",
    about = "Personal vault for notes, passwords and files with tiered encryption",
    version
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Data directory (default: `data_dir` from .securevault.toml, else ./data)
    #[arg(long, global = true)]
    pub data_dir: Option<String>,

    /// Show debug diagnostics on stderr
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

/// All available subcommands.
#[derive(clap::Subcommand)]
pub enum Commands {
    /// Add a text, password or note item
    Add {
        /// Item name
        name: String,
        /// Item content (omit for interactive prompt or piped stdin)
        content: Option<String>,
        /// Item type: text, password, note
        #[arg(short = 't', long = "type", default_value = "text")]
        item_type: String,
        /// Category label
        #[arg(short, long, default_value = "")]
        category: String,
        /// Comma-separated tags
        #[arg(long, value_delimiter = ',')]
        tags: Vec<String>,
    },

    /// Store a file as an item
    Upload {
        /// Path of the file to store
        path: String,
        /// Item name (default: the file name)
        #[arg(short, long)]
        name: Option<String>,
        /// Category label
        #[arg(short, long, default_value = "")]
        category: String,
    },

    /// Write a stored file back to disk
    Download {
        /// Item id
        id: String,
        /// Output path (default: the item name in the current directory)
        #[arg(short, long)]
        output: Option<String>,
    },

    /// List items
    List {
        /// Case-insensitive search over name and content
        #[arg(short, long)]
        search: Option<String>,
        /// Only items in this category
        #[arg(short, long)]
        category: Option<String>,
        /// Only items of this type
        #[arg(short = 't', long = "type")]
        item_type: Option<String>,
        /// Only encrypted items
        #[arg(long)]
        encrypted: bool,
    },

    /// Show one item
    Show {
        /// Item id
        id: String,
    },

    /// Change an item's fields
    Update {
        /// Item id
        id: String,
        #[arg(long)]
        name: Option<String>,
        #[arg(short = 't', long = "type")]
        item_type: Option<String>,
        /// New content (only while the item is not encrypted)
        #[arg(long)]
        content: Option<String>,
        #[arg(short, long)]
        category: Option<String>,
        /// Comma-separated tags (replaces the current list)
        #[arg(long, value_delimiter = ',')]
        tags: Option<Vec<String>>,
    },

    /// Delete an item
    Delete {
        /// Item id
        id: String,
        /// Skip confirmation prompt
        #[arg(short, long)]
        force: bool,
    },

    /// Encrypt an item at a tier (1-5)
    Encrypt {
        /// Item id
        id: String,
        /// Encryption tier (default: `default_tier` from settings)
        #[arg(long)]
        tier: Option<u8>,
    },

    /// Decrypt an item using its recorded tier
    Decrypt {
        /// Item id
        id: String,
    },

    /// Export every item
    Export {
        /// Output format: encrypted, json, csv, txt
        #[arg(short, long, default_value = "encrypted")]
        format: String,
        /// Tier for encrypted exports (default: `export_tier` from settings)
        #[arg(long)]
        tier: Option<u8>,
        /// Output file path (prints to stdout if omitted)
        #[arg(short, long)]
        output: Option<String>,
    },

    /// Replace every item with the contents of an export
    Import {
        /// Path to a .encript or .json export
        file: String,
        /// Import format: encrypted or json (auto-detected from extension)
        #[arg(short, long)]
        format: Option<String>,
        /// Skip confirmation prompt
        #[arg(long)]
        force: bool,
    },

    /// Show item counts
    Stats,

    /// List categories in use
    Categories,

    /// Generate a random password
    Generate {
        /// Password length (default: `generator_length` from settings)
        #[arg(short, long)]
        length: Option<usize>,
        #[arg(long)]
        no_uppercase: bool,
        #[arg(long)]
        no_lowercase: bool,
        #[arg(long)]
        no_numbers: bool,
        #[arg(long)]
        no_special: bool,
    },

    /// Score a password's strength
    CheckPassword {
        /// Password to check (omit for interactive prompt)
        password: Option<String>,
    },

    /// Manage user accounts
    User {
        #[command(subcommand)]
        action: UserAction,
    },

    /// View the audit log of vault operations
    Audit {
        /// Number of entries to show (default: 50)
        #[arg(long, default_value = "50")]
        last: usize,
        /// Show entries since a duration ago (e.g. 7d, 24h, 30m)
        #[arg(long)]
        since: Option<String>,
    },

    /// Show version and check for updates
    Version,

    /// Generate shell completion scripts
    Completions {
        /// Shell to generate completions for (bash, zsh, fish, powershell)
        shell: String,
    },
}

/// Account subcommands.
#[derive(clap::Subcommand)]
pub enum UserAction {
    /// Create an account
    Register {
        /// Username
        username: String,
    },

    /// Check a username and password
    Login {
        /// Username
        username: String,
    },
}

// ---------------------------------------------------------------------------
// Shared helpers used by multiple commands
// ---------------------------------------------------------------------------

/// Get a password, trying in order:
/// 1. `SECUREVAULT_PASSWORD` env var (scripts, tests)
/// 2. Interactive prompt
///
/// Returns `Zeroizing<String>` so the password is wiped from memory on drop.
pub fn prompt_password(prompt: &str) -> Result<Zeroizing<String>> {
    if let Some(pw) = password_from_env() {
        return Ok(pw);
    }

    let pw = dialoguer::Password::new()
        .with_prompt(prompt)
        .interact()
        .map_err(|e| VaultError::CommandFailed(format!("password prompt: {e}")))?;
    Ok(Zeroizing::new(pw))
}

/// Prompt for a new password with confirmation (encrypt, export, register).
///
/// Also respects `SECUREVAULT_PASSWORD` for scripted usage.
/// Enforces a minimum password length.
///
/// Returns `Zeroizing<String>` so the password is wiped from memory on drop.
pub fn prompt_new_password(prompt: &str, min_len: usize) -> Result<Zeroizing<String>> {
    if let Some(pw) = password_from_env() {
        if pw.chars().count() < min_len {
            return Err(VaultError::Validation(format!(
                "password must be at least {min_len} characters"
            )));
        }
        return Ok(pw);
    }

    loop {
        let password = dialoguer::Password::new()
            .with_prompt(prompt)
            .with_confirmation("Confirm password", "Passwords do not match, try again")
            .interact()
            .map_err(|e| VaultError::CommandFailed(format!("password prompt: {e}")))?;

        if password.chars().count() < min_len.max(1) {
            output::warning(&format!(
                "Password must be at least {} characters. Try again.",
                min_len.max(1)
            ));
            continue;
        }

        return Ok(Zeroizing::new(password));
    }
}

fn password_from_env() -> Option<Zeroizing<String>> {
    std::env::var(PASSWORD_ENV)
        .ok()
        .filter(|pw| !pw.is_empty())
        .map(Zeroizing::new)
}

/// Load `.securevault.toml` from the working directory.
pub fn settings() -> Result<Settings> {
    let cwd = std::env::current_dir()?;
    Settings::load(&cwd)
}

/// Resolve the data directory: `--data-dir` wins over settings.
///
/// Example: `<cwd>/data`
pub fn data_dir(cli: &Cli) -> Result<PathBuf> {
    let cwd = std::env::current_dir()?;
    match &cli.data_dir {
        Some(dir) => Ok(cwd.join(dir)),
        None => Ok(settings()?.data_path(&cwd)),
    }
}

/// Open the item store in the resolved data directory.
pub fn open_store(cli: &Cli) -> Result<VaultStore> {
    VaultStore::open(&data_dir(cli)?)
}

/// Ask a yes/no question, defaulting to no.
pub fn confirm(prompt: &str) -> Result<bool> {
    dialoguer::Confirm::new()
        .with_prompt(prompt)
        .default(false)
        .interact()
        .map_err(|e| VaultError::CommandFailed(format!("confirm prompt: {e}")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn command_tree_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn parses_encrypt_with_tier() {
        let cli = Cli::try_parse_from(["securevault", "encrypt", "abc", "--tier", "5"]).unwrap();
        match cli.command {
            Commands::Encrypt { id, tier } => {
                assert_eq!(id, "abc");
                assert_eq!(tier, Some(5));
            }
            _ => panic!("expected encrypt"),
        }
    }

    #[test]
    fn parses_global_data_dir_after_subcommand() {
        let cli = Cli::try_parse_from(["securevault", "stats", "--data-dir", "elsewhere"]).unwrap();
        assert_eq!(cli.data_dir.as_deref(), Some("elsewhere"));
    }

    #[test]
    fn tags_split_on_commas() {
        let cli = Cli::try_parse_from([
            "securevault",
            "add",
            "wifi",
            "hunter2",
            "--type",
            "password",
            "--tags",
            "home,net",
        ])
        .unwrap();
        match cli.command {
            Commands::Add { tags, item_type, .. } => {
                assert_eq!(tags, vec!["home", "net"]);
                assert_eq!(item_type, "password");
            }
            _ => panic!("expected add"),
        }
    }
}
