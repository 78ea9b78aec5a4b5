//! One module per subcommand.  Each exposes an `execute` function called
//! from `main`.

pub mod add;
pub mod audit_cmd;
pub mod categories;
pub mod check_password;
pub mod completions;
pub mod decrypt;
pub mod delete;
pub mod download;
pub mod encrypt;
pub mod export;
pub mod generate;
pub mod import_cmd;
pub mod list;
pub mod show;
pub mod stats;
pub mod update;
pub mod upload;
pub mod user;
pub mod version;
