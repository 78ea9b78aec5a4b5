pub mod accounts;
pub mod audit;
pub mod cli;
pub mod config;
pub mod crypto;
pub mod errors;
pub mod logging;
pub mod transfer;
pub mod vault;
pub mod version_check;
