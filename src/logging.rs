//! Diagnostic logging.
//!
//! Events go to stderr so they never mix with command output on stdout.
//! `SECUREVAULT_LOG` takes an `EnvFilter` directive (for example
//! `securevault=debug`); without it the level is `warn`, or `debug` with
//! `--verbose`.

use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Environment variable holding the filter directive.
pub const LOG_ENV: &str = "SECUREVAULT_LOG";

/// Install the global subscriber.  Safe to call more than once.
pub fn init(verbose: bool) {
    let fallback = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new(fallback));

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr).with_target(false))
        .with(filter)
        .try_init()
        .ok();
}
