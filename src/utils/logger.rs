//! Logger setup for the command-line tool
//!
//! The library only emits records through the `log` facade; the binary
//! routes them to stderr with `env_logger`.

use env_logger::{Builder, Env};

/// Initializes the global logger
///
/// `RUST_LOG` takes precedence. Without it, only warnings are shown unless
/// `verbose` is set, which enables debug output.
pub fn init_global_logger(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };

    let result = Builder::from_env(Env::default().default_filter_or(default_level))
        .format_timestamp(None)
        .try_init();

    if result.is_err() {
        eprintln!("Warning: Global logger was already initialized");
    }
}
