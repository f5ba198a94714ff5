//! CLI command definitions, argument parsing and log setup.
//!
//! Uses clap derive macros for ergonomic argument definitions.

pub mod args;

use tracing_subscriber::EnvFilter;

use userdesk::constants::ENV_LOG;

/// Install the stderr log subscriber.
///
/// `USERDESK_LOG` takes an `EnvFilter` directive; otherwise the level
/// follows `-v` (warn, info, debug).
pub fn init_tracing(verbose: u8) {
    let default = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    let filter = EnvFilter::try_from_env(ENV_LOG).unwrap_or_else(|_| EnvFilter::new(default));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}
