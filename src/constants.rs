//! App-wide constants.
//!
//! Centralises the tool name, config paths, environment variable names,
//! and API defaults so a rename only requires changing this file.

/// Display name of the tool (lowercase).
pub const APP_NAME: &str = "userdesk";

/// Crate version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Compilation target triple, set by `build.rs`.
pub const TARGET: &str = env!("TARGET");

/// Local config filename (e.g. `.userdesk.toml` in the working directory).
pub const CONFIG_FILENAME: &str = ".userdesk.toml";

/// Directory name under `~/.config/` for global config.
pub const CONFIG_DIR: &str = "userdesk";

/// API base URL used when nothing else is configured.
pub const DEFAULT_API_URL: &str = "http://localhost:3000";

/// Collection path of the user resource, relative to the base URL.
pub const USERS_PATH: &str = "users";

/// Default HTTP request timeout.
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Message shown for an error that carried no message of its own.
pub const UNKNOWN_ERROR_MESSAGE: &str = "Unknown error ocurred...";

/// Message shown for an action tag that is not one of the known forms.
pub const UNSUPPORTED_ACTION_MESSAGE: &str =
    "Unsupported Action, please contact an administrator if this problem persists...";

/// Placeholder row printed for an empty user list.
pub const NO_USERS_MESSAGE: &str = "No users found...";

// ── Environment variable names ──────────────────────────────────────

pub const ENV_API_URL: &str = "USERDESK_API_URL";
pub const ENV_API_TOKEN: &str = "USERDESK_API_TOKEN";
pub const ENV_TIMEOUT_SECS: &str = "USERDESK_TIMEOUT_SECS";
pub const ENV_FORMAT: &str = "USERDESK_FORMAT";
pub const ENV_LOG: &str = "USERDESK_LOG";
