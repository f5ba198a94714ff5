//! Shared types used across all modules.
//!
//! This module defines the user record, the flattened form payload and
//! the output format. Other modules import from here rather than
//! reaching into each other's internals.

pub mod payload;
pub mod user;

use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

pub use payload::{FieldValue, FormPayload, flatten};
pub use user::{User, UserDraft, UserId, UserList};

/// How list and record output is printed on stdout.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ValueEnum, Display, EnumString,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum OutputFormat {
    /// Aligned, coloured table.
    #[default]
    Terminal,
    /// Pretty-printed JSON.
    Json,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn output_format_parses_case_insensitively() {
        assert_eq!("JSON".parse::<OutputFormat>().unwrap(), OutputFormat::Json);
        assert_eq!("terminal".parse::<OutputFormat>().unwrap(), OutputFormat::Terminal);
        assert!("yaml".parse::<OutputFormat>().is_err());
    }

    #[test]
    fn output_format_display_matches_serde() {
        assert_eq!(OutputFormat::Json.to_string(), "json");
        assert_eq!(serde_json::to_string(&OutputFormat::Terminal).unwrap(), "\"terminal\"");
    }
}
