//! Clap argument types and field parsing.

use clap::Parser;

use userdesk::models::OutputFormat;

/// Terminal front end for a remote user directory.
#[derive(Parser, Debug)]
#[command(name = "userdesk", version = userdesk::constants::VERSION, about)]
pub struct Cli {
    /// Base URL of the user directory API (overrides config and environment).
    #[arg(long, global = true)]
    pub api_url: Option<String>,

    /// Output format for lists and records.
    #[arg(long, global = true)]
    pub format: Option<OutputFormat>,

    /// Suppress success banners. Errors are always shown.
    #[arg(long, short = 'q', global = true, default_value_t = false)]
    pub quiet: bool,

    /// Increase log verbosity (-v info, -vv debug).
    #[arg(long, short = 'v', global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Command,
}

/// Available commands.
#[derive(clap::Subcommand, Debug)]
pub enum Command {
    /// List all users.
    List,

    /// Show one user.
    Show {
        /// User id.
        id: String,
    },

    /// Create a user from field values.
    Create(FieldArgs),

    /// Edit a user; unspecified fields keep their current value.
    Edit {
        /// User id.
        id: String,

        #[command(flatten)]
        fields: FieldArgs,
    },

    /// Delete a user after showing the record.
    Delete {
        /// User id.
        id: String,

        /// Confirm the deletion without asking.
        #[arg(long, short = 'y', default_value_t = false)]
        yes: bool,
    },

    /// Print the payload a sequence of form fields flattens into.
    Flatten(FieldArgs),

    /// Print the resolved configuration.
    Config,

    /// Print version and build information.
    Version,
}

/// Repeated `--field name=value` arguments, in command-line order.
#[derive(clap::Args, Debug, Default)]
pub struct FieldArgs {
    /// A form field as name=value. Repeatable; order is preserved.
    #[arg(long = "field", short = 'f', value_name = "NAME=VALUE", value_parser = parse_field)]
    pub fields: Vec<(String, String)>,
}

/// Parse `name=value`. The value may itself contain `=`.
pub fn parse_field(raw: &str) -> Result<(String, String), String> {
    let (name, value) = raw
        .split_once('=')
        .ok_or_else(|| format!("expected NAME=VALUE, got '{raw}'"))?;
    let name = name.trim();
    if name.is_empty() {
        return Err(format!("field name is empty in '{raw}'"));
    }
    Ok((name.to_string(), value.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_field_splits_on_first_equals() {
        assert_eq!(
            parse_field("street=a=b").unwrap(),
            ("street".to_string(), "a=b".to_string())
        );
        assert_eq!(parse_field("zip=").unwrap(), ("zip".to_string(), String::new()));
    }

    #[test]
    fn parse_field_rejects_missing_equals_or_name() {
        assert!(parse_field("fName").unwrap_err().contains("NAME=VALUE"));
        assert!(parse_field(" =x").unwrap_err().contains("empty"));
    }

    #[test]
    fn fields_keep_command_line_order() {
        let cli = Cli::try_parse_from([
            "userdesk", "flatten", "-f", "a=1", "--field", "b=2", "-f", "a=3",
        ])
        .unwrap();
        let Command::Flatten(args) = cli.command else {
            panic!("expected flatten");
        };
        let names: Vec<_> = args.fields.iter().map(|(k, v)| format!("{k}={v}")).collect();
        assert_eq!(names, vec!["a=1", "b=2", "a=3"]);
    }

    #[test]
    fn global_flags_parse_after_subcommand() {
        let cli = Cli::try_parse_from([
            "userdesk", "list", "--format", "json", "--api-url", "http://x", "-vv",
        ])
        .unwrap();
        assert_eq!(cli.format, Some(OutputFormat::Json));
        assert_eq!(cli.api_url.as_deref(), Some("http://x"));
        assert_eq!(cli.verbose, 2);
        assert!(matches!(cli.command, Command::List));
    }

    #[test]
    fn edit_takes_id_and_fields() {
        let cli = Cli::try_parse_from(["userdesk", "edit", "7", "-f", "city=Oslo"]).unwrap();
        let Command::Edit { id, fields } = cli.command else {
            panic!("expected edit");
        };
        assert_eq!(id, "7");
        assert_eq!(fields.fields, vec![("city".to_string(), "Oslo".to_string())]);
    }

    #[test]
    fn delete_requires_id() {
        assert!(Cli::try_parse_from(["userdesk", "delete"]).is_err());
        let cli = Cli::try_parse_from(["userdesk", "delete", "3", "--yes"]).unwrap();
        assert!(matches!(cli.command, Command::Delete { yes: true, .. }));
    }

    #[test]
    fn create_without_fields_is_accepted() {
        let cli = Cli::try_parse_from(["userdesk", "create"]).unwrap();
        let Command::Create(args) = cli.command else {
            panic!("expected create");
        };
        assert!(args.fields.is_empty());
    }
}
