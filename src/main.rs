//! userdesk — terminal front end for a remote user directory.
//!
//! Entry point and error handling boundary. Uses `anyhow` for
//! ergonomic error propagation and user-facing messages. Console
//! failures are already shown as notifications, so the errors raised
//! here only carry a short summary for the exit status.

mod cli;

use userdesk::config;
use userdesk::console;
use userdesk::constants;
use userdesk::env;
use userdesk::forms;
use userdesk::models;
use userdesk::notify;
use userdesk::repository;

use std::process;

use anyhow::{Context, Result, bail};
use clap::Parser;
use colored::Colorize;

use cli::args::{Cli, Command, FieldArgs};
use config::Config;
use console::{PromptKind, PromptOutcome, SubmitOutcome, UserConsole};
use env::Env;
use forms::FormAction;
use models::{OutputFormat, UserId};
use notify::TerminalNotifier;
use repository::HttpUserRepository;

type Console = UserConsole<HttpUserRepository, TerminalNotifier>;

#[tokio::main]
async fn main() {
    if let Err(err) = run().await {
        eprintln!("Error: {err:#}");
        process::exit(1);
    }
}

async fn run() -> Result<()> {
    let cli = Cli::parse();
    cli::init_tracing(cli.verbose);

    let settings = Settings::resolve(&cli)?;

    match cli.command {
        Command::List => run_list(&settings).await,
        Command::Show { id } => run_show(&settings, &id).await,
        Command::Create(args) => run_create(&settings, args).await,
        Command::Edit { id, fields } => run_edit(&settings, &id, fields).await,
        Command::Delete { id, yes } => run_delete(&settings, &id, yes).await,
        Command::Flatten(args) => run_flatten(args),
        Command::Config => run_config(&settings.config),
        Command::Version => run_version(),
    }
}

/// Config with CLI flags applied on top.
struct Settings {
    config: Config,
    quiet: bool,
}

impl Settings {
    fn resolve(cli: &Cli) -> Result<Self> {
        let cwd = std::env::current_dir().context("could not determine working directory")?;
        let mut config =
            Config::load(Some(&cwd), &Env::real()).context("failed to load configuration")?;

        if let Some(ref url) = cli.api_url {
            config.api.base_url = url.clone();
        }
        if let Some(format) = cli.format {
            config.output.format = format;
        }

        Ok(Self {
            config,
            quiet: cli.quiet,
        })
    }

    fn format(&self) -> OutputFormat {
        self.config.output.format
    }

    fn console(&self) -> Result<Console> {
        let repository = HttpUserRepository::new(&self.config.api)
            .map_err(|e| anyhow::anyhow!("{e}"))
            .context("failed to set up the API client")?;
        Ok(UserConsole::new(repository, TerminalNotifier::new(!self.quiet)))
    }
}

/// Print detailed version and build information.
fn run_version() -> Result<()> {
    println!(
        "{} {}",
        constants::APP_NAME.bold(),
        constants::VERSION.green().bold()
    );
    println!("{}     {}", "target:".dimmed(), constants::TARGET);
    Ok(())
}

/// Print the resolved configuration with the token redacted.
fn run_config(config: &Config) -> Result<()> {
    let mut shown = config.clone();
    if shown.api.token.is_some() {
        shown.api.token = Some("[REDACTED]".to_string());
    }
    let rendered = toml::to_string_pretty(&shown).context("failed to render configuration")?;
    print!("{rendered}");
    if let Some(path) = Config::global_config_path() {
        eprintln!("{} {}", "global config:".dimmed(), path.display());
    }
    Ok(())
}

/// Print the flattened payload for a field sequence.
fn run_flatten(args: FieldArgs) -> Result<()> {
    let payload = models::flatten(args.fields);
    let rendered =
        serde_json::to_string_pretty(&payload).context("failed to render payload")?;
    println!("{rendered}");
    Ok(())
}

async fn run_list(settings: &Settings) -> Result<()> {
    let console = settings.console()?;
    if console.refresh().await.is_none() {
        bail!("could not load the user list");
    }
    print!("{}", settings.format().renderer().render(&console.users()));
    Ok(())
}

async fn run_show(settings: &Settings, id: &str) -> Result<()> {
    let console = settings.console()?;
    let id = UserId::from(id.trim());
    let Ok(user) = console.lookup(&id).await else {
        bail!("could not load user #{id}");
    };
    println!("{}", settings.format().renderer().render_one(&user));
    Ok(())
}

/// Type each field into a form, in order.
fn enter_fields(console: &Console, action: FormAction, args: &FieldArgs) -> Result<()> {
    for (name, value) in &args.fields {
        console
            .enter(action, name, value)
            .with_context(|| format!("cannot set '{name}' on the {action} form"))?;
    }
    Ok(())
}

/// Print the record a submission returned, or fail on a reported error.
fn finish_submit(settings: &Settings, action: FormAction, outcome: SubmitOutcome) -> Result<()> {
    match outcome {
        SubmitOutcome::Completed(user) => {
            println!("{}", settings.format().renderer().render_one(&user));
            Ok(())
        }
        SubmitOutcome::Failed(err) => bail!("{action} failed: {err}"),
        SubmitOutcome::Busy => bail!("a {action} request is already in progress"),
    }
}

async fn run_create(settings: &Settings, args: FieldArgs) -> Result<()> {
    let console = settings.console()?;
    console.open_create();
    enter_fields(&console, FormAction::Create, &args)?;
    let outcome = console.submit(FormAction::Create).await;
    finish_submit(settings, FormAction::Create, outcome)
}

/// Open a prompt and warn about fields the form could not show.
async fn open_prompt(console: &Console, kind: PromptKind, id: &UserId) -> Result<()> {
    match console.prompt(kind, id).await {
        PromptOutcome::Opened(fill) => {
            if !fill.is_complete() {
                eprintln!(
                    "  {} {}",
                    "⚠".yellow().bold(),
                    format!("record fields not shown in the form: {}", fill.unmatched.join(", "))
                        .yellow(),
                );
            }
            Ok(())
        }
        PromptOutcome::Resynced(_) => bail!("could not load user #{id}"),
    }
}

async fn run_edit(settings: &Settings, id: &str, args: FieldArgs) -> Result<()> {
    if args.fields.is_empty() {
        bail!("nothing to change: pass at least one --field NAME=VALUE");
    }
    let console = settings.console()?;
    let id = UserId::from(id.trim());
    open_prompt(&console, PromptKind::Edit, &id).await?;
    enter_fields(&console, FormAction::Edit, &args)?;
    let outcome = console.submit(FormAction::Edit).await;
    finish_submit(settings, FormAction::Edit, outcome)
}

async fn run_delete(settings: &Settings, id: &str, yes: bool) -> Result<()> {
    let console = settings.console()?;
    let id = UserId::from(id.trim());
    open_prompt(&console, PromptKind::Delete, &id).await?;

    let form = console.form(FormAction::Delete);
    eprintln!(" {} {}", "Delete user".red().bold(), format!("#{id}").bold());
    for input in form.inputs().iter().filter(|i| !i.hidden) {
        eprintln!("   {} {}", format!("{}:", input.name).cyan(), input.value);
    }

    if !yes {
        console.close_modals();
        eprintln!(
            "  {} {}",
            "ℹ".dimmed(),
            "Nothing deleted. Re-run with --yes to confirm.".dimmed()
        );
        return Ok(());
    }

    let outcome = console.submit(FormAction::Delete).await;
    finish_submit(settings, FormAction::Delete, outcome)
}
