mod commands;
mod error;
mod util;

use anyhow::{Context as _, Result};
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::debug;

use crate::commands::{completions, recovery, site, users, Context};
use crate::error::{exit_code_for, report_error};
use lantern_config as config;
use lantern_store::{paths, Store};

#[derive(Debug, Parser)]
#[command(name = "lantern", version, about = "lantern CLI")]
struct Cli {
    #[arg(long, global = true)]
    db_path: Option<PathBuf>,
    #[arg(long, global = true)]
    config: Option<PathBuf>,
    #[arg(long, global = true)]
    json: bool,
    #[arg(long, short, global = true)]
    verbose: bool,
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Generate shell completions
    Completions(completions::CompletionsArgs),
    /// Show the configured site metadata
    Site(site::SiteArgs),
    /// Show the consent banner for a render context
    #[command(name = "consent-banner")]
    ConsentBanner(site::ConsentBannerArgs),
    #[command(subcommand)]
    User(users::UserCommand),
    #[command(name = "forgot-password", subcommand)]
    ForgotPassword(recovery::RecoveryCommand),
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    let verbose = cli.verbose;
    init_logging(verbose);
    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            report_error(&err, verbose);
            exit_code_for(&err)
        }
    }
}

fn run(cli: Cli) -> Result<()> {
    let Cli {
        db_path,
        config: config_path,
        json,
        verbose,
        command,
    } = cli;

    if let Command::Completions(args) = command {
        return completions::emit(args);
    }

    let app_config = config::load(config_path.clone()).with_context(|| "load config")?;
    if verbose {
        match config::resolve_config_path(config_path) {
            Ok(path) => {
                if path.exists() {
                    debug!(path = %path.display(), "config resolved");
                } else {
                    debug!(path = %path.display(), "config missing, using defaults");
                }
            }
            Err(err) => {
                debug!(error = %err, "config unavailable");
            }
        }
    }

    match command {
        Command::Site(args) => return site::show_site(&app_config, json, args),
        Command::ConsentBanner(args) => {
            return site::show_consent_banner(&app_config, json, args)
        }
        _ => {}
    }

    let db_path = paths::resolve_db_path(db_path).with_context(|| "resolve database path")?;
    debug!(path = %db_path.display(), "database path resolved");

    let store =
        Store::open(&db_path).with_context(|| format!("open database {}", db_path.display()))?;
    store.migrate().with_context(|| "run migrations")?;

    let ctx = Context {
        store: &store,
        json,
        config: &app_config,
    };

    match command {
        Command::User(cmd) => match cmd {
            users::UserCommand::Add(args) => users::add_user(&ctx, args),
        },
        Command::ForgotPassword(cmd) => match cmd {
            recovery::RecoveryCommand::Lookup(args) => recovery::lookup(&ctx, args),
        },
        Command::Completions(_) | Command::Site(_) | Command::ConsentBanner(_) => {
            unreachable!("command handled before store initialization")
        }
    }
}

fn init_logging(verbose: bool) {
    use tracing_subscriber::{fmt, EnvFilter};
    let default_level = if verbose { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    let _ = fmt()
        .with_env_filter(filter)
        .with_target(false)
        .without_time()
        .with_writer(std::io::stderr)
        .try_init();
}
