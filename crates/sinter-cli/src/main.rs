//! Sinterlab CLI - density studies for ceramic and cermet sintering.
//!
//! This is the entry point for the `sinter` binary. Every command signs in
//! first; credentials come from flags or the environment.

mod commands;
mod config;
mod error;
mod export;
mod output;

use std::io::Write;
use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;

use anyhow::Context;
use clap::Parser;
use sinter_engine::{LabError, Laboratory, LaboratoryService};
use sinter_store::RocksStore;
use tracing_subscriber::EnvFilter;

use commands::Command;
use config::SinterConfig;
use error::CliError;

/// Sinterlab CLI - density studies for ceramic and cermet sintering.
#[derive(Parser, Debug)]
#[command(name = "sinter")]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Database directory.
    #[arg(long, env = "SINTER_DATA_DIR", default_value = "sinterlab-data")]
    data_dir: PathBuf,

    /// JSON configuration file.
    #[arg(long, env = "SINTER_CONFIG")]
    config: Option<PathBuf>,

    /// Account login.
    #[arg(long, env = "SINTER_LOGIN")]
    login: Option<String>,

    /// Account password.
    #[arg(long, env = "SINTER_PASSWORD", hide_env_values = true)]
    password: Option<String>,

    /// Enable debug logging.
    #[arg(long, default_value = "false")]
    debug: bool,

    #[command(subcommand)]
    command: Command,
}

fn main() -> ExitCode {
    let args = Args::parse();

    // Initialize logging
    let filter = if args.debug {
        EnvFilter::new("sinter=debug,sinter_engine=debug,sinter_store=debug,warn")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {err:#}");
            ExitCode::from(exit_code(&err))
        }
    }
}

fn run(args: &Args) -> anyhow::Result<()> {
    // Checked before the store is opened, so nothing is created or seeded.
    let (Some(login), Some(password)) = (&args.login, &args.password) else {
        return Err(CliError::MissingCredentials.into());
    };

    let config = SinterConfig::load(args.config.as_deref())?;

    tracing::debug!(data_dir = %args.data_dir.display(), "Opening RocksDB store");
    let store = RocksStore::open_with(&args.data_dir, &config.store)
        .with_context(|| format!("failed to open database at {}", args.data_dir.display()))?;
    let lab = LaboratoryService::new(Arc::new(store), config.lab);

    let principal = lab
        .sign_in(login, password)?
        .ok_or(CliError::InvalidCredentials)?;
    tracing::debug!(user_id = %principal.user_id, role = %principal.role, "Signed in");

    let default_sweep = lab.config().default_sweep;
    let mut stdout = std::io::stdout().lock();
    commands::execute(&lab, &default_sweep, &principal, &args.command, &mut stdout)?;
    stdout.flush()?;
    Ok(())
}

/// Exit code of the domain error behind `err`, or 1.
fn exit_code(err: &anyhow::Error) -> u8 {
    if let Some(lab) = err.downcast_ref::<LabError>() {
        return lab.exit_code();
    }
    if let Some(cli) = err.downcast_ref::<CliError>() {
        return cli.exit_code();
    }
    1
}
