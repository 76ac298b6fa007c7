//! edcenter - command-line administration for an educational center.
//!
//! Signs in against the center's backend, keeps the session credentials
//! in the configured store, and exposes the dashboard, students, teachers,
//! classes, subjects and payments as subcommands.

mod commands;
mod output;
mod runner;

use std::collections::BTreeMap;
use std::io;
use std::path::Path;
use std::process::ExitCode;

use anyhow::{anyhow, Result};
use clap::Parser;
use edcenter_core::ApiError;
use tracing::info;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use commands::Cli;

/// Initialize the tracing subscriber for logging.
///
/// The returned guard flushes the log file on drop and must be held
/// until the program exits.
fn init_tracing(log_file: Option<&Path>) -> Result<Option<WorkerGuard>> {
    // Use RUST_LOG env var to control log level (e.g., RUST_LOG=debug)
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));

    let (file_layer, guard) = match log_file {
        Some(path) => {
            let file_name = path
                .file_name()
                .ok_or_else(|| anyhow!("Invalid log file path: {}", path.display()))?;
            let dir = path
                .parent()
                .filter(|p| !p.as_os_str().is_empty())
                .unwrap_or_else(|| Path::new("."));
            std::fs::create_dir_all(dir)?;

            let (writer, guard) =
                tracing_appender::non_blocking(tracing_appender::rolling::never(dir, file_name));
            let layer = fmt::layer().with_writer(writer).with_ansi(false);
            (Some(layer), Some(guard))
        }
        None => (None, None),
    };

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(io::stderr))
        .with(file_layer)
        .with(filter)
        .init();

    Ok(guard)
}

fn report_error(err: &anyhow::Error) {
    eprintln!("Error: {:#}", err);
    if let Some(ApiError::Validation { details, .. }) = err.downcast_ref::<ApiError>() {
        let sorted: BTreeMap<_, _> = details.iter().collect();
        for (field, messages) in sorted {
            eprintln!("  {}: {}", field, messages.join(", "));
        }
    }
}

/// Report the outcome and flush the log file before the process exits.
fn finish(result: Result<()>, guard: Option<WorkerGuard>) -> ExitCode {
    let code = match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            report_error(&e);
            ExitCode::FAILURE
        }
    };
    drop(guard);
    code
}

#[tokio::main]
async fn main() -> ExitCode {
    // Load .env file if present (silently ignore if not found)
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();
    let guard = match init_tracing(cli.log_file.as_deref()) {
        Ok(guard) => guard,
        Err(e) => return finish(Err(e), None),
    };
    info!("edcenter starting");

    let result = runner::run(cli).await;
    finish(result, guard)
}
