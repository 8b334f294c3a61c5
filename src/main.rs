use std::io::IsTerminal;
use std::process::ExitCode;

use clap::{Parser, error::ErrorKind};
use i18n_sync::cli::{Arguments, ExitStatus, print_error, print_usage};
use tracing_subscriber::EnvFilter;

fn main() -> ExitCode {
    // A missing .env file is fine.
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("i18n_sync=warn")),
        )
        .with_writer(std::io::stderr)
        .with_ansi(std::io::stderr().is_terminal())
        .with_target(false)
        .init();

    let args = match Arguments::try_parse() {
        Ok(args) => args,
        Err(err) if err.kind() == ErrorKind::InvalidSubcommand => {
            print_usage();
            return ExitStatus::Success.into();
        }
        Err(err) => err.exit(),
    };

    match i18n_sync::cli::run_cli(args) {
        Ok(status) => status.into(),
        Err(err) => {
            print_error(&err);
            ExitStatus::Error.into()
        }
    }
}
