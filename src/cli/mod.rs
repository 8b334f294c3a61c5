use anyhow::Result;
use clap::CommandFactory;

use crate::config::CONFIG_FILE_NAME;

pub use args::{Arguments, Command};
pub use exit_status::ExitStatus;
pub use report::print_error;

pub mod args;
mod exit_status;
mod report;
mod run;

pub fn run_cli(args: Arguments) -> Result<ExitStatus> {
    let Some(args) = args.with_command_or_help() else {
        print_modules();
        return Ok(ExitStatus::Success);
    };

    run::run(args)?;
    Ok(ExitStatus::Success)
}

/// Print usage for an unrecognized command. This is not an error.
pub fn print_usage() {
    Arguments::command().print_help().ok();
    print_modules();
}

fn print_modules() {
    if let Some((modules, from_file)) = run::available_modules() {
        println!("\nAvailable modules: {}", modules.join(", "));
        if !from_file {
            println!("No {} found; using the default configuration.", CONFIG_FILE_NAME);
        }
    }
}
