//! CLI argument definitions using clap.
//!
//! ## Commands
//!
//! - `sync`: fill missing keys in every non-base language of a module
//! - `add`: add one key to every language of a module
//! - `remove-duplicates`: drop earlier duplicate key lines from a module's files
//! - `init`: write a default configuration file

use clap::{Args, CommandFactory, Parser, Subcommand};

#[derive(Debug, Parser)]
#[command(author, version, about, long_about = None)]
pub struct Arguments {
    #[command(subcommand)]
    pub command: Option<Command>,
}

impl Arguments {
    /// Check if a command was provided, otherwise print help and return None.
    pub fn with_command_or_help(self) -> Option<Self> {
        if self.command.is_none() {
            Self::command().print_help().ok();
            None
        } else {
            Some(self)
        }
    }
}

#[derive(Debug, Args)]
pub struct SyncCommand {
    /// Module whose catalogs to sync
    pub module: String,
}

#[derive(Debug, Args)]
pub struct AddCommand {
    /// Module to add the key to
    pub module: String,
    /// Key name, e.g. WELCOME
    pub key: String,
    /// Base language (en) value
    pub value: String,
}

#[derive(Debug, Args)]
pub struct RemoveDuplicatesCommand {
    /// Module whose catalog files to clean up
    pub module: String,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Sync every language of a module with the base (en) catalog
    Sync(SyncCommand),
    /// Add a key to every language of a module, translating the value
    Add(AddCommand),
    /// Remove duplicate keys from a module's catalog files, keeping the last one
    RemoveDuplicates(RemoveDuplicatesCommand),
    /// Initialize a new .i18nsyncrc.json configuration file
    Init,
}
