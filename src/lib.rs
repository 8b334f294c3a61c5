//! i18n-sync - keep translation catalogs in step with the base language
//!
//! i18n-sync is a CLI tool and library for maintaining per-module JSON
//! translation catalogs (`<module>/<language>.json`). The English catalog is
//! authoritative for which keys exist; other languages get missing keys
//! machine-translated, keep their existing translations, and have obsolete
//! keys moved to a marked region at the end of the file.
//!
//! ## Module Structure
//!
//! - `cli`: Command-line interface layer (argument parsing, dispatch, reports)
//! - `config`: Configuration file loading and parsing
//! - `core`: Reconciliation, key addition and duplicate compaction

pub mod cli;
pub mod config;
pub mod core;
