//! Report formatting and printing utilities.
//!
//! Operations call back into these printers as each language finishes, so
//! partial progress is visible even when a later language fails. Separate
//! from core logic to allow the engine to be used as a library.

use std::io::{self, Write};

use colored::Colorize;

use crate::core::{
    AddedTranslation, BASE_LANGUAGE, Fill, FileCompaction, KeyAddition, LanguageSync, ModuleCompaction,
    ModuleSync, SENTINEL, SyncStatus,
};

/// Success mark for consistent output formatting.
pub const SUCCESS_MARK: &str = "\u{2713}"; // ✓

/// Failure mark for consistent output formatting.
pub const FAILURE_MARK: &str = "\u{2718}"; // ✘

pub fn print_language_sync(outcome: &LanguageSync) {
    print_language_sync_to(outcome, &mut io::stdout().lock());
}

pub fn print_language_sync_to<W: Write>(outcome: &LanguageSync, writer: &mut W) {
    let rec = &outcome.reconciliation;
    let _ = writeln!(writer, "{}", format!("Syncing {}", outcome.location).bold());

    for filled in &rec.filled {
        let _ = writeln!(
            writer,
            "  {} {} = {}{}",
            "+".green(),
            filled.key,
            filled.value,
            fill_note(&filled.fill)
        );
    }

    if !rec.obsolete.is_empty() {
        let _ = writeln!(
            writer,
            "  {} moved {} obsolete {} below \"{}\": {}",
            "~".yellow(),
            rec.obsolete.len(),
            plural(rec.obsolete.len(), "key", "keys"),
            SENTINEL,
            rec.obsolete.join(", ")
        );
    }

    if outcome.status == SyncStatus::Written && !outcome.created && !rec.changed() {
        let _ = writeln!(
            writer,
            "  {} reordered keys to follow {}.json",
            "~".yellow(),
            BASE_LANGUAGE
        );
    }

    let msg = match (outcome.status, outcome.created) {
        (SyncStatus::Written, true) => format!("{}.json created", outcome.language),
        (SyncStatus::Written, false) => format!("{}.json updated", outcome.language),
        (SyncStatus::UpToDate, _) => format!("{}.json is already up to date", outcome.language),
    };
    let _ = writeln!(writer, "{} {}", SUCCESS_MARK.green(), msg);
}

pub fn print_sync_summary(result: &ModuleSync) {
    print_sync_summary_to(result, &mut io::stdout().lock());
}

pub fn print_sync_summary_to<W: Write>(result: &ModuleSync, writer: &mut W) {
    let fallbacks: usize = result
        .languages
        .iter()
        .map(|l| l.reconciliation.fallback_count())
        .sum();
    let written = result.written_count();

    let _ = writeln!(
        writer,
        "\n{} {}",
        SUCCESS_MARK.green(),
        format!(
            "Synced module {}: {} of {} {} written",
            result.module,
            written,
            result.languages.len(),
            plural(result.languages.len(), "language", "languages")
        )
        .green()
    );
    if fallbacks > 0 {
        let _ = writeln!(
            writer,
            "{} {} {} kept the English text because translation failed; review them manually",
            "warning:".bold().yellow(),
            fallbacks,
            plural(fallbacks, "value", "values")
        );
    }
}

pub fn print_added_translation(added: &AddedTranslation) {
    print_added_translation_to(added, &mut io::stdout().lock());
}

pub fn print_added_translation_to<W: Write>(added: &AddedTranslation, writer: &mut W) {
    let verb = if added.created { "created" } else { "updated" };
    let _ = writeln!(
        writer,
        "{} {} {}{}",
        SUCCESS_MARK.green(),
        format!("{}.json {}:", added.language, verb).bold(),
        added.value,
        fill_note(&added.fill)
    );
}

pub fn print_add_summary(result: &KeyAddition) {
    print_add_summary_to(result, &mut io::stdout().lock());
}

pub fn print_add_summary_to<W: Write>(result: &KeyAddition, writer: &mut W) {
    let _ = writeln!(
        writer,
        "\n{} {}",
        SUCCESS_MARK.green(),
        format!(
            "Added \"{}\" to {} {} of module {}",
            result.key,
            result.languages.len(),
            plural(result.languages.len(), "language", "languages"),
            result.module
        )
        .green()
    );
}

pub fn print_file_compaction(file: &FileCompaction) {
    print_file_compaction_to(file, &mut io::stdout().lock());
}

pub fn print_file_compaction_to<W: Write>(file: &FileCompaction, writer: &mut W) {
    match file {
        FileCompaction::Skipped { location, .. } => {
            let _ = writeln!(
                writer,
                "{} skipped {} (file does not exist)",
                "-".dimmed(),
                location
            );
        }
        FileCompaction::Clean { location, .. } => {
            let _ = writeln!(
                writer,
                "{} {} has no duplicate keys",
                SUCCESS_MARK.green(),
                location
            );
        }
        FileCompaction::Compacted {
            location, removed, ..
        } => {
            let _ = writeln!(
                writer,
                "{} {} removed {} duplicate {}",
                SUCCESS_MARK.green(),
                location,
                removed.len(),
                plural(removed.len(), "line", "lines")
            );
            for line in removed {
                let _ = writeln!(
                    writer,
                    "  {} line {}: \"{}\"",
                    "-".red(),
                    line.line,
                    line.key
                );
            }
        }
    }
}

pub fn print_compaction_summary(result: &ModuleCompaction) {
    print_compaction_summary_to(result, &mut io::stdout().lock());
}

pub fn print_compaction_summary_to<W: Write>(result: &ModuleCompaction, writer: &mut W) {
    let _ = writeln!(
        writer,
        "\n{} {}",
        SUCCESS_MARK.green(),
        format!(
            "Processed every language file of module {}",
            result.module
        )
        .green()
    );
}

/// Print a fatal error to stderr.
pub fn print_error(err: &anyhow::Error) {
    print_error_to(err, &mut io::stderr().lock());
}

pub fn print_error_to<W: Write>(err: &anyhow::Error, writer: &mut W) {
    let _ = writeln!(
        writer,
        "{} {} {}",
        FAILURE_MARK.red(),
        "error:".bold().red(),
        error_message(err)
    );
}

// ============================================================
// Internal Functions
// ============================================================

fn fill_note(fill: &Fill) -> String {
    match fill {
        Fill::Fallback { reason } => format!(
            " {}",
            format!("(kept source text, translation failed: {})", reason).yellow()
        ),
        Fill::Copied => format!(" {}", "(copied, not a string)".dimmed()),
        Fill::Base | Fill::Translated => String::new(),
    }
}

/// Join the cause chain, skipping causes the message already spells out.
fn error_message(err: &anyhow::Error) -> String {
    let mut message = err.to_string();
    for cause in err.chain().skip(1) {
        let cause = cause.to_string();
        if !message.contains(&cause) {
            message = format!("{}: {}", message, cause);
        }
    }
    message
}

fn plural<'a>(count: usize, one: &'a str, many: &'a str) -> &'a str {
    if count == 1 { one } else { many }
}
