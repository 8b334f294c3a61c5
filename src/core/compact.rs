//! Duplicate key removal on raw catalog text.
//!
//! Works line by line instead of parsing JSON: a structured round trip would
//! reformat and reorder what this pass must leave untouched. A line is a key
//! line when it starts (after indentation) with a quoted name followed by
//! `:`. For each key only the last such line is kept, at its own position;
//! every non-key line is kept verbatim.

use std::{
    collections::{HashMap, HashSet},
    sync::LazyLock,
};

use regex::Regex;
use tracing::info;

use super::{
    error::SyncError,
    registry::ModuleRegistry,
    store::{CatalogStore, StoreError},
};

static KEY_LINE_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"^\s*"([^"]+)"\s*:"#).expect("valid key line regex"));

/// A duplicate key line that was dropped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RemovedLine {
    /// 1-based line number in the original text.
    pub line: usize,
    pub key: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Compaction {
    pub text: String,
    pub removed: Vec<RemovedLine>,
}

impl Compaction {
    pub fn changed(&self) -> bool {
        !self.removed.is_empty()
    }
}

fn key_of(line: &str) -> Option<&str> {
    KEY_LINE_REGEX
        .captures(line)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str())
}

/// Drop every key line that is followed by a later line with the same key.
///
/// Lines are split on `\n` and joined back the same way, so `\r\n` endings
/// and a trailing newline survive unchanged.
pub fn compact_duplicates(text: &str) -> Compaction {
    let lines: Vec<&str> = text.split('\n').collect();

    let mut last_index: HashMap<&str, usize> = HashMap::new();
    for (index, line) in lines.iter().enumerate() {
        if let Some(key) = key_of(line) {
            last_index.insert(key, index);
        }
    }
    let keep: HashSet<usize> = last_index.values().copied().collect();

    let mut kept = Vec::with_capacity(lines.len());
    let mut removed = Vec::new();
    for (index, line) in lines.iter().enumerate() {
        match key_of(line) {
            Some(key) if !keep.contains(&index) => removed.push(RemovedLine {
                line: index + 1,
                key: key.to_string(),
            }),
            _ => kept.push(*line),
        }
    }

    Compaction {
        text: kept.join("\n"),
        removed,
    }
}

/// Outcome for one language file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FileCompaction {
    /// The file does not exist.
    Skipped { language: String, location: String },
    /// No duplicates; nothing written.
    Clean { language: String, location: String },
    Compacted {
        language: String,
        location: String,
        removed: Vec<RemovedLine>,
    },
}

#[derive(Debug, Clone)]
pub struct ModuleCompaction {
    pub module: String,
    pub files: Vec<FileCompaction>,
}

impl ModuleCompaction {
    pub fn removed_count(&self) -> usize {
        self.files
            .iter()
            .map(|file| match file {
                FileCompaction::Compacted { removed, .. } => removed.len(),
                _ => 0,
            })
            .sum()
    }
}

pub struct DuplicateCompactor<'a, S> {
    registry: &'a ModuleRegistry,
    store: &'a S,
}

impl<'a, S: CatalogStore> DuplicateCompactor<'a, S> {
    pub fn new(registry: &'a ModuleRegistry, store: &'a S) -> Self {
        Self { registry, store }
    }

    /// Compact every language file of `module_name`, base language included.
    pub fn remove_duplicates(
        &self,
        module_name: &str,
        mut on_file: impl FnMut(&FileCompaction),
    ) -> Result<ModuleCompaction, SyncError> {
        let module = self.registry.resolve(module_name)?;
        let mut files = Vec::new();

        for language in &module.languages {
            let location = self.store.locate(module, language);
            let outcome = match self.store.read_raw(module, language) {
                Err(StoreError::Missing { .. }) => FileCompaction::Skipped {
                    language: language.clone(),
                    location,
                },
                Err(err) => return Err(err.into()),
                Ok(text) => {
                    let compaction = compact_duplicates(&text);
                    if !compaction.changed() {
                        FileCompaction::Clean {
                            language: language.clone(),
                            location,
                        }
                    } else {
                        info!(%location, removed = compaction.removed.len(), "removing duplicate keys");
                        self.store
                            .write_raw(module, language, &compaction.text)
                            .map_err(|source| SyncError::Write {
                                module: module.name.clone(),
                                language: language.clone(),
                                source,
                            })?;
                        FileCompaction::Compacted {
                            language: language.clone(),
                            location,
                            removed: compaction.removed,
                        }
                    }
                }
            };
            on_file(&outcome);
            files.push(outcome);
        }

        Ok(ModuleCompaction {
            module: module.name.clone(),
            files,
        })
    }
}
