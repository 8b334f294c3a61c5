//! Catalog synchronization engine.
//!
//! Everything here is independent of the command line: operations take an
//! injected [`ModuleRegistry`], a [`CatalogStore`] and a [`Translator`], and
//! return typed results. The `cli` module decides how to print them.
//!
//! ## Operations
//!
//! - [`Reconciler`]: fill missing keys of every non-base language from the
//!   base catalog and move obsolete keys behind the [`SENTINEL`] marker
//! - [`KeyAdder`]: add one key to every language of a module
//! - [`DuplicateCompactor`]: drop earlier duplicate key lines from raw files

pub mod add_key;
pub mod compact;
pub mod error;
pub mod reconcile;
pub mod registry;
pub mod store;
pub mod translate;


use serde::{Deserialize, Serialize};

pub use add_key::{AddedTranslation, KeyAddition, KeyAdder};
pub use compact::{
    Compaction, DuplicateCompactor, FileCompaction, ModuleCompaction, RemovedLine,
    compact_duplicates,
};
pub use error::SyncError;
pub use reconcile::{
    FilledKey, LanguageSync, ModuleSync, Reconciler, Reconciliation, SENTINEL, SyncStatus,
    reconcile,
};
pub use registry::{BASE_LANGUAGE, Module, ModuleRegistry};
pub use store::{Catalog, CatalogStore, FsCatalogStore, StoreError, parse_catalog, render_catalog};
pub use translate::{GoogleTranslator, TranslationError, Translator};

/// What to do when the translation service fails for a value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TranslationFailurePolicy {
    /// Keep the source text as a placeholder, warn, and continue.
    Fallback,
    /// Stop the whole operation with [`SyncError::Translation`].
    Abort,
}

/// How a value ended up in a catalog.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Fill {
    /// Base language value, written as given.
    Base,
    /// Returned by the translation service.
    Translated,
    /// Translation failed; the source text was used instead.
    Fallback { reason: String },
    /// Non-string value copied without translation.
    Copied,
}

impl Fill {
    pub fn is_fallback(&self) -> bool {
        matches!(self, Fill::Fallback { .. })
    }
}
