//! Catalog reconciliation.
//!
//! A target catalog is rebuilt from the base catalog:
//!
//! ```text
//! base keys, in base order      (target value if present, else translated)
//! "****": "****"                (only when obsolete keys exist)
//! obsolete target-only keys     (original values, original order)
//! ```
//!
//! Existing target values are never retranslated. The rebuilt catalog is
//! written only when its rendering differs from the current one.

use tracing::info;

use super::{
    BASE_LANGUAGE, Fill, TranslationFailurePolicy,
    error::SyncError,
    registry::ModuleRegistry,
    store::{Catalog, CatalogStore, render_catalog},
    translate::{TranslationError, Translator, fill_value},
};

/// Reserved key (and value) separating current keys from obsolete ones.
pub const SENTINEL: &str = "****";

/// A base key that was missing from the target and got a value.
#[derive(Debug, Clone, PartialEq)]
pub struct FilledKey {
    pub key: String,
    pub value: serde_json::Value,
    pub fill: Fill,
}

/// Result of merging one base catalog into one target catalog.
#[derive(Debug, Clone, PartialEq)]
pub struct Reconciliation {
    pub catalog: Catalog,
    /// Keys added to the target, in base order.
    pub filled: Vec<FilledKey>,
    /// Target-only keys moved behind the sentinel, in target order.
    pub obsolete: Vec<String>,
}

impl Reconciliation {
    /// True if keys were filled or obsolete keys were found.
    pub fn changed(&self) -> bool {
        !self.filled.is_empty() || !self.obsolete.is_empty()
    }

    pub fn fallback_count(&self) -> usize {
        self.filled.iter().filter(|f| f.fill.is_fallback()).count()
    }
}

/// Merge `base` into `target` for `language`.
///
/// Only returns an error under [`TranslationFailurePolicy::Abort`].
pub async fn reconcile<T: Translator>(
    base: &Catalog,
    target: &Catalog,
    language: &str,
    translator: &T,
    policy: TranslationFailurePolicy,
) -> Result<Reconciliation, TranslationError> {
    let mut catalog = Catalog::new();
    let mut filled = Vec::new();

    for (key, base_value) in base {
        if let Some(existing) = target.get(key) {
            catalog.insert(key.clone(), existing.clone());
            continue;
        }

        let (value, fill) =
            fill_value(translator, key, base_value, language, BASE_LANGUAGE, policy).await?;
        catalog.insert(key.clone(), value.clone());
        filled.push(FilledKey {
            key: key.clone(),
            value,
            fill,
        });
    }

    let obsolete: Vec<String> = target
        .keys()
        .filter(|key| key.as_str() != SENTINEL && !base.contains_key(key.as_str()))
        .cloned()
        .collect();

    if !obsolete.is_empty() {
        catalog.insert(
            SENTINEL.to_string(),
            serde_json::Value::String(SENTINEL.to_string()),
        );
        for key in &obsolete {
            catalog.insert(key.clone(), target[key.as_str()].clone());
        }
    }

    Ok(Reconciliation {
        catalog,
        filled,
        obsolete,
    })
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SyncStatus {
    Written,
    UpToDate,
}

/// Outcome of syncing one target language.
#[derive(Debug, Clone)]
pub struct LanguageSync {
    pub language: String,
    pub location: String,
    /// Target catalog did not exist before.
    pub created: bool,
    pub reconciliation: Reconciliation,
    pub status: SyncStatus,
}

#[derive(Debug, Clone)]
pub struct ModuleSync {
    pub module: String,
    pub languages: Vec<LanguageSync>,
}

impl ModuleSync {
    pub fn written_count(&self) -> usize {
        self.languages
            .iter()
            .filter(|l| l.status == SyncStatus::Written)
            .count()
    }
}

/// Syncs every non-base language of a module with its base catalog.
pub struct Reconciler<'a, S, T> {
    registry: &'a ModuleRegistry,
    store: &'a S,
    translator: &'a T,
    policy: TranslationFailurePolicy,
}

impl<'a, S: CatalogStore, T: Translator> Reconciler<'a, S, T> {
    pub fn new(registry: &'a ModuleRegistry, store: &'a S, translator: &'a T) -> Self {
        Self {
            registry,
            store,
            translator,
            policy: TranslationFailurePolicy::Fallback,
        }
    }

    pub fn with_policy(mut self, policy: TranslationFailurePolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Sync all target languages of `module_name`, in registry order.
    ///
    /// `on_language` is called as soon as each language is done, so that
    /// completed languages are reported even if a later one fails. Writes
    /// already made are never rolled back.
    pub async fn sync_module(
        &self,
        module_name: &str,
        mut on_language: impl FnMut(&LanguageSync),
    ) -> Result<ModuleSync, SyncError> {
        let module = self.registry.resolve(module_name)?;

        let base = self
            .store
            .read_catalog_if_exists(module, BASE_LANGUAGE)?
            .ok_or_else(|| SyncError::MissingBaseCatalog {
                module: module.name.clone(),
                path: self.store.locate(module, BASE_LANGUAGE),
            })?;

        let mut languages = Vec::new();
        for language in module.target_languages() {
            info!(module = %module.name, language, "syncing");
            let existing = self.store.read_catalog_if_exists(module, language)?;
            let created = existing.is_none();
            let target = existing.unwrap_or_default();

            let reconciliation =
                reconcile(&base, &target, language, self.translator, self.policy)
                    .await
                    .map_err(|source| SyncError::Translation {
                        language: language.to_string(),
                        source,
                    })?;

            let status = if render_catalog(&target)? == render_catalog(&reconciliation.catalog)? {
                SyncStatus::UpToDate
            } else {
                self.store
                    .write_catalog(module, language, &reconciliation.catalog)
                    .map_err(|source| SyncError::Write {
                        module: module.name.clone(),
                        language: language.to_string(),
                        source,
                    })?;
                SyncStatus::Written
            };

            let outcome = LanguageSync {
                language: language.to_string(),
                location: self.store.locate(module, language),
                created,
                reconciliation,
                status,
            };
            on_language(&outcome);
            languages.push(outcome);
        }

        Ok(ModuleSync {
            module: module.name.clone(),
            languages,
        })
    }
}
