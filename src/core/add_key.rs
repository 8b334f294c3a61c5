//! Adding one key to every language of a module.

use serde_json::Value;
use tracing::info;

use super::{
    BASE_LANGUAGE, Fill, TranslationFailurePolicy,
    error::SyncError,
    reconcile::SENTINEL,
    registry::ModuleRegistry,
    store::CatalogStore,
    translate::{Translator, fill_value},
};

/// One language file updated by [`KeyAdder::add_key`].
#[derive(Debug, Clone, PartialEq)]
pub struct AddedTranslation {
    pub language: String,
    pub location: String,
    pub value: Value,
    pub fill: Fill,
    /// The catalog file did not exist before.
    pub created: bool,
}

#[derive(Debug, Clone)]
pub struct KeyAddition {
    pub module: String,
    pub key: String,
    pub languages: Vec<AddedTranslation>,
}

pub struct KeyAdder<'a, S, T> {
    registry: &'a ModuleRegistry,
    store: &'a S,
    translator: &'a T,
    policy: TranslationFailurePolicy,
}

impl<'a, S: CatalogStore, T: Translator> KeyAdder<'a, S, T> {
    /// Translation failures abort by default; see [`KeyAdder::with_policy`].
    pub fn new(registry: &'a ModuleRegistry, store: &'a S, translator: &'a T) -> Self {
        Self {
            registry,
            store,
            translator,
            policy: TranslationFailurePolicy::Abort,
        }
    }

    pub fn with_policy(mut self, policy: TranslationFailurePolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Add `key` with `base_value` to every language of `module_name`.
    ///
    /// Nothing is written unless the key is absent from every existing
    /// catalog. Languages are then written one at a time in registry order;
    /// on a translation abort or write failure the languages already written
    /// stay written.
    pub async fn add_key(
        &self,
        module_name: &str,
        key: &str,
        base_value: &str,
        mut on_language: impl FnMut(&AddedTranslation),
    ) -> Result<KeyAddition, SyncError> {
        if key.is_empty() {
            return Err(SyncError::InvalidArgument("key must not be empty".to_string()));
        }
        if key == SENTINEL {
            return Err(SyncError::InvalidArgument(format!(
                "key \"{SENTINEL}\" is reserved for obsolete keys"
            )));
        }
        if base_value.is_empty() {
            return Err(SyncError::InvalidArgument(
                "value must not be empty".to_string(),
            ));
        }

        let module = self.registry.resolve(module_name)?;

        for language in &module.languages {
            if let Some(catalog) = self.store.read_catalog_if_exists(module, language)?
                && catalog.contains_key(key)
            {
                return Err(SyncError::DuplicateKey {
                    key: key.to_string(),
                    module: module.name.clone(),
                    language: language.clone(),
                });
            }
        }

        info!(module = %module.name, key, "adding key");
        let source = Value::String(base_value.to_string());
        let mut languages = Vec::new();

        for language in &module.languages {
            let existing = self.store.read_catalog_if_exists(module, language)?;
            let created = existing.is_none();
            let mut catalog = existing.unwrap_or_default();

            let (value, fill) = if language == BASE_LANGUAGE {
                (source.clone(), Fill::Base)
            } else {
                fill_value(
                    self.translator,
                    key,
                    &source,
                    language,
                    BASE_LANGUAGE,
                    self.policy,
                )
                .await
                .map_err(|source| SyncError::Translation {
                    language: language.clone(),
                    source,
                })?
            };

            catalog.insert(key.to_string(), value.clone());
            self.store
                .write_catalog(module, language, &catalog)
                .map_err(|source| SyncError::Write {
                    module: module.name.clone(),
                    language: language.clone(),
                    source,
                })?;

            let added = AddedTranslation {
                language: language.clone(),
                location: self.store.locate(module, language),
                value,
                fill,
                created,
            };
            on_language(&added);
            languages.push(added);
        }

        Ok(KeyAddition {
            module: module.name.clone(),
            key: key.to_string(),
            languages,
        })
    }
}
