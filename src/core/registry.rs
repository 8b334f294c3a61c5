use std::path::PathBuf;

use super::error::SyncError;
use crate::config::Config;

/// Language whose catalog decides which keys exist.
pub const BASE_LANGUAGE: &str = "en";

/// A named group of catalogs sharing one key namespace.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Module {
    pub name: String,
    /// Directory of the module's catalogs, relative to the catalog root.
    pub path: PathBuf,
    /// Supported languages in configured order, base language included.
    pub languages: Vec<String>,
}

impl Module {
    /// Languages other than [`BASE_LANGUAGE`], in registry order.
    pub fn target_languages(&self) -> impl Iterator<Item = &str> {
        self.languages
            .iter()
            .map(String::as_str)
            .filter(|lang| *lang != BASE_LANGUAGE)
    }
}

/// Immutable module table, built once at startup and passed to each operation.
#[derive(Debug, Clone, Default)]
pub struct ModuleRegistry {
    modules: Vec<Module>,
}

impl ModuleRegistry {
    pub fn new(modules: Vec<Module>) -> Self {
        Self { modules }
    }

    /// Build from an already validated [`Config`].
    pub fn from_config(config: &Config) -> Self {
        let modules = config
            .modules
            .iter()
            .map(|(name, module)| Module {
                name: name.clone(),
                path: PathBuf::from(&module.path),
                languages: module.languages.clone(),
            })
            .collect();
        Self::new(modules)
    }

    pub fn resolve(&self, name: &str) -> Result<&Module, SyncError> {
        self.modules
            .iter()
            .find(|module| module.name == name)
            .ok_or_else(|| SyncError::UnknownModule {
                name: name.to_string(),
                available: self.names().join(", "),
            })
    }

    pub fn names(&self) -> Vec<&str> {
        self.modules.iter().map(|module| module.name.as_str()).collect()
    }
}
