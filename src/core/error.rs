//! Error kinds returned by catalog operations.

use thiserror::Error;

use super::{store::StoreError, translate::TranslationError};

#[derive(Debug, Error)]
pub enum SyncError {
    /// Module name is not in the registry.
    #[error("unknown module \"{name}\"; available modules: {available}")]
    UnknownModule { name: String, available: String },

    /// There is no base catalog to reconcile against.
    #[error("base catalog not found: {path}")]
    MissingBaseCatalog { module: String, path: String },

    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// Key already present in some language of the module.
    #[error("key \"{key}\" already exists in {module}/{language}.json")]
    DuplicateKey {
        key: String,
        module: String,
        language: String,
    },

    /// Translation failed under the abort policy.
    #[error("translation to \"{language}\" failed: {source}")]
    Translation {
        language: String,
        #[source]
        source: TranslationError,
    },

    #[error("write aborted at language \"{language}\": {source}")]
    Write {
        module: String,
        language: String,
        #[source]
        source: StoreError,
    },

    /// A catalog exists but could not be read or parsed.
    #[error(transparent)]
    Store(#[from] StoreError),
}
