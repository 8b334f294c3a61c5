//! Catalog files on disk.
//!
//! One JSON file per (module, language):
//! `<root>/<module.path>/<language>.json`. Catalogs keep insertion order
//! (`serde_json` is built with `preserve_order`) and are written as pretty
//! JSON with 2-space indentation and a trailing newline.

use std::{
    fs, io,
    io::Write,
    path::{Path, PathBuf},
};

use serde_json::{Map, Value};
use tempfile::NamedTempFile;
use thiserror::Error;

use super::registry::Module;

/// Ordered key/value mapping of one language of one module.
pub type Catalog = Map<String, Value>;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("file does not exist: {path}")]
    Missing { path: String },

    #[error("failed to read {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: io::Error,
    },

    #[error("failed to parse {path}: {source}")]
    Parse {
        path: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("root of {path} must be a JSON object")]
    NotAnObject { path: String },

    #[error("failed to serialize catalog: {0}")]
    Serialize(#[source] serde_json::Error),

    #[error("failed to write {path}: {source}")]
    Write {
        path: String,
        #[source]
        source: io::Error,
    },
}

/// Parse raw catalog text. `path` is only used in error messages.
pub fn parse_catalog(content: &str, path: &str) -> Result<Catalog, StoreError> {
    let value: Value = serde_json::from_str(content).map_err(|source| StoreError::Parse {
        path: path.to_string(),
        source,
    })?;
    match value {
        Value::Object(map) => Ok(map),
        _ => Err(StoreError::NotAnObject {
            path: path.to_string(),
        }),
    }
}

/// Serialize a catalog the way it is written to disk.
pub fn render_catalog(catalog: &Catalog) -> Result<String, StoreError> {
    let content = serde_json::to_string_pretty(catalog).map_err(StoreError::Serialize)?;
    Ok(format!("{}\n", content))
}

/// Storage of catalogs keyed by (module, language).
///
/// Implementors provide raw text access; the catalog methods are built on top.
pub trait CatalogStore {
    /// Human-readable location of a catalog, used in messages.
    fn locate(&self, module: &Module, language: &str) -> String;

    /// Fails with [`StoreError::Missing`] if the catalog does not exist.
    fn read_raw(&self, module: &Module, language: &str) -> Result<String, StoreError>;

    fn write_raw(&self, module: &Module, language: &str, text: &str) -> Result<(), StoreError>;

    fn read_catalog(&self, module: &Module, language: &str) -> Result<Catalog, StoreError> {
        let content = self.read_raw(module, language)?;
        parse_catalog(&content, &self.locate(module, language))
    }

    /// Like [`CatalogStore::read_catalog`], but a missing file is `None`.
    fn read_catalog_if_exists(
        &self,
        module: &Module,
        language: &str,
    ) -> Result<Option<Catalog>, StoreError> {
        match self.read_catalog(module, language) {
            Ok(catalog) => Ok(Some(catalog)),
            Err(StoreError::Missing { .. }) => Ok(None),
            Err(err) => Err(err),
        }
    }

    fn write_catalog(
        &self,
        module: &Module,
        language: &str,
        catalog: &Catalog,
    ) -> Result<(), StoreError> {
        self.write_raw(module, language, &render_catalog(catalog)?)
    }
}

/// Catalog store backed by JSON files under one root directory.
#[derive(Debug, Clone)]
pub struct FsCatalogStore {
    root: PathBuf,
}

impl FsCatalogStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn file_path(&self, module: &Module, language: &str) -> PathBuf {
        self.root
            .join(&module.path)
            .join(format!("{}.json", language))
    }
}

impl CatalogStore for FsCatalogStore {
    fn locate(&self, module: &Module, language: &str) -> String {
        self.file_path(module, language).display().to_string()
    }

    fn read_raw(&self, module: &Module, language: &str) -> Result<String, StoreError> {
        let path = self.file_path(module, language);
        fs::read_to_string(&path).map_err(|source| {
            let path = path.display().to_string();
            if source.kind() == io::ErrorKind::NotFound {
                StoreError::Missing { path }
            } else {
                StoreError::Read { path, source }
            }
        })
    }

    fn write_raw(&self, module: &Module, language: &str, text: &str) -> Result<(), StoreError> {
        let path = self.file_path(module, language);
        write_atomic(&path, text).map_err(|source| StoreError::Write {
            path: path.display().to_string(),
            source,
        })
    }
}

/// Write through a temp file in the target directory, then rename over the target.
fn write_atomic(path: &Path, text: &str) -> io::Result<()> {
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    fs::create_dir_all(dir)?;

    let mut file = NamedTempFile::new_in(dir)?;
    file.write_all(text.as_bytes())?;
    file.as_file().sync_all()?;
    file.persist(path).map_err(|err| err.error)?;
    Ok(())
}
