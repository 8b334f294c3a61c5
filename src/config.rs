use std::{
    collections::{BTreeMap, HashSet},
    fs,
    path::{Path, PathBuf},
};

use anyhow::{Context, Ok, Result, bail};
use serde::{Deserialize, Serialize};

use crate::core::{BASE_LANGUAGE, TranslationFailurePolicy};

pub const CONFIG_FILE_NAME: &str = ".i18nsyncrc.json";

pub const DEFAULT_TRANSLATE_ENDPOINT: &str =
    "https://translation.googleapis.com/language/translate/v2";

#[derive(Debug, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Config {
    #[serde(default = "default_base_path")]
    pub base_path: String,
    #[serde(default = "default_modules")]
    pub modules: BTreeMap<String, ModuleConfig>,
    #[serde(default)]
    pub translation: TranslationConfig,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ModuleConfig {
    pub path: String,
    pub languages: Vec<String>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TranslationConfig {
    #[serde(default = "default_endpoint")]
    pub endpoint: String,
    /// Name of the environment variable holding the API key.
    #[serde(default = "default_api_key_env")]
    pub api_key_env: String,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
    #[serde(default = "default_sync_failure")]
    pub on_sync_failure: TranslationFailurePolicy,
    #[serde(default = "default_add_failure")]
    pub on_add_failure: TranslationFailurePolicy,
}

fn default_base_path() -> String {
    "./src/assets/i18n".to_string()
}

fn default_modules() -> BTreeMap<String, ModuleConfig> {
    ["core", "common"]
        .iter()
        .map(|name| {
            (
                name.to_string(),
                ModuleConfig {
                    path: name.to_string(),
                    languages: ["en", "zh", "zh-tw"].map(String::from).to_vec(),
                },
            )
        })
        .collect()
}

fn default_endpoint() -> String {
    DEFAULT_TRANSLATE_ENDPOINT.to_string()
}

fn default_api_key_env() -> String {
    "GOOGLE_TRANSLATE_API_KEY".to_string()
}

fn default_timeout_secs() -> u64 {
    30
}

fn default_sync_failure() -> TranslationFailurePolicy {
    TranslationFailurePolicy::Fallback
}

fn default_add_failure() -> TranslationFailurePolicy {
    TranslationFailurePolicy::Abort
}

impl Default for TranslationConfig {
    fn default() -> Self {
        Self {
            endpoint: default_endpoint(),
            api_key_env: default_api_key_env(),
            timeout_secs: default_timeout_secs(),
            on_sync_failure: default_sync_failure(),
            on_add_failure: default_add_failure(),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            base_path: default_base_path(),
            modules: default_modules(),
            translation: TranslationConfig::default(),
        }
    }
}

impl Config {
    /// Validate configuration values.
    ///
    /// Every module must have a path and list the base language exactly once.
    pub fn validate(&self) -> Result<()> {
        if self.modules.is_empty() {
            bail!("No modules configured in 'modules'");
        }

        for (name, module) in &self.modules {
            if module.path.trim().is_empty() {
                bail!("Module \"{}\" has an empty 'path'", name);
            }
            if !module.languages.iter().any(|lang| lang == BASE_LANGUAGE) {
                bail!(
                    "Module \"{}\" must list the base language \"{}\" in 'languages'",
                    name,
                    BASE_LANGUAGE
                );
            }
            let mut seen = HashSet::new();
            for lang in &module.languages {
                if lang.trim().is_empty() {
                    bail!("Module \"{}\" has an empty language code", name);
                }
                if !seen.insert(lang.as_str()) {
                    bail!("Module \"{}\" lists language \"{}\" twice", name, lang);
                }
            }
        }

        Ok(())
    }
}

pub fn default_config_json() -> Result<String> {
    let config = Config::default();
    serde_json::to_string_pretty(&config).context("Failed to generate default config.")
}

pub fn find_config_file(start_dir: &Path) -> Option<PathBuf> {
    let mut current = start_dir.to_path_buf();

    loop {
        let config_path = current.join(CONFIG_FILE_NAME);
        if config_path.exists() {
            return Some(config_path);
        }
        if current.join(".git").exists() {
            return None;
        }
        if !current.pop() {
            return None;
        }
    }
}

/// Result of loading configuration.
pub struct ConfigLoadResult {
    pub config: Config,
    /// True if config was loaded from a file, false if using defaults.
    pub from_file: bool,
    /// Directory `basePath` is resolved against.
    pub root: PathBuf,
}

impl ConfigLoadResult {
    /// Absolute directory holding the per-module catalog folders.
    pub fn catalog_root(&self) -> PathBuf {
        self.root.join(&self.config.base_path)
    }
}

pub fn load_config(start_dir: &Path) -> Result<ConfigLoadResult> {
    match find_config_file(start_dir) {
        Some(path) => {
            let content = fs::read_to_string(&path)
                .with_context(|| format!("Failed to read config file: {:?}", path))?;
            let config: Config = serde_json::from_str(&content)
                .with_context(|| format!("Failed to parse config file: {:?}", path))?;
            config.validate()?;
            let root = path
                .parent()
                .map(Path::to_path_buf)
                .unwrap_or_else(|| start_dir.to_path_buf());
            Ok(ConfigLoadResult {
                config,
                from_file: true,
                root,
            })
        }
        None => Ok(ConfigLoadResult {
            config: Config::default(),
            from_file: false,
            root: start_dir.to_path_buf(),
        }),
    }
}
