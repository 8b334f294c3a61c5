//! Command dispatch.
//!
//! Loads the configuration, builds the registry, store and translator once,
//! and runs the selected operation on a current-thread runtime. Translation
//! calls are awaited one at a time.

use std::{env, fs, path::Path, time::Duration};

use anyhow::{Context, Result};

use super::{
    args::{AddCommand, Arguments, Command, RemoveDuplicatesCommand, SyncCommand},
    report,
};
use crate::config::{CONFIG_FILE_NAME, ConfigLoadResult, default_config_json, load_config};
use crate::core::{
    DuplicateCompactor, FsCatalogStore, GoogleTranslator, KeyAdder, ModuleRegistry, Reconciler,
};

pub fn run(Arguments { command }: Arguments) -> Result<()> {
    match command {
        Some(Command::Sync(cmd)) => sync(cmd),
        Some(Command::Add(cmd)) => add(cmd),
        Some(Command::RemoveDuplicates(cmd)) => remove_duplicates(cmd),
        Some(Command::Init) => init(),
        None => {
            anyhow::bail!("No command provided. Use --help to see available commands.")
        }
    }
}

/// Everything an operation needs, built once per invocation.
struct Workspace {
    loaded: ConfigLoadResult,
    registry: ModuleRegistry,
    store: FsCatalogStore,
}

impl Workspace {
    fn load() -> Result<Self> {
        let cwd = env::current_dir().context("Failed to determine current directory")?;
        let loaded = load_config(&cwd)?;
        let registry = ModuleRegistry::from_config(&loaded.config);
        let store = FsCatalogStore::new(loaded.catalog_root());
        Ok(Self {
            loaded,
            registry,
            store,
        })
    }

    fn translator(&self) -> Result<GoogleTranslator> {
        let translation = &self.loaded.config.translation;
        GoogleTranslator::new(
            &translation.endpoint,
            &translation.api_key_env,
            Duration::from_secs(translation.timeout_secs),
        )
        .context("Failed to create translation client")
    }
}

fn block_on<F: Future>(future: F) -> Result<F::Output> {
    Ok(tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()?
        .block_on(future))
}

fn sync(cmd: SyncCommand) -> Result<()> {
    let workspace = Workspace::load()?;
    let translator = workspace.translator()?;
    let reconciler = Reconciler::new(&workspace.registry, &workspace.store, &translator)
        .with_policy(workspace.loaded.config.translation.on_sync_failure);

    let result = block_on(reconciler.sync_module(&cmd.module, report::print_language_sync))??;
    report::print_sync_summary(&result);
    Ok(())
}

fn add(cmd: AddCommand) -> Result<()> {
    let workspace = Workspace::load()?;
    let translator = workspace.translator()?;
    let adder = KeyAdder::new(&workspace.registry, &workspace.store, &translator)
        .with_policy(workspace.loaded.config.translation.on_add_failure);

    let result = block_on(adder.add_key(
        &cmd.module,
        &cmd.key,
        &cmd.value,
        report::print_added_translation,
    ))??;
    report::print_add_summary(&result);
    Ok(())
}

fn remove_duplicates(cmd: RemoveDuplicatesCommand) -> Result<()> {
    let workspace = Workspace::load()?;
    let compactor = DuplicateCompactor::new(&workspace.registry, &workspace.store);

    let result = compactor.remove_duplicates(&cmd.module, report::print_file_compaction)?;
    report::print_compaction_summary(&result);
    Ok(())
}

fn init() -> Result<()> {
    let config_path = Path::new(CONFIG_FILE_NAME);
    if config_path.exists() {
        anyhow::bail!("{} already exists", CONFIG_FILE_NAME);
    }

    fs::write(config_path, format!("{}\n", default_config_json()?))
        .with_context(|| format!("Failed to write {}", CONFIG_FILE_NAME))?;
    println!(
        "{} Created {}",
        report::SUCCESS_MARK,
        CONFIG_FILE_NAME
    );
    Ok(())
}

/// Module names from the current configuration, for the usage text, and
/// whether they came from a config file rather than the defaults.
pub fn available_modules() -> Option<(Vec<String>, bool)> {
    let workspace = Workspace::load().ok()?;
    let names = workspace
        .registry
        .names()
        .into_iter()
        .map(String::from)
        .collect();
    Some((names, workspace.loaded.from_file))
}
