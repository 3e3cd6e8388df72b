use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use repokeeper_core::{Repository, Resolvable, Service, SetupSnapshot, SnapshotProvider};
use tracing::debug;

use crate::{
    parse_resolvable_file, parse_source_table_file, sort_repositories, validate_source_table,
    SourceTableFile, StoreManager,
};

/// Package-manager state kept as TOML files under one root directory.
#[derive(Debug, Clone)]
pub struct SourceStore {
    pub(crate) state_root: PathBuf,
}

impl SourceStore {
    pub fn new(state_root: impl Into<PathBuf>) -> Self {
        Self {
            state_root: state_root.into(),
        }
    }

    pub fn state_root(&self) -> &Path {
        &self.state_root
    }

    pub fn sources_file_path(&self) -> PathBuf {
        self.state_root.join("sources.toml")
    }

    pub fn setup_dir(&self) -> PathBuf {
        self.state_root.join("setup")
    }

    pub fn original_setup_path(&self) -> PathBuf {
        self.setup_dir().join("original.toml")
    }

    pub fn new_setup_path(&self) -> PathBuf {
        self.setup_dir().join("new.toml")
    }

    pub fn resolvables_file_path(&self) -> PathBuf {
        self.state_root.join("products.toml")
    }

    /// Loads the source table and its resolvables into a manager that accepts changes.
    pub fn open_manager(&self) -> Result<StoreManager> {
        StoreManager::open(self.clone())
    }

    pub(crate) fn load_sources(&self) -> Result<SourceTableFile> {
        let path = self.sources_file_path();
        if !path.exists() {
            return Ok(SourceTableFile::default());
        }
        let mut table = read_source_table(&path)?;
        sort_repositories(&mut table.repositories);
        Ok(table)
    }

    pub(crate) fn save_sources(&self, table: &SourceTableFile) -> Result<()> {
        validate_source_table(table)?;
        fs::create_dir_all(&self.state_root).with_context(|| {
            format!(
                "failed creating source state root: {}",
                self.state_root.display()
            )
        })?;

        let path = self.sources_file_path();
        let mut table = table.clone();
        sort_repositories(&mut table.repositories);
        let content = toml::to_string(&table)
            .with_context(|| format!("failed serializing source table: {}", path.display()))?;
        fs::write(&path, content)
            .with_context(|| format!("failed writing source table: {}", path.display()))?;
        debug!(path = %path.display(), "saved source table");
        Ok(())
    }

    pub(crate) fn load_resolvables(&self) -> Result<Vec<Resolvable>> {
        let path = self.resolvables_file_path();
        if !path.exists() {
            return Ok(Vec::new());
        }

        let content = fs::read_to_string(&path)
            .with_context(|| format!("failed reading resolvables: {}", path.display()))?;
        let state = parse_resolvable_file(&content)
            .with_context(|| format!("failed parsing resolvables: {}", path.display()))?;
        Ok(state.resolvables)
    }

    fn load_setup(&self, path: &Path) -> Result<SetupSnapshot> {
        if !path.exists() {
            anyhow::bail!("setup snapshot not found: {}", path.display());
        }
        Ok(read_source_table(path)?.into())
    }
}

impl SnapshotProvider for SourceStore {
    fn list_repositories(&self) -> Result<Vec<Repository>> {
        Ok(self.load_sources()?.repositories)
    }

    fn list_services(&self) -> Result<Vec<Service>> {
        Ok(self.load_sources()?.services)
    }

    fn original_setup(&self) -> Result<SetupSnapshot> {
        self.load_setup(&self.original_setup_path())
    }

    fn new_setup(&self) -> Result<SetupSnapshot> {
        self.load_setup(&self.new_setup_path())
    }
}

fn read_source_table(path: &Path) -> Result<SourceTableFile> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("failed reading source table: {}", path.display()))?;
    parse_source_table_file(&content)
        .with_context(|| format!("failed parsing source table: {}", path.display()))
}
