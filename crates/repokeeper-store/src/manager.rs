use std::collections::HashSet;

use anyhow::{anyhow, Result};
use repokeeper_core::{
    PackageManager, RepoKey, Repository, Resolvable, ResolvableKind, ResolvableQuery,
    ResolvableStatus, TransactBy,
};
use tracing::debug;

use crate::{SourceStore, SourceTableFile};

/// [`PackageManager`] over a [`SourceStore`]. Changes stay in memory until
/// `save_all_sources`; after `finish_all_sources` the table must be restored before it accepts
/// repository calls again.
#[derive(Debug)]
pub struct StoreManager {
    store: SourceStore,
    table: Option<SourceTableFile>,
    resolvables: Vec<Resolvable>,
}

impl StoreManager {
    pub(crate) fn open(store: SourceStore) -> Result<Self> {
        let mut manager = Self {
            store,
            table: None,
            resolvables: Vec::new(),
        };
        manager.restore_sources()?;
        manager.load_sources()?;
        Ok(manager)
    }

    pub fn is_loaded(&self) -> bool {
        self.table.is_some()
    }

    pub fn repositories(&self) -> &[Repository] {
        self.table
            .as_ref()
            .map(|table| table.repositories.as_slice())
            .unwrap_or_default()
    }

    pub fn resolvables(&self) -> &[Resolvable] {
        &self.resolvables
    }

    fn table_mut(&mut self) -> Result<&mut SourceTableFile> {
        self.table
            .as_mut()
            .ok_or_else(|| anyhow!("package sources are not loaded: restore sources first"))
    }

    fn repository_mut(&mut self, key: &RepoKey) -> Result<&mut Repository> {
        self.table_mut()?
            .repositories
            .iter_mut()
            .find(|repository| repository.id == key.id && repository.alias == key.alias)
            .ok_or_else(|| anyhow!("repository {key} not found"))
    }
}

impl PackageManager for StoreManager {
    fn delete_repository(&mut self, key: &RepoKey) -> Result<()> {
        let table = self.table_mut()?;
        let before = table.repositories.len();
        table
            .repositories
            .retain(|repository| !(repository.id == key.id && repository.alias == key.alias));
        if table.repositories.len() == before {
            anyhow::bail!("repository {key} not found");
        }
        debug!(repository = %key, "deleted repository");
        Ok(())
    }

    fn enable_repository(&mut self, key: &RepoKey) -> Result<()> {
        self.repository_mut(key)?.enabled = true;
        debug!(repository = %key, "enabled repository");
        Ok(())
    }

    fn disable_repository(&mut self, key: &RepoKey) -> Result<()> {
        self.repository_mut(key)?.enabled = false;
        debug!(repository = %key, "disabled repository");
        Ok(())
    }

    fn set_repository_url(&mut self, key: &RepoKey, url: &str) -> Result<()> {
        let repository = self.repository_mut(key)?;
        repository.url = url.to_string();
        repository.raw_url = None;
        debug!(repository = %key, url, "changed repository url");
        Ok(())
    }

    fn delete_service(&mut self, alias: &str) -> Result<()> {
        let table = self.table_mut()?;
        let before = table.services.len();
        table.services.retain(|service| service.alias != alias);
        if table.services.len() == before {
            anyhow::bail!("service '{alias}' not found");
        }

        // Repositories managed by the service go with it.
        table
            .repositories
            .retain(|repository| repository.service.as_deref() != Some(alias));
        debug!(service = alias, "deleted service");
        Ok(())
    }

    fn save_all_sources(&mut self) -> Result<()> {
        let table = self
            .table
            .as_ref()
            .ok_or_else(|| anyhow!("package sources are not loaded: nothing to save"))?;
        self.store.save_sources(table)
    }

    fn finish_all_sources(&mut self) -> Result<()> {
        self.table = None;
        self.resolvables.clear();
        debug!("unloaded package sources");
        Ok(())
    }

    fn restore_sources(&mut self) -> Result<()> {
        let table = self.store.load_sources()?;
        debug!(
            repositories = table.repositories.len(),
            services = table.services.len(),
            "restored package sources"
        );
        self.table = Some(table);
        Ok(())
    }

    fn load_sources(&mut self) -> Result<()> {
        let table = self
            .table
            .as_ref()
            .ok_or_else(|| anyhow!("package sources are not loaded: restore sources first"))?;
        let enabled: HashSet<&str> = table
            .repositories
            .iter()
            .filter(|repository| repository.enabled)
            .map(|repository| repository.alias.as_str())
            .collect();

        self.resolvables = self
            .store
            .load_resolvables()?
            .into_iter()
            .filter(|resolvable| enabled.contains(resolvable.repository.as_str()))
            .collect();
        debug!(
            resolvables = self.resolvables.len(),
            "loaded resolvables from enabled repositories"
        );
        Ok(())
    }

    fn find_resolvables(&self, query: &ResolvableQuery) -> Result<Vec<Resolvable>> {
        Ok(self
            .resolvables
            .iter()
            .filter(|resolvable| query.matches(resolvable))
            .cloned()
            .collect())
    }

    fn install_resolvable(&mut self, name: &str, kind: ResolvableKind) -> Result<bool> {
        let Some(resolvable) = self
            .resolvables
            .iter_mut()
            .find(|resolvable| resolvable.name == name && resolvable.kind == kind)
        else {
            return Ok(false);
        };

        resolvable.status = ResolvableStatus::Selected;
        resolvable.transact_by = TransactBy::ApplHigh;
        debug!(name, kind = kind.as_str(), "selected resolvable for installation");
        Ok(true)
    }
}
