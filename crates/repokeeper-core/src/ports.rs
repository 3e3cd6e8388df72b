//! Contracts of the package-management subsystem the tracker reads from and commits to.

use anyhow::Result;

use crate::{
    RepoKey, Repository, Resolvable, ResolvableKind, ResolvableQuery, Service, SetupSnapshot,
};

pub trait SnapshotProvider {
    fn list_repositories(&self) -> Result<Vec<Repository>>;

    fn list_services(&self) -> Result<Vec<Service>>;

    /// Setup captured before the upgrade started.
    fn original_setup(&self) -> Result<SetupSnapshot>;

    /// Setup configured for the upgraded system.
    fn new_setup(&self) -> Result<SetupSnapshot>;
}

/// Imperative side of the package manager. Calls are stateful and order dependent; callers
/// issue them one at a time.
pub trait PackageManager {
    fn delete_repository(&mut self, key: &RepoKey) -> Result<()>;

    fn enable_repository(&mut self, key: &RepoKey) -> Result<()>;

    fn disable_repository(&mut self, key: &RepoKey) -> Result<()>;

    fn set_repository_url(&mut self, key: &RepoKey, url: &str) -> Result<()>;

    fn delete_service(&mut self, alias: &str) -> Result<()>;

    fn save_all_sources(&mut self) -> Result<()>;

    fn finish_all_sources(&mut self) -> Result<()>;

    fn restore_sources(&mut self) -> Result<()>;

    fn load_sources(&mut self) -> Result<()>;

    fn find_resolvables(&self, query: &ResolvableQuery) -> Result<Vec<Resolvable>>;

    /// Returns `false` when no resolvable with that name and kind is known.
    fn install_resolvable(&mut self, name: &str, kind: ResolvableKind) -> Result<bool>;
}
