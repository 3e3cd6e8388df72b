use indexmap::IndexMap;
use repokeeper_core::{PackageManager, RepoKey, RepoStatus, Repository, Service, TrackerError};

use crate::{ActivationCommitter, ActivationPlan, ActivationReport, RepoAction};

/// Pending decision for one tracked repository.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RepoState {
    pub status: RepoStatus,
    pub url: Option<String>,
}

#[derive(Debug, Clone)]
struct TrackedRepository {
    repository: Repository,
    /// Url the package manager currently has configured; overrides are compared against it.
    current_url: String,
    state: RepoState,
}

/// Changes to the repositories and services of a previous installation, collected during one
/// upgrade session and committed once with [`ChangeTracker::activate_changes`].
#[derive(Debug, Clone)]
pub struct ChangeTracker {
    repositories: IndexMap<RepoKey, TrackedRepository>,
    services: Vec<Service>,
}

impl ChangeTracker {
    /// Tracks every repository with status `removed` and schedules every service for deletion.
    /// A repository whose identity repeats an earlier one is ignored.
    pub fn new(
        repositories: impl IntoIterator<Item = Repository>,
        services: impl IntoIterator<Item = Service>,
    ) -> Self {
        let mut tracked = IndexMap::new();
        for repository in repositories {
            tracked
                .entry(repository.key())
                .or_insert_with(|| TrackedRepository {
                    current_url: repository.url.clone(),
                    repository,
                    state: RepoState::default(),
                });
        }

        Self {
            repositories: tracked,
            services: services.into_iter().collect(),
        }
    }

    pub fn repositories(&self) -> impl Iterator<Item = &Repository> {
        self.repositories.values().map(|tracked| &tracked.repository)
    }

    /// Services slated for deletion.
    pub fn services(&self) -> &[Service] {
        &self.services
    }

    pub fn len(&self) -> usize {
        self.repositories.len()
    }

    pub fn is_empty(&self) -> bool {
        self.repositories.is_empty()
    }

    pub fn find_repository(&self, alias: &str) -> Option<&Repository> {
        self.repositories().find(|repository| repository.alias == alias)
    }

    pub fn repo_state(&self, repo: &Repository) -> Option<&RepoState> {
        self.repositories.get(&repo.key()).map(|tracked| &tracked.state)
    }

    pub fn repo_status(&self, repo: &Repository) -> Option<RepoStatus> {
        self.repo_state(repo).map(|state| state.status)
    }

    /// Override url when one was set, the repository's original url otherwise.
    pub fn repo_url(&self, repo: &Repository) -> Option<&str> {
        let tracked = self.repositories.get(&repo.key())?;
        Some(
            tracked
                .state
                .url
                .as_deref()
                .unwrap_or_else(|| tracked.repository.original_url()),
        )
    }

    pub fn change_url(
        &mut self,
        repo: &Repository,
        url: impl Into<String>,
    ) -> Result<(), TrackerError> {
        let state = self.state_mut(repo)?;
        state.url = Some(url.into());
        Ok(())
    }

    /// Moves the repository one step along removed -> enabled -> disabled -> removed and
    /// returns the new status.
    pub fn toggle_repo_status(&mut self, repo: &Repository) -> Result<RepoStatus, TrackerError> {
        let state = self.state_mut(repo)?;
        state.status = state.status.next();
        Ok(state.status)
    }

    /// Actions `activate_changes` would issue, in issue order.
    pub fn plan(&self) -> ActivationPlan {
        let mut repositories = Vec::with_capacity(self.repositories.len());
        for (key, tracked) in &self.repositories {
            let status_key = key.clone();
            repositories.push(match tracked.state.status {
                RepoStatus::Removed => RepoAction::Delete { key: status_key },
                RepoStatus::Enabled => RepoAction::Enable { key: status_key },
                RepoStatus::Disabled => RepoAction::Disable { key: status_key },
            });

            // Issued regardless of status, even for repositories being deleted.
            if let Some(url) = &tracked.state.url {
                if *url != tracked.current_url {
                    repositories.push(RepoAction::SetUrl {
                        key: key.clone(),
                        url: url.clone(),
                    });
                }
            }
        }

        ActivationPlan {
            repositories,
            services: self
                .services
                .iter()
                .map(|service| service.alias.clone())
                .collect(),
        }
    }

    /// Commits the collected changes. The tracker is consumed: a session activates once.
    pub fn activate_changes<M>(self, manager: &mut M) -> Result<ActivationReport, TrackerError>
    where
        M: PackageManager + ?Sized,
    {
        let plan = self.plan();
        ActivationCommitter::new(manager).commit(&plan)
    }

    /// Records the url the package manager currently uses for a tracked repository.
    pub(crate) fn set_current_url(&mut self, key: &RepoKey, url: &str) {
        if let Some(tracked) = self.repositories.get_mut(key) {
            tracked.current_url = url.to_string();
        }
    }

    fn state_mut(&mut self, repo: &Repository) -> Result<&mut RepoState, TrackerError> {
        let key = repo.key();
        match self.repositories.get_mut(&key) {
            Some(tracked) => Ok(&mut tracked.state),
            None => Err(TrackerError::RepositoryNotFound(key)),
        }
    }
}
