use std::collections::{HashMap, HashSet};

use repokeeper_core::{RepoKey, SnapshotProvider, TrackerError};
use tracing::debug;

use crate::ChangeTracker;

/// Builds the tracker for an upgrade from the repositories and services of the previous
/// installation.
///
/// Repositories that are no longer known to the package manager are skipped. Services whose
/// name is also used by a service of the new setup are not scheduled for deletion.
pub fn create_from_old_repositories<P>(provider: &P) -> Result<ChangeTracker, TrackerError>
where
    P: SnapshotProvider + ?Sized,
{
    let original = provider
        .original_setup()
        .map_err(|err| TrackerError::snapshot("original", err))?;
    let available = provider
        .list_repositories()
        .map_err(|err| TrackerError::external("list_repositories", err))?;
    let available: HashMap<RepoKey, String> = available
        .into_iter()
        .map(|repo| (repo.key(), repo.url))
        .collect();

    let repositories = original.repositories.into_iter().filter(|repo| {
        let known = available.contains_key(&repo.key());
        if !known {
            debug!(repository = %repo.key(), "skipping vanished repository");
        }
        known
    });

    let new_setup = provider
        .new_setup()
        .map_err(|err| TrackerError::snapshot("new", err))?;
    let new_service_names: HashSet<String> = new_setup
        .services
        .into_iter()
        .map(|service| service.name)
        .collect();

    let services = original.services.into_iter().filter(|service| {
        let replaced = new_service_names.contains(&service.name);
        if replaced {
            debug!(
                service = %service.alias,
                name = %service.name,
                "keeping service replaced by new setup"
            );
        }
        !replaced
    });

    let mut tracker = ChangeTracker::new(repositories, services);
    for (key, url) in &available {
        tracker.set_current_url(key, url);
    }
    debug!(
        repositories = tracker.len(),
        services = tracker.services().len(),
        "created repository change tracker"
    );
    Ok(tracker)
}
