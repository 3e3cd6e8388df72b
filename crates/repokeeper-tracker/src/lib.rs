mod activation;
mod reconcile;
mod tracker;

pub use activation::{
    ActivationCommitter, ActivationPlan, ActivationReport, RepoAction, SourceReloadStep,
    SOURCE_RELOAD_SEQUENCE,
};
pub use reconcile::create_from_old_repositories;
pub use tracker::{ChangeTracker, RepoState};
