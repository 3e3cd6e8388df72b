use thiserror::Error;

use crate::RepoKey;

pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

#[derive(Debug, Error)]
pub enum TrackerError {
    #[error("repository {0} is not tracked")]
    RepositoryNotFound(RepoKey),

    #[error("no tracked repository with alias '{0}'")]
    AliasNotFound(String),

    #[error("failed reading {snapshot} snapshot: {source}")]
    Snapshot {
        snapshot: &'static str,
        #[source]
        source: BoxError,
    },

    #[error("package manager call {operation} failed: {source}")]
    External {
        operation: String,
        #[source]
        source: BoxError,
    },
}

impl TrackerError {
    pub fn snapshot(snapshot: &'static str, err: anyhow::Error) -> Self {
        TrackerError::Snapshot {
            snapshot,
            source: err.into(),
        }
    }

    pub fn external(operation: impl Into<String>, err: anyhow::Error) -> Self {
        TrackerError::External {
            operation: operation.into(),
            source: err.into(),
        }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            TrackerError::RepositoryNotFound(_) | TrackerError::AliasNotFound(_)
        )
    }
}
