mod error;
mod model;
mod ports;
mod resolvable;
mod status;

pub use error::{BoxError, TrackerError};
pub use model::{RepoKey, Repository, Service, SetupSnapshot};
pub use ports::{PackageManager, SnapshotProvider};
pub use resolvable::{Resolvable, ResolvableKind, ResolvableQuery, ResolvableStatus, TransactBy};
pub use status::RepoStatus;
