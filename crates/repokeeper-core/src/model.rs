use std::fmt;

use serde::{Deserialize, Serialize};

/// Identity of a repository: the numeric id assigned by the package manager plus its alias.
///
/// Trackers key their state on this value only, so changing a repository's url, name or
/// flags never changes which entry it resolves to.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct RepoKey {
    pub id: u64,
    pub alias: String,
}

impl RepoKey {
    pub fn new(id: u64, alias: impl Into<String>) -> Self {
        Self {
            id,
            alias: alias.into(),
        }
    }
}

impl fmt::Display for RepoKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} (#{})", self.alias, self.id)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Repository {
    pub id: u64,
    pub alias: String,
    pub name: String,
    pub url: String,
    /// Url as originally configured, before variable expansion.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub raw_url: Option<String>,
    #[serde(default = "flag_enabled_default")]
    pub enabled: bool,
    #[serde(default = "flag_enabled_default")]
    pub autorefresh: bool,
    /// Alias of the service that manages this repository, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub service: Option<String>,
}

impl Repository {
    pub fn key(&self) -> RepoKey {
        RepoKey::new(self.id, self.alias.clone())
    }

    pub fn original_url(&self) -> &str {
        self.raw_url.as_deref().unwrap_or(&self.url)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Service {
    pub alias: String,
    pub name: String,
    pub url: String,
    #[serde(default = "flag_enabled_default")]
    pub enabled: bool,
    #[serde(default = "flag_enabled_default")]
    pub autorefresh: bool,
}

/// Point-in-time view of the repository and service tables.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SetupSnapshot {
    #[serde(default)]
    pub repositories: Vec<Repository>,
    #[serde(default)]
    pub services: Vec<Service>,
}

pub(crate) fn flag_enabled_default() -> bool {
    true
}
