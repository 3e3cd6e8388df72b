use std::fmt;

use serde::{Deserialize, Serialize};

/// Pending decision for a repository carried over from the previous installation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RepoStatus {
    #[default]
    Removed = 0,
    Enabled = 1,
    Disabled = 2,
}

// Indexed by discriminant: removed -> enabled -> disabled -> removed.
const NEXT_STATUS: [RepoStatus; 3] = [
    RepoStatus::Enabled,
    RepoStatus::Disabled,
    RepoStatus::Removed,
];

impl RepoStatus {
    pub const ALL: [RepoStatus; 3] = [
        RepoStatus::Removed,
        RepoStatus::Enabled,
        RepoStatus::Disabled,
    ];

    pub fn next(self) -> Self {
        NEXT_STATUS[self as usize]
    }

    pub fn as_str(self) -> &'static str {
        match self {
            RepoStatus::Removed => "removed",
            RepoStatus::Enabled => "enabled",
            RepoStatus::Disabled => "disabled",
        }
    }
}

impl fmt::Display for RepoStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
