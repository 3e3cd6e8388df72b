use anyhow::{Context, Result};
use repokeeper_core::Resolvable;
use serde::Deserialize;

use crate::state_file_version;

#[derive(Debug, Clone, Deserialize)]
pub(crate) struct ResolvableStateFile {
    #[serde(default = "state_file_version")]
    pub(crate) version: u32,
    #[serde(default)]
    pub(crate) resolvables: Vec<Resolvable>,
}

pub(crate) fn parse_resolvable_file(content: &str) -> Result<ResolvableStateFile> {
    let parsed =
        toml::from_str::<ResolvableStateFile>(content).context("failed parsing resolvables")?;
    let expected = state_file_version();
    if parsed.version != expected {
        anyhow::bail!(
            "unsupported resolvables version {} (expected {})",
            parsed.version,
            expected
        );
    }
    Ok(parsed)
}
