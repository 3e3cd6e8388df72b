use std::collections::HashSet;

use anyhow::{Context, Result};
use repokeeper_core::{Repository, Service, SetupSnapshot};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub(crate) struct SourceTableFile {
    #[serde(default = "state_file_version")]
    pub(crate) version: u32,
    #[serde(default)]
    pub(crate) repositories: Vec<Repository>,
    #[serde(default)]
    pub(crate) services: Vec<Service>,
}

#[derive(Debug, Deserialize)]
struct SourceTableFileLegacy {
    #[serde(default)]
    repositories: Vec<Repository>,
    #[serde(default)]
    services: Vec<Service>,
}

impl Default for SourceTableFile {
    fn default() -> Self {
        Self {
            version: state_file_version(),
            repositories: Vec::new(),
            services: Vec::new(),
        }
    }
}

impl From<SourceTableFile> for SetupSnapshot {
    fn from(table: SourceTableFile) -> Self {
        SetupSnapshot {
            repositories: table.repositories,
            services: table.services,
        }
    }
}

pub(crate) fn parse_source_table_file(content: &str) -> Result<SourceTableFile> {
    let value = toml::from_str::<toml::Value>(content)?;
    let mut table = if value.get("version").is_some() {
        let parsed = value
            .clone()
            .try_into::<SourceTableFile>()
            .context("failed parsing versioned source table")?;
        let expected = state_file_version();
        if parsed.version != expected {
            anyhow::bail!(
                "unsupported source table version {} (expected {})",
                parsed.version,
                expected
            );
        }
        parsed
    } else {
        let parsed = value
            .try_into::<SourceTableFileLegacy>()
            .context("failed parsing legacy source table")?;
        SourceTableFile {
            version: state_file_version(),
            repositories: parsed.repositories,
            services: parsed.services,
        }
    };

    validate_source_table(&table)?;
    table.version = state_file_version();
    Ok(table)
}

pub(crate) fn state_file_version() -> u32 {
    1
}

pub(crate) fn sort_repositories(repositories: &mut [Repository]) {
    repositories.sort_by(|left, right| {
        left.id
            .cmp(&right.id)
            .then_with(|| left.alias.cmp(&right.alias))
    });
}

pub(crate) fn validate_source_table(table: &SourceTableFile) -> Result<()> {
    let mut seen_ids: HashSet<u64> = HashSet::with_capacity(table.repositories.len());
    let mut seen_aliases: HashSet<&str> = HashSet::with_capacity(table.repositories.len());
    for repository in &table.repositories {
        if repository.alias.is_empty() {
            anyhow::bail!("invalid repository alias: must not be empty (id {})", repository.id);
        }
        if !seen_ids.insert(repository.id) {
            anyhow::bail!("duplicate repository id {}", repository.id);
        }
        if !seen_aliases.insert(repository.alias.as_str()) {
            anyhow::bail!("duplicate repository alias '{}'", repository.alias);
        }
    }

    let mut seen_services: HashSet<&str> = HashSet::with_capacity(table.services.len());
    for service in &table.services {
        if service.alias.is_empty() {
            anyhow::bail!("invalid service alias: must not be empty");
        }
        if !seen_services.insert(service.alias.as_str()) {
            anyhow::bail!("duplicate service alias '{}'", service.alias);
        }
    }

    Ok(())
}
