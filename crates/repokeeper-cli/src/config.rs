use std::ffi::OsString;
use std::path::PathBuf;

use anyhow::{Context, Result};

pub(crate) const STATE_ROOT_ENV: &str = "REPOKEEPER_ROOT";

/// `--state-root` wins over `$REPOKEEPER_ROOT`, which wins over the per-user default.
pub(crate) fn resolve_state_root(
    flag: Option<PathBuf>,
    env_root: Option<OsString>,
) -> Result<PathBuf> {
    if let Some(root) = flag {
        return Ok(root);
    }
    if let Some(root) = env_root.filter(|root| !root.is_empty()) {
        return Ok(PathBuf::from(root));
    }
    default_state_root()
}

pub(crate) fn default_state_root() -> Result<PathBuf> {
    if cfg!(windows) {
        let app_data = std::env::var("LOCALAPPDATA")
            .context("LOCALAPPDATA is not set; cannot resolve Windows state root")?;
        return Ok(PathBuf::from(app_data).join("Repokeeper"));
    }

    let home = std::env::var("HOME").context("HOME is not set; cannot resolve state root")?;
    Ok(PathBuf::from(home).join(".repokeeper"))
}
