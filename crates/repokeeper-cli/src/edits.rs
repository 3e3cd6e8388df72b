use clap::Args;
use repokeeper_core::{RepoStatus, Repository, TrackerError};
use repokeeper_tracker::ChangeTracker;

/// Operator overrides applied to a freshly built tracker, addressed by repository alias.
#[derive(Args, Debug, Clone, Default)]
pub(crate) struct EditArgs {
    /// Keep the repository and enable it
    #[arg(long = "enable", value_name = "ALIAS")]
    pub(crate) enable: Vec<String>,
    /// Keep the repository but disable it
    #[arg(long = "disable", value_name = "ALIAS")]
    pub(crate) disable: Vec<String>,
    /// Point the repository at a new url
    #[arg(long = "url", value_name = "ALIAS=URL", value_parser = parse_url_override)]
    pub(crate) url: Vec<UrlOverride>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct UrlOverride {
    pub(crate) alias: String,
    pub(crate) url: String,
}

pub(crate) fn parse_url_override(raw: &str) -> Result<UrlOverride, String> {
    let Some((alias, url)) = raw.split_once('=') else {
        return Err(format!("expected ALIAS=URL, got '{raw}'"));
    };
    let alias = alias.trim();
    let url = url.trim();
    if alias.is_empty() || url.is_empty() {
        return Err(format!("expected ALIAS=URL, got '{raw}'"));
    }

    Ok(UrlOverride {
        alias: alias.to_string(),
        url: url.to_string(),
    })
}

/// Enables first, then disables, then url changes; a later edit of the same alias wins.
pub(crate) fn apply_operator_edits(
    tracker: &mut ChangeTracker,
    edits: &EditArgs,
) -> Result<(), TrackerError> {
    for alias in &edits.enable {
        toggle_until(tracker, alias, RepoStatus::Enabled)?;
    }
    for alias in &edits.disable {
        toggle_until(tracker, alias, RepoStatus::Disabled)?;
    }
    for edit in &edits.url {
        let repository = tracked_repository(tracker, &edit.alias)?;
        tracker.change_url(&repository, edit.url.clone())?;
    }
    Ok(())
}

fn toggle_until(
    tracker: &mut ChangeTracker,
    alias: &str,
    target: RepoStatus,
) -> Result<(), TrackerError> {
    let repository = tracked_repository(tracker, alias)?;
    for _ in RepoStatus::ALL {
        if tracker.repo_status(&repository) == Some(target) {
            break;
        }
        tracker.toggle_repo_status(&repository)?;
    }
    Ok(())
}

fn tracked_repository(tracker: &ChangeTracker, alias: &str) -> Result<Repository, TrackerError> {
    tracker
        .find_repository(alias)
        .cloned()
        .ok_or_else(|| TrackerError::AliasNotFound(alias.to_string()))
}
