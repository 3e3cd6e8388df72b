use super::*;
use crate::completion::write_completions_script;
use crate::config::resolve_state_root;
use crate::edits::{apply_operator_edits, parse_url_override, UrlOverride};
use crate::render::{
    format_plan_lines, format_report_lines, format_tracker_lines, render_status_line, OutputStyle,
};
use clap::error::ErrorKind;
use repokeeper_core::{RepoStatus, Repository, TrackerError};
use repokeeper_tracker::{ActivationReport, ChangeTracker};

#[test]
fn cli_parses_activate_with_operator_edits() {
    let cli = Cli::try_parse_from([
        "repokeeper",
        "--state-root",
        "/tmp/upgrade",
        "activate",
        "--enable",
        "oss",
        "--disable",
        "debug",
        "--url",
        "update=https://example.com/16.0/update",
    ])
    .expect("must parse activate command");

    assert_eq!(cli.state_root, Some(PathBuf::from("/tmp/upgrade")));
    let Commands::Activate { edits, json } = cli.command else {
        panic!("expected activate command");
    };
    assert!(!json);
    assert_eq!(edits.enable, vec!["oss"]);
    assert_eq!(edits.disable, vec!["debug"]);
    assert_eq!(
        edits.url,
        vec![UrlOverride {
            alias: "update".to_string(),
            url: "https://example.com/16.0/update".to_string(),
        }]
    );
}

#[test]
fn cli_rejects_url_override_without_alias() {
    let err = Cli::try_parse_from(["repokeeper", "plan", "--url", "=https://example.com"])
        .expect_err("must reject url override without alias");
    assert_eq!(err.kind(), ErrorKind::ValueValidation);
}

#[test]
fn cli_counts_verbose_flags() {
    let cli = Cli::try_parse_from(["repokeeper", "-vv", "status"]).expect("must parse status");
    assert_eq!(cli.verbose, 2);
    assert!(matches!(cli.command, Commands::Status));
}

#[test]
fn parse_url_override_splits_on_first_equals() {
    let parsed = parse_url_override("oss=https://example.com/?a=b").expect("must parse override");
    assert_eq!(parsed.alias, "oss");
    assert_eq!(parsed.url, "https://example.com/?a=b");

    let err = parse_url_override("oss").expect_err("must require separator");
    assert!(err.contains("ALIAS=URL"));
}

#[test]
fn operator_edits_toggle_to_requested_status() {
    let mut tracker = tracker_with(&["oss", "debug", "update"]);
    let edits = EditArgs {
        enable: vec!["oss".to_string()],
        disable: vec!["debug".to_string()],
        url: vec![UrlOverride {
            alias: "update".to_string(),
            url: "https://example.com/16.0/update".to_string(),
        }],
    };

    apply_operator_edits(&mut tracker, &edits).expect("must apply edits");

    assert_eq!(status_of(&tracker, "oss"), RepoStatus::Enabled);
    assert_eq!(status_of(&tracker, "debug"), RepoStatus::Disabled);
    assert_eq!(status_of(&tracker, "update"), RepoStatus::Removed);
    let update = tracker.find_repository("update").cloned().expect("tracked");
    assert_eq!(
        tracker.repo_url(&update),
        Some("https://example.com/16.0/update")
    );
}

#[test]
fn operator_edits_are_idempotent_for_repeated_alias() {
    let mut tracker = tracker_with(&["oss"]);
    let edits = EditArgs {
        enable: vec!["oss".to_string(), "oss".to_string()],
        ..EditArgs::default()
    };

    apply_operator_edits(&mut tracker, &edits).expect("must apply edits");
    assert_eq!(status_of(&tracker, "oss"), RepoStatus::Enabled);
}

#[test]
fn operator_edits_reject_unknown_alias() {
    let mut tracker = tracker_with(&["oss"]);
    let edits = EditArgs {
        disable: vec!["ghost".to_string()],
        ..EditArgs::default()
    };

    let err = apply_operator_edits(&mut tracker, &edits).expect_err("must reject unknown alias");
    assert!(matches!(err, TrackerError::AliasNotFound(ref alias) if alias == "ghost"));
    assert!(err.is_not_found());
}

#[test]
fn state_root_prefers_flag_then_environment() {
    let flag = resolve_state_root(
        Some(PathBuf::from("/srv/flag")),
        Some("/srv/env".into()),
    )
    .expect("must resolve flag");
    assert_eq!(flag, PathBuf::from("/srv/flag"));

    let env = resolve_state_root(None, Some("/srv/env".into())).expect("must resolve env");
    assert_eq!(env, PathBuf::from("/srv/env"));
}

#[test]
fn plain_status_line_pads_tag() {
    assert_eq!(
        render_status_line(OutputStyle::Plain, "enable", "oss (#1)"),
        "[enable]   oss (#1)"
    );
}

#[test]
fn plan_lines_list_actions_in_issue_order() {
    let mut tracker = tracker_with(&["oss", "update"]);
    let oss = tracker.find_repository("oss").cloned().expect("tracked");
    tracker.toggle_repo_status(&oss).expect("must toggle");
    tracker
        .change_url(&oss, "https://example.com/16.0/oss")
        .expect("must change url");

    let lines = format_plan_lines(OutputStyle::Plain, &tracker.plan());
    assert_eq!(
        lines,
        vec![
            "[enable]   oss (#1)",
            "[set-url]  oss (#1) -> https://example.com/16.0/oss",
            "[delete]   update (#2)",
        ]
    );
}

#[test]
fn tracker_lines_show_effective_url() {
    let mut tracker = tracker_with(&["oss"]);
    let oss = tracker.find_repository("oss").cloned().expect("tracked");
    tracker
        .change_url(&oss, "https://example.com/16.0/oss")
        .expect("must change url");

    let lines = format_tracker_lines(OutputStyle::Plain, &tracker);
    assert_eq!(lines, vec!["[removed]  oss (#1) https://example.com/16.0/oss"]);
}

#[test]
fn report_lines_warn_about_unresolved_products() {
    let report = ActivationReport {
        deleted: 2,
        enabled: 1,
        products_reselected: vec!["sles".to_string()],
        products_unresolved: vec!["sle-we".to_string()],
        ..ActivationReport::default()
    };

    let lines = format_report_lines(OutputStyle::Plain, &report);
    assert_eq!(
        lines,
        vec![
            "[ok]       deleted 2, enabled 1, disabled 0, url updates 0",
            "[select]   sles",
            "[warn]     product sle-we could not be selected again",
        ]
    );
}

#[test]
fn completions_script_names_binary() {
    let mut output = Vec::new();
    write_completions_script(Shell::Bash, &mut output).expect("must write completions");
    let script = String::from_utf8(output).expect("completion script must be utf-8");
    assert!(script.contains("repokeeper"));
}

fn tracker_with(aliases: &[&str]) -> ChangeTracker {
    let repositories = aliases.iter().enumerate().map(|(index, alias)| Repository {
        id: index as u64 + 1,
        alias: alias.to_string(),
        name: format!("{alias} repository"),
        url: format!("https://example.com/{alias}"),
        raw_url: None,
        enabled: true,
        autorefresh: true,
        service: None,
    });
    ChangeTracker::new(repositories, Vec::new())
}

fn status_of(tracker: &ChangeTracker, alias: &str) -> RepoStatus {
    let repository = tracker.find_repository(alias).expect("alias must be tracked");
    tracker
        .repo_status(repository)
        .expect("tracked repository must have a status")
}
