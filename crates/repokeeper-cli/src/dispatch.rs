use std::path::PathBuf;

use anyhow::{Context, Result};
use repokeeper_core::SnapshotProvider;
use repokeeper_store::SourceStore;
use repokeeper_tracker::{create_from_old_repositories, ChangeTracker};
use tracing::info;

use crate::completion::write_completions_script;
use crate::config::{resolve_state_root, STATE_ROOT_ENV};
use crate::edits::{apply_operator_edits, EditArgs};
use crate::render::{
    format_current_lines, format_plan_lines, format_report_lines, format_tracker_lines,
    TerminalRenderer,
};
use crate::{Cli, Commands};

pub(crate) fn run_cli(cli: Cli) -> Result<()> {
    let renderer = TerminalRenderer::current();

    match cli.command {
        Commands::Status => {
            let store = open_store(cli.state_root)?;
            let repositories = store.list_repositories()?;
            let services = store.list_services()?;
            renderer.print_lines(&format_current_lines(
                renderer.style(),
                &repositories,
                &services,
            ));
        }
        Commands::Plan { edits, json } => {
            let store = open_store(cli.state_root)?;
            let tracker = prepare_tracker(&store, &edits)?;
            let plan = tracker.plan();
            if json {
                let content = serde_json::to_string_pretty(&plan)
                    .context("failed serializing activation plan")?;
                println!("{content}");
            } else {
                renderer.print_section("Repositories");
                renderer.print_lines(&format_tracker_lines(renderer.style(), &tracker));
                renderer.print_section("Planned changes");
                renderer.print_lines(&format_plan_lines(renderer.style(), &plan));
            }
        }
        Commands::Activate { edits, json } => {
            let store = open_store(cli.state_root)?;
            let tracker = prepare_tracker(&store, &edits)?;
            let mut manager = store.open_manager()?;
            let report = tracker.activate_changes(&mut manager)?;
            info!(state_root = %store.state_root().display(), "activation finished");
            if json {
                let content = serde_json::to_string_pretty(&report)
                    .context("failed serializing activation report")?;
                println!("{content}");
            } else {
                renderer.print_lines(&format_report_lines(renderer.style(), &report));
            }
        }
        Commands::Completions { shell } => {
            write_completions_script(shell, &mut std::io::stdout())?;
        }
    }

    Ok(())
}

fn open_store(flag: Option<PathBuf>) -> Result<SourceStore> {
    let state_root = resolve_state_root(flag, std::env::var_os(STATE_ROOT_ENV))?;
    Ok(SourceStore::new(state_root))
}

fn prepare_tracker(store: &SourceStore, edits: &EditArgs) -> Result<ChangeTracker> {
    let mut tracker = create_from_old_repositories(store)
        .with_context(|| format!("failed reading setup from {}", store.state_root().display()))?;
    apply_operator_edits(&mut tracker, edits)?;
    Ok(tracker)
}
