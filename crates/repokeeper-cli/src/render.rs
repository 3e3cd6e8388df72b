use std::io::IsTerminal;

use anstyle::{AnsiColor, Effects, Style};
use repokeeper_core::{RepoStatus, Repository, Service};
use repokeeper_tracker::{ActivationPlan, ActivationReport, ChangeTracker, RepoAction};

#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub(crate) enum OutputStyle {
    Plain,
    Rich,
}

#[derive(Copy, Clone, Debug)]
pub(crate) struct TerminalRenderer {
    style: OutputStyle,
}

impl TerminalRenderer {
    pub(crate) fn current() -> Self {
        Self {
            style: current_output_style(),
        }
    }

    pub(crate) fn style(self) -> OutputStyle {
        self.style
    }

    pub(crate) fn print_section(self, title: &str) {
        if self.style == OutputStyle::Rich {
            println!("{}", colorize(section_style(), &format!("== {title} ==")));
        } else {
            println!("{title}:");
        }
    }

    pub(crate) fn print_lines(self, lines: &[String]) {
        for line in lines {
            println!("{line}");
        }
    }
}

pub(crate) fn current_output_style() -> OutputStyle {
    let no_color = std::env::var_os("NO_COLOR").is_some_and(|value| !value.is_empty());
    if no_color || !std::io::stdout().is_terminal() {
        OutputStyle::Plain
    } else {
        OutputStyle::Rich
    }
}

pub(crate) fn render_status_line(style: OutputStyle, status: &str, message: &str) -> String {
    let tag = format!("[{status}]");
    match style {
        OutputStyle::Plain => format!("{tag:<10} {message}"),
        OutputStyle::Rich => format!(
            "{} {message}",
            colorize(status_style(status), &format!("{tag:<10}"))
        ),
    }
}

pub(crate) fn format_current_lines(
    style: OutputStyle,
    repositories: &[Repository],
    services: &[Service],
) -> Vec<String> {
    let mut lines = Vec::with_capacity(repositories.len() + services.len());
    for repository in repositories {
        let status = if repository.enabled {
            RepoStatus::Enabled
        } else {
            RepoStatus::Disabled
        };
        lines.push(render_status_line(
            style,
            status.as_str(),
            &format!("{} {}", repository.key(), repository.url),
        ));
    }
    for service in services {
        let status = if service.enabled { "service" } else { "disabled" };
        lines.push(render_status_line(
            style,
            status,
            &format!("{} {}", service.alias, service.url),
        ));
    }
    if lines.is_empty() {
        lines.push("No repositories or services configured".to_string());
    }
    lines
}

pub(crate) fn format_tracker_lines(style: OutputStyle, tracker: &ChangeTracker) -> Vec<String> {
    let mut lines = Vec::with_capacity(tracker.len());
    for repository in tracker.repositories() {
        let Some(status) = tracker.repo_status(repository) else {
            continue;
        };
        let url = tracker.repo_url(repository).unwrap_or(repository.url.as_str());
        lines.push(render_status_line(
            style,
            status.as_str(),
            &format!("{} {url}", repository.key()),
        ));
    }
    if lines.is_empty() {
        lines.push("No repositories carried over from the previous installation".to_string());
    }
    lines
}

pub(crate) fn format_plan_lines(style: OutputStyle, plan: &ActivationPlan) -> Vec<String> {
    let mut lines = Vec::with_capacity(plan.repositories.len() + plan.services.len());
    for action in &plan.repositories {
        let line = match action {
            RepoAction::Delete { key } => render_status_line(style, "delete", &key.to_string()),
            RepoAction::Enable { key } => render_status_line(style, "enable", &key.to_string()),
            RepoAction::Disable { key } => render_status_line(style, "disable", &key.to_string()),
            RepoAction::SetUrl { key, url } => {
                render_status_line(style, "set-url", &format!("{key} -> {url}"))
            }
        };
        lines.push(line);
    }
    for alias in &plan.services {
        lines.push(render_status_line(style, "delete", &format!("service {alias}")));
    }
    if lines.is_empty() {
        lines.push("No changes".to_string());
    }
    lines
}

pub(crate) fn format_report_lines(style: OutputStyle, report: &ActivationReport) -> Vec<String> {
    let mut lines = vec![render_status_line(
        style,
        "ok",
        &format!(
            "deleted {}, enabled {}, disabled {}, url updates {}",
            report.deleted, report.enabled, report.disabled, report.url_updates
        ),
    )];
    for alias in &report.services_deleted {
        lines.push(render_status_line(style, "delete", &format!("service {alias}")));
    }
    for product in &report.products_reselected {
        lines.push(render_status_line(style, "select", product));
    }
    for product in &report.products_unresolved {
        lines.push(render_status_line(
            style,
            "warn",
            &format!("product {product} could not be selected again"),
        ));
    }
    lines
}

fn status_style(status: &str) -> Style {
    let color = match status {
        "delete" | "removed" | "warn" => AnsiColor::BrightRed,
        "disable" | "disabled" | "set-url" => AnsiColor::BrightYellow,
        "enable" | "enabled" | "ok" | "select" => AnsiColor::BrightGreen,
        _ => AnsiColor::BrightCyan,
    };
    Style::new()
        .fg_color(Some(color.into()))
        .effects(Effects::BOLD)
}

fn section_style() -> Style {
    Style::new()
        .fg_color(Some(AnsiColor::BrightBlue.into()))
        .effects(Effects::BOLD)
}

fn colorize(style: Style, text: &str) -> String {
    format!("{}{}{}", style.render(), text, style.render_reset())
}
