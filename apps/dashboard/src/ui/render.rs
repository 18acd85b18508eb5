use std::fmt::Write as _;

use crate::controller::{
    active_jobs::{ActiveJobCard, JobActions},
    completed_jobs::CompletedJobCard,
    events::{ListRegion, UiEvent},
    render_gate::JobsRegion,
    selector::SelectOption,
};

pub fn render_event(event: &UiEvent) -> Option<String> {
    match event {
        UiEvent::NotificationShown(notification) => Some(format!(
            "[{}] {}",
            notification.kind.as_str(),
            notification.message
        )),
        UiEvent::NotificationHidden { .. } => None,
        UiEvent::Alert(message) => Some(format!(
            "!!!!!!!!!!!!!!!!!!!!!!!!!!!!!!!!!!!!!!!!\n!! ALERT: {message}\n!! type 'ack' to dismiss\n!!!!!!!!!!!!!!!!!!!!!!!!!!!!!!!!!!!!!!!!"
        )),
        UiEvent::BusyIndicator { region, visible } => {
            let name = match region {
                ListRegion::Active => "active tests",
                ListRegion::Completed => "completed tests",
            };
            visible.then(|| format!("... refreshing {name}"))
        }
        UiEvent::ActiveJobsRendered(region) => Some(render_active(region)),
        UiEvent::CompletedJobsRendered(region) => Some(render_completed(region)),
        UiEvent::ProjectsUpdated(options) => Some(render_options("Projects", options)),
        UiEvent::ScenariosUpdated(options) => Some(render_options("Scenarios", options)),
        UiEvent::ConfigEditorToggled(editing) => Some(format!(
            "Configuration editor {}",
            if *editing { "expanded" } else { "collapsed" }
        )),
        UiEvent::ConfigBufferChanged { bytes } => {
            Some(format!("Configuration buffer: {bytes} bytes"))
        }
        UiEvent::Status(status) => Some(status.clone()),
    }
}

fn render_region<T>(
    title: &str,
    region: &JobsRegion<T>,
    card: impl Fn(&mut String, &T),
) -> String {
    let mut out = format!("== {title} ==\n");
    match region {
        JobsRegion::Pending => out.push_str("Loading...\n"),
        JobsRegion::Empty(text) => {
            out.push_str(text);
            out.push('\n');
        }
        JobsRegion::Failed(text) => {
            out.push_str(text);
            out.push('\n');
        }
        JobsRegion::Items(items) => {
            for item in items {
                card(&mut out, item);
            }
        }
    }
    out
}

pub fn render_active(region: &JobsRegion<ActiveJobCard>) -> String {
    render_region("Active tests", region, |out, job| {
        let marker = if job.can_stop() { "*" } else { " " };
        let _ = writeln!(out, "{marker} {}, {}", job.project, job.scenario);
        let _ = writeln!(out, "    ID: {}", job.test_id);
        let _ = writeln!(out, "    In web: {}", if job.in_web { "Yes" } else { "No" });
        let _ = writeln!(out, "    Status: {}", job.status);
        let _ = writeln!(out, "    Started: {}", job.started);
        match &job.actions {
            JobActions::Stop { live } => {
                let _ = writeln!(out, "    [stop {}]", job.test_id);
                if let Some(live) = live {
                    let _ = writeln!(out, "    Open panel: {}", live.panel_url);
                    let _ = writeln!(out, "    Open report: {}", live.report_url);
                }
            }
            JobActions::Results(links) => {
                let _ = writeln!(out, "    Open report: {}", links.report_url);
                let _ = writeln!(out, "    Download results archive: {}", links.archive_url);
            }
        }
    })
}

pub fn render_completed(region: &JobsRegion<CompletedJobCard>) -> String {
    render_region("Completed tests", region, |out, job| {
        let _ = writeln!(out, "  {}", job.test_id);
        let _ = writeln!(out, "    Open report: {}", job.links.report_url);
        let _ = writeln!(out, "    Download results archive: {}", job.links.archive_url);
    })
}

fn render_options(title: &str, options: &[SelectOption]) -> String {
    let mut out = format!("{title}:");
    let visible: Vec<_> = options.iter().filter(|o| !o.hidden).collect();
    if visible.is_empty() {
        out.push_str(" (none)");
    }
    for option in visible {
        let _ = write!(out, "\n  {} - {}", option.value, option.label);
    }
    out
}
