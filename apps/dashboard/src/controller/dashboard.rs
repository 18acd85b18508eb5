//! Wires the components together and maps operator commands onto them.

use std::{path::Path, sync::Arc, time::Duration};

use client_core::DashboardApi;
use tokio::task::JoinHandle;

use crate::{
    backend_bridge::commands::DashboardCommand,
    config::Settings,
    controller::{
        active_jobs::ActiveJobsView,
        completed_jobs::CompletedJobsView,
        config_editor::ConfigEditor,
        events::{EventSink, NotifyKind, UiEvent},
        maintenance::MaintenanceController,
        notifications::{AlertChannel, NotificationCenter},
        selector::ProjectScenarioSelector,
        submission::JobSubmissionController,
    },
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DashboardTimings {
    pub notification_ttl: Duration,
    pub busy_linger: Duration,
    pub initial_load_delay: Duration,
    pub poll_interval: Duration,
}

impl From<&Settings> for DashboardTimings {
    fn from(settings: &Settings) -> Self {
        Self {
            notification_ttl: settings.notification_ttl(),
            busy_linger: settings.busy_indicator_linger(),
            initial_load_delay: settings.initial_load_delay(),
            poll_interval: settings.poll_interval(),
        }
    }
}

#[derive(Clone)]
pub struct Dashboard {
    pub notifications: NotificationCenter,
    pub alerts: AlertChannel,
    pub selector: ProjectScenarioSelector,
    pub config_editor: ConfigEditor,
    pub submission: JobSubmissionController,
    pub active: ActiveJobsView,
    pub completed: CompletedJobsView,
    pub maintenance: MaintenanceController,
    events: EventSink,
    timings: DashboardTimings,
}

impl Dashboard {
    pub fn new(api: Arc<dyn DashboardApi>, timings: DashboardTimings, events: EventSink) -> Self {
        let notifications = NotificationCenter::new(timings.notification_ttl, events.clone());
        let alerts = AlertChannel::new(events.clone());
        let selector = ProjectScenarioSelector::new(Arc::clone(&api), events.clone());
        let active = ActiveJobsView::new(
            Arc::clone(&api),
            notifications.clone(),
            alerts.clone(),
            events.clone(),
            timings.busy_linger,
        );
        let completed = CompletedJobsView::new(
            Arc::clone(&api),
            notifications.clone(),
            events.clone(),
            timings.busy_linger,
        );
        let config_editor = ConfigEditor::new(
            Arc::clone(&api),
            notifications.clone(),
            selector.clone(),
            events.clone(),
        );
        let submission = JobSubmissionController::new(
            Arc::clone(&api),
            notifications.clone(),
            selector.clone(),
            active.clone(),
        );
        let maintenance =
            MaintenanceController::new(api, notifications.clone(), alerts.clone(), active.clone());

        Self {
            notifications,
            alerts,
            selector,
            config_editor,
            submission,
            active,
            completed,
            maintenance,
            events,
            timings,
        }
    }

    /// Page-load sequence: project list now, active list after the initial
    /// delay, then periodic refresh. The returned handle owns the poller.
    pub fn start(&self) -> JoinHandle<()> {
        let selector = self.selector.clone();
        tokio::spawn(async move {
            selector.load_projects().await;
        });
        self.active
            .spawn_poller(self.timings.initial_load_delay, self.timings.poll_interval)
    }

    pub async fn handle(&self, cmd: DashboardCommand) {
        tracing::debug!(command = cmd.name(), "handling command");
        match cmd {
            DashboardCommand::SelectProject { project } => {
                self.selector.select_project(project).await;
            }
            DashboardCommand::SelectScenario { scenario } => {
                if !self.selector.select_scenario(scenario.clone()).await {
                    self.events.emit(UiEvent::Status(format!(
                        "Scenario '{scenario}' is not offered for the selected project"
                    )));
                }
            }
            DashboardCommand::SetAuthToken { auth_token } => {
                self.submission.set_auth_token(auth_token).await;
            }
            DashboardCommand::SetInWeb { in_web } => {
                self.submission.set_in_web(in_web).await;
            }
            DashboardCommand::SubmitJob => self.submission.submit().await,
            DashboardCommand::ReloadActiveJobs => self.active.reload().await,
            DashboardCommand::ReloadCompletedJobs => self.completed.reload().await,
            DashboardCommand::StopJob { test_id } => self.active.stop_test(&test_id).await,
            DashboardCommand::StopAllJobs => self.maintenance.stop_all_tests().await,
            DashboardCommand::CleanupContainers => self.maintenance.cleanup_containers().await,
            DashboardCommand::ToggleConfigEditor { editing } => {
                self.config_editor.set_editing(editing).await;
            }
            DashboardCommand::LoadConfig => self.config_editor.load_current_config().await,
            DashboardCommand::ReplaceConfigBuffer { text } => {
                self.config_editor.set_buffer(text).await;
            }
            DashboardCommand::ImportConfigBuffer { path } => self.import_buffer(&path).await,
            DashboardCommand::ExportConfigBuffer { path } => self.export_buffer(&path).await,
            DashboardCommand::SaveConfig => self.config_editor.save_config().await,
            DashboardCommand::ReloadProjects => self.selector.load_projects().await,
            DashboardCommand::AcknowledgeAlerts => {
                let count = self.alerts.acknowledge().await;
                self.events
                    .emit(UiEvent::Status(format!("{count} alert(s) acknowledged")));
            }
            DashboardCommand::Shutdown => {}
        }
    }

    async fn import_buffer(&self, path: &Path) {
        match tokio::fs::read_to_string(path).await {
            Ok(text) => {
                self.config_editor.set_buffer(text).await;
                self.notifications
                    .notify(
                        format!("Configuration buffer imported from {}", path.display()),
                        NotifyKind::Info,
                    )
                    .await;
            }
            Err(err) => {
                self.notifications
                    .notify(
                        format!("Error: cannot read {}: {err}", path.display()),
                        NotifyKind::Error,
                    )
                    .await;
            }
        }
    }

    async fn export_buffer(&self, path: &Path) {
        let buffer = self.config_editor.buffer().await;
        match tokio::fs::write(path, buffer.as_bytes()).await {
            Ok(()) => {
                self.notifications
                    .notify(
                        format!("Configuration buffer written to {}", path.display()),
                        NotifyKind::Info,
                    )
                    .await;
            }
            Err(err) => {
                self.notifications
                    .notify(
                        format!("Error: cannot write {}: {err}", path.display()),
                        NotifyKind::Error,
                    )
                    .await;
            }
        }
    }
}
