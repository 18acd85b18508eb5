//! Named operator actions queued to the dashboard runtime.

use std::path::PathBuf;

use shared::domain::{ProjectId, ScenarioId, TestId};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DashboardCommand {
    SelectProject { project: ProjectId },
    SelectScenario { scenario: ScenarioId },
    SetAuthToken { auth_token: String },
    SetInWeb { in_web: bool },
    SubmitJob,
    ReloadActiveJobs,
    ReloadCompletedJobs,
    StopJob { test_id: TestId },
    StopAllJobs,
    CleanupContainers,
    ToggleConfigEditor { editing: bool },
    LoadConfig,
    ReplaceConfigBuffer { text: String },
    ImportConfigBuffer { path: PathBuf },
    ExportConfigBuffer { path: PathBuf },
    SaveConfig,
    ReloadProjects,
    AcknowledgeAlerts,
    Shutdown,
}

impl DashboardCommand {
    pub fn name(&self) -> &'static str {
        match self {
            Self::SelectProject { .. } => "select_project",
            Self::SelectScenario { .. } => "select_scenario",
            Self::SetAuthToken { .. } => "set_auth_token",
            Self::SetInWeb { .. } => "set_in_web",
            Self::SubmitJob => "submit_job",
            Self::ReloadActiveJobs => "reload_active_jobs",
            Self::ReloadCompletedJobs => "reload_completed_jobs",
            Self::StopJob { .. } => "stop_job",
            Self::StopAllJobs => "stop_all_jobs",
            Self::CleanupContainers => "cleanup_containers",
            Self::ToggleConfigEditor { .. } => "toggle_config_editor",
            Self::LoadConfig => "load_config",
            Self::ReplaceConfigBuffer { .. } => "replace_config_buffer",
            Self::ImportConfigBuffer { .. } => "import_config_buffer",
            Self::ExportConfigBuffer { .. } => "export_config_buffer",
            Self::SaveConfig => "save_config",
            Self::ReloadProjects => "reload_projects",
            Self::AcknowledgeAlerts => "acknowledge_alerts",
            Self::Shutdown => "shutdown",
        }
    }
}
