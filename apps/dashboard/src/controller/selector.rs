//! Project and scenario selection driven by the backend configuration.

use std::sync::Arc;

use client_core::DashboardApi;
use shared::{
    config::{scenario_label, DashboardConfig},
    domain::{ProjectId, ScenarioId},
};
use tokio::sync::Mutex;

use crate::controller::events::{EventSink, FailureClass, UiEvent};

pub const PROJECT_PLACEHOLDER: &str = "Select project...";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectOption {
    pub value: String,
    pub label: String,
    /// Placeholder entries are shown as the initial prompt but not offered.
    pub hidden: bool,
}

impl SelectOption {
    fn visible(value: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            label: label.into(),
            hidden: false,
        }
    }
}

#[derive(Default)]
struct SelectorState {
    projects: Vec<SelectOption>,
    scenarios: Vec<SelectOption>,
    project: Option<ProjectId>,
    scenario: Option<ScenarioId>,
}

#[derive(Clone)]
pub struct ProjectScenarioSelector {
    api: Arc<dyn DashboardApi>,
    events: EventSink,
    state: Arc<Mutex<SelectorState>>,
}

impl ProjectScenarioSelector {
    pub fn new(api: Arc<dyn DashboardApi>, events: EventSink) -> Self {
        Self {
            api,
            events,
            state: Arc::new(Mutex::new(SelectorState::default())),
        }
    }

    async fn fetch_config(&self) -> Option<DashboardConfig> {
        let value = match self.api.fetch_config().await {
            Ok(value) => value,
            Err(err) => {
                tracing::warn!(
                    class = FailureClass::of(&err).as_str(),
                    "configuration fetch failed: {err}"
                );
                return None;
            }
        };
        match serde_json::from_value::<DashboardConfig>(value) {
            Ok(config) => Some(config),
            Err(err) => {
                tracing::warn!("configuration has unexpected shape: {err}");
                None
            }
        }
    }

    /// Rebuilds the project options from the configuration and clears the
    /// scenario options. Failures are only logged.
    pub async fn load_projects(&self) {
        let Some(config) = self.fetch_config().await else {
            return;
        };

        let mut projects = vec![SelectOption {
            value: String::new(),
            label: PROJECT_PLACEHOLDER.to_string(),
            hidden: true,
        }];
        projects.extend(
            config
                .projects_configs
                .iter()
                .map(|(id, project)| SelectOption::visible(id.as_str(), project.name.as_str())),
        );

        {
            let mut state = self.state.lock().await;
            state.projects = projects.clone();
            state.scenarios.clear();
            state.project = None;
            state.scenario = None;
        }
        tracing::debug!(count = projects.len() - 1, "project list updated");
        self.events.emit(UiEvent::ProjectsUpdated(projects));
        self.events.emit(UiEvent::ScenariosUpdated(Vec::new()));
    }

    /// Selects `project_id` and repopulates the scenario options from the
    /// current configuration. An unknown project, a project without
    /// scenarios, or a failed fetch leaves the scenario options untouched.
    pub async fn select_project(&self, project_id: ProjectId) {
        self.state.lock().await.project = Some(project_id.clone());

        let Some(config) = self.fetch_config().await else {
            return;
        };
        let Some(project) = config.project(&project_id) else {
            tracing::debug!(%project_id, "selected project is not configured");
            return;
        };
        if project.scenarios.is_empty() {
            return;
        }

        let options: Vec<SelectOption> = project
            .scenarios
            .iter()
            .map(|(id, scenario)| SelectOption::visible(id.as_str(), scenario_label(id, scenario)))
            .collect();

        {
            let mut state = self.state.lock().await;
            // A later selection owns the scenario list now.
            if state.project.as_ref() != Some(&project_id) {
                return;
            }
            state.scenario = options.first().map(|o| ScenarioId::from(o.value.as_str()));
            state.scenarios = options.clone();
        }
        self.events.emit(UiEvent::ScenariosUpdated(options));
    }

    /// Selects a scenario among the offered options. Returns false if it is
    /// not offered.
    pub async fn select_scenario(&self, scenario_id: ScenarioId) -> bool {
        let mut state = self.state.lock().await;
        if !state
            .scenarios
            .iter()
            .any(|option| option.value == scenario_id.as_str())
        {
            tracing::debug!(%scenario_id, "scenario is not offered for the selected project");
            return false;
        }
        state.scenario = Some(scenario_id);
        true
    }

    pub async fn selection(&self) -> (Option<ProjectId>, Option<ScenarioId>) {
        let state = self.state.lock().await;
        (state.project.clone(), state.scenario.clone())
    }

    pub async fn projects(&self) -> Vec<SelectOption> {
        self.state.lock().await.projects.clone()
    }

    pub async fn scenarios(&self) -> Vec<SelectOption> {
        self.state.lock().await.scenarios.clone()
    }
}

#[cfg(test)]
#[path = "tests/selector_tests.rs"]
mod tests;
