//! Typed read-only view of the backend configuration document.
//!
//! Only the fields the dashboard needs to populate its selectors are modelled.
//! The document itself is never rebuilt from these types; edits travel as raw
//! text so unknown fields survive a save.

use indexmap::IndexMap;
use serde::Deserialize;

use crate::domain::{ProjectId, ScenarioId};

/// Scenario id whose load profile lives in the raw document (stages) instead
/// of a fixed users/run_time pair.
pub const CUSTOM_SCENARIO_ID: &str = "custom";

const DEFAULT_SCENARIO_USERS: u64 = 1;
const DEFAULT_SCENARIO_RUN_TIME: &str = "10s";

#[derive(Debug, Clone, Default, Deserialize)]
pub struct DashboardConfig {
    #[serde(default)]
    pub projects_configs: IndexMap<ProjectId, ProjectConfig>,
}

impl DashboardConfig {
    pub fn project(&self, project_id: &ProjectId) -> Option<&ProjectConfig> {
        self.projects_configs.get(project_id)
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct ProjectConfig {
    pub name: String,
    #[serde(default)]
    pub scenarios: IndexMap<ScenarioId, ScenarioConfig>,
}

/// Fixed-profile fields of a scenario. A `custom` scenario carries stages
/// instead, so both fields are optional here.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ScenarioConfig {
    pub users: Option<u64>,
    pub run_time: Option<String>,
}

impl ScenarioConfig {
    pub fn users_or_default(&self) -> u64 {
        self.users.unwrap_or(DEFAULT_SCENARIO_USERS)
    }

    pub fn run_time_or_default(&self) -> &str {
        self.run_time.as_deref().unwrap_or(DEFAULT_SCENARIO_RUN_TIME)
    }
}

/// Display label of a scenario option.
pub fn scenario_label(scenario_id: &ScenarioId, scenario: &ScenarioConfig) -> String {
    if scenario_id.as_str() == CUSTOM_SCENARIO_ID {
        return format!("{CUSTOM_SCENARIO_ID} (stages in config.json)");
    }
    format!(
        "{scenario_id} ({} users, {})",
        scenario.users_or_default(),
        scenario.run_time_or_default()
    )
}
