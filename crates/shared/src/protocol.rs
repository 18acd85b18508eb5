use serde::{Deserialize, Serialize};

use crate::domain::{ProjectId, ScenarioId, TestId};

pub mod routes {
    use crate::domain::TestId;

    pub const CONFIG: &str = "/api/config";
    pub const ACTIVE_TESTS: &str = "/api/tests/active";
    pub const COMPLETED_TESTS: &str = "/api/tests/completed";
    pub const START_TEST: &str = "/api/tests/start";
    pub const CLEAR_ALL_TESTS: &str = "/api/tests/clear-all";
    pub const DOCKER_CLEAR_ALL: &str = "/api/debug/docker/clear-all";

    pub fn stop_test(test_id: &TestId) -> String {
        format!("/api/tests/stop/{test_id}")
    }

    pub fn report(test_id: &TestId) -> String {
        format!("/api/results/{test_id}/report")
    }

    pub fn download_zip(test_id: &TestId) -> String {
        format!("/api/results/{test_id}/download-zip")
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StartTestRequest {
    pub project: ProjectId,
    pub scenario: ScenarioId,
    pub auth_token: String,
    pub in_web: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum StartOutcome {
    Started,
    Running,
    Other(String),
}

impl From<String> for StartOutcome {
    fn from(value: String) -> Self {
        match value.as_str() {
            "started" => Self::Started,
            "running" => Self::Running,
            _ => Self::Other(value),
        }
    }
}

impl From<StartOutcome> for String {
    fn from(value: StartOutcome) -> Self {
        match value {
            StartOutcome::Started => "started".to_string(),
            StartOutcome::Running => "running".to_string(),
            StartOutcome::Other(raw) => raw,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StartTestResponse {
    pub status: StartOutcome,
    pub test_id: TestId,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub web_url: Option<String>,
}

/// Body of `POST /api/tests/stop/{id}`. The backend answers failures with a
/// success status code and `status = "err"`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StopTestResponse {
    #[serde(default)]
    pub test_id: String,
    #[serde(default)]
    pub status: String,
    #[serde(default)]
    pub message: String,
}

impl StopTestResponse {
    pub fn is_failure(&self) -> bool {
        self.status == "err"
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClearAllResponse {
    #[serde(default)]
    pub active_tests_cleaned: Option<u64>,
    #[serde(default)]
    pub containers_cleaned: Option<u64>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContainerCleanupResponse {
    pub containers_cleaned: u64,
}
