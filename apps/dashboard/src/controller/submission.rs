use std::sync::Arc;

use client_core::{ApiError, DashboardApi};
use shared::protocol::{StartOutcome, StartTestRequest};
use tokio::sync::Mutex;

use crate::controller::{
    active_jobs::ActiveJobsView,
    events::{network_error_text, NotifyKind, ValidationError},
    notifications::NotificationCenter,
    selector::ProjectScenarioSelector,
};

/// Form fields that are not part of the project/scenario selection.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct JobForm {
    pub auth_token: String,
    pub in_web: bool,
}

#[derive(Clone)]
pub struct JobSubmissionController {
    api: Arc<dyn DashboardApi>,
    notifications: NotificationCenter,
    selector: ProjectScenarioSelector,
    active: ActiveJobsView,
    form: Arc<Mutex<JobForm>>,
}

impl JobSubmissionController {
    pub fn new(
        api: Arc<dyn DashboardApi>,
        notifications: NotificationCenter,
        selector: ProjectScenarioSelector,
        active: ActiveJobsView,
    ) -> Self {
        Self {
            api,
            notifications,
            selector,
            active,
            form: Arc::new(Mutex::new(JobForm::default())),
        }
    }

    pub async fn set_auth_token(&self, auth_token: String) {
        self.form.lock().await.auth_token = auth_token;
    }

    pub async fn set_in_web(&self, in_web: bool) {
        self.form.lock().await.in_web = in_web;
    }

    pub async fn form(&self) -> JobForm {
        self.form.lock().await.clone()
    }

    async fn build_request(&self) -> Result<StartTestRequest, ValidationError> {
        let (project, scenario) = self.selector.selection().await;
        let (Some(project), Some(scenario)) = (project, scenario) else {
            return Err(ValidationError::MissingSelection);
        };
        let form = self.form().await;
        Ok(StartTestRequest {
            project,
            scenario,
            auth_token: form.auth_token,
            in_web: form.in_web,
        })
    }

    /// Asks the backend to start a run. Whether a new run starts or an
    /// existing one is reported is the backend's decision. The active list is
    /// refreshed afterwards whatever the outcome.
    pub async fn submit(&self) {
        let request = match self.build_request().await {
            Ok(request) => request,
            Err(err) => {
                self.notifications
                    .notify(err.to_string(), NotifyKind::Error)
                    .await;
                return;
            }
        };

        self.notifications
            .notify("Test is being prepared...", NotifyKind::Info)
            .await;
        tracing::info!(
            project = %request.project,
            scenario = %request.scenario,
            in_web = request.in_web,
            "submitting test"
        );

        match self.api.start_test(&request).await {
            Ok(response) => match response.status {
                StartOutcome::Started => {
                    self.notifications
                        .notify(
                            format!("Test started {}!", response.test_id),
                            NotifyKind::Success,
                        )
                        .await;
                }
                StartOutcome::Running => {
                    self.notifications
                        .notify(
                            format!("Test is running {}!", response.test_id),
                            NotifyKind::Success,
                        )
                        .await;
                }
                StartOutcome::Other(status) => {
                    tracing::warn!(%status, test_id = %response.test_id, "unexpected start status");
                    self.notifications
                        .notify(
                            format!("Error: unexpected status {status}!"),
                            NotifyKind::Error,
                        )
                        .await;
                }
            },
            Err(ApiError::Status { status, .. }) => {
                self.notifications
                    .notify(format!("Error: {status}!"), NotifyKind::Error)
                    .await;
            }
            Err(err) => {
                self.notifications
                    .notify(network_error_text(&err), NotifyKind::Error)
                    .await;
            }
        }

        self.active.refresh().await;
    }
}

#[cfg(test)]
#[path = "tests/submission_tests.rs"]
mod tests;
