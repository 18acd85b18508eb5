use std::sync::Arc;

use client_core::{ApiError, DashboardApi};

use crate::controller::{
    active_jobs::ActiveJobsView,
    events::{network_error_text, rejection_text, NotifyKind},
    notifications::{AlertChannel, NotificationCenter},
};

/// Bulk commands: stop every job, clean up stale execution containers.
#[derive(Clone)]
pub struct MaintenanceController {
    api: Arc<dyn DashboardApi>,
    notifications: NotificationCenter,
    alerts: AlertChannel,
    active: ActiveJobsView,
}

impl MaintenanceController {
    pub fn new(
        api: Arc<dyn DashboardApi>,
        notifications: NotificationCenter,
        alerts: AlertChannel,
        active: ActiveJobsView,
    ) -> Self {
        Self {
            api,
            notifications,
            alerts,
            active,
        }
    }

    pub async fn stop_all_tests(&self) {
        match self.api.clear_all_tests().await {
            Ok(response) => {
                tracing::info!(
                    active_tests_cleaned = ?response.active_tests_cleaned,
                    containers_cleaned = ?response.containers_cleaned,
                    "all tests cleared"
                );
                self.active.refresh().await;
                self.notifications
                    .notify("All active tests stopped and removed", NotifyKind::Info)
                    .await;
            }
            Err(err) => {
                tracing::warn!(status = ?err.status_code(), "clear-all failed: {err}");
                self.alerts
                    .raise(rejection_text("Error stopping tests", &err))
                    .await;
            }
        }
    }

    pub async fn cleanup_containers(&self) {
        self.notifications
            .notify("Cleaning containers...", NotifyKind::Info)
            .await;

        match self.api.cleanup_containers().await {
            Ok(response) => {
                self.notifications
                    .notify(
                        format!("Containers cleaned: {}", response.containers_cleaned),
                        NotifyKind::Success,
                    )
                    .await;
                self.active.refresh().await;
            }
            Err(err @ ApiError::Status { .. }) => {
                let text = err.backend_text().unwrap_or_default();
                self.notifications
                    .notify(format!("Cleanup error: {text}"), NotifyKind::Error)
                    .await;
            }
            Err(err) => {
                self.notifications
                    .notify(network_error_text(&err), NotifyKind::Error)
                    .await;
            }
        }
    }
}

#[cfg(test)]
#[path = "tests/maintenance_tests.rs"]
mod tests;
