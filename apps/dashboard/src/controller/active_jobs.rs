//! Active job list: timer-driven and manual refresh, per-job stop.

use std::{sync::Arc, time::Duration};

use client_core::DashboardApi;
use shared::{
    domain::{Job, JobStatus, TestId},
    protocol::routes,
};
use tokio::{
    sync::Mutex,
    task::JoinHandle,
    time::{Instant, MissedTickBehavior},
};

use crate::{
    controller::{
        events::{rejection_text, EventSink, FailureClass, ListRegion, NotifyKind, UiEvent},
        notifications::{AlertChannel, NotificationCenter},
        render_gate::{BusyIndicator, FetchPhase, JobsRegion, RenderGate, RenderedTicket},
    },
    ui::format::format_start_time,
};

pub const EMPTY_ACTIVE_TEXT: &str = "No active tests";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResultLinks {
    pub report_url: String,
    pub archive_url: String,
}

impl ResultLinks {
    pub fn for_test(api: &dyn DashboardApi, test_id: &TestId) -> Self {
        Self {
            report_url: api.resolve(&routes::report(test_id)),
            archive_url: api.resolve(&routes::download_zip(test_id)),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LiveLinks {
    pub panel_url: String,
    pub report_url: String,
}

/// Per-job controls. A job either can be stopped or has stored results,
/// never both.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum JobActions {
    Stop { live: Option<LiveLinks> },
    Results(ResultLinks),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActiveJobCard {
    pub test_id: TestId,
    pub project: String,
    pub scenario: String,
    pub status: JobStatus,
    pub in_web: bool,
    pub started: String,
    pub actions: JobActions,
}

impl ActiveJobCard {
    pub fn from_job(api: &dyn DashboardApi, job: &Job) -> Self {
        let actions = if job.status.is_active() {
            JobActions::Stop {
                live: job.live_panel_url().map(|panel| LiveLinks {
                    panel_url: panel.to_string(),
                    report_url: format!("{panel}/stats/report"),
                }),
            }
        } else {
            JobActions::Results(ResultLinks::for_test(api, &job.test_id))
        };

        Self {
            test_id: job.test_id.clone(),
            project: job.project.clone(),
            scenario: job.scenario.clone(),
            status: job.status.clone(),
            in_web: job.in_web,
            started: format_start_time(&job.start_time),
            actions,
        }
    }

    pub fn can_stop(&self) -> bool {
        matches!(self.actions, JobActions::Stop { .. })
    }
}

struct ActiveJobsState {
    region: JobsRegion<ActiveJobCard>,
    phase: FetchPhase,
    rendered: RenderedTicket,
}

#[derive(Clone)]
pub struct ActiveJobsView {
    api: Arc<dyn DashboardApi>,
    notifications: NotificationCenter,
    alerts: AlertChannel,
    events: EventSink,
    gate: Arc<RenderGate>,
    state: Arc<Mutex<ActiveJobsState>>,
    busy: BusyIndicator,
}

impl ActiveJobsView {
    pub fn new(
        api: Arc<dyn DashboardApi>,
        notifications: NotificationCenter,
        alerts: AlertChannel,
        events: EventSink,
        busy_linger: Duration,
    ) -> Self {
        Self {
            api,
            notifications,
            alerts,
            busy: BusyIndicator::new(ListRegion::Active, events.clone(), busy_linger),
            events,
            gate: Arc::new(RenderGate::default()),
            state: Arc::new(Mutex::new(ActiveJobsState {
                region: JobsRegion::Pending,
                phase: FetchPhase::Idle,
                rendered: RenderedTicket::default(),
            })),
        }
    }

    /// Fetches the active list and renders it. Returns false when the result
    /// was dropped because a later fetch already rendered.
    pub async fn refresh(&self) -> bool {
        let ticket = self.gate.issue();
        self.state.lock().await.phase = FetchPhase::Fetching;
        tracing::debug!(ticket, "fetching active tests");

        let fetched = self.api.active_tests().await;

        let (region, phase) = match fetched {
            Ok(jobs) => {
                let cards = jobs
                    .iter()
                    .map(|job| ActiveJobCard::from_job(self.api.as_ref(), job))
                    .collect();
                (
                    JobsRegion::from_items(cards, EMPTY_ACTIVE_TEXT),
                    FetchPhase::Rendered,
                )
            }
            Err(err) => {
                tracing::warn!(
                    ticket,
                    class = FailureClass::of(&err).as_str(),
                    "active tests load failed: {err}"
                );
                (
                    JobsRegion::Failed(format!("Loading error: {err}")),
                    FetchPhase::Failed,
                )
            }
        };

        let mut state = self.state.lock().await;
        if !state.rendered.claim(ticket) {
            tracing::debug!(
                ticket,
                latest = self.gate.latest(),
                "discarding stale active tests result"
            );
            return false;
        }
        state.region = region.clone();
        state.phase = phase;
        drop(state);

        self.events.emit(UiEvent::ActiveJobsRendered(region));
        true
    }

    /// Manual reload: busy indicator around the refresh, then an info toast.
    pub async fn reload(&self) {
        let token = self.busy.show().await;
        self.refresh().await;
        self.notifications
            .notify("Active tests loaded", NotifyKind::Info)
            .await;
        self.busy.hide_after_linger(token);
    }

    pub async fn stop_test(&self, test_id: &TestId) {
        tracing::info!(%test_id, "stopping test");
        match self.api.stop_test(test_id).await {
            Ok(response) if response.is_failure() => {
                let detail = if response.message.is_empty() {
                    "Error stopping test".to_string()
                } else {
                    format!("Error stopping test: {}", response.message)
                };
                self.alerts.raise(detail).await;
            }
            Ok(_) => {
                self.refresh().await;
                self.notifications
                    .notify(format!("Test {test_id} stopped"), NotifyKind::Success)
                    .await;
            }
            Err(err) => {
                tracing::warn!(%test_id, status = ?err.status_code(), "stop failed: {err}");
                self.alerts
                    .raise(rejection_text("Error stopping test", &err))
                    .await;
            }
        }
    }

    /// First load after `initial_delay`, then a refresh every `period`
    /// counted from now, for as long as the returned task lives.
    pub fn spawn_poller(&self, initial_delay: Duration, period: Duration) -> JoinHandle<()> {
        let view = self.clone();
        tokio::spawn(async move {
            let first = view.clone();
            tokio::spawn(async move {
                tokio::time::sleep(initial_delay).await;
                first.refresh().await;
            });

            let mut ticker = tokio::time::interval_at(Instant::now() + period, period);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
            loop {
                ticker.tick().await;
                let tick = view.clone();
                tokio::spawn(async move {
                    tick.refresh().await;
                });
            }
        })
    }

    pub async fn region(&self) -> JobsRegion<ActiveJobCard> {
        self.state.lock().await.region.clone()
    }

    pub async fn phase(&self) -> FetchPhase {
        self.state.lock().await.phase
    }

    pub async fn is_busy(&self) -> bool {
        self.busy.is_visible().await
    }
}

#[cfg(test)]
#[path = "tests/active_jobs_tests.rs"]
mod tests;
