use std::{sync::Arc, time::Duration};

use client_core::DashboardApi;
use shared::domain::TestId;
use tokio::sync::Mutex;

use crate::controller::{
    active_jobs::ResultLinks,
    events::{EventSink, FailureClass, ListRegion, NotifyKind, UiEvent},
    notifications::NotificationCenter,
    render_gate::{BusyIndicator, JobsRegion, RenderGate, RenderedTicket},
};

pub const EMPTY_COMPLETED_TEXT: &str = "Tests not found";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompletedJobCard {
    pub test_id: TestId,
    pub links: ResultLinks,
}

struct CompletedJobsState {
    region: JobsRegion<CompletedJobCard>,
    rendered: RenderedTicket,
}

/// Archived runs; refreshed only when the operator asks.
#[derive(Clone)]
pub struct CompletedJobsView {
    api: Arc<dyn DashboardApi>,
    notifications: NotificationCenter,
    events: EventSink,
    gate: Arc<RenderGate>,
    state: Arc<Mutex<CompletedJobsState>>,
    busy: BusyIndicator,
}

impl CompletedJobsView {
    pub fn new(
        api: Arc<dyn DashboardApi>,
        notifications: NotificationCenter,
        events: EventSink,
        busy_linger: Duration,
    ) -> Self {
        Self {
            api,
            notifications,
            busy: BusyIndicator::new(ListRegion::Completed, events.clone(), busy_linger),
            events,
            gate: Arc::new(RenderGate::default()),
            state: Arc::new(Mutex::new(CompletedJobsState {
                region: JobsRegion::Pending,
                rendered: RenderedTicket::default(),
            })),
        }
    }

    pub async fn load(&self) -> bool {
        let ticket = self.gate.issue();
        let region = match self.api.completed_tests().await {
            Ok(ids) => {
                let cards = ids
                    .into_iter()
                    .map(|test_id| CompletedJobCard {
                        links: ResultLinks::for_test(self.api.as_ref(), &test_id),
                        test_id,
                    })
                    .collect();
                JobsRegion::from_items(cards, EMPTY_COMPLETED_TEXT)
            }
            Err(err) => {
                tracing::warn!(
                    ticket,
                    class = FailureClass::of(&err).as_str(),
                    "completed tests load failed: {err}"
                );
                JobsRegion::Failed(format!("Loading error: {err}"))
            }
        };

        let mut state = self.state.lock().await;
        if !state.rendered.claim(ticket) {
            tracing::debug!(ticket, "discarding stale completed tests result");
            return false;
        }
        state.region = region.clone();
        drop(state);

        self.events.emit(UiEvent::CompletedJobsRendered(region));
        true
    }

    pub async fn reload(&self) {
        let token = self.busy.show().await;
        self.load().await;
        self.notifications
            .notify("All tests loaded", NotifyKind::Info)
            .await;
        self.busy.hide_after_linger(token);
    }

    pub async fn region(&self) -> JobsRegion<CompletedJobCard> {
        self.state.lock().await.region.clone()
    }

    pub async fn is_busy(&self) -> bool {
        self.busy.is_visible().await
    }
}

#[cfg(test)]
#[path = "tests/completed_jobs_tests.rs"]
mod tests;
