use std::{
    sync::{
        atomic::{AtomicU64, Ordering},
        Arc,
    },
    time::Duration,
};

use tokio::sync::Mutex;

use crate::controller::events::{EventSink, ListRegion, UiEvent};

/// Content of a list view's single render target.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum JobsRegion<T> {
    /// Nothing rendered yet.
    Pending,
    Empty(&'static str),
    Items(Vec<T>),
    Failed(String),
}

impl<T> JobsRegion<T> {
    pub fn from_items(items: Vec<T>, empty_text: &'static str) -> Self {
        if items.is_empty() {
            Self::Empty(empty_text)
        } else {
            Self::Items(items)
        }
    }

    pub fn items(&self) -> &[T] {
        match self {
            Self::Items(items) => items,
            _ => &[],
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchPhase {
    Idle,
    Fetching,
    Rendered,
    Failed,
}

/// Orders overlapping fetches into one render target.
///
/// Each fetch takes a ticket when it starts. Its result may only be rendered
/// if no fetch issued after it has rendered already, so a slow response never
/// overwrites a newer one.
#[derive(Debug, Default)]
pub struct RenderGate {
    issued: AtomicU64,
}

impl RenderGate {
    pub fn issue(&self) -> u64 {
        self.issued.fetch_add(1, Ordering::SeqCst) + 1
    }

    pub fn latest(&self) -> u64 {
        self.issued.load(Ordering::SeqCst)
    }
}

/// Render-side bookkeeping kept next to the region it guards.
#[derive(Debug, Default)]
pub struct RenderedTicket(u64);

impl RenderedTicket {
    /// Claims the region for `ticket`; false if a newer ticket already holds it.
    pub fn claim(&mut self, ticket: u64) -> bool {
        if ticket <= self.0 {
            return false;
        }
        self.0 = ticket;
        true
    }
}

#[derive(Default)]
struct BusyState {
    token: u64,
    visible: bool,
}

/// Busy indicator of one list region.
///
/// A reload shows it and hides it `linger` after finishing. A later reload
/// takes the indicator over, so an earlier linger never hides it.
#[derive(Clone)]
pub struct BusyIndicator {
    region: ListRegion,
    events: EventSink,
    linger: Duration,
    state: Arc<Mutex<BusyState>>,
}

impl BusyIndicator {
    pub fn new(region: ListRegion, events: EventSink, linger: Duration) -> Self {
        Self {
            region,
            events,
            linger,
            state: Arc::new(Mutex::new(BusyState::default())),
        }
    }

    pub async fn show(&self) -> u64 {
        let token = {
            let mut state = self.state.lock().await;
            state.token += 1;
            state.visible = true;
            state.token
        };
        self.emit(true);
        token
    }

    pub fn hide_after_linger(&self, token: u64) {
        let indicator = self.clone();
        tokio::spawn(async move {
            tokio::time::sleep(indicator.linger).await;
            indicator.hide(token).await;
        });
    }

    async fn hide(&self, token: u64) {
        let mut state = self.state.lock().await;
        if state.token != token {
            return;
        }
        state.visible = false;
        drop(state);
        self.emit(false);
    }

    pub async fn is_visible(&self) -> bool {
        self.state.lock().await.visible
    }

    fn emit(&self, visible: bool) {
        self.events.emit(UiEvent::BusyIndicator {
            region: self.region,
            visible,
        });
    }
}
