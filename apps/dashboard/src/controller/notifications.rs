//! Single-slot transient notifications and the blocking alert channel.

use std::{sync::Arc, time::Duration};

use tokio::sync::Mutex;

use crate::controller::events::{EventSink, NotifyKind, UiEvent};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub message: String,
    pub kind: NotifyKind,
    pub generation: u64,
}

#[derive(Default)]
struct Slot {
    current: Option<Notification>,
    generation: u64,
}

/// Shows at most one message at a time; the newest call wins.
///
/// Every message hides itself `ttl` after it was shown, unless a newer
/// message replaced it first. Hide timers are tied to the generation they
/// were armed for and never touch a newer message.
#[derive(Clone)]
pub struct NotificationCenter {
    slot: Arc<Mutex<Slot>>,
    ttl: Duration,
    events: EventSink,
}

impl NotificationCenter {
    pub fn new(ttl: Duration, events: EventSink) -> Self {
        Self {
            slot: Arc::new(Mutex::new(Slot::default())),
            ttl,
            events,
        }
    }

    pub async fn notify(&self, message: impl Into<String>, kind: NotifyKind) -> u64 {
        let notification = {
            let mut slot = self.slot.lock().await;
            slot.generation += 1;
            let notification = Notification {
                message: message.into(),
                kind,
                generation: slot.generation,
            };
            slot.current = Some(notification.clone());
            notification
        };
        let generation = notification.generation;
        tracing::debug!(
            generation,
            kind = kind.as_str(),
            message = %notification.message,
            "notification shown"
        );
        self.events.emit(UiEvent::NotificationShown(notification));

        let center = self.clone();
        tokio::spawn(async move {
            tokio::time::sleep(center.ttl).await;
            center.hide_if_current(generation).await;
        });
        generation
    }

    async fn hide_if_current(&self, generation: u64) {
        let mut slot = self.slot.lock().await;
        if slot.generation != generation {
            return;
        }
        slot.current = None;
        drop(slot);
        self.events.emit(UiEvent::NotificationHidden { generation });
    }

    pub async fn current(&self) -> Option<Notification> {
        self.slot.lock().await.current.clone()
    }
}

/// Intrusive channel for failed destructive actions (stop, stop-all).
///
/// Alerts stay pending until the operator acknowledges them.
#[derive(Clone)]
pub struct AlertChannel {
    pending: Arc<Mutex<Vec<String>>>,
    events: EventSink,
}

impl AlertChannel {
    pub fn new(events: EventSink) -> Self {
        Self {
            pending: Arc::new(Mutex::new(Vec::new())),
            events,
        }
    }

    pub async fn raise(&self, message: impl Into<String>) {
        let message = message.into();
        tracing::warn!(%message, "alert raised");
        self.pending.lock().await.push(message.clone());
        self.events.emit(UiEvent::Alert(message));
    }

    pub async fn pending(&self) -> Vec<String> {
        self.pending.lock().await.clone()
    }

    pub async fn acknowledge(&self) -> usize {
        let mut pending = self.pending.lock().await;
        let count = pending.len();
        pending.clear();
        count
    }
}
