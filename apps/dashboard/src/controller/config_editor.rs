//! Raw-text editing of the backend configuration document.
//!
//! The buffer is opaque text between load and save: it is sent back exactly
//! as edited, so fields this client does not model survive a round-trip.

use std::sync::Arc;

use client_core::{ApiError, DashboardApi};
use tokio::sync::Mutex;

use crate::controller::{
    events::{network_error_text, EventSink, NotifyKind, UiEvent, ValidationError},
    notifications::NotificationCenter,
    selector::ProjectScenarioSelector,
};

#[derive(Default)]
struct EditorState {
    buffer: String,
    editing: bool,
}

#[derive(Clone)]
pub struct ConfigEditor {
    api: Arc<dyn DashboardApi>,
    notifications: NotificationCenter,
    selector: ProjectScenarioSelector,
    events: EventSink,
    state: Arc<Mutex<EditorState>>,
}

impl ConfigEditor {
    pub fn new(
        api: Arc<dyn DashboardApi>,
        notifications: NotificationCenter,
        selector: ProjectScenarioSelector,
        events: EventSink,
    ) -> Self {
        Self {
            api,
            notifications,
            selector,
            events,
            state: Arc::new(Mutex::new(EditorState::default())),
        }
    }

    /// Replaces the buffer with the current document, pretty-printed.
    /// On failure the buffer is left as it was.
    pub async fn load_current_config(&self) {
        let text = match self.api.fetch_config().await {
            Ok(document) => match serde_json::to_string_pretty(&document) {
                Ok(text) => text,
                Err(err) => {
                    self.notifications
                        .notify(format!("Error: {err}"), NotifyKind::Error)
                        .await;
                    return;
                }
            },
            Err(err) => {
                tracing::warn!("configuration load failed: {err}");
                self.notifications
                    .notify(format!("Error: {err}"), NotifyKind::Error)
                    .await;
                return;
            }
        };

        self.set_buffer(text).await;
        self.notifications
            .notify("Current configuration loaded", NotifyKind::Info)
            .await;
    }

    pub async fn save_config(&self) {
        let raw = self.state.lock().await.buffer.clone();
        if raw.trim().is_empty() {
            self.notifications
                .notify(ValidationError::EmptyConfig.to_string(), NotifyKind::Error)
                .await;
            return;
        }

        match self.api.save_config(&raw).await {
            Ok(_) => {
                tracing::info!(bytes = raw.len(), "configuration saved");
                self.notifications
                    .notify("Configuration saved", NotifyKind::Success)
                    .await;
                self.selector.load_projects().await;
            }
            Err(ApiError::Status { status, body }) => {
                tracing::warn!(status, "configuration rejected by backend");
                self.notifications
                    .notify(format!("Error: {body}"), NotifyKind::Error)
                    .await;
            }
            Err(err) => {
                self.notifications
                    .notify(network_error_text(&err), NotifyKind::Error)
                    .await;
            }
        }
    }

    /// Turning editing on loads the current document; turning it off keeps
    /// the buffer.
    pub async fn set_editing(&self, editing: bool) {
        self.state.lock().await.editing = editing;
        self.events.emit(UiEvent::ConfigEditorToggled(editing));
        if editing {
            self.load_current_config().await;
        }
    }

    pub async fn set_buffer(&self, text: String) {
        let bytes = text.len();
        self.state.lock().await.buffer = text;
        self.events.emit(UiEvent::ConfigBufferChanged { bytes });
    }

    pub async fn buffer(&self) -> String {
        self.state.lock().await.buffer.clone()
    }

    pub async fn is_editing(&self) -> bool {
        self.state.lock().await.editing
    }
}

#[cfg(test)]
#[path = "tests/config_editor_tests.rs"]
mod tests;
