//! Controller -> presenter events and failure classification.

use client_core::ApiError;
use crossbeam_channel::{Sender, TrySendError};
use thiserror::Error;

use crate::controller::{
    active_jobs::ActiveJobCard,
    completed_jobs::CompletedJobCard,
    notifications::Notification,
    render_gate::JobsRegion,
    selector::SelectOption,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotifyKind {
    Success,
    Error,
    Info,
}

impl NotifyKind {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Success => "success",
            Self::Error => "error",
            Self::Info => "info",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListRegion {
    Active,
    Completed,
}

#[derive(Debug, Clone, PartialEq)]
pub enum UiEvent {
    NotificationShown(Notification),
    NotificationHidden { generation: u64 },
    Alert(String),
    BusyIndicator { region: ListRegion, visible: bool },
    ActiveJobsRendered(JobsRegion<ActiveJobCard>),
    CompletedJobsRendered(JobsRegion<CompletedJobCard>),
    ProjectsUpdated(Vec<SelectOption>),
    ScenariosUpdated(Vec<SelectOption>),
    ConfigEditorToggled(bool),
    ConfigBufferChanged { bytes: usize },
    Status(String),
}

/// Non-blocking handle the components publish [`UiEvent`]s through.
#[derive(Clone)]
pub struct EventSink {
    tx: Sender<UiEvent>,
}

impl EventSink {
    pub fn new(tx: Sender<UiEvent>) -> Self {
        Self { tx }
    }

    pub fn emit(&self, event: UiEvent) {
        match self.tx.try_send(event) {
            Ok(()) => {}
            Err(TrySendError::Full(event)) => {
                tracing::warn!(?event, "presenter queue is full; dropping ui event");
            }
            Err(TrySendError::Disconnected(_)) => {
                tracing::debug!("presenter gone; ui event dropped");
            }
        }
    }
}

/// Problems caught locally before any request is sent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Configuration cannot be empty")]
    EmptyConfig,
    #[error("Select a project and scenario first")]
    MissingSelection,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureClass {
    Transport,
    Protocol,
    Decode,
}

impl FailureClass {
    pub fn of(err: &ApiError) -> Self {
        match err {
            ApiError::Transport(_) | ApiError::InvalidServerUrl(_) => Self::Transport,
            ApiError::Status { .. } => Self::Protocol,
            ApiError::Decode { .. } => Self::Decode,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Transport => "transport",
            Self::Protocol => "protocol",
            Self::Decode => "decode",
        }
    }
}

pub fn network_error_text(err: &ApiError) -> String {
    format!("Network error: {err}")
}

/// `"<action>: <status> <backend text>"` when the backend rejected the
/// request, the network error text otherwise.
pub fn rejection_text(action: &str, err: &ApiError) -> String {
    match err.status_code() {
        Some(status) => {
            let text = err.backend_text().unwrap_or_default();
            format!("{action}: {status} {text}").trim_end().to_string()
        }
        None => network_error_text(err),
    }
}
