//! Controller layer: the dashboard components, their events, and command
//! orchestration.

pub mod active_jobs;
pub mod completed_jobs;
pub mod config_editor;
pub mod dashboard;
pub mod events;
pub mod maintenance;
pub mod notifications;
pub mod orchestration;
pub mod render_gate;
pub mod selector;
pub mod submission;

#[cfg(test)]
#[path = "tests/fake_api.rs"]
pub(crate) mod fake_api;
