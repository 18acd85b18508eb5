//! Command queue from the operator console to the dashboard runtime.

pub mod commands;
pub mod runtime;
