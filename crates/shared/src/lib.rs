//! Wire and domain types shared between the dashboard client and its backend.

pub mod config;
pub mod domain;
pub mod error;
pub mod protocol;
