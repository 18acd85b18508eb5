//! Terminal presentation: command parsing, event rendering, value formatting.

pub mod format;
pub mod input;
pub mod render;
