//! CLI library components for `wbs`.

pub mod config;
pub mod logging;
pub mod pipeline;
pub mod types;
