//! CLI library components for cardiovascular risk scoring.

pub mod logging;
pub mod pipeline;
pub mod types;
