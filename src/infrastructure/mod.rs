//! Infrastructure layer - external I/O adapters
//!
//! This module contains all code that interacts with external systems:
//! - Docker Compose (process spawning)
//! - HTTP health endpoints of the running services

pub mod compose;
pub mod health;

// Re-export commonly used types
pub use compose::{ComposeClient, ComposeRunner};
pub use health::{HealthProber, ProbeOutcome};
