//! Services layer - orchestration logic
//!
//! This module coordinates between domain logic and infrastructure.
//! Services use infrastructure adapters to perform I/O operations.

pub mod dispatch_service;
pub mod health_service;

// Re-export commonly used types
pub use dispatch_service::DispatchService;
pub use health_service::HealthService;
