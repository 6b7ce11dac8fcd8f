//! Domain layer - pure business logic
//!
//! This module contains business logic with no external I/O.
//! Types and functions here can be unit tested without mocking.

pub mod action;
pub mod selector;

// Re-export commonly used types
pub use action::{Action, ComposeInvocation, Plan, StackLayout, Step};
pub use selector::{Selector, ServiceGroups};
