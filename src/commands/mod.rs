//! Command entry points
//!
//! Each command wires configuration, domain planning and services together
//! and is called directly from `main`.

pub mod health;
pub mod lifecycle;
pub mod show_config;
