//! Centralized error types for stackctl
//!
//! Uses thiserror for typed errors that can be matched on,
//! while still being compatible with anyhow for propagation.

use thiserror::Error;

/// Service group selector errors
#[derive(Error, Debug, PartialEq, Eq)]
pub enum SelectorError {
    #[error("Invalid selector '{value}'. Expected one of: main, airflow, all")]
    Invalid { value: String },
}

/// External compose tool errors
#[derive(Error, Debug)]
pub enum ComposeError {
    #[error("{tool} not found. Install Docker with the compose plugin or set DOCKER_BIN")]
    ToolNotFound { tool: String },

    #[error("Failed to spawn `{command}`: {source}")]
    SpawnFailed {
        command: String,
        #[source]
        source: std::io::Error,
    },

    #[error("`{command}` exited with status {code}")]
    Failed { command: String, code: i32 },

    #[error("Failed to create directory {path}: {source}")]
    Directory {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

impl ComposeError {
    /// Exit code to hand back to the invoking shell
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::Failed { code, .. } => *code,
            _ => 1,
        }
    }
}

/// Configuration errors
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Required configuration missing: {field}")]
    MissingField { field: String },

    #[error("Invalid configuration value for {field}: {value}")]
    InvalidValue { field: String, value: String },

    #[error("Config file not found: {path}")]
    FileNotFound { path: String },

    #[error("Failed to parse config: {message}")]
    ParseError { message: String },
}
