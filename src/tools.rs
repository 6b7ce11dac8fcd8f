//! Runtime tool path resolution
//!
//! For each external tool (e.g., `docker`), we:
//! 1. Check for an environment variable `{TOOL}_BIN` (e.g., `DOCKER_BIN`)
//! 2. Fall back to PATH-based invocation if the envvar is not set
//!
//! `locate` additionally verifies that the resolved tool can actually be
//! executed, so a missing Docker install fails before any side effect.
//!
//! ```rust,ignore
//! use crate::tools::{get_tool_path, tools};
//!
//! // Reads DOCKER_BIN, falls back to "docker"
//! let docker = get_tool_path(tools::DOCKER);
//! ```

use std::env;
use std::path::PathBuf;

use crate::error::ComposeError;

/// Get the path to an external tool
///
/// Checks for an environment variable `{TOOL}_BIN` (uppercase tool name + "_BIN").
/// Falls back to the tool name itself if the envvar is not set, which relies on PATH.
pub fn get_tool_path(tool: &str) -> String {
    let env_var = format!("{}_BIN", tool.to_uppercase());
    env::var(&env_var).unwrap_or_else(|_| tool.to_string())
}

/// Resolve a tool to an executable path, or fail with `ToolNotFound`
pub fn locate(tool: &str) -> Result<PathBuf, ComposeError> {
    let path = get_tool_path(tool);
    which::which(&path).map_err(|_| ComposeError::ToolNotFound {
        tool: tool.to_string(),
    })
}

/// Common tool names
pub mod tools {
    pub const DOCKER: &str = "docker";
}
