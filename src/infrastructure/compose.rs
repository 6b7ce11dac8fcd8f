//! Docker Compose execution
//!
//! The only place that spawns `docker compose`. Output is inherited so the
//! user sees compose's own progress, and the exit code is handed back
//! untouched.

use std::path::PathBuf;
use std::process::Stdio;
use tokio::process::Command;
use tracing::{debug, info};

use crate::domain::ComposeInvocation;
use crate::error::ComposeError;
use crate::tools::{locate, tools};

/// Runs compose invocations and reports their exit codes
#[allow(async_fn_in_trait)]
pub trait ComposeRunner {
    /// Run one invocation to completion, returning the process exit code
    async fn run(&self, invocation: &ComposeInvocation) -> Result<i32, ComposeError>;
}

/// Client for the real `docker compose` CLI
pub struct ComposeClient {
    docker: PathBuf,
    project_dir: PathBuf,
}

impl ComposeClient {
    /// Resolve the docker binary (`DOCKER_BIN` or PATH) for a project directory
    pub fn locate(project_dir: impl Into<PathBuf>) -> Result<Self, ComposeError> {
        let docker = locate(tools::DOCKER)?;
        debug!("Using docker at {}", docker.display());
        Ok(Self::with_binary(docker, project_dir))
    }

    pub fn with_binary(docker: impl Into<PathBuf>, project_dir: impl Into<PathBuf>) -> Self {
        Self {
            docker: docker.into(),
            project_dir: project_dir.into(),
        }
    }
}

impl ComposeRunner for ComposeClient {
    async fn run(&self, invocation: &ComposeInvocation) -> Result<i32, ComposeError> {
        let argv = invocation.argv();
        info!("▶ {}", invocation);
        debug!("argv: {:?} (cwd {})", argv, self.project_dir.display());

        let mut child = Command::new(&self.docker)
            .args(&argv)
            .current_dir(&self.project_dir)
            .stdin(Stdio::inherit())
            .stdout(Stdio::inherit())
            .stderr(Stdio::inherit())
            .spawn()
            .map_err(|source| ComposeError::SpawnFailed {
                command: invocation.to_string(),
                source,
            })?;

        // Ctrl-C reaches compose through the terminal's process group;
        // wait for it to shut down instead of dying first.
        let status = tokio::select! {
            status = child.wait() => status,
            _ = tokio::signal::ctrl_c() => {
                debug!("Interrupt received, waiting for compose to exit");
                child.wait().await
            }
        }
        .map_err(|source| ComposeError::SpawnFailed {
            command: invocation.to_string(),
            source,
        })?;

        Ok(status.code().unwrap_or(1))
    }
}
