//! Dispatch service - executes lifecycle plans
//!
//! Runs each step of a [`Plan`] in order and stops at the first failure.
//! There is no rollback: a `restart` whose `up` fails leaves the group down.

use colored::Colorize;
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};
use tracing::{debug, info};

use crate::domain::{Plan, Step};
use crate::error::ComposeError;
use crate::infrastructure::ComposeRunner;

/// Result of one executed step
#[derive(Debug, Clone)]
pub struct StepReport {
    pub description: String,
    pub duration: Duration,
}

/// Executes plans against a compose runner
pub struct DispatchService<R> {
    runner: R,
    project_dir: PathBuf,
}

impl<R: ComposeRunner> DispatchService<R> {
    pub fn new(runner: R, project_dir: impl Into<PathBuf>) -> Self {
        Self {
            runner,
            project_dir: project_dir.into(),
        }
    }

    #[cfg(test)]
    pub fn runner(&self) -> &R {
        &self.runner
    }

    /// Execute every step of the plan, in order
    pub async fn execute(&self, plan: &Plan) -> Result<Vec<StepReport>, ComposeError> {
        info!(
            "{} {} [{}]",
            plan.action.emoji(),
            plan.action.name(),
            plan.selector
        );

        let mut reports = Vec::with_capacity(plan.steps.len());
        for step in &plan.steps {
            let start = Instant::now();
            self.execute_step(step).await?;
            let duration = start.elapsed();
            info!(
                "{} {} ({:.1}s)",
                "✓".green(),
                step,
                duration.as_secs_f64()
            );
            reports.push(StepReport {
                description: step.to_string(),
                duration,
            });
        }
        Ok(reports)
    }

    async fn execute_step(&self, step: &Step) -> Result<(), ComposeError> {
        match step {
            Step::EnsureDirectories(dirs) => ensure_directories(&self.project_dir, dirs),
            Step::Compose(invocation) => {
                debug!(
                    "compose {} on {} file(s)",
                    invocation.subcommand(),
                    invocation.files.len()
                );
                let code = self.runner.run(invocation).await?;
                if code == 0 {
                    Ok(())
                } else {
                    Err(ComposeError::Failed {
                        command: invocation.to_string(),
                        code,
                    })
                }
            }
        }
    }
}

/// Create directories relative to `base`; existing ones are left alone
fn ensure_directories(base: &Path, dirs: &[PathBuf]) -> Result<(), ComposeError> {
    for dir in dirs {
        let path = base.join(dir);
        std::fs::create_dir_all(&path).map_err(|source| ComposeError::Directory {
            path: path.display().to_string(),
            source,
        })?;
    }
    Ok(())
}
