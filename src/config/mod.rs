//! # Stack Configuration System
//!
//! Layered configuration loading: Defaults → File → Environment
//!
//! 1. **Defaults** — compiled in, match the repository's compose layout
//! 2. **File** (`{project_dir}/stackctl.yaml`, or `--config`)
//!    - Compose files per group, Airflow init settings, health endpoints
//! 3. **Environment**
//!    - `STACKCTL_MAIN_COMPOSE` / `STACKCTL_AIRFLOW_COMPOSE`: comma-separated file lists
//!    - `STACKCTL_PROJECT_NAME`: compose project name
//!
//! ## Example Usage
//!
//! ```rust,ignore
//! let config = ResolvedConfig::load(Path::new("."), None)?;
//! let layout = config.layout();
//! ```

mod global;
mod groups;
mod health;

pub use global::StackConfig;
pub use health::EndpointConfig;

use anyhow::{Context, Result};
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::debug;

use crate::domain::{Selector, ServiceGroups, StackLayout};
use crate::error::ConfigError;

/// Default config file name, looked up in the project directory
pub const CONFIG_FILE_NAME: &str = "stackctl.yaml";

/// Fully merged configuration plus where it came from
#[derive(Debug, Clone)]
pub struct ResolvedConfig {
    /// Directory compose runs in; relative paths resolve against it
    pub project_dir: PathBuf,

    /// Config file that was read, if any
    pub source: Option<PathBuf>,

    pub stack: StackConfig,
}

impl ResolvedConfig {
    /// Load configuration for a project directory
    ///
    /// An explicit `config_path` (relative to the current directory) must
    /// exist. The implicit
    /// `{project_dir}/stackctl.yaml` is optional.
    pub fn load(project_dir: &Path, config_path: Option<&Path>) -> Result<Self> {
        Self::load_with_env(project_dir, config_path, |key| std::env::var(key).ok())
    }

    /// Like [`load`](Self::load) with an injectable environment lookup
    pub fn load_with_env<F>(project_dir: &Path, config_path: Option<&Path>, env: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let (source, stack) = match config_path {
            Some(path) => {
                let path = path.to_path_buf();
                if !path.exists() {
                    return Err(ConfigError::FileNotFound {
                        path: path.display().to_string(),
                    }
                    .into());
                }
                let stack = read_config_file(&path)?;
                (Some(path), stack)
            }
            None => {
                let path = project_dir.join(CONFIG_FILE_NAME);
                if path.exists() {
                    let stack = read_config_file(&path)?;
                    (Some(path), stack)
                } else {
                    debug!("No {} in {}, using defaults", CONFIG_FILE_NAME, project_dir.display());
                    (None, StackConfig::default())
                }
            }
        };

        let mut config = Self {
            project_dir: project_dir.to_path_buf(),
            source,
            stack,
        };
        config.apply_env_overrides(env);
        config.validate()?;
        Ok(config)
    }

    fn apply_env_overrides<F>(&mut self, env: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(files) = env("STACKCTL_MAIN_COMPOSE").and_then(|v| split_file_list(&v)) {
            debug!("STACKCTL_MAIN_COMPOSE overrides main group files");
            self.stack.groups.main = files;
        }
        if let Some(files) = env("STACKCTL_AIRFLOW_COMPOSE").and_then(|v| split_file_list(&v)) {
            debug!("STACKCTL_AIRFLOW_COMPOSE overrides airflow group files");
            self.stack.groups.airflow = files;
        }
        if let Some(name) = env("STACKCTL_PROJECT_NAME") {
            let name = name.trim().to_string();
            self.stack.project_name = (!name.is_empty()).then_some(name);
        }
    }

    /// Check invariants the dispatcher relies on
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.stack.groups.main.is_empty() {
            return Err(ConfigError::MissingField {
                field: "groups.main".to_string(),
            });
        }
        if self.stack.groups.airflow.is_empty() {
            return Err(ConfigError::MissingField {
                field: "groups.airflow".to_string(),
            });
        }
        if self.stack.init.service.trim().is_empty() {
            return Err(ConfigError::MissingField {
                field: "init.service".to_string(),
            });
        }
        if let Some(name) = &self.stack.project_name {
            if name.chars().any(char::is_whitespace) {
                return Err(ConfigError::InvalidValue {
                    field: "project_name".to_string(),
                    value: name.clone(),
                });
            }
        }
        for endpoint in &self.stack.health.endpoints {
            if endpoint.url.trim().is_empty() {
                return Err(ConfigError::MissingField {
                    field: format!("health.endpoints[{}].url", endpoint.name),
                });
            }
            endpoint_group(endpoint)?;
        }
        self.health_timeout()?;
        Ok(())
    }

    /// Layout used to plan lifecycle actions
    ///
    /// Compose file paths are kept as written; compose runs inside
    /// `project_dir`, so relative references resolve there.
    pub fn layout(&self) -> StackLayout {
        StackLayout {
            groups: ServiceGroups::new(
                self.stack.groups.main.clone(),
                self.stack.groups.airflow.clone(),
            ),
            project_name: self.stack.project_name.clone(),
            init_directories: self.stack.init.directories.clone(),
            init_service: self.stack.init.service.clone(),
        }
    }

    pub fn health_timeout(&self) -> Result<Duration, ConfigError> {
        humantime::parse_duration(&self.stack.health.timeout).map_err(|_| {
            ConfigError::InvalidValue {
                field: "health.timeout".to_string(),
                value: self.stack.health.timeout.clone(),
            }
        })
    }

    /// Endpoints belonging to the selected groups, in config order
    pub fn health_endpoints(&self, selector: Selector) -> Vec<(Selector, &EndpointConfig)> {
        self.stack
            .health
            .endpoints
            .iter()
            .filter_map(|endpoint| endpoint_group(endpoint).ok().map(|g| (g, endpoint)))
            .filter(|(group, _)| selector.includes(*group))
            .collect()
    }

    /// Effective configuration rendered as YAML
    pub fn to_yaml(&self) -> Result<String> {
        serde_yaml::to_string(&self.stack).context("Failed to serialize configuration")
    }
}

fn read_config_file(path: &Path) -> Result<StackConfig> {
    let content = std::fs::read_to_string(path).with_context(|| {
        format!(
            "Failed to read config file: {}\n  Ensure the file is readable.",
            path.display()
        )
    })?;
    let stack = serde_yaml::from_str(&content).map_err(|e| ConfigError::ParseError {
        message: format!("{}: {}", path.display(), e),
    })?;
    debug!("Loaded configuration from {}", path.display());
    Ok(stack)
}

fn split_file_list(value: &str) -> Option<Vec<PathBuf>> {
    let files: Vec<PathBuf> = value
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(PathBuf::from)
        .collect();
    (!files.is_empty()).then_some(files)
}

/// Health endpoints must belong to a single group, never `all`
fn endpoint_group(endpoint: &EndpointConfig) -> Result<Selector, ConfigError> {
    match endpoint.group.parse::<Selector>() {
        Ok(group @ (Selector::Main | Selector::Airflow)) => Ok(group),
        _ => Err(ConfigError::InvalidValue {
            field: format!("health.endpoints[{}].group", endpoint.name),
            value: endpoint.group.clone(),
        }),
    }
}
