//! Top-level stack configuration.

use serde::{Deserialize, Serialize};

use super::groups::{GroupsConfig, InitConfig};
use super::health::HealthConfig;

/// Stack configuration as read from `stackctl.yaml`
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct StackConfig {
    /// Compose project name (`docker compose -p`); compose derives one from
    /// the directory name when unset
    #[serde(default)]
    pub project_name: Option<String>,

    /// Compose files per service group
    #[serde(default)]
    pub groups: GroupsConfig,

    /// Airflow initialization settings
    #[serde(default)]
    pub init: InitConfig,

    /// HTTP health probes
    #[serde(default)]
    pub health: HealthConfig,
}
