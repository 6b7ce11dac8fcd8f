//! Service group and Airflow init configuration.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Compose files backing each service group, relative to the project directory
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GroupsConfig {
    /// API, PostgreSQL and Qdrant
    #[serde(default = "default_main_files")]
    pub main: Vec<PathBuf>,

    /// Airflow scheduler, webserver and metadata DB
    #[serde(default = "default_airflow_files")]
    pub airflow: Vec<PathBuf>,
}

impl Default for GroupsConfig {
    fn default() -> Self {
        Self {
            main: default_main_files(),
            airflow: default_airflow_files(),
        }
    }
}

/// One-time Airflow initialization
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InitConfig {
    /// Directories mounted into the Airflow containers
    #[serde(default = "default_init_directories")]
    pub directories: Vec<PathBuf>,

    /// Compose service that runs DB migration and admin user creation
    #[serde(default = "default_init_service")]
    pub service: String,
}

impl Default for InitConfig {
    fn default() -> Self {
        Self {
            directories: default_init_directories(),
            service: default_init_service(),
        }
    }
}

fn default_main_files() -> Vec<PathBuf> {
    vec![PathBuf::from("docker-compose.yml")]
}

fn default_airflow_files() -> Vec<PathBuf> {
    vec![PathBuf::from("docker-compose.airflow.yml")]
}

fn default_init_directories() -> Vec<PathBuf> {
    ["airflow/dags", "airflow/logs", "airflow/plugins", "airflow/config"]
        .into_iter()
        .map(PathBuf::from)
        .collect()
}

fn default_init_service() -> String {
    "airflow-init".to_string()
}
