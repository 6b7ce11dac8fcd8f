//! HTTP health probe configuration.

use serde::{Deserialize, Serialize};

/// Health probe settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthConfig {
    /// Per-request timeout in humantime format (e.g. "5s", "1500ms")
    #[serde(default = "default_timeout")]
    pub timeout: String,

    /// Endpoints to probe
    #[serde(default = "default_endpoints")]
    pub endpoints: Vec<EndpointConfig>,
}

impl Default for HealthConfig {
    fn default() -> Self {
        Self {
            timeout: default_timeout(),
            endpoints: default_endpoints(),
        }
    }
}

/// A single HTTP endpoint that must answer 2xx when its group is up
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct EndpointConfig {
    /// Display name (e.g., "api", "qdrant")
    pub name: String,

    /// Service group the endpoint belongs to: "main" or "airflow"
    pub group: String,

    /// Full URL to GET
    pub url: String,
}

impl EndpointConfig {
    fn new(name: &str, group: &str, url: &str) -> Self {
        Self {
            name: name.to_string(),
            group: group.to_string(),
            url: url.to_string(),
        }
    }
}

fn default_timeout() -> String {
    "5s".to_string()
}

fn default_endpoints() -> Vec<EndpointConfig> {
    vec![
        EndpointConfig::new("api", "main", "http://localhost:8000/health"),
        EndpointConfig::new("qdrant", "main", "http://localhost:6333/healthz"),
        EndpointConfig::new("airflow", "airflow", "http://localhost:8080/health"),
    ]
}
