//! HTTP health probes
//!
//! Single GET per endpoint, no retries. Anything other than a 2xx answer
//! within the timeout counts as unhealthy. JSON bodies are also checked for
//! components reporting a non-healthy `status` (Airflow reports its
//! scheduler and metadatabase this way).

use anyhow::{Context, Result};
use reqwest::Client;
use serde_json::Value;
use std::time::{Duration, Instant};
use tracing::debug;

/// Outcome of probing one endpoint
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProbeOutcome {
    pub healthy: bool,
    pub status: Option<u16>,
    pub latency_ms: Option<u64>,
    pub error: Option<String>,
    /// Components reported unhealthy in the response body
    pub problems: Vec<String>,
}

impl ProbeOutcome {
    /// Short human-readable detail for the status table
    pub fn detail(&self) -> String {
        if !self.problems.is_empty() {
            return format!("degraded: {}", self.problems.join(", "));
        }
        match (&self.error, self.status, self.latency_ms) {
            (Some(err), _, _) => err.clone(),
            (None, Some(status), Some(ms)) => format!("HTTP {} in {}ms", status, ms),
            (None, Some(status), None) => format!("HTTP {}", status),
            (None, None, _) => "no response".to_string(),
        }
    }
}

/// Probes HTTP endpoints with a shared client
pub struct HealthProber {
    client: Client,
}

impl HealthProber {
    pub fn new(timeout: Duration) -> Result<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .context("Failed to build HTTP client")?;
        Ok(Self { client })
    }

    pub async fn probe(&self, url: &str) -> ProbeOutcome {
        let start = Instant::now();
        match self.client.get(url).send().await {
            Ok(response) => {
                let latency_ms = u64::try_from(start.elapsed().as_millis()).unwrap_or(u64::MAX);
                let status = response.status();
                debug!("{} answered {} in {}ms", url, status, latency_ms);
                // Non-JSON bodies (e.g. Qdrant's plain-text healthz) only count by status code
                let problems = match response.json::<Value>().await {
                    Ok(body) => body_problems(&body),
                    Err(_) => Vec::new(),
                };
                ProbeOutcome {
                    healthy: status.is_success() && problems.is_empty(),
                    status: Some(status.as_u16()),
                    latency_ms: Some(latency_ms),
                    error: None,
                    problems,
                }
            }
            Err(e) => {
                debug!("{} probe failed: {}", url, e);
                let error = if e.is_timeout() {
                    "timed out".to_string()
                } else if e.is_connect() {
                    "connection refused".to_string()
                } else {
                    e.to_string()
                };
                ProbeOutcome {
                    healthy: false,
                    status: None,
                    latency_ms: None,
                    error: Some(error),
                    problems: Vec::new(),
                }
            }
        }
    }
}

/// Names of components whose `status` is not healthy
///
/// Accepts `{"status": "..."}` and `{"component": {"status": "..."}}`.
fn body_problems(body: &Value) -> Vec<String> {
    let is_healthy = |status: &str| matches!(status, "healthy" | "ok" | "green");

    let mut problems = Vec::new();
    if let Some(status) = body.get("status").and_then(Value::as_str) {
        if !is_healthy(status) {
            problems.push(format!("status={}", status));
        }
    }
    if let Some(components) = body.as_object() {
        for (name, component) in components {
            if let Some(status) = component.get("status").and_then(Value::as_str) {
                if !is_healthy(status) {
                    problems.push(format!("{}={}", name, status));
                }
            }
        }
    }
    problems
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpListener;

    /// One-shot HTTP server answering with the given status line and body
    async fn serve_once(status_line: &'static str, body: &'static str) -> String {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            let (mut socket, _) = listener.accept().await.unwrap();
            let mut buf = [0u8; 1024];
            let _ = socket.read(&mut buf).await;
            let response = format!(
                "HTTP/1.1 {}\r\ncontent-length: {}\r\nconnection: close\r\n\r\n{}",
                status_line,
                body.len(),
                body
            );
            socket.write_all(response.as_bytes()).await.unwrap();
        });
        format!("http://{}/health", addr)
    }

    #[tokio::test]
    async fn test_healthy_endpoint() {
        let url = serve_once("200 OK", r#"{"status":"healthy"}"#).await;
        let prober = HealthProber::new(Duration::from_secs(5)).unwrap();
        let outcome = prober.probe(&url).await;
        assert!(outcome.healthy);
        assert_eq!(outcome.status, Some(200));
        assert!(outcome.latency_ms.is_some_and(|ms| ms < 5_000));
        assert!(outcome.detail().starts_with("HTTP 200"));
    }

    #[tokio::test]
    async fn test_error_status_is_unhealthy() {
        let url = serve_once("503 Service Unavailable", "down").await;
        let prober = HealthProber::new(Duration::from_secs(5)).unwrap();
        let outcome = prober.probe(&url).await;
        assert!(!outcome.healthy);
        assert_eq!(outcome.status, Some(503));
    }

    #[tokio::test]
    async fn test_plain_text_body_counts_by_status() {
        let url = serve_once("200 OK", "healthz check passed").await;
        let prober = HealthProber::new(Duration::from_secs(5)).unwrap();
        let outcome = prober.probe(&url).await;
        assert!(outcome.healthy);
        assert!(outcome.problems.is_empty());
    }

    #[tokio::test]
    async fn test_unhealthy_component_in_body() {
        let url = serve_once(
            "200 OK",
            r#"{"metadatabase":{"status":"healthy"},"scheduler":{"status":"unhealthy"}}"#,
        )
        .await;
        let prober = HealthProber::new(Duration::from_secs(5)).unwrap();
        let outcome = prober.probe(&url).await;
        assert!(!outcome.healthy);
        assert_eq!(outcome.problems, vec!["scheduler=unhealthy"]);
        assert_eq!(outcome.detail(), "degraded: scheduler=unhealthy");
    }

    #[test]
    fn test_body_problems_shapes() {
        assert!(body_problems(&serde_json::json!({"status": "ok"})).is_empty());
        assert_eq!(
            body_problems(&serde_json::json!({"status": "starting"})),
            vec!["status=starting"]
        );
        assert!(body_problems(&serde_json::json!([1, 2, 3])).is_empty());
    }

    #[tokio::test]
    async fn test_refused_connection_is_unhealthy() {
        // Bind then drop to get a port nothing listens on
        let port = {
            let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
            listener.local_addr().unwrap().port()
        };
        let prober = HealthProber::new(Duration::from_secs(2)).unwrap();
        let outcome = prober.probe(&format!("http://127.0.0.1:{}/health", port)).await;
        assert!(!outcome.healthy);
        assert!(outcome.status.is_none());
        assert!(outcome.error.is_some());
    }
}
