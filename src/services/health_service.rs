//! Health service - probes the HTTP endpoints of running service groups

use colored::Colorize;

use crate::config::EndpointConfig;
use crate::domain::Selector;
use crate::infrastructure::{HealthProber, ProbeOutcome};

/// Health of one endpoint
#[derive(Debug, Clone)]
pub struct EndpointReport {
    pub name: String,
    pub group: Selector,
    pub url: String,
    pub outcome: ProbeOutcome,
}

impl EndpointReport {
    pub fn line(&self) -> String {
        let mark = if self.outcome.healthy {
            "✅".green()
        } else {
            "❌".red()
        };
        format!(
            "   {} {:<10} {:<8} {:<40} {}",
            mark,
            self.name,
            self.group,
            self.url,
            self.outcome.detail()
        )
    }
}

/// Probes endpoints one after another
pub struct HealthService {
    prober: HealthProber,
}

impl HealthService {
    pub fn new(prober: HealthProber) -> Self {
        Self { prober }
    }

    pub async fn check(&self, endpoints: &[(Selector, &EndpointConfig)]) -> Vec<EndpointReport> {
        let mut reports = Vec::with_capacity(endpoints.len());
        for (group, endpoint) in endpoints {
            let outcome = self.prober.probe(&endpoint.url).await;
            reports.push(EndpointReport {
                name: endpoint.name.clone(),
                group: *group,
                url: endpoint.url.clone(),
                outcome,
            });
        }
        reports
    }
}

/// True when every probed endpoint answered 2xx
pub fn all_healthy(reports: &[EndpointReport]) -> bool {
    reports.iter().all(|r| r.outcome.healthy)
}
