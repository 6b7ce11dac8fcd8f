//! Health command: probe HTTP endpoints of the selected service groups

use anyhow::{bail, Result};
use colored::Colorize;

use crate::config::ResolvedConfig;
use crate::domain::Selector;
use crate::infrastructure::HealthProber;
use crate::services::health_service::all_healthy;
use crate::services::HealthService;
use crate::ui;

pub async fn execute(selector: Selector, config: &ResolvedConfig, dry_run: bool) -> Result<()> {
    let endpoints = config.health_endpoints(selector);
    if endpoints.is_empty() {
        ui::print_warning(&format!("No health endpoints configured for {}", selector));
        return Ok(());
    }

    if dry_run {
        ui::print_info(&format!("Dry run: would probe {} endpoint(s)", endpoints.len()));
        for (group, endpoint) in &endpoints {
            println!("   GET {} ({}, {})", endpoint.url, endpoint.name, group);
        }
        return Ok(());
    }

    let service = HealthService::new(HealthProber::new(config.health_timeout()?)?);

    let spinner = ui::spinner(format!("Probing {} endpoint(s)...", endpoints.len()));
    let reports = service.check(&endpoints).await;
    spinner.finish_and_clear();

    println!("{}", format!("Health [{}]", selector).bold());
    for report in &reports {
        println!("{}", report.line());
    }
    println!();

    if all_healthy(&reports) {
        ui::print_success("All endpoints healthy");
        Ok(())
    } else {
        let unhealthy = reports.iter().filter(|r| !r.outcome.healthy).count();
        bail!("{} of {} endpoint(s) unhealthy", unhealthy, reports.len())
    }
}
