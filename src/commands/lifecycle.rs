//! Lifecycle commands: up, down, restart, logs, status, init
//!
//! Plans the action against the configured service groups, then hands the
//! plan to the dispatcher. With `--dry-run` the plan is only printed.

use anyhow::Result;
use tracing::debug;

use crate::config::ResolvedConfig;
use crate::domain::{Action, Plan, Selector};
use crate::infrastructure::ComposeClient;
use crate::services::DispatchService;
use crate::ui;

pub async fn execute(
    action: Action,
    selector: Selector,
    config: &ResolvedConfig,
    dry_run: bool,
) -> Result<()> {
    let plan = Plan::build(action, selector, &config.layout());
    debug!(
        "Planned {} step(s), {} compose call(s) for {}",
        plan.steps.len(),
        plan.invocations().count(),
        action.name()
    );

    if dry_run {
        print_plan(&plan);
        return Ok(());
    }

    if action == Action::Init {
        ui::print_header("Airflow initialization");
    }

    let client = ComposeClient::locate(&config.project_dir)?;
    let dispatcher = DispatchService::new(client, &config.project_dir);
    let reports = dispatcher.execute(&plan).await?;
    for report in &reports {
        debug!("{} took {:.1}s", report.description, report.duration.as_secs_f64());
    }

    if let Some(message) = completion_message(action, plan.selector) {
        ui::print_success(&message);
    }
    Ok(())
}

fn print_plan(plan: &Plan) {
    ui::print_info(&format!(
        "Dry run: {} [{}] would run {} step(s)",
        plan.action.name(),
        plan.selector,
        plan.steps.len()
    ));
    for step in &plan.steps {
        println!("   {}", step);
    }
}

/// Final line for actions that change container state
fn completion_message(action: Action, selector: Selector) -> Option<String> {
    let target = match selector {
        Selector::Main => "Main services",
        Selector::Airflow => "Airflow services",
        Selector::All => "All services",
    };
    match action {
        Action::Up => Some(format!("{} started", target)),
        Action::Down => Some(format!("{} stopped", target)),
        Action::Restart => Some(format!("{} restarted", target)),
        Action::Init => Some("Airflow initialized".to_string()),
        Action::Logs { .. } | Action::Status => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_completion_messages() {
        assert_eq!(
            completion_message(Action::Up, Selector::Main).as_deref(),
            Some("Main services started")
        );
        assert_eq!(
            completion_message(Action::Restart, Selector::All).as_deref(),
            Some("All services restarted")
        );
        assert!(completion_message(Action::Status, Selector::All).is_none());
        assert!(completion_message(Action::Logs { tail: None }, Selector::Main).is_none());
    }

    #[tokio::test]
    async fn test_dry_run_touches_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let config = ResolvedConfig::load_with_env(dir.path(), None, |_| None).unwrap();

        tokio_test::assert_ok!(execute(Action::Init, Selector::Airflow, &config, true).await);

        assert!(!dir.path().join("airflow").exists());
    }
}
