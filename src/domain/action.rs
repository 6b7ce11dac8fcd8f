//! Lifecycle actions and their execution plans
//!
//! An action is turned into a [`Plan`] (ordered steps) without touching the
//! filesystem or spawning anything. The dispatcher executes plans.

use std::fmt;
use std::path::PathBuf;

use super::selector::{Selector, ServiceGroups};

/// Lifecycle action requested on the command line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Up,
    Down,
    Restart,
    Logs { tail: Option<u32> },
    Status,
    Init,
}

impl Action {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Up => "up",
            Self::Down => "down",
            Self::Restart => "restart",
            Self::Logs { .. } => "logs",
            Self::Status => "status",
            Self::Init => "init",
        }
    }

    pub fn emoji(&self) -> &'static str {
        match self {
            Self::Up => "🚀",
            Self::Down => "🛑",
            Self::Restart => "🔄",
            Self::Logs { .. } => "📜",
            Self::Status => "📊",
            Self::Init => "🧰",
        }
    }
}

/// Static description of the stack needed to plan actions
#[derive(Debug, Clone)]
pub struct StackLayout {
    pub groups: ServiceGroups,
    /// Forwarded as `docker compose -p <name>` when set
    pub project_name: Option<String>,
    /// Directories that must exist before Airflow initialization
    pub init_directories: Vec<PathBuf>,
    /// One-shot compose service that initializes Airflow
    pub init_service: String,
}

/// One call to `docker compose`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ComposeInvocation {
    pub files: Vec<PathBuf>,
    pub project_name: Option<String>,
    pub args: Vec<String>,
}

impl ComposeInvocation {
    pub fn new<I, S>(files: Vec<PathBuf>, project_name: Option<String>, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            files,
            project_name,
            args: args.into_iter().map(Into::into).collect(),
        }
    }

    /// Arguments passed to the docker binary, starting with `compose`
    pub fn argv(&self) -> Vec<String> {
        let mut argv = vec!["compose".to_string()];
        if let Some(name) = &self.project_name {
            argv.push("-p".to_string());
            argv.push(name.clone());
        }
        for file in &self.files {
            argv.push("-f".to_string());
            argv.push(file.display().to_string());
        }
        argv.extend(self.args.iter().cloned());
        argv
    }

    /// The compose subcommand portion, e.g. `up -d`
    pub fn subcommand(&self) -> String {
        self.args.join(" ")
    }
}

impl fmt::Display for ComposeInvocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("docker")?;
        for arg in self.argv() {
            if arg.is_empty() || arg.contains(char::is_whitespace) {
                write!(f, " '{}'", arg.replace('\'', r"'\''"))?;
            } else {
                write!(f, " {}", arg)?;
            }
        }
        Ok(())
    }
}

/// A single step of a plan
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Step {
    /// Create directories (and parents) if missing
    EnsureDirectories(Vec<PathBuf>),
    Compose(ComposeInvocation),
}

impl fmt::Display for Step {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EnsureDirectories(dirs) => {
                f.write_str("mkdir -p")?;
                for dir in dirs {
                    write!(f, " {}", dir.display())?;
                }
                Ok(())
            }
            Self::Compose(invocation) => fmt::Display::fmt(invocation, f),
        }
    }
}

/// Ordered steps for one action
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Plan {
    pub action: Action,
    pub selector: Selector,
    pub steps: Vec<Step>,
}

impl Plan {
    /// Build the plan for an action.
    ///
    /// `Init` always targets the airflow group and ignores `selector`.
    pub fn build(action: Action, selector: Selector, layout: &StackLayout) -> Self {
        let selector = match action {
            Action::Init => Selector::Airflow,
            _ => selector,
        };
        let files = layout.groups.resolve(selector);
        let compose = |args: Vec<String>| {
            Step::Compose(ComposeInvocation::new(
                files.clone(),
                layout.project_name.clone(),
                args,
            ))
        };

        let steps = match action {
            Action::Up => vec![compose(up_args())],
            Action::Down => vec![compose(vec!["down".to_string()])],
            Action::Restart => vec![compose(vec!["down".to_string()]), compose(up_args())],
            Action::Logs { tail } => {
                let mut args = vec!["logs".to_string(), "-f".to_string()];
                if let Some(n) = tail {
                    args.push("--tail".to_string());
                    args.push(n.to_string());
                }
                vec![compose(args)]
            }
            Action::Status => vec![compose(vec!["ps".to_string()])],
            Action::Init => vec![
                Step::EnsureDirectories(layout.init_directories.clone()),
                compose(vec!["up".to_string(), layout.init_service.clone()]),
            ],
        };

        Self {
            action,
            selector,
            steps,
        }
    }

    /// Compose invocations only, in execution order
    pub fn invocations(&self) -> impl Iterator<Item = &ComposeInvocation> {
        self.steps.iter().filter_map(|step| match step {
            Step::Compose(invocation) => Some(invocation),
            Step::EnsureDirectories(_) => None,
        })
    }
}

fn up_args() -> Vec<String> {
    vec!["up".to_string(), "-d".to_string()]
}

#[cfg(test)]
mod tests {
    use super::*;

    fn layout() -> StackLayout {
        StackLayout {
            groups: ServiceGroups::new(
                vec![PathBuf::from("docker-compose.yml")],
                vec![PathBuf::from("docker-compose.airflow.yml")],
            ),
            project_name: None,
            init_directories: vec![PathBuf::from("airflow/dags"), PathBuf::from("airflow/logs")],
            init_service: "airflow-init".to_string(),
        }
    }

    fn main_file() -> PathBuf {
        PathBuf::from("docker-compose.yml")
    }

    fn airflow_file() -> PathBuf {
        PathBuf::from("docker-compose.airflow.yml")
    }

    #[test]
    fn test_up_references_expected_files() {
        let cases = [
            ("main", vec![main_file()]),
            ("airflow", vec![airflow_file()]),
            ("all", vec![main_file(), airflow_file()]),
            ("", vec![main_file(), airflow_file()]),
        ];

        for (raw, expected) in cases {
            let selector: Selector = raw.parse().unwrap();
            let plan = Plan::build(Action::Up, selector, &layout());
            let invocations: Vec<_> = plan.invocations().collect();
            assert_eq!(invocations.len(), 1, "selector {:?}", raw);
            assert_eq!(invocations[0].files, expected, "selector {:?}", raw);
            assert_eq!(invocations[0].subcommand(), "up -d");
        }
    }

    #[test]
    fn test_restart_is_down_then_up() {
        let plan = Plan::build(Action::Restart, Selector::Airflow, &layout());
        let invocations: Vec<_> = plan.invocations().collect();
        assert_eq!(invocations.len(), 2);
        assert_eq!(invocations[0].subcommand(), "down");
        assert_eq!(invocations[1].subcommand(), "up -d");
        for invocation in invocations {
            assert_eq!(invocation.files, vec![airflow_file()]);
        }
    }

    #[test]
    fn test_down_status_logs_args() {
        let down = Plan::build(Action::Down, Selector::Main, &layout());
        assert_eq!(down.invocations().next().unwrap().subcommand(), "down");

        let status = Plan::build(Action::Status, Selector::All, &layout());
        assert_eq!(status.invocations().next().unwrap().subcommand(), "ps");

        let logs = Plan::build(Action::Logs { tail: None }, Selector::Main, &layout());
        assert_eq!(logs.invocations().next().unwrap().subcommand(), "logs -f");

        let tailed = Plan::build(Action::Logs { tail: Some(50) }, Selector::Main, &layout());
        assert_eq!(
            tailed.invocations().next().unwrap().subcommand(),
            "logs -f --tail 50"
        );
    }

    #[test]
    fn test_init_creates_dirs_before_airflow_only_call() {
        // selector is ignored for init
        let plan = Plan::build(Action::Init, Selector::All, &layout());
        assert_eq!(plan.selector, Selector::Airflow);
        assert_eq!(plan.steps.len(), 2);
        assert_eq!(
            plan.steps[0],
            Step::EnsureDirectories(vec![
                PathBuf::from("airflow/dags"),
                PathBuf::from("airflow/logs")
            ])
        );
        match &plan.steps[1] {
            Step::Compose(invocation) => {
                assert_eq!(invocation.files, vec![airflow_file()]);
                assert_eq!(invocation.subcommand(), "up airflow-init");
            }
            other => panic!("expected compose step, got {:?}", other),
        }
    }

    #[test]
    fn test_argv_with_project_name() {
        let mut layout = layout();
        layout.project_name = Some("travel".to_string());
        let plan = Plan::build(Action::Up, Selector::All, &layout);
        let argv = plan.invocations().next().unwrap().argv();
        assert_eq!(
            argv,
            vec![
                "compose",
                "-p",
                "travel",
                "-f",
                "docker-compose.yml",
                "-f",
                "docker-compose.airflow.yml",
                "up",
                "-d"
            ]
        );
    }

    #[test]
    fn test_step_display() {
        let plan = Plan::build(Action::Init, Selector::Airflow, &layout());
        let lines: Vec<String> = plan.steps.iter().map(|s| s.to_string()).collect();
        assert_eq!(
            lines,
            vec![
                "mkdir -p airflow/dags airflow/logs",
                "docker compose -f docker-compose.airflow.yml up airflow-init"
            ]
        );
    }

    #[test]
    fn test_display_quotes_whitespace() {
        let invocation = ComposeInvocation::new(
            vec![PathBuf::from("my stack/docker-compose.yml")],
            None,
            ["ps"],
        );
        assert_eq!(
            invocation.to_string(),
            "docker compose -f 'my stack/docker-compose.yml' ps"
        );
    }
}
