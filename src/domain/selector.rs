//! Service group selection
//!
//! A selector names which compose service group(s) an action targets.
//! Resolution to compose files is a pure mapping so it can be tested
//! without Docker.

use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

use crate::error::SelectorError;

/// Target selector for lifecycle actions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Selector {
    /// FastAPI app, PostgreSQL and Qdrant
    Main,
    /// Airflow scheduler, webserver and metadata database
    Airflow,
    /// Both groups, main first
    #[default]
    All,
}

impl Selector {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Main => "main",
            Self::Airflow => "airflow",
            Self::All => "all",
        }
    }

    /// Whether this selector covers the given single group
    pub fn includes(&self, group: Selector) -> bool {
        *self == Self::All || *self == group
    }
}

impl FromStr for Selector {
    type Err = SelectorError;

    /// Parse a selector. The empty string means `all`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "" | "all" => Ok(Self::All),
            "main" => Ok(Self::Main),
            "airflow" => Ok(Self::Airflow),
            other => Err(SelectorError::Invalid {
                value: other.to_string(),
            }),
        }
    }
}

impl fmt::Display for Selector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Compose files backing each service group
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServiceGroups {
    pub main: Vec<PathBuf>,
    pub airflow: Vec<PathBuf>,
}

impl ServiceGroups {
    pub fn new(main: Vec<PathBuf>, airflow: Vec<PathBuf>) -> Self {
        Self { main, airflow }
    }

    /// Ordered compose files for a selector.
    ///
    /// `All` concatenates main then airflow so later files override earlier
    /// declarations.
    pub fn resolve(&self, selector: Selector) -> Vec<PathBuf> {
        match selector {
            Selector::Main => self.main.clone(),
            Selector::Airflow => self.airflow.clone(),
            Selector::All => self.main.iter().chain(&self.airflow).cloned().collect(),
        }
    }
}
