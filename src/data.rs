//! Record sources for the dashboard.
//!
//! Every report ships with bundled sample rows. A data directory may
//! override any report with its own `<stem>.json` file.

use crate::error::DataError;
use crate::records::{ActivityLog, BudgetLine, Grievance, Poll, Project, User};
use crate::report::Report;
use crate::table::Record;
use serde::de::DeserializeOwned;
use std::collections::HashSet;
use std::fs;
use std::path::Path;
use std::sync::Arc;

const SAMPLE_PROJECTS: &str = include_str!("../data/projects.json");
const SAMPLE_GRIEVANCES: &str = include_str!("../data/grievances.json");
const SAMPLE_POLLS: &str = include_str!("../data/polls.json");
const SAMPLE_BUDGET: &str = include_str!("../data/budget.json");
const SAMPLE_USERS: &str = include_str!("../data/users.json");
const SAMPLE_LOGS: &str = include_str!("../data/logs.json");

/// All record collections, one per report.
#[derive(Debug, Clone)]
pub struct Dataset {
    pub projects: Arc<[Project]>,
    pub grievances: Arc<[Grievance]>,
    pub polls: Arc<[Poll]>,
    pub budget: Arc<[BudgetLine]>,
    pub users: Arc<[User]>,
    pub logs: Arc<[ActivityLog]>,
}

impl Dataset {
    /// Bundled sample data, used when no data directory is configured.
    pub fn sample() -> Result<Self, DataError> {
        Self::load(None)
    }

    /// Load every report, preferring files in `dir` over bundled samples.
    ///
    /// # Arguments
    /// * `dir` - Optional directory holding `<stem>.json` files
    ///
    /// # Returns
    /// * `Result<Dataset, DataError>` - Loaded data or the first failure
    pub fn load(dir: Option<&Path>) -> Result<Self, DataError> {
        Ok(Self {
            projects: load_report(dir, Report::Projects, SAMPLE_PROJECTS)?,
            grievances: load_report(dir, Report::Grievances, SAMPLE_GRIEVANCES)?,
            polls: load_report(dir, Report::Polls, SAMPLE_POLLS)?,
            budget: load_report(dir, Report::Budget, SAMPLE_BUDGET)?,
            users: load_report(dir, Report::Users, SAMPLE_USERS)?,
            logs: load_report(dir, Report::Logs, SAMPLE_LOGS)?,
        })
    }

    /// Number of rows in a report.
    pub fn len(&self, report: Report) -> usize {
        match report {
            Report::Projects => self.projects.len(),
            Report::Grievances => self.grievances.len(),
            Report::Polls => self.polls.len(),
            Report::Budget => self.budget.len(),
            Report::Users => self.users.len(),
            Report::Logs => self.logs.len(),
        }
    }
}

/// Record types that have a collection in [`Dataset`].
pub trait DatasetRows: Record + Sized {
    fn rows(data: &Dataset) -> Arc<[Self]>;
}

macro_rules! dataset_rows {
    ($($ty:ty => $field:ident),* $(,)?) => {
        $(impl DatasetRows for $ty {
            fn rows(data: &Dataset) -> Arc<[Self]> {
                Arc::clone(&data.$field)
            }
        })*
    };
}

dataset_rows! {
    Project => projects,
    Grievance => grievances,
    Poll => polls,
    BudgetLine => budget,
    User => users,
    ActivityLog => logs,
}

fn load_report<T>(dir: Option<&Path>, report: Report, sample: &str) -> Result<Arc<[T]>, DataError>
where
    T: Record + DeserializeOwned,
{
    let name = report.file_stem();
    let override_path = dir.map(|d| d.join(format!("{name}.json")));

    let rows: Vec<T> = match override_path {
        Some(path) if path.exists() => {
            let content = fs::read_to_string(&path).map_err(|source| DataError::Read {
                path: path.clone(),
                source,
            })?;
            log::info!(
                "event=data_load report={} source={}",
                name,
                path.display()
            );
            parse_rows(name, &content)?
        }
        _ => {
            log::debug!("event=data_load report={} source=bundled", name);
            parse_rows(name, sample)?
        }
    };

    Ok(rows.into())
}

fn parse_rows<T>(name: &str, content: &str) -> Result<Vec<T>, DataError>
where
    T: Record + DeserializeOwned,
{
    let rows: Vec<T> = serde_json::from_str(content).map_err(|source| DataError::Parse {
        name: name.to_string(),
        source,
    })?;

    let mut seen = HashSet::with_capacity(rows.len());
    for row in &rows {
        if !seen.insert(row.id()) {
            return Err(DataError::DuplicateId {
                name: name.to_string(),
                id: row.id(),
            });
        }
    }
    Ok(rows)
}
