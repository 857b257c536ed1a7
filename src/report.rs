//! Reports and the roles that may see them.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A feature area of the dashboard, shown as one tab.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Report {
    Projects,
    Grievances,
    Polls,
    Budget,
    Users,
    Logs,
}

impl Report {
    pub const ALL: [Report; 6] = [
        Report::Projects,
        Report::Grievances,
        Report::Polls,
        Report::Budget,
        Report::Users,
        Report::Logs,
    ];

    /// Tab title.
    pub fn title(self) -> &'static str {
        match self {
            Report::Projects => "Projects",
            Report::Grievances => "Grievances",
            Report::Polls => "Polls",
            Report::Budget => "Budget",
            Report::Users => "Users",
            Report::Logs => "Logs",
        }
    }

    /// File stem of the report's data file (`<stem>.json`).
    pub fn file_stem(self) -> &'static str {
        match self {
            Report::Projects => "projects",
            Report::Grievances => "grievances",
            Report::Polls => "polls",
            Report::Budget => "budget",
            Report::Users => "users",
            Report::Logs => "logs",
        }
    }
}

/// Dashboard role.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    #[default]
    Admin,
    Mla,
    Staff,
    Citizen,
}

impl Role {
    /// Reports visible to this role, in tab order.
    pub fn reports(self) -> &'static [Report] {
        match self {
            Role::Admin => &Report::ALL,
            Role::Mla => &[
                Report::Projects,
                Report::Grievances,
                Report::Polls,
                Report::Budget,
            ],
            Role::Staff => &[
                Report::Grievances,
                Report::Projects,
                Report::Users,
                Report::Logs,
            ],
            Role::Citizen => &[Report::Grievances, Report::Projects, Report::Polls],
        }
    }

    pub fn can_view(self, report: Report) -> bool {
        self.reports().contains(&report)
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Role::Admin => "Admin",
            Role::Mla => "MLA",
            Role::Staff => "Staff",
            Role::Citizen => "Citizen",
        })
    }
}

impl FromStr for Role {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "admin" => Ok(Role::Admin),
            "mla" => Ok(Role::Mla),
            "staff" => Ok(Role::Staff),
            "citizen" => Ok(Role::Citizen),
            other => Err(format!(
                "unknown role `{other}`; expected admin|mla|staff|citizen"
            )),
        }
    }
}
