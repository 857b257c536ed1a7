//! Record shapes for every report.
//!
//! Each type is a flat, serde-friendly row with a numeric id and a fixed
//! column list.

pub mod activity;
pub mod budget;
pub mod grievance;
pub mod poll;
pub mod project;
pub mod user;

pub use activity::ActivityLog;
pub use budget::BudgetLine;
pub use grievance::Grievance;
pub use poll::Poll;
pub use project::Project;
pub use user::User;
