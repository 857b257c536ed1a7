//! Development projects in the constituency.

use crate::table::{Cell, Column, FieldKind, Record};
use serde::{Deserialize, Serialize};

/// A development project.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Project {
    pub id: u32,
    pub name: String,
    /// Category name (roads, water, health, ...)
    pub category: String,
    /// Ward or locality
    pub area: String,
    /// Sanctioned budget in rupees
    pub budget: f64,
    /// Planned, Ongoing, On Hold or Completed
    pub status: String,
    /// ISO start date
    pub start_date: String,
}

const COLUMNS: &[Column] = &[
    Column::new("id", "ID", FieldKind::Number, 4),
    Column::new("name", "Project", FieldKind::Text, 28),
    Column::new("category", "Category", FieldKind::Enum, 14),
    Column::new("area", "Area", FieldKind::Text, 16),
    Column::new("budget", "Budget", FieldKind::Number, 12),
    Column::new("status", "Status", FieldKind::Enum, 11),
    Column::new("start_date", "Start", FieldKind::Date, 10),
];

impl Record for Project {
    fn id(&self) -> u32 {
        self.id
    }

    fn columns() -> &'static [Column] {
        COLUMNS
    }

    fn cell(&self, key: &str) -> Cell<'_> {
        match key {
            "id" => Cell::Number(f64::from(self.id)),
            "name" => Cell::Text(&self.name),
            "category" => Cell::Text(&self.category),
            "area" => Cell::Text(&self.area),
            "budget" => Cell::Number(self.budget),
            "status" => Cell::Text(&self.status),
            "start_date" => Cell::Text(&self.start_date),
            _ => Cell::Missing,
        }
    }
}
