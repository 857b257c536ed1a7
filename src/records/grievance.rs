//! Citizen grievances.

use crate::table::{Cell, Column, FieldKind, Record};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Grievance {
    pub id: u32,
    pub title: String,
    pub citizen: String,
    pub category: String,
    pub ward: String,
    /// Low, Medium or High
    pub priority: String,
    /// Open, In Progress, Resolved or Rejected
    pub status: String,
    pub filed_on: String,
}

const COLUMNS: &[Column] = &[
    Column::new("id", "ID", FieldKind::Number, 4),
    Column::new("title", "Grievance", FieldKind::Text, 28),
    Column::new("citizen", "Citizen", FieldKind::Text, 16),
    Column::new("category", "Category", FieldKind::Enum, 12),
    Column::new("ward", "Ward", FieldKind::Text, 12),
    Column::new("priority", "Priority", FieldKind::Enum, 8),
    Column::new("status", "Status", FieldKind::Enum, 11),
    Column::new("filed_on", "Filed", FieldKind::Date, 10),
];

impl Record for Grievance {
    fn id(&self) -> u32 {
        self.id
    }

    fn columns() -> &'static [Column] {
        COLUMNS
    }

    fn cell(&self, key: &str) -> Cell<'_> {
        match key {
            "id" => Cell::Number(f64::from(self.id)),
            "title" => Cell::Text(&self.title),
            "citizen" => Cell::Text(&self.citizen),
            "category" => Cell::Text(&self.category),
            "ward" => Cell::Text(&self.ward),
            "priority" => Cell::Text(&self.priority),
            "status" => Cell::Text(&self.status),
            "filed_on" => Cell::Text(&self.filed_on),
            _ => Cell::Missing,
        }
    }
}
