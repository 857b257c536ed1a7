//! Budget report lines.

use crate::table::{Cell, Column, FieldKind, Record};
use serde::{Deserialize, Serialize};

/// One allocation head of the constituency budget.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BudgetLine {
    pub id: u32,
    pub head: String,
    pub department: String,
    pub allocated: f64,
    pub spent: f64,
    /// e.g. "2024-25"
    pub fiscal_year: String,
    /// Approved, Pending or Exhausted
    pub status: String,
}

impl BudgetLine {
    /// Allocation not yet spent; negative when overspent.
    pub fn remaining(&self) -> f64 {
        self.allocated - self.spent
    }
}

const COLUMNS: &[Column] = &[
    Column::new("id", "ID", FieldKind::Number, 4),
    Column::new("head", "Head", FieldKind::Text, 24),
    Column::new("department", "Department", FieldKind::Enum, 16),
    Column::new("allocated", "Allocated", FieldKind::Number, 12),
    Column::new("spent", "Spent", FieldKind::Number, 12),
    Column::new("remaining", "Remaining", FieldKind::Number, 12),
    Column::new("fiscal_year", "FY", FieldKind::Enum, 8),
    Column::new("status", "Status", FieldKind::Enum, 10),
];

impl Record for BudgetLine {
    fn id(&self) -> u32 {
        self.id
    }

    fn columns() -> &'static [Column] {
        COLUMNS
    }

    fn cell(&self, key: &str) -> Cell<'_> {
        match key {
            "id" => Cell::Number(f64::from(self.id)),
            "head" => Cell::Text(&self.head),
            "department" => Cell::Text(&self.department),
            "allocated" => Cell::Number(self.allocated),
            "spent" => Cell::Number(self.spent),
            "remaining" => Cell::Number(self.remaining()),
            "fiscal_year" => Cell::Text(&self.fiscal_year),
            "status" => Cell::Text(&self.status),
            _ => Cell::Missing,
        }
    }
}
