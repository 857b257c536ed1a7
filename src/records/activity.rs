//! Activity log entries for the logs report.

use crate::table::{Cell, Column, FieldKind, Record};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActivityLog {
    pub id: u32,
    pub actor: String,
    pub action: String,
    /// Dashboard area the action touched
    pub module: String,
    /// Info, Warning or Error
    pub level: String,
    /// RFC 3339 timestamp
    pub timestamp: String,
}

const COLUMNS: &[Column] = &[
    Column::new("id", "ID", FieldKind::Number, 4),
    Column::new("actor", "Actor", FieldKind::Text, 16),
    Column::new("action", "Action", FieldKind::Text, 32),
    Column::new("module", "Module", FieldKind::Enum, 12),
    Column::new("level", "Level", FieldKind::Enum, 8),
    Column::new("timestamp", "Time", FieldKind::Date, 20),
];

impl Record for ActivityLog {
    fn id(&self) -> u32 {
        self.id
    }

    fn columns() -> &'static [Column] {
        COLUMNS
    }

    fn cell(&self, key: &str) -> Cell<'_> {
        match key {
            "id" => Cell::Number(f64::from(self.id)),
            "actor" => Cell::Text(&self.actor),
            "action" => Cell::Text(&self.action),
            "module" => Cell::Text(&self.module),
            "level" => Cell::Text(&self.level),
            "timestamp" => Cell::Text(&self.timestamp),
            _ => Cell::Missing,
        }
    }

    fn summary_key() -> Option<&'static str> {
        Some("level")
    }
}
