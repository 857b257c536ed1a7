//! Opinion polls published to constituents.

use crate::table::{Cell, Column, FieldKind, Record};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Poll {
    pub id: u32,
    pub question: String,
    /// Target group (All Citizens, Youth, Farmers, ...)
    pub audience: String,
    pub votes: u64,
    /// Draft, Active or Closed
    pub status: String,
    pub ends_on: String,
}

const COLUMNS: &[Column] = &[
    Column::new("id", "ID", FieldKind::Number, 4),
    Column::new("question", "Question", FieldKind::Text, 36),
    Column::new("audience", "Audience", FieldKind::Enum, 14),
    Column::new("votes", "Votes", FieldKind::Number, 7),
    Column::new("status", "Status", FieldKind::Enum, 8),
    Column::new("ends_on", "Ends", FieldKind::Date, 10),
];

impl Record for Poll {
    fn id(&self) -> u32 {
        self.id
    }

    fn columns() -> &'static [Column] {
        COLUMNS
    }

    fn cell(&self, key: &str) -> Cell<'_> {
        match key {
            "id" => Cell::Number(f64::from(self.id)),
            "question" => Cell::Text(&self.question),
            "audience" => Cell::Text(&self.audience),
            "votes" => Cell::Number(self.votes as f64),
            "status" => Cell::Text(&self.status),
            "ends_on" => Cell::Text(&self.ends_on),
            _ => Cell::Missing,
        }
    }
}
