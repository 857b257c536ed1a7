//! Dashboard user accounts.

use crate::table::{Cell, Column, FieldKind, Record};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub id: u32,
    pub name: String,
    pub email: String,
    /// Admin, MLA, Staff or Citizen
    pub role: String,
    pub constituency: String,
    /// Active or Inactive
    pub status: String,
    pub joined_on: String,
}

const COLUMNS: &[Column] = &[
    Column::new("id", "ID", FieldKind::Number, 4),
    Column::new("name", "Name", FieldKind::Text, 18),
    Column::new("email", "Email", FieldKind::Text, 26),
    Column::new("role", "Role", FieldKind::Enum, 8),
    Column::new("constituency", "Constituency", FieldKind::Enum, 14),
    Column::new("status", "Status", FieldKind::Enum, 8),
    Column::new("joined_on", "Joined", FieldKind::Date, 10),
];

impl Record for User {
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
            "email" => Cell::Text(&self.email),
            "role" => Cell::Text(&self.role),
            "constituency" => Cell::Text(&self.constituency),
            "status" => Cell::Text(&self.status),
            "joined_on" => Cell::Text(&self.joined_on),
            _ => Cell::Missing,
        }
    }
}
