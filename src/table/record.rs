//! Record model shared by every report table.
//!
//! A record is a flat row with a stable numeric id and a fixed set of typed
//! columns. Tables read cells by column key and interpret them through the
//! column's declared kind.

use std::borrow::Cow;

/// Declared type of a column.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    /// Free text, compared lexicographically
    Text,
    /// Enumerated label (status, category), compared lexicographically
    Enum,
    /// Numeric value, compared numerically
    Number,
    /// ISO date string, compared as a calendar date
    Date,
}

impl FieldKind {
    /// Whether free-text search looks at columns of this kind.
    pub fn is_searchable(self) -> bool {
        matches!(self, FieldKind::Text | FieldKind::Enum)
    }
}

/// A declared, typed attribute of a record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Column {
    /// Field key used by filters and sort specs
    pub key: &'static str,
    /// Header label
    pub label: &'static str,
    /// Declared type
    pub kind: FieldKind,
    /// Preferred display width in terminal cells
    pub width: u16,
}

impl Column {
    pub const fn new(key: &'static str, label: &'static str, kind: FieldKind, width: u16) -> Self {
        Self {
            key,
            label,
            kind,
            width,
        }
    }
}

/// A single value read out of a record.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Cell<'a> {
    /// Text, enum and date values
    Text(&'a str),
    /// Numeric values
    Number(f64),
    /// Field not present on this record
    Missing,
}

impl Cell<'_> {
    /// Render the cell for display.
    ///
    /// # Returns
    /// * `Cow<str>` - Borrowed text, or a formatted number
    ///
    /// # Details
    /// Whole numbers print without a fractional part.
    pub fn display(&self) -> Cow<'_, str> {
        match self {
            Cell::Text(text) => Cow::Borrowed(text),
            Cell::Number(n) => Cow::Owned(format_number(*n)),
            Cell::Missing => Cow::Borrowed(""),
        }
    }
}

fn format_number(n: f64) -> String {
    if n.fract() == 0.0 && n.abs() < 1e15 {
        format!("{}", n as i64)
    } else {
        format!("{n:.2}")
    }
}

/// A row displayable by a table view.
pub trait Record {
    /// Stable unique identifier
    fn id(&self) -> u32;

    /// Declared columns, in display order.
    fn columns() -> &'static [Column];

    /// Read the value of a column.
    fn cell(&self, key: &str) -> Cell<'_>;

    /// Enum column summarised by stat cards.
    fn summary_key() -> Option<&'static str> {
        Some("status")
    }

    /// Look up a declared column by key.
    fn column(key: &str) -> Option<&'static Column> {
        Self::columns().iter().find(|c| c.key == key)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_number_display_drops_zero_fraction() {
        assert_eq!(Cell::Number(1_250_000.0).display(), "1250000");
        assert_eq!(Cell::Number(12.5).display(), "12.50");
    }

    #[test]
    fn test_missing_displays_empty() {
        assert_eq!(Cell::Missing.display(), "");
    }

    #[test]
    fn test_searchable_kinds() {
        assert!(FieldKind::Text.is_searchable());
        assert!(FieldKind::Enum.is_searchable());
        assert!(!FieldKind::Number.is_searchable());
        assert!(!FieldKind::Date.is_searchable());
    }
}
