//! Filter, search and sort over a record collection.
//!
//! `apply` is the whole contract of a report table: it never mutates its
//! input and never fails. Selections on undeclared fields are ignored, and
//! values that cannot be interpreted under their column's kind sort last.

use crate::table::record::{Cell, FieldKind, Record};
use chrono::{DateTime, NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::collections::BTreeMap;
use std::fmt;

/// Selected value of a single filter control.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Selection {
    /// No restriction
    #[default]
    All,
    /// Equality match against the field
    Value(String),
}

impl Selection {
    pub fn is_all(&self) -> bool {
        matches!(self, Selection::All)
    }
}

impl From<String> for Selection {
    fn from(value: String) -> Self {
        if value.trim().eq_ignore_ascii_case("all") {
            Selection::All
        } else {
            Selection::Value(value)
        }
    }
}

impl From<&str> for Selection {
    fn from(value: &str) -> Self {
        Selection::from(value.to_string())
    }
}

impl From<Selection> for String {
    fn from(value: Selection) -> Self {
        match value {
            Selection::All => "all".to_string(),
            Selection::Value(v) => v,
        }
    }
}

impl fmt::Display for Selection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Selection::All => f.write_str("all"),
            Selection::Value(v) => f.write_str(v),
        }
    }
}

/// Field key -> selected value.
pub type FilterSet = BTreeMap<String, Selection>;

/// Sort direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Direction {
    #[default]
    #[serde(rename = "asc", alias = "ascending")]
    Ascending,
    #[serde(rename = "desc", alias = "descending")]
    Descending,
}

impl Direction {
    pub fn arrow(self) -> &'static str {
        match self {
            Direction::Ascending => "▲",
            Direction::Descending => "▼",
        }
    }
}

/// Field and direction that determine display order.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SortSpec {
    pub field: String,
    #[serde(default)]
    pub direction: Direction,
}

impl SortSpec {
    pub fn new(field: impl Into<String>, direction: Direction) -> Self {
        Self {
            field: field.into(),
            direction,
        }
    }
}

/// Everything that determines the visible rows of a table.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Query {
    pub filters: FilterSet,
    pub sort: Option<SortSpec>,
    pub search: String,
}

impl Query {
    /// Whether any filter restricts the rows.
    pub fn has_active_filters(&self) -> bool {
        self.filters.values().any(|s| !s.is_all())
    }
}

/// Comparable form of a cell under its column kind.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd)]
enum SortKey<'a> {
    Text(&'a str),
    Number(f64),
    Date(NaiveDateTime),
}

impl SortKey<'_> {
    fn compare(&self, other: &Self) -> Ordering {
        // Keys of one column always share a variant; NaN never becomes a key.
        self.partial_cmp(other).unwrap_or(Ordering::Equal)
    }
}

/// Parse an ISO date (`YYYY-MM-DD`) or RFC 3339 timestamp.
pub fn parse_date(value: &str) -> Option<NaiveDateTime> {
    let value = value.trim();
    if let Ok(date) = NaiveDate::parse_from_str(value, "%Y-%m-%d") {
        return date.and_hms_opt(0, 0, 0);
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(value) {
        return Some(dt.naive_utc());
    }
    NaiveDateTime::parse_from_str(value, "%Y-%m-%d %H:%M:%S").ok()
}

fn sort_key(cell: Cell<'_>, kind: FieldKind) -> Option<SortKey<'_>> {
    match (kind, cell) {
        (_, Cell::Missing) => None,
        (FieldKind::Number, Cell::Number(n)) => (!n.is_nan()).then_some(SortKey::Number(n)),
        (FieldKind::Number, Cell::Text(t)) => t
            .trim()
            .parse::<f64>()
            .ok()
            .filter(|n| !n.is_nan())
            .map(SortKey::Number),
        (FieldKind::Date, Cell::Text(t)) => parse_date(t).map(SortKey::Date),
        (FieldKind::Date, Cell::Number(_)) => None,
        (FieldKind::Text | FieldKind::Enum, Cell::Text(t)) => Some(SortKey::Text(t)),
        (FieldKind::Text | FieldKind::Enum, Cell::Number(n)) => Some(SortKey::Number(n)),
    }
}

fn cell_matches(cell: Cell<'_>, value: &str) -> bool {
    match cell {
        Cell::Missing => false,
        Cell::Text(text) => text == value,
        Cell::Number(n) => match value.trim().parse::<f64>() {
            Ok(wanted) => n == wanted,
            Err(_) => cell.display() == value,
        },
    }
}

fn record_matches<R: Record>(record: &R, filters: &FilterSet) -> bool {
    filters.iter().all(|(key, selection)| match selection {
        Selection::All => true,
        Selection::Value(value) => match R::column(key) {
            Some(column) => cell_matches(record.cell(column.key), value),
            None => true,
        },
    })
}

fn record_contains<R: Record>(record: &R, needle_lower: &str) -> bool {
    R::columns()
        .iter()
        .filter(|c| c.kind.is_searchable())
        .any(|c| match record.cell(c.key) {
            Cell::Text(text) => text.to_lowercase().contains(needle_lower),
            _ => false,
        })
}

/// Compute the visible rows of a table.
///
/// # Arguments
/// * `records` - Source collection
/// * `query` - Filters, search text and sort spec
///
/// # Returns
/// * `Vec<usize>` - Indices into `records`, in display order
///
/// # Details
/// Filters and search keep the original relative order. Sorting is stable,
/// and records without a sortable value on the sort field follow all
/// sortable ones in either direction.
pub fn apply<R: Record>(records: &[R], query: &Query) -> Vec<usize> {
    let needle = query.search.trim().to_lowercase();

    let mut visible: Vec<usize> = records
        .iter()
        .enumerate()
        .filter(|(_, r)| record_matches(*r, &query.filters))
        .filter(|(_, r)| needle.is_empty() || record_contains(*r, &needle))
        .map(|(i, _)| i)
        .collect();

    let Some(spec) = &query.sort else {
        return visible;
    };
    let Some(column) = R::column(&spec.field) else {
        return visible;
    };

    let mut keyed: Vec<(usize, Option<SortKey<'_>>)> = visible
        .iter()
        .map(|&i| (i, sort_key(records[i].cell(column.key), column.kind)))
        .collect();

    keyed.sort_by(|(_, a), (_, b)| match (a, b) {
        (Some(a), Some(b)) => match spec.direction {
            Direction::Ascending => a.compare(b),
            Direction::Descending => b.compare(a),
        },
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    });

    visible.clear();
    visible.extend(keyed.into_iter().map(|(i, _)| i));
    visible
}

/// Like [`apply`], returning the records themselves.
#[allow(dead_code)] // Tables keep indices; useful for one-off exports and tests
pub fn apply_records<'a, R: Record>(records: &'a [R], query: &Query) -> Vec<&'a R> {
    apply(records, query)
        .into_iter()
        .map(|i| &records[i])
        .collect()
}

/// Distinct display values of a column, in first-appearance order.
///
/// Used as the option list of a filter control.
pub fn distinct_values<R: Record>(records: &[R], key: &str) -> Vec<String> {
    let mut values: Vec<String> = Vec::new();
    for record in records {
        let cell = record.cell(key);
        if cell == Cell::Missing {
            continue;
        }
        let shown = cell.display();
        if !shown.is_empty() && !values.iter().any(|v| v == shown.as_ref()) {
            values.push(shown.into_owned());
        }
    }
    values
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::Dataset;
    use crate::records::Project;
    use crate::table::record::Column;

    fn ids(records: &[Project], query: &Query) -> Vec<u32> {
        apply_records(records, query).iter().map(|p| p.id).collect()
    }

    fn status_filter(value: &str) -> Query {
        let mut query = Query::default();
        query
            .filters
            .insert("status".to_string(), Selection::from(value));
        query
    }

    #[derive(Debug)]
    struct Row {
        id: u32,
        label: &'static str,
        when: Option<&'static str>,
        score: f64,
    }

    const ROW_COLUMNS: &[Column] = &[
        Column::new("label", "Label", FieldKind::Text, 10),
        Column::new("when", "When", FieldKind::Date, 10),
        Column::new("score", "Score", FieldKind::Number, 6),
    ];

    impl Record for Row {
        fn id(&self) -> u32 {
            self.id
        }

        fn columns() -> &'static [Column] {
            ROW_COLUMNS
        }

        fn cell(&self, key: &str) -> Cell<'_> {
            match key {
                "label" => Cell::Text(self.label),
                "when" => self.when.map(Cell::Text).unwrap_or(Cell::Missing),
                "score" => Cell::Number(self.score),
                _ => Cell::Missing,
            }
        }
    }

    fn row(id: u32, label: &'static str, when: Option<&'static str>, score: f64) -> Row {
        Row {
            id,
            label,
            when,
            score,
        }
    }

    #[test]
    fn test_completed_projects_keep_source_order() {
        let data = Dataset::sample().unwrap();
        assert_eq!(data.projects.len(), 8);
        assert_eq!(ids(&data.projects, &status_filter("Completed")), vec![3, 8]);
    }

    #[test]
    fn test_all_with_area_sort_orders_every_project() {
        let data = Dataset::sample().unwrap();
        let mut query = status_filter("all");
        query.sort = Some(SortSpec::new("area", Direction::Ascending));

        let sorted = apply_records(&data.projects, &query);
        assert_eq!(sorted.len(), 8);
        assert!(sorted.windows(2).all(|w| w[0].area <= w[1].area));
    }

    #[test]
    fn test_empty_source_yields_empty_output() {
        let empty: Vec<Project> = Vec::new();
        let mut query = status_filter("Completed");
        query.sort = Some(SortSpec::new("budget", Direction::Descending));
        query.search = "road".to_string();
        assert!(apply(&empty, &query).is_empty());
    }

    #[test]
    fn test_unmatched_filter_yields_empty_output() {
        let data = Dataset::sample().unwrap();
        assert!(apply(&data.projects, &status_filter("Cancelled")).is_empty());
    }

    #[test]
    fn test_filter_is_sound_and_complete() {
        let data = Dataset::sample().unwrap();
        for value in distinct_values(&data.projects, "status") {
            let shown = apply_records(&data.projects, &status_filter(&value));
            assert!(shown.iter().all(|p| p.status == value));
            let expected = data.projects.iter().filter(|p| p.status == value).count();
            assert_eq!(shown.len(), expected);
        }
    }

    #[test]
    fn test_sort_is_monotonic_permutation_in_both_directions() {
        let data = Dataset::sample().unwrap();
        for direction in [Direction::Ascending, Direction::Descending] {
            let query = Query {
                sort: Some(SortSpec::new("budget", direction)),
                ..Query::default()
            };
            let sorted = apply_records(&data.projects, &query);
            let budgets: Vec<f64> = sorted.iter().map(|p| p.budget).collect();
            let monotonic = budgets.windows(2).all(|w| match direction {
                Direction::Ascending => w[0] <= w[1],
                Direction::Descending => w[0] >= w[1],
            });
            assert!(monotonic, "budgets not monotonic: {budgets:?}");

            let mut got: Vec<u32> = sorted.iter().map(|p| p.id).collect();
            got.sort_unstable();
            assert_eq!(got, (1..=8).collect::<Vec<_>>());
        }
    }

    #[test]
    fn test_apply_is_idempotent() {
        let data = Dataset::sample().unwrap();
        let mut query = status_filter("Ongoing");
        query.sort = Some(SortSpec::new("start_date", Direction::Descending));
        assert_eq!(apply(&data.projects, &query), apply(&data.projects, &query));
    }

    #[test]
    fn test_unknown_sort_field_is_noop() {
        let data = Dataset::sample().unwrap();
        let query = Query {
            sort: Some(SortSpec::new("nonexistent", Direction::Descending)),
            ..Query::default()
        };
        assert_eq!(ids(&data.projects, &query), (1..=8).collect::<Vec<_>>());
    }

    #[test]
    fn test_unknown_filter_field_is_ignored() {
        let data = Dataset::sample().unwrap();
        let mut query = Query::default();
        query
            .filters
            .insert("colour".to_string(), Selection::from("red"));
        assert_eq!(apply(&data.projects, &query).len(), 8);
    }

    #[test]
    fn test_unparseable_dates_sort_last_in_both_directions() {
        let rows = vec![
            row(1, "a", Some("not a date"), 0.0),
            row(2, "b", Some("2024-03-01"), 0.0),
            row(3, "c", None, 0.0),
            row(4, "d", Some("2023-11-20"), 0.0),
        ];
        let mut query = Query {
            sort: Some(SortSpec::new("when", Direction::Ascending)),
            ..Query::default()
        };
        let order: Vec<u32> = apply_records(&rows, &query).iter().map(|r| r.id).collect();
        assert_eq!(order, vec![4, 2, 1, 3]);

        query.sort = Some(SortSpec::new("when", Direction::Descending));
        let order: Vec<u32> = apply_records(&rows, &query).iter().map(|r| r.id).collect();
        assert_eq!(order, vec![2, 4, 1, 3]);
    }

    #[test]
    fn test_numbers_sort_numerically_not_lexically() {
        let rows = vec![
            row(1, "a", None, 100.0),
            row(2, "b", None, 9.0),
            row(3, "c", None, 25.0),
        ];
        let query = Query {
            sort: Some(SortSpec::new("score", Direction::Ascending)),
            ..Query::default()
        };
        let order: Vec<u32> = apply_records(&rows, &query).iter().map(|r| r.id).collect();
        assert_eq!(order, vec![2, 3, 1]);
    }

    #[test]
    fn test_sort_is_stable_for_equal_keys() {
        let rows = vec![
            row(1, "same", None, 0.0),
            row(2, "other", None, 0.0),
            row(3, "same", None, 0.0),
        ];
        let query = Query {
            sort: Some(SortSpec::new("label", Direction::Descending)),
            ..Query::default()
        };
        let order: Vec<u32> = apply_records(&rows, &query).iter().map(|r| r.id).collect();
        assert_eq!(order, vec![1, 3, 2]);
    }

    #[test]
    fn test_missing_cell_never_matches_value_filter() {
        let rows = vec![row(1, "a", None, 0.0), row(2, "b", Some("2024-01-01"), 0.0)];
        let mut query = Query::default();
        query
            .filters
            .insert("when".to_string(), Selection::from("2024-01-01"));
        let order: Vec<u32> = apply_records(&rows, &query).iter().map(|r| r.id).collect();
        assert_eq!(order, vec![2]);
    }

    #[test]
    fn test_number_filter_compares_numerically() {
        let rows = vec![row(1, "a", None, 5.0), row(2, "b", None, 7.0)];
        let mut query = Query::default();
        query
            .filters
            .insert("score".to_string(), Selection::from("5.0"));
        assert_eq!(apply(&rows, &query), vec![0]);
    }

    #[test]
    fn test_search_is_case_insensitive_over_text_columns() {
        let data = Dataset::sample().unwrap();
        let query = Query {
            search: "ROAD".to_string(),
            ..Query::default()
        };
        let shown = apply_records(&data.projects, &query);
        assert!(!shown.is_empty());
        assert!(
            shown
                .iter()
                .all(|p| p.name.to_lowercase().contains("road")
                    || p.category.to_lowercase().contains("road")
                    || p.area.to_lowercase().contains("road"))
        );
    }

    #[test]
    fn test_selection_parses_all_case_insensitively() {
        assert_eq!(Selection::from("ALL"), Selection::All);
        assert_eq!(
            Selection::from("Completed"),
            Selection::Value("Completed".to_string())
        );
        let parsed: Selection = serde_json::from_str("\"all\"").unwrap();
        assert!(parsed.is_all());
    }

    #[test]
    fn test_parse_date_formats() {
        assert!(parse_date("2024-02-29").is_some());
        assert!(parse_date("2024-05-01T10:15:00Z").is_some());
        assert!(parse_date("2024-05-01 10:15:00").is_some());
        assert!(parse_date("01/05/2024").is_none());
    }

    #[test]
    fn test_distinct_values_first_appearance_order() {
        let data = Dataset::sample().unwrap();
        let statuses = distinct_values(&data.projects, "status");
        assert_eq!(statuses.first().map(String::as_str), Some("Ongoing"));
        assert!(statuses.contains(&"Completed".to_string()));
        let mut deduped = statuses.clone();
        deduped.dedup();
        assert_eq!(deduped.len(), statuses.len());
    }
}
