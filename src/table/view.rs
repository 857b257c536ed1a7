//! Memoized, paginated table state for one report.
//!
//! Holds the source rows, the current query and the selection. The visible
//! row list is cached and only recomputed when the source or query changes.

use crate::table::query::{self, Direction, Query, Selection, SortSpec};
use crate::table::record::Record;
use std::cell::{Cell as StdCell, RefCell};
use std::cmp;
use std::sync::Arc;

/// Counts shown on the stat cards above a table.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Summary {
    /// Rows in the source
    pub total: usize,
    /// Rows after filters and search
    pub visible: usize,
    /// Source rows per summary-column value
    pub by_value: Vec<(String, usize)>,
}

#[derive(Debug)]
struct Memo<R> {
    source: Arc<[R]>,
    query: Query,
    rows: Arc<[usize]>,
}

/// Table state for a single record type.
#[derive(Debug)]
pub struct TableView<R> {
    records: Arc<[R]>,
    query: Query,
    page_size: usize,
    selected: usize,
    memo: RefCell<Option<Memo<R>>>,
    recomputations: StdCell<usize>,
}

impl<R: Record> TableView<R> {
    /// Create a table over a source collection.
    ///
    /// # Arguments
    /// * `records` - Source rows
    /// * `page_size` - Rows per page (at least 1)
    pub fn new(records: Arc<[R]>, page_size: usize) -> Self {
        Self {
            records,
            query: Query::default(),
            page_size: page_size.max(1),
            selected: 0,
            memo: RefCell::new(None),
            recomputations: StdCell::new(0),
        }
    }

    pub fn query(&self) -> &Query {
        &self.query
    }

    /// Replace the source collection.
    ///
    /// Passing the same `Arc` again keeps the cached rows.
    pub fn set_records(&mut self, records: Arc<[R]>) {
        self.records = records;
        self.clamp_selection();
    }

    /// Replace the whole query.
    pub fn set_query(&mut self, query: Query) {
        self.query = query;
        self.clamp_selection();
    }

    /// Rows visible under the current query, as indices into the source.
    ///
    /// # Details
    /// Returns the cached list when neither the source `Arc` nor the
    /// query has changed since the last call. The memo keeps its own clone
    /// of the source `Arc`.
    pub fn visible(&self) -> Arc<[usize]> {
        let mut memo = self.memo.borrow_mut();
        if let Some(m) = memo.as_ref()
            && Arc::ptr_eq(&m.source, &self.records)
            && m.query == self.query
        {
            return Arc::clone(&m.rows);
        }

        let rows: Arc<[usize]> = query::apply(&self.records, &self.query).into();
        self.recomputations.set(self.recomputations.get() + 1);
        log::debug!(
            "event=table_recompute rows={} total={} count={}",
            rows.len(),
            self.records.len(),
            self.recomputations.get()
        );
        *memo = Some(Memo {
            source: Arc::clone(&self.records),
            query: self.query.clone(),
            rows: Arc::clone(&rows),
        });
        rows
    }

    /// Records visible under the current query, in display order.
    pub fn visible_records(&self) -> Vec<&R> {
        self.visible().iter().map(|&i| &self.records[i]).collect()
    }

    pub fn visible_len(&self) -> usize {
        self.visible().len()
    }

    /// Number of times the visible list has been computed.
    #[cfg(test)]
    pub fn recomputations(&self) -> usize {
        self.recomputations.get()
    }

    /// Set one filter selection.
    pub fn set_filter(&mut self, key: &str, selection: Selection) {
        self.query.filters.insert(key.to_string(), selection);
        self.clamp_selection();
    }

    /// Reset filters, search and sort.
    pub fn clear_filters(&mut self) {
        self.query = Query::default();
        self.clamp_selection();
    }

    /// Current selection of a filter control.
    pub fn filter(&self, key: &str) -> Selection {
        self.query.filters.get(key).cloned().unwrap_or_default()
    }

    /// Filter options for a column: `all` followed by its distinct values.
    pub fn filter_options(&self, key: &str) -> Vec<Selection> {
        std::iter::once(Selection::All)
            .chain(
                query::distinct_values(&self.records, key)
                    .into_iter()
                    .map(Selection::Value),
            )
            .collect()
    }

    /// Advance a column's filter to its next option, wrapping to `all`.
    pub fn cycle_filter(&mut self, key: &str) -> Selection {
        let options = self.filter_options(key);
        let current = self.filter(key);
        let next = options
            .iter()
            .position(|o| *o == current)
            .map(|pos| options[(pos + 1) % options.len()].clone())
            .unwrap_or_default();
        self.set_filter(key, next.clone());
        next
    }

    pub fn set_sort(&mut self, sort: Option<SortSpec>) {
        self.query.sort = sort;
        self.clamp_selection();
    }

    /// Step the sort through every column.
    ///
    /// # Details
    /// Order: none -> first column ascending -> descending -> next column
    /// ascending -> ... -> last column descending -> none.
    pub fn cycle_sort(&mut self) -> Option<SortSpec> {
        let columns = R::columns();
        let next = match &self.query.sort {
            None => columns
                .first()
                .map(|c| SortSpec::new(c.key, Direction::Ascending)),
            Some(spec) if spec.direction == Direction::Ascending => {
                Some(SortSpec::new(spec.field.clone(), Direction::Descending))
            }
            Some(spec) => columns
                .iter()
                .position(|c| c.key == spec.field)
                .and_then(|pos| columns.get(pos + 1))
                .map(|c| SortSpec::new(c.key, Direction::Ascending)),
        };
        self.set_sort(next.clone());
        next
    }

    /// Replace the search text.
    pub fn set_search(&mut self, text: impl Into<String>) {
        self.query.search = text.into();
        self.clamp_selection();
    }

    pub fn push_search(&mut self, ch: char) {
        self.query.search.push(ch);
        self.clamp_selection();
    }

    pub fn pop_search(&mut self) {
        self.query.search.pop();
        self.clamp_selection();
    }

    /// Number of pages; an empty table still has one.
    pub fn page_count(&self) -> usize {
        cmp::max(1, self.visible_len().div_ceil(self.page_size))
    }

    /// Zero-based page holding the selection.
    pub fn page(&self) -> usize {
        self.selected / self.page_size
    }

    /// Records on the current page, with their position in the visible list.
    pub fn page_rows(&self) -> Vec<(usize, &R)> {
        let start = self.page() * self.page_size;
        self.visible_records()
            .into_iter()
            .enumerate()
            .skip(start)
            .take(self.page_size)
            .collect()
    }

    /// Position of the selection in the visible list.
    pub fn selected(&self) -> usize {
        self.selected
    }

    pub fn selected_record(&self) -> Option<&R> {
        let visible = self.visible();
        visible.get(self.selected).map(|&i| &self.records[i])
    }

    /// Move selection down, wrapping to the top.
    pub fn select_next(&mut self) {
        let len = self.visible_len();
        if len == 0 {
            return;
        }
        self.selected = (self.selected + 1) % len;
    }

    /// Move selection up, wrapping to the bottom.
    pub fn select_prev(&mut self) {
        let len = self.visible_len();
        if len == 0 {
            return;
        }
        self.selected = if self.selected == 0 {
            len - 1
        } else {
            self.selected - 1
        };
    }

    /// Jump to the first row of the next page, if any.
    pub fn next_page(&mut self) {
        let next = (self.page() + 1) * self.page_size;
        if next < self.visible_len() {
            self.selected = next;
        }
    }

    /// Jump to the first row of the previous page.
    pub fn prev_page(&mut self) {
        self.selected = self.page().saturating_sub(1) * self.page_size;
    }

    /// Stat card counts over the source collection.
    pub fn summary(&self) -> Summary {
        let by_value = match R::summary_key() {
            Some(key) => query::distinct_values(&self.records, key)
                .into_iter()
                .map(|value| {
                    let count = self
                        .records
                        .iter()
                        .filter(|r| r.cell(key).display() == value.as_str())
                        .count();
                    (value, count)
                })
                .collect(),
            None => Vec::new(),
        };
        Summary {
            total: self.records.len(),
            visible: self.visible_len(),
            by_value,
        }
    }

    fn clamp_selection(&mut self) {
        self.selected = cmp::min(self.selected, self.visible_len().saturating_sub(1));
    }
}
