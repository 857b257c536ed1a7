//! Generic tabular view: typed records, filter/sort queries and paginated
//! table state.

pub mod query;
pub mod record;
pub mod view;

pub use query::{FilterSet, Query, Selection, SortSpec};
pub use record::{Cell, Column, FieldKind, Record};
pub use view::{Summary, TableView};
