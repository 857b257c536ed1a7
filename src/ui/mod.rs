//! UI components module.
//!
//! Contains ratatui widgets for displaying the dashboard.

pub mod detail;
pub mod filters;
pub mod search;
pub mod summary;
pub mod table;
pub mod tabs;

pub use detail::render_detail;
pub use filters::render_filters;
pub use search::render_search;
pub use summary::render_summary;
pub use table::render_table;
pub use tabs::render_tabs;
