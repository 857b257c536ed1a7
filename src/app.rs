//! Application state management.
//!
//! Holds one table pane per report visible to the active role, the active
//! tab, UI mode, filter cursor and status line.

use crate::config::Config;
use crate::data::{Dataset, DatasetRows};
use crate::records::{ActivityLog, BudgetLine, Grievance, Poll, Project, User};
use crate::report::{Report, Role};
use crate::table::{Column, FieldKind, Query, Record, Selection, SortSpec, Summary, TableView};
use std::path::PathBuf;

/// Application UI mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UiMode {
    /// Normal table view
    List,
    /// Editing the search text
    Search,
    /// Editing filter selections
    Filters,
    /// Detail popup for the selected record
    Detail,
}

/// One rendered table row.
#[derive(Debug, Clone, PartialEq)]
pub struct PageRow {
    /// Position in the visible list
    pub position: usize,
    pub id: u32,
    /// Display text per column
    pub cells: Vec<String>,
}

/// A report table seen independently of its record type.
pub trait Pane {
    fn report(&self) -> Report;
    fn columns(&self) -> &'static [Column];
    fn query(&self) -> &Query;
    fn summary(&self) -> Summary;
    fn page_rows(&self) -> Vec<PageRow>;
    fn selected(&self) -> usize;
    fn selected_id(&self) -> Option<u32>;
    /// Label and value of every column of the selected record.
    fn selected_detail(&self) -> Option<Vec<(&'static str, String)>>;
    fn visible_len(&self) -> usize;
    fn page(&self) -> usize;
    fn page_count(&self) -> usize;
    fn select_next(&mut self);
    fn select_prev(&mut self);
    fn next_page(&mut self);
    fn prev_page(&mut self);
    fn filter(&self, key: &str) -> Selection;
    fn cycle_filter(&mut self, key: &str) -> Selection;
    fn cycle_sort(&mut self) -> Option<SortSpec>;
    fn push_search(&mut self, ch: char);
    fn pop_search(&mut self);
    fn set_search(&mut self, text: &str);
    fn clear(&mut self);
    /// Swap in freshly loaded rows, keeping the query.
    fn reload(&mut self, data: &Dataset);

    /// Columns offered as filter controls.
    fn filter_columns(&self) -> Vec<&'static Column> {
        self.columns()
            .iter()
            .filter(|c| c.kind == FieldKind::Enum)
            .collect()
    }
}

/// A report backed by a typed table.
#[derive(Debug)]
pub struct ReportPane<R> {
    report: Report,
    table: TableView<R>,
}

impl<R: DatasetRows> ReportPane<R> {
    pub fn new(report: Report, data: &Dataset, page_size: usize, query: Query) -> Self {
        let mut table = TableView::new(R::rows(data), page_size);
        table.set_query(query);
        Self { report, table }
    }
}

fn row_cells<R: Record>(record: &R) -> Vec<String> {
    R::columns()
        .iter()
        .map(|c| record.cell(c.key).display().into_owned())
        .collect()
}

impl<R: DatasetRows> Pane for ReportPane<R> {
    fn report(&self) -> Report {
        self.report
    }

    fn columns(&self) -> &'static [Column] {
        R::columns()
    }

    fn query(&self) -> &Query {
        self.table.query()
    }

    fn summary(&self) -> Summary {
        self.table.summary()
    }

    fn page_rows(&self) -> Vec<PageRow> {
        self.table
            .page_rows()
            .into_iter()
            .map(|(position, record)| PageRow {
                position,
                id: record.id(),
                cells: row_cells(record),
            })
            .collect()
    }

    fn selected(&self) -> usize {
        self.table.selected()
    }

    fn selected_id(&self) -> Option<u32> {
        self.table.selected_record().map(|r| r.id())
    }

    fn selected_detail(&self) -> Option<Vec<(&'static str, String)>> {
        self.table.selected_record().map(|record| {
            R::columns()
                .iter()
                .map(|c| (c.label, record.cell(c.key).display().into_owned()))
                .collect()
        })
    }

    fn visible_len(&self) -> usize {
        self.table.visible_len()
    }

    fn page(&self) -> usize {
        self.table.page()
    }

    fn page_count(&self) -> usize {
        self.table.page_count()
    }

    fn select_next(&mut self) {
        self.table.select_next();
    }

    fn select_prev(&mut self) {
        self.table.select_prev();
    }

    fn next_page(&mut self) {
        self.table.next_page();
    }

    fn prev_page(&mut self) {
        self.table.prev_page();
    }

    fn filter(&self, key: &str) -> Selection {
        self.table.filter(key)
    }

    fn cycle_filter(&mut self, key: &str) -> Selection {
        self.table.cycle_filter(key)
    }

    fn cycle_sort(&mut self) -> Option<SortSpec> {
        self.table.cycle_sort()
    }

    fn push_search(&mut self, ch: char) {
        self.table.push_search(ch);
    }

    fn pop_search(&mut self) {
        self.table.pop_search();
    }

    fn set_search(&mut self, text: &str) {
        self.table.set_search(text);
    }

    fn clear(&mut self) {
        self.table.clear_filters();
    }

    fn reload(&mut self, data: &Dataset) {
        self.table.set_records(R::rows(data));
    }
}

/// Main application state.
pub struct App {
    /// Active role
    pub role: Role,
    /// One pane per visible report, in tab order
    pub panes: Vec<Box<dyn Pane>>,
    /// Index of the active pane
    pub active: usize,
    /// Current UI mode
    pub mode: UiMode,
    /// Index into the active pane's filter columns
    pub filter_cursor: usize,
    /// Status message to display
    pub status_message: Option<String>,
    /// Directory rows are reloaded from
    pub data_dir: Option<PathBuf>,
}

impl App {
    /// Create application state for a role.
    ///
    /// # Arguments
    /// * `data` - Record collections
    /// * `config` - Role, page size and view presets
    /// * `data_dir` - Directory used by [`App::reload`]
    ///
    /// # Details
    /// Builds a pane for every report the role may view and applies the
    /// configured preset to each.
    pub fn new(data: &Dataset, config: &Config, data_dir: Option<PathBuf>) -> Self {
        let role = config.role;
        let panes: Vec<Box<dyn Pane>> = role
            .reports()
            .iter()
            .map(|&report| build_pane(report, data, config))
            .collect();

        let active = config
            .default_report
            .and_then(|wanted| panes.iter().position(|p| p.report() == wanted))
            .unwrap_or(0);

        log::info!(
            "event=app_init role={} reports={} active={}",
            role,
            panes.len(),
            active
        );

        Self {
            role,
            panes,
            active,
            mode: UiMode::List,
            filter_cursor: 0,
            status_message: None,
            data_dir,
        }
    }

    /// The active pane.
    pub fn pane(&self) -> &dyn Pane {
        self.panes[self.active].as_ref()
    }

    fn pane_mut(&mut self) -> &mut dyn Pane {
        self.panes[self.active].as_mut()
    }

    pub fn active_report(&self) -> Report {
        self.pane().report()
    }

    /// Switch to the next tab, wrapping.
    pub fn next_tab(&mut self) {
        self.active = (self.active + 1) % self.panes.len();
        self.on_tab_changed();
    }

    /// Switch to the previous tab, wrapping.
    pub fn prev_tab(&mut self) {
        self.active = if self.active == 0 {
            self.panes.len() - 1
        } else {
            self.active - 1
        };
        self.on_tab_changed();
    }

    /// Switch to a report's tab if the role can see it.
    pub fn switch_to(&mut self, report: Report) -> bool {
        if !self.role.can_view(report) {
            self.set_status(format!(
                "{} is not available to the {} role",
                report.title(),
                self.role
            ));
            return false;
        }
        match self.panes.iter().position(|p| p.report() == report) {
            Some(index) => {
                self.active = index;
                self.on_tab_changed();
                true
            }
            None => false,
        }
    }

    /// Re-read every report from the data directory.
    ///
    /// # Details
    /// Queries and selections survive; on failure the current rows stay
    /// and the error is shown in the status line.
    pub fn reload(&mut self) {
        match Dataset::load(self.data_dir.as_deref()) {
            Ok(data) => {
                for pane in &mut self.panes {
                    pane.reload(&data);
                }
                log::info!("event=data_reload status=ok");
                self.set_status("Data reloaded".to_string());
            }
            Err(e) => {
                log::warn!("event=data_reload status=error error={}", e);
                self.set_status(format!("Reload failed: {}", e));
            }
        }
    }

    fn on_tab_changed(&mut self) {
        self.filter_cursor = 0;
        if self.mode == UiMode::Detail {
            self.mode = UiMode::List;
        }
        log::debug!("event=tab_switch report={:?}", self.active_report());
    }

    pub fn move_up(&mut self) {
        self.pane_mut().select_prev();
    }

    pub fn move_down(&mut self) {
        self.pane_mut().select_next();
    }

    pub fn next_page(&mut self) {
        self.pane_mut().next_page();
    }

    pub fn prev_page(&mut self) {
        self.pane_mut().prev_page();
    }

    /// Add a character to the search text.
    ///
    /// # Details
    /// Only works in Search mode.
    pub fn add_search_char(&mut self, ch: char) {
        if self.mode == UiMode::Search {
            self.pane_mut().push_search(ch);
        }
    }

    /// Remove the last character of the search text.
    ///
    /// # Details
    /// Only works in Search mode.
    pub fn remove_search_char(&mut self) {
        if self.mode == UiMode::Search {
            self.pane_mut().pop_search();
        }
    }

    /// Drop the whole search text. Only works in Search mode.
    pub fn clear_search(&mut self) {
        if self.mode == UiMode::Search {
            self.pane_mut().set_search("");
        }
    }

    /// Filter column under the cursor.
    pub fn filter_column(&self) -> Option<&'static Column> {
        self.pane().filter_columns().get(self.filter_cursor).copied()
    }

    /// Move the filter cursor right, wrapping.
    pub fn next_filter_column(&mut self) {
        let count = self.pane().filter_columns().len();
        if count > 0 {
            self.filter_cursor = (self.filter_cursor + 1) % count;
        }
    }

    /// Move the filter cursor left, wrapping.
    pub fn prev_filter_column(&mut self) {
        let count = self.pane().filter_columns().len();
        if count > 0 {
            self.filter_cursor = (self.filter_cursor + count - 1) % count;
        }
    }

    /// Advance the filter under the cursor to its next value.
    pub fn cycle_filter_value(&mut self) {
        let Some(column) = self.filter_column() else {
            return;
        };
        let selection = self.pane_mut().cycle_filter(column.key);
        let shown = self.pane().visible_len();
        self.set_status(format!("{}: {} ({} rows)", column.label, selection, shown));
    }

    /// Step to the next sort column/direction.
    pub fn cycle_sort(&mut self) {
        let sort = self.pane_mut().cycle_sort();
        self.set_status(format!("Sort: {}", self.sort_label_for(sort.as_ref())));
    }

    /// Current sort as display text.
    pub fn sort_label(&self) -> String {
        self.sort_label_for(self.pane().query().sort.as_ref())
    }

    fn sort_label_for(&self, sort: Option<&SortSpec>) -> String {
        match sort {
            Some(spec) => {
                let label = self
                    .pane()
                    .columns()
                    .iter()
                    .find(|c| c.key == spec.field)
                    .map(|c| c.label)
                    .unwrap_or(spec.field.as_str());
                format!("{} {}", label, spec.direction.arrow())
            }
            None => "none".to_string(),
        }
    }

    /// Reset search, filters and sort of the active pane.
    pub fn clear_view(&mut self) {
        self.pane_mut().clear();
        self.set_status("Filters cleared".to_string());
    }

    /// Open the detail popup for the selected record.
    pub fn view_selected(&mut self) {
        if self.pane().selected_id().is_some() {
            self.mode = UiMode::Detail;
        }
    }

    /// Edit action; records are read-only.
    pub fn request_edit(&mut self) {
        self.reject_action("Edit");
    }

    /// Deactivate action; records are read-only.
    pub fn request_deactivate(&mut self) {
        self.reject_action("Deactivate");
    }

    fn reject_action(&mut self, action: &str) {
        let Some(id) = self.pane().selected_id() else {
            return;
        };
        let report = self.active_report();
        log::info!(
            "event=action_requested action={} report={:?} id={} status=unsupported",
            action.to_ascii_lowercase(),
            report,
            id
        );
        self.set_status(format!(
            "{action} {} #{id}: records are read-only",
            report.title()
        ));
    }

    /// Set status message.
    pub fn set_status(&mut self, message: String) {
        self.status_message = Some(message);
    }
}

fn preset_query(config: &Config, report: Report) -> Query {
    let preset = config.view(report);
    Query {
        filters: preset.filters,
        sort: preset.sort,
        search: String::new(),
    }
}

fn build_pane(report: Report, data: &Dataset, config: &Config) -> Box<dyn Pane> {
    fn boxed<R: DatasetRows + 'static>(
        report: Report,
        data: &Dataset,
        config: &Config,
    ) -> Box<dyn Pane> {
        let query = preset_query(config, report);
        Box::new(ReportPane::<R>::new(report, data, config.page_size, query))
    }

    match report {
        Report::Projects => boxed::<Project>(report, data, config),
        Report::Grievances => boxed::<Grievance>(report, data, config),
        Report::Polls => boxed::<Poll>(report, data, config),
        Report::Budget => boxed::<BudgetLine>(report, data, config),
        Report::Users => boxed::<User>(report, data, config),
        Report::Logs => boxed::<ActivityLog>(report, data, config),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ViewPreset;
    use crate::table::query::Direction;

    fn app_for(role: Role) -> App {
        let config = Config {
            role,
            ..Config::default()
        };
        App::new(&Dataset::sample().unwrap(), &config, None)
    }

    #[test]
    fn test_app_new_builds_role_panes() {
        let app = app_for(Role::Citizen);
        let reports: Vec<Report> = app.panes.iter().map(|p| p.report()).collect();
        assert_eq!(reports, Role::Citizen.reports());
        assert_eq!(app.mode, UiMode::List);
        assert_eq!(app.active, 0);
    }

    #[test]
    fn test_presets_and_default_report_applied() {
        let mut config = Config {
            default_report: Some(Report::Projects),
            ..Config::default()
        };
        config.views.insert(
            Report::Projects,
            ViewPreset {
                filters: [("status".to_string(), Selection::from("Completed"))].into(),
                sort: Some(SortSpec::new("start_date", Direction::Descending)),
            },
        );
        let app = App::new(&Dataset::sample().unwrap(), &config, None);

        assert_eq!(app.active_report(), Report::Projects);
        let ids: Vec<u32> = app.pane().page_rows().iter().map(|r| r.id).collect();
        assert_eq!(ids, vec![3, 8]);
        assert_eq!(app.sort_label(), "Start ▼");
    }

    #[test]
    fn test_default_report_hidden_from_role_falls_back() {
        let config = Config {
            role: Role::Citizen,
            default_report: Some(Report::Users),
            ..Config::default()
        };
        let app = App::new(&Dataset::sample().unwrap(), &config, None);
        assert_eq!(app.active, 0);
    }

    #[test]
    fn test_tab_switching_wraps() {
        let mut app = app_for(Role::Mla);
        app.prev_tab();
        assert_eq!(app.active_report(), Report::Budget);
        app.next_tab();
        assert_eq!(app.active_report(), Report::Projects);
        assert!(!app.switch_to(Report::Users));
        assert!(app.status_message.as_deref().unwrap().contains("not available"));
        assert!(app.switch_to(Report::Polls));
        assert_eq!(app.active_report(), Report::Polls);
    }

    #[test]
    fn test_reload_swaps_rows_and_keeps_query() {
        let temp_dir = tempfile::TempDir::new().unwrap();
        let config = Config {
            role: Role::Citizen,
            default_report: Some(Report::Polls),
            ..Config::default()
        };
        let mut app = App::new(
            &Dataset::sample().unwrap(),
            &config,
            Some(temp_dir.path().to_path_buf()),
        );
        app.cycle_sort();
        assert_eq!(app.pane().visible_len(), 4);

        std::fs::write(
            temp_dir.path().join("polls.json"),
            r#"[{ "id": 7, "question": "New?", "audience": "Youth", "votes": 1, "status": "Active", "ends_on": "2025-01-01" }]"#,
        )
        .unwrap();
        app.reload();

        assert_eq!(app.status_message.as_deref(), Some("Data reloaded"));
        assert_eq!(app.pane().visible_len(), 1);
        assert_eq!(app.pane().selected_id(), Some(7));
        assert_eq!(app.sort_label(), "ID ▲");
    }

    #[test]
    fn test_failed_reload_keeps_rows() {
        let temp_dir = tempfile::TempDir::new().unwrap();
        std::fs::write(temp_dir.path().join("projects.json"), "[oops").unwrap();
        let mut app = App::new(
            &Dataset::sample().unwrap(),
            &Config::default(),
            Some(temp_dir.path().to_path_buf()),
        );
        app.reload();
        assert!(app.status_message.as_deref().unwrap().starts_with("Reload failed"));
        assert_eq!(app.pane().visible_len(), 8);
    }

    #[test]
    fn test_search_only_in_search_mode() {
        let mut app = app_for(Role::Admin);
        app.add_search_char('z');
        assert!(app.pane().query().search.is_empty());

        app.mode = UiMode::Search;
        app.add_search_char('z');
        app.add_search_char('z');
        assert_eq!(app.pane().visible_len(), 0);
        app.remove_search_char();
        app.remove_search_char();
        assert_eq!(app.pane().visible_len(), 8);
    }

    #[test]
    fn test_clear_search_drops_whole_text() {
        let mut app = app_for(Role::Admin);
        app.mode = UiMode::Search;
        for ch in "zzz".chars() {
            app.add_search_char(ch);
        }
        assert_eq!(app.pane().visible_len(), 0);
        app.clear_search();
        assert!(app.pane().query().search.is_empty());
        assert_eq!(app.pane().visible_len(), 8);
    }

    #[test]
    fn test_filter_cursor_cycles_enum_columns() {
        let mut app = app_for(Role::Admin);
        let columns = app.pane().filter_columns();
        assert!(columns.iter().all(|c| c.kind == FieldKind::Enum));
        assert_eq!(app.filter_column().map(|c| c.key), Some("category"));

        app.next_filter_column();
        assert_eq!(app.filter_column().map(|c| c.key), Some("status"));
        app.next_filter_column();
        assert_eq!(app.filter_column().map(|c| c.key), Some("category"));
        app.prev_filter_column();
        assert_eq!(app.filter_column().map(|c| c.key), Some("status"));

        app.cycle_filter_value();
        assert_eq!(
            app.pane().filter("status"),
            Selection::Value("Ongoing".to_string())
        );
        assert_eq!(app.pane().visible_len(), 3);
        assert!(app.status_message.as_deref().unwrap().contains("3 rows"));
    }

    #[test]
    fn test_tab_change_resets_filter_cursor_and_detail() {
        let mut app = app_for(Role::Admin);
        app.next_filter_column();
        app.view_selected();
        assert_eq!(app.mode, UiMode::Detail);
        app.next_tab();
        assert_eq!(app.filter_cursor, 0);
        assert_eq!(app.mode, UiMode::List);
    }

    #[test]
    fn test_view_selected_requires_a_row() {
        let mut app = app_for(Role::Admin);
        app.mode = UiMode::Search;
        for ch in "zzz".chars() {
            app.add_search_char(ch);
        }
        app.mode = UiMode::List;
        app.view_selected();
        assert_eq!(app.mode, UiMode::List);
    }

    #[test]
    fn test_detail_lists_every_column() {
        let mut app = app_for(Role::Admin);
        app.move_down();
        let detail = app.pane().selected_detail().unwrap();
        assert_eq!(detail.len(), app.pane().columns().len());
        assert_eq!(detail[0], ("ID", "2".to_string()));
    }

    #[test]
    fn test_actions_are_read_only() {
        let mut app = app_for(Role::Admin);
        app.request_deactivate();
        let status = app.status_message.clone().unwrap();
        assert!(status.contains("Deactivate Projects #1"));
        assert!(status.contains("read-only"));
        assert_eq!(app.pane().visible_len(), 8);
    }

    #[test]
    fn test_cycle_sort_and_clear() {
        let mut app = app_for(Role::Admin);
        app.cycle_sort();
        assert_eq!(app.sort_label(), "ID ▲");
        app.cycle_sort();
        let ids: Vec<u32> = app.pane().page_rows().iter().map(|r| r.id).collect();
        assert_eq!(ids.first(), Some(&8));
        app.clear_view();
        assert_eq!(app.sort_label(), "none");
    }
}
