//! Report table rendering.
//!
//! Displays the current page of the active report with selection
//! highlighting.

use crate::app::App;
use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Rect},
    style::{Color, Modifier, Style},
    widgets::{Block, Borders, Cell, Row, StatefulWidget, Table, TableState, Widget},
};

/// Render the table widget.
///
/// # Arguments
/// * `app` - Application state
/// * `area` - Area to render in
/// * `buf` - Buffer to render to
///
/// # Details
/// Header cells carry the column labels, with an arrow on the sorted
/// column. The title shows shown/total counts and the page position.
pub fn render_table(app: &App, area: Rect, buf: &mut Buffer) {
    let pane = app.pane();
    let summary = pane.summary();
    let sort = pane.query().sort.as_ref();

    let title = format!(
        "{} ({}/{}) - page {}/{}",
        pane.report().title(),
        summary.visible,
        summary.total,
        pane.page() + 1,
        pane.page_count()
    );
    let block = Block::default().title(title).borders(Borders::ALL);

    let rows = pane.page_rows();
    if rows.is_empty() {
        let empty = Table::new(
            vec![Row::new(vec![Cell::from("No records to display")])],
            [Constraint::Fill(1)],
        )
        .block(block);
        Widget::render(empty, area, buf);
        return;
    }

    let columns = pane.columns();
    let header = Row::new(columns.iter().map(|c| {
        let label = match sort {
            Some(spec) if spec.field == c.key => format!("{} {}", c.label, spec.direction.arrow()),
            _ => c.label.to_string(),
        };
        Cell::from(label)
    }))
    .style(
        Style::default()
            .fg(Color::Cyan)
            .add_modifier(Modifier::BOLD),
    )
    .bottom_margin(1);

    let widths: Vec<Constraint> = columns.iter().map(|c| Constraint::Min(c.width)).collect();

    let selected = pane.selected();
    let relative_selected = rows.iter().position(|r| r.position == selected);

    let body: Vec<Row> = rows
        .into_iter()
        .map(|row| Row::new(row.cells.into_iter().map(Cell::from)))
        .collect();

    let table = Table::new(body, widths)
        .header(header)
        .block(block)
        .column_spacing(1)
        .row_highlight_style(
            Style::default()
                .bg(Color::Blue)
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        )
        .highlight_symbol("▶ ");

    let mut state = TableState::default();
    state.select(relative_selected);

    StatefulWidget::render(table, area, buf, &mut state);
}
