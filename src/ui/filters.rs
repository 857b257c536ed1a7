//! Filters widget rendering.
//!
//! Displays the filter controls and sort of the active report.

use crate::app::{App, UiMode};
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Widget},
};

/// Render the filters widget.
///
/// # Arguments
/// * `app` - Application state
/// * `area` - Area to render in
/// * `buf` - Buffer to render to
///
/// # Details
/// One line lists every enum column with its selected value; the column
/// under the cursor is underlined while in filters mode. A second line
/// shows the sort, and in filters mode a key hint follows.
pub fn render_filters(app: &App, area: Rect, buf: &mut Buffer) {
    let is_active = app.mode == UiMode::Filters;
    let pane = app.pane();
    let mut lines = vec![];

    let mut spans = Vec::new();
    for (i, column) in pane.filter_columns().iter().enumerate() {
        if i > 0 {
            spans.push(Span::raw("  "));
        }
        let selection = pane.filter(column.key);
        let label_style = if is_active && i == app.filter_cursor {
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD | Modifier::UNDERLINED)
        } else {
            Style::default().fg(Color::Cyan)
        };
        let value_style = if selection.is_all() {
            Style::default().fg(Color::Gray)
        } else {
            Style::default().fg(Color::Green)
        };
        spans.push(Span::styled(format!("{}: ", column.label), label_style));
        spans.push(Span::styled(selection.to_string(), value_style));
    }
    if spans.is_empty() {
        spans.push(Span::styled(
            "No filters for this report",
            Style::default().fg(Color::Gray),
        ));
    }
    lines.push(Line::from(spans));

    lines.push(Line::from(vec![
        Span::styled("Sort: ", Style::default().fg(Color::Cyan)),
        Span::styled(app.sort_label(), Style::default().fg(Color::Magenta)),
    ]));

    if is_active {
        lines.push(Line::from(Span::styled(
            "←/→ choose filter, Space/Enter change value, 's' sort, 'c' clear, 'Esc' or 'f' exit",
            Style::default().fg(Color::Yellow),
        )));
    }

    let active_count = pane
        .query()
        .filters
        .values()
        .filter(|s| !s.is_all())
        .count();
    let title = match (is_active, pane.query().has_active_filters()) {
        (true, _) => "Filters (ACTIVE - press 'Esc' or 'f' to exit)".to_string(),
        (false, true) => format!("Filters: {} applied (press 'f')", active_count),
        (false, false) => "Filters (press 'f')".to_string(),
    };

    let paragraph = Paragraph::new(lines).block(
        Block::default()
            .title(title)
            .borders(Borders::ALL)
            .style(if is_active {
                Style::default().fg(Color::Yellow)
            } else {
                Style::default()
            }),
    );

    Widget::render(paragraph, area, buf);
}
