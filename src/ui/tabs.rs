//! Tabs widget rendering.
//!
//! Displays one tab per report visible to the active role.

use crate::app::App;
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Widget},
};

/// Render the tabs widget.
///
/// # Arguments
/// * `app` - Application state
/// * `area` - Area to render in
/// * `buf` - Buffer to render to
///
/// # Details
/// Tabs are laid out horizontally in role order with the active one
/// highlighted. The block title shows the active role.
pub fn render_tabs(app: &App, area: Rect, buf: &mut Buffer) {
    let mut spans = Vec::new();
    for (i, pane) in app.panes.iter().enumerate() {
        let is_active = i == app.active;
        let style = if is_active {
            Style::default()
                .fg(Color::Yellow)
                .bg(Color::Blue)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(Color::Gray)
        };

        if i > 0 {
            spans.push(Span::styled(" | ", Style::default().fg(Color::DarkGray)));
        }

        let label = pane.report().title();
        let tab_text = if is_active {
            format!("▶ {} ◀", label)
        } else {
            format!("  {}  ", label)
        };
        spans.push(Span::styled(tab_text, style));
    }

    let paragraph = Paragraph::new(Line::from(spans))
        .block(
            Block::default()
                .title(format!("Dashboard [{}]", app.role))
                .borders(Borders::ALL),
        )
        .alignment(ratatui::layout::Alignment::Center);

    Widget::render(paragraph, area, buf);
}
