//! Detail popup for the selected record.

use crate::app::App;
use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Flex, Layout, Rect},
    style::{Color, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Widget, Wrap},
};

/// Render the selected record as a centered label/value popup.
///
/// # Details
/// Draws nothing when no record is selected.
pub fn render_detail(app: &App, area: Rect, buf: &mut Buffer) {
    let pane = app.pane();
    let Some(fields) = pane.selected_detail() else {
        return;
    };

    let label_width = fields
        .iter()
        .map(|(label, _)| label.chars().count())
        .max()
        .unwrap_or(0);

    let mut lines: Vec<Line> = fields
        .into_iter()
        .map(|(label, value)| {
            Line::from(vec![
                Span::styled(
                    format!("{:<width$}  ", label, width = label_width),
                    Style::default().fg(Color::Cyan),
                ),
                Span::styled(value, Style::default().fg(Color::White)),
            ])
        })
        .collect();
    lines.push(Line::default());
    lines.push(Line::from(Span::styled(
        "'e' edit, 'd' deactivate, 'Esc' close",
        Style::default().fg(Color::Yellow),
    )));

    let height = (lines.len() as u16).saturating_add(2);
    let popup = centered(area, 60, height);

    let paragraph = Paragraph::new(lines)
        .wrap(Wrap { trim: true })
        .block(
            Block::default()
                .title(format!("{} details", pane.report().title()))
                .borders(Borders::ALL)
                .style(Style::default().fg(Color::Yellow)),
        );

    Widget::render(Clear, popup, buf);
    Widget::render(paragraph, popup, buf);
}

fn centered(area: Rect, percent_x: u16, height: u16) -> Rect {
    let [row] = Layout::vertical([Constraint::Length(height.min(area.height))])
        .flex(Flex::Center)
        .areas(area);
    let [popup] = Layout::horizontal([Constraint::Percentage(percent_x)])
        .flex(Flex::Center)
        .areas(row);
    popup
}
