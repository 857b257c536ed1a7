//! Stat cards above the table.

use crate::app::App;
use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Layout, Rect},
    style::{Color, Modifier, Style},
    text::Line,
    widgets::{Block, Borders, Paragraph, Widget},
};

const MAX_CARDS: usize = 6;

/// Render count cards for the active report.
///
/// # Details
/// Cards: total rows, rows currently shown, then one per summary value
/// (usually status), capped to fit the width.
pub fn render_summary(app: &App, area: Rect, buf: &mut Buffer) {
    let summary = app.pane().summary();

    let mut cards: Vec<(String, usize, Color)> = vec![
        ("Total".to_string(), summary.total, Color::White),
        ("Showing".to_string(), summary.visible, Color::Cyan),
    ];
    cards.extend(
        summary
            .by_value
            .into_iter()
            .take(MAX_CARDS - cards.len())
            .map(|(label, count)| (label, count, Color::Green)),
    );

    let chunks = Layout::horizontal(vec![Constraint::Fill(1); cards.len()]).split(area);
    for ((label, count, color), chunk) in cards.into_iter().zip(chunks.iter()) {
        let card = Paragraph::new(Line::from(count.to_string()))
            .style(Style::default().fg(color).add_modifier(Modifier::BOLD))
            .alignment(ratatui::layout::Alignment::Center)
            .block(Block::default().title(label).borders(Borders::ALL));
        Widget::render(card, *chunk, buf);
    }
}
