//! Popup listing the warnings raised while loading.

use super::ThemeColors;
use crate::app::App;
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::Style,
    text::Line,
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame,
};

/// Draw the warning panel over the rest of the screen.
pub(super) fn draw_warnings(f: &mut Frame<'_>, app: &App, colors: &ThemeColors) {
    let area = centered_rect(80, 60, f.area());
    f.render_widget(Clear, area);

    let block = Block::default()
        .title(format!(" Warnings ({}) ", app.warnings.len()))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(colors.warning))
        .style(Style::default().bg(colors.bg));

    let lines: Vec<Line<'_>> = if app.warnings.is_empty() {
        vec![Line::from("No warnings")]
    } else {
        app.warnings
            .lines()
            .into_iter()
            .map(|l| Line::styled(format!("• {}", l), Style::default().fg(colors.warning)))
            .collect()
    };

    let paragraph = Paragraph::new(lines)
        .block(block)
        .style(Style::default().fg(colors.text))
        .wrap(Wrap { trim: false });
    f.render_widget(paragraph, area);
}

/// Helper to create a centered rectangle.
fn centered_rect(percent_x: u16, percent_y: u16, r: Rect) -> Rect {
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(r);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(popup_layout[1])[1]
}
