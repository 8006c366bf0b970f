//! User interface rendering.

mod bars;
mod formatters;
mod plot;
mod table;
mod theme;
mod warnings;

use crate::app::App;
use crate::file_browser;
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

pub use theme::ThemeColors;

/// Draw the UI.
pub fn draw(f: &mut Frame<'_>, app: &mut App) {
    let colors = ThemeColors::from_theme(&app.theme);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(1),
            Constraint::Length(1),
            Constraint::Length(1),
        ])
        .split(f.area());

    if app.file_browser_mode {
        file_browser::ui::draw_file_browser(
            f,
            &mut app.file_browser,
            &app.browser_stage,
            chunks[0],
            &colors,
        );
    } else if let Some(group) = app.current_group() {
        plot::draw_plot_page(f, chunks[0], app, group, &colors);
    } else {
        draw_welcome(f, chunks[0], &colors);
    }

    bars::draw_status(f, app, chunks[1], &colors);
    bars::draw_keymap(f, app, chunks[2], &colors);

    if app.show_warnings {
        warnings::draw_warnings(f, app, &colors);
    }
}

fn draw_welcome(f: &mut Frame<'_>, area: Rect, colors: &ThemeColors) {
    let lines = vec![
        Line::from(""),
        Line::from(Span::styled(
            "petabvis",
            Style::default()
                .fg(colors.heading)
                .add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        Line::from("No measurement table loaded"),
        Line::from("Press o to open one, q to quit"),
    ];

    let paragraph = Paragraph::new(lines)
        .alignment(Alignment::Center)
        .style(Style::default().fg(colors.text).bg(colors.bg))
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(colors.border)),
        );
    f.render_widget(paragraph, area);
}
