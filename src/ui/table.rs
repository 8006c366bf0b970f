//! Table view of the rows in the current group.

use super::formatters::{format_value, truncate_to_width};
use super::ThemeColors;
use crate::app::App;
use crate::navigator::PlotGroup;
use ratatui::{
    layout::{Constraint, Rect},
    style::{Modifier, Style},
    widgets::{Cell, Row, Scrollbar, ScrollbarOrientation, ScrollbarState, Table},
    Frame,
};

const HEADERS: [&str; 7] = [
    "observable",
    "condition",
    "time",
    "measurement",
    "simulation",
    "noise",
    "replicate",
];

/// Draw the rows of `group`, starting at `app.table_scroll`.
pub(super) fn draw_table(
    f: &mut Frame<'_>,
    area: Rect,
    app: &App,
    group: &PlotGroup,
    colors: &ThemeColors,
) {
    let cfg = &app.layout.table;
    let id_width = cfg.id_column_width as usize;
    let visible_rows = area.height.saturating_sub(1) as usize;
    let rows_with_sim = group.rows_with_simulation();
    let total_rows = rows_with_sim.len();
    let start_row = app.table_scroll.min(total_rows.saturating_sub(1));

    let rows: Vec<Row<'_>> = rows_with_sim
        .iter()
        .skip(start_row)
        .take(visible_rows)
        .map(|&(row, sim)| {
            let noise = row.noise.as_ref().map(|n| n.to_string()).unwrap_or_default();
            Row::new(vec![
                Cell::from(truncate_to_width(&row.observable_id, id_width))
                    .style(Style::default().fg(colors.label)),
                Cell::from(truncate_to_width(&row.condition_id, id_width))
                    .style(Style::default().fg(colors.label)),
                Cell::from(format_value(row.time)),
                Cell::from(format_value(row.measurement)).style(Style::default().fg(colors.value)),
                Cell::from(sim.map(format_value).unwrap_or_else(|| "-".to_string()))
                    .style(Style::default().fg(colors.value)),
                Cell::from(truncate_to_width(&noise, cfg.column_width as usize)),
                Cell::from(row.replicate_id.clone().unwrap_or_default()),
            ])
        })
        .collect();

    let header = Row::new(HEADERS.iter().map(|h| {
        Cell::from(*h).style(Style::default().fg(colors.heading).add_modifier(Modifier::BOLD))
    }));

    let widths = [
        Constraint::Length(cfg.id_column_width),
        Constraint::Length(cfg.id_column_width),
        Constraint::Length(cfg.column_width),
        Constraint::Length(cfg.column_width),
        Constraint::Length(cfg.column_width),
        Constraint::Length(cfg.column_width),
        Constraint::Min(cfg.column_width),
    ];

    let table = Table::new(rows, widths)
        .header(header)
        .style(Style::default().fg(colors.text).bg(colors.bg));
    f.render_widget(table, area);

    if total_rows > visible_rows {
        let mut scrollbar_state =
            ScrollbarState::new(total_rows.saturating_sub(visible_rows)).position(start_row);
        f.render_stateful_widget(
            Scrollbar::default()
                .orientation(ScrollbarOrientation::VerticalRight)
                .begin_symbol(Some("^"))
                .end_symbol(Some("v")),
            area,
            &mut scrollbar_state,
        );
    }
}
