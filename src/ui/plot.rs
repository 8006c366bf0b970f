//! Plot page rendering - pure rendering layer over the current group.

use super::formatters::{format_axis_label, format_value, truncate_to_width};
use super::{table, ThemeColors};
use crate::app::{App, ViewMode};
use crate::navigator::stats::{aggregate, r_squared, AggregatePoint};
use crate::navigator::{ObservableSeries, PlotGroup};
use crate::util::layout_config::PlotLayoutConfig;
use crate::util::SeriesPalette;
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    symbols::Marker,
    text::{Line, Span},
    widgets::{Axis, Block, Borders, Chart, Dataset, GraphType, Paragraph, Wrap},
    Frame,
};

type Points = Vec<(f64, f64)>;

/// Error bar drawn around replicate means.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Spread {
    /// Standard deviation.
    Sd,
    /// Standard error of the mean.
    Sem,
}

impl Spread {
    fn of(self, point: &AggregatePoint) -> f64 {
        match self {
            Spread::Sd => point.sd,
            Spread::Sem => point.sem,
        }
    }

    fn axis_title(self) -> &'static str {
        match self {
            Spread::Sd => "mean ± SD",
            Spread::Sem => "mean ± SEM",
        }
    }
}

/// Draw one plot page.
pub(super) fn draw_plot_page(
    f: &mut Frame<'_>,
    area: Rect,
    app: &App,
    group: &PlotGroup,
    colors: &ThemeColors,
) {
    let title = format!(
        " Plot {}/{}: {} [{}] ",
        app.navigator.current_index() + 1,
        app.navigator.group_count(),
        group.title(),
        app.view_mode.name()
    );
    let title = truncate_to_width(&title, area.width.saturating_sub(2) as usize);

    let block = Block::default()
        .title(title)
        .title_style(Style::default().fg(colors.heading).add_modifier(Modifier::BOLD))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(colors.border))
        .style(Style::default().bg(colors.bg));
    let inner = block.inner(area);
    f.render_widget(block, area);

    if app.view_mode == ViewMode::Table {
        table::draw_table(f, inner, app, group, colors);
        return;
    }

    let plot_cfg = &app.layout.plot;
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(3), Constraint::Length(plot_cfg.legend_height)])
        .split(inner);

    let series = group.series();
    match app.view_mode {
        ViewMode::Series => draw_series(f, chunks[0], &series, app.palette, plot_cfg, colors),
        ViewMode::MeanSd => {
            draw_mean(f, chunks[0], &series, Spread::Sd, app.palette, plot_cfg, colors)
        },
        ViewMode::MeanSem => {
            draw_mean(f, chunks[0], &series, Spread::Sem, app.palette, plot_cfg, colors)
        },
        ViewMode::Correlation => {
            draw_correlation(f, chunks[0], &series, app.palette, plot_cfg, colors)
        },
        ViewMode::Table => {},
    }

    draw_legend(f, chunks[1], group, &series, app.palette, colors);
}

/// Measurements as points, simulations as lines, numeric noise as bars.
fn draw_series(
    f: &mut Frame<'_>,
    area: Rect,
    series: &[ObservableSeries],
    palette: SeriesPalette,
    cfg: &PlotLayoutConfig,
    colors: &ThemeColors,
) {
    let steady = steady_state_x(series);
    let mut measured: Vec<Points> = Vec::with_capacity(series.len());
    let mut simulated: Vec<Points> = Vec::with_capacity(series.len());
    let mut bars: Vec<(usize, Points)> = Vec::new();

    for (i, s) in series.iter().enumerate() {
        measured.push(
            s.points
                .iter()
                .filter(|p| p.measured.is_finite())
                .map(|p| (plot_x(p.x, steady), p.measured))
                .collect(),
        );
        simulated.push(line_points(
            s.points
                .iter()
                .filter_map(|p| p.simulated.map(|v| (plot_x(p.x, steady), v))),
        ));
        for p in &s.points {
            if let Some(noise) = p.noise {
                let x = plot_x(p.x, steady);
                bars.push((i, vec![(x, p.measured - noise), (x, p.measured + noise)]));
            }
        }
    }

    let mut datasets = Vec::new();
    for (i, (m, s)) in measured.iter().zip(&simulated).enumerate() {
        let color = palette.series_color(i, series.len());
        datasets.push(scatter(m, color));
        datasets.push(line(s, color, Marker::Braille));
    }
    for (i, bar) in &bars {
        datasets.push(line(bar, palette.series_color(*i, series.len()), Marker::Dot));
    }

    let all = measured.iter().chain(&simulated).chain(bars.iter().map(|(_, b)| b));
    let (x_bounds, y_bounds) = bounds(all, cfg.axis_padding_factor);
    render_chart(f, area, datasets, x_bounds, y_bounds, "time", "value", colors);
}

/// Replicate means with `spread` error bars.
fn draw_mean(
    f: &mut Frame<'_>,
    area: Rect,
    series: &[ObservableSeries],
    spread: Spread,
    palette: SeriesPalette,
    cfg: &PlotLayoutConfig,
    colors: &ThemeColors,
) {
    let steady = steady_state_x(series);
    let mut means: Vec<Points> = Vec::new();
    let mut simulated: Vec<Points> = Vec::new();
    let mut bars: Vec<(usize, Points)> = Vec::new();

    for (i, s) in series.iter().enumerate() {
        let agg = aggregate(s);
        means.push(agg.iter().map(|a| (plot_x(a.x, steady), a.mean)).collect());
        simulated.push(line_points(
            agg.iter()
                .filter_map(|a| a.simulated.map(|v| (plot_x(a.x, steady), v))),
        ));
        for a in agg.iter().filter(|a| a.n > 1 && spread.of(a) > 0.0) {
            let x = plot_x(a.x, steady);
            let half = spread.of(a);
            bars.push((i, vec![(x, a.mean - half), (x, a.mean + half)]));
        }
    }

    // Caps need the x range, which depends on every line.
    let (x_bounds, _) = bounds(means.iter().chain(&simulated), cfg.axis_padding_factor);
    let cap = (x_bounds[1] - x_bounds[0]) * cfg.cap_width_factor;
    let caps: Vec<(usize, Points)> = bars
        .iter()
        .flat_map(|(i, bar)| {
            bar.iter()
                .map(move |&(x, y)| (*i, vec![(x - cap, y), (x + cap, y)]))
        })
        .collect();

    let mut datasets = Vec::new();
    for (i, (m, s)) in means.iter().zip(&simulated).enumerate() {
        let color = palette.series_color(i, series.len());
        datasets.push(line(m, color, Marker::Braille));
        datasets.push(scatter(m, color));
        datasets.push(line(s, color, Marker::Dot));
    }
    for (i, segment) in bars.iter().chain(&caps) {
        datasets.push(line(segment, palette.series_color(*i, series.len()), Marker::Braille));
    }

    let all = means
        .iter()
        .chain(&simulated)
        .chain(bars.iter().map(|(_, b)| b));
    let (x_bounds, y_bounds) = bounds(all, cfg.axis_padding_factor);
    render_chart(f, area, datasets, x_bounds, y_bounds, "time", spread.axis_title(), colors);
}

/// Measured against simulated values, with the identity line.
fn draw_correlation(
    f: &mut Frame<'_>,
    area: Rect,
    series: &[ObservableSeries],
    palette: SeriesPalette,
    cfg: &PlotLayoutConfig,
    colors: &ThemeColors,
) {
    let pairs: Vec<Points> = series
        .iter()
        .map(|s| {
            s.points
                .iter()
                .filter_map(|p| p.simulated.map(|sim| (p.measured, sim)))
                .collect()
        })
        .collect();

    if pairs.iter().all(|p| p.is_empty()) {
        let para = Paragraph::new("No simulations matched this plot")
            .style(Style::default().fg(colors.text))
            .alignment(Alignment::Center);
        f.render_widget(para, area);
        return;
    }

    let (x_bounds, y_bounds) = bounds(pairs.iter(), cfg.axis_padding_factor);
    let lo = x_bounds[0].min(y_bounds[0]);
    let hi = x_bounds[1].max(y_bounds[1]);
    let identity = vec![(lo, lo), (hi, hi)];

    let mut datasets = vec![line(&identity, colors.reference, Marker::Braille)];
    for (i, p) in pairs.iter().enumerate() {
        datasets.push(scatter(p, palette.series_color(i, series.len())));
    }

    render_chart(f, area, datasets, [lo, hi], [lo, hi], "measurement", "simulation", colors);
}

fn draw_legend(
    f: &mut Frame<'_>,
    area: Rect,
    group: &PlotGroup,
    series: &[ObservableSeries],
    palette: SeriesPalette,
    colors: &ThemeColors,
) {
    let mut entries: Vec<Span<'_>> = Vec::new();
    for (i, s) in series.iter().enumerate() {
        entries.push(Span::styled(
            format!("● {}  ", s.label),
            Style::default().fg(palette.series_color(i, series.len())),
        ));
    }

    let mut summary = format!("{} measurements", group.len());
    if group.has_simulations() {
        let (m, s): (Vec<f64>, Vec<f64>) = group.correlation_pairs().into_iter().unzip();
        summary.push_str(&format!(
            ", {} simulations, R² = {}",
            group.simulations.len(),
            format_value(r_squared(&m, &s))
        ));
    } else {
        summary.push_str(", no simulations");
    }
    if series
        .iter()
        .flat_map(|s| &s.points)
        .any(|p| !p.x.is_finite())
    {
        summary.push_str(", steady state drawn right of the last time point");
    }

    let lines = vec![
        Line::from(entries),
        Line::from(Span::styled(summary, Style::default().fg(colors.label))),
    ];
    let paragraph = Paragraph::new(lines).wrap(Wrap { trim: true });
    f.render_widget(paragraph, area);
}

#[allow(clippy::too_many_arguments)]
fn render_chart(
    f: &mut Frame<'_>,
    area: Rect,
    datasets: Vec<Dataset<'_>>,
    x_bounds: [f64; 2],
    y_bounds: [f64; 2],
    x_title: &str,
    y_title: &str,
    colors: &ThemeColors,
) {
    let labels = |[lo, hi]: [f64; 2]| {
        vec![
            format_axis_label(lo),
            format_axis_label((lo + hi) / 2.0),
            format_axis_label(hi),
        ]
    };

    let x_axis = Axis::default()
        .title(x_title.to_string())
        .style(Style::default().fg(colors.axis))
        .bounds(x_bounds)
        .labels(labels(x_bounds));
    let y_axis = Axis::default()
        .title(y_title.to_string())
        .style(Style::default().fg(colors.axis))
        .bounds(y_bounds)
        .labels(labels(y_bounds));

    let chart = Chart::new(datasets)
        .x_axis(x_axis)
        .y_axis(y_axis)
        .legend_position(None);

    f.render_widget(chart, area);
}

fn scatter(data: &[(f64, f64)], color: Color) -> Dataset<'_> {
    Dataset::default()
        .marker(Marker::Dot)
        .graph_type(GraphType::Scatter)
        .style(Style::default().fg(color))
        .data(data)
}

fn line(data: &[(f64, f64)], color: Color, marker: Marker) -> Dataset<'_> {
    Dataset::default()
        .marker(marker)
        .graph_type(GraphType::Line)
        .style(Style::default().fg(color))
        .data(data)
}

/// Sort by x and keep one point per x, so lines do not zigzag over replicates.
fn line_points(points: impl Iterator<Item = (f64, f64)>) -> Points {
    let mut points: Points = points.filter(|(_, y)| y.is_finite()).collect();
    points.sort_by(|a, b| a.0.total_cmp(&b.0));
    points.dedup_by(|a, b| a.0 == b.0);
    points
}

/// X position used for steady-state (`inf`) time points.
fn steady_state_x(series: &[ObservableSeries]) -> f64 {
    let max = series
        .iter()
        .flat_map(|s| &s.points)
        .map(|p| p.x)
        .filter(|x| x.is_finite())
        .fold(f64::NEG_INFINITY, f64::max);
    if max.is_finite() && max > 0.0 {
        max * 1.1
    } else if max.is_finite() {
        max + 1.0
    } else {
        1.0
    }
}

fn plot_x(x: f64, steady: f64) -> f64 {
    if x.is_finite() {
        x
    } else {
        steady
    }
}

/// Padded axis bounds over every finite point.
fn bounds<'a>(sets: impl Iterator<Item = &'a Points>, padding: f64) -> ([f64; 2], [f64; 2]) {
    let mut x = [f64::INFINITY, f64::NEG_INFINITY];
    let mut y = [f64::INFINITY, f64::NEG_INFINITY];
    for &(px, py) in sets.flatten() {
        if px.is_finite() && py.is_finite() {
            x = [x[0].min(px), x[1].max(px)];
            y = [y[0].min(py), y[1].max(py)];
        }
    }
    (padded(x, padding), padded(y, padding))
}

fn padded([lo, hi]: [f64; 2], factor: f64) -> [f64; 2] {
    if !lo.is_finite() || !hi.is_finite() {
        return [0.0, 1.0];
    }
    let span = hi - lo;
    if span == 0.0 {
        let half = if lo == 0.0 { 1.0 } else { lo.abs() * 0.1 };
        return [lo - half, hi + half];
    }
    [lo - span * factor, hi + span * factor]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::navigator::SeriesPoint;

    fn series(xs: &[f64]) -> Vec<ObservableSeries> {
        vec![ObservableSeries {
            label: "obs".to_string(),
            points: xs
                .iter()
                .map(|&x| SeriesPoint {
                    x,
                    measured: 1.0,
                    simulated: None,
                    noise: None,
                })
                .collect(),
        }]
    }

    #[test]
    fn steady_state_is_placed_after_last_time() {
        assert_eq!(steady_state_x(&series(&[0.0, 10.0, f64::INFINITY])), 11.0);
        assert_eq!(steady_state_x(&series(&[0.0, f64::INFINITY])), 1.0);
        assert_eq!(steady_state_x(&series(&[f64::INFINITY])), 1.0);
    }

    #[test]
    fn padding_handles_flat_and_empty_ranges() {
        assert_eq!(padded([0.0, 10.0], 0.1), [-1.0, 11.0]);
        assert_eq!(padded([5.0, 5.0], 0.1), [4.5, 5.5]);
        assert_eq!(padded([0.0, 0.0], 0.1), [-1.0, 1.0]);
        assert_eq!(padded([f64::INFINITY, f64::NEG_INFINITY], 0.1), [0.0, 1.0]);
    }

    #[test]
    fn line_points_sort_and_dedup() {
        let pts = line_points(vec![(2.0, 1.0), (0.0, 3.0), (2.0, 5.0), (1.0, f64::NAN)].into_iter());
        assert_eq!(pts, vec![(0.0, 3.0), (2.0, 1.0)]);
    }

    #[test]
    fn spread_picks_sd_or_sem() {
        let mut s = series(&[0.0, 0.0, 0.0, 0.0]);
        for (p, v) in s[0].points.iter_mut().zip([1.0, 3.0, 1.0, 3.0]) {
            p.measured = v;
        }
        let agg = aggregate(&s[0]);
        assert_eq!(Spread::Sd.of(&agg[0]), 1.0);
        assert_eq!(Spread::Sem.of(&agg[0]), 0.5);
        assert_eq!(Spread::Sem.axis_title(), "mean ± SEM");
    }

    #[test]
    fn bounds_skip_non_finite_points() {
        let sets = vec![vec![(0.0, 1.0), (f64::INFINITY, 2.0)], vec![(4.0, 3.0)]];
        let (x, y) = bounds(sets.iter(), 0.0);
        assert_eq!(x, [0.0, 4.0]);
        assert_eq!(y, [1.0, 3.0]);
    }
}
