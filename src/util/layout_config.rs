//! Layout configuration constants for the plot views.

/// Configuration for the table view.
#[derive(Debug, Clone)]
pub struct TableLayoutConfig {
    /// Width of each numeric column in characters.
    pub column_width: u16,
    /// Width of the identifier columns.
    pub id_column_width: u16,
}

impl Default for TableLayoutConfig {
    fn default() -> Self {
        Self {
            column_width: 12,
            id_column_width: 18,
        }
    }
}

/// Configuration for chart views.
#[derive(Debug, Clone)]
pub struct PlotLayoutConfig {
    /// Padding factor for axis bounds (0.15 = 15% margin).
    pub axis_padding_factor: f64,
    /// Width of error bar caps, as a fraction of the x range.
    pub cap_width_factor: f64,
    /// Height of the legend/summary line under the chart.
    pub legend_height: u16,
}

impl Default for PlotLayoutConfig {
    fn default() -> Self {
        Self {
            axis_padding_factor: 0.15,
            cap_width_factor: 0.01,
            legend_height: 2,
        }
    }
}

/// Combined layout configuration for all view modes.
#[derive(Debug, Clone, Default)]
pub struct LayoutConfig {
    /// Configuration for table view.
    pub table: TableLayoutConfig,
    /// Configuration for chart views.
    pub plot: PlotLayoutConfig,
}
