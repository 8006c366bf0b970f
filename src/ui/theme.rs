//! Gruvbox colors for the viewer.

use crate::app::Theme;
use ratatui::style::Color;

/// Colors used by every view. Series colors come from the palette instead.
#[derive(Debug, Clone)]
pub struct ThemeColors {
    /// Screen background.
    pub bg: Color,
    /// Body text.
    pub text: Color,
    /// Plot titles and table headers.
    pub heading: Color,
    /// Identifier cells, directories and the legend summary.
    pub label: Color,
    /// Measured and simulated numbers in the table view.
    pub value: Color,
    /// Block borders.
    pub border: Color,
    /// Axis lines and tick labels.
    pub axis: Color,
    /// Identity line of the correlation view.
    pub reference: Color,
    /// Selected row text.
    pub cursor_fg: Color,
    /// Selected row background.
    pub cursor_bg: Color,
    /// Status line text.
    pub status_fg: Color,
    /// Status line background.
    pub status_bg: Color,
    /// Warning panel.
    pub warning: Color,
    /// Failed loads in the status line.
    pub error: Color,
}

impl ThemeColors {
    /// Colors for `theme`.
    pub fn from_theme(theme: &Theme) -> Self {
        match theme {
            Theme::GruvboxDark => Self::gruvbox_dark(),
            Theme::GruvboxLight => Self::gruvbox_light(),
        }
    }

    fn gruvbox_dark() -> Self {
        let fg = Color::Rgb(235, 219, 178);
        let orange = Color::Rgb(254, 128, 25);
        Self {
            bg: Color::Rgb(40, 40, 40),
            text: fg,
            heading: orange,
            label: Color::Rgb(184, 187, 38),
            value: Color::Rgb(131, 165, 152),
            border: Color::Rgb(102, 92, 84),
            axis: Color::Rgb(168, 153, 132),
            reference: Color::Rgb(146, 131, 116),
            cursor_fg: Color::Rgb(40, 40, 40),
            cursor_bg: orange,
            status_fg: fg,
            status_bg: Color::Rgb(60, 56, 54),
            warning: Color::Rgb(250, 189, 47),
            error: Color::Rgb(251, 73, 52),
        }
    }

    fn gruvbox_light() -> Self {
        let fg = Color::Rgb(60, 56, 54);
        let orange = Color::Rgb(175, 58, 3);
        Self {
            bg: Color::Rgb(251, 241, 199),
            text: fg,
            heading: orange,
            label: Color::Rgb(121, 116, 14),
            value: Color::Rgb(7, 102, 120),
            border: Color::Rgb(213, 196, 161),
            axis: Color::Rgb(124, 111, 100),
            reference: Color::Rgb(146, 131, 116),
            cursor_fg: Color::Rgb(251, 241, 199),
            cursor_bg: orange,
            status_fg: fg,
            status_bg: Color::Rgb(235, 219, 178),
            warning: Color::Rgb(181, 118, 20),
            error: Color::Rgb(157, 0, 6),
        }
    }
}
