//! Color mapping for plot lines.

use ratatui::style::Color;

/// Palette used to color the lines of a plot page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SeriesPalette {
    /// Viridis colormap (perceptually uniform, colorblind-friendly).
    #[default]
    Viridis,
    /// Plasma colormap (perceptually uniform).
    Plasma,
    /// Rainbow/Spectral colormap (traditional, high contrast).
    Rainbow,
}

impl SeriesPalette {
    /// Get the next palette in cycle.
    pub fn next(self) -> Self {
        match self {
            Self::Viridis => Self::Plasma,
            Self::Plasma => Self::Rainbow,
            Self::Rainbow => Self::Viridis,
        }
    }

    /// Get palette name.
    pub fn name(self) -> &'static str {
        match self {
            Self::Viridis => "Viridis",
            Self::Plasma => "Plasma",
            Self::Rainbow => "Rainbow",
        }
    }

    /// Map a normalized value (0.0 to 1.0) to an RGB color.
    pub fn color(self, t: f64) -> Color {
        let t = t.clamp(0.0, 1.0);

        match self {
            Self::Viridis => viridis_color(t),
            Self::Plasma => plasma_color(t),
            Self::Rainbow => rainbow_color(t),
        }
    }

    /// Color of line `index` out of `count`, spread evenly over the palette.
    pub fn series_color(self, index: usize, count: usize) -> Color {
        if count <= 1 {
            return self.color(0.5);
        }
        // Keep away from the darkest end, which vanishes on dark themes.
        let t = 0.15 + 0.85 * index as f64 / (count - 1) as f64;
        self.color(t)
    }
}

/// Linear interpolation through a midpoint: `start` at 0, `mid` at 0.5, `end` at 1.
fn two_segment(t: f64, start: f64, mid: f64, end: f64) -> f64 {
    if t < 0.5 {
        start + t * 2.0 * (mid - start)
    } else {
        mid + (t - 0.5) * 2.0 * (end - mid)
    }
}

/// Viridis colormap approximation.
fn viridis_color(t: f64) -> Color {
    Color::Rgb(
        two_segment(t, 68.0, 33.0, 253.0) as u8,
        two_segment(t, 1.0, 104.0, 231.0) as u8,
        two_segment(t, 84.0, 109.0, 37.0) as u8,
    )
}

/// Plasma colormap approximation.
fn plasma_color(t: f64) -> Color {
    Color::Rgb(
        two_segment(t, 13.0, 180.0, 240.0) as u8,
        two_segment(t, 8.0, 54.0, 175.0) as u8,
        two_segment(t, 135.0, 121.0, 12.0) as u8,
    )
}

/// Rainbow colormap.
fn rainbow_color(t: f64) -> Color {
    // HSV to RGB with H from 240° (blue) down to 0° (red), full saturation and value
    let h = (1.0 - t) * 240.0;
    let x = 1.0 - ((h / 60.0) % 2.0 - 1.0).abs();

    let (r, g, b) = if h < 60.0 {
        (1.0, x, 0.0)
    } else if h < 120.0 {
        (x, 1.0, 0.0)
    } else if h < 180.0 {
        (0.0, 1.0, x)
    } else {
        (0.0, x, 1.0)
    };

    Color::Rgb((r * 255.0) as u8, (g * 255.0) as u8, (b * 255.0) as u8)
}
