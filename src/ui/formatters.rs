//! Shared number formatting for UI components.

/// Format a value with smart precision.
pub(super) fn format_value(val: f64) -> String {
    if !val.is_finite() {
        return if val.is_nan() {
            "NaN".to_string()
        } else if val.is_sign_positive() {
            "inf".to_string()
        } else {
            "-inf".to_string()
        };
    }
    let abs_val = val.abs();
    if abs_val == 0.0 {
        "0".to_string()
    } else if !(1e-3..1e6).contains(&abs_val) {
        format!("{:.3e}", val)
    } else if abs_val >= 100.0 {
        format!("{:.2}", val)
    } else if abs_val >= 1.0 {
        format!("{:.4}", val)
    } else {
        format!("{:.5}", val)
    }
}

/// Format an axis label with smart precision.
pub(super) fn format_axis_label(val: f64) -> String {
    if !val.is_finite() {
        return "?".to_string();
    }
    let abs_val = val.abs();
    if abs_val == 0.0 {
        "0".to_string()
    } else if !(1e-2..1e5).contains(&abs_val) {
        format!("{:.1e}", val)
    } else if abs_val >= 100.0 {
        format!("{:.0}", val)
    } else if abs_val >= 1.0 {
        format!("{:.1}", val)
    } else {
        format!("{:.2}", val)
    }
}

/// Truncate `text` to at most `width` terminal columns, marking the cut with `…`.
pub(super) fn truncate_to_width(text: &str, width: usize) -> String {
    use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

    if text.width() <= width {
        return text.to_string();
    }
    if width == 0 {
        return String::new();
    }

    let mut out = String::new();
    let mut used = 0;
    for c in text.chars() {
        let w = c.width().unwrap_or(0);
        if used + w + 1 > width {
            break;
        }
        out.push(c);
        used += w;
    }
    out.push('…');
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn value_precision_tracks_magnitude() {
        assert_eq!(format_value(0.0), "0");
        assert_eq!(format_value(f64::INFINITY), "inf");
        assert_eq!(format_value(1234.5678), "1234.57");
        assert_eq!(format_value(2.5), "2.5000");
        assert_eq!(format_value(1.0e7), "1.000e7");
    }

    #[test]
    fn axis_labels_are_compact() {
        assert_eq!(format_axis_label(150.4), "150");
        assert_eq!(format_axis_label(0.5), "0.50");
        assert_eq!(format_axis_label(f64::NAN), "?");
    }

    #[test]
    fn truncation_respects_wide_characters() {
        assert_eq!(truncate_to_width("condition", 20), "condition");
        assert_eq!(truncate_to_width("condition", 5), "cond…");
        assert_eq!(truncate_to_width("ａｂｃ", 4), "ａ…");
    }
}
