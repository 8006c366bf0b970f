//! Clipboard integration.

use crate::error::Result;
use crate::navigator::PlotGroup;
use arboard::Clipboard;

/// Copy text to clipboard.
pub fn copy_to_clipboard(text: &str) -> Result<()> {
    let mut clipboard = Clipboard::new()?;
    clipboard.set_text(text)?;
    Ok(())
}

/// Copy a plot group to the clipboard as a tab-separated table.
pub fn copy_group(group: &PlotGroup) -> Result<()> {
    copy_to_clipboard(&group_clipboard_text(group)?)
}

fn group_clipboard_text(group: &PlotGroup) -> Result<String> {
    Ok(format!("# {}\n{}", group.title(), group.to_tsv()?))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::MeasurementRow;
    use crate::navigator::{NavigatorConfig, PlotNavigator};

    #[test]
    fn clipboard_text_has_title_and_rows() {
        let mut nav = PlotNavigator::new(NavigatorConfig::default());
        nav.load(&[MeasurementRow::new("c1", "obs", 1.0, 2.5)], None)
            .unwrap();
        let text = group_clipboard_text(nav.current_group().unwrap()).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[0], "# condition c1");
        assert!(lines[1].starts_with("observableId\t"));
        assert_eq!(lines[2], "obs\t\tc1\t1\t2.5\t\t\t\t");
    }
}
