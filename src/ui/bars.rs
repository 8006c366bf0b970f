//! Status bar and keymap bar.

use super::ThemeColors;
use crate::app::{App, ViewMode};
use ratatui::{layout::Rect, style::Style, widgets::Paragraph, Frame};

/// Draw the status bar.
pub(super) fn draw_status(f: &mut Frame<'_>, app: &App, area: Rect, colors: &ThemeColors) {
    let text = if app.search.is_active() {
        format!("/{}", app.search.buffer())
    } else if let Some(ref digits) = app.goto_buffer {
        format!("Go to plot: {}", digits)
    } else {
        app.status.clone()
    };

    let fg = if app.error_message.is_some() {
        colors.error
    } else {
        colors.status_fg
    };

    let paragraph = Paragraph::new(text).style(Style::default().fg(fg).bg(colors.status_bg));
    f.render_widget(paragraph, area);
}

/// Draw the keymap help bar.
pub(super) fn draw_keymap(f: &mut Frame<'_>, app: &App, area: Rect, colors: &ThemeColors) {
    let keymap_text = if app.file_browser_mode {
        "jk/↑↓:nav | Enter/l:select | h:parent | .:hidden | Esc:skip/close | q:quit"
    } else if app.show_warnings {
        "w/Esc:close warnings"
    } else if app.search.is_active() {
        "Enter:jump | Esc:cancel | Type a plot id"
    } else if app.goto_buffer.is_some() {
        "0-9:page | Enter:go | Esc:cancel"
    } else if app.view_mode == ViewMode::Table {
        "q:quit | ←→/hl:plot | ^d/^u:scroll | Tab:view | /:find | 0-9:go to | y:copy | o:open | w:warnings"
    } else {
        "q:quit | ←→/hl:plot | gg/G:first/last | Tab:view | b:group | /:find | 0-9:go to | c:palette | T:theme | y:copy | o:open | w:warnings"
    };

    let paragraph =
        Paragraph::new(keymap_text).style(Style::default().fg(colors.text).bg(colors.bg));
    f.render_widget(paragraph, area);
}
