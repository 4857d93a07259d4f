//! Suggestion panel renderer.

use crate::ui::helpers::{self, display_width, fill_line, position_cursor, truncate};
use crate::ui::theme::Theme;
use crate::ui::viewmodel::SuggestionPanel;

const INDENT: usize = 4;

/// Renders the "Recent Searches" and "Suggested Searches" sections.
///
/// # Returns
///
/// The next available row position.
pub fn render_suggestions(row: usize, panel: &SuggestionPanel, theme: &Theme, cols: usize) -> usize {
    let mut current_row = row;

    for section in &panel.sections {
        position_cursor(current_row, 1);
        print!("{}{}", Theme::bold(), Theme::fg(&theme.colors.accent));
        print!("{}{}", " ".repeat(INDENT), section.title);
        fill_line(INDENT + display_width(&section.title), cols);
        print!("{}", Theme::reset());
        current_row += 1;

        for item in &section.items {
            let text = truncate(&item.text, cols.saturating_sub(INDENT + 4));
            position_cursor(current_row, 1);
            print!("{}", " ".repeat(INDENT));
            if item.is_selected {
                print!("{}", Theme::fg(&theme.colors.selection_fg));
                print!("{}", Theme::bg(&theme.colors.selection_bg));
            } else {
                print!("{}", Theme::fg(&theme.colors.text_normal));
            }
            print!("  ");
            helpers::render_highlighted_text(&text, &item.highlight_ranges, theme, item.is_selected);
            print!("  ");
            print!("{}", Theme::reset());
            fill_line(INDENT + 4 + display_width(&text), cols);
            current_row += 1;
        }
    }

    current_row
}
