//! Search bar component renderer.
//!
//! This module renders the query input box with a bordered frame, the query
//! or placeholder text, and a right-aligned status.

use crate::ui::helpers::{display_width, fill_line, position_cursor, truncate};
use crate::ui::theme::Theme;
use crate::ui::viewmodel::SearchBarInfo;

/// Horizontal margin for the search box (spaces on left and right).
const SEARCH_BOX_MARGIN: usize = 2;

/// Renders the search input box at the specified row.
///
/// # Returns
///
/// The next available row position (row + 3, since search box uses 3 lines)
///
/// # Layout
///
/// ```text
/// [margin] ┌──────────────────────────────────┐ [margin]
/// [margin] │ > Romantic Italian dinner█ Filters│ [margin]
/// [margin] └──────────────────────────────────┘ [margin]
/// ```
///
/// An empty query shows the dimmed placeholder instead. The block cursor is
/// only drawn while the input has focus.
pub fn render_search_bar(row: usize, search: &SearchBarInfo, theme: &Theme, cols: usize) -> usize {
    let box_width = cols.saturating_sub(SEARCH_BOX_MARGIN * 2);
    let inner_width = box_width.saturating_sub(2);
    let border = Theme::fg(&theme.colors.search_bar_border);

    position_cursor(row, 1);
    print!("{}", " ".repeat(SEARCH_BOX_MARGIN));
    print!("{border}┌{}┐{}", "─".repeat(inner_width), Theme::reset());

    let status = format!(" {} ", search.status);
    let status_len = display_width(&status);
    let cursor = if search.is_focused { "█" } else { "" };
    let text_room = inner_width.saturating_sub(status_len + 3 + display_width(cursor));

    position_cursor(row + 1, 1);
    print!("{}", " ".repeat(SEARCH_BOX_MARGIN));
    print!("{border}│{}", Theme::reset());
    print!("{} > ", Theme::fg(&theme.colors.accent));

    let shown = if search.query.is_empty() {
        let placeholder = truncate(&search.placeholder, text_room);
        print!("{}{}{}", Theme::fg(&theme.colors.text_dim), cursor, placeholder);
        display_width(&placeholder)
    } else {
        // Keep the tail of a long query visible while typing.
        let chars: Vec<char> = search.query.chars().collect();
        let visible: String = chars[chars.len().saturating_sub(text_room)..].iter().collect();
        print!("{}{visible}{cursor}", Theme::fg(&theme.colors.text_normal));
        display_width(&visible)
    };
    fill_line(3 + shown + display_width(cursor) + status_len, inner_width);
    print!("{}{status}", Theme::fg(&theme.colors.text_dim));
    print!("{border}│{}", Theme::reset());

    position_cursor(row + 2, 1);
    print!("{}", " ".repeat(SEARCH_BOX_MARGIN));
    print!("{border}└{}┘{}", "─".repeat(inner_width), Theme::reset());

    row + 3
}
