//! Empty state component renderer.
//!
//! This module renders the centered message blocks shown instead of cards:
//! the welcome screen, the no-match screen, and the loading and error lines.

use crate::ui::helpers::{display_width, position_cursor, truncate};
use crate::ui::theme::Theme;
use crate::ui::viewmodel::EmptyState;

/// Renders an empty state block starting two rows below `row`.
///
/// # Layout
///
/// ```text
/// [2 blank lines]
/// [left padding] MESSAGE [right padding]
/// [left padding] subtitle [right padding]
/// [blank line]
/// [left padding] • hint [right padding]
/// ```
///
/// Lines are horizontally centered and never drawn past `last_row`.
pub fn render_empty_state(row: usize, last_row: usize, empty: &EmptyState, theme: &Theme, cols: usize) {
    let mut current_row = row + 2;

    if current_row <= last_row {
        print!("{}", Theme::bold());
        render_centered(current_row, &empty.message, &theme.colors.empty_state_fg, cols);
        current_row += 1;
    }
    if current_row <= last_row {
        print!("{}", Theme::dim());
        render_centered(current_row, &empty.subtitle, &theme.colors.text_dim, cols);
        current_row += 2;
    }
    for hint in &empty.hints {
        if current_row > last_row {
            break;
        }
        render_centered(current_row, &format!("• {hint}"), &theme.colors.text_normal, cols);
        current_row += 1;
    }
}

/// Renders a single centered status line two rows below `row`.
pub fn render_message(row: usize, message: &str, color: &str, cols: usize) {
    render_centered(row + 2, message, color, cols);
}

fn render_centered(row: usize, text: &str, color: &str, cols: usize) {
    let text = truncate(text, cols);
    let text_len = display_width(&text);
    let padding = (cols.saturating_sub(text_len)) / 2;

    position_cursor(row, 1);
    print!("{}", Theme::fg(color));
    print!("{}", " ".repeat(padding));
    print!("{text}");
    print!("{}", " ".repeat(cols.saturating_sub(padding + text_len)));
    print!("{}", Theme::reset());
}
