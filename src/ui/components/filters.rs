//! Filter panel renderer.
//!
//! Draws the price tiers, the minimum rating stepper and the cuisine chips.
//! The focused section is marked with an arrow and its cursor chip is
//! underlined.

use crate::app::modes::FilterFocus;
use crate::app::state::CUISINES_PER_ROW;
use crate::ui::helpers::{display_width, fill_line, position_cursor};
use crate::ui::theme::Theme;
use crate::ui::viewmodel::{FilterChip, FilterPanel};

const LABEL_WIDTH: usize = 18;
const UNDERLINE: &str = "\u{1b}[4m";

/// Renders the filter panel.
///
/// # Layout
///
/// ```text
/// ▸ Price Range       [$] [$$] [$$$] [$$$$]
///   Minimum Rating    ◂ 3.5 ★ ▸
///   Cuisine Types
///                     [Italian] [Indian] [Japanese] [Mexican] [Chinese]
///                     [Thai] [American] [Mediterranean] [French] [Korean]
/// ```
///
/// # Returns
///
/// The next available row position (row + 5).
pub fn render_filter_panel(row: usize, panel: &FilterPanel, theme: &Theme, cols: usize) -> usize {
    position_cursor(row, 1);
    let used = render_label("Price Range", panel.focus == FilterFocus::Price, theme);
    let used = used + render_chips(&panel.price, theme);
    fill_line(used, cols);

    position_cursor(row + 1, 1);
    let used = render_label("Minimum Rating", panel.focus == FilterFocus::Rating, theme);
    let stepper = format!("◂ {} ▸", panel.min_rating);
    print!("{}{stepper}{}", Theme::fg(&theme.colors.rating_fg), Theme::reset());
    fill_line(used + display_width(&stepper), cols);

    position_cursor(row + 2, 1);
    let used = render_label("Cuisine Types", panel.focus == FilterFocus::Cuisine, theme);
    fill_line(used, cols);

    for (offset, chunk) in panel.cuisines.chunks(CUISINES_PER_ROW).enumerate() {
        position_cursor(row + 3 + offset, 1);
        print!("{}", " ".repeat(LABEL_WIDTH));
        let used = LABEL_WIDTH + render_chips(chunk, theme);
        fill_line(used, cols);
    }

    row + 5
}

/// Prints a section label padded to a fixed width. Returns the columns used.
fn render_label(label: &str, focused: bool, theme: &Theme) -> usize {
    let marker = if focused { "▸ " } else { "  " };
    if focused {
        print!("{}{}", Theme::bold(), Theme::fg(&theme.colors.accent));
    } else {
        print!("{}", Theme::fg(&theme.colors.text_normal));
    }
    print!("{marker}{label:<width$}", width = LABEL_WIDTH - 2);
    print!("{}", Theme::reset());
    LABEL_WIDTH
}

/// Prints chips separated by spaces. Returns the columns used.
fn render_chips(chips: &[FilterChip], theme: &Theme) -> usize {
    let mut used = 0;
    for chip in chips {
        if chip.is_active {
            print!("{}", Theme::fg(&theme.colors.chip_active_fg));
            print!("{}", Theme::bg(&theme.colors.chip_active_bg));
        } else {
            print!("{}", Theme::fg(&theme.colors.text_dim));
        }
        if chip.is_cursor {
            print!("{UNDERLINE}");
        }
        print!("[{}]", chip.label);
        print!("{} ", Theme::reset());
        used += display_width(&chip.label) + 3;
    }
    used
}
