//! Composable UI component renderers.
//!
//! This module provides specialized rendering components for different UI
//! elements, following a component-based architecture. Each component is
//! responsible for rendering a specific part of the interface and returns the
//! next free row.
//!
//! # Components
//!
//! - [`header`]: Title bar with location status
//! - [`search`]: Query input box
//! - [`suggestions`]: Recent and suggested searches
//! - [`filters`]: Price, rating and cuisine controls
//! - [`cards`]: Results heading and restaurant cards
//! - [`empty`]: Welcome, no-match, loading and error messages
//! - [`footer`]: Help text and keybinding hints

mod cards;
mod empty;
mod filters;
mod footer;
mod header;
mod search;
mod suggestions;

use crate::ui::helpers::position_cursor;
use crate::ui::theme::Theme;
use crate::ui::viewmodel::{BodyView, UIViewModel};

use cards::render_results;
use empty::{render_empty_state, render_message};
use filters::render_filter_panel;
use footer::render_footer;
use header::render_header;
use search::render_search_bar;
use suggestions::render_suggestions;

/// Renders a horizontal border line at the specified row.
///
/// # Returns
///
/// The next available row position (row + 1)
fn render_border(row: usize, color: &str, cols: usize) -> usize {
    position_cursor(row, 1);
    print!("{}", Theme::fg(color));
    print!("{}", "─".repeat(cols));
    print!("{}", Theme::reset());
    row + 1
}

/// Renders the full layout.
///
/// Layout structure:
/// ```text
/// [blank line]
/// [Header]
/// [Border]
/// [Search Bar - 3 lines]
/// [Suggestion panel or filter panel, if open]
/// [Body: cards, welcome, loading, error]
/// [Border]
/// [Footer]
/// ```
pub fn render_layout(vm: &UIViewModel, theme: &Theme, cols: usize, rows: usize) {
    let mut current_row = 2; // Start at row 2 (skip blank line at row 1)

    current_row = render_header(current_row, &vm.header, theme, cols);
    current_row = render_border(current_row, &theme.colors.border, cols);
    current_row = render_search_bar(current_row, &vm.search_bar, theme, cols);

    if let Some(panel) = &vm.suggestions {
        current_row = render_suggestions(current_row, panel, theme, cols);
    }
    if let Some(panel) = &vm.filter_panel {
        current_row = render_filter_panel(current_row, panel, theme, cols);
    }

    let footer_start = rows.saturating_sub(1);
    let border_row = footer_start.saturating_sub(1);
    let last_body_row = border_row.saturating_sub(1);

    match &vm.body {
        BodyView::Welcome(empty) | BodyView::NoMatches(empty) => {
            render_empty_state(current_row, last_body_row, empty, theme, cols);
        }
        BodyView::Loading { message } => render_message(current_row, message, &theme.colors.accent, cols),
        BodyView::Error { message } => render_message(current_row, message, &theme.colors.error_fg, cols),
        BodyView::Results(results) => {
            let _current_row = render_results(current_row, results, theme, cols);
        }
    }

    render_border(border_row, &theme.colors.border, cols);
    render_footer(footer_start, &vm.footer, theme, cols);
}
