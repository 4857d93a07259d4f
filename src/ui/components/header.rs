//! Header component renderer.
//!
//! This module renders the plugin title bar with centered text, theme-aware
//! colors, optional background styling and the geolocation status.

use crate::ui::helpers::{display_width, position_cursor};
use crate::ui::theme::Theme;
use crate::ui::viewmodel::HeaderInfo;

/// Renders the header title bar at the specified row.
///
/// Displays the title centered horizontally with bold styling and theme colors.
/// When a location status is present it is drawn dimmed at the right edge.
///
/// # Returns
///
/// The next available row position (row + 1)
///
/// # Layout
///
/// ```text
/// [left padding] TITLE [right padding] location
/// ```
pub fn render_header(row: usize, header: &HeaderInfo, theme: &Theme, cols: usize) -> usize {
    let title_len = display_width(&header.title);
    let padding = (cols.saturating_sub(title_len)) / 2;
    let location = header
        .location
        .as_deref()
        .filter(|status| padding + title_len + display_width(status) + 2 <= cols);
    let location_len = location.map_or(0, |status| display_width(status) + 1);

    position_cursor(row, 1);
    print!("{}", Theme::bold());
    print!("{}", Theme::fg(&theme.colors.header_fg));
    if let Some(bg) = &theme.colors.header_bg {
        print!("{}", Theme::bg(bg));
    }

    print!("{}", " ".repeat(padding));
    print!("{}", header.title);
    print!("{}", " ".repeat(cols.saturating_sub(padding + title_len + location_len)));

    if let Some(status) = location {
        print!("{}", Theme::reset());
        print!("{}", Theme::fg(&theme.colors.text_dim));
        print!("{status} ");
    }

    print!("{}", Theme::reset());
    row + 1
}
