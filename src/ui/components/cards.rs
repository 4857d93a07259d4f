//! Result card renderer.
//!
//! This module renders the results heading and the windowed list of
//! restaurant cards. Row usage here must agree with `CardView::height`,
//! which the state layer uses to decide how many cards fit.

use crate::ui::helpers::{display_width, fill_line, position_cursor, truncate};
use crate::ui::theme::Theme;
use crate::ui::viewmodel::{CardView, ResultsView, ReviewsView};

/// Left gutter holding the selection bar.
const GUTTER: usize = 3;

/// Renders the heading, summary and cards starting at `row`.
///
/// # Returns
///
/// The next available row position.
pub fn render_results(row: usize, results: &ResultsView, theme: &Theme, cols: usize) -> usize {
    let mut current_row = row;

    position_cursor(current_row, 1);
    print!("{}{}", Theme::bold(), Theme::fg(&theme.colors.accent));
    let heading = if results.hidden_above > 0 {
        format!("  {}  (↑ {} more)", results.heading, results.hidden_above)
    } else {
        format!("  {}", results.heading)
    };
    print!("{heading}{}", Theme::reset());
    fill_line(display_width(&heading), cols);
    current_row += 1;

    if let Some(summary) = &results.summary {
        let summary = truncate(&format!("  {summary}"), cols);
        position_cursor(current_row, 1);
        print!("{}{summary}{}", Theme::fg(&theme.colors.text_dim), Theme::reset());
        fill_line(display_width(&summary), cols);
        current_row += 1;
    }

    position_cursor(current_row, 1);
    if results.hidden_below > 0 {
        let more = format!("  ↓ {} more", results.hidden_below);
        print!("{}{more}{}", Theme::fg(&theme.colors.text_dim), Theme::reset());
        fill_line(display_width(&more), cols);
    } else {
        fill_line(0, cols);
    }
    current_row += 1;

    for card in &results.cards {
        current_row = render_card(current_row, card, theme, cols);
    }

    current_row
}

/// Renders one card.
///
/// # Layout
///
/// ```text
/// ▌  Sushi Zen                                    $$$
/// ▌  ★ 4.6 (812)  Open Now
/// ▌  12 Main St
/// ▌  Japanese · Sushi
/// ▌  Photo 1/3  https://…/a.jpg
/// ▌  [w] Website  [m] View Map  [r] Show Reviews (4)
///      ana  ★★★★★  1 week ago
///      Great omakase.
/// [blank]
/// ```
pub fn render_card(row: usize, card: &CardView, theme: &Theme, cols: usize) -> usize {
    let inner = cols.saturating_sub(GUTTER + 1);
    let mut current_row = row;

    // Name and price badge.
    let price_len = display_width(&card.price);
    let name = truncate(&card.name, inner.saturating_sub(price_len + 2));
    start_line(current_row, card, theme);
    print!("{}{}{name}{}", Theme::bold(), Theme::fg(&theme.colors.text_normal), Theme::reset());
    fill_line(display_width(&name) + price_len, inner);
    print!("{}{}{}", Theme::fg(&theme.colors.accent), card.price, Theme::reset());
    current_row += 1;

    // Rating and opening status.
    start_line(current_row, card, theme);
    let rating = format!("★ {}", card.rating);
    print!("{}{rating}{}", Theme::fg(&theme.colors.rating_fg), Theme::reset());
    let mut used = display_width(&rating);
    if let Some(open) = card.open_now {
        let (label, color) = if open {
            ("Open Now", &theme.colors.open_fg)
        } else {
            ("Closed", &theme.colors.closed_fg)
        };
        print!("  {}{label}{}", Theme::fg(color), Theme::reset());
        used += 2 + display_width(label);
    }
    fill_line(used, inner);
    current_row += 1;

    current_row = render_dim_line(current_row, card, &card.address, theme, inner);

    if !card.cuisines.is_empty() {
        current_row = render_dim_line(current_row, card, &card.cuisines.join(" · "), theme, inner);
    }

    let photo = match &card.photo_position {
        Some(position) => format!("Photo {position}  {}", card.photo_url),
        None => format!("Photo  {}", card.photo_url),
    };
    current_row = render_dim_line(current_row, card, &photo, theme, inner);

    // Links.
    start_line(current_row, card, theme);
    let mut links = Vec::new();
    if card.has_website {
        links.push("[w] Website".to_string());
    }
    if card.has_map {
        links.push("[m] View Map".to_string());
    }
    links.push(match &card.reviews {
        Some(_) => "[r] Hide Reviews".to_string(),
        None => "[r] Show Reviews".to_string(),
    });
    let links = truncate(&links.join("  "), inner);
    print!("{}{links}{}", Theme::fg(&theme.colors.accent), Theme::reset());
    fill_line(display_width(&links), inner);
    current_row += 1;

    if let Some(reviews) = &card.reviews {
        current_row = render_reviews(current_row, reviews, theme, cols);
    }

    position_cursor(current_row, 1);
    fill_line(0, cols);
    current_row + 1
}

fn render_reviews(row: usize, reviews: &ReviewsView, theme: &Theme, cols: usize) -> usize {
    let indent = GUTTER + 2;
    let width = cols.saturating_sub(indent);
    let mut current_row = row;

    if reviews.items.is_empty() {
        position_cursor(current_row, 1);
        let text = "No reviews yet.";
        print!("{}{}{text}{}", " ".repeat(indent), Theme::fg(&theme.colors.text_dim), Theme::reset());
        fill_line(indent + text.len(), cols);
        return current_row + 1;
    }

    for review in &reviews.items {
        position_cursor(current_row, 1);
        print!("{}", " ".repeat(indent));
        print!("{}{}{}", Theme::bold(), review.author, Theme::reset());
        print!("  {}{}{}", Theme::fg(&theme.colors.rating_fg), review.stars, Theme::reset());
        print!("  {}{}{}", Theme::fg(&theme.colors.text_dim), review.time, Theme::reset());
        fill_line(
            indent + display_width(&review.author) + display_width(&review.stars) + display_width(&review.time) + 4,
            cols,
        );
        current_row += 1;

        let text = truncate(&review.text, width);
        position_cursor(current_row, 1);
        print!("{}{}{text}{}", " ".repeat(indent), Theme::fg(&theme.colors.text_normal), Theme::reset());
        fill_line(indent + display_width(&text), cols);
        current_row += 1;
    }

    if reviews.is_scrollable() {
        let position = format!(
            "{}-{} of {} reviews (J/K to scroll)",
            reviews.first_shown + 1,
            reviews.first_shown + reviews.items.len(),
            reviews.total
        );
        position_cursor(current_row, 1);
        print!("{}{}{position}{}", " ".repeat(indent), Theme::fg(&theme.colors.text_dim), Theme::reset());
        fill_line(indent + display_width(&position), cols);
        current_row += 1;
    }

    current_row
}

/// Positions at `row` and draws the gutter, with a bar on the selected card.
fn start_line(row: usize, card: &CardView, theme: &Theme) {
    position_cursor(row, 1);
    if card.is_selected {
        print!("{}▌{}  ", Theme::fg(&theme.colors.selection_bg), Theme::reset());
    } else {
        print!("{}", " ".repeat(GUTTER));
    }
}

fn render_dim_line(row: usize, card: &CardView, text: &str, theme: &Theme, width: usize) -> usize {
    let text = truncate(text, width);
    start_line(row, card, theme);
    print!("{}{text}{}", Theme::fg(&theme.colors.text_dim), Theme::reset());
    fill_line(display_width(&text), width);
    row + 1
}
