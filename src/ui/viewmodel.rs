//! View model types representing renderable UI state.
//!
//! This module defines immutable view models computed from application state,
//! following the MVVM pattern. View models are optimized for rendering and
//! contain pre-computed display information like highlight ranges, selection
//! state and formatted labels.
//!
//! # Architecture
//!
//! View models are created via `AppState::compute_viewmodel()` and consumed by
//! the renderer. They contain no business logic, only display-ready data.
//!
//! # Example
//!
//! ```rust
//! use foodquest::ui::viewmodel::{BodyView, FooterInfo, HeaderInfo, SearchBarInfo, UIViewModel};
//!
//! let vm = UIViewModel {
//!     header: HeaderInfo { title: " FoodQuest ".to_string(), location: None },
//!     search_bar: SearchBarInfo {
//!         query: "ramen".to_string(),
//!         placeholder: String::new(),
//!         is_focused: true,
//!         status: "Filters".to_string(),
//!     },
//!     suggestions: None,
//!     filter_panel: None,
//!     body: BodyView::Loading { message: "Searching...".to_string() },
//!     footer: FooterInfo { keybindings: "q: quit".to_string() },
//! };
//! assert!(vm.suggestions.is_none());
//! ```

use crate::app::modes::FilterFocus;

/// Complete UI view model for rendering.
///
/// Contains all display information needed to draw one frame, top to bottom.
#[derive(Debug, Clone)]
pub struct UIViewModel {
    /// Title line.
    pub header: HeaderInfo,

    /// Query input box.
    pub search_bar: SearchBarInfo,

    /// Recent and suggested searches, drawn under the search bar while it has
    /// focus.
    pub suggestions: Option<SuggestionPanel>,

    /// Filter controls, drawn while the filter panel is open.
    pub filter_panel: Option<FilterPanel>,

    /// Main content area.
    pub body: BodyView,

    /// Keybinding hints.
    pub footer: FooterInfo,
}

/// Header display information.
#[derive(Debug, Clone)]
pub struct HeaderInfo {
    /// Title text to display in the header.
    pub title: String,

    /// Geolocation status, shown right-aligned when known.
    pub location: Option<String>,
}

/// Search bar display information.
#[derive(Debug, Clone)]
pub struct SearchBarInfo {
    /// Current search query text.
    pub query: String,

    /// Dimmed hint shown while the query is empty.
    pub placeholder: String,

    /// Whether the input has keyboard focus; draws the cursor.
    pub is_focused: bool,

    /// Right-aligned status ("Searching...", "Filters (2)").
    pub status: String,
}

/// Suggestion panel grouped into titled sections.
#[derive(Debug, Clone)]
pub struct SuggestionPanel {
    pub sections: Vec<SuggestionSection>,
}

impl SuggestionPanel {
    /// Rows the panel occupies: a title per section plus one per item.
    #[must_use]
    pub fn height(&self) -> usize {
        self.sections.iter().map(|s| 1 + s.items.len()).sum()
    }
}

#[derive(Debug, Clone)]
pub struct SuggestionSection {
    /// "Recent Searches" or "Suggested Searches".
    pub title: String,
    pub items: Vec<SuggestionItem>,
}

#[derive(Debug, Clone)]
pub struct SuggestionItem {
    pub text: String,

    /// Whether the suggestion cursor is on this item.
    pub is_selected: bool,

    /// Character ranges to highlight (for fuzzy matches against the query).
    ///
    /// Each tuple is `(start_index, end_index)` in UTF-8 character indices.
    pub highlight_ranges: Vec<(usize, usize)>,
}

/// Filter panel display information.
#[derive(Debug, Clone)]
pub struct FilterPanel {
    /// Section receiving left/right/toggle keys.
    pub focus: FilterFocus,

    /// `$` through `$$$$`.
    pub price: Vec<FilterChip>,

    /// Current threshold, e.g. `"3.5 ★"`.
    pub min_rating: String,

    /// One chip per selectable cuisine.
    pub cuisines: Vec<FilterChip>,
}

/// A toggleable option in the filter panel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterChip {
    pub label: String,
    pub is_active: bool,
    pub is_cursor: bool,
}

/// What the content area shows.
#[derive(Debug, Clone)]
pub enum BodyView {
    /// Nothing searched yet.
    Welcome(EmptyState),
    /// A request is in flight.
    Loading { message: String },
    /// The last request failed.
    Error { message: String },
    /// Results arrived but every one is hidden by the filters.
    NoMatches(EmptyState),
    /// Cards to draw.
    Results(ResultsView),
}

/// Result list with its heading.
#[derive(Debug, Clone)]
pub struct ResultsView {
    /// "Found N restaurants for you".
    pub heading: String,

    /// What the backend understood and how long it took.
    pub summary: Option<String>,

    /// The window of cards that fits on screen.
    pub cards: Vec<CardView>,

    /// Cards scrolled off above the window.
    pub hidden_above: usize,

    /// Cards scrolled off below the window.
    pub hidden_below: usize,
}

/// Display information for a single restaurant card.
#[derive(Debug, Clone)]
pub struct CardView {
    pub name: String,
    /// Price badge, e.g. `"$$$"`.
    pub price: String,
    /// Rating with review count, or `"n/a"`.
    pub rating: String,
    pub open_now: Option<bool>,
    pub address: String,
    pub cuisines: Vec<String>,
    /// URL of the photo the carousel points at.
    pub photo_url: String,
    /// `"2/5"`, only when the carousel has more than one photo.
    pub photo_position: Option<String>,
    pub has_website: bool,
    pub has_map: bool,
    pub is_selected: bool,
    /// Present while the review list is expanded.
    pub reviews: Option<ReviewsView>,
}

impl CardView {
    /// Rows the card occupies, including the trailing blank separator.
    ///
    /// Must agree with `components::cards::render_card`.
    #[must_use]
    pub fn height(&self) -> usize {
        let base = 5 + usize::from(!self.cuisines.is_empty());
        let reviews = self.reviews.as_ref().map_or(0, ReviewsView::height);
        base + reviews + 1
    }
}

/// Expanded review list of a card.
#[derive(Debug, Clone)]
pub struct ReviewsView {
    /// Reviews inside the scroll window.
    pub items: Vec<ReviewView>,
    /// Index of the first shown review.
    pub first_shown: usize,
    /// Reviews available in total.
    pub total: usize,
}

impl ReviewsView {
    /// Two rows per review, plus a position line when the list scrolls.
    /// An empty list takes one row for its placeholder.
    #[must_use]
    pub fn height(&self) -> usize {
        if self.items.is_empty() {
            1
        } else {
            self.items.len() * 2 + usize::from(self.is_scrollable())
        }
    }

    #[must_use]
    pub fn is_scrollable(&self) -> bool {
        self.total > self.items.len()
    }
}

#[derive(Debug, Clone)]
pub struct ReviewView {
    pub author: String,
    /// Five-character star bar.
    pub stars: String,
    pub time: String,
    /// Single-line, pre-truncated text.
    pub text: String,
}

/// Footer display information.
///
/// Contains help text and keybinding hints for the bottom of the UI.
#[derive(Debug, Clone)]
pub struct FooterInfo {
    /// Keybinding help text (e.g., "/: search  f: filters  q: quit").
    pub keybindings: String,
}

/// Centered message block for the welcome and no-match screens.
#[derive(Debug, Clone)]
pub struct EmptyState {
    /// Primary message.
    pub message: String,

    /// Secondary explanatory text.
    pub subtitle: String,

    /// Example queries listed under the subtitle.
    pub hints: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn card(cuisines: usize, reviews: Option<ReviewsView>) -> CardView {
        CardView {
            name: "x".to_string(),
            price: "$$".to_string(),
            rating: "n/a".to_string(),
            open_now: None,
            address: String::new(),
            cuisines: vec!["Thai".to_string(); cuisines],
            photo_url: String::new(),
            photo_position: None,
            has_website: false,
            has_map: false,
            is_selected: false,
            reviews,
        }
    }

    fn review() -> ReviewView {
        ReviewView {
            author: "a".to_string(),
            stars: "★★★★★".to_string(),
            time: String::new(),
            text: String::new(),
        }
    }

    #[test]
    fn card_height_accounts_for_optional_rows() {
        assert_eq!(card(0, None).height(), 6);
        assert_eq!(card(2, None).height(), 7);

        let empty = ReviewsView { items: vec![], first_shown: 0, total: 0 };
        assert_eq!(card(2, Some(empty)).height(), 8);

        let scrolling = ReviewsView { items: vec![review(); 3], first_shown: 0, total: 5 };
        assert_eq!(card(2, Some(scrolling)).height(), 7 + 7);
    }
}
