//! Application state management and view model computation.
//!
//! This module defines [`AppState`], the central state container for the
//! plugin, along with selection management, suggestion lookup and view model
//! generation. It is the single source of truth for everything the UI shows.
//!
//! # State Components
//!
//! - **Query**: Text in the search bar
//! - **Filters**: Price, rating and cuisine constraints
//! - **Session**: Lifecycle of the backend request and the raw results
//! - **Recent searches**: Bounded recency list, mirrored to the worker
//! - **Geolocation**: One-shot position probe
//! - **Cards**: Carousel and review state per raw result
//! - **Selection**: Cursor over the *visible* (filtered) cards
//! - **Input Mode**: Controls keybinding interpretation and UI layout
//!
//! # View Model Computation
//!
//! `compute_viewmodel` turns a state snapshot into a
//! [`UIViewModel`](crate::ui::viewmodel::UIViewModel), windowing the card
//! list around the selection and pre-computing fuzzy highlight ranges.
//!
//! # Example
//!
//! ```rust
//! use foodquest::app::AppState;
//! use foodquest::ui::Theme;
//!
//! let state = AppState::new(Theme::default());
//! let viewmodel = state.compute_viewmodel(24, 80);
//! assert_eq!(viewmodel.search_bar.query, "");
//! ```

use super::cards::{CardState, VISIBLE_REVIEWS};
use super::modes::{FilterFocus, InputMode, SearchFocus};
use crate::domain::filters::PRICE_LEVELS;
use crate::domain::{FilterState, RecencyCache, Restaurant, CUISINE_OPTIONS};
use crate::search::{self, GeolocationProbe, ProbeState, SearchSession, SessionState};
use crate::ui::helpers::truncate;
use crate::ui::theme::Theme;
use crate::ui::viewmodel::{
    BodyView, CardView, EmptyState, FilterChip, FilterPanel, FooterInfo, HeaderInfo, ResultsView, ReviewView,
    ReviewsView, SearchBarInfo, SuggestionItem, SuggestionPanel, SuggestionSection, UIViewModel,
};
use fuzzy_matcher::skim::SkimMatcherV2;
use fuzzy_matcher::FuzzyMatcher;

/// Default search endpoint.
pub const DEFAULT_BACKEND_URL: &str = "http://localhost:8000/search";

/// Canned queries offered under "Suggested Searches".
pub const SUGGESTED_SEARCHES: [&str; 5] = [
    "Romantic Italian dinner",
    "Cheap lunch spots nearby",
    "Vegetarian friendly cafes",
    "Family restaurants with play area",
    "Fast food open late night",
];

/// Rows used by the fixed chrome: blank line, header, border, search box
/// (3), border, footer.
const CHROME_ROWS: usize = 8;

/// Rows used by the filter panel.
pub const FILTER_PANEL_ROWS: usize = 5;

/// Cuisine chips per row in the filter panel.
pub const CUISINES_PER_ROW: usize = 5;

/// Where a suggestion came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SuggestionKind {
    Recent,
    Suggested,
}

/// One entry of the suggestion panel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Suggestion {
    pub text: String,
    pub kind: SuggestionKind,
}

/// Central application state container.
///
/// Mutated by the event handler in response to user input and system events.
/// View models are computed on demand from state snapshots.
#[derive(Debug, Clone)]
pub struct AppState {
    /// Current contents of the search bar.
    pub query: String,

    /// Active result constraints.
    pub filters: FilterState,

    /// Backend request lifecycle and raw results.
    pub session: SearchSession,

    /// Recent queries, most recent first.
    pub recent: RecencyCache,

    /// Location attached to outbound queries once resolved.
    pub geolocation: GeolocationProbe,

    /// Per-result UI state, indexed by position in `session.results()`.
    pub cards: Vec<CardState>,

    /// Zero-based index into the visible (filtered) cards.
    pub selected_index: usize,

    /// Zero-based index into [`AppState::suggestions`].
    pub suggestion_index: usize,

    /// Whether the suggestion panel may be shown while the search bar has focus.
    ///
    /// Cleared after a suggestion is applied, set again on the next edit.
    pub show_suggestions: bool,

    /// Option under the cursor within the focused filter section.
    pub filter_cursor: usize,

    /// Current input handling mode.
    pub input_mode: InputMode,

    /// Color scheme for UI rendering.
    pub theme: Theme,

    /// Search endpoint that receives the POSTed query.
    pub backend_url: String,

    /// Optional geolocation lookup endpoint, probed once after permissions
    /// are granted.
    pub geolocation_url: Option<String>,
}

impl AppState {
    /// Creates a state with an empty query, default filters and no results.
    ///
    /// # Example
    ///
    /// ```rust
    /// use foodquest::app::{AppState, InputMode};
    /// use foodquest::ui::Theme;
    ///
    /// let state = AppState::new(Theme::default());
    /// assert_eq!(state.input_mode, InputMode::Normal);
    /// assert!(state.filters.is_default());
    /// ```
    #[must_use]
    pub fn new(theme: Theme) -> Self {
        Self {
            query: String::new(),
            filters: FilterState::default(),
            session: SearchSession::new(),
            recent: RecencyCache::default(),
            geolocation: GeolocationProbe::new(),
            cards: Vec::new(),
            selected_index: 0,
            suggestion_index: 0,
            show_suggestions: true,
            filter_cursor: 0,
            input_mode: InputMode::Normal,
            theme,
            backend_url: DEFAULT_BACKEND_URL.to_string(),
            geolocation_url: None,
        }
    }

    /// Positions in the raw result set of the cards that pass the filters.
    #[must_use]
    pub fn visible_indices(&self) -> Vec<usize> {
        search::matching_indices(self.session.results(), &self.filters)
    }

    /// Raw result index of the selected card, if any card is visible.
    #[must_use]
    pub fn selected_result_index(&self) -> Option<usize> {
        self.visible_indices().get(self.selected_index).copied()
    }

    /// The selected restaurant, if any.
    #[must_use]
    pub fn selected_restaurant(&self) -> Option<&Restaurant> {
        self.selected_result_index()
            .and_then(|index| self.session.results().get(index))
    }

    /// The selected restaurant together with its mutable card state.
    pub fn selected_card_mut(&mut self) -> Option<(&Restaurant, &mut CardState)> {
        let index = self.selected_result_index()?;
        let restaurant = self.session.results().get(index)?;
        let card = self.cards.get_mut(index)?;
        Some((restaurant, card))
    }

    /// Rebuilds card state for the current result set and resets selection.
    pub fn install_results(&mut self) {
        self.cards = super::cards::cards_for(self.session.results());
        self.selected_index = 0;
    }

    /// Moves the card selection down by one, wrapping to the top.
    pub fn move_selection_down(&mut self) {
        let count = self.visible_indices().len();
        if count == 0 {
            return;
        }
        self.selected_index = (self.selected_index + 1) % count;
    }

    /// Moves the card selection up by one, wrapping to the bottom.
    pub fn move_selection_up(&mut self) {
        let count = self.visible_indices().len();
        if count == 0 {
            return;
        }
        self.selected_index = (self.selected_index + count - 1) % count;
    }

    /// Keeps the selection inside the visible cards after a filter change.
    pub fn clamp_selection(&mut self) {
        let count = self.visible_indices().len();
        self.selected_index = self.selected_index.min(count.saturating_sub(1));
    }

    /// Recent and canned suggestions matching the current query.
    ///
    /// With an empty query every entry is returned; otherwise entries are
    /// fuzzy-matched against the query. Recent searches come first.
    #[must_use]
    pub fn suggestions(&self) -> Vec<Suggestion> {
        let matcher = (!self.query.trim().is_empty()).then(SkimMatcherV2::default);
        let keep = |text: &str| {
            matcher
                .as_ref()
                .map_or(true, |m| m.fuzzy_match(text, self.query.trim()).is_some())
        };

        let recent = self.recent.entries().iter().map(|text| Suggestion {
            text: text.clone(),
            kind: SuggestionKind::Recent,
        });
        let suggested = SUGGESTED_SEARCHES.iter().map(|text| Suggestion {
            text: (*text).to_string(),
            kind: SuggestionKind::Suggested,
        });

        recent.chain(suggested).filter(|s| keep(&s.text)).collect()
    }

    /// Whether the suggestion panel is currently drawn.
    #[must_use]
    pub fn suggestions_visible(&self) -> bool {
        matches!(self.input_mode, InputMode::Search(_)) && self.show_suggestions && !self.suggestions().is_empty()
    }

    /// Number of options in the focused filter section, `0` for the stepper.
    #[must_use]
    pub const fn filter_section_len(focus: FilterFocus) -> usize {
        match focus {
            FilterFocus::Price => PRICE_LEVELS,
            FilterFocus::Rating => 0,
            FilterFocus::Cuisine => CUISINE_OPTIONS.len(),
        }
    }

    /// Computes a renderable UI view model from current state and terminal
    /// dimensions.
    ///
    /// # Windowing Algorithm
    ///
    /// Cards have different heights (open reviews take more rows), so the
    /// window starts at the selected card, extends downwards while cards fit,
    /// then extends upwards with whatever room is left.
    #[must_use]
    pub fn compute_viewmodel(&self, rows: usize, cols: usize) -> UIViewModel {
        let suggestions = self.compute_suggestion_panel();
        let filter_panel = self.compute_filter_panel();

        let panel_rows = suggestions.as_ref().map_or(0, SuggestionPanel::height)
            + filter_panel.as_ref().map_or(0, |_| FILTER_PANEL_ROWS);
        let available_rows = rows.saturating_sub(CHROME_ROWS + panel_rows);

        UIViewModel {
            header: self.compute_header(),
            search_bar: self.compute_search_bar(),
            suggestions,
            filter_panel,
            body: self.compute_body(available_rows, cols),
            footer: self.compute_footer(),
        }
    }

    fn compute_header(&self) -> HeaderInfo {
        let location = match self.geolocation.state() {
            ProbeState::Resolved(_) => Some("Location detected".to_string()),
            ProbeState::Pending => Some("Locating...".to_string()),
            ProbeState::NotStarted | ProbeState::Unavailable => None,
        };
        HeaderInfo {
            title: " FoodQuest ".to_string(),
            location,
        }
    }

    fn compute_search_bar(&self) -> SearchBarInfo {
        let active = self.filters_active_count();
        SearchBarInfo {
            query: self.query.clone(),
            placeholder: "Describe what you're looking for... (e.g. 'Romantic Italian dinner')".to_string(),
            is_focused: self.input_mode == InputMode::Search(SearchFocus::Typing),
            status: if self.session.is_loading() {
                "Searching...".to_string()
            } else if active > 0 {
                format!("Filters ({active})")
            } else {
                "Filters".to_string()
            },
        }
    }

    /// Number of filter groups deviating from their defaults.
    fn filters_active_count(&self) -> usize {
        let defaults = FilterState::default();
        [
            self.filters.price != defaults.price,
            self.filters.min_rating != defaults.min_rating,
            !self.filters.cuisines.is_empty(),
        ]
        .into_iter()
        .filter(|changed| *changed)
        .count()
    }

    fn compute_suggestion_panel(&self) -> Option<SuggestionPanel> {
        if !self.suggestions_visible() {
            return None;
        }

        let selecting = self.input_mode == InputMode::Search(SearchFocus::Suggestions);
        let matcher = SkimMatcherV2::default();
        let query = self.query.trim();

        let mut recent = SuggestionSection {
            title: "Recent Searches".to_string(),
            items: Vec::new(),
        };
        let mut suggested = SuggestionSection {
            title: "Suggested Searches".to_string(),
            items: Vec::new(),
        };

        for (index, suggestion) in self.suggestions().into_iter().enumerate() {
            let highlight_ranges = if query.is_empty() {
                vec![]
            } else {
                compute_highlight_ranges(&suggestion.text, query, &matcher)
            };
            let item = SuggestionItem {
                text: suggestion.text,
                is_selected: selecting && index == self.suggestion_index,
                highlight_ranges,
            };
            match suggestion.kind {
                SuggestionKind::Recent => recent.items.push(item),
                SuggestionKind::Suggested => suggested.items.push(item),
            }
        }

        let sections = [recent, suggested]
            .into_iter()
            .filter(|section| !section.items.is_empty())
            .collect();

        Some(SuggestionPanel { sections })
    }

    fn compute_filter_panel(&self) -> Option<FilterPanel> {
        let InputMode::Filters(focus) = self.input_mode else {
            return None;
        };

        let price = (0..PRICE_LEVELS)
            .map(|index| FilterChip {
                label: "$".repeat(index + 1),
                is_active: self.filters.price[index],
                is_cursor: focus == FilterFocus::Price && index == self.filter_cursor,
            })
            .collect();

        let cuisines = CUISINE_OPTIONS
            .iter()
            .enumerate()
            .map(|(index, cuisine)| FilterChip {
                label: (*cuisine).to_string(),
                is_active: self.filters.has_cuisine(cuisine),
                is_cursor: focus == FilterFocus::Cuisine && index == self.filter_cursor,
            })
            .collect();

        Some(FilterPanel {
            focus,
            price,
            min_rating: format!("{} ★", self.filters.min_rating),
            cuisines,
        })
    }

    fn compute_body(&self, available_rows: usize, cols: usize) -> BodyView {
        match self.session.state() {
            SessionState::Idle => Self::welcome(),
            SessionState::Loading => BodyView::Loading {
                message: "Searching...".to_string(),
            },
            SessionState::Failed(message) => BodyView::Error {
                message: message.clone(),
            },
            SessionState::Success(results) if results.is_empty() => Self::welcome(),
            SessionState::Success(results) => {
                let visible = self.visible_indices();
                if visible.is_empty() {
                    return BodyView::NoMatches(EmptyState {
                        message: "No restaurants match your current filters".to_string(),
                        subtitle: "Press x to reset filters".to_string(),
                        hints: vec![],
                    });
                }
                BodyView::Results(self.compute_results(results, &visible, available_rows, cols))
            }
        }
    }

    fn welcome() -> BodyView {
        BodyView::Welcome(EmptyState {
            message: "Ready to discover your next favorite spot?".to_string(),
            subtitle: "Enter your food preferences, mood, or cuisine type to find the perfect restaurant for any occasion."
                .to_string(),
            hints: SUGGESTED_SEARCHES.iter().map(|s| (*s).to_string()).collect(),
        })
    }

    fn compute_results(&self, results: &[Restaurant], visible: &[usize], available_rows: usize, cols: usize) -> ResultsView {
        let summary = self.compute_summary();
        let heading_rows = 2 + usize::from(summary.is_some());
        let card_rows = available_rows.saturating_sub(heading_rows);

        let cards: Vec<CardView> = visible
            .iter()
            .enumerate()
            .filter_map(|(position, &index)| {
                let restaurant = results.get(index)?;
                let card = self.cards.get(index).copied().unwrap_or_else(|| CardState::for_restaurant(restaurant));
                Some(Self::compute_card(restaurant, &card, position == self.selected_index, cols))
            })
            .collect();

        let heights: Vec<usize> = cards.iter().map(CardView::height).collect();
        let (start, end) = visible_window(&heights, self.selected_index, card_rows);

        ResultsView {
            heading: format!("Found {} restaurants for you", visible.len()),
            summary,
            hidden_above: start,
            hidden_below: cards.len() - end,
            cards: cards.into_iter().skip(start).take(end - start).collect(),
        }
    }

    /// "Understood as" line combining the parsed prompt and request time.
    fn compute_summary(&self) -> Option<String> {
        let parsed = self
            .session
            .parsed_prompt()
            .and_then(crate::domain::ParsedPrompt::summary)
            .map(|s| format!("Understood: {s}"));
        let elapsed = self
            .session
            .elapsed()
            .map(|d| format!("{:.2}s", d.num_milliseconds() as f64 / 1000.0));

        match (parsed, elapsed) {
            (Some(p), Some(e)) => Some(format!("{p}  ·  {e}")),
            (Some(p), None) => Some(p),
            (None, Some(e)) => Some(e),
            (None, None) => None,
        }
    }

    fn compute_card(restaurant: &Restaurant, card: &CardState, is_selected: bool, cols: usize) -> CardView {
        let rating = restaurant.rating.map_or_else(
            || "n/a".to_string(),
            |rating| match restaurant.total_ratings {
                Some(total) => format!("{rating:.1} ({total})"),
                None => format!("{rating:.1}"),
            },
        );

        let photo_url = restaurant
            .photos
            .get(card.carousel.current())
            .cloned()
            .unwrap_or_default();

        let reviews = card.reviews.is_open().then(|| ReviewsView {
            items: restaurant
                .reviews
                .iter()
                .skip(card.reviews.offset())
                .take(VISIBLE_REVIEWS)
                .map(|review| ReviewView {
                    author: review.author_name.clone(),
                    stars: review.stars(),
                    time: review.time.clone(),
                    text: truncate(&review.text.replace('\n', " "), cols.saturating_sub(6)),
                })
                .collect(),
            first_shown: card.reviews.offset(),
            total: restaurant.reviews.len(),
        });

        CardView {
            name: restaurant.name.clone(),
            price: restaurant.price_label(),
            rating,
            open_now: restaurant.open_now,
            address: restaurant.address.clone(),
            cuisines: restaurant.cuisine_types.clone(),
            photo_url,
            photo_position: card
                .carousel
                .is_navigable()
                .then(|| format!("{}/{}", card.carousel.current() + 1, card.carousel.count())),
            has_website: restaurant.website.is_some(),
            has_map: restaurant.maps_link.is_some(),
            is_selected,
            reviews,
        }
    }

    /// Computes footer keybinding text for the current input mode.
    fn compute_footer(&self) -> FooterInfo {
        let keybindings = match self.input_mode {
            InputMode::Search(SearchFocus::Typing) => "Enter: search  Tab: suggestions  Esc: back  Type to edit query",
            InputMode::Search(SearchFocus::Suggestions) => {
                "j/k: move  Enter: use suggestion  Tab: edit query  Esc: back"
            }
            InputMode::Filters(_) => "j/k: section  h/l: move  Space: toggle  x: reset  f/Esc: close",
            InputMode::Normal if self.visible_indices().is_empty() => "/: search  f: filters  x: reset filters  q: quit",
            InputMode::Normal => {
                "j/k: select  h/l: photos  1-9: jump  r: reviews  J/K: scroll  m: map  w: website  /: search  f: filters  q: quit"
            }
        };

        FooterInfo {
            keybindings: keybindings.to_string(),
        }
    }
}

/// Chooses the `[start, end)` range of cards to draw.
///
/// The selected card is always included, even if it alone exceeds the
/// available rows.
fn visible_window(heights: &[usize], selected: usize, available_rows: usize) -> (usize, usize) {
    if heights.is_empty() {
        return (0, 0);
    }

    let selected = selected.min(heights.len() - 1);
    let mut used = heights[selected];
    let mut start = selected;
    let mut end = selected + 1;

    while end < heights.len() && used + heights[end] <= available_rows {
        used += heights[end];
        end += 1;
    }
    while start > 0 && used + heights[start - 1] <= available_rows {
        start -= 1;
        used += heights[start];
    }

    (start, end)
}

/// Computes character index ranges to highlight for fuzzy match visualization.
///
/// Coalesces the matcher's individual character indices into contiguous
/// `(start, end)` ranges with an exclusive end.
fn compute_highlight_ranges(text: &str, query: &str, matcher: &SkimMatcherV2) -> Vec<(usize, usize)> {
    let Some((_score, indices)) = matcher.fuzzy_indices(text, query) else {
        return vec![];
    };

    let mut ranges: Vec<(usize, usize)> = Vec::new();
    for idx in indices {
        match ranges.last_mut() {
            Some((_, end)) if *end == idx => *end = idx + 1,
            _ => ranges.push((idx, idx + 1)),
        }
    }
    ranges
}

#[cfg(test)]
mod tests {
    use super::*;

    fn state_with_results(results: &str) -> AppState {
        let mut state = AppState::new(Theme::default());
        let query = search::compose("food", &state.filters, None).unwrap();
        let ticket = state.session.submit(&query).unwrap();
        state.session.resolve(ticket.token, 200, results.as_bytes());
        state.install_results();
        state
    }

    #[test]
    fn window_keeps_selection_visible() {
        let heights = [6, 6, 6, 6, 6];
        assert_eq!(visible_window(&heights, 0, 13), (0, 2));
        assert_eq!(visible_window(&heights, 4, 13), (3, 5));
        assert_eq!(visible_window(&heights, 2, 3), (2, 3));
        assert_eq!(visible_window(&[], 0, 10), (0, 0));
    }

    #[test]
    fn highlight_ranges_are_coalesced() {
        let matcher = SkimMatcherV2::default();
        assert_eq!(compute_highlight_ranges("Cheap lunch", "che", &matcher), vec![(0, 3)]);
        assert!(compute_highlight_ranges("Cheap lunch", "xyz", &matcher).is_empty());
    }

    #[test]
    fn suggestions_list_recent_before_canned() {
        let mut state = AppState::new(Theme::default());
        state.recent.record("ramen");

        let all = state.suggestions();
        assert_eq!(all.len(), 6);
        assert_eq!(all[0].kind, SuggestionKind::Recent);

        state.query = "veg".to_string();
        let filtered: Vec<String> = state.suggestions().into_iter().map(|s| s.text).collect();
        assert_eq!(filtered, ["Vegetarian friendly cafes"]);
    }

    #[test]
    fn selection_tracks_visible_cards() {
        let mut state = state_with_results(
            r#"{"restaurants": [{"name": "a", "rating": 2}, {"name": "b", "rating": 4}, {"name": "c", "rating": 5}]}"#,
        );
        state.move_selection_down();
        state.move_selection_down();
        assert_eq!(state.selected_restaurant().map(|r| r.name.as_str()), Some("c"));

        state.filters.set_min_rating(4.0);
        state.clamp_selection();
        assert_eq!(state.selected_index, 1);
        assert_eq!(state.selected_result_index(), Some(2));

        state.move_selection_down();
        assert_eq!(state.selected_restaurant().map(|r| r.name.as_str()), Some("b"));
    }

    #[test]
    fn viewmodel_reports_filtered_count_and_no_matches() {
        let mut state = state_with_results(r#"{"restaurants": [{"name": "a", "rating": 3}, {"name": "b", "rating": 4.5}]}"#);

        let BodyView::Results(results) = state.compute_viewmodel(60, 100).body else {
            panic!("expected results");
        };
        assert_eq!(results.heading, "Found 2 restaurants for you");

        state.filters.set_min_rating(5.0);
        assert!(matches!(state.compute_viewmodel(60, 100).body, BodyView::NoMatches(_)));
    }

    #[test]
    fn empty_result_set_shows_welcome() {
        let state = state_with_results(r#"{"restaurants": []}"#);
        assert!(matches!(state.compute_viewmodel(60, 100).body, BodyView::Welcome(_)));
    }

    #[test]
    fn open_card_shows_links_and_review_window() {
        let review = |author: &str| crate::domain::Review {
            author_name: author.to_string(),
            rating: 4,
            text: "solid".to_string(),
            time: "2 days ago".to_string(),
        };
        let restaurant = Restaurant::new("Zen")
            .with_website("https://zen.example")
            .with_maps_link("https://maps.example/zen")
            .with_reviews(vec![review("ana"), review("bo"), review("cy"), review("di")]);
        let mut card = CardState::for_restaurant(&restaurant);
        card.reviews.toggle();

        let view = AppState::compute_card(&restaurant, &card, true, 80);

        assert!(view.has_website && view.has_map);
        let reviews = view.reviews.unwrap();
        assert_eq!(reviews.items.len(), VISIBLE_REVIEWS);
        assert_eq!(reviews.total, 4);
        assert!(reviews.is_scrollable());
    }

    #[test]
    fn missing_rating_displays_placeholder() {
        let card = AppState::compute_card(&Restaurant::new("x"), &CardState::for_restaurant(&Restaurant::new("x")), false, 80);
        assert_eq!(card.rating, "n/a");
        assert_eq!(card.price, "$$");
        assert_eq!(card.photo_position, None);
    }
}
