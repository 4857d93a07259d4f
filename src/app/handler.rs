//! Event handling and state transition logic.
//!
//! This module implements the core event handler that processes user input,
//! web responses and worker responses, translating them into state changes
//! and action sequences. It serves as the primary control flow coordinator
//! for the application.
//!
//! # Architecture
//!
//! The handler follows a unidirectional data flow pattern:
//! 1. Events arrive from the plugin runtime or worker thread
//! 2. [`handle_event`] pattern-matches the event type
//! 3. State mutations occur via `AppState` methods
//! 4. Actions are collected and returned for execution
//!
//! # Event Types
//!
//! Events fall into several categories:
//! - **Navigation**: `KeyDown`, `KeyUp`
//! - **Input**: `Char`, `Backspace`, `Escape`, `SubmitSearch`, `ApplySuggestion`
//! - **Mode Switching**: `SearchMode`, `FocusSuggestions`, `ToggleFilters`
//! - **Cards**: photo, review and link events for the selected card
//! - **Filters**: `FilterLeft`, `FilterRight`, `FilterToggle`, `ResetFilters`
//! - **System**: `PermissionsGranted`, `SearchResponse`, `LocationResponse`
//! - **Worker**: `WorkerResponse` with typed message variants
//!
//! # Example
//!
//! ```rust
//! use foodquest::app::{handle_event, AppState, Event};
//! use foodquest::ui::Theme;
//!
//! let mut state = AppState::new(Theme::default());
//! let (render, actions) = handle_event(&mut state, &Event::SearchMode)?;
//! assert!(render && actions.is_empty());
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

use super::cards::VISIBLE_REVIEWS;
use super::modes::{FilterFocus, InputMode, SearchFocus};
use crate::app::{Action, AppState};
use crate::domain::error::{FoodQuestError, Result};
use crate::domain::CUISINE_OPTIONS;
use crate::search::{self, Resolution};
use crate::worker::{WorkerMessage, WorkerResponse};

/// Events triggered by user input, web responses, or worker responses.
///
/// Each event represents a discrete occurrence that may cause state changes
/// and action emissions. The event handler processes these sequentially,
/// ensuring deterministic state transitions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    /// Moves the cursor of the focused list down (cards, suggestions or
    /// filter sections).
    KeyDown,
    /// Moves the cursor of the focused list up.
    KeyUp,
    /// Hides the plugin pane.
    CloseFocus,

    /// Focuses the search bar, keeping the current query.
    SearchMode,
    /// Switches between typing and the suggestion list.
    FocusSuggestions,
    /// Appends a character to the query.
    Char(char),
    /// Removes the last character from the query.
    Backspace,
    /// Sends the query to the backend.
    SubmitSearch,
    /// Copies the highlighted suggestion into the query without submitting.
    ApplySuggestion,
    /// Steps back one level: suggestions to typing, typing or filters to
    /// normal mode.
    Escape,

    /// Shows the next photo of the selected card.
    NextPhoto,
    /// Shows the previous photo of the selected card.
    PrevPhoto,
    /// Jumps to the zero-based photo of the selected card.
    JumpToPhoto(usize),
    /// Expands or collapses the reviews of the selected card.
    ToggleReviews,
    ScrollReviewsDown,
    ScrollReviewsUp,
    /// Opens the selected restaurant's map link.
    OpenMap,
    /// Opens the selected restaurant's website.
    OpenWebsite,

    /// Opens or closes the filter panel.
    ToggleFilters,
    /// Moves left within the focused filter section.
    FilterLeft,
    /// Moves right within the focused filter section.
    FilterRight,
    /// Toggles the option under the filter cursor.
    FilterToggle,
    /// Restores the default filters.
    ResetFilters,

    /// Web access permission was granted; network and worker calls may start.
    PermissionsGranted,

    /// Response to a search request.
    SearchResponse {
        /// Token echoed back from the request context.
        token: u64,
        status: u16,
        body: Vec<u8>,
    },

    /// Response to the geolocation lookup.
    LocationResponse { status: u16, body: Vec<u8> },

    /// Wraps a response from the background worker thread.
    WorkerResponse(WorkerResponse),
}

/// Processes an event, mutates application state, and returns actions to execute.
///
/// This is the primary event handler that coordinates all state transitions and
/// side effects. It pattern-matches on event types, calls state mutation methods,
/// and collects actions to be executed by the plugin runtime.
///
/// # Returns
///
/// Whether the UI needs a re-render, and the actions to execute in sequence.
///
/// # Errors
///
/// Returns errors from query serialization. An empty query is not an error:
/// the submission is ignored.
///
/// # Example
///
/// ```rust
/// use foodquest::app::{handle_event, Action, AppState, Event};
/// use foodquest::ui::Theme;
///
/// let mut state = AppState::new(Theme::default());
/// state.query = "sushi".to_string();
/// let (_, actions) = handle_event(&mut state, &Event::SubmitSearch)?;
/// assert!(matches!(actions[0], Action::SendSearch { token: 1, .. }));
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
#[allow(clippy::too_many_lines)]
pub fn handle_event(state: &mut AppState, event: &Event) -> Result<(bool, Vec<Action>)> {
    let _span = tracing::debug_span!("handle_event", event_type = ?event).entered();

    match event {
        Event::KeyDown | Event::KeyUp => {
            let down = *event == Event::KeyDown;
            match state.input_mode {
                InputMode::Normal => {
                    if down {
                        state.move_selection_down();
                    } else {
                        state.move_selection_up();
                    }
                }
                InputMode::Search(SearchFocus::Suggestions) => {
                    let count = state.suggestions().len();
                    if count == 0 {
                        return Ok((false, vec![]));
                    }
                    state.suggestion_index = if down {
                        (state.suggestion_index + 1) % count
                    } else {
                        (state.suggestion_index + count - 1) % count
                    };
                }
                InputMode::Search(SearchFocus::Typing) => return Ok((false, vec![])),
                InputMode::Filters(focus) => {
                    state.input_mode = InputMode::Filters(if down { focus.next() } else { focus.prev() });
                    state.filter_cursor = 0;
                }
            }
            Ok((true, vec![]))
        }
        Event::CloseFocus => Ok((false, vec![Action::CloseFocus])),

        Event::SearchMode => {
            tracing::debug!("focusing search bar");
            state.input_mode = InputMode::Search(SearchFocus::Typing);
            state.show_suggestions = true;
            Ok((true, vec![]))
        }
        Event::FocusSuggestions => {
            match state.input_mode {
                InputMode::Search(SearchFocus::Typing) => {
                    state.show_suggestions = true;
                    if state.suggestions().is_empty() {
                        return Ok((false, vec![]));
                    }
                    state.suggestion_index = 0;
                    state.input_mode = InputMode::Search(SearchFocus::Suggestions);
                }
                InputMode::Search(SearchFocus::Suggestions) => {
                    state.input_mode = InputMode::Search(SearchFocus::Typing);
                }
                InputMode::Normal | InputMode::Filters(_) => return Ok((false, vec![])),
            }
            Ok((true, vec![]))
        }
        Event::Char(c) => {
            if !matches!(state.input_mode, InputMode::Search(_)) {
                return Ok((false, vec![]));
            }
            state.input_mode = InputMode::Search(SearchFocus::Typing);
            state.query.push(*c);
            state.show_suggestions = true;
            state.suggestion_index = 0;
            tracing::trace!(query = %state.query, "search query updated");
            Ok((true, vec![]))
        }
        Event::Backspace => {
            if !matches!(state.input_mode, InputMode::Search(_)) {
                return Ok((false, vec![]));
            }
            state.query.pop();
            state.show_suggestions = true;
            state.suggestion_index = 0;
            Ok((true, vec![]))
        }
        Event::SubmitSearch => submit_search(state),
        Event::ApplySuggestion => {
            if state.input_mode != InputMode::Search(SearchFocus::Suggestions) {
                return Ok((false, vec![]));
            }
            let Some(suggestion) = state.suggestions().into_iter().nth(state.suggestion_index) else {
                return Ok((false, vec![]));
            };
            tracing::debug!(suggestion = %suggestion.text, "suggestion applied");
            state.query = suggestion.text;
            state.show_suggestions = false;
            state.input_mode = InputMode::Search(SearchFocus::Typing);
            Ok((true, vec![]))
        }
        Event::Escape => {
            state.input_mode = match state.input_mode {
                InputMode::Search(SearchFocus::Suggestions) => InputMode::Search(SearchFocus::Typing),
                InputMode::Search(SearchFocus::Typing) | InputMode::Filters(_) => InputMode::Normal,
                InputMode::Normal => return Ok((false, vec![])),
            };
            Ok((true, vec![]))
        }

        Event::NextPhoto | Event::PrevPhoto | Event::JumpToPhoto(_) => {
            let Some((_, card)) = state.selected_card_mut() else {
                return Ok((false, vec![]));
            };
            let before = card.carousel;
            match event {
                Event::NextPhoto => card.carousel.next(),
                Event::PrevPhoto => card.carousel.prev(),
                Event::JumpToPhoto(index) => card.carousel.jump_to(*index),
                _ => {}
            }
            Ok((card.carousel != before, vec![]))
        }
        Event::ToggleReviews => {
            let Some((_, card)) = state.selected_card_mut() else {
                return Ok((false, vec![]));
            };
            card.reviews.toggle();
            Ok((true, vec![]))
        }
        Event::ScrollReviewsDown | Event::ScrollReviewsUp => {
            let Some((restaurant, card)) = state.selected_card_mut() else {
                return Ok((false, vec![]));
            };
            if !card.reviews.is_open() {
                return Ok((false, vec![]));
            }
            let before = card.reviews;
            if *event == Event::ScrollReviewsDown {
                card.reviews.scroll_down(restaurant.reviews.len(), VISIBLE_REVIEWS);
            } else {
                card.reviews.scroll_up();
            }
            Ok((card.reviews != before, vec![]))
        }
        Event::OpenMap | Event::OpenWebsite => {
            let link = state.selected_restaurant().and_then(|restaurant| {
                if *event == Event::OpenMap {
                    restaurant.maps_link.clone()
                } else {
                    restaurant.website.clone()
                }
            });
            Ok((false, link.map(|url| Action::OpenUrl { url }).into_iter().collect()))
        }

        Event::ToggleFilters => {
            state.input_mode = match state.input_mode {
                InputMode::Filters(_) => InputMode::Normal,
                InputMode::Normal | InputMode::Search(_) => InputMode::Filters(FilterFocus::Price),
            };
            state.filter_cursor = 0;
            Ok((true, vec![]))
        }
        Event::FilterLeft | Event::FilterRight => {
            let InputMode::Filters(focus) = state.input_mode else {
                return Ok((false, vec![]));
            };
            let right = *event == Event::FilterRight;
            if focus == FilterFocus::Rating {
                if right {
                    state.filters.raise_min_rating();
                } else {
                    state.filters.lower_min_rating();
                }
                state.clamp_selection();
            } else {
                let last = AppState::filter_section_len(focus).saturating_sub(1);
                state.filter_cursor = if right {
                    (state.filter_cursor + 1).min(last)
                } else {
                    state.filter_cursor.saturating_sub(1)
                };
            }
            Ok((true, vec![]))
        }
        Event::FilterToggle => {
            match state.input_mode {
                InputMode::Filters(FilterFocus::Price) => state.filters.toggle_price(state.filter_cursor),
                InputMode::Filters(FilterFocus::Cuisine) => {
                    let Some(cuisine) = CUISINE_OPTIONS.get(state.filter_cursor) else {
                        return Ok((false, vec![]));
                    };
                    state.filters.toggle_cuisine(cuisine);
                }
                InputMode::Filters(FilterFocus::Rating) | InputMode::Normal | InputMode::Search(_) => {
                    return Ok((false, vec![]));
                }
            }
            tracing::debug!(filters = ?state.filters, "filters changed");
            state.clamp_selection();
            Ok((true, vec![]))
        }
        Event::ResetFilters => {
            if state.filters.is_default() {
                return Ok((false, vec![]));
            }
            state.filters.reset();
            state.clamp_selection();
            Ok((true, vec![]))
        }

        Event::PermissionsGranted => {
            let mut actions = vec![Action::PostToWorker(WorkerMessage::load_recent_searches())];
            let geolocation_url = state.geolocation_url.clone();
            if let Some(url) = state.geolocation.start(geolocation_url.as_deref()) {
                tracing::debug!(url = %url, "probing geolocation");
                actions.push(Action::ProbeLocation { url });
            }
            Ok((true, actions))
        }
        Event::SearchResponse { token, status, body } => {
            match state.session.resolve(*token, *status, body) {
                None => {
                    tracing::debug!(token, "discarding superseded search response");
                    Ok((false, vec![]))
                }
                Some(Resolution::Succeeded { prompt, count }) => {
                    tracing::debug!(token, count, "search succeeded");
                    state.install_results();
                    state.recent.record(&prompt);
                    let entries = state.recent.entries().to_vec();
                    Ok((true, vec![Action::PostToWorker(WorkerMessage::save_recent_searches(entries))]))
                }
                Some(Resolution::Failed { status }) => {
                    tracing::warn!(token, status, "search failed");
                    state.install_results();
                    Ok((true, vec![]))
                }
            }
        }
        Event::LocationResponse { status, body } => {
            let changed = state.geolocation.resolve(*status, body);
            tracing::debug!(status, state = ?state.geolocation.state(), "geolocation response");
            Ok((changed, vec![]))
        }

        Event::WorkerResponse(response) => match response {
            WorkerResponse::RecentSearchesLoaded { entries } => {
                tracing::debug!(count = entries.len(), "recent searches loaded");
                state.recent.merge_loaded(entries.clone());
                Ok((state.suggestions_visible(), vec![]))
            }
            WorkerResponse::RecentSearchesSaved { count } => {
                tracing::trace!(count, "recent searches saved");
                Ok((false, vec![]))
            }
            WorkerResponse::Error { message } => {
                tracing::error!("Worker error: {}", message);
                Ok((false, vec![]))
            }
        },
    }
}

fn submit_search(state: &mut AppState) -> Result<(bool, Vec<Action>)> {
    if state.session.is_loading() {
        tracing::debug!("search already in flight, ignoring submit");
        return Ok((false, vec![]));
    }

    let query = match search::compose(&state.query, &state.filters, state.geolocation.current()) {
        Ok(query) => query,
        Err(FoodQuestError::EmptyQuery) => {
            tracing::debug!("ignoring empty query");
            return Ok((false, vec![]));
        }
        Err(e) => return Err(e),
    };

    let ticket = state.session.submit(&query)?;
    tracing::debug!(token = ticket.token, prompt = %ticket.prompt, "search submitted");

    state.cards.clear();
    state.selected_index = 0;
    state.show_suggestions = false;
    state.input_mode = InputMode::Normal;

    Ok((
        true,
        vec![Action::SendSearch {
            token: ticket.token,
            url: state.backend_url.clone(),
            body: ticket.body,
        }],
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::LatLng;
    use crate::search::{GeolocationProbe, SessionState, GENERIC_FAILURE_MESSAGE};
    use crate::ui::Theme;

    const TWO_RESULTS: &str = r#"{"restaurants": [
        {"name": "Sushi Zen", "rating": 4.6, "price_level": 3, "cuisine_types": ["Japanese"],
         "photos": ["a.jpg", "b.jpg"], "maps_link": "https://maps.example/zen",
         "reviews": [{"author_name": "ana", "rating": 5, "text": "great", "time": "1 week ago"}]},
        {"name": "Roll House", "rating": 3.9, "price_level": 2}
    ]}"#;

    fn submit(state: &mut AppState, text: &str) -> u64 {
        state.query = text.to_string();
        let (_, actions) = handle_event(state, &Event::SubmitSearch).unwrap();
        match actions.as_slice() {
            [Action::SendSearch { token, .. }] => *token,
            other => panic!("unexpected actions: {other:?}"),
        }
    }

    fn respond(state: &mut AppState, token: u64, status: u16, body: &str) -> Vec<Action> {
        let event = Event::SearchResponse {
            token,
            status,
            body: body.as_bytes().to_vec(),
        };
        handle_event(state, &event).unwrap().1
    }

    #[test]
    fn blank_query_is_ignored() {
        let mut state = AppState::new(Theme::default());
        state.query = "   ".to_string();
        let (render, actions) = handle_event(&mut state, &Event::SubmitSearch).unwrap();
        assert!(!render);
        assert!(actions.is_empty());
        assert_eq!(state.session.state(), &SessionState::Idle);
    }

    #[test]
    fn submit_while_loading_is_ignored() {
        let mut state = AppState::new(Theme::default());
        submit(&mut state, "tacos");
        let (_, actions) = handle_event(&mut state, &Event::SubmitSearch).unwrap();
        assert!(actions.is_empty());
    }

    #[test]
    fn submit_attaches_resolved_location() {
        let mut state = AppState::new(Theme::default());
        state.geolocation = GeolocationProbe::fixed(LatLng::new(12.9, 77.6).unwrap());
        state.query = "dosa".to_string();
        let (_, actions) = handle_event(&mut state, &Event::SubmitSearch).unwrap();
        let Action::SendSearch { body, url, .. } = &actions[0] else {
            panic!("expected a search");
        };
        assert_eq!(url, crate::app::state::DEFAULT_BACKEND_URL);
        let json: serde_json::Value = serde_json::from_slice(body).unwrap();
        assert_eq!(json["location"], serde_json::json!({"lat": 12.9, "lng": 77.6}));
    }

    #[test]
    fn success_records_recent_search_and_saves() {
        let mut state = AppState::new(Theme::default());
        let token = submit(&mut state, "sushi");
        let actions = respond(&mut state, token, 200, TWO_RESULTS);

        assert_eq!(state.session.results().len(), 2);
        assert_eq!(state.cards.len(), 2);
        assert_eq!(state.recent.entries(), ["sushi"]);
        assert!(matches!(
            actions.as_slice(),
            [Action::PostToWorker(WorkerMessage::SaveRecentSearches { entries, .. })] if entries == &["sushi"]
        ));
    }

    #[test]
    fn failure_leaves_recent_searches_untouched() {
        let mut state = AppState::new(Theme::default());
        let token = submit(&mut state, "sushi");
        let actions = respond(&mut state, token, 500, "oops");

        assert!(actions.is_empty());
        assert_eq!(state.session.error(), Some(GENERIC_FAILURE_MESSAGE));
        assert!(state.recent.is_empty());
    }

    #[test]
    fn card_events_act_on_selected_card() {
        let mut state = AppState::new(Theme::default());
        let token = submit(&mut state, "sushi");
        respond(&mut state, token, 200, TWO_RESULTS);

        let (_, actions) = handle_event(&mut state, &Event::NextPhoto).unwrap();
        assert!(actions.is_empty());
        assert_eq!(state.cards[0].carousel.current(), 1);
        assert_eq!(state.cards[1].carousel.current(), 0);

        let (_, actions) = handle_event(&mut state, &Event::PrevPhoto).unwrap();
        assert!(actions.is_empty());
        assert_eq!(state.cards[0].carousel.current(), 0);

        let (render, actions) = handle_event(&mut state, &Event::JumpToPhoto(1)).unwrap();
        assert!(render && actions.is_empty());
        assert_eq!(state.cards[0].carousel.current(), 1);

        let (render, actions) = handle_event(&mut state, &Event::JumpToPhoto(7)).unwrap();
        assert!(!render && actions.is_empty());

        let (_, actions) = handle_event(&mut state, &Event::ToggleReviews).unwrap();
        assert!(actions.is_empty());
        assert!(state.cards[0].reviews.is_open());

        let (_, actions) = handle_event(&mut state, &Event::OpenMap).unwrap();
        assert_eq!(
            actions,
            vec![Action::OpenUrl {
                url: "https://maps.example/zen".to_string()
            }]
        );

        let (_, actions) = handle_event(&mut state, &Event::OpenWebsite).unwrap();
        assert!(actions.is_empty());
    }

    #[test]
    fn filter_panel_edits_filters() {
        let mut state = AppState::new(Theme::default());
        handle_event(&mut state, &Event::ToggleFilters).unwrap();
        assert_eq!(state.input_mode, InputMode::Filters(FilterFocus::Price));

        handle_event(&mut state, &Event::FilterRight).unwrap();
        handle_event(&mut state, &Event::FilterToggle).unwrap();
        assert_eq!(state.filters.price, [true, false, true, true]);

        handle_event(&mut state, &Event::KeyDown).unwrap();
        handle_event(&mut state, &Event::FilterRight).unwrap();
        assert!((state.filters.min_rating.stars() - 0.5).abs() < f64::EPSILON);

        handle_event(&mut state, &Event::KeyDown).unwrap();
        handle_event(&mut state, &Event::FilterToggle).unwrap();
        assert_eq!(state.filters.cuisines, ["Italian"]);

        handle_event(&mut state, &Event::ResetFilters).unwrap();
        assert!(state.filters.is_default());

        handle_event(&mut state, &Event::Escape).unwrap();
        assert_eq!(state.input_mode, InputMode::Normal);
    }

    #[test]
    fn applying_suggestion_fills_query_without_submitting() {
        let mut state = AppState::new(Theme::default());
        handle_event(&mut state, &Event::SearchMode).unwrap();
        handle_event(&mut state, &Event::FocusSuggestions).unwrap();
        handle_event(&mut state, &Event::KeyDown).unwrap();
        let (_, actions) = handle_event(&mut state, &Event::ApplySuggestion).unwrap();

        assert!(actions.is_empty());
        assert_eq!(state.query, "Cheap lunch spots nearby");
        assert!(!state.suggestions_visible());
        assert_eq!(state.session.state(), &SessionState::Idle);
    }

    #[test]
    fn permissions_load_recent_searches_and_probe_location() {
        let mut state = AppState::new(Theme::default());
        state.geolocation_url = Some("https://ipinfo.io/json".to_string());

        let (_, actions) = handle_event(&mut state, &Event::PermissionsGranted).unwrap();
        assert_eq!(actions.len(), 2);
        assert!(matches!(actions[0], Action::PostToWorker(WorkerMessage::LoadRecentSearches { .. })));
        assert_eq!(
            actions[1],
            Action::ProbeLocation {
                url: "https://ipinfo.io/json".to_string()
            }
        );

        let body = br#"{"loc": "12.97,77.59"}"#.to_vec();
        handle_event(&mut state, &Event::LocationResponse { status: 200, body }).unwrap();
        assert_eq!(state.geolocation.current(), LatLng::new(12.97, 77.59).ok());
    }

    #[test]
    fn loaded_recent_searches_merge_behind_session_entries() {
        let mut state = AppState::new(Theme::default());
        state.recent.record("pho");
        let loaded = WorkerResponse::RecentSearchesLoaded {
            entries: vec!["tacos".to_string(), "pho".to_string()],
        };
        handle_event(&mut state, &Event::WorkerResponse(loaded)).unwrap();
        assert_eq!(state.recent.entries(), ["pho", "tacos"]);
    }
}
