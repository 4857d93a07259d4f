//! Drives the plugin state machine through complete search round trips.

use foodquest::search::{SessionState, GENERIC_FAILURE_MESSAGE};
use foodquest::worker::WorkerMessage;
use foodquest::{handle_event, initialize, Action, AppState, Config, Event};

const RESULTS: &str = r#"{
    "restaurants": [
        {"name": "Sushi Zen", "rating": 4.6, "price_level": 3, "cuisine_types": ["Japanese"],
         "photos": ["a.jpg", "b.jpg"], "website": "https://zen.example"},
        {"name": "Roll House", "rating": 3.4, "price_level": 1}
    ],
    "parsed_prompt": {"dish": "sushi"},
    "processing_time": 0.84
}"#;

fn submit(state: &mut AppState, text: &str) -> (u64, Vec<u8>) {
    state.query = text.to_string();
    let (render, actions) = handle_event(state, &Event::SubmitSearch).unwrap();
    assert!(render);
    match actions.as_slice() {
        [Action::SendSearch { token, url, body }] => {
            assert_eq!(url, "http://localhost:8000/search");
            (*token, body.clone())
        }
        other => panic!("expected a single search request, got {other:?}"),
    }
}

fn respond(state: &mut AppState, token: u64, status: u16, body: &str) -> (bool, Vec<Action>) {
    let event = Event::SearchResponse {
        token,
        status,
        body: body.as_bytes().to_vec(),
    };
    handle_event(state, &event).unwrap()
}

#[test]
fn sushi_search_round_trip() {
    let mut state = initialize(&Config::default());
    let (token, body) = submit(&mut state, "sushi");

    assert_eq!(
        String::from_utf8(body).unwrap(),
        r#"{"prompt":"sushi","location":null,"filters":{"price":[true,true,true,true],"minRating":0}}"#
    );
    assert!(state.session.is_loading());

    let (render, actions) = respond(&mut state, token, 200, RESULTS);

    assert!(render);
    assert!(matches!(state.session.state(), SessionState::Success(results) if results.len() == 2));
    assert_eq!(state.visible_indices(), vec![0, 1]);
    assert_eq!(state.recent.entries(), ["sushi"]);
    assert!(matches!(
        actions.as_slice(),
        [Action::PostToWorker(WorkerMessage::SaveRecentSearches { entries, .. })] if entries == &["sushi"]
    ));
}

#[test]
fn rating_filter_applies_to_received_results() {
    let mut state = initialize(&Config::default());
    let (token, _) = submit(&mut state, "sushi");
    respond(&mut state, token, 200, RESULTS);

    state.filters.set_min_rating(3.5);

    assert_eq!(state.visible_indices(), vec![0]);
    assert_eq!(state.selected_restaurant().map(|r| r.name.as_str()), Some("Sushi Zen"));
}

#[test]
fn server_error_shows_generic_message() {
    let mut state = initialize(&Config::default());
    let (token, _) = submit(&mut state, "sushi");

    let (render, actions) = respond(&mut state, token, 500, "internal error");

    assert!(render);
    assert!(actions.is_empty());
    assert_eq!(state.session.error(), Some(GENERIC_FAILURE_MESSAGE));
    assert!(state.recent.is_empty());
}

#[test]
fn superseded_response_is_discarded() {
    let mut state = initialize(&Config::default());
    let (first, _) = submit(&mut state, "sushi");
    // A late response from an earlier request must not land on a newer one.
    let stale = first.wrapping_sub(1);

    let (render, actions) = respond(&mut state, stale, 200, RESULTS);

    assert!(!render);
    assert!(actions.is_empty());
    assert!(state.session.is_loading());
    assert!(state.recent.is_empty());

    respond(&mut state, first, 200, RESULTS);
    assert_eq!(state.session.results().len(), 2);
}
