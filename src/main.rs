//! Zellij plugin wrapper and entry point.
//!
//! This module provides the thin integration layer between the FoodQuest library
//! and the Zellij plugin system. It implements the `ZellijPlugin` trait,
//! registers the recent-search worker, and turns library actions into host
//! calls.
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────────────────┐
//! │   Zellij Main Thread     │
//! │  ┌──────────────────┐    │
//! │  │  State (plugin)  │────┼──▶ web_request (search, geolocation)
//! │  └──────────────────┘    │
//! │          │ IPC           │
//! │          ▼               │
//! │  ┌──────────────────┐    │
//! │  │ FoodQuestWorker  │    │  ← recentSearches.json
//! │  │ (worker thread)  │    │
//! │  └──────────────────┘    │
//! └──────────────────────────┘
//! ```
//!
//! # Plugin Lifecycle
//!
//! 1. **Load**: Parse config, initialize tracing, create `AppState`
//! 2. **Subscribe**: Key, `CustomMessage`, `WebRequestResult`, `RunCommandResult`
//! 3. **Permissions granted**: Load recent searches, probe geolocation
//! 4. **Update**: Map events, delegate to `handle_event`, execute actions
//! 5. **Render**: Call library render function
//!
//! # Web Requests
//!
//! Each request carries a context map. `kind` is `search` or `geolocation`;
//! searches also carry the session `token`, which comes back with the
//! response so superseded results can be dropped.
//!
//! # Keybindings
//!
//! Global (all modes):
//! - `Ctrl+n`: Move down
//! - `Ctrl+p`: Move up
//!
//! In normal mode:
//! - `j`/`k`/`Down`/`Up`: Select card
//! - `h`/`l`/`Left`/`Right`: Previous/next photo
//! - `1`-`9`: Jump to photo
//! - `r`/`Enter`: Show or hide reviews
//! - `J`/`K`: Scroll reviews
//! - `m`: Open map, `w`: Open website
//! - `/`/`s`: Focus the search bar
//! - `f`: Open filters, `x`: Reset filters
//! - `q`: Close plugin
//!
//! In search mode:
//! - Characters: Type the query
//! - `Enter`: Search (or apply the highlighted suggestion)
//! - `Tab`: Switch between input and suggestions
//! - `Esc`: Step back
//!
//! In filter mode:
//! - `j`/`k`: Change section, `h`/`l`: Move within section
//! - `Space`/`Enter`: Toggle, `x`: Reset, `f`/`Esc`: Close

#![allow(clippy::multiple_crate_versions)]

use std::collections::BTreeMap;
use zellij_tile::prelude::*;
use zellij_tile::shim::post_message_to;

use foodquest::worker::{FoodQuestWorker, WorkerMessage, WorkerResponse};
use foodquest::{handle_event, Action, Config, Event, InputMode, SearchFocus};

// Register plugin and worker with Zellij
register_plugin!(State);
register_worker!(FoodQuestWorker, foodquest_worker, FOODQUEST_WORKER);

/// Context key naming the request type.
const CONTEXT_KIND: &str = "kind";
/// Context key carrying the search token.
const CONTEXT_TOKEN: &str = "token";
const KIND_SEARCH: &str = "search";
const KIND_GEOLOCATION: &str = "geolocation";

/// Plugin state wrapper.
///
/// Wraps the library's `AppState` with Zellij-specific concerns like worker
/// communication and the link opener.
struct State {
    /// Core application state from library layer.
    app: foodquest::AppState,

    /// Worker thread identifier for IPC messaging.
    worker_name: String,

    /// Command used for `OpenUrl` actions.
    opener: String,
}

impl Default for State {
    fn default() -> Self {
        let default_config = Config::default();
        Self {
            app: foodquest::initialize(&default_config),
            worker_name: "foodquest".to_string(),
            opener: default_config.opener,
        }
    }
}

impl ZellijPlugin for State {
    /// Initializes the plugin on load.
    ///
    /// # Permissions
    ///
    /// - `WebAccess`: Search backend and geolocation lookup
    /// - `RunCommands`: Open links with the configured opener
    fn load(&mut self, configuration: BTreeMap<String, String>) {
        let config = Config::from_zellij(&configuration);
        foodquest::observability::init_tracing(&config);

        let _guard = tracing::debug_span!("plugin_load").entered();

        tracing::debug!(backend_url = %config.backend_url, location = ?config.location, "parsed configuration");
        self.app = foodquest::initialize(&config);
        self.opener.clone_from(&config.opener);

        request_permission(&[PermissionType::WebAccess, PermissionType::RunCommands]);

        subscribe(&[
            EventType::Key,
            EventType::CustomMessage,
            EventType::WebRequestResult,
            EventType::RunCommandResult,
            EventType::PermissionRequestResult,
        ]);

        tracing::debug!("plugin load complete - waiting for permissions");
    }

    /// Handles incoming Zellij events.
    ///
    /// Translates Zellij events to library events, delegates to `handle_event`,
    /// and executes resulting actions. Returns `true` if the UI should re-render.
    fn update(&mut self, event: zellij_tile::prelude::Event) -> bool {
        let event_name = Self::get_event_name(&event);
        let span_name = format!("plugin_update::{event_name}");
        let _guard =
            tracing::debug_span!("plugin_update_event", otel.name = %span_name, event_type = %event_name).entered();

        let our_event = match event {
            zellij_tile::prelude::Event::Key(ref key) => match self.map_key_event(key) {
                Some(event) => event,
                None => return false,
            },
            zellij_tile::prelude::Event::CustomMessage(message, payload) => {
                match self.map_custom_message_event(&message, &payload) {
                    Some(event) => event,
                    None => return false,
                }
            }
            zellij_tile::prelude::Event::WebRequestResult(status, _headers, body, context) => {
                match Self::map_web_result_event(status, body, &context) {
                    Some(event) => event,
                    None => return false,
                }
            }
            zellij_tile::prelude::Event::RunCommandResult(exit_code, _stdout, stderr, _context) => {
                if exit_code != Some(0) {
                    tracing::warn!(
                        exit_code = ?exit_code,
                        stderr = %String::from_utf8_lossy(&stderr),
                        "opener command failed"
                    );
                }
                return false;
            }
            zellij_tile::prelude::Event::PermissionRequestResult(PermissionStatus::Granted) => {
                tracing::debug!("permissions granted");
                Event::PermissionsGranted
            }
            zellij_tile::prelude::Event::PermissionRequestResult(PermissionStatus::Denied) => {
                tracing::warn!("permissions denied - searches cannot reach the backend");
                return false;
            }
            _ => return false,
        };

        match handle_event(&mut self.app, &our_event) {
            Ok((should_render, actions)) => {
                tracing::debug!(action_count = actions.len(), should_render, "event handled successfully");
                for a in actions {
                    self.execute_action(&a);
                }
                should_render
            }
            Err(e) => {
                tracing::debug!(error = %e, "error handling event");
                false
            }
        }
    }

    fn render(&mut self, rows: usize, cols: usize) {
        foodquest::ui::render(&self.app, rows, cols);
    }
}

impl State {
    /// Gets a string name for a Zellij event for logging purposes.
    fn get_event_name(event: &zellij_tile::prelude::Event) -> String {
        match event {
            zellij_tile::prelude::Event::Key(key) => format!("Key({:?})", key.bare_key),
            zellij_tile::prelude::Event::CustomMessage(msg, _) => format!("CustomMessage({msg})"),
            zellij_tile::prelude::Event::WebRequestResult(status, ..) => format!("WebRequestResult({status})"),
            zellij_tile::prelude::Event::RunCommandResult(..) => "RunCommandResult".to_string(),
            zellij_tile::prelude::Event::PermissionRequestResult(..) => "PermissionRequestResult".to_string(),
            _ => "Other".to_string(),
        }
    }

    /// Maps keyboard events to application events for the current mode.
    fn map_key_event(&self, key: &KeyWithModifier) -> Option<Event> {
        tracing::debug!(bare_key = ?key.bare_key, "key event");

        if key.bare_key == BareKey::Char('n') && key.has_modifiers(&[KeyModifier::Ctrl]) {
            return Some(Event::KeyDown);
        }
        if key.bare_key == BareKey::Char('p') && key.has_modifiers(&[KeyModifier::Ctrl]) {
            return Some(Event::KeyUp);
        }

        match self.app.input_mode {
            InputMode::Normal => Self::map_normal_key(key.bare_key),
            InputMode::Search(focus) => Self::map_search_key(key.bare_key, focus),
            InputMode::Filters(_) => Self::map_filter_key(key.bare_key),
        }
    }

    fn map_normal_key(key: BareKey) -> Option<Event> {
        Some(match key {
            BareKey::Down | BareKey::Char('j') => Event::KeyDown,
            BareKey::Up | BareKey::Char('k') => Event::KeyUp,
            BareKey::Right | BareKey::Char('l') => Event::NextPhoto,
            BareKey::Left | BareKey::Char('h') => Event::PrevPhoto,
            BareKey::Char(c @ '1'..='9') => Event::JumpToPhoto(c as usize - '1' as usize),
            BareKey::Enter | BareKey::Char('r') => Event::ToggleReviews,
            BareKey::Char('J') => Event::ScrollReviewsDown,
            BareKey::Char('K') => Event::ScrollReviewsUp,
            BareKey::Char('m') => Event::OpenMap,
            BareKey::Char('w') => Event::OpenWebsite,
            BareKey::Char('/' | 's') => Event::SearchMode,
            BareKey::Char('f') => Event::ToggleFilters,
            BareKey::Char('x') => Event::ResetFilters,
            BareKey::Char('q') => Event::CloseFocus,
            BareKey::Esc => Event::Escape,
            _ => return None,
        })
    }

    fn map_search_key(key: BareKey, focus: SearchFocus) -> Option<Event> {
        Some(match (key, focus) {
            (BareKey::Tab, _) => Event::FocusSuggestions,
            (BareKey::Down, SearchFocus::Typing) => Event::FocusSuggestions,
            (BareKey::Down | BareKey::Char('j'), SearchFocus::Suggestions) => Event::KeyDown,
            (BareKey::Up | BareKey::Char('k'), SearchFocus::Suggestions) => Event::KeyUp,
            (BareKey::Enter, SearchFocus::Typing) => Event::SubmitSearch,
            (BareKey::Enter, SearchFocus::Suggestions) => Event::ApplySuggestion,
            (BareKey::Esc, _) => Event::Escape,
            (BareKey::Backspace, _) => Event::Backspace,
            (BareKey::Char(c), _) => Event::Char(c),
            _ => return None,
        })
    }

    fn map_filter_key(key: BareKey) -> Option<Event> {
        Some(match key {
            BareKey::Down | BareKey::Char('j') | BareKey::Tab => Event::KeyDown,
            BareKey::Up | BareKey::Char('k') => Event::KeyUp,
            BareKey::Left | BareKey::Char('h') => Event::FilterLeft,
            BareKey::Right | BareKey::Char('l') => Event::FilterRight,
            BareKey::Char(' ') | BareKey::Enter => Event::FilterToggle,
            BareKey::Char('x') => Event::ResetFilters,
            BareKey::Char('f') | BareKey::Esc => Event::ToggleFilters,
            BareKey::Char('q') => Event::CloseFocus,
            _ => return None,
        })
    }

    /// Maps custom message events to application events.
    fn map_custom_message_event(&self, message: &str, payload: &str) -> Option<Event> {
        tracing::debug!(message_name = %message, payload_len = payload.len(), "custom message event");

        if message != self.worker_name {
            tracing::debug!(message_name = %message, "ignoring custom message with unknown name");
            return None;
        }

        match serde_json::from_str::<WorkerResponse>(payload) {
            Ok(response) => {
                tracing::debug!(response = ?response, "worker response received");
                Some(Event::WorkerResponse(response))
            }
            Err(e) => {
                tracing::debug!(error = %e, "failed to deserialize worker response");
                None
            }
        }
    }

    /// Maps a web request result to a search or geolocation response using
    /// the context attached when the request was sent.
    fn map_web_result_event(status: u16, body: Vec<u8>, context: &BTreeMap<String, String>) -> Option<Event> {
        tracing::debug!(status, body_len = body.len(), context = ?context, "web request result");

        match context.get(CONTEXT_KIND).map(String::as_str) {
            Some(KIND_SEARCH) => {
                let Some(token) = context.get(CONTEXT_TOKEN).and_then(|t| t.parse::<u64>().ok()) else {
                    tracing::debug!("search response without a valid token");
                    return None;
                };
                Some(Event::SearchResponse { token, status, body })
            }
            Some(KIND_GEOLOCATION) => Some(Event::LocationResponse { status, body }),
            other => {
                tracing::debug!(kind = ?other, "ignoring web response of unknown kind");
                None
            }
        }
    }

    /// Posts a message to the worker thread.
    ///
    /// Logs serialization errors but does not propagate them.
    fn post_worker_message(&self, message: &WorkerMessage) {
        match serde_json::to_string(&message) {
            Ok(payload) => {
                tracing::debug!(payload_len = payload.len(), "posting message to worker");
                post_message_to(PluginMessage {
                    worker_name: Some(self.worker_name.clone()),
                    name: self.worker_name.clone(),
                    payload,
                });
            }
            Err(e) => {
                tracing::debug!(error = %e, "failed to serialize worker message");
            }
        }
    }

    /// Executes an action returned from event handling.
    ///
    /// - `CloseFocus`: Hide the plugin pane
    /// - `PostToWorker`: Send IPC message to worker thread
    /// - `SendSearch`: `POST` the query body to the backend
    /// - `ProbeLocation`: `GET` the geolocation endpoint
    /// - `OpenUrl`: Run the opener command with the link
    #[tracing::instrument(level = "debug", skip(self))]
    fn execute_action(&self, action: &Action) {
        match action {
            Action::CloseFocus => {
                tracing::debug!("closing plugin focus");
                hide_self();
            }
            Action::PostToWorker(message) => {
                self.post_worker_message(message);
            }
            Action::SendSearch { token, url, body } => {
                tracing::debug!(token, url = %url, body_len = body.len(), "sending search request");
                let headers = BTreeMap::from([("Content-Type".to_string(), "application/json".to_string())]);
                let context = BTreeMap::from([
                    (CONTEXT_KIND.to_string(), KIND_SEARCH.to_string()),
                    (CONTEXT_TOKEN.to_string(), token.to_string()),
                ]);
                web_request(url, HttpVerb::Post, headers, body.clone(), context);
            }
            Action::ProbeLocation { url } => {
                tracing::debug!(url = %url, "requesting geolocation");
                let context = BTreeMap::from([(CONTEXT_KIND.to_string(), KIND_GEOLOCATION.to_string())]);
                web_request(url, HttpVerb::Get, BTreeMap::new(), vec![], context);
            }
            Action::OpenUrl { url } => {
                tracing::debug!(opener = %self.opener, url = %url, "opening link");
                run_command(&[self.opener.as_str(), url.as_str()], BTreeMap::new());
            }
        }
    }
}
