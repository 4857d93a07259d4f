//! FoodQuest: a Zellij plugin for natural-language restaurant discovery.
//!
//! FoodQuest turns a free-text craving ("romantic italian dinner", "cheap
//! ramen near me") into a search request, sends it to a remote search backend,
//! and presents the returned restaurants as browsable cards:
//! - Free-text query composition with an optional geolocation fix
//! - Client-side price, minimum rating and cuisine filters
//! - Per-card photo carousel and expandable, scrollable reviews
//! - Recent searches persisted through a Zellij worker thread
//! - Stale-response protection: only the newest search may update results
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────┐
//! │  Zellij Plugin Shim (main.rs)                       │  ← Entry point
//! │  - key mapping, web requests, action execution      │
//! └─────────────────────────────────────────────────────┘
//!                        │
//! ┌─────────────────────────────────────────────────────┐
//! │  Application Layer (app/)                           │  ← State machine
//! │  - Event handling, card state, view models          │
//! └─────────────────────────────────────────────────────┘
//!         │                    │                    │
//! ┌───────────────┐   ┌───────────────┐   ┌───────────────┐
//! │ Search Layer  │   │ UI Layer      │   │ Worker Layer  │
//! │ (search/)     │   │ (ui/)         │   │ (worker/)     │
//! │ - Composer    │   │ - Rendering   │   │ - Recency I/O │
//! │ - Session     │   │ - Theming     │   │ - IPC bridge  │
//! │ - Filters     │   │ - Components  │   │               │
//! └───────────────┘   └───────────────┘   └───────────────┘
//!         │                                       │
//! ┌─────────────────────────────────────────────────────┐
//! │  Domain, Storage & Infrastructure Layers            │
//! │  - Restaurant, filter and recency models (domain/)  │
//! │  - RecencyStore backends (storage/)                 │
//! │  - Sandbox paths (infrastructure/)                  │
//! └─────────────────────────────────────────────────────┘
//! ```
//!
//! # Configuration
//!
//! Plugin options come from the Zellij layout or config file:
//!
//! ```kdl
//! plugin location="file:~/.config/zellij/plugins/foodquest.wasm" {
//!     backend_url "http://localhost:8000/search"
//!     location "12.9716,77.5946"
//!     opener "xdg-open"
//!     theme "foodquest"
//!     trace_level "debug"
//! }
//! ```
//!
//! # Example
//!
//! ```rust
//! use foodquest::{handle_event, initialize, Config, Event};
//!
//! let mut state = initialize(&Config::default());
//! state.query = "sushi".to_string();
//! let (_render, actions) = handle_event(&mut state, &Event::SubmitSearch)?;
//! assert_eq!(actions.len(), 1);
//! # Ok::<(), foodquest::FoodQuestError>(())
//! ```

#![allow(clippy::multiple_crate_versions)]

pub mod app;
pub mod domain;
pub mod infrastructure;
pub mod search;
pub mod storage;
pub mod worker;

pub mod ui;

pub mod observability;

pub use app::{handle_event, Action, AppState, Event, InputMode, SearchFocus};
pub use domain::{FoodQuestError, LatLng, Restaurant, Result};
pub use ui::Theme;

use search::GeolocationProbe;
use std::collections::BTreeMap;

/// Opener command used when `opener` is not configured.
pub const DEFAULT_OPENER: &str = "xdg-open";

/// Plugin configuration parsed from the Zellij configuration map.
///
/// Every field has a fallback, so a plugin block with no options works against
/// a backend on `localhost:8000`.
#[derive(Debug, Clone)]
pub struct Config {
    /// Search endpoint receiving the JSON `POST`.
    ///
    /// Default: `http://localhost:8000/search`
    pub backend_url: String,

    /// Fixed position attached to every query, from `location "lat,lng"`.
    ///
    /// When set, no geolocation lookup is made.
    pub location: Option<LatLng>,

    /// Endpoint probed once for the current position when `location` is
    /// unset, e.g. `https://ipinfo.io/json`.
    pub geolocation_url: Option<String>,

    /// Command that opens website and map links. Default: `xdg-open`
    pub opener: String,

    /// Built-in theme name to use.
    ///
    /// Options: `foodquest`, `catppuccin-latte`. Ignored if `theme_file` is set.
    pub theme_name: Option<String>,

    /// Path to a custom TOML theme file, with `~` expanded to the sandbox
    /// home mount.
    ///
    /// Takes precedence over `theme_name`. See [`ui::theme`] for format.
    pub theme_file: Option<String>,

    /// Tracing level for OpenTelemetry spans.
    ///
    /// Options: `trace`, `debug`, `info`, `warn`, `error`. Default: `"info"`
    pub trace_level: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            backend_url: app::state::DEFAULT_BACKEND_URL.to_string(),
            location: None,
            geolocation_url: None,
            opener: DEFAULT_OPENER.to_string(),
            theme_name: None,
            theme_file: None,
            trace_level: None,
        }
    }
}

impl Config {
    /// Parses configuration from Zellij's configuration map.
    ///
    /// # Parsing Rules
    ///
    /// - Blank values count as unset
    /// - `location`: `"lat,lng"` → [`LatLng`]; malformed or out-of-range values
    ///   are logged and ignored
    /// - `theme_file`: leading `~` expanded via
    ///   [`infrastructure::expand_tilde`]
    ///
    /// # Example
    ///
    /// ```rust
    /// use std::collections::BTreeMap;
    /// use foodquest::Config;
    ///
    /// let mut map = BTreeMap::new();
    /// map.insert("backend_url".to_string(), "https://api.example.com/search".to_string());
    /// map.insert("location".to_string(), "12.9716, 77.5946".to_string());
    ///
    /// let config = Config::from_zellij(&map);
    /// assert_eq!(config.backend_url, "https://api.example.com/search");
    /// assert!(config.location.is_some());
    /// assert_eq!(config.opener, "xdg-open");
    /// ```
    #[must_use]
    pub fn from_zellij(config: &BTreeMap<String, String>) -> Self {
        let get = |key: &str| {
            config
                .get(key)
                .map(|value| value.trim())
                .filter(|value| !value.is_empty())
                .map(String::from)
        };

        let location = get("location").and_then(|raw| match raw.parse::<LatLng>() {
            Ok(location) => Some(location),
            Err(e) => {
                tracing::warn!(location = %raw, error = %e, "ignoring invalid location");
                None
            }
        });

        let defaults = Self::default();
        Self {
            backend_url: get("backend_url").unwrap_or(defaults.backend_url),
            location,
            geolocation_url: get("geolocation_url"),
            opener: get("opener").unwrap_or(defaults.opener),
            theme_name: get("theme"),
            theme_file: get("theme_file").map(|path| infrastructure::expand_tilde(&path)),
            trace_level: get("trace_level"),
        }
    }

    /// Resolves the theme: file first, then built-in name, then the default.
    ///
    /// Load failures are logged and fall through to the default theme.
    #[must_use]
    pub fn theme(&self) -> Theme {
        if let Some(theme_file) = &self.theme_file {
            match Theme::from_file(theme_file) {
                Ok(theme) => return theme,
                Err(e) => {
                    tracing::debug!(theme_file = %theme_file, error = %e, "failed to load theme from file, using default");
                }
            }
        }

        self.theme_name.as_ref().map_or_else(Theme::default, |theme_name| {
            Theme::from_name(theme_name).unwrap_or_else(|| {
                tracing::debug!(theme_name = %theme_name, "unknown theme, using default");
                Theme::default()
            })
        })
    }
}

/// Builds the initial application state from configuration.
///
/// A configured `location` resolves the geolocation probe immediately;
/// otherwise the probe waits for permissions and the optional lookup URL.
#[must_use]
pub fn initialize(config: &Config) -> AppState {
    tracing::debug!("initializing foodquest plugin");

    let mut state = AppState::new(config.theme());
    state.backend_url.clone_from(&config.backend_url);
    state.geolocation_url.clone_from(&config.geolocation_url);
    if let Some(location) = config.location {
        state.geolocation = GeolocationProbe::fixed(location);
    }
    state
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::search::ProbeState;

    fn map(pairs: &[(&str, &str)]) -> BTreeMap<String, String> {
        pairs.iter().map(|(k, v)| ((*k).to_string(), (*v).to_string())).collect()
    }

    #[test]
    fn empty_map_uses_defaults() {
        let config = Config::from_zellij(&BTreeMap::new());
        assert_eq!(config.backend_url, "http://localhost:8000/search");
        assert_eq!(config.opener, DEFAULT_OPENER);
        assert!(config.location.is_none());
        assert!(config.geolocation_url.is_none());
    }

    #[test]
    fn invalid_location_is_ignored() {
        let config = Config::from_zellij(&map(&[("location", "north pole"), ("backend_url", "  ")]));
        assert!(config.location.is_none());
        assert_eq!(config.backend_url, "http://localhost:8000/search");
    }

    #[test]
    fn theme_file_expands_tilde() {
        let config = Config::from_zellij(&map(&[("theme_file", "~/themes/x.toml")]));
        assert_eq!(config.theme_file.as_deref(), Some("/host/themes/x.toml"));
        assert_eq!(config.theme().name, "foodquest");
    }

    #[test]
    fn configured_location_resolves_probe() {
        let config = Config::from_zellij(&map(&[("location", "48.85,2.35"), ("theme", "catppuccin-latte")]));
        let state = initialize(&config);
        assert!(matches!(state.geolocation.state(), ProbeState::Resolved(_)));
        assert_eq!(state.theme.name, "catppuccin-latte");
    }
}
