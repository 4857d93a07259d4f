//! One-shot location probe.
//!
//! The probe is started once when the plugin loads and resolves at most once.
//! Its result, if any, is attached to every search submitted afterwards.
//! Searches never wait for it: until it resolves they go out with
//! `"location": null`.

use crate::domain::LatLng;
use serde_json::Value as JsonValue;

/// Lifecycle of the probe. `Resolved` and `Unavailable` are terminal.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub enum ProbeState {
    #[default]
    NotStarted,
    Pending,
    Resolved(LatLng),
    Unavailable,
}

/// Resolve-at-most-once holder for the user's approximate position.
#[derive(Debug, Clone, Default)]
pub struct GeolocationProbe {
    state: ProbeState,
}

impl GeolocationProbe {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// A probe already resolved to a fixed position (from configuration).
    #[must_use]
    pub fn fixed(location: LatLng) -> Self {
        Self {
            state: ProbeState::Resolved(location),
        }
    }

    /// Starts the probe.
    ///
    /// With a lookup URL the probe becomes `Pending` and the URL is returned
    /// so the caller can issue the request; without one it becomes
    /// `Unavailable`. Does nothing (and returns `None`) if already started.
    pub fn start(&mut self, lookup_url: Option<&str>) -> Option<String> {
        if self.state != ProbeState::NotStarted {
            return None;
        }

        match lookup_url {
            Some(url) => {
                tracing::debug!(url, "geolocation lookup started");
                self.state = ProbeState::Pending;
                Some(url.to_string())
            }
            None => {
                tracing::debug!("no geolocation source configured");
                self.state = ProbeState::Unavailable;
                None
            }
        }
    }

    /// Applies the lookup response. Ignored unless the probe is `Pending`.
    ///
    /// Returns `true` if the state changed.
    pub fn resolve(&mut self, status: u16, body: &[u8]) -> bool {
        if self.state != ProbeState::Pending {
            tracing::debug!(state = ?self.state, "ignoring late geolocation response");
            return false;
        }

        self.state = if (200..300).contains(&status) {
            parse_fix(body).map_or(ProbeState::Unavailable, ProbeState::Resolved)
        } else {
            ProbeState::Unavailable
        };

        tracing::debug!(status, state = ?self.state, "geolocation resolved");
        true
    }

    #[must_use]
    pub fn state(&self) -> ProbeState {
        self.state
    }

    /// The resolved position, if any.
    #[must_use]
    pub fn current(&self) -> Option<LatLng> {
        match self.state {
            ProbeState::Resolved(location) => Some(location),
            _ => None,
        }
    }
}

/// Extracts a position from a geolocation service response.
///
/// Accepts `lat`/`lng`, `lat`/`lon` or `latitude`/`longitude` pairs (numbers
/// or numeric strings), or a single `loc` string of the form `"lat,lng"`.
#[must_use]
pub fn parse_fix(body: &[u8]) -> Option<LatLng> {
    const PAIRS: [(&str, &str); 3] = [("lat", "lng"), ("lat", "lon"), ("latitude", "longitude")];

    let json: JsonValue = serde_json::from_slice(body).ok()?;
    let object = json.as_object()?;

    PAIRS
        .iter()
        .find_map(|(lat_key, lng_key)| {
            let lat = coordinate(object.get(*lat_key)?)?;
            let lng = coordinate(object.get(*lng_key)?)?;
            LatLng::new(lat, lng).ok()
        })
        .or_else(|| object.get("loc")?.as_str()?.parse().ok())
}

fn coordinate(value: &JsonValue) -> Option<f64> {
    match value {
        JsonValue::Number(n) => n.as_f64(),
        JsonValue::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_common_response_shapes() {
        let expected = Some(LatLng { lat: 1.5, lng: 2.5 });
        assert_eq!(parse_fix(br#"{"lat": 1.5, "lng": 2.5}"#), expected);
        assert_eq!(parse_fix(br#"{"lat": 1.5, "lon": 2.5, "city": "X"}"#), expected);
        assert_eq!(parse_fix(br#"{"latitude": "1.5", "longitude": 2.5}"#), expected);
        assert_eq!(parse_fix(br#"{"loc": "1.5,2.5"}"#), expected);
    }

    #[test]
    fn rejects_unusable_responses() {
        assert_eq!(parse_fix(b"not json"), None);
        assert_eq!(parse_fix(br#"{"lat": 1.5}"#), None);
        assert_eq!(parse_fix(br#"{"lat": 100, "lng": 0}"#), None);
        assert_eq!(parse_fix(br"[1.5, 2.5]"), None);
    }

    #[test]
    fn resolves_at_most_once() {
        let mut probe = GeolocationProbe::new();
        assert_eq!(probe.start(Some("http://geo")), Some("http://geo".to_string()));
        assert_eq!(probe.start(Some("http://geo")), None);
        assert_eq!(probe.current(), None);

        assert!(probe.resolve(200, br#"{"lat": 10, "lng": 20}"#));
        assert_eq!(probe.current(), Some(LatLng { lat: 10.0, lng: 20.0 }));

        assert!(!probe.resolve(200, br#"{"lat": 0, "lng": 0}"#));
        assert_eq!(probe.current(), Some(LatLng { lat: 10.0, lng: 20.0 }));
    }

    #[test]
    fn failure_and_missing_source_are_unavailable() {
        let mut probe = GeolocationProbe::new();
        probe.start(Some("http://geo"));
        probe.resolve(503, b"");
        assert_eq!(probe.state(), ProbeState::Unavailable);

        let mut probe = GeolocationProbe::new();
        assert_eq!(probe.start(None), None);
        assert_eq!(probe.state(), ProbeState::Unavailable);
    }

    #[test]
    fn fixed_probe_ignores_start() {
        let here = LatLng { lat: -1.0, lng: 1.0 };
        let mut probe = GeolocationProbe::fixed(here);
        assert_eq!(probe.start(Some("http://geo")), None);
        assert_eq!(probe.current(), Some(here));
    }
}
