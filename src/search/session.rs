//! Search session lifecycle.
//!
//! A [`SearchSession`] tracks one logical search at a time:
//!
//! ```text
//! Idle ──submit──▶ Loading ──2xx + JSON──▶ Success(results)
//!                     │
//!                     └──non-2xx / bad body──▶ Failed(message)
//! ```
//!
//! Every submission is tagged with a fresh token. Responses carrying an older
//! token are dropped, so a slow response to an abandoned search can never
//! overwrite the results of a newer one.

use crate::domain::error::{FoodQuestError, Result};
use crate::domain::{ParsedPrompt, Restaurant};
use crate::search::query::SearchQuery;
use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Deserializer};

/// Message shown for every transport, status or decoding failure.
pub const GENERIC_FAILURE_MESSAGE: &str = "Failed to fetch results. Please try again.";

/// Observable state of the session.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum SessionState {
    #[default]
    Idle,
    Loading,
    Success(Vec<Restaurant>),
    Failed(String),
}

/// Everything the runtime needs to put a submitted search on the wire.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchTicket {
    pub token: u64,
    pub prompt: String,
    pub body: Vec<u8>,
}

/// Outcome of applying a current (non-stale) response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution {
    /// Results were installed. `prompt` is the text that produced them and
    /// should be recorded as a recent search.
    Succeeded { prompt: String, count: usize },

    /// The request failed; the session now shows the generic message.
    Failed { status: u16 },
}

#[derive(Deserialize)]
struct SearchResponseBody {
    #[serde(default)]
    restaurants: Option<Vec<Restaurant>>,
    #[serde(default, deserialize_with = "lenient_parsed_prompt")]
    parsed_prompt: Option<ParsedPrompt>,
}

/// The parsed prompt is display-only, so a malformed one is dropped rather
/// than failing the whole response.
fn lenient_parsed_prompt<'de, D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Option<ParsedPrompt>, D::Error> {
    let value = Option::<serde_json::Value>::deserialize(deserializer)?;
    Ok(value.and_then(|value| match ParsedPrompt::deserialize(value) {
        Ok(prompt) => Some(prompt),
        Err(e) => {
            tracing::debug!(error = %e, "ignoring malformed parsed prompt");
            None
        }
    }))
}

#[derive(Debug, Clone)]
struct InFlight {
    token: u64,
    prompt: String,
    started_at: DateTime<Utc>,
}

/// State machine for the remote search round trip.
#[derive(Debug, Clone, Default)]
pub struct SearchSession {
    state: SessionState,
    last_token: u64,
    in_flight: Option<InFlight>,
    parsed_prompt: Option<ParsedPrompt>,
    elapsed: Option<Duration>,
}

impl SearchSession {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Enters `Loading` for `query` and issues a new token.
    ///
    /// Any previous in-flight request is superseded: its response will be
    /// ignored when it arrives.
    ///
    /// # Errors
    ///
    /// Returns [`FoodQuestError::Json`] if the request body cannot be
    /// serialized. The session is left untouched in that case.
    pub fn submit(&mut self, query: &SearchQuery) -> Result<SearchTicket> {
        let body = query.to_body()?;

        self.last_token += 1;
        let token = self.last_token;

        if let Some(previous) = &self.in_flight {
            tracing::debug!(superseded = previous.token, token, "superseding in-flight search");
        }

        self.in_flight = Some(InFlight {
            token,
            prompt: query.text.clone(),
            started_at: Utc::now(),
        });
        self.state = SessionState::Loading;
        self.parsed_prompt = None;

        tracing::debug!(token, prompt = %query.text, "search submitted");

        Ok(SearchTicket {
            token,
            prompt: query.text.clone(),
            body,
        })
    }

    /// Applies a backend response.
    ///
    /// Returns `None` if `token` does not belong to the in-flight request
    /// (stale or duplicate); the state is not touched.
    pub fn resolve(&mut self, token: u64, status: u16, body: &[u8]) -> Option<Resolution> {
        let _span = tracing::debug_span!("resolve_search", token, status).entered();

        if self.in_flight.as_ref().map(|f| f.token) != Some(token) {
            tracing::debug!(latest = self.last_token, "discarding stale search response");
            return None;
        }
        let in_flight = self.in_flight.take()?;
        self.elapsed = Some(Utc::now() - in_flight.started_at);

        match Self::decode(status, body) {
            Ok(parsed) => {
                let restaurants = parsed.restaurants.unwrap_or_default();
                let count = restaurants.len();
                tracing::debug!(count, "search succeeded");

                self.parsed_prompt = parsed.parsed_prompt;
                self.state = SessionState::Success(restaurants);
                Some(Resolution::Succeeded {
                    prompt: in_flight.prompt,
                    count,
                })
            }
            Err(e) => {
                tracing::warn!(error = %e, "search failed");
                self.state = SessionState::Failed(GENERIC_FAILURE_MESSAGE.to_string());
                Some(Resolution::Failed { status })
            }
        }
    }

    fn decode(status: u16, body: &[u8]) -> Result<SearchResponseBody> {
        if !(200..300).contains(&status) {
            return Err(FoodQuestError::Backend { status });
        }
        Ok(serde_json::from_slice(body)?)
    }

    #[must_use]
    pub fn state(&self) -> &SessionState {
        &self.state
    }

    #[must_use]
    pub fn is_loading(&self) -> bool {
        matches!(self.state, SessionState::Loading)
    }

    /// The raw result set, or an empty slice when not in `Success`.
    #[must_use]
    pub fn results(&self) -> &[Restaurant] {
        match &self.state {
            SessionState::Success(results) => results,
            _ => &[],
        }
    }

    #[must_use]
    pub fn error(&self) -> Option<&str> {
        match &self.state {
            SessionState::Failed(message) => Some(message),
            _ => None,
        }
    }

    #[must_use]
    pub fn parsed_prompt(&self) -> Option<&ParsedPrompt> {
        self.parsed_prompt.as_ref()
    }

    /// Wall time of the most recently completed request.
    #[must_use]
    pub fn elapsed(&self) -> Option<Duration> {
        self.elapsed
    }

    /// Token of the most recent submission, `0` before the first one.
    #[must_use]
    pub fn last_token(&self) -> u64 {
        self.last_token
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::FilterState;
    use crate::search::query::compose;

    fn submit(session: &mut SearchSession, text: &str) -> SearchTicket {
        let query = compose(text, &FilterState::default(), None).unwrap();
        session.submit(&query).unwrap()
    }

    const TWO_RESULTS: &[u8] = br#"{"restaurants": [{"name": "A", "rating": 4.0}, {"name": "B"}]}"#;

    #[test]
    fn submit_enters_loading_with_increasing_tokens() {
        let mut session = SearchSession::new();
        assert_eq!(session.state(), &SessionState::Idle);

        let first = submit(&mut session, "ramen");
        let second = submit(&mut session, "udon");
        assert!(session.is_loading());
        assert!(second.token > first.token);
        assert_eq!(second.prompt, "udon");
    }

    #[test]
    fn success_installs_results() {
        let mut session = SearchSession::new();
        let ticket = submit(&mut session, "sushi");

        let resolution = session.resolve(ticket.token, 200, TWO_RESULTS);
        assert_eq!(
            resolution,
            Some(Resolution::Succeeded {
                prompt: "sushi".to_string(),
                count: 2
            })
        );
        assert_eq!(session.results().len(), 2);
        assert!(session.elapsed().is_some());
    }

    #[test]
    fn missing_or_null_restaurants_is_empty_success() {
        for body in [&br#"{}"#[..], br#"{"restaurants": null}"#] {
            let mut session = SearchSession::new();
            let ticket = submit(&mut session, "x");
            session.resolve(ticket.token, 200, body);
            assert_eq!(session.state(), &SessionState::Success(vec![]));
        }
    }

    #[test]
    fn error_status_and_garbage_body_fail_with_generic_message() {
        let mut session = SearchSession::new();
        let ticket = submit(&mut session, "x");
        assert_eq!(
            session.resolve(ticket.token, 500, TWO_RESULTS),
            Some(Resolution::Failed { status: 500 })
        );
        assert_eq!(session.error(), Some(GENERIC_FAILURE_MESSAGE));

        let ticket = submit(&mut session, "y");
        session.resolve(ticket.token, 200, b"<html>");
        assert_eq!(session.error(), Some(GENERIC_FAILURE_MESSAGE));
    }

    #[test]
    fn stale_response_is_discarded() {
        let mut session = SearchSession::new();
        let old = submit(&mut session, "pizza");
        let new = submit(&mut session, "pasta");
        assert_eq!(session.last_token(), new.token);

        assert_eq!(session.resolve(old.token, 200, TWO_RESULTS), None);
        assert!(session.is_loading());

        session.resolve(new.token, 200, br#"{"restaurants": []}"#);
        assert_eq!(session.state(), &SessionState::Success(vec![]));

        // A late duplicate of an already-applied response is ignored too.
        assert_eq!(session.resolve(new.token, 500, b""), None);
        assert_eq!(session.error(), None);
    }

    #[test]
    fn malformed_parsed_prompt_keeps_results() {
        let mut session = SearchSession::new();
        let ticket = submit(&mut session, "pizza");

        let resolution = session.resolve(ticket.token, 200, br#"{"restaurants": [{"name": "A"}], "parsed_prompt": "pizza"}"#);

        assert_eq!(
            resolution,
            Some(Resolution::Succeeded {
                prompt: "pizza".to_string(),
                count: 1
            })
        );
        assert_eq!(session.results().len(), 1);
        assert!(session.parsed_prompt().is_none());
    }

    #[test]
    fn parsed_prompt_is_kept_until_next_submit() {
        let mut session = SearchSession::new();
        let ticket = submit(&mut session, "pizza for 4");
        session.resolve(
            ticket.token,
            200,
            br#"{"restaurants": [], "parsed_prompt": {"dish": "pizza", "people": 4}}"#,
        );
        assert_eq!(
            session.parsed_prompt().and_then(ParsedPrompt::summary).as_deref(),
            Some("pizza | for 4")
        );

        submit(&mut session, "tacos");
        assert!(session.parsed_prompt().is_none());
    }
}
