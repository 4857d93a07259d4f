//! Query composition and the outbound request payload.
//!
//! [`compose`] validates the user's text and snapshots the current filters and
//! location fix into an immutable [`SearchQuery`]. [`SearchQuery::to_request`]
//! then borrows that snapshot into the wire shape the backend expects:
//!
//! ```json
//! {"prompt": "sushi", "location": null,
//!  "filters": {"price": [true, true, true, true], "minRating": 0}}
//! ```
//!
//! `cuisines` is omitted from `filters` when no cuisine is selected.

use crate::domain::error::{FoodQuestError, Result};
use crate::domain::filters::{MinRating, PRICE_LEVELS};
use crate::domain::{FilterState, LatLng};
use serde::Serialize;

/// An immutable search snapshot: what the user typed, where they are, and
/// which filters were active at submit time.
#[derive(Debug, Clone, PartialEq)]
pub struct SearchQuery {
    pub text: String,
    pub location: Option<LatLng>,
    pub filters: FilterState,
}

/// Request body sent to the search backend.
#[derive(Debug, Serialize)]
pub struct SearchRequest<'a> {
    prompt: &'a str,
    location: Option<LatLng>,
    filters: RequestFilters<'a>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct RequestFilters<'a> {
    price: [bool; PRICE_LEVELS],
    min_rating: MinRating,
    #[serde(skip_serializing_if = "Option::is_none")]
    cuisines: Option<&'a [String]>,
}

/// Builds a [`SearchQuery`] from raw input.
///
/// The text is kept exactly as typed; only the emptiness check looks past
/// surrounding whitespace.
///
/// # Errors
///
/// Returns [`FoodQuestError::EmptyQuery`] when `text` is empty or whitespace.
/// Callers treat this as "nothing to do" rather than a user-facing failure.
///
/// # Examples
///
/// ```
/// use foodquest::domain::FilterState;
/// use foodquest::search::query::compose;
///
/// let query = compose("cheap tacos", &FilterState::default(), None).unwrap();
/// assert_eq!(query.text, "cheap tacos");
/// assert!(compose("   ", &FilterState::default(), None).is_err());
/// ```
pub fn compose(text: &str, filters: &FilterState, location: Option<LatLng>) -> Result<SearchQuery> {
    if text.trim().is_empty() {
        return Err(FoodQuestError::EmptyQuery);
    }

    Ok(SearchQuery {
        text: text.to_string(),
        location,
        filters: filters.clone(),
    })
}

impl SearchQuery {
    /// Borrows the query as the backend's request payload.
    #[must_use]
    pub fn to_request(&self) -> SearchRequest<'_> {
        SearchRequest {
            prompt: &self.text,
            location: self.location,
            filters: RequestFilters {
                price: self.filters.price,
                min_rating: self.filters.min_rating,
                cuisines: (!self.filters.cuisines.is_empty()).then_some(self.filters.cuisines.as_slice()),
            },
        }
    }

    /// Serializes the request payload to JSON bytes.
    ///
    /// # Errors
    ///
    /// Returns [`FoodQuestError::Json`] if serialization fails.
    pub fn to_body(&self) -> Result<Vec<u8>> {
        Ok(serde_json::to_vec(&self.to_request())?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_filters_produce_minimal_body() {
        let query = compose("sushi", &FilterState::default(), None).unwrap();
        let body = String::from_utf8(query.to_body().unwrap()).unwrap();
        assert_eq!(
            body,
            r#"{"prompt":"sushi","location":null,"filters":{"price":[true,true,true,true],"minRating":0}}"#
        );
    }

    #[test]
    fn selected_cuisines_and_location_are_sent() {
        let mut filters = FilterState::default();
        filters.toggle_price(0);
        filters.set_min_rating(3.5);
        filters.toggle_cuisine("Thai");
        filters.toggle_cuisine("Korean");
        let here = LatLng { lat: 12.5, lng: 77.25 };

        let query = compose("noodles", &filters, Some(here)).unwrap();
        let json = serde_json::to_value(query.to_request()).unwrap();

        assert_eq!(
            json,
            serde_json::json!({
                "prompt": "noodles",
                "location": {"lat": 12.5, "lng": 77.25},
                "filters": {
                    "price": [false, true, true, true],
                    "minRating": 3.5,
                    "cuisines": ["Thai", "Korean"]
                }
            })
        );
    }

    #[test]
    fn prompt_is_sent_untrimmed() {
        let query = compose("  pho ", &FilterState::default(), None).unwrap();
        assert_eq!(query.text, "  pho ");
    }

    #[test]
    fn blank_text_is_rejected() {
        for text in ["", " ", "\t\n"] {
            assert!(matches!(
                compose(text, &FilterState::default(), None),
                Err(FoodQuestError::EmptyQuery)
            ));
        }
    }
}
