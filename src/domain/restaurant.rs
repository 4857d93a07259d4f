//! Restaurant and review models as returned by the search backend.
//!
//! The backend speaks a loose, snake_case JSON dialect in which almost every
//! field is optional. Deserialization goes through private wire structs and is
//! normalized once into [`Restaurant`] and [`Review`], so the rest of the crate
//! never has to reason about `null` versus missing fields.
//!
//! Normalization rules:
//!
//! - `address` falls back to `vicinity`
//! - `open_now` falls back to `opening_hours.open_now`
//! - an empty or missing `photos` list becomes a single placeholder URL
//! - review ratings are rounded and clamped to `0..=5`
//! - review `time` may be a display string or a Unix timestamp

use serde::Deserialize;
use serde_json::Value as JsonValue;

/// Image shown when a restaurant has no photos.
pub const PLACEHOLDER_PHOTO: &str = "/api/placeholder/400/260";

/// Highest star rating a review can carry.
const MAX_REVIEW_STARS: u8 = 5;

/// A candidate restaurant returned by the search backend.
///
/// Immutable once received; owned by the search session's result set.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(from = "RestaurantWire")]
pub struct Restaurant {
    pub name: String,
    pub address: String,
    pub rating: Option<f64>,
    pub total_ratings: Option<u32>,
    pub price_level: Option<u8>,
    pub cuisine_types: Vec<String>,
    pub photos: Vec<String>,
    pub website: Option<String>,
    pub maps_link: Option<String>,
    pub open_now: Option<bool>,
    pub reviews: Vec<Review>,
}

/// A single user review attached to a restaurant.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(from = "ReviewWire")]
pub struct Review {
    pub author_name: String,
    /// Whole stars, `0..=5`.
    pub rating: u8,
    pub text: String,
    /// Human-readable time, e.g. `"2 weeks ago"` or `"2024-03-01"`.
    pub time: String,
}

impl Restaurant {
    /// Creates a restaurant with only a name; every optional field is empty
    /// and the photo list holds the placeholder.
    ///
    /// Chain the `with_*` builders to fill in the rest.
    ///
    /// ```
    /// use foodquest::domain::Restaurant;
    ///
    /// let r = Restaurant::new("Sushi Zen").with_rating(4.5).with_price_level(3);
    /// assert_eq!(r.rating, Some(4.5));
    /// assert_eq!(r.photos.len(), 1);
    /// ```
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            address: String::new(),
            rating: None,
            total_ratings: None,
            price_level: None,
            cuisine_types: Vec::new(),
            photos: vec![PLACEHOLDER_PHOTO.to_string()],
            website: None,
            maps_link: None,
            open_now: None,
            reviews: Vec::new(),
        }
    }

    #[must_use]
    pub fn with_rating(self, rating: f64) -> Self {
        Self {
            rating: Some(rating),
            ..self
        }
    }

    #[must_use]
    pub fn with_price_level(self, level: u8) -> Self {
        Self {
            price_level: Some(level),
            ..self
        }
    }

    #[must_use]
    pub fn with_cuisines<I, S>(self, cuisines: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            cuisine_types: cuisines.into_iter().map(Into::into).collect(),
            ..self
        }
    }

    /// Replaces the photo list; an empty list keeps the placeholder.
    #[must_use]
    pub fn with_photos<I, S>(self, photos: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            photos: normalize_photos(Some(photos.into_iter().map(Into::into).collect())),
            ..self
        }
    }

    #[must_use]
    pub fn with_reviews(self, reviews: Vec<Review>) -> Self {
        Self { reviews, ..self }
    }

    #[must_use]
    pub fn with_maps_link(self, url: impl Into<String>) -> Self {
        Self {
            maps_link: Some(url.into()),
            ..self
        }
    }

    #[must_use]
    pub fn with_website(self, url: impl Into<String>) -> Self {
        Self {
            website: Some(url.into()),
            ..self
        }
    }

    /// Rating used for threshold comparisons; a missing rating counts as zero.
    #[must_use]
    pub fn effective_rating(&self) -> f64 {
        self.rating.unwrap_or(0.0)
    }

    /// Price badge text: one `$` per level, `$$` when the level is unknown.
    #[must_use]
    pub fn price_label(&self) -> String {
        match self.price_level {
            Some(level) if level > 0 => "$".repeat(usize::from(level)),
            _ => "$$".to_string(),
        }
    }
}

impl Review {
    #[must_use]
    pub fn new(author_name: impl Into<String>, rating: u8, text: impl Into<String>, time: impl Into<String>) -> Self {
        Self {
            author_name: author_name.into(),
            rating: rating.min(MAX_REVIEW_STARS),
            text: text.into(),
            time: time.into(),
        }
    }

    /// Five-character star bar, e.g. `"★★★☆☆"`.
    #[must_use]
    pub fn stars(&self) -> String {
        let filled = usize::from(self.rating.min(MAX_REVIEW_STARS));
        let empty = usize::from(MAX_REVIEW_STARS) - filled;
        format!("{}{}", "★".repeat(filled), "☆".repeat(empty))
    }
}

/// What the backend understood from a free-text prompt.
///
/// Every field is optional and loosely typed: the backend extracts them with a
/// language model and may return strings where numbers are expected.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct ParsedPrompt {
    #[serde(default)]
    pub dish: Option<JsonValue>,
    #[serde(default)]
    pub max_budget: Option<JsonValue>,
    #[serde(default)]
    pub people: Option<JsonValue>,
    #[serde(default)]
    pub time: Option<JsonValue>,
    #[serde(default)]
    pub location: Option<JsonValue>,
    #[serde(default)]
    pub max_distance_km: Option<JsonValue>,
}

impl ParsedPrompt {
    /// One-line summary of the non-empty fields, or `None` if nothing was parsed.
    ///
    /// ```
    /// use foodquest::domain::ParsedPrompt;
    ///
    /// let parsed: ParsedPrompt = serde_json::from_str(
    ///     r#"{"dish": "pizza", "max_budget": 15, "people": null, "location": "MG Road"}"#,
    /// ).unwrap();
    /// assert_eq!(parsed.summary().as_deref(), Some("pizza | budget 15 | near MG Road"));
    /// ```
    #[must_use]
    pub fn summary(&self) -> Option<String> {
        let parts: Vec<String> = [
            (&self.dish, "", ""),
            (&self.max_budget, "budget ", ""),
            (&self.people, "for ", ""),
            (&self.time, "at ", ""),
            (&self.location, "near ", ""),
            (&self.max_distance_km, "within ", " km"),
        ]
        .into_iter()
        .filter_map(|(value, prefix, suffix)| {
            display_value(value.as_ref()).map(|v| format!("{prefix}{v}{suffix}"))
        })
        .collect();

        if parts.is_empty() {
            None
        } else {
            Some(parts.join(" | "))
        }
    }
}

/// Renders a loosely typed JSON scalar for display; `null` and empty strings
/// count as absent.
fn display_value(value: Option<&JsonValue>) -> Option<String> {
    match value? {
        JsonValue::Null => None,
        JsonValue::String(s) if s.trim().is_empty() => None,
        JsonValue::String(s) => Some(s.trim().to_string()),
        other => Some(other.to_string()),
    }
}

fn normalize_photos(photos: Option<Vec<String>>) -> Vec<String> {
    match photos {
        Some(photos) if !photos.is_empty() => photos,
        _ => vec![PLACEHOLDER_PHOTO.to_string()],
    }
}

#[derive(Deserialize)]
struct OpeningHoursWire {
    #[serde(default)]
    open_now: Option<bool>,
}

#[derive(Deserialize)]
struct RestaurantWire {
    #[serde(default)]
    name: Option<String>,
    #[serde(default)]
    address: Option<String>,
    #[serde(default)]
    vicinity: Option<String>,
    #[serde(default)]
    rating: Option<f64>,
    #[serde(default, alias = "user_ratings_total")]
    total_ratings: Option<u32>,
    #[serde(default)]
    price_level: Option<i64>,
    #[serde(default)]
    cuisine_types: Option<Vec<String>>,
    #[serde(default)]
    photos: Option<Vec<String>>,
    #[serde(default)]
    website: Option<String>,
    #[serde(default)]
    maps_link: Option<String>,
    #[serde(default)]
    open_now: Option<bool>,
    #[serde(default)]
    opening_hours: Option<OpeningHoursWire>,
    #[serde(default)]
    reviews: Option<Vec<Review>>,
}

impl From<RestaurantWire> for Restaurant {
    fn from(wire: RestaurantWire) -> Self {
        let address = wire
            .address
            .filter(|a| !a.is_empty())
            .or(wire.vicinity)
            .unwrap_or_default();
        let open_now = wire
            .open_now
            .or_else(|| wire.opening_hours.and_then(|hours| hours.open_now));

        Self {
            name: wire.name.unwrap_or_default(),
            address,
            rating: wire.rating,
            total_ratings: wire.total_ratings,
            price_level: wire.price_level.and_then(|level| u8::try_from(level).ok()),
            cuisine_types: wire.cuisine_types.unwrap_or_default(),
            photos: normalize_photos(wire.photos),
            website: wire.website,
            maps_link: wire.maps_link,
            open_now,
            reviews: wire.reviews.unwrap_or_default(),
        }
    }
}

#[derive(Deserialize)]
struct ReviewWire {
    #[serde(default)]
    author_name: Option<String>,
    #[serde(default)]
    rating: Option<f64>,
    #[serde(default)]
    text: Option<String>,
    #[serde(default)]
    time: Option<JsonValue>,
    #[serde(default)]
    relative_time_description: Option<String>,
}

impl From<ReviewWire> for Review {
    fn from(wire: ReviewWire) -> Self {
        let rating = wire
            .rating
            .filter(|r| r.is_finite())
            .map_or(0.0, |r| r.round().clamp(0.0, f64::from(MAX_REVIEW_STARS)));
        // Clamped to 0..=5 above.
        #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
        let rating = rating as u8;

        let time = match wire.time {
            Some(JsonValue::String(s)) => s,
            Some(JsonValue::Number(n)) => wire
                .relative_time_description
                .or_else(|| n.as_i64().and_then(format_timestamp))
                .unwrap_or_default(),
            _ => wire.relative_time_description.unwrap_or_default(),
        };

        Self {
            author_name: wire.author_name.unwrap_or_default(),
            rating,
            text: wire.text.unwrap_or_default(),
            time,
        }
    }
}

fn format_timestamp(seconds: i64) -> Option<String> {
    chrono::DateTime::from_timestamp(seconds, 0).map(|t| t.format("%Y-%m-%d").to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn minimal_backend_record_is_normalized() {
        let restaurant: Restaurant = serde_json::from_str(
            r#"{"name": "Luigi's", "address": null, "vicinity": "12 Main St", "rating": 4.2,
                "total_ratings": 87, "price_level": 2}"#,
        )
        .unwrap();

        assert_eq!(restaurant.name, "Luigi's");
        assert_eq!(restaurant.address, "12 Main St");
        assert_eq!(restaurant.total_ratings, Some(87));
        assert_eq!(restaurant.price_level, Some(2));
        assert_eq!(restaurant.photos, vec![PLACEHOLDER_PHOTO.to_string()]);
        assert!(restaurant.cuisine_types.is_empty());
        assert!(restaurant.reviews.is_empty());
        assert_eq!(restaurant.open_now, None);
    }

    #[test]
    fn open_now_falls_back_to_opening_hours() {
        let restaurant: Restaurant =
            serde_json::from_str(r#"{"name": "Nook", "opening_hours": {"open_now": false}}"#).unwrap();
        assert_eq!(restaurant.open_now, Some(false));

        let restaurant: Restaurant = serde_json::from_str(
            r#"{"name": "Nook", "open_now": true, "opening_hours": {"open_now": false}}"#,
        )
        .unwrap();
        assert_eq!(restaurant.open_now, Some(true));
    }

    #[test]
    fn empty_photo_list_gets_placeholder() {
        let restaurant: Restaurant = serde_json::from_str(r#"{"name": "Bare", "photos": []}"#).unwrap();
        assert_eq!(restaurant.photos, vec![PLACEHOLDER_PHOTO.to_string()]);
    }

    #[test]
    fn review_time_accepts_strings_and_timestamps() {
        let review: Review =
            serde_json::from_str(r#"{"author_name": "Ana", "rating": 4, "text": "Great", "time": "last week"}"#)
                .unwrap();
        assert_eq!(review.time, "last week");

        let review: Review = serde_json::from_str(r#"{"author_name": "Bo", "rating": 5, "time": 1700000000}"#).unwrap();
        assert_eq!(review.time, "2023-11-14");

        let review: Review = serde_json::from_str(
            r#"{"author_name": "Cy", "rating": 3, "time": 1700000000, "relative_time_description": "a year ago"}"#,
        )
        .unwrap();
        assert_eq!(review.time, "a year ago");
    }

    #[test]
    fn review_rating_is_clamped() {
        let review: Review = serde_json::from_str(r#"{"rating": 7.6}"#).unwrap();
        assert_eq!(review.rating, 5);
        let review: Review = serde_json::from_str(r#"{"rating": -2}"#).unwrap();
        assert_eq!(review.rating, 0);
        assert_eq!(Review::new("x", 3, "", "").stars(), "★★★☆☆");
    }

    #[test]
    fn price_label_defaults_to_two_dollars() {
        assert_eq!(Restaurant::new("a").price_label(), "$$");
        assert_eq!(Restaurant::new("a").with_price_level(4).price_label(), "$$$$");
        assert_eq!(Restaurant::new("a").with_price_level(0).price_label(), "$$");
    }

    #[test]
    fn parsed_prompt_without_fields_has_no_summary() {
        let parsed: ParsedPrompt = serde_json::from_str(r#"{"dish": null, "location": " "}"#).unwrap();
        assert_eq!(parsed.summary(), None);
    }
}
