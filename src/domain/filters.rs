//! User-selected result constraints.
//!
//! [`FilterState`] holds the price-tier mask, the minimum star rating and the
//! selected cuisines. It is plain data: the handler mutates it in response to
//! explicit user toggles, the query composer copies it into the outbound
//! request, and the result filter engine re-applies it to every render.

use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Number of price tiers (`$` through `$$$$`).
pub const PRICE_LEVELS: usize = 4;

/// Highest selectable minimum rating, in half stars (5.0 stars).
const MAX_RATING_HALVES: u8 = 10;

/// Cuisine names offered in the filter panel.
pub const CUISINE_OPTIONS: [&str; 10] = [
    "Italian",
    "Indian",
    "Japanese",
    "Mexican",
    "Chinese",
    "Thai",
    "American",
    "Mediterranean",
    "French",
    "Korean",
];

/// Minimum rating threshold in the range `0.0..=5.0`, in steps of `0.5`.
///
/// Stored as a count of half stars so every reachable value is exact and
/// comparisons against restaurant ratings never suffer from rounding.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord)]
pub struct MinRating(u8);

impl MinRating {
    /// Creates a threshold from a star value, snapping to the nearest half star.
    ///
    /// Values outside `0.0..=5.0` (and NaN) are clamped.
    ///
    /// ```
    /// use foodquest::domain::filters::MinRating;
    ///
    /// assert_eq!(MinRating::from_stars(3.4).stars(), 3.5);
    /// assert_eq!(MinRating::from_stars(9.0).stars(), 5.0);
    /// assert_eq!(MinRating::from_stars(-1.0).stars(), 0.0);
    /// ```
    #[must_use]
    pub fn from_stars(stars: f64) -> Self {
        if stars.is_nan() || stars <= 0.0 {
            return Self(0);
        }
        let halves = (stars * 2.0).round().min(f64::from(MAX_RATING_HALVES));
        // Clamped to 0..=10 above, so the cast cannot truncate.
        #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
        let halves = halves as u8;
        Self(halves)
    }

    /// Returns the threshold in stars.
    #[must_use]
    pub fn stars(self) -> f64 {
        f64::from(self.0) / 2.0
    }

    /// Raises the threshold by half a star, saturating at 5.0.
    #[must_use]
    pub fn raised(self) -> Self {
        Self((self.0 + 1).min(MAX_RATING_HALVES))
    }

    /// Lowers the threshold by half a star, saturating at 0.0.
    #[must_use]
    pub fn lowered(self) -> Self {
        Self(self.0.saturating_sub(1))
    }

    /// Returns `true` if a restaurant with the given rating passes the threshold.
    #[must_use]
    pub fn admits(self, rating: f64) -> bool {
        rating >= self.stars()
    }
}

impl Serialize for MinRating {
    /// Whole-star thresholds are written as JSON integers (`0`, `4`), the rest
    /// as floats (`3.5`), which is what a browser client would send.
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        if self.0 % 2 == 0 {
            serializer.serialize_u8(self.0 / 2)
        } else {
            serializer.serialize_f64(self.stars())
        }
    }
}

impl<'de> Deserialize<'de> for MinRating {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        f64::deserialize(deserializer).map(Self::from_stars)
    }
}

impl std::fmt::Display for MinRating {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.0 % 2 == 0 {
            write!(f, "{}", self.0 / 2)
        } else {
            write!(f, "{:.1}", self.stars())
        }
    }
}

/// Price, rating and cuisine constraints applied to search results.
///
/// # Example
///
/// ```
/// use foodquest::domain::FilterState;
///
/// let mut filters = FilterState::default();
/// filters.toggle_price(1);
/// filters.toggle_cuisine("Thai");
/// assert_eq!(filters.price, [true, false, true, true]);
/// assert_eq!(filters.cuisines, vec!["Thai".to_string()]);
///
/// filters.reset();
/// assert!(filters.is_default());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterState {
    /// Allowed price tiers; index 0 is `$`, index 3 is `$$$$`.
    pub price: [bool; PRICE_LEVELS],

    /// Minimum star rating a restaurant must have.
    pub min_rating: MinRating,

    /// Selected cuisines in selection order; empty means any cuisine.
    pub cuisines: Vec<String>,
}

impl Default for FilterState {
    fn default() -> Self {
        Self {
            price: [true; PRICE_LEVELS],
            min_rating: MinRating::default(),
            cuisines: Vec::new(),
        }
    }
}

impl FilterState {
    /// Flips the price tier at `index` (0-based). Out-of-range indices are ignored.
    pub fn toggle_price(&mut self, index: usize) {
        if let Some(allowed) = self.price.get_mut(index) {
            *allowed = !*allowed;
        }
    }

    /// Raises the minimum rating by half a star.
    pub fn raise_min_rating(&mut self) {
        self.min_rating = self.min_rating.raised();
    }

    /// Lowers the minimum rating by half a star.
    pub fn lower_min_rating(&mut self) {
        self.min_rating = self.min_rating.lowered();
    }

    /// Sets the minimum rating, snapping to the nearest half star.
    pub fn set_min_rating(&mut self, stars: f64) {
        self.min_rating = MinRating::from_stars(stars);
    }

    /// Adds the cuisine to the selection, or removes it if already selected.
    pub fn toggle_cuisine(&mut self, cuisine: &str) {
        if let Some(position) = self.cuisines.iter().position(|c| c == cuisine) {
            self.cuisines.remove(position);
        } else {
            self.cuisines.push(cuisine.to_string());
        }
    }

    /// Returns `true` if the cuisine is currently selected.
    #[must_use]
    pub fn has_cuisine(&self, cuisine: &str) -> bool {
        self.cuisines.iter().any(|c| c == cuisine)
    }

    /// Restores every constraint to its default.
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Returns `true` when no constraint deviates from the defaults.
    #[must_use]
    pub fn is_default(&self) -> bool {
        self == &Self::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_allow_everything() {
        let filters = FilterState::default();
        assert_eq!(filters.price, [true, true, true, true]);
        assert_eq!(filters.min_rating.stars(), 0.0);
        assert!(filters.cuisines.is_empty());
        assert!(filters.is_default());
    }

    #[test]
    fn toggle_price_ignores_out_of_range() {
        let mut filters = FilterState::default();
        filters.toggle_price(7);
        assert!(filters.is_default());

        filters.toggle_price(3);
        filters.toggle_price(3);
        assert!(filters.is_default());
    }

    #[test]
    fn rating_steps_saturate() {
        let mut filters = FilterState::default();
        filters.lower_min_rating();
        assert_eq!(filters.min_rating.stars(), 0.0);

        for _ in 0..20 {
            filters.raise_min_rating();
        }
        assert_eq!(filters.min_rating.stars(), 5.0);

        filters.lower_min_rating();
        assert_eq!(filters.min_rating.stars(), 4.5);
    }

    #[test]
    fn toggle_cuisine_keeps_selection_order() {
        let mut filters = FilterState::default();
        filters.toggle_cuisine("Thai");
        filters.toggle_cuisine("Italian");
        filters.toggle_cuisine("Korean");
        filters.toggle_cuisine("Italian");
        assert_eq!(filters.cuisines, vec!["Thai".to_string(), "Korean".to_string()]);
        assert!(filters.has_cuisine("Korean"));
        assert!(!filters.has_cuisine("Italian"));
    }

    #[test]
    fn min_rating_serializes_like_a_browser() {
        assert_eq!(serde_json::to_string(&MinRating::from_stars(0.0)).unwrap(), "0");
        assert_eq!(serde_json::to_string(&MinRating::from_stars(4.0)).unwrap(), "4");
        assert_eq!(serde_json::to_string(&MinRating::from_stars(3.5)).unwrap(), "3.5");
    }

    #[test]
    fn min_rating_display() {
        assert_eq!(MinRating::from_stars(2.0).to_string(), "2");
        assert_eq!(MinRating::from_stars(2.5).to_string(), "2.5");
    }
}
