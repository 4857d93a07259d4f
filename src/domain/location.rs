//! Geographic coordinates.

use crate::domain::error::{FoodQuestError, Result};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// A latitude/longitude pair in decimal degrees.
///
/// Serializes as `{"lat": .., "lng": ..}`, the shape the search backend expects.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LatLng {
    pub lat: f64,
    pub lng: f64,
}

impl LatLng {
    /// Creates a coordinate pair, rejecting values outside the valid ranges.
    ///
    /// # Errors
    ///
    /// Returns [`FoodQuestError::Config`] if latitude is outside `-90..=90`,
    /// longitude is outside `-180..=180`, or either is not finite.
    pub fn new(lat: f64, lng: f64) -> Result<Self> {
        if !lat.is_finite() || !lng.is_finite() || !(-90.0..=90.0).contains(&lat) || !(-180.0..=180.0).contains(&lng) {
            return Err(FoodQuestError::Config(format!("coordinates out of range: {lat},{lng}")));
        }
        Ok(Self { lat, lng })
    }
}

impl FromStr for LatLng {
    type Err = FoodQuestError;

    /// Parses `"lat,lng"`, e.g. `"12.9716,77.5946"`.
    ///
    /// ```
    /// use foodquest::domain::LatLng;
    ///
    /// let here: LatLng = "12.9716, 77.5946".parse().unwrap();
    /// assert_eq!(here.lng, 77.5946);
    /// assert!("north".parse::<LatLng>().is_err());
    /// ```
    fn from_str(s: &str) -> Result<Self> {
        let (lat, lng) = s
            .split_once(',')
            .ok_or_else(|| FoodQuestError::Config(format!("expected \"lat,lng\", got {s:?}")))?;

        let parse = |part: &str| {
            part.trim()
                .parse::<f64>()
                .map_err(|e| FoodQuestError::Config(format!("invalid coordinate {part:?}: {e}")))
        };

        Self::new(parse(lat)?, parse(lng)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_out_of_range_coordinates() {
        assert!("91,0".parse::<LatLng>().is_err());
        assert!("0,181".parse::<LatLng>().is_err());
        assert!("NaN,0".parse::<LatLng>().is_err());
        assert!("-33.86,151.21".parse::<LatLng>().is_ok());
    }

    #[test]
    fn serializes_with_lng_key() {
        let json = serde_json::to_value(LatLng { lat: 1.5, lng: -2.25 }).unwrap();
        assert_eq!(json, serde_json::json!({"lat": 1.5, "lng": -2.25}));
    }
}
