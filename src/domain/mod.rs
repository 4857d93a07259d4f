//! Domain layer for the FoodQuest plugin.
//!
//! This module contains the core domain types, independent of Zellij-specific
//! APIs or infrastructure concerns.
//!
//! # Organization
//!
//! - [`error`]: Error types and result aliases
//! - [`filters`]: Price, rating and cuisine constraints
//! - [`location`]: Latitude/longitude pairs
//! - [`recency`]: Bounded list of recent queries
//! - [`restaurant`]: Restaurants and reviews as returned by the backend
//!
//! # Examples
//!
//! ```
//! use foodquest::domain::{FilterState, Restaurant};
//!
//! let restaurant = Restaurant::new("Trattoria").with_rating(4.6).with_price_level(2);
//! let filters = FilterState::default();
//! assert!(filters.price[usize::from(restaurant.price_level.unwrap()) - 1]);
//! ```

pub mod error;
pub mod filters;
pub mod location;
pub mod recency;
pub mod restaurant;

pub use error::{FoodQuestError, Result};
pub use filters::{FilterState, MinRating, CUISINE_OPTIONS};
pub use location::LatLng;
pub use recency::RecencyCache;
pub use restaurant::{ParsedPrompt, Restaurant, Review};
