//! Client-side result filtering.
//!
//! The backend already receives the filters, but results are re-checked
//! locally so that changing a filter after a search takes effect immediately
//! without another round trip. All rules must hold for a restaurant to be kept:
//!
//! - **Price**: a level in `1..=4` must be enabled in the price mask. Unknown
//!   or out-of-range levels are not constrained.
//! - **Rating**: the rating (missing counts as `0`) must reach the minimum.
//! - **Cuisine**: with a non-empty selection, at least one of the restaurant's
//!   cuisine types must equal a selected cuisine.
//!
//! Filtering is stable and idempotent.

use crate::domain::filters::PRICE_LEVELS;
use crate::domain::{FilterState, Restaurant};

/// Returns `true` if `restaurant` satisfies every rule in `filters`.
#[must_use]
pub fn matches(restaurant: &Restaurant, filters: &FilterState) -> bool {
    passes_price(restaurant, filters) && passes_rating(restaurant, filters) && passes_cuisine(restaurant, filters)
}

fn passes_price(restaurant: &Restaurant, filters: &FilterState) -> bool {
    match restaurant.price_level.map(usize::from) {
        Some(level @ 1..=PRICE_LEVELS) => filters.price[level - 1],
        _ => true,
    }
}

fn passes_rating(restaurant: &Restaurant, filters: &FilterState) -> bool {
    filters.min_rating.admits(restaurant.effective_rating())
}

fn passes_cuisine(restaurant: &Restaurant, filters: &FilterState) -> bool {
    filters.cuisines.is_empty() || restaurant.cuisine_types.iter().any(|c| filters.has_cuisine(c))
}

/// Returns the restaurants that pass `filters`, in their original order.
#[must_use]
pub fn filter_results(results: &[Restaurant], filters: &FilterState) -> Vec<Restaurant> {
    results.iter().filter(|r| matches(r, filters)).cloned().collect()
}

/// Returns the positions in `results` of the restaurants that pass `filters`.
///
/// Per-card UI state is keyed by raw position, so the renderer works with
/// indices rather than filtered copies.
#[must_use]
pub fn matching_indices(results: &[Restaurant], filters: &FilterState) -> Vec<usize> {
    results
        .iter()
        .enumerate()
        .filter(|(_, r)| matches(r, filters))
        .map(|(i, _)| i)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn names(results: &[Restaurant]) -> Vec<&str> {
        results.iter().map(|r| r.name.as_str()).collect()
    }

    #[test]
    fn rating_threshold_is_inclusive() {
        let results = vec![
            Restaurant::new("keep").with_rating(3.5),
            Restaurant::new("drop").with_rating(3.4),
            Restaurant::new("unrated"),
        ];
        let mut filters = FilterState::default();
        filters.set_min_rating(3.5);

        assert_eq!(names(&filter_results(&results, &filters)), ["keep"]);
    }

    #[test]
    fn price_mask_skips_unknown_levels() {
        let results = vec![
            Restaurant::new("two").with_price_level(2),
            Restaurant::new("four").with_price_level(4),
            Restaurant::new("unknown"),
            Restaurant::new("zero").with_price_level(0),
        ];
        let mut filters = FilterState::default();
        filters.toggle_price(1);
        assert_eq!(filters.price, [true, false, true, true]);

        assert_eq!(names(&filter_results(&results, &filters)), ["four", "unknown", "zero"]);
    }

    #[test]
    fn cuisine_selection_requires_an_overlap() {
        let results = vec![
            Restaurant::new("trattoria").with_cuisines(["Italian", "Pizza"]),
            Restaurant::new("izakaya").with_cuisines(["Japanese"]),
            Restaurant::new("mystery"),
        ];
        let mut filters = FilterState::default();
        filters.toggle_cuisine("Italian");
        filters.toggle_cuisine("Thai");

        assert_eq!(names(&filter_results(&results, &filters)), ["trattoria"]);
        assert_eq!(matching_indices(&results, &filters), [0]);
    }

    #[test]
    fn filtering_is_idempotent_and_stable() {
        let results: Vec<Restaurant> = (0..8u8)
            .map(|i| {
                Restaurant::new(format!("r{i}"))
                    .with_rating(f64::from(i) * 0.7)
                    .with_price_level(i % 5)
                    .with_cuisines([if i % 2 == 0 { "Thai" } else { "French" }])
            })
            .collect();

        let mut filters = FilterState::default();
        filters.toggle_price(2);
        filters.set_min_rating(1.5);
        filters.toggle_cuisine("Thai");

        let once = filter_results(&results, &filters);
        let twice = filter_results(&once, &filters);
        assert_eq!(once, twice);

        let indices = matching_indices(&results, &filters);
        assert!(indices.windows(2).all(|w| w[0] < w[1]));
        assert_eq!(indices.len(), once.len());
    }

    #[test]
    fn default_filters_keep_everything() {
        let results = vec![Restaurant::new("a"), Restaurant::new("b").with_price_level(9)];
        assert_eq!(filter_results(&results, &FilterState::default()), results);
    }
}
