//! Per-card presentation state.
//!
//! Each restaurant card owns an independent [`PhotoCarousel`] and
//! [`ReviewDisclosure`]. The set of card states is rebuilt whenever a new
//! result set is installed and indexed by position in the raw results, so
//! changing filters hides cards without resetting their state.

use crate::domain::Restaurant;

/// Maximum number of reviews visible at once in an open disclosure.
pub const VISIBLE_REVIEWS: usize = 3;

/// Cyclic cursor over a restaurant's photos.
///
/// # Invariants
///
/// `count >= 1` and `current < count`.
///
/// # Example
///
/// ```
/// use foodquest::app::cards::PhotoCarousel;
///
/// let mut carousel = PhotoCarousel::new(3);
/// carousel.prev();
/// assert_eq!(carousel.current(), 2);
/// carousel.next();
/// assert_eq!(carousel.current(), 0);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PhotoCarousel {
    current: usize,
    count: usize,
}

impl PhotoCarousel {
    /// Creates a carousel at the first photo. A count of zero is treated as one.
    #[must_use]
    pub fn new(count: usize) -> Self {
        Self {
            current: 0,
            count: count.max(1),
        }
    }

    /// Advances to the next photo, wrapping to the first.
    pub fn next(&mut self) {
        self.current = (self.current + 1) % self.count;
    }

    /// Moves to the previous photo, wrapping to the last.
    pub fn prev(&mut self) {
        self.current = (self.current + self.count - 1) % self.count;
    }

    /// Jumps directly to photo `index`. Out-of-range indices are ignored.
    pub fn jump_to(&mut self, index: usize) {
        if index < self.count {
            self.current = index;
        }
    }

    #[must_use]
    pub fn current(&self) -> usize {
        self.current
    }

    #[must_use]
    pub fn count(&self) -> usize {
        self.count
    }

    /// `false` for a single photo: navigation controls are not shown.
    #[must_use]
    pub fn is_navigable(&self) -> bool {
        self.count > 1
    }
}

/// Open/closed toggle for a card's review list, with a scroll offset for
/// lists longer than [`VISIBLE_REVIEWS`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ReviewDisclosure {
    open: bool,
    offset: usize,
}

impl ReviewDisclosure {
    pub fn toggle(&mut self) {
        self.open = !self.open;
        self.offset = 0;
    }

    #[must_use]
    pub fn is_open(&self) -> bool {
        self.open
    }

    /// Index of the first visible review.
    #[must_use]
    pub fn offset(&self) -> usize {
        self.offset
    }

    /// Scrolls one review down, stopping once the last `window` reviews of
    /// `total` are visible.
    pub fn scroll_down(&mut self, total: usize, window: usize) {
        if self.open && self.offset + window < total {
            self.offset += 1;
        }
    }

    pub fn scroll_up(&mut self) {
        if self.open {
            self.offset = self.offset.saturating_sub(1);
        }
    }
}

/// Carousel and disclosure for one card.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CardState {
    pub carousel: PhotoCarousel,
    pub reviews: ReviewDisclosure,
}

impl CardState {
    #[must_use]
    pub fn for_restaurant(restaurant: &Restaurant) -> Self {
        Self {
            carousel: PhotoCarousel::new(restaurant.photos.len()),
            reviews: ReviewDisclosure::default(),
        }
    }
}

/// Builds fresh card states for a newly installed result set.
#[must_use]
pub fn cards_for(results: &[Restaurant]) -> Vec<CardState> {
    results.iter().map(CardState::for_restaurant).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn next_count_times_is_identity() {
        for count in 1..6 {
            let mut carousel = PhotoCarousel::new(count);
            carousel.jump_to(count / 2);
            let start = carousel.current();
            for _ in 0..count {
                carousel.next();
            }
            assert_eq!(carousel.current(), start);
        }
    }

    #[test]
    fn prev_inverts_next() {
        let mut carousel = PhotoCarousel::new(4);
        for start in 0..4 {
            carousel.jump_to(start);
            carousel.next();
            carousel.prev();
            assert_eq!(carousel.current(), start);
        }
    }

    #[test]
    fn out_of_range_jump_is_ignored() {
        let mut carousel = PhotoCarousel::new(3);
        carousel.jump_to(1);
        carousel.jump_to(3);
        assert_eq!(carousel.current(), 1);
    }

    #[test]
    fn single_photo_is_not_navigable() {
        let mut carousel = PhotoCarousel::new(0);
        assert_eq!(carousel.count(), 1);
        assert!(!carousel.is_navigable());
        carousel.next();
        carousel.prev();
        assert_eq!(carousel.current(), 0);
    }

    #[test]
    fn disclosure_scrolls_only_when_open() {
        let mut reviews = ReviewDisclosure::default();
        reviews.scroll_down(5, VISIBLE_REVIEWS);
        assert_eq!(reviews.offset(), 0);

        reviews.toggle();
        for _ in 0..10 {
            reviews.scroll_down(5, VISIBLE_REVIEWS);
        }
        assert_eq!(reviews.offset(), 2);

        reviews.scroll_up();
        assert_eq!(reviews.offset(), 1);

        reviews.toggle();
        assert!(!reviews.is_open());
        assert_eq!(reviews.offset(), 0);
    }

    #[test]
    fn cards_are_independent() {
        let results = vec![
            Restaurant::new("a").with_photos(["1", "2"]),
            Restaurant::new("b").with_photos(["1", "2", "3"]),
        ];
        let mut cards = cards_for(&results);
        cards[0].reviews.toggle();
        cards[0].carousel.next();

        assert!(!cards[1].reviews.is_open());
        assert_eq!(cards[1].carousel.current(), 0);
        assert_eq!(cards[1].carousel.count(), 3);
    }
}
