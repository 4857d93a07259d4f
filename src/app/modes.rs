//! Input mode state types for the application.
//!
//! The input mode decides how keys are interpreted and which panels are drawn.
//!
//! # State Machine
//!
//! ```text
//!            /                  Tab
//! Normal ─────────▶ Search(Typing) ◀──────▶ Search(Suggestions)
//!   ▲  │                  │ Enter / Esc
//!   │  └──────────────────┘
//!   │        f
//!   └──────────────▶ Filters(Price ⇄ Rating ⇄ Cuisine)
//! ```
//!
//! # Example
//!
//! ```rust
//! use foodquest::app::modes::{FilterFocus, InputMode};
//!
//! let mode = InputMode::Filters(FilterFocus::Price);
//! assert_eq!(FilterFocus::Price.next(), FilterFocus::Rating);
//! ```

/// Focus state within search mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchFocus {
    /// User is typing in the search input field.
    ///
    /// Accepts character input and backspace; Enter submits the query.
    Typing,

    /// User is moving through the suggestion panel below the input.
    ///
    /// Enter copies the highlighted suggestion into the input without
    /// submitting it.
    Suggestions,
}

/// Section of the filter panel that receives left/right/toggle keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterFocus {
    /// The four price tiers, `$` to `$$$$`.
    Price,
    /// The minimum rating stepper.
    Rating,
    /// The cuisine chips.
    Cuisine,
}

impl FilterFocus {
    /// Next section, wrapping from `Cuisine` to `Price`.
    #[must_use]
    pub const fn next(self) -> Self {
        match self {
            Self::Price => Self::Rating,
            Self::Rating => Self::Cuisine,
            Self::Cuisine => Self::Price,
        }
    }

    /// Previous section, wrapping from `Price` to `Cuisine`.
    #[must_use]
    pub const fn prev(self) -> Self {
        match self {
            Self::Price => Self::Cuisine,
            Self::Rating => Self::Price,
            Self::Cuisine => Self::Rating,
        }
    }
}

/// Current input handling mode.
///
/// Controls which keybindings are active and how user input is processed.
/// Determines the displayed footer text and available commands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputMode {
    /// Browsing result cards.
    ///
    /// Available keybindings: j/k (select card), h/l (photos), 1-9 (jump to
    /// photo), r (reviews), m (map), w (website), / (search), f (filters),
    /// q (quit).
    Normal,

    /// Search bar focused, with a [`SearchFocus`] sub-state.
    Search(SearchFocus),

    /// Filter panel focused, with the active section.
    Filters(FilterFocus),
}
