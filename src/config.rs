//! Application-level configuration constants.

// Animation
pub const DEFAULT_ANIMATION_MS: f64 = 800.0;

// Constituency picker
pub const MAX_VISIBLE_RESULTS: usize = 15;
pub const CANCEL_KEY: &str = "Escape";
pub const OUTSIDE_CLICK_EVENT: &str = "mousedown";
pub const SEARCH_PLACEHOLDER: &str = "Search constituencies...";

// Default selection on first load
pub const DEFAULT_REFORM_ID: &str = "two_child_limit_removal";
pub const DEFAULT_YEAR: u16 = 2026;
