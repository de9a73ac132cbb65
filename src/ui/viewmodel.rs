//! View model types representing renderable section state.
//!
//! View models are created via `SectionState::compute_viewmodel()` and consumed by
//! the host page's templates. They contain no business logic, only display-ready
//! data, and serialize to JSON for hosts that render on the JavaScript side.

use crate::app::RevealPhase;
use serde::Serialize;

/// Complete view model of one section.
#[derive(Debug, Clone, Serialize)]
pub struct SectionViewModel {
    /// Section identifier.
    pub section: String,

    /// Current reveal phase, for hosts that toggle container-level classes.
    pub phase: RevealPhase,

    /// Filtered items in collection order.
    pub display_items: Vec<DisplayItem>,

    /// Result count header.
    pub header: HeaderInfo,

    /// Category chips with their selection state.
    pub chips: Vec<ChipInfo>,

    /// Optional empty state message (when nothing passes the filter).
    pub empty_state: Option<EmptyState>,

    /// Optional search bar information (when a query is active).
    pub search_bar: Option<SearchBarInfo>,
}

/// Display information for a single filtered item.
#[derive(Debug, Clone, Serialize)]
pub struct DisplayItem {
    pub id: String,
    pub title: String,
    pub category: String,

    /// Entrance animation offset in milliseconds.
    pub reveal_delay_ms: u64,

    /// Whether the entrance animation already played.
    pub is_revealed: bool,

    /// Byte ranges of the title matching the query.
    ///
    /// Each tuple is `(start, end)` with exclusive end, on UTF-8 char boundaries.
    pub highlight_ranges: Vec<(usize, usize)>,
}

/// Header display information.
#[derive(Debug, Clone, Serialize)]
pub struct HeaderInfo {
    /// Count text, e.g. "Showing 2 of 5".
    pub title: String,
}

/// A category chip.
#[derive(Debug, Clone, Serialize)]
pub struct ChipInfo {
    pub key: String,
    pub is_selected: bool,
}

/// Empty state message display information.
#[derive(Debug, Clone, Serialize)]
pub struct EmptyState {
    /// Primary message (e.g., "No results").
    pub message: String,

    /// Secondary explanatory text.
    pub subtitle: String,
}

/// Search bar display information.
#[derive(Debug, Clone, Serialize)]
pub struct SearchBarInfo {
    /// Current search query text.
    pub query: String,
}
