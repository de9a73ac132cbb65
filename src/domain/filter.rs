//! Filter state and the pure filtering function.
//!
//! Filtering is a pure function of the static collection and the current
//! [`FilterState`]: the same inputs always produce the same ordered subset, and
//! the subset always keeps the collection's original order.

use super::Item;
use serde::{Deserialize, Serialize};

/// Sentinel chip key that disables category filtering.
pub const ALL_CATEGORIES: &str = "all";

/// Current category chip selection.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CategorySelection {
    /// No category filtering.
    #[default]
    All,
    /// Only items whose category equals the key exactly.
    Only(String),
}

impl CategorySelection {
    /// Interprets a chip key.
    ///
    /// `"all"` (any casing) and the empty string map to [`CategorySelection::All`];
    /// any other key selects that category verbatim, whether or not any item
    /// carries it.
    ///
    /// ```
    /// use showcase::domain::CategorySelection;
    ///
    /// assert_eq!(CategorySelection::from_key("ALL"), CategorySelection::All);
    /// assert_eq!(
    ///     CategorySelection::from_key("locomotives"),
    ///     CategorySelection::Only("locomotives".to_string())
    /// );
    /// ```
    #[must_use]
    pub fn from_key(key: &str) -> Self {
        let trimmed = key.trim();
        if trimmed.is_empty() || trimmed.eq_ignore_ascii_case(ALL_CATEGORIES) {
            Self::All
        } else {
            Self::Only(trimmed.to_string())
        }
    }

    /// Chip key for this selection (`"all"` for [`CategorySelection::All`]).
    #[must_use]
    pub fn key(&self) -> &str {
        match self {
            Self::All => ALL_CATEGORIES,
            Self::Only(key) => key,
        }
    }

    #[must_use]
    pub fn admits(&self, category: &str) -> bool {
        match self {
            Self::All => true,
            Self::Only(key) => key == category,
        }
    }
}

/// Query text and category selection of one section.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct FilterState {
    pub query: String,
    pub category: CategorySelection,
}

impl FilterState {
    /// The effective query, or `None` when the query is empty or whitespace-only.
    #[must_use]
    pub fn query_filter(&self) -> Option<&str> {
        if self.query.trim().is_empty() {
            None
        } else {
            Some(self.query.as_str())
        }
    }

    /// True when every item passes.
    #[must_use]
    pub fn is_identity(&self) -> bool {
        self.query_filter().is_none() && self.category == CategorySelection::All
    }

    #[must_use]
    pub fn admits(&self, item: &Item) -> bool {
        if !self.category.admits(&item.category) {
            return false;
        }
        self.query_filter().map_or(true, |query| item.matches_query(query))
    }
}

/// Returns the indices of the items admitted by `filter`, in collection order.
///
/// # Examples
///
/// ```
/// use showcase::domain::{filter, FilterState, Item};
///
/// let items = vec![
///     Item::new("a", "Diesel shunter", "locomotives"),
///     Item::new("b", "Electric bus", "vehicles"),
/// ];
/// let state = FilterState { query: "BUS".into(), ..FilterState::default() };
/// assert_eq!(filter::apply(&items, &state), vec![1]);
/// ```
#[must_use]
pub fn apply(items: &[Item], filter: &FilterState) -> Vec<usize> {
    if filter.is_identity() {
        return (0..items.len()).collect();
    }

    items
        .iter()
        .enumerate()
        .filter(|(_, item)| filter.admits(item))
        .map(|(idx, _)| idx)
        .collect()
}

/// Chip keys for a collection: `"all"` followed by each category in first-seen order.
#[must_use]
pub fn chip_keys(items: &[Item]) -> Vec<String> {
    let mut keys = vec![ALL_CATEGORIES.to_string()];
    for item in items {
        if !keys.contains(&item.category) {
            keys.push(item.category.clone());
        }
    }
    keys
}
