//! Item domain model.
//!
//! An [`Item`] is one entry of a section's static content collection: an FAQ
//! question, a vehicle in the fleet catalog, a service offering, a news post or a
//! headline stat. Items are immutable for the lifetime of a page view and are
//! matched against the section's [`FilterState`](super::FilterState).

use serde::{Deserialize, Serialize};
use std::fmt;

/// Stable identifier of an item within its section.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ItemId(pub String);

impl ItemId {
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ItemId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

/// Identifier of a page section (one controller and one tracker each).
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SectionId(pub String);

impl SectionId {
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SectionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for SectionId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

/// A single piece of section content.
///
/// # Fields
///
/// - `id`: Stable identifier, unique within the section
/// - `title`: Primary display text (question, model name, headline)
/// - `fields`: Additional searchable text (answer body, description, tags)
/// - `category`: Category label matched by category chips
///
/// # Examples
///
/// ```
/// use showcase::domain::Item;
///
/// let item = Item::new("warranty-length", "How long is the warranty?", "support")
///     .with_field("Every locomotive ships with a five year warranty.");
/// assert!(item.matches_query("five year"));
/// assert!(item.matches_query("WARRANTY"));
/// assert!(!item.matches_query("leasing"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Item {
    pub id: ItemId,
    pub title: String,
    #[serde(default)]
    pub fields: Vec<String>,
    pub category: String,
}

impl Item {
    #[must_use]
    pub fn new(id: impl Into<String>, title: impl Into<String>, category: impl Into<String>) -> Self {
        Self {
            id: ItemId::new(id),
            title: title.into(),
            fields: Vec::new(),
            category: category.into(),
        }
    }

    /// Adds another searchable text field.
    #[must_use]
    pub fn with_field(mut self, field: impl Into<String>) -> Self {
        self.fields.push(field.into());
        self
    }

    /// Iterates over every searchable text of the item, title first.
    pub fn searchable(&self) -> impl Iterator<Item = &str> {
        std::iter::once(self.title.as_str()).chain(self.fields.iter().map(String::as_str))
    }

    /// Case-insensitive substring match across all searchable fields.
    ///
    /// The query is matched as given; callers decide whether a whitespace-only
    /// query means "no filter" (see [`FilterState::query_filter`](super::FilterState::query_filter)).
    #[must_use]
    pub fn matches_query(&self, query: &str) -> bool {
        let needle = fold_case(query);
        self.searchable().any(|text| fold_case(text).contains(&needle))
    }
}

/// Lowercases `text` one char at a time.
///
/// Matching and highlighting both fold through this so that a query found by
/// the filter is always found again in the title.
pub(crate) fn fold_case(text: &str) -> String {
    text.chars().flat_map(char::to_lowercase).collect()
}
