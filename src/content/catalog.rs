//! Catalog loading and validation.

use crate::domain::error::{Result, ShowcaseError};
use crate::domain::{filter, Item, SectionId, ALL_CATEGORIES};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fs;
use std::path::Path;

/// Names accepted by [`Catalog::builtin`].
pub const BUILTIN_CATALOGS: [&str; 3] = ["home", "about", "services"];

/// Content of one page: its filterable sections.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Catalog {
    /// Page the catalog belongs to.
    pub page: String,
    pub sections: Vec<SectionContent>,
}

/// Static collection of one section plus its category chips.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SectionContent {
    pub id: SectionId,
    pub title: String,
    /// Chip keys in display order. Empty means "derive from item categories".
    #[serde(default)]
    pub chips: Vec<String>,
    #[serde(default)]
    pub items: Vec<Item>,
}

impl Catalog {
    /// Parses and validates a JSON catalog.
    ///
    /// # Errors
    ///
    /// Returns [`ShowcaseError::Content`] for malformed JSON or duplicate ids, and
    /// [`ShowcaseError::UnknownCategory`] for chips without matching items.
    pub fn from_json_str(json: &str) -> Result<Self> {
        let catalog: Self = serde_json::from_str(json)
            .map_err(|e| ShowcaseError::Content(format!("failed to parse catalog: {e}")))?;
        catalog.validate()?;
        Ok(catalog)
    }

    /// Reads and validates a JSON catalog file.
    ///
    /// # Errors
    ///
    /// Returns [`ShowcaseError::Io`] if the file cannot be read, otherwise the
    /// errors of [`Catalog::from_json_str`].
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        tracing::debug!(path = %path.display(), "loading catalog file");
        let json = fs::read_to_string(path)?;
        Self::from_json_str(&json)
    }

    /// Loads one of the embedded demo catalogs (`home`, `about`, `services`).
    ///
    /// ```rust
    /// use showcase::content::Catalog;
    ///
    /// let about = Catalog::builtin("about").expect("embedded catalog");
    /// assert!(about.section(&"faq".into()).is_some());
    /// assert!(Catalog::builtin("careers").is_none());
    /// ```
    #[must_use]
    pub fn builtin(name: &str) -> Option<Self> {
        let json = match name {
            "home" => include_str!("../../content/home.json"),
            "about" => include_str!("../../content/about.json"),
            "services" => include_str!("../../content/services.json"),
            _ => return None,
        };

        Self::from_json_str(json)
            .map_err(|e| tracing::warn!(catalog = name, error = %e, "embedded catalog is invalid"))
            .ok()
    }

    #[must_use]
    pub fn section(&self, id: &SectionId) -> Option<&SectionContent> {
        self.sections.iter().find(|section| &section.id == id)
    }

    /// Checks section id uniqueness and every section's items and chips.
    ///
    /// # Errors
    ///
    /// See [`Catalog::from_json_str`].
    pub fn validate(&self) -> Result<()> {
        let mut seen = HashSet::new();
        for section in &self.sections {
            if !seen.insert(&section.id) {
                return Err(ShowcaseError::Content(format!(
                    "duplicate section '{}' in page '{}'",
                    section.id, self.page
                )));
            }
            section.validate()?;
        }
        Ok(())
    }
}

impl SectionContent {
    /// Checks item id uniqueness and the chip set.
    ///
    /// # Errors
    ///
    /// See [`Catalog::from_json_str`].
    pub fn validate(&self) -> Result<()> {
        let mut seen = HashSet::new();
        if let Some(dup) = self.items.iter().find(|item| !seen.insert(&item.id)) {
            return Err(ShowcaseError::Content(format!(
                "duplicate item '{}' in section '{}'",
                dup.id, self.id
            )));
        }
        self.validate_chips()
    }

    /// Rejects chips that no item's category matches.
    ///
    /// At runtime an unknown category simply filters everything out; this check
    /// catches such chips while the content is being built.
    ///
    /// # Errors
    ///
    /// Returns [`ShowcaseError::UnknownCategory`] for the first offending chip.
    pub fn validate_chips(&self) -> Result<()> {
        let categories: HashSet<&str> = self.items.iter().map(|item| item.category.as_str()).collect();

        for chip in &self.chips {
            let key = chip.trim();
            if key.eq_ignore_ascii_case(ALL_CATEGORIES) {
                continue;
            }
            if !categories.contains(key) {
                return Err(ShowcaseError::UnknownCategory {
                    section: self.id.to_string(),
                    key: chip.clone(),
                });
            }
        }
        Ok(())
    }

    /// `"all"` followed by each item category in first-seen order.
    #[must_use]
    pub fn derived_chips(&self) -> Vec<String> {
        filter::chip_keys(&self.items)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtin_catalogs_are_valid() {
        for name in BUILTIN_CATALOGS {
            let catalog = Catalog::builtin(name);
            assert!(catalog.is_some(), "catalog {name} failed to load");
        }
    }

    #[test]
    fn rejects_unknown_chip() {
        let json = r#"{
            "page": "home",
            "sections": [{
                "id": "fleet",
                "title": "Fleet",
                "chips": ["all", "vehicles", "ships"],
                "items": [{ "id": "a", "title": "Van", "category": "vehicles" }]
            }]
        }"#;
        match Catalog::from_json_str(json) {
            Err(ShowcaseError::UnknownCategory { section, key }) => {
                assert_eq!(section, "fleet");
                assert_eq!(key, "ships");
            }
            other => panic!("expected unknown category, got {other:?}"),
        }
    }

    #[test]
    fn rejects_duplicate_items_and_bad_json() {
        let json = r#"{
            "page": "about",
            "sections": [{
                "id": "faq",
                "title": "FAQ",
                "items": [
                    { "id": "a", "title": "One", "category": "x" },
                    { "id": "a", "title": "Two", "category": "x" }
                ]
            }]
        }"#;
        assert!(matches!(Catalog::from_json_str(json), Err(ShowcaseError::Content(_))));
        assert!(matches!(Catalog::from_json_str("{"), Err(ShowcaseError::Content(_))));
    }

    #[test]
    fn derives_chips_in_first_seen_order() {
        let section = SectionContent {
            id: "stats".into(),
            title: "Stats".into(),
            chips: vec![],
            items: vec![
                Item::new("a", "A", "output"),
                Item::new("b", "B", "reach"),
                Item::new("c", "C", "output"),
            ],
        };
        assert_eq!(section.derived_chips(), vec!["all", "output", "reach"]);
    }
}
