//! Viewport observer abstraction and its options.
//!
//! A [`ViewportObserver`] is the host's intersection primitive (in a browser, an
//! `IntersectionObserver`). The crate only registers elements with it; the host
//! reports intersection ratios back through
//! [`Page::on_intersection`](crate::page::Page::on_intersection). This keeps the
//! observer swappable: [`ScriptedObserver`] is a deterministic stand-in for tests
//! and previews, [`UnavailableObserver`] models environments without the primitive
//! (server rendering), where trackers fail open.

use crate::domain::error::{Result, ShowcaseError};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

/// Identifier of an observed container element (its DOM id on the web).
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ElementId(pub String);

impl ElementId {
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }
}

impl fmt::Display for ElementId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ElementId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

/// Handle returned by [`ViewportObserver::observe`], used to stop observing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ObservationHandle(pub u64);

/// Margin grown around the viewport before intersections are computed, in pixels.
///
/// Parsed from the CSS shorthand used by `rootMargin`: one to four lengths in
/// top/right/bottom/left order, with an optional `px` suffix.
///
/// ```
/// use showcase::visibility::RootMargin;
///
/// let margin: RootMargin = "0px 0px -50px 0px".parse()?;
/// assert_eq!(margin.bottom, -50);
/// assert_eq!(margin.to_string(), "0px 0px -50px 0px");
///
/// let uniform: RootMargin = "12px".parse()?;
/// assert_eq!(uniform.left, 12);
/// # Ok::<(), showcase::ShowcaseError>(())
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct RootMargin {
    pub top: i32,
    pub right: i32,
    pub bottom: i32,
    pub left: i32,
}

impl RootMargin {
    /// Default margin: the bottom edge pulled in by 50px so items start
    /// revealing slightly after they appear.
    pub const DEFAULT: Self = Self { top: 0, right: 0, bottom: -50, left: 0 };

    fn parse_length(raw: &str) -> Result<i32> {
        let number = raw.strip_suffix("px").unwrap_or(raw);
        number
            .parse::<i32>()
            .map_err(|_| ShowcaseError::Config(format!("invalid root margin length '{raw}'")))
    }
}

impl FromStr for RootMargin {
    type Err = ShowcaseError;

    fn from_str(s: &str) -> Result<Self> {
        let values = s
            .split_whitespace()
            .map(Self::parse_length)
            .collect::<Result<Vec<i32>>>()?;

        match values.as_slice() {
            [all] => Ok(Self { top: *all, right: *all, bottom: *all, left: *all }),
            [vertical, horizontal] => Ok(Self {
                top: *vertical,
                right: *horizontal,
                bottom: *vertical,
                left: *horizontal,
            }),
            [top, horizontal, bottom] => Ok(Self {
                top: *top,
                right: *horizontal,
                bottom: *bottom,
                left: *horizontal,
            }),
            [top, right, bottom, left] => Ok(Self {
                top: *top,
                right: *right,
                bottom: *bottom,
                left: *left,
            }),
            _ => Err(ShowcaseError::Config(format!(
                "root margin '{s}' must have between one and four lengths"
            ))),
        }
    }
}

impl TryFrom<String> for RootMargin {
    type Error = ShowcaseError;

    fn try_from(value: String) -> Result<Self> {
        value.parse()
    }
}

impl From<RootMargin> for String {
    fn from(value: RootMargin) -> Self {
        value.to_string()
    }
}

impl fmt::Display for RootMargin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}px {}px {}px {}px", self.top, self.right, self.bottom, self.left)
    }
}

/// Options for observing one container.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ObserveOptions {
    threshold: f32,
    root_margin: RootMargin,
    trigger_once: bool,
}

impl ObserveOptions {
    /// Builds validated observer options.
    ///
    /// # Errors
    ///
    /// Returns [`ShowcaseError::InvalidThreshold`] unless `threshold` is a number
    /// in `0.0..=1.0`.
    pub fn new(threshold: f32, root_margin: RootMargin, trigger_once: bool) -> Result<Self> {
        if !(0.0..=1.0).contains(&threshold) {
            return Err(ShowcaseError::InvalidThreshold(threshold));
        }
        Ok(Self { threshold, root_margin, trigger_once })
    }

    #[must_use]
    pub const fn threshold(&self) -> f32 {
        self.threshold
    }

    #[must_use]
    pub const fn root_margin(&self) -> RootMargin {
        self.root_margin
    }

    #[must_use]
    pub const fn trigger_once(&self) -> bool {
        self.trigger_once
    }

    /// Whether an intersection ratio counts as "in view".
    #[must_use]
    pub fn is_visible(&self, ratio: f32) -> bool {
        ratio > 0.0 && ratio >= self.threshold
    }
}

impl Default for ObserveOptions {
    fn default() -> Self {
        Self {
            threshold: 0.1,
            root_margin: RootMargin::DEFAULT,
            trigger_once: true,
        }
    }
}

/// The host's viewport intersection primitive.
pub trait ViewportObserver {
    /// Starts observing `element`.
    ///
    /// Returns `None` when the host has no intersection capability; callers must
    /// then treat the element as visible.
    fn observe(&mut self, element: &ElementId, options: &ObserveOptions) -> Option<ObservationHandle>;

    /// Stops observing. Unknown handles are ignored.
    fn unobserve(&mut self, handle: ObservationHandle);
}

/// Observer for environments without an intersection primitive.
#[derive(Debug, Clone, Copy, Default)]
pub struct UnavailableObserver;

impl ViewportObserver for UnavailableObserver {
    fn observe(&mut self, element: &ElementId, _options: &ObserveOptions) -> Option<ObservationHandle> {
        tracing::debug!(element = %element, "intersection observer unavailable, failing open");
        None
    }

    fn unobserve(&mut self, _handle: ObservationHandle) {}
}

/// Deterministic in-memory observer.
///
/// Records registrations so tests and previews can check what is observed, while
/// intersection ratios are fed manually through the page.
///
/// ```
/// use showcase::visibility::{ElementId, ObserveOptions, ScriptedObserver, ViewportObserver};
///
/// let mut observer = ScriptedObserver::default();
/// let element = ElementId::new("faq");
/// let handle = observer.observe(&element, &ObserveOptions::default());
/// assert!(observer.is_observing(&element));
///
/// if let Some(handle) = handle {
///     observer.unobserve(handle);
/// }
/// assert!(!observer.is_observing(&element));
/// ```
#[derive(Debug, Clone, Default)]
pub struct ScriptedObserver {
    next_handle: u64,
    observed: BTreeMap<ObservationHandle, (ElementId, ObserveOptions)>,
}

impl ScriptedObserver {
    #[must_use]
    pub fn is_observing(&self, element: &ElementId) -> bool {
        self.observed.values().any(|(observed, _)| observed == element)
    }

    #[must_use]
    pub fn observed_count(&self) -> usize {
        self.observed.len()
    }

    #[must_use]
    pub fn options_for(&self, element: &ElementId) -> Option<&ObserveOptions> {
        self.observed
            .values()
            .find(|(observed, _)| observed == element)
            .map(|(_, options)| options)
    }
}

impl ViewportObserver for ScriptedObserver {
    fn observe(&mut self, element: &ElementId, options: &ObserveOptions) -> Option<ObservationHandle> {
        self.next_handle += 1;
        let handle = ObservationHandle(self.next_handle);
        self.observed.insert(handle, (element.clone(), *options));
        Some(handle)
    }

    fn unobserve(&mut self, handle: ObservationHandle) {
        self.observed.remove(&handle);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn root_margin_shorthands() -> Result<()> {
        assert_eq!("4px 8px".parse::<RootMargin>()?, RootMargin { top: 4, right: 8, bottom: 4, left: 8 });
        assert_eq!("1 2 3".parse::<RootMargin>()?, RootMargin { top: 1, right: 2, bottom: 3, left: 2 });
        assert!("".parse::<RootMargin>().is_err());
        assert!("10% 0px".parse::<RootMargin>().is_err());
        assert!("1 2 3 4 5".parse::<RootMargin>().is_err());
        Ok(())
    }

    #[test]
    fn threshold_must_be_a_fraction() {
        assert!(ObserveOptions::new(0.0, RootMargin::default(), true).is_ok());
        assert!(ObserveOptions::new(1.0, RootMargin::default(), true).is_ok());
        assert!(ObserveOptions::new(1.5, RootMargin::default(), true).is_err());
        assert!(ObserveOptions::new(f32::NAN, RootMargin::default(), true).is_err());
    }

    #[test]
    fn visibility_uses_threshold() -> Result<()> {
        let options = ObserveOptions::new(0.5, RootMargin::default(), true)?;
        assert!(!options.is_visible(0.49));
        assert!(options.is_visible(0.5));

        let any = ObserveOptions::new(0.0, RootMargin::default(), true)?;
        assert!(!any.is_visible(0.0));
        assert!(any.is_visible(0.01));
        Ok(())
    }
}
