//! Per-container visibility tracker.
//!
//! A [`VisibilityTracker`] turns raw intersection ratios into a one-shot
//! `has_entered_view` signal. It owns no shared state: every section has its own
//! tracker and its own observation handle.

use super::observer::{ElementId, ObservationHandle, ObserveOptions, ViewportObserver};

/// Visibility transition reported by [`VisibilityTracker::record`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VisibilityChange {
    Entered,
    Exited,
}

/// Tracks whether one container has scrolled into view.
///
/// `has_entered_view` is monotonic: once true it never reverts. With
/// `trigger_once` set, the tracker stops observing after the first entry, so
/// [`VisibilityChange::Entered`] is reported at most once. Without it, entries
/// and exits are reported on every threshold crossing while `has_entered_view`
/// still stays latched.
///
/// # Example
///
/// ```
/// use showcase::visibility::{
///     ElementId, ObserveOptions, ScriptedObserver, VisibilityChange, VisibilityTracker,
/// };
///
/// let mut observer = ScriptedObserver::default();
/// let mut tracker = VisibilityTracker::new(ElementId::new("stats"), ObserveOptions::default());
/// assert_eq!(tracker.attach(&mut observer), None);
///
/// assert_eq!(tracker.record(0.05, &mut observer), None);
/// assert_eq!(tracker.record(0.4, &mut observer), Some(VisibilityChange::Entered));
/// assert!(tracker.has_entered_view());
///
/// // Trigger-once trackers detach after the first entry.
/// assert_eq!(tracker.record(0.0, &mut observer), None);
/// assert!(tracker.has_entered_view());
/// ```
#[derive(Debug, Clone)]
pub struct VisibilityTracker {
    element: ElementId,
    options: ObserveOptions,
    handle: Option<ObservationHandle>,
    has_entered_view: bool,
    is_visible: bool,
    fail_open: bool,
}

impl VisibilityTracker {
    #[must_use]
    pub const fn new(element: ElementId, options: ObserveOptions) -> Self {
        Self {
            element,
            options,
            handle: None,
            has_entered_view: false,
            is_visible: false,
            fail_open: false,
        }
    }

    #[must_use]
    pub const fn element(&self) -> &ElementId {
        &self.element
    }

    #[must_use]
    pub const fn options(&self) -> &ObserveOptions {
        &self.options
    }

    #[must_use]
    pub const fn has_entered_view(&self) -> bool {
        self.has_entered_view
    }

    /// Current visibility (toggles only for trackers that are not trigger-once).
    #[must_use]
    pub const fn is_visible(&self) -> bool {
        self.is_visible
    }

    /// True when the observer was unavailable and the tracker defaulted to visible.
    #[must_use]
    pub const fn is_fail_open(&self) -> bool {
        self.fail_open
    }

    #[must_use]
    pub const fn is_attached(&self) -> bool {
        self.handle.is_some()
    }

    /// Registers the container with the observer.
    ///
    /// Returns [`VisibilityChange::Entered`] immediately when the observer has no
    /// intersection capability. Calling it on an attached, fail-open or already
    /// triggered tracker does nothing.
    pub fn attach<O: ViewportObserver + ?Sized>(&mut self, observer: &mut O) -> Option<VisibilityChange> {
        if self.handle.is_some() || self.fail_open {
            return None;
        }
        if self.has_entered_view && self.options.trigger_once() {
            return None;
        }

        if let Some(handle) = observer.observe(&self.element, &self.options) {
            tracing::debug!(element = %self.element, handle = handle.0, "observing element");
            self.handle = Some(handle);
            None
        } else {
            self.fail_open = true;
            self.is_visible = true;
            let first = !self.has_entered_view;
            self.has_entered_view = true;
            first.then_some(VisibilityChange::Entered)
        }
    }

    /// Feeds an intersection ratio reported by the host.
    ///
    /// Returns the transition it caused, if any. Ratios arriving while the tracker
    /// is not observing (detached, fail-open, or already triggered) are ignored.
    pub fn record<O: ViewportObserver + ?Sized>(&mut self, ratio: f32, observer: &mut O) -> Option<VisibilityChange> {
        self.handle?;

        let visible = self.options.is_visible(ratio);
        if visible == self.is_visible {
            return None;
        }
        self.is_visible = visible;

        if !visible {
            tracing::trace!(element = %self.element, ratio, "element left view");
            return Some(VisibilityChange::Exited);
        }

        tracing::debug!(element = %self.element, ratio, first = !self.has_entered_view, "element entered view");
        self.has_entered_view = true;
        if self.options.trigger_once() {
            self.detach(observer);
        }
        Some(VisibilityChange::Entered)
    }

    /// Stops observing. Safe to call repeatedly.
    pub fn detach<O: ViewportObserver + ?Sized>(&mut self, observer: &mut O) {
        if let Some(handle) = self.handle.take() {
            tracing::debug!(element = %self.element, handle = handle.0, "detaching observer");
            observer.unobserve(handle);
        }
    }
}
