//! Page runtime hosting independent sections.
//!
//! A [`Page`] is the explicit replacement for a global animation registry: every
//! section mounted on it gets its own [`VisibilityTracker`], its own
//! [`SectionState`] and its own timer ids, and the page only routes host callbacks
//! (intersections, timer firings, user input) to the section they belong to.
//!
//! # Lifecycle
//!
//! 1. **Mount**: create tracker + controller, start observing the container
//! 2. **Enter view**: the host reports an intersection ratio above the threshold;
//!    the section arms and schedules its staggered reveal timers
//! 3. **Interact**: query and category changes re-filter and reconcile timers
//! 4. **Unmount**: pending timers are cancelled and the observer detached
//!
//! # Example
//!
//! ```rust
//! use showcase::domain::Item;
//! use showcase::page::Page;
//! use showcase::timers::ManualTimerHost;
//! use showcase::visibility::ScriptedObserver;
//! use showcase::Config;
//! use std::time::Duration;
//!
//! let mut page = Page::new(ScriptedObserver::default(), ManualTimerHost::default(), Config::default());
//! let items = vec![
//!     Item::new("a", "Regional train", "locomotives"),
//!     Item::new("b", "Delivery van", "vehicles"),
//! ];
//! page.mount("fleet".into(), "fleet-grid".into(), items)?;
//!
//! page.on_intersection(&"fleet-grid".into(), 0.6)?;
//! assert!(page.has_entered_view(&"fleet".into()));
//!
//! page.advance(Duration::from_secs(1))?;
//! let vm = page.viewmodel(&"fleet".into()).expect("mounted");
//! assert!(vm.display_items.iter().all(|item| item.is_revealed));
//! # Ok::<(), showcase::ShowcaseError>(())
//! ```

pub mod section;

pub use section::MountedSection;

use crate::app::{Event, SectionState};
use crate::content::SectionContent;
use crate::domain::error::{Result, ShowcaseError};
use crate::domain::{CategorySelection, Item, SectionId};
use crate::timers::{ManualTimerHost, RevealToken, TimerHost};
use crate::ui::SectionViewModel;
use crate::visibility::{ElementId, ViewportObserver, VisibilityTracker};
use crate::Config;
use std::collections::{BTreeMap, HashSet};
use std::time::Duration;

/// Sections of one page plus the host facilities they share.
#[derive(Debug)]
pub struct Page<O: ViewportObserver, T: TimerHost> {
    observer: O,
    timers: T,
    config: Config,
    sections: BTreeMap<SectionId, MountedSection>,
}

impl<O: ViewportObserver, T: TimerHost> Page<O, T> {
    #[must_use]
    pub fn new(observer: O, timers: T, config: Config) -> Self {
        Self {
            observer,
            timers,
            config,
            sections: BTreeMap::new(),
        }
    }

    #[must_use]
    pub const fn config(&self) -> &Config {
        &self.config
    }

    #[must_use]
    pub const fn observer(&self) -> &O {
        &self.observer
    }

    #[must_use]
    pub const fn timers(&self) -> &T {
        &self.timers
    }

    pub fn section_ids(&self) -> impl Iterator<Item = &SectionId> {
        self.sections.keys()
    }

    /// Mounts a section and starts observing its container.
    ///
    /// # Errors
    ///
    /// - [`ShowcaseError::DuplicateSection`] if `section` is already mounted
    /// - [`ShowcaseError::DuplicateElement`] if another section observes `element`
    /// - [`ShowcaseError::Content`] if two items share an id
    /// - Configuration errors from [`Config::observe_options`]
    pub fn mount(&mut self, section: SectionId, element: ElementId, items: Vec<Item>) -> Result<()> {
        let state = SectionState::new(section, items, self.config.stagger());
        self.mount_state(element, state)
    }

    /// Mounts a section from catalog content, validating its chip set first.
    ///
    /// # Errors
    ///
    /// Same as [`Page::mount`], plus [`ShowcaseError::UnknownCategory`] for chips
    /// no item carries.
    pub fn mount_content(&mut self, element: ElementId, content: &SectionContent) -> Result<()> {
        content.validate_chips()?;
        let state = SectionState::new(content.id.clone(), content.items.clone(), self.config.stagger())
            .with_chips(content.chips.clone());
        self.mount_state(element, state)
    }

    fn mount_state(&mut self, element: ElementId, state: SectionState) -> Result<()> {
        let id = state.id().clone();
        if self.sections.contains_key(&id) {
            return Err(ShowcaseError::DuplicateSection(id.to_string()));
        }
        if self.sections.values().any(|mounted| mounted.tracker.element() == &element) {
            return Err(ShowcaseError::DuplicateElement(element.to_string()));
        }

        let mut seen = HashSet::new();
        if let Some(dup) = state.items().iter().find(|item| !seen.insert(&item.id)) {
            return Err(ShowcaseError::Content(format!("duplicate item '{}' in section '{id}'", dup.id)));
        }

        let _span = tracing::debug_span!("mount", section = %id, element = %element).entered();
        let tracker = VisibilityTracker::new(element, self.config.observe_options()?);
        let mut mounted = MountedSection::new(tracker, state);
        mounted.attach(&mut self.observer, &mut self.timers)?;

        tracing::debug!(items = mounted.state().items().len(), "section mounted");
        self.sections.insert(id, mounted);
        Ok(())
    }

    /// Unmounts a section, cancelling its pending timers and detaching its observer.
    ///
    /// Returns `false` if the section was not mounted.
    pub fn unmount(&mut self, section: &SectionId) -> bool {
        let Some(mut mounted) = self.sections.remove(section) else {
            tracing::debug!(section = %section, "unmount of unknown section ignored");
            return false;
        };

        if let Err(e) = mounted.dispatch(&Event::Unmount, &mut self.observer, &mut self.timers) {
            tracing::warn!(section = %section, error = %e, "unmount handler failed");
        }
        // Detach again in case the section never reached the handler's detach.
        mounted.tracker.detach(&mut self.observer);
        true
    }

    /// Updates a section's search query. Returns whether the section needs re-rendering.
    ///
    /// # Errors
    ///
    /// Propagates errors from the event handler.
    pub fn set_query(&mut self, section: &SectionId, text: &str) -> Result<bool> {
        self.dispatch(section, &Event::QueryChanged(text.to_string()))
    }

    /// Selects a category chip by key (`"all"` clears the category filter).
    ///
    /// # Errors
    ///
    /// Propagates errors from the event handler.
    pub fn set_category(&mut self, section: &SectionId, key: &str) -> Result<bool> {
        self.dispatch(section, &Event::CategorySelected(CategorySelection::from_key(key)))
    }

    /// Routes an intersection ratio reported by the host observer.
    ///
    /// # Errors
    ///
    /// Propagates errors from the event handler.
    pub fn on_intersection(&mut self, element: &ElementId, ratio: f32) -> Result<bool> {
        let Some(mounted) = self
            .sections
            .values_mut()
            .find(|mounted| mounted.tracker.element() == element)
        else {
            tracing::debug!(element = %element, "intersection for unmounted element ignored");
            return Ok(false);
        };
        mounted.on_intersection(ratio, &mut self.observer, &mut self.timers)
    }

    /// Routes a fired reveal timer. Tokens of unmounted sections are ignored.
    ///
    /// # Errors
    ///
    /// Propagates errors from the event handler.
    pub fn on_timer(&mut self, token: &RevealToken) -> Result<bool> {
        let Some(mounted) = self.sections.get_mut(&token.section) else {
            tracing::debug!(section = %token.section, item = %token.item, "timer for unmounted section ignored");
            return Ok(false);
        };
        mounted.on_timer(&token.item, &mut self.observer, &mut self.timers)
    }

    #[must_use]
    pub fn has_entered_view(&self, section: &SectionId) -> bool {
        self.sections
            .get(section)
            .is_some_and(|mounted| mounted.tracker.has_entered_view())
    }

    #[must_use]
    pub fn section(&self, section: &SectionId) -> Option<&SectionState> {
        self.sections.get(section).map(MountedSection::state)
    }

    #[must_use]
    pub fn mounted(&self, section: &SectionId) -> Option<&MountedSection> {
        self.sections.get(section)
    }

    #[must_use]
    pub fn viewmodel(&self, section: &SectionId) -> Option<SectionViewModel> {
        self.section(section).map(SectionState::compute_viewmodel)
    }

    fn dispatch(&mut self, section: &SectionId, event: &Event) -> Result<bool> {
        let Some(mounted) = self.sections.get_mut(section) else {
            tracing::debug!(section = %section, "event for unmounted section ignored");
            return Ok(false);
        };
        mounted.dispatch(event, &mut self.observer, &mut self.timers)
    }
}

impl<O: ViewportObserver> Page<O, ManualTimerHost> {
    /// Advances the virtual clock and delivers every timer that came due.
    ///
    /// Returns the number of timers delivered.
    ///
    /// # Errors
    ///
    /// Propagates errors from the event handler.
    pub fn advance(&mut self, by: Duration) -> Result<usize> {
        let fired = self.timers.advance(by);
        for token in &fired {
            self.on_timer(token)?;
        }
        Ok(fired.len())
    }

    /// Advances timer by timer until nothing is pending, returning the elapsed time.
    ///
    /// # Errors
    ///
    /// Propagates errors from the event handler.
    pub fn run_until_idle(&mut self) -> Result<Duration> {
        let start = self.timers.now();
        while let Some(due) = self.timers.next_due() {
            self.advance(due)?;
        }
        Ok(self.timers.now().saturating_sub(start))
    }
}
