//! A mounted section: tracker, controller and live timer ids bound together.

use crate::app::{handle_event, Action, Event, SectionState};
use crate::domain::error::Result;
use crate::domain::ItemId;
use crate::timers::{RevealToken, TimerHost, TimerId};
use crate::visibility::{VisibilityChange, VisibilityTracker, ViewportObserver};
use std::collections::HashMap;

/// Runtime binding of one section.
///
/// Owns everything the section needs so that sections never share mutable state:
/// its own tracker, its own controller, and the ids of its own pending timers.
#[derive(Debug)]
pub struct MountedSection {
    pub(crate) tracker: VisibilityTracker,
    pub(crate) state: SectionState,
    timers: HashMap<ItemId, TimerId>,
}

impl MountedSection {
    pub(crate) fn new(tracker: VisibilityTracker, state: SectionState) -> Self {
        Self {
            tracker,
            state,
            timers: HashMap::new(),
        }
    }

    #[must_use]
    pub const fn tracker(&self) -> &VisibilityTracker {
        &self.tracker
    }

    #[must_use]
    pub const fn state(&self) -> &SectionState {
        &self.state
    }

    /// Number of timers this section currently holds with the host.
    #[must_use]
    pub fn live_timers(&self) -> usize {
        self.timers.len()
    }

    /// Attaches the tracker; arms the section right away if the observer failed open.
    pub(crate) fn attach<O, T>(&mut self, observer: &mut O, timers: &mut T) -> Result<bool>
    where
        O: ViewportObserver + ?Sized,
        T: TimerHost + ?Sized,
    {
        match self.tracker.attach(observer) {
            Some(VisibilityChange::Entered) => self.dispatch(&Event::EnteredView, observer, timers),
            _ => Ok(false),
        }
    }

    pub(crate) fn on_intersection<O, T>(&mut self, ratio: f32, observer: &mut O, timers: &mut T) -> Result<bool>
    where
        O: ViewportObserver + ?Sized,
        T: TimerHost + ?Sized,
    {
        match self.tracker.record(ratio, observer) {
            Some(VisibilityChange::Entered) => self.dispatch(&Event::EnteredView, observer, timers),
            Some(VisibilityChange::Exited) => self.dispatch(&Event::LeftView, observer, timers),
            None => Ok(false),
        }
    }

    pub(crate) fn on_timer<O, T>(&mut self, item: &ItemId, observer: &mut O, timers: &mut T) -> Result<bool>
    where
        O: ViewportObserver + ?Sized,
        T: TimerHost + ?Sized,
    {
        // The host already consumed the timer; forget its id before dispatching.
        self.timers.remove(item);
        self.dispatch(&Event::RevealFired { item: item.clone() }, observer, timers)
    }

    /// Runs an event through the controller and executes the resulting actions.
    pub(crate) fn dispatch<O, T>(&mut self, event: &Event, observer: &mut O, timers: &mut T) -> Result<bool>
    where
        O: ViewportObserver + ?Sized,
        T: TimerHost + ?Sized,
    {
        let (render, actions) = handle_event(&mut self.state, event)?;
        for action in actions {
            self.execute(action, observer, timers);
        }
        Ok(render)
    }

    fn execute<O, T>(&mut self, action: Action, observer: &mut O, timers: &mut T)
    where
        O: ViewportObserver + ?Sized,
        T: TimerHost + ?Sized,
    {
        match action {
            Action::ScheduleReveal { item, delay } => {
                let token = RevealToken {
                    section: self.state.id().clone(),
                    item: item.clone(),
                };
                let id = timers.schedule(delay, token);
                if let Some(previous) = self.timers.insert(item, id) {
                    timers.cancel(previous);
                }
            }
            Action::CancelReveal { item } => {
                if let Some(id) = self.timers.remove(&item) {
                    let cancelled = timers.cancel(id);
                    tracing::trace!(item = %item, timer = id.0, cancelled, "reveal timer cancelled");
                }
            }
            Action::DetachObserver => self.tracker.detach(observer),
        }
    }
}
