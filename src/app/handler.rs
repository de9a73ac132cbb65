//! Event handling and state transition logic.
//!
//! This module implements the event handler that processes viewport signals,
//! user input and timer callbacks for one section, translating them into state
//! changes and action sequences.
//!
//! # Architecture
//!
//! The handler follows a unidirectional data flow pattern:
//! 1. Events arrive from the page runtime (observer, timers, user input)
//! 2. [`handle_event`] pattern-matches the event type
//! 3. State mutations occur via `SectionState` methods
//! 4. Actions are collected and returned for execution by the runtime
//!
//! Events arriving after the section unmounted are accepted and ignored.
//!
//! # Example
//!
//! ```rust
//! use showcase::app::{handle_event, Event, SectionState};
//! use showcase::domain::Item;
//! use std::time::Duration;
//!
//! let items = vec![Item::new("s1", "Locomotives delivered", "output")];
//! let mut state = SectionState::new("stats".into(), items, Duration::from_millis(100));
//! let (render, actions) = handle_event(&mut state, &Event::EnteredView)?;
//! assert!(render);
//! assert_eq!(actions.len(), 1);
//! # Ok::<(), showcase::ShowcaseError>(())
//! ```

use super::{Action, SectionState};
use crate::domain::error::Result;
use crate::domain::{CategorySelection, ItemId};

/// Events delivered to a section.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    /// The container crossed the visibility threshold for the first time, or
    /// again when the tracker is not trigger-once.
    EnteredView,
    /// The container dropped below the threshold (only reported when the tracker
    /// is not trigger-once). Arming is one-shot, so this never un-arms.
    LeftView,
    /// The user typed into the search field.
    QueryChanged(String),
    /// The user clicked a category chip.
    CategorySelected(CategorySelection),
    /// A reveal timer fired.
    RevealFired {
        /// Item whose entrance animation starts now.
        item: ItemId,
    },
    /// The container is being removed from the page.
    Unmount,
}

/// Processes an event, mutates section state, and returns actions to execute.
///
/// # Returns
///
/// A tuple of `(needs_render, actions)`. `needs_render` is `false` when the
/// event changed nothing visible (stale timers, repeated viewport entries).
///
/// # Errors
///
/// None of the current events fail; the `Result` keeps the handler signature
/// uniform with the rest of the runtime.
pub fn handle_event(state: &mut SectionState, event: &Event) -> Result<(bool, Vec<Action>)> {
    let _span = tracing::debug_span!("handle_event", section = %state.id(), event_type = ?event).entered();

    if !state.is_mounted() {
        tracing::debug!("section unmounted, ignoring event");
        return Ok((false, vec![]));
    }

    match event {
        Event::EnteredView => {
            if state.phase().is_armed() {
                return Ok((false, vec![]));
            }
            let actions = state.arm();
            Ok((true, actions))
        }
        Event::LeftView => Ok((false, vec![])),
        Event::QueryChanged(text) => {
            if &state.filter().query == text {
                return Ok((false, vec![]));
            }
            let actions = state.set_query(text);
            Ok((true, actions))
        }
        Event::CategorySelected(selection) => {
            if &state.filter().category == selection {
                return Ok((false, vec![]));
            }
            let actions = state.set_category(selection.clone());
            Ok((true, actions))
        }
        Event::RevealFired { item } => Ok((state.mark_revealed(item), vec![])),
        Event::Unmount => Ok((false, state.unmount())),
    }
}
