//! Actions representing side effects to be executed by the page runtime.
//!
//! The event handler never touches timers or the viewport observer directly. It
//! returns a `Vec<Action>` after each event and the [`Page`](crate::page::Page)
//! executes them against its [`TimerHost`](crate::timers::TimerHost) and
//! [`ViewportObserver`](crate::visibility::ViewportObserver).
//!
//! # Example
//!
//! ```rust
//! use showcase::app::Action;
//! use showcase::domain::ItemId;
//! use std::time::Duration;
//!
//! let actions = vec![
//!     Action::ScheduleReveal { item: ItemId::new("faq-1"), delay: Duration::ZERO },
//!     Action::ScheduleReveal { item: ItemId::new("faq-2"), delay: Duration::from_millis(100) },
//! ];
//! assert_eq!(actions.len(), 2);
//! ```

use crate::domain::ItemId;
use std::time::Duration;

/// Commands produced by [`handle_event`](super::handle_event).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    /// Starts a reveal timer for an item.
    ///
    /// When the timer fires the runtime feeds
    /// [`Event::RevealFired`](super::Event::RevealFired) back to the section.
    /// A still-pending timer of the same item is replaced.
    ScheduleReveal {
        /// Item whose entrance animation starts when the timer fires.
        item: ItemId,
        /// Stagger offset from now.
        delay: Duration,
    },

    /// Cancels the pending reveal timer of an item.
    ///
    /// Emitted when the item leaves the filtered subset or the section unmounts.
    CancelReveal {
        /// Item whose timer must not fire.
        item: ItemId,
    },

    /// Stops observing the section's container element.
    DetachObserver,
}
