//! Application layer: the filter/reveal controller of a section.
//!
//! This module sits between the page runtime and the domain layer. It implements
//! the event-driven state machine that decides which items are visible and when
//! each one plays its entrance.
//!
//! # Architecture
//!
//! ```text
//! Observer / Timers / Input → Events → handle_event → State Mutations → Actions → Page runtime
//!                                 ↑                                            ↓
//!                                 └────────────── timer callbacks ─────────────┘
//! ```
//!
//! # Modules
//!
//! - [`actions`]: Side effect commands emitted by the event handler
//! - [`handler`]: Event processing and state transition coordinator
//! - [`modes`]: Reveal phase state machine type
//! - [`state`]: Section state container and view model computation

pub mod actions;
pub mod handler;
pub mod modes;
pub mod state;

pub use actions::Action;
pub use handler::{handle_event, Event};
pub use modes::RevealPhase;
pub use state::{RevealEntry, SectionState};
