//! Presentation-facing view models.
//!
//! Styling, layout and animation choreography belong to the host page; this
//! module only defines the display-ready data the page binds to.
//!
//! ```text
//! SectionState → compute_viewmodel → SectionViewModel → host templates
//! ```
//!
//! # Example
//!
//! ```rust
//! use showcase::app::SectionState;
//! use std::time::Duration;
//!
//! let state = SectionState::new("news".into(), vec![], Duration::from_millis(100));
//! let vm = state.compute_viewmodel();
//! assert!(vm.empty_state.is_some());
//! ```

pub mod viewmodel;

pub use viewmodel::{ChipInfo, DisplayItem, EmptyState, HeaderInfo, SearchBarInfo, SectionViewModel};
