//! Viewport visibility tracking.
//!
//! - [`observer`]: The [`ViewportObserver`] trait, its options, and the
//!   scripted and unavailable implementations
//! - [`tracker`]: One-shot per-container [`VisibilityTracker`]

pub mod observer;
pub mod tracker;

pub use observer::{
    ElementId, ObservationHandle, ObserveOptions, RootMargin, ScriptedObserver, UnavailableObserver,
    ViewportObserver,
};
pub use tracker::{VisibilityChange, VisibilityTracker};
