//! Domain layer: content items, filter state, and errors.
//!
//! This module contains the pure data types of the crate, independent of the
//! page runtime, the viewport observer and the timer host.
//!
//! # Organization
//!
//! - [`error`]: Error types and result aliases
//! - [`item`]: Item model and identifiers
//! - [`filter`]: Filter state and the order-preserving filter function

pub mod error;
pub mod filter;
pub mod item;

pub use error::{Result, ShowcaseError};
pub use filter::{CategorySelection, FilterState, ALL_CATEGORIES};
pub use item::{Item, ItemId, SectionId};
