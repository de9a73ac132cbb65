//! Static section content.
//!
//! The surrounding page supplies each section's collection; this module loads
//! those collections from JSON catalogs, either embedded demo pages or files on
//! disk, and validates them before they are mounted.
//!
//! # Catalog Format
//!
//! ```json
//! {
//!   "page": "home",
//!   "sections": [
//!     {
//!       "id": "fleet",
//!       "title": "Our fleet",
//!       "chips": ["all", "vehicles", "locomotives"],
//!       "items": [
//!         { "id": "city-bus", "title": "Metro 12 city bus", "fields": ["Battery electric"], "category": "vehicles" }
//!       ]
//!     }
//!   ]
//! }
//! ```

pub mod catalog;

pub use catalog::{Catalog, SectionContent, BUILTIN_CATALOGS};
