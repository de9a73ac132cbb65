//! Error types for the showcase crate.
//!
//! This module defines the centralized error type [`ShowcaseError`] and a type alias
//! [`Result`] for convenient error handling throughout the crate. Filtering and reveal
//! scheduling themselves never fail; errors only come from configuration, content
//! loading, and misuse of the page runtime (such as mounting a section twice).

use thiserror::Error;

/// The main error type for showcase operations.
///
/// # Examples
///
/// ```
/// use showcase::ShowcaseError;
///
/// fn validate_config() -> Result<(), ShowcaseError> {
///     Err(ShowcaseError::Config("stagger_ms must be a number".to_string()))
/// }
///
/// assert!(validate_config().is_err());
/// ```
#[derive(Debug, Error)]
pub enum ShowcaseError {
    /// Configuration is invalid or could not be parsed.
    ///
    /// The string describes the specific configuration problem.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Filesystem or I/O operation failed.
    ///
    /// Wraps errors from standard library I/O operations, typically while reading a
    /// configuration file or a content catalog.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// A content catalog could not be parsed or is internally inconsistent.
    #[error("Content error: {0}")]
    Content(String),

    /// Visibility threshold outside the `0.0..=1.0` range.
    #[error("Invalid visibility threshold: {0} (expected a fraction between 0 and 1)")]
    InvalidThreshold(f32),

    /// A category chip refers to a category no item in the section carries.
    #[error("Unknown category '{key}' in section '{section}'")]
    UnknownCategory {
        /// Section whose chip set failed validation.
        section: String,
        /// The offending chip key.
        key: String,
    },

    /// A section with the same identifier is already mounted on the page.
    #[error("Section '{0}' is already mounted")]
    DuplicateSection(String),

    /// Another mounted section already observes this container element.
    #[error("Element '{0}' already hosts a mounted section")]
    DuplicateElement(String),
}

/// A specialized `Result` type for showcase operations.
pub type Result<T> = std::result::Result<T, ShowcaseError>;
