//! Tracing setup with optional file-based span export.
//!
//! Everything in the crate logs through `tracing` macros and spans
//! (`mount`, `handle_event`, `reveal` …). This module installs the subscriber
//! that consumes them:
//!
//! ```text
//! tracing → EnvFilter ─┬→ fmt (stderr)
//!                      └→ tracing-opentelemetry → SDK → JSON line exporter → trace file
//! ```
//!
//! # Configuration
//!
//! Trace level is controlled via:
//! 1. `RUST_LOG` environment variable (highest priority)
//! 2. `trace_level` in [`Config`](crate::Config)
//! 3. Default: `"info"`
//!
//! Span export is enabled by setting `trace_file`. The file rotates at 5 MB and
//! keeps three numbered backups.
//!
//! # Modules
//!
//! - [`init`]: Subscriber setup
//! - [`exporter`]: OpenTelemetry exporter writing one JSON record per span
//! - [`writer`]: Size-rotated file writer

mod exporter;
mod init;
mod writer;

pub use init::init_tracing;
