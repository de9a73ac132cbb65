//! Showcase: viewport-triggered staggered reveal and client-side filtering for
//! landing page sections.
//!
//! Marketing pages (home, about, services) are built from sections that list
//! static content: stats, fleet catalogs, FAQs, news. Each section:
//! - Stays hidden until its container first scrolls into view
//! - Then reveals its items one after another with a fixed stagger
//! - Filters its items by search text and category chips, in place
//! - Cancels every pending reveal when it is torn down
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────┐
//! │  Host page / preview binary (main.rs)               │  ← Entry point
//! └─────────────────────────────────────────────────────┘
//!                        │
//! ┌─────────────────────────────────────────────────────┐
//! │  Page runtime (page/)                               │  ← Routing
//! │  - One tracker + controller per section             │
//! │  - Executes actions against observer and timers     │
//! └─────────────────────────────────────────────────────┘
//!         │                    │                    │
//! ┌───────────────┐   ┌───────────────┐   ┌───────────────┐
//! │ Controller    │   │ Visibility    │   │ Timers        │
//! │ (app/)        │   │ (visibility/) │   │ (timers/)     │
//! │ - Filtering   │   │ - Observer    │   │ - Host trait  │
//! │ - Reveal FSM  │   │ - One-shot    │   │ - Virtual     │
//! │ - View model  │   │ - Fail-open   │   │   clock       │
//! └───────────────┘   └───────────────┘   └───────────────┘
//!         │
//! ┌─────────────────────────────────────────────────────┐
//! │  Domain & Content                                   │
//! │  - Items, filter state, errors (domain/)            │
//! │  - JSON catalogs (content/)                         │
//! └─────────────────────────────────────────────────────┘
//!                        │
//! ┌─────────────────────────────────────────────────────┐
//! │  Observability (observability/)                     │  ← Optional
//! │  - tracing subscriber, JSON span file export        │
//! └─────────────────────────────────────────────────────┘
//! ```
//!
//! # Modules
//!
//! - [`app`]: Filter/reveal state machine with event/action model
//! - [`domain`]: Items, filter state, errors
//! - [`visibility`]: Viewport observer abstraction and one-shot trackers
//! - [`timers`]: Timer host abstraction and a deterministic virtual clock
//! - [`page`]: Per-section runtime binding everything together
//! - [`content`]: Static section catalogs
//! - [`ui`]: View models for the presentation layer
//! - [`observability`]: Tracing setup
//!
//! # Configuration
//!
//! ```toml
//! stagger_ms = 100
//! threshold = 0.1
//! root_margin = "0px 0px -50px 0px"
//! trigger_once = true
//! trace_level = "debug"
//! trace_file = "/tmp/showcase-spans.json"
//! ```
//!
//! # Example
//!
//! ```rust
//! use showcase::content::Catalog;
//! use showcase::timers::ManualTimerHost;
//! use showcase::visibility::UnavailableObserver;
//! use showcase::{initialize, Config};
//!
//! let catalog = Catalog::builtin("about").expect("embedded catalog");
//! let faq = catalog.section(&"faq".into()).expect("faq section");
//!
//! // Without an intersection primitive sections fail open and reveal at once.
//! let mut page = initialize(&Config::default(), UnavailableObserver, ManualTimerHost::default());
//! page.mount_content("faq-list".into(), faq)?;
//! page.set_query(&faq.id, "warranty")?;
//! page.run_until_idle()?;
//!
//! let vm = page.viewmodel(&faq.id).expect("mounted");
//! assert_eq!(vm.display_items.len(), 2);
//! # Ok::<(), showcase::ShowcaseError>(())
//! ```

#![allow(clippy::multiple_crate_versions)]

pub mod app;
pub mod content;
pub mod domain;
pub mod page;
pub mod timers;
pub mod ui;
pub mod visibility;

pub mod observability;

pub use app::{handle_event, Action, Event, RevealPhase, SectionState};
pub use domain::{Item, Result, ShowcaseError};
pub use page::Page;

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::time::Duration;
use timers::TimerHost;
use visibility::{ObserveOptions, RootMargin, ViewportObserver};

/// Runtime configuration shared by every section of a page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Delay between consecutive item entrances, in milliseconds. Default: 100
    pub stagger_ms: u64,

    /// Visible fraction of a container that counts as "in view". Default: 0.1
    pub threshold: f32,

    /// Margin applied to the viewport before intersection. Default: `0px 0px -50px 0px`
    pub root_margin: RootMargin,

    /// Report only the first entry into view. Default: `true`
    pub trigger_once: bool,

    /// Tracing level filter.
    ///
    /// Options: `trace`, `debug`, `info`, `warn`, `error`. Default: `"info"`
    pub trace_level: Option<String>,

    /// File receiving one JSON line per finished span. Disabled when unset.
    pub trace_file: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            stagger_ms: 100,
            threshold: 0.1,
            root_margin: RootMargin::DEFAULT,
            trigger_once: true,
            trace_level: None,
            trace_file: None,
        }
    }
}

impl Config {
    /// Parses configuration from string key/value pairs, such as the `data-*`
    /// attributes of a section's mount element.
    ///
    /// Unknown keys are ignored and unparsable values fall back to their defaults.
    ///
    /// # Example
    ///
    /// ```rust
    /// use std::collections::BTreeMap;
    /// use showcase::Config;
    ///
    /// let mut map = BTreeMap::new();
    /// map.insert("stagger_ms".to_string(), "120".to_string());
    /// map.insert("threshold".to_string(), "2.5".to_string());
    ///
    /// let config = Config::from_map(&map);
    /// assert_eq!(config.stagger_ms, 120);
    /// assert_eq!(config.threshold, 0.1);
    /// ```
    #[must_use]
    pub fn from_map(map: &BTreeMap<String, String>) -> Self {
        let defaults = Self::default();

        let stagger_ms = map
            .get("stagger_ms")
            .and_then(|s| s.trim().parse::<u64>().ok())
            .unwrap_or(defaults.stagger_ms);

        let threshold = map
            .get("threshold")
            .and_then(|s| s.trim().parse::<f32>().ok())
            .filter(|t| (0.0..=1.0).contains(t))
            .unwrap_or(defaults.threshold);

        let root_margin = map
            .get("root_margin")
            .and_then(|s| {
                s.parse::<RootMargin>()
                    .map_err(|e| tracing::debug!(error = %e, "ignoring invalid root margin"))
                    .ok()
            })
            .unwrap_or(defaults.root_margin);

        let trigger_once = map
            .get("trigger_once")
            .and_then(|s| s.trim().parse::<bool>().ok())
            .unwrap_or(defaults.trigger_once);

        Self {
            stagger_ms,
            threshold,
            root_margin,
            trigger_once,
            trace_level: map.get("trace_level").cloned(),
            trace_file: map.get("trace_file").map(PathBuf::from),
        }
    }

    /// Parses and validates a TOML configuration document.
    ///
    /// # Errors
    ///
    /// Returns [`ShowcaseError::Config`] for malformed TOML or unknown keys and
    /// [`ShowcaseError::InvalidThreshold`] for an out-of-range threshold.
    pub fn from_toml_str(toml_str: &str) -> Result<Self> {
        let config: Self = toml::from_str(toml_str)
            .map_err(|e| ShowcaseError::Config(format!("failed to parse configuration: {e}")))?;
        config.observe_options()?;
        Ok(config)
    }

    /// Reads and validates a TOML configuration file.
    ///
    /// # Errors
    ///
    /// Returns [`ShowcaseError::Io`] if the file cannot be read, otherwise the
    /// errors of [`Config::from_toml_str`].
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_toml_str(&contents)
    }

    #[must_use]
    pub const fn stagger(&self) -> Duration {
        Duration::from_millis(self.stagger_ms)
    }

    /// Observer options for section trackers.
    ///
    /// # Errors
    ///
    /// Returns [`ShowcaseError::InvalidThreshold`] if `threshold` is not in `0.0..=1.0`.
    pub fn observe_options(&self) -> Result<ObserveOptions> {
        ObserveOptions::new(self.threshold, self.root_margin, self.trigger_once)
    }
}

/// Creates an empty page bound to the host's observer and timer facilities.
pub fn initialize<O: ViewportObserver, T: TimerHost>(config: &Config, observer: O, timers: T) -> Page<O, T> {
    tracing::debug!(
        stagger_ms = config.stagger_ms,
        threshold = config.threshold,
        root_margin = %config.root_margin,
        trigger_once = config.trigger_once,
        "initializing showcase page"
    );
    Page::new(observer, timers, config.clone())
}
