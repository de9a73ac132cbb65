//! Reveal timer scheduling.
//!
//! Reveal timers are scheduled through the host's asynchronous timer facility
//! (`setTimeout` on the web) behind the [`TimerHost`] trait; the crate never
//! polls. [`ManualTimerHost`] is a deterministic virtual clock used by tests and
//! the preview binary.
//!
//! - [`host`]: The [`TimerHost`] trait, [`TimerId`] and [`RevealToken`]
//! - [`manual`]: [`ManualTimerHost`]

pub mod host;
pub mod manual;

pub use host::{RevealToken, TimerHost, TimerId};
pub use manual::ManualTimerHost;
