//! Timer host abstraction.

use crate::domain::{ItemId, SectionId};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Identifier of a scheduled timer, issued by the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct TimerId(pub u64);

/// Payload handed back when a reveal timer fires.
///
/// Carries enough to route the callback to its section without any global
/// lookup; callbacks for sections that are gone are dropped by the page.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RevealToken {
    pub section: SectionId,
    pub item: ItemId,
}

/// The host's one-shot timer facility.
pub trait TimerHost {
    /// Schedules `token` to be delivered after `delay`.
    fn schedule(&mut self, delay: Duration, token: RevealToken) -> TimerId;

    /// Cancels a pending timer. Returns `false` if it already fired or is unknown.
    fn cancel(&mut self, id: TimerId) -> bool;
}
