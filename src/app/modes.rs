//! Reveal phase state machine type.
//!
//! Each section moves through the phases below. Arming is one-shot: once a
//! section has entered the viewport it never returns to [`RevealPhase::NotArmed`].
//!
//! ```text
//! NotArmed ──EnteredView──▶ Armed ──(items to reveal)──▶ Revealing ──(last timer)──▶ Settled
//!                             │                              ▲                          │
//!                             └──(nothing to reveal)──▶ Settled ◀────────────────────────┘
//!                                                            │
//!                                      re-filter with new items ─▶ Revealing
//! ```
//!
//! # Example
//!
//! ```rust
//! use showcase::app::RevealPhase;
//!
//! let phase = RevealPhase::NotArmed;
//! assert!(!phase.is_armed());
//! ```

use serde::{Deserialize, Serialize};

/// Reveal progress of one section.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum RevealPhase {
    /// The section has not been in view yet; items are filtered but not scheduled.
    #[default]
    NotArmed,

    /// The section just entered the viewport; reveal timers are about to be issued.
    ///
    /// Transient: the handler moves on to `Revealing` or `Settled` within the same
    /// event.
    Armed,

    /// At least one per-item reveal timer is pending.
    Revealing,

    /// Every currently filtered item has been revealed.
    Settled,
}

impl RevealPhase {
    /// True once the section has entered the viewport.
    #[must_use]
    pub const fn is_armed(self) -> bool {
        !matches!(self, Self::NotArmed)
    }
}
