//! Session input events.
//!
//! Events originate from three sources:
//! - Host commands (start, stop).
//! - Player input resolved by the renderer (clicks, key presses).
//! - Timer callbacks handed back by the runtime.

use hanoi_core::TimerToken;
use serde::{Deserialize, Serialize};

use crate::KeyInput;

/// A UI element under a click, as resolved by the renderer.
///
/// Indices are raw; the session validates them and treats anything out of
/// range as a contract violation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum ClickTarget {
    /// The tower body (not a disc).
    Tower {
        /// Tower index
        tower: usize,
    },

    /// A disc.
    Disc {
        /// Disc size
        size: u8,
        /// Tower index the disc sits on
        tower: usize,
        /// Position in the tower, 0 at the bottom
        position: usize,
    },
}

/// Events processed by the Session state machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionEvent {
    /// Host asked to start a session.
    Start,

    /// Host asked to abort the session.
    Stop,

    /// Player clicked a board element.
    Click(ClickTarget),

    /// Player pressed a key.
    Key(KeyInput),

    /// A scheduled timer elapsed.
    TimerFired(TimerToken),
}
