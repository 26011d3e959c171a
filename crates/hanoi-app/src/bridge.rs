//! Host-to-session translation layer.
//!
//! The host (the process embedding the overlay) talks to the minigame with
//! small JSON messages tagged by `type`, and receives one
//! [`crate::OutcomeReport`] per finished session. [`HostBridge`] abstracts
//! that channel so the runtime has no dependency on any particular host.
//!
//! # Inbound messages
//!
//! | `type`       | payload      | effect                                 |
//! |--------------|--------------|----------------------------------------|
//! | `startHack`  | none         | start a session                        |
//! | `stopHack`   | none         | abort without reporting                |
//! | `mouseMove`  | `{x, y}`     | move the cursor (renderer only)        |
//! | `click`      | `{x, y}`     | hit-test, then disc or tower click     |
//! | `keyDown`    | `{key}`      | keyboard shortcut                      |
//! | `debugState` | none         | log the current snapshot               |

use std::future::Future;

use serde::{Deserialize, Serialize};

use crate::{BridgeError, OutcomeReport};

/// Messages sent by the host.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum HostMessage {
    /// Start a session.
    StartHack,

    /// Abort the running session.
    StopHack,

    /// Cursor moved (screen coordinates).
    MouseMove {
        /// Horizontal position in pixels
        x: f64,
        /// Vertical position in pixels
        y: f64,
    },

    /// Click at screen coordinates.
    Click {
        /// Horizontal position in pixels
        x: f64,
        /// Vertical position in pixels
        y: f64,
    },

    /// Key pressed.
    KeyDown {
        /// DOM-style key name
        key: String,
    },

    /// Dump the current state to the log.
    DebugState,
}

impl HostMessage {
    /// Parse a JSON message.
    ///
    /// # Errors
    ///
    /// - `BridgeError::Malformed` on invalid JSON or an unknown or missing
    ///   `type`
    pub fn from_json(text: &str) -> Result<Self, BridgeError> {
        Ok(serde_json::from_str(text)?)
    }
}

/// Abstracts the channel to the host.
///
/// # Implementations
///
/// - **Production**: newline-delimited JSON over stdio
/// - **Simulation**: in-memory channels
pub trait HostBridge: Send {
    /// Platform-specific error type.
    type Error: std::error::Error + Send + 'static;

    /// Wait for the next well-formed host message.
    ///
    /// Returns `None` once the host is gone. Malformed input is logged and
    /// skipped by the implementation. The future MUST be cancel-safe: the
    /// runtime drops it whenever a timer becomes due first.
    fn next_message(&mut self) -> impl Future<Output = Option<HostMessage>> + Send;

    /// Hand an outcome report over for delivery.
    ///
    /// Runs on the event loop, so it MUST NOT wait on the host: queue the
    /// report and return. A host that stops reading must never stall timers
    /// or inbound messages.
    ///
    /// # Errors
    ///
    /// Returns an error if the report cannot be queued. Callers log and drop
    /// it.
    fn report_outcome(&mut self, report: OutcomeReport) -> Result<(), Self::Error>;
}
