//! Application layer errors.

use hanoi_core::PuzzleError;
use thiserror::Error;

/// Errors from the session state machine.
///
/// Only integration contract violations end up here; rejected moves and
/// stale timers are handled inside the state machine.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SessionError {
    /// The renderer supplied an invalid tower index or disc size.
    #[error("puzzle error: {0}")]
    Puzzle(#[from] PuzzleError),
}

/// Errors at the host boundary.
#[derive(Error, Debug)]
pub enum BridgeError {
    /// Inbound message was not valid JSON or had an unknown/missing `type`.
    #[error("malformed host message: {0}")]
    Malformed(#[from] serde_json::Error),

    /// The host side of the bridge is gone.
    #[error("host bridge closed")]
    Closed,
}

/// Errors that stop the runtime.
#[derive(Error, Debug)]
pub enum RuntimeError {
    /// Session state machine rejected an event.
    #[error("session error: {0}")]
    Session(#[from] SessionError),
}
