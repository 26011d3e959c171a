//! Error types for the puzzle core.
//!
//! Rejected moves are not errors: they surface as
//! [`crate::MoveSignal::InvalidMove`] for the renderer. The variants here are
//! contract violations by the integration layer (bad indices, bad disc sizes)
//! or rejected configuration.

use std::time::Duration;

use thiserror::Error;

/// Errors raised by the puzzle model.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PuzzleError {
    /// Tower index outside of `0..3`.
    #[error("tower index {index} out of range (expected 0, 1 or 2)")]
    OutOfRange {
        /// Index that was supplied
        index: usize,
    },

    /// Disc size outside of `1..=4`.
    #[error("disc size {size} out of range (expected 1 to 4)")]
    InvalidDisc {
        /// Size that was supplied
        size: u8,
    },

    /// A constructed tower layout breaks ordering or uniqueness.
    #[error("invariant violation: {0}")]
    InvariantViolation(String),
}

/// Errors raised when validating timer or session configuration.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// Game timer budget of zero ticks.
    #[error("time budget must be at least one second")]
    ZeroBudget,

    /// Tick interval of zero.
    #[error("tick interval must be non-zero")]
    ZeroTickInterval,

    /// Watchdog would not fire strictly after the game timer.
    #[error("watchdog margin must be non-zero, got {margin:?}")]
    WatchdogMargin {
        /// Margin that was supplied
        margin: Duration,
    },

    /// A derived timer delay does not fit in a `Duration`.
    #[error("timer delay overflows")]
    DelayOverflow,

    /// A timer delay is longer than the scheduler accepts.
    #[error("timer delay {delay:?} exceeds the {limit:?} limit")]
    DelayTooLong {
        /// Delay that was requested
        delay: Duration,
        /// Longest accepted delay
        limit: Duration,
    },
}
