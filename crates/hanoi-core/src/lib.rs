//! Core game logic for the tower minigame.
//!
//! Pure state machines with no I/O: callers feed in inputs (clicks, timer
//! callbacks) and receive signals or timer requests back. Time is never read
//! here; it is injected through [`env::Environment`] by the layers above.
//!
//! # Components
//!
//! - [`Puzzle`]: towers, discs, legality and win rules
//! - [`MoveEngine`]: selection, validation, execution and move counting
//! - [`SessionTimers`]: game countdown, watchdog deadline and epoch tokens

#![forbid(unsafe_code)]
#![deny(missing_docs)]

pub mod engine;
pub mod env;
pub mod error;
pub mod puzzle;
pub mod timer;

pub use engine::{MoveEngine, MoveSignal, Selection};
pub use env::Environment;
pub use error::{ConfigError, PuzzleError};
pub use puzzle::{DISC_COUNT, Disc, Puzzle, TOWER_COUNT, Tower, TowerId};
pub use timer::{
    Epoch, MAX_TIMER_DELAY, SessionTimers, TickOutcome, TimerConfig, TimerKind, TimerRequest,
    TimerToken,
};
