//! Production host process for the tower minigame.
//!
//! Wraps [`hanoi_app::Runtime`] with real I/O: newline-delimited JSON on
//! stdin/stdout, a fixed-geometry board for hit-testing, and the system
//! clock.
//!
//! # Components
//!
//! - [`StdioBridge`]: host messages in, outcome reports out
//! - [`BoardRenderer`]: board geometry and snapshot logging
//! - [`SystemEnv`]: production environment (real time, tokio sleep)

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod board;
mod error;
mod stdio;
mod system_env;

pub use board::{BoardRenderer, Rect, disc_rect, tower_rect};
pub use error::HostError;
pub use stdio::StdioBridge;
pub use system_env::SystemEnv;
