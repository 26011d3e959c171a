//! Application layer for the tower minigame.
//!
//! Pure session state machine plus a generic runtime, so the same code runs
//! against the real host process and inside deterministic simulation tests.
//!
//! # Components
//!
//! - [`Session`]: phase state machine (standby, active, won, lost)
//! - [`HostBridge`]: inbound host messages and outbound outcome reports
//! - [`Renderer`]: presentation collaborator (snapshots, feedback, hit-testing)
//! - [`TimerQueue`]: single ordered queue of deferred callbacks
//! - [`Runtime`]: event loop that serializes host input and timers

#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod action;
mod bridge;
mod config;
mod error;
mod event;
mod input;
mod render;
mod runtime;
mod schedule;
mod session;
mod state;

pub use action::{MoveFeedback, SessionAction};
pub use bridge::{HostBridge, HostMessage};
pub use config::{DEFAULT_RESULT_DISPLAY, DEFAULT_REVEAL_DELAY, SessionConfig};
pub use error::{BridgeError, RuntimeError, SessionError};
pub use event::{ClickTarget, SessionEvent};
pub use input::KeyInput;
pub use render::Renderer;
pub use runtime::Runtime;
pub use schedule::TimerQueue;
pub use session::Session;
pub use state::{OutcomeReport, RenderSnapshot, Screen, SessionPhase};
