//! Deterministic simulation harness for the tower minigame.
//!
//! Virtual-clock implementations of the Environment, HostBridge and Renderer
//! traits, so session behavior and the full runtime can be tested without
//! wall-clock waits.
//!
//! # Drivers
//!
//! - [`SimDriver`]: feeds events straight into a [`hanoi_app::Session`] and
//!   fires deferred callbacks as virtual time advances
//! - [`hanoi_app::Runtime`] over [`ChannelBridge`], [`RecordingRenderer`] and
//!   [`SimEnv`]: the production event loop on a virtual clock
//!
//! # Invariant Testing
//!
//! The `invariants` module checks WHAT must hold after every step: disc
//! conservation, tower ordering, phase consistency and one report per
//! session. Use [`InvariantRegistry::standard()`] for all of them.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod channel_bridge;
pub mod invariants;
pub mod random;
pub mod recording_renderer;
pub mod scenario;
pub mod sim_driver;
pub mod sim_env;

pub use channel_bridge::{ChannelBridge, ChannelHost, channel_bridge};
pub use invariants::{
    DiscConservation, Invariant, InvariantRegistry, InvariantResult, ReportWithinBudget,
    SingleOutcome, SolvedMatchesPhase, SystemSnapshot, TowerOrdering, Violation,
};
pub use random::{PlayerAction, RandomPlayer};
pub use recording_renderer::{RecordingRenderer, RenderLog, SimRenderError};
pub use scenario::optimal_solution;
pub use sim_driver::SimDriver;
pub use sim_env::{SimEnv, SimInstant};
