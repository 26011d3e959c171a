//! Session side-effects and intents.
//!
//! This module defines [`SessionAction`], the instructions produced by the
//! [`crate::Session`] state machine for the runtime to execute.

use hanoi_core::{TimerRequest, TowerId};
use serde::Serialize;

use crate::OutcomeReport;

/// Transient move feedback for the renderer (a short flash on a tower).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "type", content = "tower", rename_all = "camelCase")]
pub enum MoveFeedback {
    /// A disc landed on this tower.
    ValidMove(TowerId),
    /// A move onto (or a pick-up from) this tower was rejected.
    InvalidMove(TowerId),
}

/// Actions produced by the Session state machine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionAction {
    /// Render a fresh snapshot.
    Render,

    /// Show transient move feedback.
    Feedback(MoveFeedback),

    /// Fire a timer callback after a delay.
    Schedule(TimerRequest),

    /// Send the outcome to the host. Fire-and-forget.
    ReportOutcome(OutcomeReport),
}
