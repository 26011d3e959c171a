//! Observable session state types.
//!
//! These structures are the view model handed to the renderer and the host.
//! They carry plain data only; the rules live in [`crate::Session`].

use hanoi_core::{Epoch, Selection, TOWER_COUNT};
use serde::{Deserialize, Serialize};

/// Session lifecycle phase.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SessionPhase {
    /// Waiting for the host to start a session.
    #[default]
    Standby,
    /// Puzzle is live and accepts input.
    Active,
    /// Puzzle solved; waiting to reveal, then to return to standby.
    Won,
    /// Time ran out; waiting to return to standby.
    Lost,
}

impl SessionPhase {
    /// True if player input is accepted in this phase.
    pub fn accepts_input(self) -> bool {
        self == Self::Active
    }
}

/// Screen the renderer should show.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Screen {
    /// Idle overlay.
    Standby,
    /// Puzzle board.
    Hack,
    /// Win screen.
    Success,
    /// Loss screen.
    Failure,
}

/// Result sent to the host once per finished session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutcomeReport {
    /// True if the puzzle was solved in time.
    pub success: bool,
    /// Successful moves made.
    pub moves: u32,
    /// Seconds elapsed, bounded by the time budget.
    pub time: u32,
}

/// Everything the renderer needs to draw one frame.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RenderSnapshot {
    /// Disc sizes per tower, bottom to top.
    pub towers: [Vec<u8>; TOWER_COUNT],
    /// Picked-up disc, if any.
    pub selection: Option<Selection>,
    /// Lifecycle phase.
    pub phase: SessionPhase,
    /// Screen to display.
    pub screen: Screen,
    /// Successful moves this session.
    pub move_count: u32,
    /// Seconds left on the game timer.
    pub time_remaining: u32,
    /// Percentage of discs on the target tower.
    pub progress: u8,
    /// Current session generation.
    pub epoch: Epoch,
}
