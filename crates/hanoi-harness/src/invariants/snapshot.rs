//! Observable state snapshots for invariant checking.

use hanoi_app::{OutcomeReport, Session, SessionPhase};
use hanoi_core::{Epoch, TOWER_COUNT};

/// Observable state of one session plus everything the host has received.
#[derive(Debug, Clone)]
pub struct SystemSnapshot {
    /// Current phase.
    pub phase: SessionPhase,
    /// Current session generation.
    pub epoch: Epoch,
    /// Disc sizes per tower, bottom to top.
    pub towers: [Vec<u8>; TOWER_COUNT],
    /// True iff every disc sits on the target tower.
    pub solved: bool,
    /// Successful moves this session.
    pub move_count: u32,
    /// Configured budget in seconds.
    pub budget_secs: u32,
    /// Every report delivered so far, tagged with the epoch it was sent in.
    pub reports: Vec<(Epoch, OutcomeReport)>,
}

impl SystemSnapshot {
    /// Capture a session and the report history.
    pub fn from_session(session: &Session, reports: &[(Epoch, OutcomeReport)]) -> Self {
        let puzzle = session.engine().puzzle();
        Self {
            phase: session.phase(),
            epoch: session.epoch(),
            towers: puzzle.sizes(),
            solved: puzzle.is_solved(),
            move_count: session.engine().move_count(),
            budget_secs: session.config().timers.budget_secs,
            reports: reports.to_vec(),
        }
    }
}
