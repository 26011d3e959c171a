//! Standard invariant checks.
//!
//! These invariants capture behavioral properties that must always hold.
//! They verify WHAT must be true, not specific test scenarios.

use std::collections::HashSet;

use hanoi_app::SessionPhase;
use hanoi_core::Disc;

use super::{Invariant, InvariantResult, SystemSnapshot, Violation};

/// Every disc size exists exactly once across the towers.
pub struct DiscConservation;

impl Invariant for DiscConservation {
    fn name(&self) -> &'static str {
        "disc_conservation"
    }

    fn check(&self, state: &SystemSnapshot) -> InvariantResult {
        let mut sizes: Vec<u8> = state.towers.iter().flatten().copied().collect();
        sizes.sort_unstable();
        let mut expected: Vec<u8> = Disc::all().map(Disc::size).collect();
        expected.sort_unstable();

        if sizes != expected {
            return Err(Violation {
                invariant: self.name(),
                message: format!(
                    "expected discs {expected:?}, found {sizes:?} in {:?}",
                    state.towers
                ),
            });
        }
        Ok(())
    }
}

/// Sizes strictly decrease from bottom to top on every tower.
pub struct TowerOrdering;

impl Invariant for TowerOrdering {
    fn name(&self) -> &'static str {
        "tower_ordering"
    }

    fn check(&self, state: &SystemSnapshot) -> InvariantResult {
        for (index, tower) in state.towers.iter().enumerate() {
            if tower.windows(2).any(|pair| pair[1] >= pair[0]) {
                return Err(Violation {
                    invariant: self.name(),
                    message: format!("tower {index} out of order: {tower:?}"),
                });
            }
        }
        Ok(())
    }
}

/// A won session is solved, and an active session never is.
pub struct SolvedMatchesPhase;

impl Invariant for SolvedMatchesPhase {
    fn name(&self) -> &'static str {
        "solved_matches_phase"
    }

    fn check(&self, state: &SystemSnapshot) -> InvariantResult {
        let consistent = match state.phase {
            SessionPhase::Won => state.solved,
            SessionPhase::Active => !state.solved,
            SessionPhase::Standby | SessionPhase::Lost => true,
        };
        if !consistent {
            return Err(Violation {
                invariant: self.name(),
                message: format!("phase {:?} with solved={}", state.phase, state.solved),
            });
        }
        Ok(())
    }
}

/// The host receives at most one report per session.
pub struct SingleOutcome;

impl Invariant for SingleOutcome {
    fn name(&self) -> &'static str {
        "single_outcome"
    }

    fn check(&self, state: &SystemSnapshot) -> InvariantResult {
        let mut seen = HashSet::new();
        for (epoch, report) in &state.reports {
            if !seen.insert(*epoch) {
                return Err(Violation {
                    invariant: self.name(),
                    message: format!("second report {report:?} in epoch {epoch}"),
                });
            }
        }
        Ok(())
    }
}

/// No report claims more time than the budget allows.
pub struct ReportWithinBudget;

impl Invariant for ReportWithinBudget {
    fn name(&self) -> &'static str {
        "report_within_budget"
    }

    fn check(&self, state: &SystemSnapshot) -> InvariantResult {
        for (epoch, report) in &state.reports {
            if report.time > state.budget_secs {
                return Err(Violation {
                    invariant: self.name(),
                    message: format!(
                        "epoch {epoch}: reported {}s against a {}s budget",
                        report.time, state.budget_secs
                    ),
                });
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use hanoi_app::OutcomeReport;
    use hanoi_core::Epoch;

    use super::*;

    fn snapshot(towers: [Vec<u8>; 3], phase: SessionPhase) -> SystemSnapshot {
        let solved = towers[0].is_empty() && towers[1].is_empty();
        SystemSnapshot {
            phase,
            epoch: Epoch::default(),
            towers,
            solved,
            move_count: 0,
            budget_secs: 60,
            reports: vec![],
        }
    }

    #[test]
    fn conservation_catches_missing_disc() {
        let state = snapshot([vec![4, 3, 2], vec![], vec![]], SessionPhase::Active);
        assert!(DiscConservation.check(&state).is_err());
    }

    #[test]
    fn ordering_catches_inversion() {
        let state = snapshot([vec![4, 3], vec![1, 2], vec![]], SessionPhase::Active);
        assert!(TowerOrdering.check(&state).is_err());
        assert!(DiscConservation.check(&state).is_ok());
    }

    #[test]
    fn won_requires_solved() {
        let state = snapshot([vec![4, 3, 2, 1], vec![], vec![]], SessionPhase::Won);
        assert!(SolvedMatchesPhase.check(&state).is_err());

        let state = snapshot([vec![], vec![], vec![4, 3, 2, 1]], SessionPhase::Won);
        assert!(SolvedMatchesPhase.check(&state).is_ok());
    }

    #[test]
    fn duplicate_report_in_one_epoch_is_flagged() {
        let report = OutcomeReport { success: false, moves: 0, time: 60 };
        let mut state = snapshot([vec![4, 3, 2, 1], vec![], vec![]], SessionPhase::Lost);
        state.reports = vec![(Epoch::default(), report), (Epoch::default(), report)];

        assert!(SingleOutcome.check(&state).is_err());
    }

    #[test]
    fn overlong_report_is_flagged() {
        let mut state = snapshot([vec![4, 3, 2, 1], vec![], vec![]], SessionPhase::Lost);
        let late = OutcomeReport { success: false, moves: 0, time: 61 };
        state.reports = vec![(Epoch::default(), late)];

        assert!(ReportWithinBudget.check(&state).is_err());
    }
}
