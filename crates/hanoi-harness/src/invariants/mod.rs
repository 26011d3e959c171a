//! Invariant checking for deterministic simulation testing.
//!
//! Invariants are properties that must always hold while a session runs.
//! Unlike example-based tests that check specific scenarios, invariants
//! verify behavioral properties across all possible input sequences.
//!
//! # Architecture
//!
//! Observable state is extracted from a [`hanoi_app::Session`] plus the
//! reports the host received into a [`SystemSnapshot`], then every registered
//! [`Invariant`] runs against it.
//!
//! # Usage
//!
//! ```ignore
//! let registry = InvariantRegistry::standard();
//! let snapshot = SystemSnapshot::from_session(&session, &reports);
//! registry.check_all(&snapshot)?;
//! ```

mod checks;
mod snapshot;

pub use checks::{
    DiscConservation, ReportWithinBudget, SingleOutcome, SolvedMatchesPhase, TowerOrdering,
};
pub use snapshot::SystemSnapshot;

/// Invariant check result.
pub type InvariantResult = Result<(), Violation>;

/// Invariant violation with context.
#[derive(Debug, Clone)]
pub struct Violation {
    /// Name of the violated invariant.
    pub invariant: &'static str,
    /// Description of what went wrong.
    pub message: String,
}

impl std::fmt::Display for Violation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.invariant, self.message)
    }
}

impl std::error::Error for Violation {}

/// An invariant that can be checked against session state.
pub trait Invariant: Send + Sync {
    /// Invariant name for error reporting.
    fn name(&self) -> &'static str;

    /// Check the invariant against a snapshot.
    ///
    /// Returns `Ok(())` if the invariant holds, or a [`Violation`]
    /// describing what went wrong.
    fn check(&self, state: &SystemSnapshot) -> InvariantResult;
}

/// The invariants a session is checked against.
pub struct InvariantRegistry {
    invariants: Vec<Box<dyn Invariant>>,
}

impl InvariantRegistry {
    /// Every session invariant:
    ///
    /// - [`DiscConservation`]: each disc exists exactly once
    /// - [`TowerOrdering`]: no disc rests on a smaller one
    /// - [`SolvedMatchesPhase`]: won iff solved, never active while solved
    /// - [`SingleOutcome`]: at most one report per session
    /// - [`ReportWithinBudget`]: reported time never exceeds the budget
    pub fn standard() -> Self {
        Self {
            invariants: vec![
                Box::new(DiscConservation),
                Box::new(TowerOrdering),
                Box::new(SolvedMatchesPhase),
                Box::new(SingleOutcome),
                Box::new(ReportWithinBudget),
            ],
        }
    }

    /// Run every invariant, collecting all violations.
    ///
    /// # Errors
    ///
    /// Returns every [`Violation`] found, in registration order.
    pub fn check_all(&self, state: &SystemSnapshot) -> Result<(), Vec<Violation>> {
        let violations: Vec<_> =
            self.invariants.iter().filter_map(|inv| inv.check(state).err()).collect();

        if violations.is_empty() { Ok(()) } else { Err(violations) }
    }

    /// Panic with every violation and `context` if any invariant fails.
    ///
    /// # Panics
    ///
    /// On any violation.
    pub fn assert_all(&self, state: &SystemSnapshot, context: &str) {
        if let Err(violations) = self.check_all(state) {
            let messages: Vec<_> = violations.iter().map(ToString::to_string).collect();
            panic!("invariant violated {context}:\n  {}", messages.join("\n  "));
        }
    }
}

#[cfg(test)]
mod tests {
    use hanoi_app::{Session, SessionConfig};

    use super::*;

    #[test]
    fn broken_tower_reports_every_violation() {
        let registry = InvariantRegistry::standard();
        let session = Session::new(SessionConfig::default());
        let mut snapshot = SystemSnapshot::from_session(&session, &[]);
        snapshot.towers[0].swap(0, 3);

        let violations = registry.check_all(&snapshot).expect_err("ordering broken");
        assert_eq!(violations.len(), 1);
        assert_eq!(violations[0].invariant, "tower_ordering");
    }

    #[test]
    fn fresh_session_passes_invariants() {
        let registry = InvariantRegistry::standard();
        let session = Session::new(SessionConfig::default());
        let snapshot = SystemSnapshot::from_session(&session, &[]);
        assert!(registry.check_all(&snapshot).is_ok());
    }
}
