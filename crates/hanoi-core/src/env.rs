//! Environment abstraction for deterministic testing.
//!
//! Decouples session logic from the system clock. Production uses real
//! monotonic time and tokio sleeps; the simulation harness uses a virtual
//! clock that only moves when a test advances it.

use std::{
    future::Future,
    ops::{Add, Sub},
    time::Duration,
};

/// Abstract environment providing time and async sleeping.
///
/// # Invariants
///
/// Implementations MUST guarantee that `now()` never goes backwards.
pub trait Environment: Clone + Send + Sync + 'static {
    /// The specific instant type used by this environment.
    ///
    /// Production environments use `std::time::Instant`, while simulation
    /// environments use a virtual instant.
    type Instant: Copy
        + Ord
        + Send
        + Sync
        + std::fmt::Debug
        + Sub<Output = Duration>
        + Add<Duration, Output = Self::Instant>;

    /// Current time (monotonic).
    fn now(&self) -> Self::Instant;

    /// Sleeps for the specified duration.
    ///
    /// Only runtime code awaits this; the state machines never do.
    fn sleep(&self, duration: Duration) -> impl Future<Output = ()> + Send;

    /// Time remaining until `deadline`, or zero if it has already passed.
    fn until(&self, deadline: Self::Instant) -> Duration {
        let now = self.now();
        if deadline > now { deadline - now } else { Duration::ZERO }
    }
}
