//! Wall-clock environment for the host process.

use std::time::{Duration, Instant};

use hanoi_core::Environment;

/// Monotonic system clock with tokio timers.
///
/// Session deadlines are measured against [`Instant`], so changes to the
/// wall clock never shorten or stretch a running game.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemEnv;

impl SystemEnv {
    /// Environment backed by the system clock.
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl Environment for SystemEnv {
    type Instant = Instant;

    fn now(&self) -> Instant {
        Instant::now()
    }

    fn sleep(&self, duration: Duration) -> impl std::future::Future<Output = ()> + Send {
        tokio::time::sleep(duration)
    }
}
