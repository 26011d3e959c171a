//! Session configuration.

use std::time::Duration;

use hanoi_core::{ConfigError, TimerConfig, timer::check_delay};

/// Delay between the winning move and revealing/reporting the win.
pub const DEFAULT_REVEAL_DELAY: Duration = Duration::from_secs(1);

/// How long the success or failure screen stays up before standby.
pub const DEFAULT_RESULT_DISPLAY: Duration = Duration::from_secs(3);

/// Session configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionConfig {
    /// Game timer and watchdog
    pub timers: TimerConfig,
    /// Delay before a win is revealed and reported
    pub reveal_delay: Duration,
    /// Result screen duration before returning to standby
    pub result_display: Duration,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            timers: TimerConfig::default(),
            reveal_delay: DEFAULT_REVEAL_DELAY,
            result_display: DEFAULT_RESULT_DISPLAY,
        }
    }
}

impl SessionConfig {
    /// Validate the configuration.
    ///
    /// # Errors
    ///
    /// - Any [`ConfigError`] from [`TimerConfig::validate`]
    /// - `ConfigError::DelayTooLong` if the reveal or result delay exceeds
    ///   [`hanoi_core::MAX_TIMER_DELAY`]
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.timers.validate()?;
        check_delay(self.reveal_delay)?;
        check_delay(self.result_display)
    }
}
