//! Session timers.
//!
//! Two independent countdowns guard a session:
//!
//! - **Game timer**: counts the budget down once per tick; reaching zero
//!   expires the session.
//! - **Watchdog**: a single deadline strictly later than the whole budget.
//!   It only matters if ticks stop arriving; otherwise the game timer ends
//!   the session first and the watchdog is disarmed.
//!
//! Like the rest of the core this module never reads the clock. Arming
//! returns [`TimerRequest`]s that the runtime schedules; when one fires the
//! runtime hands the [`TimerToken`] back. Every token carries the [`Epoch`] it
//! was issued in. The epoch advances on every session start and every stop,
//! so callbacks left over from an earlier session are recognised and dropped.

use std::time::Duration;

use serde::Serialize;

use crate::error::ConfigError;

/// Default game timer budget, in ticks (seconds).
pub const DEFAULT_TIME_BUDGET_SECS: u32 = 60;

/// Default interval between game timer ticks.
pub const DEFAULT_TICK_INTERVAL: Duration = Duration::from_secs(1);

/// Default delay between the end of the budget and the watchdog deadline.
pub const DEFAULT_WATCHDOG_MARGIN: Duration = Duration::from_secs(5);

/// Longest delay any session timer may be scheduled with.
///
/// Keeps every deadline well inside the range an instant can represent.
pub const MAX_TIMER_DELAY: Duration = Duration::from_secs(24 * 60 * 60);

/// Session generation counter.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(transparent)]
pub struct Epoch(u64);

impl Epoch {
    /// Raw counter value.
    #[must_use]
    pub const fn value(self) -> u64 {
        self.0
    }

    #[must_use]
    fn next(self) -> Self {
        Self(self.0.wrapping_add(1))
    }
}

impl std::fmt::Display for Epoch {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// What a scheduled callback is for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum TimerKind {
    /// One game timer tick.
    GameTick,
    /// Watchdog deadline.
    Watchdog,
    /// Reveal a win to the player and report it.
    RevealOutcome,
    /// Leave the result screen and go back to standby.
    ReturnToStandby,
}

/// Identity of a scheduled callback.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TimerToken {
    /// Callback purpose
    pub kind: TimerKind,
    /// Session generation the callback belongs to
    pub epoch: Epoch,
}

/// Request for the runtime to fire `token` after `delay`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimerRequest {
    /// Token to hand back when the delay elapses
    pub token: TimerToken,
    /// Delay from the moment the request is issued
    pub delay: Duration,
}

/// Result of feeding a game tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    /// Time remains. `next` schedules the following tick.
    Running {
        /// Seconds left on the game timer
        remaining: u32,
        /// Next tick to schedule
        next: TimerRequest,
    },

    /// The budget ran out. The game timer and watchdog are now disarmed.
    Expired,

    /// The tick was stale (old epoch or disarmed timer).
    Ignored,
}

/// Timer configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimerConfig {
    /// Game timer budget in ticks
    pub budget_secs: u32,
    /// Interval between ticks
    pub tick_interval: Duration,
    /// How long after the budget's nominal end the watchdog fires
    pub watchdog_margin: Duration,
}

impl Default for TimerConfig {
    fn default() -> Self {
        Self {
            budget_secs: DEFAULT_TIME_BUDGET_SECS,
            tick_interval: DEFAULT_TICK_INTERVAL,
            watchdog_margin: DEFAULT_WATCHDOG_MARGIN,
        }
    }
}

impl TimerConfig {
    /// Nominal duration of the whole budget.
    ///
    /// Saturates at `Duration::MAX`; [`Self::validate`] rejects such configs.
    pub fn budget(&self) -> Duration {
        self.tick_interval.saturating_mul(self.budget_secs)
    }

    /// Delay from session start until the watchdog fires.
    pub fn watchdog_delay(&self) -> Duration {
        self.budget().saturating_add(self.watchdog_margin)
    }

    /// Reject configurations where the watchdog could beat the game timer.
    ///
    /// # Errors
    ///
    /// - `ConfigError::ZeroBudget` if the budget is zero
    /// - `ConfigError::ZeroTickInterval` if ticks would never advance
    /// - `ConfigError::WatchdogMargin` if the margin is zero
    /// - `ConfigError::DelayOverflow` if the watchdog delay overflows
    /// - `ConfigError::DelayTooLong` if the watchdog delay exceeds
    ///   [`MAX_TIMER_DELAY`]
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.budget_secs == 0 {
            return Err(ConfigError::ZeroBudget);
        }
        if self.tick_interval.is_zero() {
            return Err(ConfigError::ZeroTickInterval);
        }
        if self.watchdog_margin.is_zero() {
            return Err(ConfigError::WatchdogMargin { margin: self.watchdog_margin });
        }

        let watchdog = self
            .tick_interval
            .checked_mul(self.budget_secs)
            .and_then(|budget| budget.checked_add(self.watchdog_margin))
            .ok_or(ConfigError::DelayOverflow)?;
        check_delay(watchdog)
    }
}

/// Reject a timer delay longer than [`MAX_TIMER_DELAY`].
///
/// # Errors
///
/// - `ConfigError::DelayTooLong` if `delay` exceeds the limit
pub fn check_delay(delay: Duration) -> Result<(), ConfigError> {
    if delay > MAX_TIMER_DELAY {
        return Err(ConfigError::DelayTooLong { delay, limit: MAX_TIMER_DELAY });
    }
    Ok(())
}

/// Game timer and watchdog for one session at a time.
#[derive(Debug, Clone)]
pub struct SessionTimers {
    config: TimerConfig,
    epoch: Epoch,
    remaining: u32,
    game_armed: bool,
    watchdog_armed: bool,
}

impl SessionTimers {
    /// Create disarmed timers.
    pub fn new(config: TimerConfig) -> Self {
        Self {
            config,
            epoch: Epoch::default(),
            remaining: config.budget_secs,
            game_armed: false,
            watchdog_armed: false,
        }
    }

    /// Current session generation.
    pub fn epoch(&self) -> Epoch {
        self.epoch
    }

    /// Timer configuration.
    pub fn config(&self) -> &TimerConfig {
        &self.config
    }

    /// Seconds left on the game timer.
    pub fn remaining(&self) -> u32 {
        self.remaining
    }

    /// Seconds consumed since the session started.
    pub fn elapsed(&self) -> u32 {
        self.config.budget_secs - self.remaining
    }

    /// True while the game timer counts down.
    pub fn is_game_armed(&self) -> bool {
        self.game_armed
    }

    /// True while the watchdog deadline is pending.
    pub fn is_watchdog_armed(&self) -> bool {
        self.watchdog_armed
    }

    /// Start a new session: advance the epoch, refill the budget and arm both
    /// timers.
    ///
    /// Returns the first game tick and the watchdog deadline to schedule.
    pub fn arm(&mut self) -> [TimerRequest; 2] {
        self.epoch = self.epoch.next();
        self.remaining = self.config.budget_secs;
        self.game_armed = true;
        self.watchdog_armed = true;

        [
            self.schedule(TimerKind::GameTick, self.config.tick_interval),
            self.schedule(TimerKind::Watchdog, self.config.watchdog_delay()),
        ]
    }

    /// Stop both countdowns, keeping the epoch.
    ///
    /// Deferred transitions already scheduled for this session (reveal,
    /// return to standby) stay valid.
    pub fn disarm(&mut self) {
        self.game_armed = false;
        self.watchdog_armed = false;
    }

    /// Stop both countdowns and invalidate every callback issued so far.
    pub fn cancel_all(&mut self) {
        self.disarm();
        self.epoch = self.epoch.next();
    }

    /// Issue a request for `kind` in the current epoch.
    pub fn schedule(&self, kind: TimerKind, delay: Duration) -> TimerRequest {
        TimerRequest { token: TimerToken { kind, epoch: self.epoch }, delay }
    }

    /// True iff `token` belongs to the current epoch and, for the two
    /// countdowns, its timer is still armed.
    pub fn is_current(&self, token: TimerToken) -> bool {
        if token.epoch != self.epoch {
            return false;
        }
        match token.kind {
            TimerKind::GameTick => self.game_armed,
            TimerKind::Watchdog => self.watchdog_armed,
            TimerKind::RevealOutcome | TimerKind::ReturnToStandby => true,
        }
    }

    /// Feed a fired game tick.
    pub fn tick(&mut self, token: TimerToken) -> TickOutcome {
        if token.kind != TimerKind::GameTick || !self.is_current(token) {
            return TickOutcome::Ignored;
        }

        self.remaining = self.remaining.saturating_sub(1);
        if self.remaining == 0 {
            self.disarm();
            return TickOutcome::Expired;
        }

        TickOutcome::Running {
            remaining: self.remaining,
            next: self.schedule(TimerKind::GameTick, self.config.tick_interval),
        }
    }

    /// Feed a fired watchdog deadline.
    ///
    /// Returns `true` if the watchdog was live, in which case both timers
    /// are now disarmed.
    pub fn watchdog_fired(&mut self, token: TimerToken) -> bool {
        if token.kind != TimerKind::Watchdog || !self.is_current(token) {
            return false;
        }
        self.disarm();
        true
    }
}
