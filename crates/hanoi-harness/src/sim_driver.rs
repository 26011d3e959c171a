//! Simulation driver for session state machine testing.
//!
//! `SimDriver` plays the runtime's role without async: it feeds events into
//! a [`Session`], executes the returned actions against in-memory sinks and
//! fires deferred callbacks as a test advances virtual time. Callbacks fire
//! at their exact due instant, in due order, so timing assertions are exact.

use std::time::Duration;

use hanoi_app::{
    ClickTarget, KeyInput, MoveFeedback, OutcomeReport, Session, SessionAction, SessionConfig,
    SessionError, SessionEvent, TimerQueue,
};
use hanoi_core::{Environment, Epoch, TimerKind};

use crate::{
    InvariantRegistry, SimEnv, SimInstant, SystemSnapshot,
    random::PlayerAction,
};

/// Simulation driver for deterministic session testing.
pub struct SimDriver {
    session: Session,
    env: SimEnv,
    timers: TimerQueue<SimInstant>,
    reports: Vec<(Epoch, OutcomeReport)>,
    feedback: Vec<MoveFeedback>,
    renders: usize,
    invariants: Option<InvariantRegistry>,
}

impl Default for SimDriver {
    fn default() -> Self {
        Self::new(SessionConfig::default())
    }
}

impl SimDriver {
    /// Create a driver around a session in standby.
    pub fn new(config: SessionConfig) -> Self {
        Self {
            session: Session::new(config),
            env: SimEnv::new(),
            timers: TimerQueue::new(),
            reports: Vec::new(),
            feedback: Vec::new(),
            renders: 0,
            invariants: None,
        }
    }

    /// Enable invariant checking after every step.
    #[must_use]
    pub fn with_invariants(mut self, registry: InvariantRegistry) -> Self {
        self.invariants = Some(registry);
        self
    }

    /// Feed one event and execute its actions.
    ///
    /// # Errors
    ///
    /// Propagates `SessionError` from the session unchanged.
    pub fn handle(&mut self, event: SessionEvent) -> Result<Vec<SessionAction>, SessionError> {
        let actions = self.session.handle(event)?;
        self.execute(&actions);
        self.check_invariants(&format!("after {event:?}"));
        Ok(actions)
    }

    /// Host `startHack`.
    pub fn start(&mut self) -> Vec<SessionAction> {
        let actions = self.session.start();
        self.execute(&actions);
        self.check_invariants("after start");
        actions
    }

    /// Host `stopHack`.
    pub fn stop(&mut self) -> Vec<SessionAction> {
        let actions = self.session.stop();
        self.execute(&actions);
        self.check_invariants("after stop");
        actions
    }

    /// Click a tower background.
    ///
    /// # Errors
    ///
    /// - `SessionError::Puzzle` if `tower` is out of range
    pub fn click_tower(&mut self, tower: usize) -> Result<Vec<SessionAction>, SessionError> {
        self.handle(SessionEvent::Click(ClickTarget::Tower { tower }))
    }

    /// Click a disc.
    ///
    /// # Errors
    ///
    /// - `SessionError::Puzzle` if `tower` or `size` is out of range
    pub fn click_disc(
        &mut self,
        size: u8,
        tower: usize,
        position: usize,
    ) -> Result<Vec<SessionAction>, SessionError> {
        self.handle(SessionEvent::Click(ClickTarget::Disc { size, tower, position }))
    }

    /// Press a key by DOM name.
    pub fn press(&mut self, key: &str) -> Vec<SessionAction> {
        let key = KeyInput::from_key(key);
        let actions = self.session.key(key);
        self.execute(&actions);
        self.check_invariants(&format!("after key {key:?}"));
        actions
    }

    /// Move virtual time forward, firing every callback that falls due.
    ///
    /// Returns the actions produced by the fired callbacks, in order.
    pub fn advance(&mut self, duration: Duration) -> Vec<SessionAction> {
        let target = self.env.now() + duration;
        let mut fired = Vec::new();

        while let Some(due) = self.timers.next_due().filter(|due| *due <= target) {
            self.env.advance_to(due);
            let Some(token) = self.timers.pop_due(due) else {
                break;
            };
            let actions = self.session.timer_fired(token);
            self.execute(&actions);
            self.check_invariants(&format!("after {token:?}"));
            fired.extend(actions);
        }

        self.env.advance_to(target);
        fired
    }

    /// Drop every pending game tick, as if the countdown had stalled.
    pub fn starve_ticks(&mut self) {
        self.timers.retain(|token| token.kind != TimerKind::GameTick);
    }

    /// Apply one random player step.
    ///
    /// # Errors
    ///
    /// Propagates `SessionError` from clicks.
    pub fn apply(&mut self, action: PlayerAction) -> Result<Vec<SessionAction>, SessionError> {
        match action {
            PlayerAction::Start => Ok(self.start()),
            PlayerAction::Stop => Ok(self.stop()),
            PlayerAction::ClickTower(tower) => self.click_tower(tower),
            PlayerAction::ClickDisc { size, tower, position } => {
                self.click_disc(size, tower, position)
            },
            PlayerAction::Press(key) => Ok(self.press(&key.to_string())),
            PlayerAction::Wait(duration) => Ok(self.advance(duration)),
        }
    }

    fn execute(&mut self, actions: &[SessionAction]) {
        for action in actions {
            match action {
                SessionAction::Render => self.renders += 1,
                SessionAction::Feedback(feedback) => self.feedback.push(*feedback),
                SessionAction::Schedule(request) => {
                    self.timers.push(self.env.now() + request.delay, request.token);
                },
                SessionAction::ReportOutcome(report) => {
                    tracing::debug!(?report, epoch = %self.session.epoch(), "sim report");
                    self.reports.push((self.session.epoch(), *report));
                },
            }
        }
    }

    /// Check invariants against the current state, panicking on violation.
    pub fn check_invariants(&self, context: &str) {
        if let Some(ref registry) = self.invariants {
            registry.assert_all(&self.snapshot(), context);
        }
    }

    /// Observable state for invariant checks.
    pub fn snapshot(&self) -> SystemSnapshot {
        SystemSnapshot::from_session(&self.session, &self.reports)
    }

    /// The session under test.
    pub fn session(&self) -> &Session {
        &self.session
    }

    /// Virtual clock.
    pub fn env(&self) -> &SimEnv {
        &self.env
    }

    /// Reports delivered to the host so far.
    pub fn reports(&self) -> Vec<OutcomeReport> {
        self.reports.iter().map(|(_, report)| *report).collect()
    }

    /// Move feedback delivered to the renderer so far.
    pub fn feedback(&self) -> &[MoveFeedback] {
        &self.feedback
    }

    /// Number of render requests so far.
    pub fn renders(&self) -> usize {
        self.renders
    }

    /// Pending deferred callbacks, including stale ones.
    pub fn pending_timers(&self) -> usize {
        self.timers.len()
    }

    /// True if a callback of `kind` is pending for the current session.
    pub fn has_pending(&self, kind: TimerKind) -> bool {
        let epoch = self.session.epoch();
        self.timers.tokens().any(|token| token.kind == kind && token.epoch == epoch)
    }
}
