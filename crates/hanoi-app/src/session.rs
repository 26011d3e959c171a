//! Session state machine.
//!
//! This module defines [`Session`], the owned context for one minigame
//! overlay. It composes the move engine and the session timers and decides
//! every phase transition. It is a pure state machine: it consumes
//! [`crate::SessionEvent`]s and produces [`crate::SessionAction`]s.
//!
//! # State Machine
//!
//! ```text
//!            start              solved            reveal delay
//! ┌─────────┐─────>┌────────┐──────────>┌─────┐ ─ ─ ─ ─ ─ ─ ─ ─ ┐
//! │ Standby │      │ Active │           │ Won │   report, then    │
//! └─────────┘<─────└────────┘           └─────┘   display delay   │
//!      ^      stop      │ timer / watchdog                         │
//!      │                v                                          │
//!      │            ┌──────┐  report, then display delay           │
//!      └────────────│ Lost │<─ ─ ─ ─ ─ ─ ─ ─ ─ ─ ─ ─ ─ ─ ─ ─ ─ ─ ─ ┘
//!                   └──────┘
//! ```
//!
//! Both terminal phases return to standby on a timer. A start from any phase
//! begins a fresh session; a stop from any phase except standby aborts
//! without reporting. Every callback is tagged with the session epoch, so a
//! callback from an earlier session can never move the current one.

use hanoi_core::{
    Disc, Epoch, MoveEngine, MoveSignal, SessionTimers, TickOutcome, TimerKind, TimerToken,
    TowerId,
};

use crate::{
    ClickTarget, KeyInput, MoveFeedback, OutcomeReport, RenderSnapshot, Screen, SessionAction,
    SessionConfig, SessionError, SessionEvent, SessionPhase,
};

/// Session state machine.
///
/// Owns the puzzle, selection, stats and timers for the overlay. No I/O.
#[derive(Debug, Clone)]
pub struct Session {
    config: SessionConfig,
    phase: SessionPhase,
    engine: MoveEngine,
    timers: SessionTimers,
    /// Outcome of the finished session. `None` while standby or active.
    outcome: Option<OutcomeReport>,
    /// A win is shown on the board until its reveal timer fires.
    revealed: bool,
}

impl Session {
    /// Create a session context in standby.
    pub fn new(config: SessionConfig) -> Self {
        Self {
            config,
            phase: SessionPhase::Standby,
            engine: MoveEngine::new(),
            timers: SessionTimers::new(config.timers),
            outcome: None,
            revealed: false,
        }
    }

    /// Process an event and return actions.
    ///
    /// # Errors
    ///
    /// - `SessionError::Puzzle` if a click names a tower or disc that cannot
    ///   exist
    pub fn handle(&mut self, event: SessionEvent) -> Result<Vec<SessionAction>, SessionError> {
        match event {
            SessionEvent::Start => Ok(self.start()),
            SessionEvent::Stop => Ok(self.stop()),
            SessionEvent::Click(target) => self.click(target),
            SessionEvent::Key(key) => Ok(self.key(key)),
            SessionEvent::TimerFired(token) => Ok(self.timer_fired(token)),
        }
    }

    /// Begin a new session, abandoning any previous one.
    pub fn start(&mut self) -> Vec<SessionAction> {
        if self.phase != SessionPhase::Standby {
            tracing::debug!(
                phase = ?self.phase,
                epoch = %self.timers.epoch(),
                "restarting session"
            );
        }

        self.engine.reset();
        self.outcome = None;
        self.revealed = false;
        self.phase = SessionPhase::Active;

        let requests = self.timers.arm();
        tracing::info!(epoch = %self.timers.epoch(), "session started");

        let mut actions = vec![SessionAction::Render];
        actions.extend(requests.map(SessionAction::Schedule));
        actions
    }

    /// Abort the session without reporting.
    pub fn stop(&mut self) -> Vec<SessionAction> {
        if self.phase == SessionPhase::Standby {
            tracing::debug!("stop ignored in standby");
            return vec![];
        }

        self.timers.cancel_all();
        self.engine.clear_selection();
        self.outcome = None;
        self.phase = SessionPhase::Standby;
        tracing::info!(epoch = %self.timers.epoch(), "session stopped by host");

        vec![SessionAction::Render]
    }

    /// Handle a click resolved by the renderer.
    ///
    /// # Errors
    ///
    /// - `SessionError::Puzzle` if the target has an out-of-range tower index
    ///   or disc size
    pub fn click(&mut self, target: ClickTarget) -> Result<Vec<SessionAction>, SessionError> {
        // Validate before the phase guard so a bad index is reported even when idle.
        let signal = match target {
            ClickTarget::Tower { tower } => {
                let tower = TowerId::new(tower)?;
                if !self.phase.accepts_input() {
                    return Ok(vec![]);
                }
                self.engine.click_tower(tower)
            },
            ClickTarget::Disc { size, tower, position } => {
                let tower = TowerId::new(tower)?;
                let disc = Disc::new(size)?;
                if !self.phase.accepts_input() {
                    return Ok(vec![]);
                }
                self.engine.select_disc(disc, tower, position)
            },
        };

        Ok(self.apply_signal(signal))
    }

    /// Handle a key press. Digits `1`-`3` click the matching tower.
    pub fn key(&mut self, key: KeyInput) -> Vec<SessionAction> {
        if !self.phase.accepts_input() {
            return vec![];
        }
        let Some(tower) = key.tower_shortcut() else {
            return vec![];
        };
        let signal = self.engine.click_tower(tower);
        self.apply_signal(signal)
    }

    /// Handle an elapsed timer.
    pub fn timer_fired(&mut self, token: TimerToken) -> Vec<SessionAction> {
        if !self.timers.is_current(token) {
            tracing::trace!(?token, epoch = %self.timers.epoch(), "dropping stale timer");
            return vec![];
        }

        match token.kind {
            TimerKind::GameTick => self.game_tick(token),
            TimerKind::Watchdog => self.watchdog(token),
            TimerKind::RevealOutcome => self.reveal(),
            TimerKind::ReturnToStandby => self.return_to_standby(),
        }
    }

    fn apply_signal(&mut self, signal: Option<MoveSignal>) -> Vec<SessionAction> {
        match signal {
            None => vec![],
            Some(MoveSignal::Selected(_) | MoveSignal::Deselected) => vec![SessionAction::Render],
            Some(MoveSignal::InvalidMove(tower)) => {
                vec![SessionAction::Feedback(MoveFeedback::InvalidMove(tower))]
            },
            Some(MoveSignal::ValidMove { to, .. }) => {
                let mut actions = vec![
                    SessionAction::Render,
                    SessionAction::Feedback(MoveFeedback::ValidMove(to)),
                ];
                if self.engine.is_solved() {
                    actions.extend(self.win());
                }
                actions
            },
        }
    }

    fn game_tick(&mut self, token: TimerToken) -> Vec<SessionAction> {
        if self.phase != SessionPhase::Active {
            return vec![];
        }
        match self.timers.tick(token) {
            TickOutcome::Running { next, .. } => {
                vec![SessionAction::Render, SessionAction::Schedule(next)]
            },
            TickOutcome::Expired => {
                tracing::info!(epoch = %self.timers.epoch(), "game timer expired");
                self.lose(self.timers.elapsed())
            },
            TickOutcome::Ignored => vec![],
        }
    }

    fn watchdog(&mut self, token: TimerToken) -> Vec<SessionAction> {
        if self.phase != SessionPhase::Active || !self.timers.watchdog_fired(token) {
            return vec![];
        }
        tracing::warn!(
            epoch = %self.timers.epoch(),
            remaining = self.timers.remaining(),
            "watchdog forced failure; game timer stalled"
        );
        self.lose(self.config.timers.budget_secs)
    }

    fn win(&mut self) -> Vec<SessionAction> {
        self.timers.disarm();
        self.engine.clear_selection();
        self.phase = SessionPhase::Won;
        self.revealed = false;

        let report = OutcomeReport {
            success: true,
            moves: self.engine.move_count(),
            time: self.timers.elapsed(),
        };
        self.outcome = Some(report);
        tracing::info!(moves = report.moves, time = report.time, "puzzle solved");

        vec![SessionAction::Schedule(
            self.timers.schedule(TimerKind::RevealOutcome, self.config.reveal_delay),
        )]
    }

    fn lose(&mut self, time: u32) -> Vec<SessionAction> {
        self.timers.disarm();
        self.engine.clear_selection();
        self.phase = SessionPhase::Lost;
        self.revealed = true;

        let report = OutcomeReport { success: false, moves: self.engine.move_count(), time };
        self.outcome = Some(report);

        vec![
            SessionAction::Render,
            SessionAction::ReportOutcome(report),
            SessionAction::Schedule(
                self.timers.schedule(TimerKind::ReturnToStandby, self.config.result_display),
            ),
        ]
    }

    fn reveal(&mut self) -> Vec<SessionAction> {
        let (SessionPhase::Won, Some(report)) = (self.phase, self.outcome) else {
            return vec![];
        };
        if self.revealed {
            return vec![];
        }
        self.revealed = true;

        vec![
            SessionAction::Render,
            SessionAction::ReportOutcome(report),
            SessionAction::Schedule(
                self.timers.schedule(TimerKind::ReturnToStandby, self.config.result_display),
            ),
        ]
    }

    fn return_to_standby(&mut self) -> Vec<SessionAction> {
        if !matches!(self.phase, SessionPhase::Won | SessionPhase::Lost) {
            return vec![];
        }
        tracing::debug!(epoch = %self.timers.epoch(), "returning to standby");
        self.phase = SessionPhase::Standby;
        vec![SessionAction::Render]
    }

    /// Snapshot for the renderer.
    pub fn snapshot(&self) -> RenderSnapshot {
        let puzzle = self.engine.puzzle();
        RenderSnapshot {
            towers: puzzle.sizes(),
            selection: self.engine.selection(),
            phase: self.phase,
            screen: self.screen(),
            move_count: self.engine.move_count(),
            time_remaining: self.timers.remaining(),
            progress: puzzle.progress(),
            epoch: self.timers.epoch(),
        }
    }

    /// Screen the renderer should show.
    pub fn screen(&self) -> Screen {
        match self.phase {
            SessionPhase::Standby => Screen::Standby,
            SessionPhase::Active => Screen::Hack,
            SessionPhase::Won if self.revealed => Screen::Success,
            SessionPhase::Won => Screen::Hack,
            SessionPhase::Lost => Screen::Failure,
        }
    }

    /// Current phase.
    pub fn phase(&self) -> SessionPhase {
        self.phase
    }

    /// Move engine (puzzle, selection, move count).
    pub fn engine(&self) -> &MoveEngine {
        &self.engine
    }

    /// Session timers.
    pub fn timers(&self) -> &SessionTimers {
        &self.timers
    }

    /// Current session generation.
    pub fn epoch(&self) -> Epoch {
        self.timers.epoch()
    }

    /// Outcome of the last finished session. `None` while standby or active,
    /// and after a stop.
    pub fn outcome(&self) -> Option<OutcomeReport> {
        self.outcome
    }

    /// Session configuration.
    pub fn config(&self) -> &SessionConfig {
        &self.config
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use hanoi_core::TimerRequest;

    use super::*;

    fn scheduled(actions: &[SessionAction]) -> Vec<TimerRequest> {
        actions
            .iter()
            .filter_map(|a| match a {
                SessionAction::Schedule(request) => Some(*request),
                _ => None,
            })
            .collect()
    }

    fn reports(actions: &[SessionAction]) -> Vec<OutcomeReport> {
        actions
            .iter()
            .filter_map(|a| match a {
                SessionAction::ReportOutcome(report) => Some(*report),
                _ => None,
            })
            .collect()
    }

    #[test]
    fn start_arms_both_timers() {
        let mut session = Session::new(SessionConfig::default());
        let actions = session.start();

        assert_eq!(session.phase(), SessionPhase::Active);
        assert_eq!(actions.first(), Some(&SessionAction::Render));

        let kinds: Vec<_> = scheduled(&actions).iter().map(|r| r.token.kind).collect();
        assert_eq!(kinds, vec![TimerKind::GameTick, TimerKind::Watchdog]);
        assert_eq!(scheduled(&actions)[1].delay, Duration::from_secs(65));
    }

    #[test]
    fn clicks_ignored_outside_active() {
        let mut session = Session::new(SessionConfig::default());
        let actions = session.click(ClickTarget::Tower { tower: 0 }).expect("valid target");

        assert!(actions.is_empty());
        assert_eq!(session.engine().selection(), None);
    }

    #[test]
    fn out_of_range_click_is_a_hard_error() {
        let mut session = Session::new(SessionConfig::default());
        session.start();

        let err = session.click(ClickTarget::Tower { tower: 3 });
        assert!(matches!(err, Err(SessionError::Puzzle(_))));
    }

    #[test]
    fn stop_in_standby_is_noop() {
        let mut session = Session::new(SessionConfig::default());
        let epoch = session.epoch();
        assert!(session.stop().is_empty());
        assert_eq!(session.epoch(), epoch);
    }

    #[test]
    fn watchdog_reports_full_budget() {
        let mut session = Session::new(SessionConfig::default());
        let actions = session.start();
        let watchdog = scheduled(&actions)[1];

        let actions = session.timer_fired(watchdog.token);

        assert_eq!(session.phase(), SessionPhase::Lost);
        assert_eq!(reports(&actions), vec![OutcomeReport { success: false, moves: 0, time: 60 }]);
    }

    #[test]
    fn won_session_shows_board_until_reveal() {
        let mut session = Session::new(SessionConfig::default());
        session.start();
        session.engine = MoveEngine::with_puzzle(
            hanoi_core::Puzzle::from_towers([&[], &[1], &[4, 3, 2]]).expect("layout"),
        );

        let actions = session.click(ClickTarget::Tower { tower: 1 }).expect("click");
        assert_eq!(actions, vec![SessionAction::Render]);
        let actions = session.click(ClickTarget::Tower { tower: 2 }).expect("click");

        assert_eq!(session.phase(), SessionPhase::Won);
        assert_eq!(session.screen(), Screen::Hack);
        assert!(reports(&actions).is_empty());

        let reveal = scheduled(&actions)[0];
        assert_eq!(reveal.token.kind, TimerKind::RevealOutcome);
        let actions = session.timer_fired(reveal.token);

        assert_eq!(session.screen(), Screen::Success);
        assert_eq!(reports(&actions), vec![OutcomeReport { success: true, moves: 1, time: 0 }]);
    }
}
