//! Generic runtime for session orchestration.
//!
//! The Runtime drives the overlay's event loop, coordinating between:
//! - [`Session`]: phase state machine
//! - [`HostBridge`]: host commands in, outcome reports out
//! - [`Renderer`]: snapshots, feedback and hit-testing
//!
//! One loop serializes host messages and due timers, so no callback ever
//! observes a half-applied transition.

use hanoi_core::{Environment, MAX_TIMER_DELAY};

use crate::{
    HostBridge, HostMessage, KeyInput, Renderer, RuntimeError, Session, SessionAction,
    SessionConfig, SessionEvent, TimerQueue,
};

/// Generic runtime that orchestrates Session, HostBridge and Renderer.
///
/// # Type Parameters
///
/// - `H`: Channel to the host
/// - `R`: Presentation collaborator
/// - `E`: Environment providing time and sleeping
pub struct Runtime<H, R, E>
where
    H: HostBridge,
    R: Renderer,
    E: Environment,
{
    host: H,
    renderer: R,
    env: E,
    session: Session,
    timers: TimerQueue<E::Instant>,
}

impl<H, R, E> Runtime<H, R, E>
where
    H: HostBridge,
    R: Renderer,
    E: Environment,
{
    /// Create a runtime with a session in standby.
    pub fn new(host: H, renderer: R, env: E, config: SessionConfig) -> Self {
        Self { host, renderer, env, session: Session::new(config), timers: TimerQueue::new() }
    }

    /// Run until the host goes away.
    ///
    /// Each cycle fires every timer that is due, then waits for either the
    /// next host message or the next deadline. Pending host messages are
    /// taken before a deadline that elapses at the same time.
    ///
    /// # Errors
    ///
    /// Returns `RuntimeError::Session` if the renderer resolves a click to a
    /// board element that cannot exist.
    pub async fn run(&mut self) -> Result<(), RuntimeError> {
        self.render();

        loop {
            self.fire_due()?;

            let message = match self.timers.next_due() {
                Some(due) => {
                    let wait = self.env.until(due);
                    tokio::select! {
                        biased;
                        message = self.host.next_message() => message,
                        () = self.env.sleep(wait) => continue,
                    }
                },
                None => self.host.next_message().await,
            };

            let Some(message) = message else {
                tracing::info!(epoch = %self.session.epoch(), "host bridge closed");
                return Ok(());
            };
            self.handle_message(message)?;
        }
    }

    fn fire_due(&mut self) -> Result<(), RuntimeError> {
        while let Some(token) = self.timers.pop_due(self.env.now()) {
            let actions = self.session.handle(SessionEvent::TimerFired(token))?;
            self.execute(actions);
        }
        Ok(())
    }

    fn handle_message(&mut self, message: HostMessage) -> Result<(), RuntimeError> {
        tracing::trace!(?message, "host message");

        let event = match message {
            HostMessage::StartHack => SessionEvent::Start,
            HostMessage::StopHack => SessionEvent::Stop,
            HostMessage::MouseMove { x, y } => {
                self.renderer.move_cursor(x, y);
                return Ok(());
            },
            HostMessage::Click { x, y } => {
                let Some(target) = self.renderer.hit_test(x, y) else {
                    tracing::trace!(x, y, "click missed the board");
                    return Ok(());
                };
                SessionEvent::Click(target)
            },
            HostMessage::KeyDown { key } => SessionEvent::Key(KeyInput::from_key(&key)),
            HostMessage::DebugState => {
                let snapshot = self.session.snapshot();
                tracing::info!(?snapshot, pending_timers = self.timers.len(), "debug state");
                return Ok(());
            },
        };

        let restarted = matches!(event, SessionEvent::Start | SessionEvent::Stop);
        let actions = self.session.handle(event)?;
        if restarted {
            let epoch = self.session.epoch();
            self.timers.retain(|token| token.epoch == epoch);
        }
        self.execute(actions);
        Ok(())
    }

    fn execute(&mut self, actions: Vec<SessionAction>) {
        for action in actions {
            match action {
                SessionAction::Render => self.render(),
                SessionAction::Feedback(feedback) => self.renderer.feedback(feedback),
                SessionAction::Schedule(request) => {
                    // Capped so an unvalidated config cannot overflow the instant.
                    let due = self.env.now() + request.delay.min(MAX_TIMER_DELAY);
                    self.timers.push(due, request.token);
                },
                SessionAction::ReportOutcome(report) => {
                    match self.host.report_outcome(report) {
                        Ok(()) => tracing::info!(
                            success = report.success,
                            moves = report.moves,
                            time = report.time,
                            "queued outcome report"
                        ),
                        Err(e) => tracing::warn!(error = %e, "failed to report outcome"),
                    }
                },
            }
        }
    }

    fn render(&mut self) {
        let snapshot = self.session.snapshot();
        if let Err(e) = self.renderer.render(&snapshot) {
            tracing::warn!(error = %e, "failed to render");
        }
    }

    /// Session state machine.
    pub fn session(&self) -> &Session {
        &self.session
    }

    /// Host bridge.
    pub fn host(&self) -> &H {
        &self.host
    }

    /// Take the host bridge back once the runtime is done.
    pub fn into_host(self) -> H {
        self.host
    }

    /// Renderer.
    pub fn renderer(&self) -> &R {
        &self.renderer
    }

    /// Number of pending deferred callbacks.
    pub fn pending_timers(&self) -> usize {
        self.timers.len()
    }
}
