//! Renderer contract.
//!
//! Drawing, animation and cursor styling belong to the renderer. The core
//! only hands it snapshots and transient feedback, and asks it which board
//! element sits under a click.

use crate::{ClickTarget, MoveFeedback, RenderSnapshot};

/// Presentation collaborator.
pub trait Renderer: Send {
    /// Platform-specific error type.
    type Error: std::error::Error + Send + 'static;

    /// Draw the given snapshot.
    ///
    /// # Errors
    ///
    /// Returns an error if drawing fails. The runtime logs it and carries on.
    fn render(&mut self, snapshot: &RenderSnapshot) -> Result<(), Self::Error>;

    /// Flash move feedback on a tower.
    fn feedback(&mut self, feedback: MoveFeedback);

    /// Move the cursor sprite.
    fn move_cursor(&mut self, x: f64, y: f64);

    /// Board element at screen coordinates. `None` if nothing clickable.
    fn hit_test(&self, x: f64, y: f64) -> Option<ClickTarget>;
}
