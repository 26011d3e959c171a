//! Renderer that records instead of drawing.
//!
//! Hit-testing uses a fixed strip layout: three 100 px wide columns starting
//! at x = 0, each resolving to a tower click. Disc clicks are exercised
//! through [`crate::SimDriver`] instead.

use std::sync::{Arc, Mutex};

use hanoi_app::{ClickTarget, MoveFeedback, RenderSnapshot, Renderer};
use hanoi_core::TOWER_COUNT;

const COLUMN_WIDTH: f64 = 100.0;

/// Error returned by a renderer configured to fail.
#[derive(Debug, Clone)]
pub struct SimRenderError;

impl std::fmt::Display for SimRenderError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "SimRenderError: render failed")
    }
}

impl std::error::Error for SimRenderError {}

/// Everything a [`RecordingRenderer`] has been asked to show.
#[derive(Debug, Clone, Default)]
pub struct RenderLog {
    /// Every snapshot rendered, in order.
    pub snapshots: Vec<RenderSnapshot>,
    /// Every feedback flash, in order.
    pub feedback: Vec<MoveFeedback>,
    /// Last cursor position.
    pub cursor: Option<(f64, f64)>,
}

/// Recording renderer for runtime tests.
///
/// Clones share the log, so a test can keep a handle after moving the
/// renderer into a runtime.
#[derive(Debug, Clone, Default)]
pub struct RecordingRenderer {
    log: Arc<Mutex<RenderLog>>,
    fail: bool,
}

impl RecordingRenderer {
    /// Create a renderer that records every call.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a renderer whose `render` always fails.
    pub fn failing() -> Self {
        Self { fail: true, ..Self::default() }
    }

    /// Copy of the log so far.
    pub fn log(&self) -> RenderLog {
        self.with_log(|log| log.clone())
    }

    /// Most recent snapshot.
    pub fn last(&self) -> Option<RenderSnapshot> {
        self.with_log(|log| log.snapshots.last().cloned())
    }

    fn with_log<T>(&self, f: impl FnOnce(&mut RenderLog) -> T) -> T {
        let mut log = self.log.lock().unwrap_or_else(std::sync::PoisonError::into_inner);
        f(&mut log)
    }
}

impl Renderer for RecordingRenderer {
    type Error = SimRenderError;

    fn render(&mut self, snapshot: &RenderSnapshot) -> Result<(), Self::Error> {
        if self.fail {
            return Err(SimRenderError);
        }
        self.with_log(|log| log.snapshots.push(snapshot.clone()));
        Ok(())
    }

    fn feedback(&mut self, feedback: MoveFeedback) {
        self.with_log(|log| log.feedback.push(feedback));
    }

    fn move_cursor(&mut self, x: f64, y: f64) {
        self.with_log(|log| log.cursor = Some((x, y)));
    }

    fn hit_test(&self, x: f64, _y: f64) -> Option<ClickTarget> {
        if !(0.0..COLUMN_WIDTH * TOWER_COUNT as f64).contains(&x) {
            return None;
        }
        Some(ClickTarget::Tower { tower: (x / COLUMN_WIDTH) as usize })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn columns_map_to_towers() {
        let renderer = RecordingRenderer::new();
        assert_eq!(renderer.hit_test(50.0, 0.0), Some(ClickTarget::Tower { tower: 0 }));
        assert_eq!(renderer.hit_test(150.0, 0.0), Some(ClickTarget::Tower { tower: 1 }));
        assert_eq!(renderer.hit_test(299.0, 0.0), Some(ClickTarget::Tower { tower: 2 }));
        assert_eq!(renderer.hit_test(300.0, 0.0), None);
        assert_eq!(renderer.hit_test(-1.0, 0.0), None);
    }
}
