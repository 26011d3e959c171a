//! Fixed-geometry board.
//!
//! The overlay draws three towers side by side on a shared base line. This
//! renderer owns that geometry so it can turn host click coordinates into
//! board targets. Drawing itself happens in the host's UI, so snapshots are
//! only logged here.
//!
//! ```text
//!  x: 0          200 220         420 440         640
//!     ┌───────────┐   ┌───────────┐   ┌───────────┐   y = 0
//!     │           │   │           │   │           │
//!     │   [ 1 ]   │   │           │   │           │
//!     │  [  2  ]  │   │           │   │           │
//!     │ [   3   ] │   │           │   │           │
//!     │[    4    ]│   │           │   │           │
//!     └───────────┘   └───────────┘   └───────────┘   y = 300
//! ```

use std::convert::Infallible;

use hanoi_app::{ClickTarget, MoveFeedback, RenderSnapshot, Renderer};
use hanoi_core::TOWER_COUNT;

/// Width of a tower column in pixels.
pub const TOWER_WIDTH: f64 = 200.0;

/// Horizontal distance between the left edges of neighbouring towers.
pub const TOWER_PITCH: f64 = 220.0;

/// Y coordinate of the board base line.
pub const BASE_Y: f64 = 300.0;

/// Disc height in pixels.
pub const DISC_HEIGHT: f64 = 20.0;

/// Vertical distance between stacked discs.
pub const DISC_PITCH: f64 = 22.0;

/// Gap between the base line and the bottom disc.
pub const BASE_GAP: f64 = 15.0;

/// Axis-aligned rectangle in screen pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    /// Left edge
    pub x: f64,
    /// Top edge
    pub y: f64,
    /// Width
    pub width: f64,
    /// Height
    pub height: f64,
}

impl Rect {
    /// True if the point lies inside (edges inclusive on the left/top).
    pub fn contains(&self, x: f64, y: f64) -> bool {
        x >= self.x && x < self.x + self.width && y >= self.y && y < self.y + self.height
    }
}

/// Column occupied by `tower`.
pub fn tower_rect(tower: usize) -> Rect {
    Rect { x: tower as f64 * TOWER_PITCH, y: 0.0, width: TOWER_WIDTH, height: BASE_Y }
}

/// Where a disc of `size` is drawn at stack `position` on `tower`.
pub fn disc_rect(size: u8, tower: usize, position: usize) -> Rect {
    let width = 40.0 + f64::from(size) * 30.0;
    let column = tower_rect(tower);
    let bottom = BASE_Y - BASE_GAP - position as f64 * DISC_PITCH;
    Rect {
        x: column.x + (TOWER_WIDTH - width) / 2.0,
        y: bottom - DISC_HEIGHT,
        width,
        height: DISC_HEIGHT,
    }
}

/// Renderer for the stdio host.
#[derive(Debug, Clone, Default)]
pub struct BoardRenderer {
    towers: [Vec<u8>; TOWER_COUNT],
    cursor: (f64, f64),
}

impl BoardRenderer {
    /// Create a renderer with an empty board. The first render fills it.
    pub fn new() -> Self {
        Self::default()
    }

    /// Last known cursor position.
    pub fn cursor(&self) -> (f64, f64) {
        self.cursor
    }
}

impl Renderer for BoardRenderer {
    type Error = Infallible;

    fn render(&mut self, snapshot: &RenderSnapshot) -> Result<(), Self::Error> {
        tracing::debug!(
            screen = ?snapshot.screen,
            towers = ?snapshot.towers,
            selection = ?snapshot.selection,
            moves = snapshot.move_count,
            remaining = snapshot.time_remaining,
            progress = snapshot.progress,
            "render"
        );
        self.towers.clone_from(&snapshot.towers);
        Ok(())
    }

    fn feedback(&mut self, feedback: MoveFeedback) {
        tracing::debug!(?feedback, "move feedback");
    }

    fn move_cursor(&mut self, x: f64, y: f64) {
        self.cursor = (x, y);
    }

    fn hit_test(&self, x: f64, y: f64) -> Option<ClickTarget> {
        let tower = (0..TOWER_COUNT).find(|&tower| tower_rect(tower).contains(x, y))?;

        let stack = &self.towers[tower];
        let disc = stack
            .iter()
            .enumerate()
            .rev()
            .find(|&(position, &size)| disc_rect(size, tower, position).contains(x, y));

        Some(match disc {
            Some((position, &size)) => ClickTarget::Disc { size, tower, position },
            None => ClickTarget::Tower { tower },
        })
    }
}

#[cfg(test)]
mod tests {
    use hanoi_app::{Session, SessionConfig};

    use super::*;

    fn fresh_board() -> BoardRenderer {
        let mut board = BoardRenderer::new();
        let session = Session::new(SessionConfig::default());
        assert!(board.render(&session.snapshot()).is_ok());
        board
    }

    #[test]
    fn disc_geometry() {
        assert_eq!(disc_rect(4, 0, 0), Rect { x: 20.0, y: 265.0, width: 160.0, height: 20.0 });
        assert_eq!(disc_rect(1, 2, 3), Rect { x: 505.0, y: 199.0, width: 70.0, height: 20.0 });
    }

    #[test]
    fn clicks_on_discs_resolve_to_discs() {
        let board = fresh_board();

        assert_eq!(
            board.hit_test(100.0, 270.0),
            Some(ClickTarget::Disc { size: 4, tower: 0, position: 0 })
        );
        assert_eq!(
            board.hit_test(100.0, 205.0),
            Some(ClickTarget::Disc { size: 1, tower: 0, position: 3 })
        );
    }

    #[test]
    fn clicks_beside_discs_resolve_to_towers() {
        let board = fresh_board();

        assert_eq!(board.hit_test(5.0, 270.0), Some(ClickTarget::Tower { tower: 0 }));
        assert_eq!(board.hit_test(100.0, 50.0), Some(ClickTarget::Tower { tower: 0 }));
        assert_eq!(board.hit_test(330.0, 270.0), Some(ClickTarget::Tower { tower: 1 }));
        assert_eq!(board.hit_test(639.0, 10.0), Some(ClickTarget::Tower { tower: 2 }));
    }

    #[test]
    fn gaps_and_margins_miss() {
        let board = fresh_board();

        assert_eq!(board.hit_test(210.0, 100.0), None);
        assert_eq!(board.hit_test(100.0, 300.0), None);
        assert_eq!(board.hit_test(700.0, 100.0), None);
        assert_eq!(board.hit_test(-1.0, 100.0), None);
    }
}
