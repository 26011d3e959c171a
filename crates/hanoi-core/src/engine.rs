//! Move engine: selection, validation and execution.
//!
//! The engine owns the [`Puzzle`], the current [`Selection`] and the move
//! counter. Every operation returns an optional [`MoveSignal`] describing what
//! happened; `None` means the input was silently ignored (for example a click
//! on an empty tower with nothing selected).
//!
//! Rejections are signals, not errors. A rejected move leaves the selection
//! in place so the player can pick another target.

use serde::Serialize;

use crate::puzzle::{Disc, Puzzle, TowerId};

/// The disc currently picked up by the player.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Selection {
    /// Picked-up disc.
    pub disc: Disc,
    /// Tower the disc sits on.
    pub tower: TowerId,
}

/// Outcome of an engine operation, consumed by the renderer for feedback.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveSignal {
    /// A disc was picked up.
    Selected(Selection),

    /// The selection was cleared without moving.
    Deselected,

    /// A disc was moved.
    ValidMove {
        /// Moved disc
        disc: Disc,
        /// Tower it left
        from: TowerId,
        /// Tower it now sits on
        to: TowerId,
    },

    /// A move or pick-up was rejected. Carries the tower that was clicked.
    InvalidMove(TowerId),
}

/// Selection and move bookkeeping on top of the puzzle rules.
#[derive(Debug, Clone, Default)]
pub struct MoveEngine {
    puzzle: Puzzle,
    selection: Option<Selection>,
    move_count: u32,
}

impl MoveEngine {
    /// Create an engine with a fresh puzzle.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an engine over an arranged puzzle.
    pub fn with_puzzle(puzzle: Puzzle) -> Self {
        Self { puzzle, selection: None, move_count: 0 }
    }

    /// Reset puzzle, selection and move count for a new session.
    pub fn reset(&mut self) {
        self.puzzle.reset();
        self.selection = None;
        self.move_count = 0;
    }

    /// Current puzzle.
    pub fn puzzle(&self) -> &Puzzle {
        &self.puzzle
    }

    /// Currently selected disc. `None` if nothing is picked up.
    pub fn selection(&self) -> Option<Selection> {
        self.selection
    }

    /// Number of successful moves since the last reset.
    pub fn move_count(&self) -> u32 {
        self.move_count
    }

    /// True iff every disc sits on the target tower.
    pub fn is_solved(&self) -> bool {
        self.puzzle.is_solved()
    }

    /// Drop the current selection, if any.
    pub fn clear_selection(&mut self) -> Option<MoveSignal> {
        self.selection.take().map(|_| MoveSignal::Deselected)
    }

    /// Pick up the top disc of `tower`.
    ///
    /// Ignored if something is already selected or the tower is empty.
    pub fn select_top_disc(&mut self, tower: TowerId) -> Option<MoveSignal> {
        if self.selection.is_some() {
            return None;
        }
        let disc = self.puzzle.top(tower)?;
        let selection = Selection { disc, tower };
        self.selection = Some(selection);
        Some(MoveSignal::Selected(selection))
    }

    /// Handle a click on a specific disc.
    ///
    /// Only the top disc of a tower responds; anything buried is rejected.
    /// Clicking the selected disc again deselects it. Clicking another top
    /// disc while holding one is a move request onto that disc's tower.
    pub fn select_disc(
        &mut self,
        disc: Disc,
        tower: TowerId,
        position: usize,
    ) -> Option<MoveSignal> {
        let on_tower = self.puzzle.tower(tower);
        let is_top = on_tower.top_index() == Some(position) && on_tower.top() == Some(disc);
        if !is_top {
            tracing::trace!(%disc, %tower, position, "rejected click on buried disc");
            return Some(MoveSignal::InvalidMove(tower));
        }

        match self.selection {
            None => {
                let selection = Selection { disc, tower };
                self.selection = Some(selection);
                Some(MoveSignal::Selected(selection))
            },
            Some(selected) if selected == (Selection { disc, tower }) => self.clear_selection(),
            Some(selected) => self.request_move(selected.tower, tower),
        }
    }

    /// Attempt to move the top disc of `from` onto `to`.
    ///
    /// Ignored if `from` is empty. Rejected with `InvalidMove(to)` if the
    /// move is illegal, in which case the selection survives.
    pub fn request_move(&mut self, from: TowerId, to: TowerId) -> Option<MoveSignal> {
        if self.puzzle.tower(from).is_empty() {
            return None;
        }

        let Some(disc) = self.puzzle.relocate(from, to) else {
            tracing::trace!(%from, %to, "rejected illegal move");
            return Some(MoveSignal::InvalidMove(to));
        };

        self.move_count += 1;
        self.selection = None;
        tracing::trace!(%disc, %from, %to, moves = self.move_count, "moved disc");
        Some(MoveSignal::ValidMove { disc, from, to })
    }

    /// Handle a click on a tower (not on a disc).
    ///
    /// With a selection this is a move request onto `tower`; without one it
    /// picks up the tower's top disc.
    pub fn click_tower(&mut self, tower: TowerId) -> Option<MoveSignal> {
        match self.selection {
            Some(selected) => self.request_move(selected.tower, tower),
            None => self.select_top_disc(tower),
        }
    }
}
