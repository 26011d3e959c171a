//! Tower and disc model.
//!
//! Three towers, four discs of distinct sizes. A tower is a stack where index
//! 0 is the bottom. Every tower is strictly decreasing from bottom to top, and
//! across all towers the discs are exactly `{1, 2, 3, 4}`: discs are only ever
//! moved, never created or destroyed.
//!
//! ```text
//!    tower 0      tower 1      tower 2
//!      [1]
//!     [ 2 ]
//!    [  3  ]
//!   [   4   ]
//!   ─────────    ─────────    ─────────
//!    source      auxiliary      target
//! ```

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::PuzzleError;

/// Number of towers on the board.
pub const TOWER_COUNT: usize = 3;

/// Number of discs in play.
pub const DISC_COUNT: usize = 4;

/// A sized puzzle piece. Sizes are unique within the puzzle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct Disc(u8);

impl Disc {
    /// Create a disc of the given size.
    ///
    /// # Errors
    ///
    /// - `PuzzleError::InvalidDisc` if `size` is not in `1..=4`
    pub fn new(size: u8) -> Result<Self, PuzzleError> {
        if (1..=DISC_COUNT as u8).contains(&size) {
            Ok(Self(size))
        } else {
            Err(PuzzleError::InvalidDisc { size })
        }
    }

    /// Disc size (1 is the smallest).
    #[must_use]
    pub const fn size(self) -> u8 {
        self.0
    }

    /// All discs, largest first (the order they are stacked at reset).
    pub fn all() -> impl Iterator<Item = Self> {
        (1..=DISC_COUNT as u8).rev().map(Self)
    }
}

impl TryFrom<u8> for Disc {
    type Error = PuzzleError;

    fn try_from(size: u8) -> Result<Self, Self::Error> {
        Self::new(size)
    }
}

impl From<Disc> for u8 {
    fn from(disc: Disc) -> Self {
        disc.0
    }
}

impl fmt::Display for Disc {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "disc {}", self.0)
    }
}

/// Validated tower index in `0..3`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "usize", into = "usize")]
pub struct TowerId(u8);

impl TowerId {
    /// Tower holding every disc at reset.
    pub const SOURCE: Self = Self(0);
    /// Middle tower.
    pub const AUXILIARY: Self = Self(1);
    /// Tower that must hold every disc to win.
    pub const TARGET: Self = Self(2);

    /// Validate a raw tower index.
    ///
    /// # Errors
    ///
    /// - `PuzzleError::OutOfRange` if `index` is not 0, 1 or 2
    pub fn new(index: usize) -> Result<Self, PuzzleError> {
        if index < TOWER_COUNT {
            Ok(Self(index as u8))
        } else {
            Err(PuzzleError::OutOfRange { index })
        }
    }

    /// Raw index of this tower.
    #[must_use]
    pub const fn index(self) -> usize {
        self.0 as usize
    }

    /// All towers in index order.
    #[must_use]
    pub const fn all() -> [Self; TOWER_COUNT] {
        [Self::SOURCE, Self::AUXILIARY, Self::TARGET]
    }
}

impl TryFrom<usize> for TowerId {
    type Error = PuzzleError;

    fn try_from(index: usize) -> Result<Self, Self::Error> {
        Self::new(index)
    }
}

impl From<TowerId> for usize {
    fn from(tower: TowerId) -> Self {
        tower.index()
    }
}

impl fmt::Display for TowerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "tower {}", self.0)
    }
}

/// A stack of discs, index 0 at the bottom.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Tower {
    discs: Vec<Disc>,
}

impl Tower {
    /// Discs from bottom to top.
    pub fn discs(&self) -> &[Disc] {
        &self.discs
    }

    /// Topmost disc. `None` if empty.
    pub fn top(&self) -> Option<Disc> {
        self.discs.last().copied()
    }

    /// Position of the topmost disc. `None` if empty.
    pub fn top_index(&self) -> Option<usize> {
        self.discs.len().checked_sub(1)
    }

    /// Number of discs on this tower.
    pub fn len(&self) -> usize {
        self.discs.len()
    }

    /// True if the tower holds no discs.
    pub fn is_empty(&self) -> bool {
        self.discs.is_empty()
    }

    /// Disc sizes from bottom to top.
    pub fn sizes(&self) -> Vec<u8> {
        self.discs.iter().map(|d| d.size()).collect()
    }

    fn is_strictly_decreasing(&self) -> bool {
        self.discs.windows(2).all(|w| w[0] > w[1])
    }
}

/// The three towers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Puzzle {
    towers: [Tower; TOWER_COUNT],
}

impl Default for Puzzle {
    fn default() -> Self {
        Self::new()
    }
}

impl Puzzle {
    /// Create a puzzle in the start configuration.
    pub fn new() -> Self {
        let mut puzzle = Self { towers: Default::default() };
        puzzle.reset();
        puzzle
    }

    /// Arrange an arbitrary layout from raw sizes (bottom to top).
    ///
    /// Layouts need not hold every disc, which lets tests set up positions
    /// such as `[[4], [], [2]]`. Sizes must be valid, unique, and strictly
    /// decreasing on each tower.
    ///
    /// # Errors
    ///
    /// - `PuzzleError::InvalidDisc` if a size is not in `1..=4`
    /// - `PuzzleError::InvariantViolation` on duplicates or bad ordering
    pub fn from_towers(layout: [&[u8]; TOWER_COUNT]) -> Result<Self, PuzzleError> {
        let mut towers: [Tower; TOWER_COUNT] = Default::default();
        let mut seen = [false; DISC_COUNT];

        for (tower, sizes) in towers.iter_mut().zip(layout) {
            for &size in sizes {
                let disc = Disc::new(size)?;
                let slot = &mut seen[usize::from(size) - 1];
                if *slot {
                    return Err(PuzzleError::InvariantViolation(format!("{disc} appears twice")));
                }
                *slot = true;
                tower.discs.push(disc);
            }
        }

        let puzzle = Self { towers };
        puzzle.check_ordering()?;
        Ok(puzzle)
    }

    /// Put every disc back on the source tower.
    pub fn reset(&mut self) {
        for tower in &mut self.towers {
            tower.discs.clear();
        }
        self.towers[TowerId::SOURCE.index()].discs.extend(Disc::all());
    }

    /// All towers in index order.
    pub fn towers(&self) -> &[Tower; TOWER_COUNT] {
        &self.towers
    }

    /// The given tower.
    pub fn tower(&self, tower: TowerId) -> &Tower {
        &self.towers[tower.index()]
    }

    /// Topmost disc on a tower. `None` if empty.
    pub fn top(&self, tower: TowerId) -> Option<Disc> {
        self.tower(tower).top()
    }

    /// Topmost disc on the tower at a raw index.
    ///
    /// # Errors
    ///
    /// - `PuzzleError::OutOfRange` if `index` is not 0, 1 or 2
    pub fn top_of(&self, index: usize) -> Result<Option<Disc>, PuzzleError> {
        Ok(self.top(TowerId::new(index)?))
    }

    /// True iff the source is non-empty and its top may rest on the target.
    ///
    /// A disc may rest on an empty tower or on a strictly larger disc. Moving
    /// onto the same tower is never legal.
    pub fn is_legal_move(&self, from: TowerId, to: TowerId) -> bool {
        match (self.top(from), self.top(to)) {
            (None, _) => false,
            (Some(_), None) => true,
            (Some(moving), Some(resting)) => resting > moving,
        }
    }

    /// True iff the target tower holds every disc.
    pub fn is_solved(&self) -> bool {
        self.tower(TowerId::TARGET).len() == DISC_COUNT
    }

    /// Percentage of discs on the target tower (0, 25, 50, 75 or 100).
    pub fn progress(&self) -> u8 {
        (self.tower(TowerId::TARGET).len() * 100 / DISC_COUNT) as u8
    }

    /// Disc sizes per tower, bottom to top.
    pub fn sizes(&self) -> [Vec<u8>; TOWER_COUNT] {
        self.towers.each_ref().map(Tower::sizes)
    }

    /// Verify conservation (exactly one of each disc) and ordering.
    ///
    /// # Errors
    ///
    /// - `PuzzleError::InvariantViolation` describing the first broken rule
    pub fn check_invariants(&self) -> Result<(), PuzzleError> {
        let mut all: Vec<u8> = self.towers.iter().flat_map(Tower::sizes).collect();
        all.sort_unstable();
        let expected: Vec<u8> = (1..=DISC_COUNT as u8).collect();
        if all != expected {
            return Err(PuzzleError::InvariantViolation(format!(
                "discs {all:?} do not match {expected:?}"
            )));
        }
        self.check_ordering()
    }

    fn check_ordering(&self) -> Result<(), PuzzleError> {
        for (index, tower) in self.towers.iter().enumerate() {
            if !tower.is_strictly_decreasing() {
                return Err(PuzzleError::InvariantViolation(format!(
                    "tower {index} is not strictly decreasing: {:?}",
                    tower.sizes()
                )));
            }
        }
        Ok(())
    }

    /// Move the top disc of `from` onto `to`.
    ///
    /// Returns the moved disc, or `None` (leaving the puzzle untouched) if the
    /// move is not legal.
    pub(crate) fn relocate(&mut self, from: TowerId, to: TowerId) -> Option<Disc> {
        if !self.is_legal_move(from, to) {
            return None;
        }
        let disc = self.towers[from.index()].discs.pop()?;
        self.towers[to.index()].discs.push(disc);
        debug_assert!(self.check_ordering().is_ok());
        Some(disc)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tower(index: usize) -> TowerId {
        TowerId::new(index).expect("valid tower")
    }

    #[test]
    fn reset_stacks_everything_on_source() {
        let puzzle = Puzzle::new();
        assert_eq!(puzzle.sizes(), [vec![4, 3, 2, 1], vec![], vec![]]);
        assert!(puzzle.check_invariants().is_ok());
    }

    #[test]
    fn top_of_rejects_out_of_range() {
        let puzzle = Puzzle::new();
        assert_eq!(puzzle.top_of(0), Ok(Disc::new(1).ok()));
        assert_eq!(puzzle.top_of(1), Ok(None));
        assert_eq!(puzzle.top_of(3), Err(PuzzleError::OutOfRange { index: 3 }));
    }

    #[test]
    fn disc_rejects_sizes_outside_domain() {
        assert_eq!(Disc::new(0), Err(PuzzleError::InvalidDisc { size: 0 }));
        assert_eq!(Disc::new(5), Err(PuzzleError::InvalidDisc { size: 5 }));
        assert_eq!(Disc::new(4).map(Disc::size), Ok(4));
    }

    #[test]
    fn legal_move_requires_larger_target() {
        let puzzle = Puzzle::from_towers([&[4, 1], &[2], &[]]).expect("layout");

        assert!(puzzle.is_legal_move(tower(0), tower(1)));
        assert!(puzzle.is_legal_move(tower(0), tower(2)));
        assert!(!puzzle.is_legal_move(tower(1), tower(0)));
        assert!(!puzzle.is_legal_move(tower(2), tower(0)));
        assert!(!puzzle.is_legal_move(tower(0), tower(0)));
    }

    #[test]
    fn from_towers_rejects_bad_layouts() {
        assert!(matches!(
            Puzzle::from_towers([&[1, 2], &[], &[]]),
            Err(PuzzleError::InvariantViolation(_))
        ));
        assert!(matches!(
            Puzzle::from_towers([&[3], &[3], &[]]),
            Err(PuzzleError::InvariantViolation(_))
        ));
        assert_eq!(
            Puzzle::from_towers([&[9], &[], &[]]),
            Err(PuzzleError::InvalidDisc { size: 9 })
        );
    }

    #[test]
    fn solved_only_with_full_target() {
        let solved = Puzzle::from_towers([&[], &[], &[4, 3, 2, 1]]).expect("layout");
        assert!(solved.is_solved());
        assert_eq!(solved.progress(), 100);

        let partial = Puzzle::from_towers([&[1], &[], &[4, 3, 2]]).expect("layout");
        assert!(!partial.is_solved());
        assert_eq!(partial.progress(), 75);
    }

    #[test]
    fn relocate_refuses_illegal_moves() {
        let mut puzzle = Puzzle::from_towers([&[4], &[], &[2]]).expect("layout");
        assert_eq!(puzzle.relocate(tower(0), tower(2)), None);
        assert_eq!(puzzle.sizes(), [vec![4], vec![], vec![2]]);

        assert_eq!(puzzle.relocate(tower(2), tower(0)), Disc::new(2).ok());
        assert_eq!(puzzle.sizes(), [vec![4, 2], vec![], vec![]]);
    }

    #[test]
    fn partial_layout_fails_conservation() {
        let puzzle = Puzzle::from_towers([&[4, 3], &[], &[]]).expect("layout");
        assert!(puzzle.check_invariants().is_err());
    }
}
