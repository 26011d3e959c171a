//! Seeded random player.
//!
//! Generates plausible input streams (mostly clicks, some keys, waits and
//! the occasional host start or stop) from a ChaCha seed, so a failing run
//! replays exactly from its seed.

use std::time::Duration;

use hanoi_app::Session;
use hanoi_core::TOWER_COUNT;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// One step of simulated player or host input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlayerAction {
    /// Host starts a session.
    Start,
    /// Host aborts the session.
    Stop,
    /// Click a tower background.
    ClickTower(usize),
    /// Click a disc as the renderer would report it.
    ClickDisc {
        /// Disc size
        size: u8,
        /// Tower index
        tower: usize,
        /// Stack position, 0 at the bottom
        position: usize,
    },
    /// Press a key.
    Press(char),
    /// Let virtual time pass.
    Wait(Duration),
}

/// Deterministic random input source.
#[derive(Debug, Clone)]
pub struct RandomPlayer {
    rng: ChaCha8Rng,
}

impl RandomPlayer {
    /// Create a player from a seed.
    pub fn new(seed: u64) -> Self {
        Self { rng: ChaCha8Rng::seed_from_u64(seed) }
    }

    /// Pick the next action given what is on the board.
    pub fn next_action(&mut self, session: &Session) -> PlayerAction {
        match self.rng.gen_range(0..100) {
            0..=1 => PlayerAction::Start,
            2 => PlayerAction::Stop,
            3..=39 => PlayerAction::ClickTower(self.rng.gen_range(0..TOWER_COUNT)),
            40..=74 => self.click_disc(session),
            75..=84 => PlayerAction::Press(['1', '2', '3', 'x'][self.rng.gen_range(0..4)]),
            _ => PlayerAction::Wait(Duration::from_millis(self.rng.gen_range(0..5_000))),
        }
    }

    fn click_disc(&mut self, session: &Session) -> PlayerAction {
        let tower = self.rng.gen_range(0..TOWER_COUNT);
        let sizes = session.engine().puzzle().sizes();
        let stack = &sizes[tower];
        if stack.is_empty() {
            return PlayerAction::ClickTower(tower);
        }
        let position = self.rng.gen_range(0..stack.len());
        PlayerAction::ClickDisc { size: stack[position], tower, position }
    }
}

#[cfg(test)]
mod tests {
    use hanoi_app::SessionConfig;

    use super::*;

    #[test]
    fn same_seed_same_actions() {
        let session = Session::new(SessionConfig::default());
        let mut a = RandomPlayer::new(7);
        let mut b = RandomPlayer::new(7);

        for _ in 0..100 {
            assert_eq!(a.next_action(&session), b.next_action(&session));
        }
    }

    #[test]
    fn disc_clicks_name_real_discs() {
        let session = Session::new(SessionConfig::default());
        let mut player = RandomPlayer::new(42);

        for _ in 0..200 {
            let action = player.next_action(&session);
            if let PlayerAction::ClickDisc { size, tower, position } = action {
                assert_eq!(session.engine().puzzle().sizes()[tower].get(position), Some(&size));
            }
        }
    }
}
