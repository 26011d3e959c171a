//! Reusable move sequences.

use hanoi_core::{DISC_COUNT, TowerId};

/// Minimal solution moving every disc from the source to the target tower.
///
/// Returns `2^n - 1` `(from, to)` pairs.
pub fn optimal_solution() -> Vec<(TowerId, TowerId)> {
    let mut moves = Vec::new();
    solve(DISC_COUNT, TowerId::SOURCE, TowerId::AUXILIARY, TowerId::TARGET, &mut moves);
    moves
}

fn solve(
    discs: usize,
    from: TowerId,
    via: TowerId,
    to: TowerId,
    moves: &mut Vec<(TowerId, TowerId)>,
) {
    if discs == 0 {
        return;
    }
    solve(discs - 1, from, to, via, moves);
    moves.push((from, to));
    solve(discs - 1, via, from, to, moves);
}
