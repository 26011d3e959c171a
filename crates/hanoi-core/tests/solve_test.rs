//! Full solves through the move engine.

use hanoi_core::{MoveEngine, MoveSignal, Puzzle, TowerId};

/// Classic recursive solution for `discs` discs.
fn solution(
    discs: usize,
    from: TowerId,
    to: TowerId,
    via: TowerId,
    out: &mut Vec<(TowerId, TowerId)>,
) {
    if discs == 0 {
        return;
    }
    solution(discs - 1, from, via, to, out);
    out.push((from, to));
    solution(discs - 1, via, to, from, out);
}

#[test]
fn optimal_solve_takes_fifteen_moves() {
    let mut moves = Vec::new();
    solution(4, TowerId::SOURCE, TowerId::TARGET, TowerId::AUXILIARY, &mut moves);
    assert_eq!(moves.len(), 15);

    let mut engine = MoveEngine::new();
    for (step, (from, to)) in moves.iter().enumerate() {
        assert!(!engine.is_solved(), "solved early at step {step}");
        let signal = engine.request_move(*from, *to);
        assert!(matches!(signal, Some(MoveSignal::ValidMove { .. })), "step {step}: {signal:?}");
    }

    assert!(engine.is_solved());
    assert_eq!(engine.move_count(), 15);
    assert_eq!(engine.puzzle().sizes(), [vec![], vec![], vec![4, 3, 2, 1]]);
}

#[test]
fn solve_by_tower_clicks() {
    let mut moves = Vec::new();
    solution(4, TowerId::SOURCE, TowerId::TARGET, TowerId::AUXILIARY, &mut moves);

    let mut engine = MoveEngine::new();
    for (from, to) in moves {
        assert!(matches!(engine.click_tower(from), Some(MoveSignal::Selected(_))));
        assert!(matches!(engine.click_tower(to), Some(MoveSignal::ValidMove { .. })));
    }

    assert!(engine.is_solved());
}

#[test]
fn finishing_from_a_contrived_position() {
    let puzzle = Puzzle::from_towers([&[4, 3], &[], &[]]).expect("layout");
    let mut engine = MoveEngine::with_puzzle(puzzle);

    assert!(matches!(engine.click_tower(TowerId::SOURCE), Some(MoveSignal::Selected(_))));
    assert!(matches!(
        engine.request_move(TowerId::SOURCE, TowerId::AUXILIARY),
        Some(MoveSignal::ValidMove { .. })
    ));
    assert!(matches!(
        engine.request_move(TowerId::SOURCE, TowerId::TARGET),
        Some(MoveSignal::ValidMove { .. })
    ));
    assert!(matches!(
        engine.request_move(TowerId::AUXILIARY, TowerId::TARGET),
        Some(MoveSignal::ValidMove { .. })
    ));

    assert_eq!(engine.puzzle().sizes(), [vec![], vec![], vec![4, 3]]);
    assert_eq!(engine.move_count(), 3);
}
