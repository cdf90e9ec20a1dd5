use crate::board::Board;
use crate::types::{Player, Position};

/// Single-ply greedy policy: the move flipping the most discs.
///
/// `moves` must be in row-major order; on equal flip counts the earliest
/// move wins. Returns `None` only when `moves` is empty.
pub fn best_flip_move(board: &Board, player: Player, moves: &[Position]) -> Option<Position> {
    let mut best: Option<(Position, u32)> = None;

    for &mv in moves {
        let flips = board.flip_count(mv, player);
        match best {
            Some((_, max_flips)) if flips <= max_flips => {}
            _ => best = Some((mv, flips)),
        }
    }

    best.map(|(mv, _)| mv)
}
