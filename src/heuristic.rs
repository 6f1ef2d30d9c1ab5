//! One-ply forced-move search layered over the learned policy

use crate::game::{Board, Cell, GameOutcome, Player, lines};

/// Deterministic win/block detection.
///
/// The search trial-places a mark on a scratch copy of the board, evaluates,
/// and undoes the placement, so hypothetical moves never leak into the real
/// game state.
pub struct HeuristicOverride;

impl HeuristicOverride {
    /// First move (row-major order) that immediately wins for `mover`.
    pub fn find_forced_move(board: &Board, mover: Player, run_length: usize) -> Option<usize> {
        if !lines::run_possible(board, run_length) {
            return None;
        }
        let mut scratch = board.clone();
        for pos in board.legal_moves() {
            scratch.place(pos, mover.to_cell());
            let wins = lines::outcome(&scratch, run_length) == GameOutcome::Win(mover);
            scratch.place(pos, Cell::Empty);
            if wins {
                return Some(pos);
            }
        }
        None
    }

    /// Winning move for `agent` if one exists, otherwise a block of the
    /// opponent's immediate win. Win-seeking always takes precedence.
    pub fn forced_move(board: &Board, agent: Player, run_length: usize) -> Option<usize> {
        Self::find_forced_move(board, agent, run_length)
            .or_else(|| Self::find_forced_move(board, agent.opponent(), run_length))
    }
}
