//! Run detection for k-in-a-row games

use super::{Board, Cell, GameOutcome};

/// Forward scan directions per cell: east, south, south-east, south-west.
///
/// Scanning only forward from each cell visits every line exactly once.
const DIRECTIONS: [(isize, isize); 4] = [(0, 1), (1, 0), (1, 1), (1, -1)];

/// Evaluate a board for a run of `run_length` identical marks.
///
/// Cells are visited in row-major order and the four forward directions are
/// checked in the fixed order above; the first completed run decides the
/// reported winner in (degenerate) positions where both players hold one.
/// Returns [`GameOutcome::Draw`] when the board is full with no run, and
/// [`GameOutcome::Ongoing`] otherwise. A `run_length` larger than the board
/// side can never be satisfied, so such boards only ever evaluate to
/// `Ongoing` or `Draw`.
pub fn outcome(board: &Board, run_length: usize) -> GameOutcome {
    for pos in 0..board.cell_count() {
        let cell = board.get(pos);
        if cell == Cell::Empty {
            continue;
        }
        let (row, col) = board.coords(pos);
        for &(dr, dc) in &DIRECTIONS {
            if run_at(board, row, col, dr, dc, run_length) {
                // cell is non-empty, so the player conversion cannot fail
                if let Some(player) = cell.to_player() {
                    return GameOutcome::Win(player);
                }
            }
        }
    }

    if board.is_full() {
        GameOutcome::Draw
    } else {
        GameOutcome::Ongoing
    }
}

/// Whether the board's geometry admits a run of `run_length` at all.
///
/// A side shorter than the run length can never produce a win, so callers
/// can skip any search for one.
pub fn run_possible(board: &Board, run_length: usize) -> bool {
    run_length <= board.side()
}

fn run_at(
    board: &Board,
    row: usize,
    col: usize,
    dr: isize,
    dc: isize,
    run_length: usize,
) -> bool {
    let side = board.side() as isize;
    let target = board.get(board.index(row, col));

    for step in 0..run_length as isize {
        let r = row as isize + dr * step;
        let c = col as isize + dc * step;
        if r < 0 || r >= side || c < 0 || c >= side {
            return false;
        }
        if board.get(board.index(r as usize, c as usize)) != target {
            return false;
        }
    }
    true
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::Player;

    fn board_from(side: usize, marks: &[(usize, Player)]) -> Board {
        let mut board = Board::new(side);
        for &(pos, player) in marks {
            board.apply(pos, player).unwrap();
        }
        board
    }

    #[test]
    fn test_empty_board_ongoing() {
        assert_eq!(outcome(&Board::new(3), 3), GameOutcome::Ongoing);
    }

    #[test]
    fn test_horizontal_win_3x3() {
        let board = board_from(3, &[(0, Player::X), (1, Player::X), (2, Player::X)]);
        assert_eq!(outcome(&board, 3), GameOutcome::Win(Player::X));
    }

    #[test]
    fn test_vertical_win_3x3() {
        let board = board_from(3, &[(1, Player::O), (4, Player::O), (7, Player::O)]);
        assert_eq!(outcome(&board, 3), GameOutcome::Win(Player::O));
    }

    #[test]
    fn test_diagonal_win_3x3() {
        let board = board_from(3, &[(0, Player::X), (4, Player::X), (8, Player::X)]);
        assert_eq!(outcome(&board, 3), GameOutcome::Win(Player::X));
    }

    #[test]
    fn test_anti_diagonal_win_3x3() {
        let board = board_from(3, &[(2, Player::O), (4, Player::O), (6, Player::O)]);
        assert_eq!(outcome(&board, 3), GameOutcome::Win(Player::O));
    }

    #[test]
    fn test_top_row_win_5x5() {
        let marks: Vec<_> = (0..5).map(|pos| (pos, Player::X)).collect();
        let board = board_from(5, &marks);
        assert_eq!(outcome(&board, 5), GameOutcome::Win(Player::X));
    }

    #[test]
    fn test_anti_diagonal_win_5x5() {
        // (0,4) (1,3) (2,2) (3,1) (4,0)
        let marks: Vec<_> = [4, 8, 12, 16, 20].iter().map(|&p| (p, Player::O)).collect();
        let board = board_from(5, &marks);
        assert_eq!(outcome(&board, 5), GameOutcome::Win(Player::O));
    }

    #[test]
    fn test_four_in_a_row_is_not_five() {
        let marks: Vec<_> = (0..4).map(|pos| (pos, Player::X)).collect();
        let board = board_from(5, &marks);
        assert_eq!(outcome(&board, 5), GameOutcome::Ongoing);
    }

    #[test]
    fn test_run_longer_than_side_never_wins() {
        // A full 3x3 board of X cannot hold a run of 5.
        let mut board = Board::new(3);
        for pos in 0..9 {
            board.place(pos, Cell::X);
        }
        assert_eq!(outcome(&board, 5), GameOutcome::Draw);
        assert!(!run_possible(&board, 5));
    }

    #[test]
    fn test_full_board_without_run_is_draw() {
        // XOX / OOX / XXO: no three in a row anywhere
        let mut board = Board::new(3);
        let layout = [
            Cell::X,
            Cell::O,
            Cell::X,
            Cell::O,
            Cell::O,
            Cell::X,
            Cell::X,
            Cell::X,
            Cell::O,
        ];
        for (pos, &cell) in layout.iter().enumerate() {
            board.place(pos, cell);
        }
        assert_eq!(outcome(&board, 3), GameOutcome::Draw);
    }

    #[test]
    fn test_outcome_is_idempotent() {
        let board = board_from(3, &[(0, Player::X), (1, Player::X), (2, Player::X)]);
        assert_eq!(outcome(&board, 3), outcome(&board, 3));
    }
}
