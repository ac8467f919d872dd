use crate::board::{Board, Color};
use crate::path::is_path_clear;
use crate::square::{Move, Square};

/// Whether a move may end on a piece of the mover's own color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CapturePolicy {
    /// Any occupant may be captured, own pieces included.
    #[default]
    Permissive,
    /// Only opponent pieces may be captured.
    OpponentOnly,
}

/// The only check on the destination occupant's color; the movement rules
/// below never look at it.
pub fn capture_allowed(policy: CapturePolicy, color: Color, board: &Board, to: Square) -> bool {
    match policy {
        CapturePolicy::Permissive => true,
        CapturePolicy::OpponentOnly => match board.occupant_at(to) {
            Some(occupant) => occupant.color != color,
            None => true,
        },
    }
}

/// Pushes one square forward, two from the start row, and captures one
/// square diagonally forward.
///
/// The square skipped by the two-square advance is not required to be empty.
pub fn is_valid_pawn_move(mv: &Move, color: Color, board: &Board) -> bool {
    let (direction, start_row) = match color {
        Color::White => (-1, 6),
        Color::Black => (1, 1),
    };
    let (drow, dcol) = mv.delta();

    if dcol == 0 {
        if board.is_occupied(mv.to) {
            return false;
        }
        if drow == direction {
            return true;
        }
        if i32::from(mv.from.row) == start_row && drow == 2 * direction {
            return true;
        }
    }

    if dcol.abs() == 1 && drow == direction {
        return board.is_occupied(mv.to);
    }

    false
}

pub fn is_valid_rook_move(mv: &Move, _color: Color, board: &Board) -> bool {
    if mv.from.row != mv.to.row && mv.from.col != mv.to.col {
        return false;
    }
    is_path_clear(board, mv.from, mv.to)
}

/// Knights jump; nothing between the squares matters.
pub fn is_valid_knight_move(mv: &Move, _color: Color, _board: &Board) -> bool {
    let (drow, dcol) = mv.delta();
    matches!((drow.abs(), dcol.abs()), (2, 1) | (1, 2))
}

pub fn is_valid_bishop_move(mv: &Move, _color: Color, board: &Board) -> bool {
    let (drow, dcol) = mv.delta();
    if drow == 0 || drow.abs() != dcol.abs() {
        return false;
    }
    is_path_clear(board, mv.from, mv.to)
}

pub fn is_valid_queen_move(mv: &Move, color: Color, board: &Board) -> bool {
    is_valid_rook_move(mv, color, board) || is_valid_bishop_move(mv, color, board)
}

/// One square in any direction. Staying put is accepted.
pub fn is_valid_king_move(mv: &Move, _color: Color, _board: &Board) -> bool {
    let (drow, dcol) = mv.delta();
    drow.abs() <= 1 && dcol.abs() <= 1
}
