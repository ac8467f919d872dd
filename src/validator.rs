use crate::board::{Board, Piece, PieceId};
use crate::rules::{
    capture_allowed, is_valid_bishop_move, is_valid_king_move, is_valid_knight_move,
    is_valid_pawn_move, is_valid_queen_move, is_valid_rook_move, CapturePolicy,
};
use crate::square::{all_squares, Move, Square};
use tracing::debug;

/// Checks candidate moves against a board snapshot.
#[derive(Debug, Clone, Copy, Default)]
pub struct MoveValidator {
    capture_policy: CapturePolicy,
}

impl MoveValidator {
    pub fn new() -> Self {
        Self {
            capture_policy: CapturePolicy::Permissive,
        }
    }

    pub fn with_capture_policy(mut self, policy: CapturePolicy) -> Self {
        self.capture_policy = policy;
        self
    }

    pub fn capture_policy(&self) -> CapturePolicy {
        self.capture_policy
    }

    pub fn is_valid(&self, mv: &Move, piece: PieceId, board: &Board) -> bool {
        if !mv.to.is_on_board() {
            debug!(%mv, %piece, "destination off the board");
            return false;
        }

        let color = piece.color;
        let geometric = match piece.piece {
            Piece::Pawn => is_valid_pawn_move(mv, color, board),
            Piece::Rook => is_valid_rook_move(mv, color, board),
            Piece::Knight => is_valid_knight_move(mv, color, board),
            Piece::Bishop => is_valid_bishop_move(mv, color, board),
            Piece::Queen => is_valid_queen_move(mv, color, board),
            Piece::King => is_valid_king_move(mv, color, board),
        };
        let legal = geometric && capture_allowed(self.capture_policy, color, board, mv.to);

        debug!(%mv, %piece, legal, "validated move");
        legal
    }

    /// Same as [`MoveValidator::is_valid`] for a `<kind>_<w|b>` key.
    /// Unknown keys are never valid.
    pub fn is_valid_keyed(&self, mv: &Move, key: &str, board: &Board) -> bool {
        match key.parse::<PieceId>() {
            Ok(piece) => self.is_valid(mv, piece, board),
            Err(err) => {
                debug!(%mv, %err, "rejecting move for unknown piece");
                false
            }
        }
    }

    /// Every square the piece on `from` may move to, row by row.
    pub fn legal_targets(&self, board: &Board, from: Square) -> Vec<Square> {
        let Some(piece) = board.occupant_at(from) else {
            return Vec::new();
        };
        all_squares()
            .filter(|&to| self.is_valid(&Move::new(from, to), piece, board))
            .collect()
    }
}

/// Validates `mv` for `piece` with the permissive capture policy.
pub fn is_valid_move(mv: &Move, piece: PieceId, board: &Board) -> bool {
    MoveValidator::new().is_valid(mv, piece, board)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::{initial_board, Color};

    fn sq(text: &str) -> Square {
        text.parse().unwrap()
    }

    #[test]
    fn test_off_board_destination_is_illegal_for_every_piece() {
        let board = Board::empty();
        let from = Square::new(4, 4);
        let destinations = [
            Square::new(-1, 4),
            Square::new(8, 4),
            Square::new(4, -1),
            Square::new(4, 8),
            Square::new(3, 8),
            Square::new(-2, 5),
        ];
        for piece in Piece::ALL {
            for color in [Color::White, Color::Black] {
                for to in destinations {
                    let mv = Move::new(from, to);
                    assert!(!is_valid_move(&mv, PieceId::new(piece, color), &board));
                }
            }
        }
    }

    #[test]
    fn test_source_is_not_bounds_checked() {
        let board = Board::empty();
        let mv = Move::new(Square::new(8, 4), Square::new(7, 4));
        assert!(is_valid_move(&mv, PieceId::white(Piece::King), &board));
        assert!(is_valid_move(&mv, PieceId::white(Piece::Rook), &board));
    }

    #[test]
    fn test_dispatch_routes_by_kind() {
        let board = Board::empty();
        let diagonal = Move::new(sq("c1"), sq("f4"));
        assert!(is_valid_move(&diagonal, PieceId::white(Piece::Bishop), &board));
        assert!(is_valid_move(&diagonal, PieceId::white(Piece::Queen), &board));
        assert!(!is_valid_move(&diagonal, PieceId::white(Piece::Rook), &board));
        assert!(!is_valid_move(&diagonal, PieceId::white(Piece::Knight), &board));
        assert!(!is_valid_move(&diagonal, PieceId::white(Piece::King), &board));
        assert!(!is_valid_move(&diagonal, PieceId::white(Piece::Pawn), &board));
    }

    #[test]
    fn test_keyed_validation() {
        let board = initial_board();
        let validator = MoveValidator::new();
        let mv = Move::new(sq("g1"), sq("f3"));
        assert!(validator.is_valid_keyed(&mv, "knight_w", &board));
        assert!(!validator.is_valid_keyed(&mv, "pawn_w", &board));
        assert!(!validator.is_valid_keyed(&mv, "archer_w", &board));
    }

    #[test]
    fn test_opponent_only_policy() {
        let board = initial_board();
        let onto_own = Move::new(sq("a1"), sq("a2"));
        let rook = PieceId::white(Piece::Rook);
        assert!(is_valid_move(&onto_own, rook, &board));

        let strict = MoveValidator::new().with_capture_policy(CapturePolicy::OpponentOnly);
        assert_eq!(strict.capture_policy(), CapturePolicy::OpponentOnly);
        assert!(!strict.is_valid(&onto_own, rook, &board));

        let capture = initial_board().with_piece(sq("d3"), PieceId::black(Piece::Knight));
        assert!(strict.is_valid(&Move::new(sq("e2"), sq("d3")), PieceId::white(Piece::Pawn), &capture));
    }

    #[test]
    fn test_legal_targets_from_start() {
        let board = initial_board();
        let validator = MoveValidator::new();

        let knight: Vec<String> = validator
            .legal_targets(&board, sq("b1"))
            .iter()
            .map(|s| s.to_string())
            .collect();
        // Row-major order: rank 3 before rank 2. d2 holds a friendly pawn.
        assert_eq!(knight, vec!["a3", "c3", "d2"]);

        let pawn = validator.legal_targets(&board, sq("e2"));
        assert_eq!(pawn, vec![sq("e4"), sq("e3")]);

        assert!(validator.legal_targets(&board, sq("e4")).is_empty());

        let strict = MoveValidator::new().with_capture_policy(CapturePolicy::OpponentOnly);
        assert_eq!(strict.legal_targets(&board, sq("b1")), vec![sq("a3"), sq("c3")]);
    }
}
