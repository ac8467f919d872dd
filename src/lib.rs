pub mod board;
pub mod console;
pub mod error;
pub mod path;
pub mod rules;
pub mod square;
pub mod validator;

pub use board::{initial_board, Board, Color, Piece, PieceId};
pub use error::ChessError;
pub use rules::CapturePolicy;
pub use square::{all_squares, from_notation, is_on_board, to_notation, Move, Square};
pub use validator::{is_valid_move, MoveValidator};
