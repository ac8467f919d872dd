use thiserror::Error;

/// Errors raised while decoding text into board values.
///
/// Move legality is never an error: the validator answers `false` instead.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ChessError {
    #[error("coordinate ({row}, {col}) is off the board")]
    InvalidCoordinate { row: i8, col: i8 },

    #[error("invalid square notation `{0}`")]
    InvalidNotation(String),

    #[error("unknown piece key `{0}`")]
    InvalidPieceKey(String),

    #[error("invalid board placement: {0}")]
    InvalidPlacement(String),

    #[error("invalid move `{0}`")]
    InvalidMove(String),
}

pub type Result<T> = std::result::Result<T, ChessError>;
