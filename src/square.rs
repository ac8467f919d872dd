use crate::error::{ChessError, Result};
use std::fmt;
use std::str::FromStr;

const FILES: [char; 8] = ['a', 'b', 'c', 'd', 'e', 'f', 'g', 'h'];
const RANKS: [char; 8] = ['8', '7', '6', '5', '4', '3', '2', '1'];

/// A board position. Row 0 is rank 8, column 0 is file `a`.
///
/// Off-board values are allowed so that a move can point anywhere; the
/// validator rejects them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Square {
    pub row: i8,
    pub col: i8,
}

impl Square {
    pub const fn new(row: i8, col: i8) -> Self {
        Self { row, col }
    }

    pub fn is_on_board(&self) -> bool {
        is_on_board(self.row, self.col)
    }

    /// Index into a 64-cell grid, or `None` when off the board.
    pub fn index(&self) -> Option<usize> {
        if self.is_on_board() {
            Some(self.row as usize * 8 + self.col as usize)
        } else {
            None
        }
    }

    pub fn to_notation(&self) -> Result<String> {
        to_notation(self.row, self.col)
    }
}

impl fmt::Display for Square {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self.to_notation() {
            Ok(notation) => write!(f, "{}", notation),
            Err(_) => write!(f, "({},{})", self.row, self.col),
        }
    }
}

impl FromStr for Square {
    type Err = ChessError;

    fn from_str(s: &str) -> Result<Self> {
        from_notation(s)
    }
}

pub fn is_on_board(row: i8, col: i8) -> bool {
    (0..8).contains(&row) && (0..8).contains(&col)
}

/// Maps `(row, col)` to algebraic notation such as `e4`.
pub fn to_notation(row: i8, col: i8) -> Result<String> {
    if !is_on_board(row, col) {
        return Err(ChessError::InvalidCoordinate { row, col });
    }
    let mut notation = String::with_capacity(2);
    notation.push(FILES[col as usize]);
    notation.push(RANKS[row as usize]);
    Ok(notation)
}

/// Parses two-character algebraic notation such as `e4`.
pub fn from_notation(text: &str) -> Result<Square> {
    let invalid = || ChessError::InvalidNotation(text.to_string());

    let mut chars = text.chars();
    let (file, rank) = match (chars.next(), chars.next(), chars.next()) {
        (Some(file), Some(rank), None) => (file, rank),
        _ => return Err(invalid()),
    };

    let col = FILES.iter().position(|&f| f == file).ok_or_else(invalid)?;
    let row = RANKS.iter().position(|&r| r == rank).ok_or_else(invalid)?;

    Ok(Square::new(row as i8, col as i8))
}

/// All 64 squares, row by row starting at row 0.
pub fn all_squares() -> impl Iterator<Item = Square> {
    (0..8i8).flat_map(|row| (0..8i8).map(move |col| Square::new(row, col)))
}

/// A candidate move. Nothing is checked at construction time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Move {
    pub from: Square,
    pub to: Square,
}

impl Move {
    pub const fn new(from: Square, to: Square) -> Self {
        Self { from, to }
    }

    /// Signed `(to.row - from.row, to.col - from.col)`.
    pub fn delta(&self) -> (i32, i32) {
        (
            i32::from(self.to.row) - i32::from(self.from.row),
            i32::from(self.to.col) - i32::from(self.from.col),
        )
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}{}", self.from, self.to)
    }
}

impl FromStr for Move {
    type Err = ChessError;

    /// Accepts `e2e4`, `e2-e4` and `e2 e4`. The separator may only sit
    /// between the two squares.
    fn from_str(s: &str) -> Result<Self> {
        let invalid = || ChessError::InvalidMove(s.to_string());
        let text = s.trim();
        let (from, to) = match text.split_once(|c: char| c == '-' || c.is_whitespace()) {
            Some((from, to)) => (from, to.trim_start()),
            None if text.len() == 4 && text.is_char_boundary(2) => text.split_at(2),
            None => return Err(invalid()),
        };
        if from.len() != 2 || to.len() != 2 {
            return Err(invalid());
        }
        Ok(Move::new(from_notation(from)?, from_notation(to)?))
    }
}
