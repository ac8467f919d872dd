use crate::error::{ChessError, Result};
use crate::square::{Move, Square};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Piece {
    Pawn,
    Knight,
    Bishop,
    Rook,
    Queen,
    King,
}

impl Piece {
    pub const ALL: [Piece; 6] = [
        Piece::Pawn,
        Piece::Knight,
        Piece::Bishop,
        Piece::Rook,
        Piece::Queen,
        Piece::King,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Piece::Pawn => "pawn",
            Piece::Knight => "knight",
            Piece::Bishop => "bishop",
            Piece::Rook => "rook",
            Piece::Queen => "queen",
            Piece::King => "king",
        }
    }

    fn from_name(name: &str) -> Option<Piece> {
        Piece::ALL.iter().copied().find(|piece| piece.name() == name)
    }

    fn letter(&self) -> char {
        match self {
            Piece::Pawn => 'p',
            Piece::Knight => 'n',
            Piece::Bishop => 'b',
            Piece::Rook => 'r',
            Piece::Queen => 'q',
            Piece::King => 'k',
        }
    }

    fn from_letter(letter: char) -> Option<Piece> {
        let lower = letter.to_ascii_lowercase();
        Piece::ALL.iter().copied().find(|piece| piece.letter() == lower)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Color {
    White,
    Black,
}

/// What stands on a square: a piece kind and its color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PieceId {
    pub piece: Piece,
    pub color: Color,
}

impl PieceId {
    pub const fn new(piece: Piece, color: Color) -> Self {
        Self { piece, color }
    }

    pub const fn white(piece: Piece) -> Self {
        Self::new(piece, Color::White)
    }

    pub const fn black(piece: Piece) -> Self {
        Self::new(piece, Color::Black)
    }

    /// Single-letter form used in placements: uppercase for white.
    pub fn to_char(&self) -> char {
        match self.color {
            Color::White => self.piece.letter().to_ascii_uppercase(),
            Color::Black => self.piece.letter(),
        }
    }

    pub fn from_char(letter: char) -> Option<PieceId> {
        let piece = Piece::from_letter(letter)?;
        let color = if letter.is_ascii_uppercase() {
            Color::White
        } else {
            Color::Black
        };
        Some(PieceId::new(piece, color))
    }
}

/// Key form `<kind>_<w|b>`, e.g. `pawn_w` or `king_b`.
impl fmt::Display for PieceId {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let suffix = match self.color {
            Color::White => 'w',
            Color::Black => 'b',
        };
        write!(f, "{}_{}", self.piece.name(), suffix)
    }
}

impl FromStr for PieceId {
    type Err = ChessError;

    fn from_str(s: &str) -> Result<Self> {
        let invalid = || ChessError::InvalidPieceKey(s.to_string());
        let (name, suffix) = s.split_once('_').ok_or_else(invalid)?;
        let piece = Piece::from_name(name).ok_or_else(invalid)?;
        let color = match suffix {
            "w" => Color::White,
            "b" => Color::Black,
            _ => return Err(invalid()),
        };
        Ok(PieceId::new(piece, color))
    }
}

const BACK_RANK: [Piece; 8] = [
    Piece::Rook,
    Piece::Knight,
    Piece::Bishop,
    Piece::King,
    Piece::Queen,
    Piece::Bishop,
    Piece::Knight,
    Piece::Rook,
];

/// Immutable snapshot of the 8x8 grid, stored row-major as `row * 8 + col`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Board {
    squares: [Option<PieceId>; 64],
}

impl Default for Board {
    fn default() -> Self {
        Self::empty()
    }
}

impl Board {
    pub fn empty() -> Self {
        Self { squares: [None; 64] }
    }

    /// Starting layout. Black's back rank is row 0, with the king on the d-file.
    pub fn initial() -> Self {
        let mut squares = [None; 64];
        for col in 0..8 {
            squares[col] = Some(PieceId::black(BACK_RANK[col]));
            squares[8 + col] = Some(PieceId::black(Piece::Pawn));
            squares[48 + col] = Some(PieceId::white(Piece::Pawn));
            squares[56 + col] = Some(PieceId::white(BACK_RANK[col]));
        }
        Self { squares }
    }

    /// Off-board squares read as empty.
    pub fn occupant_at(&self, square: Square) -> Option<PieceId> {
        square.index().and_then(|index| self.squares[index])
    }

    pub fn is_occupied(&self, square: Square) -> bool {
        self.occupant_at(square).is_some()
    }

    /// A copy with `piece` on `square`. Off-board squares are ignored.
    pub fn with_piece(&self, square: Square, piece: PieceId) -> Board {
        let mut board = *self;
        if let Some(index) = square.index() {
            board.squares[index] = Some(piece);
        }
        board
    }

    pub fn without_piece(&self, square: Square) -> Board {
        let mut board = *self;
        if let Some(index) = square.index() {
            board.squares[index] = None;
        }
        board
    }

    /// The board after lifting the piece on `from` and dropping it on `to`,
    /// replacing whatever stood there. Legality is not checked here.
    pub fn apply_move(&self, mv: Move) -> Board {
        match (self.occupant_at(mv.from), mv.to.is_on_board()) {
            (Some(piece), true) => self.without_piece(mv.from).with_piece(mv.to, piece),
            _ => *self,
        }
    }

    pub fn pieces(&self) -> impl Iterator<Item = (Square, PieceId)> + '_ {
        self.squares.iter().enumerate().filter_map(|(index, cell)| {
            cell.map(|piece| (Square::new((index / 8) as i8, (index % 8) as i8), piece))
        })
    }

    /// Parses the placement field of a FEN string. The first rank listed is row 0.
    pub fn from_placement(placement: &str) -> Result<Self> {
        let rows: Vec<&str> = placement.trim().split('/').collect();
        if rows.len() != 8 {
            return Err(ChessError::InvalidPlacement(format!(
                "expected 8 ranks, found {}",
                rows.len()
            )));
        }

        let mut squares = [None; 64];
        for (row, text) in rows.iter().enumerate() {
            let mut col = 0usize;
            for c in text.chars() {
                if let Some(run) = c.to_digit(10) {
                    if run == 0 || run > 8 {
                        return Err(ChessError::InvalidPlacement(format!(
                            "bad empty run `{}` in rank {}",
                            c,
                            8 - row
                        )));
                    }
                    col += run as usize;
                } else {
                    let piece = PieceId::from_char(c).ok_or_else(|| {
                        ChessError::InvalidPlacement(format!("unknown piece `{}`", c))
                    })?;
                    if col < 8 {
                        squares[row * 8 + col] = Some(piece);
                    }
                    col += 1;
                }
                if col > 8 {
                    break;
                }
            }
            if col != 8 {
                return Err(ChessError::InvalidPlacement(format!(
                    "rank {} does not cover 8 files",
                    8 - row
                )));
            }
        }
        Ok(Self { squares })
    }

    pub fn to_placement(&self) -> String {
        let mut placement = String::new();
        for row in 0..8 {
            let mut empty = 0;
            for col in 0..8 {
                match self.squares[row * 8 + col] {
                    Some(piece) => {
                        if empty > 0 {
                            placement.push_str(&empty.to_string());
                            empty = 0;
                        }
                        placement.push(piece.to_char());
                    }
                    None => empty += 1,
                }
            }
            if empty > 0 {
                placement.push_str(&empty.to_string());
            }
            if row < 7 {
                placement.push('/');
            }
        }
        placement
    }
}

pub fn initial_board() -> Board {
    Board::initial()
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let mut result = String::new();
        for row in 0..8 {
            for col in 0..8 {
                match self.squares[row * 8 + col] {
                    Some(piece) => result.push(piece.to_char()),
                    None => result.push('.'),
                }
                if col < 7 {
                    result.push(' ');
                }
            }
            result.push('\n');
        }
        write!(f, "{}", result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_initial_layout() {
        let board = initial_board();
        assert_eq!(
            board.occupant_at(Square::new(0, 3)),
            Some(PieceId::black(Piece::King))
        );
        assert_eq!(
            board.occupant_at(Square::new(0, 4)),
            Some(PieceId::black(Piece::Queen))
        );
        assert_eq!(
            board.occupant_at(Square::new(7, 3)),
            Some(PieceId::white(Piece::King))
        );
        assert_eq!(
            board.occupant_at(Square::new(7, 0)),
            Some(PieceId::white(Piece::Rook))
        );
        for col in 0..8 {
            assert_eq!(
                board.occupant_at(Square::new(1, col)),
                Some(PieceId::black(Piece::Pawn))
            );
            assert_eq!(
                board.occupant_at(Square::new(6, col)),
                Some(PieceId::white(Piece::Pawn))
            );
            for row in 2..6 {
                assert!(!board.is_occupied(Square::new(row, col)));
            }
        }
        assert_eq!(board.pieces().count(), 32);
    }

    #[test]
    fn test_initial_placement() {
        assert_eq!(
            Board::initial().to_placement(),
            "rnbkqbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBKQBNR"
        );
    }

    #[test]
    fn test_placement_round_trip() {
        let placement = "r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R";
        let board = Board::from_placement(placement).unwrap();
        assert_eq!(board.to_placement(), placement);
        assert_eq!(
            board.occupant_at("e1".parse().unwrap()),
            Some(PieceId::white(Piece::King))
        );
    }

    #[test]
    fn test_bad_placement() {
        assert!(Board::from_placement("8/8/8").is_err());
        assert!(Board::from_placement("9/8/8/8/8/8/8/8").is_err());
        assert!(Board::from_placement("7/8/8/8/8/8/8/8").is_err());
        assert!(Board::from_placement("ppppppppp/8/8/8/8/8/8/8").is_err());
        assert!(Board::from_placement("x7/8/8/8/8/8/8/8").is_err());
    }

    #[test]
    fn test_off_board_reads_empty() {
        let board = Board::initial();
        assert_eq!(board.occupant_at(Square::new(-1, 0)), None);
        assert_eq!(board.occupant_at(Square::new(0, 8)), None);
        assert_eq!(board.with_piece(Square::new(9, 9), PieceId::white(Piece::Queen)), board);
    }

    #[test]
    fn test_apply_move_returns_new_board() {
        let board = Board::initial();
        let mv: Move = "e2e4".parse().unwrap();
        let after = board.apply_move(mv);
        assert_eq!(after.occupant_at(mv.from), None);
        assert_eq!(after.occupant_at(mv.to), Some(PieceId::white(Piece::Pawn)));
        // The source snapshot is untouched.
        assert_eq!(board.occupant_at(mv.from), Some(PieceId::white(Piece::Pawn)));

        let from_empty = board.apply_move("e4e5".parse().unwrap());
        assert_eq!(from_empty, board);
    }

    #[test]
    fn test_piece_keys() {
        let key: PieceId = "pawn_w".parse().unwrap();
        assert_eq!(key, PieceId::white(Piece::Pawn));
        assert_eq!(PieceId::black(Piece::Knight).to_string(), "knight_b");
        for piece in Piece::ALL {
            for color in [Color::White, Color::Black] {
                let id = PieceId::new(piece, color);
                assert_eq!(id.to_string().parse::<PieceId>().unwrap(), id);
            }
        }
        for bad in ["pawn", "pawn_x", "archer_w", "", "_w"] {
            assert_eq!(
                bad.parse::<PieceId>(),
                Err(ChessError::InvalidPieceKey(bad.to_string()))
            );
        }
    }

    #[test]
    fn test_display() {
        let text = Board::initial().to_string();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 8);
        assert_eq!(lines[0], "r n b k q b n r");
        assert_eq!(lines[3], ". . . . . . . .");
        assert_eq!(lines[7], "R N B K Q B N R");
    }
}
