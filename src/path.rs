use crate::board::Board;
use crate::square::Square;

/// True when every square strictly between `from` and `to` is empty.
///
/// The squares must share a row, a column or a diagonal; this is not checked.
/// The walk never takes more than `max(|drow|, |dcol|) - 1` steps.
pub fn is_path_clear(board: &Board, from: Square, to: Square) -> bool {
    let drow = i32::from(to.row) - i32::from(from.row);
    let dcol = i32::from(to.col) - i32::from(from.col);
    let row_step = drow.signum();
    let col_step = dcol.signum();
    let distance = drow.abs().max(dcol.abs());

    (1..distance).all(|step| {
        let row = i32::from(from.row) + row_step * step;
        let col = i32::from(from.col) + col_step * step;
        match (i8::try_from(row), i8::try_from(col)) {
            (Ok(row), Ok(col)) => !board.is_occupied(Square::new(row, col)),
            // Only reachable for misaligned input; far off the board is empty.
            _ => true,
        }
    })
}
