use crate::engine::{Alphabet, Board};
use crate::error::BoardParseError;

/// Parses text rows into a `Board`.
///
/// Each string is one row, starting from row 0 at the top. Characters are the
/// alphabet's glyphs, with `'.'` standing for `Tile::Empty`. The board is square,
/// so every row must have exactly as many characters as there are rows.
///
/// # Errors
/// * `BoardParseError::Empty` if `s` has no rows.
/// * `BoardParseError::RaggedRow` if a row's length differs from the row count.
/// * `BoardParseError::UnknownGlyph` for a character that is neither `'.'` nor in `alphabet`.
///
/// # Examples
/// ```
/// use match3::engine::{Alphabet, Tile};
/// use match3::utils::board_from_str_array;
///
/// let alphabet = Alphabet::new(&['R', 'G', 'B'], &[]).unwrap();
/// let board = board_from_str_array(&["RGB", "B.R", "GGR"], &alphabet).unwrap();
/// assert_eq!(board.get_tile(0, 1), Tile::Symbol(1));
/// assert_eq!(board.get_tile(1, 1), Tile::Empty);
///
/// assert!(board_from_str_array(&["RXB", "RGB", "RGB"], &alphabet).is_err());
/// assert!(board_from_str_array(&["RG", "RGB", "RGB"], &alphabet).is_err());
/// ```
pub fn board_from_str_array(s: &[&str], alphabet: &Alphabet) -> Result<Board, BoardParseError> {
    let mut rows = Vec::with_capacity(s.len());
    for (r, row_str) in s.iter().enumerate() {
        let row = row_str
            .chars()
            .enumerate()
            .map(|(c, glyph)| {
                alphabet
                    .tile_for_glyph(glyph)
                    .ok_or(BoardParseError::UnknownGlyph { glyph, row: r, col: c })
            })
            .collect::<Result<Vec<_>, _>>()?;
        rows.push(row);
    }

    Board::from_rows(rows)
}
