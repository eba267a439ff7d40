//! Run detection.
//!
//! A run is a maximal straight line of three or more tiles of the same matchable
//! kind. Rows are scanned left to right and columns top to bottom; the two axes are
//! scanned independently, so a tile may belong to one horizontal and one vertical run.
use crate::engine::{Alphabet, Board, Coord, Tile, MIN_RUN_LEN};

/// Direction a run extends in from its start cell.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Axis {
    /// Along a row, toward higher column indices.
    Horizontal,
    /// Down a column, toward higher row indices.
    Vertical,
}

/// A maximal line of equal, matchable tiles.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Run {
    pub axis: Axis,
    /// Top-most / left-most cell of the run.
    pub start: Coord,
    pub len: usize,
    pub tile: Tile,
}

impl Run {
    /// Coordinates covered by the run, in scan order.
    pub fn cells(&self) -> impl Iterator<Item = Coord> + '_ {
        let (r, c) = self.start;
        (0..self.len).map(move |i| match self.axis {
            Axis::Horizontal => (r, c + i),
            Axis::Vertical => (r + i, c),
        })
    }

    /// Returns `true` if `pos` is one of the run's cells.
    pub fn contains(&self, pos: Coord) -> bool {
        let (r, c) = self.start;
        match self.axis {
            Axis::Horizontal => pos.0 == r && pos.1 >= c && pos.1 < c + self.len,
            Axis::Vertical => pos.1 == c && pos.0 >= r && pos.0 < r + self.len,
        }
    }
}

/// Finds every run on the board.
///
/// Horizontal runs come first (row by row), then vertical runs (column by column).
/// Empty cells and non-matchable symbols break runs and never belong to one.
/// Detection is pure; the board is not modified.
///
/// # Examples
/// ```
/// use match3::engine::Alphabet;
/// use match3::matcher::{find_runs, Axis};
/// use match3::utils::board_from_str_array;
///
/// let alphabet = Alphabet::new(&['R', 'G', 'B'], &[]).unwrap();
/// let board = board_from_str_array(&["RRR", "GBG", "BGB"], &alphabet).unwrap();
/// let runs = find_runs(&board, &alphabet);
/// assert_eq!(runs.len(), 1);
/// assert_eq!(runs[0].axis, Axis::Horizontal);
/// assert_eq!(runs[0].cells().collect::<Vec<_>>(), vec![(0, 0), (0, 1), (0, 2)]);
/// ```
pub fn find_runs(board: &Board, alphabet: &Alphabet) -> Vec<Run> {
    let n = board.size();
    let mut runs = Vec::new();

    for r in 0..n {
        scan_line(n, |i| board.get_tile(r, i), alphabet, |start, len, tile| {
            runs.push(Run {
                axis: Axis::Horizontal,
                start: (r, start),
                len,
                tile,
            })
        });
    }
    for c in 0..n {
        scan_line(n, |i| board.get_tile(i, c), alphabet, |start, len, tile| {
            runs.push(Run {
                axis: Axis::Vertical,
                start: (start, c),
                len,
                tile,
            })
        });
    }

    runs
}

/// Returns `true` if the board holds at least one run.
pub fn has_runs(board: &Board, alphabet: &Alphabet) -> bool {
    !find_runs(board, alphabet).is_empty()
}

// Walks one line of `len` cells and reports each maximal matchable stretch of
// length >= MIN_RUN_LEN as (start index, length, tile).
fn scan_line(
    len: usize,
    tile_at: impl Fn(usize) -> Tile,
    alphabet: &Alphabet,
    mut emit: impl FnMut(usize, usize, Tile),
) {
    let mut start = 0;
    while start < len {
        let tile = tile_at(start);
        let mut end = start + 1;
        while end < len && tile_at(end) == tile {
            end += 1;
        }
        if end - start >= MIN_RUN_LEN && alphabet.is_matchable(tile) {
            emit(start, end - start, tile);
        }
        start = end;
    }
}
