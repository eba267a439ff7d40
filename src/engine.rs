//! Board model for the match-3 puzzle.
//!
//! This module defines the grid-level building blocks the rest of the crate works on:
//! - `Tile`: the content of one cell, either `Empty` or a symbol kind.
//! - `Alphabet`: the configured symbol set, which symbols may match, and uniform symbol draws.
//! - `Board`: the square grid itself, random generation, swaps, and gravity refill.
//!
//! Run detection lives in `matcher`, and the clear/refill/recheck loop in `resolver`.
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use std::fmt;

use crate::error::{BoardParseError, ConfigError};

/// A `(row, col)` board coordinate, 0-based, row 0 at the top.
pub type Coord = (usize, usize);

/// Shortest run; also the smallest accepted board edge and alphabet size.
pub const MIN_RUN_LEN: usize = 3;

/// Default board edge length.
pub const DEFAULT_BOARD_SIZE: usize = 8;

/// Default symbol glyphs: bomb, firewood, tractor, beer, saw cut.
pub const DEFAULT_SYMBOLS: [char; 5] = ['B', 'D', 'T', 'P', 'S'];

/// The content of a single board cell.
///
/// Tiles carry no identity beyond their kind; two `Symbol(2)` tiles are interchangeable.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Tile {
    /// A vacated cell. Only observable while a resolution is in progress.
    #[default]
    Empty,
    /// A symbol, identified by its index into the `Alphabet`.
    Symbol(u8),
}

impl Tile {
    /// Returns `true` for `Tile::Empty`.
    pub fn is_empty(&self) -> bool {
        matches!(self, Tile::Empty)
    }

    /// Returns the symbol index, or `None` for an empty cell.
    pub fn kind(&self) -> Option<u8> {
        match self {
            Tile::Empty => None,
            Tile::Symbol(k) => Some(*k),
        }
    }
}

/// Returns `true` when `a` and `b` are orthogonal neighbours (Manhattan distance 1).
///
/// # Examples
/// ```
/// use match3::engine::are_adjacent;
/// assert!(are_adjacent((3, 3), (3, 4)));
/// assert!(!are_adjacent((3, 3), (4, 4)));
/// assert!(!are_adjacent((3, 3), (3, 3)));
/// ```
pub fn are_adjacent(a: Coord, b: Coord) -> bool {
    a.0.abs_diff(b.0) + a.1.abs_diff(b.1) == 1
}

/// The symbol set a board is drawn from.
///
/// Each symbol has a display glyph and a matchable flag. Symbols that are not
/// matchable still fill cells and fall under gravity, but never form a run.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Alphabet {
    glyphs: Vec<char>,
    matchable: Vec<bool>,
}

impl Alphabet {
    /// Builds an alphabet from display glyphs, marking `non_matchable` glyphs as inert.
    ///
    /// # Errors
    /// Returns `ConfigError::Validation` if there are fewer than three symbols, more
    /// than 255, duplicate or reserved (`'.'`) glyphs, a non-matchable glyph that is
    /// not part of the alphabet, or no matchable symbol at all.
    ///
    /// # Examples
    /// ```
    /// use match3::engine::Alphabet;
    /// let alphabet = Alphabet::new(&['R', 'G', 'B', 'X'], &['X']).unwrap();
    /// assert_eq!(alphabet.len(), 4);
    /// assert!(Alphabet::new(&['R', 'G'], &[]).is_err());
    /// ```
    pub fn new(glyphs: &[char], non_matchable: &[char]) -> Result<Self, ConfigError> {
        if glyphs.len() < MIN_RUN_LEN {
            return Err(ConfigError::Validation(format!(
                "alphabet needs at least {} symbols, found {}",
                MIN_RUN_LEN,
                glyphs.len()
            )));
        }
        if glyphs.len() > u8::MAX as usize {
            return Err(ConfigError::Validation(format!(
                "alphabet supports at most {} symbols, found {}",
                u8::MAX,
                glyphs.len()
            )));
        }
        for (i, g) in glyphs.iter().enumerate() {
            if *g == '.' || g.is_whitespace() {
                return Err(ConfigError::Validation(format!(
                    "glyph {:?} is reserved",
                    g
                )));
            }
            if glyphs[..i].contains(g) {
                return Err(ConfigError::Validation(format!(
                    "glyph '{}' appears more than once",
                    g
                )));
            }
        }
        if let Some(stray) = non_matchable.iter().find(|g| !glyphs.contains(*g)) {
            return Err(ConfigError::Validation(format!(
                "non-matchable glyph '{}' is not in the alphabet",
                stray
            )));
        }

        let matchable: Vec<bool> = glyphs.iter().map(|g| !non_matchable.contains(g)).collect();
        if !matchable.iter().any(|m| *m) {
            return Err(ConfigError::Validation(
                "at least one symbol must be matchable".into(),
            ));
        }

        Ok(Alphabet {
            glyphs: glyphs.to_vec(),
            matchable,
        })
    }

    /// Number of symbols.
    pub fn len(&self) -> usize {
        self.glyphs.len()
    }

    /// Always `false`; construction rejects small alphabets.
    pub fn is_empty(&self) -> bool {
        self.glyphs.is_empty()
    }

    /// Draws a symbol uniformly at random.
    pub fn draw(&self, rng: &mut impl Rng) -> Tile {
        Tile::Symbol(rng.gen_range(0..self.glyphs.len()) as u8)
    }

    /// Returns `true` if `tile` is a symbol allowed to take part in runs.
    pub fn is_matchable(&self, tile: Tile) -> bool {
        match tile {
            Tile::Empty => false,
            Tile::Symbol(k) => self.matchable.get(k as usize).copied().unwrap_or(false),
        }
    }

    /// Display glyph for a tile; `'.'` for empty cells and `'?'` for unknown kinds.
    pub fn glyph(&self, tile: Tile) -> char {
        match tile {
            Tile::Empty => '.',
            Tile::Symbol(k) => self.glyphs.get(k as usize).copied().unwrap_or('?'),
        }
    }

    /// Inverse of `glyph`.
    pub fn tile_for_glyph(&self, glyph: char) -> Option<Tile> {
        if glyph == '.' {
            return Some(Tile::Empty);
        }
        self.glyphs
            .iter()
            .position(|g| *g == glyph)
            .map(|k| Tile::Symbol(k as u8))
    }

    /// The configured glyphs in kind order.
    pub fn glyphs(&self) -> &[char] {
        &self.glyphs
    }
}

impl Default for Alphabet {
    fn default() -> Self {
        Alphabet {
            glyphs: DEFAULT_SYMBOLS.to_vec(),
            matchable: vec![true; DEFAULT_SYMBOLS.len()],
        }
    }
}

/// A square grid of tiles, stored row-major.
///
/// The edge length is fixed when the board is built. Cells are changed only by
/// `swap`, by clearing (see `resolver::clear_runs`) and by `refill`.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Board {
    size: usize,
    grid: Vec<Tile>,
}

impl Board {
    /// Creates a `size` x `size` board with every cell set to `Tile::Empty`.
    ///
    /// # Examples
    /// ```
    /// use match3::engine::{Board, Tile};
    /// let board = Board::new_empty(4);
    /// assert_eq!(board.get_tile(3, 3), Tile::Empty);
    /// ```
    pub fn new_empty(size: usize) -> Self {
        Board {
            size,
            grid: vec![Tile::Empty; size * size],
        }
    }

    /// Fills a new board with independent uniform draws from `alphabet`.
    ///
    /// Pre-existing runs are not avoided; a fresh board may already contain matches.
    pub fn new_random(size: usize, alphabet: &Alphabet, rng: &mut impl Rng) -> Self {
        let grid = (0..size * size).map(|_| alphabet.draw(rng)).collect();
        Board { size, grid }
    }

    /// Same as `new_random`, but reproducible: the same seed always yields the same board.
    pub fn new_random_with_seed(size: usize, alphabet: &Alphabet, seed: u64) -> Self {
        let mut rng = SmallRng::seed_from_u64(seed);
        Self::new_random(size, alphabet, &mut rng)
    }

    /// Builds a board from explicit rows.
    ///
    /// # Errors
    /// Returns `BoardParseError::Empty` for no rows and `BoardParseError::RaggedRow`
    /// unless every row is exactly as long as there are rows.
    pub fn from_rows(rows: Vec<Vec<Tile>>) -> Result<Self, BoardParseError> {
        if rows.is_empty() {
            return Err(BoardParseError::Empty);
        }
        let size = rows.len();
        if let Some((row, found)) = rows
            .iter()
            .enumerate()
            .find(|(_, tiles)| tiles.len() != size)
            .map(|(r, tiles)| (r, tiles.len()))
        {
            return Err(BoardParseError::RaggedRow {
                row,
                expected: size,
                found,
            });
        }
        Ok(Board {
            size,
            grid: rows.into_iter().flatten().collect(),
        })
    }

    /// Edge length of the board.
    pub fn size(&self) -> usize {
        self.size
    }

    /// Returns `true` if `(r, c)` lies on the board.
    pub fn in_bounds(&self, r: usize, c: usize) -> bool {
        r < self.size && c < self.size
    }

    /// Returns the tile at row `r`, column `c`.
    ///
    /// # Panics
    /// Panics if `(r, c)` is outside the board.
    pub fn get_tile(&self, r: usize, c: usize) -> Tile {
        assert!(self.in_bounds(r, c), "({}, {}) out of bounds", r, c);
        self.grid[r * self.size + c]
    }

    /// Sets the tile at row `r`, column `c`.
    ///
    /// # Panics
    /// Panics if `(r, c)` is outside the board.
    pub fn set_tile(&mut self, r: usize, c: usize, tile: Tile) {
        assert!(self.in_bounds(r, c), "({}, {}) out of bounds", r, c);
        self.grid[r * self.size + c] = tile;
    }

    /// Exchanges the contents of two cells.
    pub fn swap(&mut self, a: Coord, b: Coord) {
        let first = self.get_tile(a.0, a.1);
        let second = self.get_tile(b.0, b.1);
        self.set_tile(a.0, a.1, second);
        self.set_tile(b.0, b.1, first);
    }

    /// Row-major view of all tiles.
    pub fn tiles(&self) -> &[Tile] {
        &self.grid
    }

    /// Number of empty cells.
    pub fn count_empty(&self) -> usize {
        self.grid.iter().filter(|t| t.is_empty()).count()
    }

    /// Compacts every column toward the bottom.
    ///
    /// Non-empty tiles keep their relative vertical order; all vacated cells end up
    /// at the top of their column.
    pub fn apply_gravity(&mut self) {
        for c in 0..self.size {
            // Rows below `write_row` are already settled.
            let mut write_row = self.size;
            for r in (0..self.size).rev() {
                let tile = self.get_tile(r, c);
                if !tile.is_empty() {
                    write_row -= 1;
                    if r != write_row {
                        self.set_tile(write_row, c, tile);
                        self.set_tile(r, c, Tile::Empty);
                    }
                }
            }
        }
    }

    /// Replaces every empty cell with a fresh uniform draw. Returns how many cells were filled.
    pub fn fill_vacancies(&mut self, alphabet: &Alphabet, rng: &mut impl Rng) -> usize {
        let mut filled = 0;
        for tile in self.grid.iter_mut().filter(|t| t.is_empty()) {
            *tile = alphabet.draw(rng);
            filled += 1;
        }
        filled
    }

    /// Gravity refill: compact each column, then fill the vacancies left at the top.
    ///
    /// Afterwards no cell is empty. Refill never looks for new runs; that is the
    /// resolver's job.
    pub fn refill(&mut self, alphabet: &Alphabet, rng: &mut impl Rng) -> usize {
        self.apply_gravity();
        self.fill_vacancies(alphabet, rng)
    }

    /// Plain text rows using the alphabet's glyphs, `'.'` for empty cells.
    pub fn to_text_rows(&self, alphabet: &Alphabet) -> Vec<String> {
        self.grid
            .chunks(self.size.max(1))
            .map(|row| row.iter().map(|t| alphabet.glyph(*t)).collect())
            .collect()
    }

    /// Returns a displayable view of the board rendered with `alphabet`'s glyphs.
    pub fn view<'a>(&'a self, alphabet: &'a Alphabet) -> BoardView<'a> {
        BoardView {
            board: self,
            alphabet,
            highlight: None,
        }
    }
}

/// Terminal rendering of a board, with optional highlighted cell.
///
/// Cells are drawn with ANSI background colours, one colour per symbol kind.
pub struct BoardView<'a> {
    board: &'a Board,
    alphabet: &'a Alphabet,
    highlight: Option<Coord>,
}

impl BoardView<'_> {
    /// Marks `pos` (typically the held selection) in the rendering.
    pub fn with_highlight(mut self, pos: Option<Coord>) -> Self {
        self.highlight = pos;
        self
    }
}

fn ansi_background(tile: Tile) -> u8 {
    match tile {
        Tile::Empty => 40,
        Tile::Symbol(k) => 41 + (k % 6),
    }
}

impl fmt::Display for BoardView<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let size = self.board.size();
        write!(f, "  ")?;
        for c in 0..size {
            write!(f, "{:<2}", c)?;
        }
        writeln!(f)?;

        for r in 0..size {
            write!(f, "{:<2}", r)?;
            for c in 0..size {
                let tile = self.board.get_tile(r, c);
                let marker = if self.highlight == Some((r, c)) { '*' } else { ' ' };
                write!(
                    f,
                    "\x1b[1;{}m{}{}\x1b[m",
                    ansi_background(tile),
                    self.alphabet.glyph(tile),
                    marker
                )?;
            }
            if r + 1 < size {
                writeln!(f)?;
            }
        }
        Ok(())
    }
}
