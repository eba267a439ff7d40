//! Run scoring rules.
//!
//! Two rules are supported, both configurable:
//! - `ByLength`: a table keyed on run length (3, 4, 5 or more). Default 10/15/25.
//! - `Flat`: every run scores the same, regardless of length.

use serde::{Deserialize, Serialize};

use crate::engine::MIN_RUN_LEN;

/// Points awarded per resolved run.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "rule", rename_all = "snake_case")]
pub enum ScoreTable {
    /// Length-based table; runs longer than five score `five_plus`.
    ByLength { three: u32, four: u32, five_plus: u32 },
    /// Every run scores `per_run`.
    Flat { per_run: u32 },
}

impl Default for ScoreTable {
    fn default() -> Self {
        ScoreTable::ByLength {
            three: 10,
            four: 15,
            five_plus: 25,
        }
    }
}

impl ScoreTable {
    /// Points for a single run of `len` tiles. Anything shorter than a run scores 0.
    ///
    /// # Examples
    /// ```
    /// use match3::scoring::ScoreTable;
    /// let table = ScoreTable::default();
    /// assert_eq!(table.points(3), 10);
    /// assert_eq!(table.points(4), 15);
    /// assert_eq!(table.points(7), 25);
    /// assert_eq!(ScoreTable::Flat { per_run: 10 }.points(6), 10);
    /// ```
    pub fn points(&self, len: usize) -> u32 {
        if len < MIN_RUN_LEN {
            return 0;
        }
        match *self {
            ScoreTable::ByLength {
                three,
                four,
                five_plus,
            } => match len {
                3 => three,
                4 => four,
                _ => five_plus,
            },
            ScoreTable::Flat { per_run } => per_run,
        }
    }
}
