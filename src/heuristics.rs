//! Move-choosing helpers for automated play.
//!
//! Every strategy looks only at the board as it is now: a swap is judged by the
//! runs it forms before any refill, since refills are random. Nothing here
//! reshuffles a board or tries to prove it solvable.
use crate::config::Rules;
use crate::engine::{Alphabet, Board};
use crate::matcher::{find_runs, has_runs};
use crate::resolver::score_runs;
use crate::selection::Swap;

/// How an automated player picks its next swap.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, clap::ValueEnum)]
pub enum Strategy {
    /// First productive swap in row-major scan order.
    First,
    /// Swap with the most points from its initial clear.
    Greedy,
    /// Lowest productive swap on the board; low clears shift more tiles and
    /// tend to set up cascades.
    Deepest,
}

impl Strategy {
    pub const ALL: [Strategy; 3] = [Strategy::First, Strategy::Greedy, Strategy::Deepest];

    pub fn name(&self) -> &'static str {
        match self {
            Strategy::First => "first",
            Strategy::Greedy => "greedy",
            Strategy::Deepest => "deepest",
        }
    }
}

/// Every swap of orthogonal neighbours on a `size` x `size` board, row-major,
/// rightward swap before downward swap at each cell.
pub fn candidate_swaps(size: usize) -> impl Iterator<Item = Swap> {
    (0..size).flat_map(move |r| {
        (0..size).flat_map(move |c| {
            let right = (c + 1 < size).then_some(Swap {
                from: (r, c),
                to: (r, c + 1),
            });
            let down = (r + 1 < size).then_some(Swap {
                from: (r, c),
                to: (r + 1, c),
            });
            right.into_iter().chain(down)
        })
    })
}

/// Swaps after which the board holds at least one run.
///
/// Two equal tiles swapped with each other change nothing and are skipped.
/// `Game::select` is more lenient: it keeps any swap that leaves a run on the
/// board, so on a board that already holds runs it would also keep an
/// equal-tile swap. Such a swap only resolves runs that were there before, so
/// it is not offered as a move.
///
/// # Examples
/// ```
/// use match3::engine::Alphabet;
/// use match3::heuristics::productive_swaps;
/// use match3::selection::Swap;
/// use match3::utils::board_from_str_array;
///
/// let alphabet = Alphabet::new(&['R', 'G', 'B', 'Y'], &[]).unwrap();
/// let board = board_from_str_array(&["RRG", "GBR", "BGY"], &alphabet).unwrap();
/// let swaps = productive_swaps(&board, &alphabet);
/// assert!(swaps.contains(&Swap { from: (0, 2), to: (1, 2) }));
/// ```
pub fn productive_swaps(board: &Board, alphabet: &Alphabet) -> Vec<Swap> {
    let mut scratch = board.clone();
    candidate_swaps(board.size())
        .filter(|swap| {
            if board.get_tile(swap.from.0, swap.from.1) == board.get_tile(swap.to.0, swap.to.1) {
                return false;
            }
            scratch.swap(swap.from, swap.to);
            let productive = has_runs(&scratch, alphabet);
            scratch.swap(swap.from, swap.to);
            productive
        })
        .collect()
}

/// Points the first clear after `swap` would score. Cascades are not counted.
pub fn immediate_points(board: &Board, swap: Swap, rules: &Rules) -> u32 {
    let mut scratch = board.clone();
    scratch.swap(swap.from, swap.to);
    score_runs(&find_runs(&scratch, &rules.alphabet), &rules.scoring)
}

/// Picks a swap according to `strategy`, or `None` if no swap forms a run.
pub fn choose_swap(strategy: Strategy, board: &Board, rules: &Rules) -> Option<Swap> {
    let swaps = productive_swaps(board, &rules.alphabet);
    match strategy {
        Strategy::First => swaps.first().copied(),
        // Ties go to the earliest swap in scan order.
        Strategy::Greedy => swaps
            .iter()
            .copied()
            .rev()
            .max_by_key(|swap| immediate_points(board, *swap, rules)),
        Strategy::Deepest => swaps
            .iter()
            .copied()
            .rev()
            .max_by_key(|swap| swap.from.0.max(swap.to.0)),
    }
}
