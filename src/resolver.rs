//! Cascade resolution: detect → clear → score → refill, repeated until the board is stable.
//!
//! `resolve` runs the whole loop synchronously. Presentation layers that want to
//! stage each cascade (for animation) can drive `resolve_step` themselves, or
//! replay the `CascadeStep`s recorded in the returned `Resolution`.
use rand::Rng;
use tracing::debug;

use crate::config::Rules;
use crate::engine::{Board, Coord, Tile};
use crate::matcher::{find_runs, Run};
use crate::scoring::ScoreTable;

/// One detect/clear/score/refill cycle.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CascadeStep {
    /// Runs found at the start of the cycle.
    pub runs: Vec<Run>,
    /// Cells emptied by the cycle, sorted, each listed once.
    pub cleared: Vec<Coord>,
    /// Points scored by the cycle.
    pub points: u32,
}

/// Outcome of resolving a board to its fixpoint.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Resolution {
    pub steps: Vec<CascadeStep>,
    pub score_delta: u32,
}

impl Resolution {
    /// `true` if at least one run was cleared.
    pub fn is_productive(&self) -> bool {
        !self.steps.is_empty()
    }

    /// Number of cycles, including the first one.
    pub fn cascade_depth(&self) -> usize {
        self.steps.len()
    }

    /// Total runs cleared across all cycles.
    pub fn runs_resolved(&self) -> usize {
        self.steps.iter().map(|step| step.runs.len()).sum()
    }
}

/// Empties every cell of every run and returns the affected coordinates.
///
/// A cell shared by two runs is cleared, and reported, once.
pub fn clear_runs(board: &mut Board, runs: &[Run]) -> Vec<Coord> {
    let mut cleared = Vec::new();
    for run in runs {
        for (r, c) in run.cells() {
            if !board.get_tile(r, c).is_empty() {
                board.set_tile(r, c, Tile::Empty);
                cleared.push((r, c));
            }
        }
    }
    cleared.sort_unstable();
    cleared
}

/// Sums the table value of each run. Overlapping runs each score in full.
///
/// The total saturates at `u32::MAX`.
pub fn score_runs(runs: &[Run], table: &ScoreTable) -> u32 {
    runs.iter()
        .map(|run| table.points(run.len))
        .fold(0, u32::saturating_add)
}

/// Performs a single cascade cycle.
///
/// Returns `None`, leaving the board untouched, if the board is already stable.
pub fn resolve_step(board: &mut Board, rules: &Rules, rng: &mut impl Rng) -> Option<CascadeStep> {
    let runs = find_runs(board, &rules.alphabet);
    if runs.is_empty() {
        return None;
    }

    let cleared = clear_runs(board, &runs);
    let points = score_runs(&runs, &rules.scoring);
    board.refill(&rules.alphabet, rng);

    Some(CascadeStep {
        runs,
        cleared,
        points,
    })
}

/// Resolves the board until no run remains.
///
/// Has no depth limit. On a stable board this returns an empty `Resolution`
/// and leaves the board as it was.
///
/// # Examples
/// ```
/// use rand::rngs::SmallRng;
/// use rand::SeedableRng;
/// use match3::config::Rules;
/// use match3::engine::Board;
/// use match3::matcher::has_runs;
/// use match3::resolver::resolve;
///
/// let rules = Rules::default();
/// let mut rng = SmallRng::seed_from_u64(1);
/// let mut board = Board::new_random(8, &rules.alphabet, &mut rng);
/// let resolution = resolve(&mut board, &rules, &mut rng);
/// assert!(!has_runs(&board, &rules.alphabet));
/// assert_eq!(board.count_empty(), 0);
/// assert_eq!(resolution.is_productive(), resolution.score_delta > 0);
/// ```
pub fn resolve(board: &mut Board, rules: &Rules, rng: &mut impl Rng) -> Resolution {
    let mut resolution = Resolution::default();
    while let Some(step) = resolve_step(board, rules, rng) {
        debug!(
            cascade = resolution.steps.len() + 1,
            runs = step.runs.len(),
            cleared = step.cleared.len(),
            points = step.points,
            "cascade resolved"
        );
        resolution.score_delta = resolution.score_delta.saturating_add(step.points);
        resolution.steps.push(step);
    }
    resolution
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::Alphabet;
    use crate::matcher::{has_runs, Axis};
    use crate::utils::board_from_str_array;
    use rand::rngs::SmallRng;
    use rand::SeedableRng;

    fn rgbyp_rules() -> Rules {
        Rules {
            board_size: 5,
            alphabet: Alphabet::new(&['R', 'G', 'B', 'Y', 'P'], &[]).unwrap(),
            ..Rules::default()
        }
    }

    #[test]
    fn test_resolve_stable_board_is_noop() {
        let rules = rgbyp_rules();
        let mut board = board_from_str_array(
            &["RGBYP", "GBYPR", "BYPRG", "YPRGB", "PRGBY"],
            &rules.alphabet,
        )
        .unwrap();
        let before = board.clone();
        let mut rng = SmallRng::seed_from_u64(0);

        let resolution = resolve(&mut board, &rules, &mut rng);
        assert_eq!(resolution, Resolution::default());
        assert!(!resolution.is_productive());
        assert_eq!(board, before);
    }

    #[test]
    fn test_horizontal_run_scores_ten_and_clears() {
        let rules = rgbyp_rules();
        let mut board = board_from_str_array(
            &["RRRYP", "GBYPR", "BYPRG", "YPRGB", "PRGBY"],
            &rules.alphabet,
        )
        .unwrap();
        let runs = find_runs(&board, &rules.alphabet);
        assert_eq!(runs.len(), 1);

        let cleared = clear_runs(&mut board, &runs);
        assert_eq!(cleared, vec![(0, 0), (0, 1), (0, 2)]);
        assert_eq!(score_runs(&runs, &rules.scoring), 10);
        for c in 0..3 {
            assert_eq!(board.get_tile(0, c), Tile::Empty);
        }
        assert_eq!(board.get_tile(0, 3), Tile::Symbol(3));
    }

    #[test]
    fn test_resolve_step_reports_cycle() {
        let rules = rgbyp_rules();
        let mut board = board_from_str_array(
            &["RRRYP", "GBYPR", "BYPRG", "YPRGB", "PRGBY"],
            &rules.alphabet,
        )
        .unwrap();
        let mut rng = SmallRng::seed_from_u64(3);
        let step = resolve_step(&mut board, &rules, &mut rng).unwrap();
        assert_eq!(step.points, 10);
        assert_eq!(step.cleared, vec![(0, 0), (0, 1), (0, 2)]);
        assert_eq!(board.count_empty(), 0);
    }

    #[test]
    fn test_overlap_cleared_once_scored_twice() {
        let rules = rgbyp_rules();
        let mut board = board_from_str_array(
            &["RRRGY", "RGBYP", "RBYGB", "GYGBP", "YPBYG"],
            &rules.alphabet,
        )
        .unwrap();
        let runs = find_runs(&board, &rules.alphabet);
        assert_eq!(runs.len(), 2);

        let cleared = clear_runs(&mut board, &runs);
        assert_eq!(cleared.len(), 5);
        assert_eq!(score_runs(&runs, &rules.scoring), 20);
    }

    #[test]
    fn test_huge_score_table_saturates() {
        let rules = Rules {
            scoring: ScoreTable::Flat { per_run: u32::MAX },
            ..rgbyp_rules()
        };
        let mut board = board_from_str_array(
            &["RRRGY", "RGBYP", "RBYGB", "GYGBP", "YPBYG"],
            &rules.alphabet,
        )
        .unwrap();
        let runs = find_runs(&board, &rules.alphabet);
        assert_eq!(score_runs(&runs, &rules.scoring), u32::MAX);

        let mut rng = SmallRng::seed_from_u64(3);
        let resolution = resolve(&mut board, &rules, &mut rng);
        assert_eq!(resolution.score_delta, u32::MAX);
    }

    #[test]
    fn test_longer_runs_use_table() {
        let rules = rgbyp_rules();
        let board = board_from_str_array(
            &["RRRRR", "GBYPG", "BYPGB", "YPGBY", "GGGGB"],
            &rules.alphabet,
        )
        .unwrap();
        let runs = find_runs(&board, &rules.alphabet);
        assert_eq!(score_runs(&runs, &rules.scoring), 25 + 15);

        let flat = ScoreTable::Flat { per_run: 10 };
        assert_eq!(score_runs(&runs, &flat), 20);
    }

    #[test]
    fn test_cascade_from_falling_tiles() {
        let rules = rgbyp_rules();
        // Clearing the Y run on row 3 drops two R tiles onto the R at (4, 0).
        let mut board = board_from_str_array(
            &["PBGYB", "RGPBY", "RPBGP", "YYYPG", "RBGYB"],
            &rules.alphabet,
        )
        .unwrap();
        let mut rng = SmallRng::seed_from_u64(11);
        let resolution = resolve(&mut board, &rules, &mut rng);

        assert!(resolution.cascade_depth() >= 2);
        assert_eq!(resolution.steps[0].points, 10);
        assert!(resolution.steps[1].runs.contains(&Run {
            axis: Axis::Vertical,
            start: (2, 0),
            len: 3,
            tile: Tile::Symbol(0),
        }));
        assert!(resolution.score_delta >= 20);
        assert!(resolution.runs_resolved() >= 2);
        assert!(!has_runs(&board, &rules.alphabet));
    }

    #[test]
    fn test_resolve_reaches_fixpoint_and_is_idempotent() {
        let rules = Rules::default();
        for seed in 0..25u64 {
            let mut rng = SmallRng::seed_from_u64(seed);
            let mut board = Board::new_random(8, &rules.alphabet, &mut rng);
            let first = resolve(&mut board, &rules, &mut rng);
            assert_eq!(board.count_empty(), 0);
            assert!(!has_runs(&board, &rules.alphabet));
            assert_eq!(
                first.score_delta,
                first.steps.iter().map(|s| s.points).sum::<u32>()
            );

            let settled = board.clone();
            let second = resolve(&mut board, &rules, &mut rng);
            assert_eq!(second.score_delta, 0, "seed {}", seed);
            assert_eq!(board, settled, "seed {}", seed);
        }
    }

    #[test]
    fn test_non_matchable_tiles_survive_resolution() {
        let rules = Rules {
            alphabet: Alphabet::new(&['X', 'R', 'G', 'B'], &['X']).unwrap(),
            ..rgbyp_rules()
        };
        let mut board = board_from_str_array(
            &["XXXXR", "RGBGB", "GBRBG", "BRGRB", "RGBGR"],
            &rules.alphabet,
        )
        .unwrap();
        let before = board.clone();
        let mut rng = SmallRng::seed_from_u64(5);
        let resolution = resolve(&mut board, &rules, &mut rng);
        assert!(!resolution.is_productive());
        assert_eq!(board, before);
    }
}
