//! Game session: one object owning everything a round needs.
//!
//! `Game` ties the board, the running score, the selection machine, the round
//! clock and the random source together. Input (`select`) and clock ticks
//! (`tick`) are processed one at a time, each to completion.
use rand::rngs::SmallRng;
use rand::SeedableRng;
use tracing::{info, instrument};

use crate::clock::RoundClock;
use crate::config::{GameConfig, Rules};
use crate::engine::Board;
use crate::error::{ConfigError, MoveError};
use crate::selection::{SelectOutcome, Selection, SelectionMachine};

/// Result of advancing the round clock by one second.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TickOutcome {
    pub remaining: u32,
    pub expired: bool,
    /// Reported once, on the tick that ends the round.
    pub final_score: Option<u32>,
}

/// Manages the state of a single match-3 round.
///
/// # Examples
/// ```
/// use match3::config::Rules;
/// use match3::game::Game;
///
/// let mut game = Game::with_rules(Rules::default(), 42).unwrap();
/// assert_eq!(game.score(), 0);
/// assert_eq!(game.remaining_seconds(), 60);
///
/// game.select(0, 0).unwrap();
/// let outcome = game.select(0, 1).unwrap();
/// // Either the swap matched something and scored, or it was undone.
/// assert_eq!(outcome.applied_swap(), outcome.score_delta() > 0);
///
/// for _ in 0..60 {
///     game.tick();
/// }
/// assert!(game.is_over());
/// assert!(game.select(3, 3).is_err());
///
/// game.reset();
/// assert_eq!(game.score(), 0);
/// assert!(!game.is_over());
/// ```
#[derive(Clone, Debug)]
pub struct Game {
    rules: Rules,
    board: Board,
    score: u32,
    selection: SelectionMachine,
    clock: RoundClock,
    rng: SmallRng,
}

impl Game {
    /// Creates a game from a configuration, validating it first.
    ///
    /// Uses `config.seed` when set, OS entropy otherwise.
    pub fn new(config: &GameConfig) -> Result<Self, ConfigError> {
        let rules = config.rules()?;
        let rng = match config.seed {
            Some(seed) => SmallRng::seed_from_u64(seed),
            None => SmallRng::from_entropy(),
        };
        Ok(Self::with_rng(rules, rng))
    }

    /// Creates a reproducible game from a rule set.
    ///
    /// # Errors
    /// `ConfigError::Validation` if `rules` fails `Rules::validate`.
    pub fn with_rules(rules: Rules, seed: u64) -> Result<Self, ConfigError> {
        rules.validate()?;
        Ok(Self::with_rng(rules, SmallRng::seed_from_u64(seed)))
    }

    /// Starts a round on a prepared board.
    ///
    /// Refills after matches and later resets draw from `rules.alphabet`; resets
    /// generate boards of the given board's size.
    ///
    /// # Errors
    /// `ConfigError::Validation` if the board is smaller than 3x3 or the rules
    /// are otherwise invalid.
    pub fn with_board(board: Board, rules: Rules, seed: u64) -> Result<Self, ConfigError> {
        let rules = Rules {
            board_size: board.size(),
            ..rules
        };
        rules.validate()?;
        Ok(Game {
            clock: RoundClock::new(rules.round_seconds),
            rules,
            board,
            score: 0,
            selection: SelectionMachine::new(),
            rng: SmallRng::seed_from_u64(seed),
        })
    }

    fn with_rng(rules: Rules, mut rng: SmallRng) -> Self {
        let board = Board::new_random(rules.board_size, &rules.alphabet, &mut rng);
        Game {
            clock: RoundClock::new(rules.round_seconds),
            rules,
            board,
            score: 0,
            selection: SelectionMachine::new(),
            rng,
        }
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn rules(&self) -> &Rules {
        &self.rules
    }

    /// Points scored so far this round.
    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn remaining_seconds(&self) -> u32 {
        self.clock.remaining()
    }

    pub fn selection(&self) -> Selection {
        self.selection.state()
    }

    /// `true` once the clock has run out; input stays frozen until `reset`.
    pub fn is_over(&self) -> bool {
        self.selection.is_frozen()
    }

    /// Picks the tile at `(row, col)`.
    ///
    /// A second pick on a neighbour of the held tile swaps the two and resolves the
    /// board; points from a kept swap are added to the score.
    ///
    /// # Errors
    /// `MoveError::RoundOver` after the clock has expired and
    /// `MoveError::InvalidCoordinate` for picks off the board. Neither changes any state.
    #[instrument(skip(self), fields(score = self.score))]
    pub fn select(&mut self, row: usize, col: usize) -> Result<SelectOutcome, MoveError> {
        let outcome =
            self.selection
                .select(&mut self.board, (row, col), &self.rules, &mut self.rng)?;
        self.score = self.score.saturating_add(outcome.score_delta());
        Ok(outcome)
    }

    /// Advances the round clock by one second.
    ///
    /// The tick that reaches zero freezes input and carries the final score.
    #[instrument(skip(self))]
    pub fn tick(&mut self) -> TickOutcome {
        let tick = self.clock.tick();
        let mut final_score = None;
        if tick.just_expired {
            self.selection.freeze();
            final_score = Some(self.score);
            info!(final_score = self.score, "round over");
        }
        TickOutcome {
            remaining: tick.remaining,
            expired: tick.expired,
            final_score,
        }
    }

    /// Starts a fresh round: new board, zero score, full clock, input unfrozen.
    #[instrument(skip(self))]
    pub fn reset(&mut self) {
        self.board = Board::new_random(self.rules.board_size, &self.rules.alphabet, &mut self.rng);
        self.score = 0;
        self.clock.reset();
        self.selection.reset();
        info!(
            board_size = self.rules.board_size,
            seconds = self.clock.remaining(),
            "round started"
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::Alphabet;
    use crate::scoring::ScoreTable;
    use crate::selection::Swap;
    use crate::utils::board_from_str_array;

    fn rules() -> Rules {
        Rules {
            board_size: 5,
            alphabet: Alphabet::new(&['R', 'G', 'B', 'Y', 'P'], &[]).unwrap(),
            ..Rules::default()
        }
    }

    fn game_with_move() -> Game {
        let rules = rules();
        let board = board_from_str_array(
            &["RRGYP", "GBRYB", "BYPGR", "YPRBG", "PGBYP"],
            &rules.alphabet,
        )
        .unwrap();
        Game::with_board(board, rules, 7).unwrap()
    }

    #[test]
    fn test_game_new_from_config() {
        let config = GameConfig {
            seed: Some(3),
            ..GameConfig::default()
        };
        let game = Game::new(&config).unwrap();
        assert_eq!(game.score(), 0);
        assert_eq!(game.remaining_seconds(), 60);
        assert_eq!(game.board().size(), 8);
        assert_eq!(game.board().count_empty(), 0);
        assert_eq!(game.selection(), Selection::Idle);

        let same = Game::new(&config).unwrap();
        assert_eq!(game.board(), same.board());
    }

    #[test]
    fn test_game_new_rejects_bad_config() {
        let config = GameConfig {
            board_size: 2,
            ..GameConfig::default()
        };
        assert!(Game::new(&config).is_err());
    }

    #[test]
    fn test_game_rejects_invalid_rules() {
        let instant = Rules {
            round_seconds: 0,
            ..Rules::default()
        };
        assert!(matches!(
            Game::with_rules(instant, 1),
            Err(ConfigError::Validation(_))
        ));

        let rules = rules();
        let tiny = board_from_str_array(&["RG", "GR"], &rules.alphabet).unwrap();
        assert!(matches!(
            Game::with_board(tiny, rules, 1),
            Err(ConfigError::Validation(_))
        ));
    }

    #[test]
    fn test_game_score_saturates() {
        let rules = Rules {
            scoring: ScoreTable::Flat { per_run: u32::MAX },
            ..rules()
        };
        let board = board_from_str_array(&["RRR", "R..", "R.."], &rules.alphabet).unwrap();
        let mut game = Game::with_board(board, rules, 4).unwrap();
        game.select(1, 1).unwrap();
        let outcome = game.select(1, 2).unwrap();
        assert!(outcome.applied_swap());
        assert_eq!(game.score(), u32::MAX);
    }

    #[test]
    fn test_game_select_scores_kept_swap() {
        let mut game = game_with_move();
        game.select(1, 2).unwrap();
        let outcome = game.select(0, 2).unwrap();
        assert!(outcome.applied_swap());
        assert_eq!(game.score(), outcome.score_delta());
        assert!(game.score() >= 10);
        assert_eq!(game.selection(), Selection::Idle);
    }

    #[test]
    fn test_game_reverted_swap_keeps_score() {
        let mut game = game_with_move();
        let before = game.board().clone();
        game.select(4, 0).unwrap();
        let outcome = game.select(4, 1).unwrap();
        assert_eq!(
            outcome,
            SelectOutcome::Reverted {
                swap: Swap {
                    from: (4, 0),
                    to: (4, 1)
                }
            }
        );
        assert_eq!(game.score(), 0);
        assert_eq!(game.board(), &before);
    }

    #[test]
    fn test_game_non_adjacent_no_mutation() {
        let mut game = Game::with_rules(Rules::default(), 99).unwrap();
        let before = game.board().clone();
        game.select(0, 0).unwrap();
        let outcome = game.select(2, 2).unwrap();
        assert!(!outcome.applied_swap());
        assert_eq!(game.board(), &before);
        assert_eq!(game.score(), 0);
        assert_eq!(game.selection(), Selection::OneSelected((2, 2)));
    }

    #[test]
    fn test_game_same_tile_twice() {
        let mut game = Game::with_rules(Rules::default(), 5).unwrap();
        let before = game.board().clone();
        game.select(3, 3).unwrap();
        game.select(3, 3).unwrap();
        assert_eq!(game.board(), &before);
        assert_eq!(game.score(), 0);
        assert_eq!(game.selection(), Selection::OneSelected((3, 3)));
    }

    #[test]
    fn test_game_invalid_coordinate() {
        let mut game = Game::with_rules(Rules::default(), 5).unwrap();
        let before = game.board().clone();
        assert_eq!(
            game.select(8, 0),
            Err(MoveError::InvalidCoordinate {
                row: 8,
                col: 0,
                size: 8
            })
        );
        assert_eq!(game.board(), &before);
        assert_eq!(game.selection(), Selection::Idle);
    }

    #[test]
    fn test_game_expires_after_sixty_ticks() {
        let mut game = game_with_move();
        game.select(1, 2).unwrap();
        game.select(0, 2).unwrap();
        let score = game.score();

        for _ in 0..59 {
            let tick = game.tick();
            assert!(!tick.expired);
            assert_eq!(tick.final_score, None);
        }
        let last = game.tick();
        assert_eq!(last.remaining, 0);
        assert!(last.expired);
        assert_eq!(last.final_score, Some(score));
        assert!(game.is_over());

        let frozen_board = game.board().clone();
        assert_eq!(game.select(0, 0), Err(MoveError::RoundOver));
        assert_eq!(game.select(0, 1), Err(MoveError::RoundOver));
        assert_eq!(game.board(), &frozen_board);
        assert_eq!(game.score(), score);

        let after = game.tick();
        assert!(after.expired);
        assert_eq!(after.final_score, None);
    }

    #[test]
    fn test_game_reset() {
        let mut game = game_with_move();
        game.select(1, 2).unwrap();
        game.select(0, 2).unwrap();
        for _ in 0..60 {
            game.tick();
        }
        assert!(game.is_over());

        game.reset();
        assert_eq!(game.score(), 0);
        assert_eq!(game.remaining_seconds(), 60);
        assert!(!game.is_over());
        assert_eq!(game.selection(), Selection::Idle);
        assert_eq!(game.board().size(), 5);
        assert_eq!(game.board().count_empty(), 0);
        assert!(game.select(2, 2).is_ok());
    }
}
