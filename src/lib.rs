//! # Match-3 Library
//!
//! This library provides the match-resolution engine for a match-3 tile puzzle:
//! a square board of symbols where two adjacent tiles are swapped, runs of three
//! or more equal symbols are cleared, the board refills under gravity, and
//! cascades are resolved until the board is stable. A countdown clock bounds the
//! round.
//!
//! It is used by two binaries:
//! - `human_player`: interactive play in the terminal.
//! - `strategy_evaluator`: plays seeded rounds with each automated strategy and
//!   compares their average scores.
//!
//! ## Modules
//! - `engine`: tiles, the symbol alphabet, the board, random generation and gravity refill.
//! - `matcher`: detection of horizontal and vertical runs.
//! - `scoring`: the configurable run score table.
//! - `resolver`: the clear → score → refill → recheck loop.
//! - `selection`: the two-pick swap state machine, including reverting unproductive swaps.
//! - `clock`: the round countdown.
//! - `game`: the session object tying board, score, selection and clock together.
//! - `config`: TOML configuration and validated `Rules`.
//! - `heuristics`: productive-swap discovery and move-choosing strategies.
//! - `error`: error types.
//! - `utils`: building boards from text rows.

pub mod clock;
pub mod config;
pub mod engine;
pub mod error;
pub mod game;
pub mod heuristics;
pub mod matcher;
pub mod resolver;
pub mod scoring;
pub mod selection;
pub mod utils;

pub use crate::config::{GameConfig, Rules};
pub use crate::engine::{Alphabet, Board, Tile};
pub use crate::error::{BoardParseError, ConfigError, MoveError};
pub use crate::game::Game;
