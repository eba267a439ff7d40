use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::engine::{Alphabet, DEFAULT_BOARD_SIZE, DEFAULT_SYMBOLS, MIN_RUN_LEN};
use crate::error::ConfigError;
use crate::scoring::ScoreTable;

/// Default round length in seconds.
pub const DEFAULT_ROUND_SECONDS: u32 = 60;

/// Game configuration, loadable from TOML.
///
/// ```toml
/// board_size = 8
/// symbols = ["B", "D", "T", "P", "S"]
/// non_matchable = []
/// round_seconds = 60
///
/// [scoring]
/// rule = "by_length"
/// three = 10
/// four = 15
/// five_plus = 25
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    pub board_size: usize,
    /// One display glyph per symbol kind.
    pub symbols: Vec<char>,
    /// Glyphs that fill cells but never form runs.
    pub non_matchable: Vec<char>,
    pub round_seconds: u32,
    pub scoring: ScoreTable,
    /// Fixed RNG seed; `None` seeds from OS entropy.
    pub seed: Option<u64>,
}

impl Default for GameConfig {
    fn default() -> Self {
        GameConfig {
            board_size: DEFAULT_BOARD_SIZE,
            symbols: DEFAULT_SYMBOLS.to_vec(),
            non_matchable: Vec::new(),
            round_seconds: DEFAULT_ROUND_SECONDS,
            scoring: ScoreTable::default(),
            seed: None,
        }
    }
}

impl GameConfig {
    /// Load configuration from a TOML file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::FileRead {
            path: path.to_path_buf(),
            source: e,
        })?;
        let config: GameConfig = toml::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a TOML file, falling back to defaults if the file
    /// does not exist.
    pub fn load_or_default(path: &Path) -> Result<Self, ConfigError> {
        if path.exists() {
            Self::load(path)
        } else {
            warn!(path = %path.display(), "config file not found, using defaults");
            Ok(Self::default())
        }
    }

    /// Validate configuration values.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.rules().map(|_| ())
    }

    /// Validates the configuration and builds the runtime rule set.
    pub fn rules(&self) -> Result<Rules, ConfigError> {
        let rules = Rules {
            board_size: self.board_size,
            alphabet: Alphabet::new(&self.symbols, &self.non_matchable)?,
            scoring: self.scoring,
            round_seconds: self.round_seconds,
        };
        rules.validate()?;
        Ok(rules)
    }
}

/// Ready-to-use rules, normally derived from a `GameConfig`.
///
/// Rules built by hand are checked with `validate` when a `Game` is created.
#[derive(Debug, Clone, PartialEq)]
pub struct Rules {
    pub board_size: usize,
    pub alphabet: Alphabet,
    pub scoring: ScoreTable,
    pub round_seconds: u32,
}

impl Rules {
    /// Checks the limits an `Alphabet` cannot enforce on its own.
    ///
    /// # Errors
    /// `ConfigError::Validation` if the board edge is below 3 or the round
    /// lasts zero seconds.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.board_size < MIN_RUN_LEN {
            return Err(ConfigError::Validation(format!(
                "board_size must be >= {}, got {}",
                MIN_RUN_LEN, self.board_size
            )));
        }
        if self.round_seconds == 0 {
            return Err(ConfigError::Validation(
                "round_seconds must be > 0".into(),
            ));
        }
        Ok(())
    }
}

impl Default for Rules {
    fn default() -> Self {
        Rules {
            board_size: DEFAULT_BOARD_SIZE,
            alphabet: Alphabet::default(),
            scoring: ScoreTable::default(),
            round_seconds: DEFAULT_ROUND_SECONDS,
        }
    }
}
