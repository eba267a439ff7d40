use std::path::PathBuf;

/// Errors raised while loading or validating a game configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read config file {path}: {source}")]
    FileRead {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to parse TOML: {0}")]
    TomlParse(#[from] toml::de::Error),

    #[error("config validation error: {0}")]
    Validation(String),
}

/// Reasons a `select` input is refused without touching the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum MoveError {
    #[error("coordinate ({row}, {col}) is outside the {size}x{size} board")]
    InvalidCoordinate { row: usize, col: usize, size: usize },

    #[error("the round is over; input is frozen until reset")]
    RoundOver,
}

/// Errors produced when building a board from text rows.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum BoardParseError {
    #[error("board text has no rows")]
    Empty,

    #[error("row {row} has {found} cells, expected {expected}")]
    RaggedRow {
        row: usize,
        expected: usize,
        found: usize,
    },

    #[error("unrecognized glyph '{glyph}' at row {row} col {col}")]
    UnknownGlyph { glyph: char, row: usize, col: usize },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_move_error_display() {
        let err = MoveError::InvalidCoordinate {
            row: 9,
            col: 2,
            size: 8,
        };
        assert_eq!(err.to_string(), "coordinate (9, 2) is outside the 8x8 board");
    }

    #[test]
    fn test_config_error_display() {
        let err = ConfigError::Validation("board_size must be >= 3".to_string());
        assert_eq!(
            err.to_string(),
            "config validation error: board_size must be >= 3"
        );
    }

    #[test]
    fn test_board_parse_error_display() {
        let err = BoardParseError::UnknownGlyph {
            glyph: 'X',
            row: 1,
            col: 4,
        };
        assert_eq!(err.to_string(), "unrecognized glyph 'X' at row 1 col 4");
    }
}
