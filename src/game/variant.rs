//! Supported game variants

use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::Error;

/// A concrete game: a board side length paired with a required run length.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Variant {
    /// 3x3 board, three in a row wins.
    TicTacToe,
    /// 5x5 board, five in a row wins.
    FiveInARow,
}

impl Variant {
    /// Side length of the board.
    pub fn side(self) -> usize {
        match self {
            Variant::TicTacToe => 3,
            Variant::FiveInARow => 5,
        }
    }

    /// Number of identical marks required for a win.
    pub fn run_length(self) -> usize {
        match self {
            Variant::TicTacToe => 3,
            Variant::FiveInARow => 5,
        }
    }

    /// Total number of cells.
    pub fn cells(self) -> usize {
        self.side() * self.side()
    }

    /// Short label for file names and summaries.
    pub fn label(self) -> &'static str {
        match self {
            Variant::TicTacToe => "tictactoe",
            Variant::FiveInARow => "five-in-a-row",
        }
    }
}

impl fmt::Display for Variant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

impl FromStr for Variant {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "tictactoe" | "ttt" | "3x3" => Ok(Variant::TicTacToe),
            "five-in-a-row" | "five" | "5x5" | "gomoku" => Ok(Variant::FiveInARow),
            other => Err(Error::ParseVariant {
                input: other.to_string(),
                expected: "tictactoe, five-in-a-row".to_string(),
            }),
        }
    }
}
