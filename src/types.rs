//! Newtype wrappers shared across the crate.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::game::Cell;

/// A hashable key identifying a board position for Q-table lookups.
///
/// The key is the flattened row-major cell sequence (e.g. `".X..O...."` for a
/// 3x3 board). Two boards with identical cell contents produce identical keys
/// regardless of the move history that led to them; no information beyond the
/// grid is encoded.
///
/// # Examples
///
/// ```
/// use kinrow::game::{Board, Variant};
///
/// let board = Board::new(Variant::TicTacToe.side());
/// assert_eq!(board.key().as_str(), ".........");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct StateKey(String);

impl StateKey {
    /// Build a key from a row-major cell slice.
    pub fn from_cells(cells: &[Cell]) -> Self {
        StateKey(cells.iter().map(|&c| c.to_char()).collect())
    }

    /// Get the key as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Convert into the underlying String.
    pub fn into_string(self) -> String {
        self.0
    }
}

impl AsRef<str> for StateKey {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for StateKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
