//! Game rules: board representation, win detection, and the environment
//! that drives a single game session.

pub mod board;
pub mod environment;
pub mod lines;
pub mod variant;

use serde::{Deserialize, Serialize};

pub use board::{Board, Cell, Player};
pub use environment::{GameEnvironment, RewardPolicy, Step};
pub use variant::Variant;

/// Outcome of a game position.
///
/// Always recomputed from the board via [`lines::outcome`]; never cached
/// independently of the cells it was derived from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GameOutcome {
    Ongoing,
    Win(Player),
    Draw,
}

impl GameOutcome {
    /// Whether the game has ended.
    pub fn is_terminal(self) -> bool {
        !matches!(self, GameOutcome::Ongoing)
    }

    /// The winning player, if any.
    pub fn winner(self) -> Option<Player> {
        match self {
            GameOutcome::Win(player) => Some(player),
            _ => None,
        }
    }
}
