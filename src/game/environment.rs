//! Game environment: canonical state, turn alternation, and reward signals

use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

use super::{Board, Cell, GameOutcome, Player, Variant, lines};
use crate::{Error, Result, types::StateKey};

/// Reward granted for completing a winning line.
pub const WIN_REWARD: f64 = 1.0;

/// Reward granted to both players on a draw.
pub const DRAW_REWARD: f64 = 0.0;

/// How `step` derives its reward from the move just applied.
///
/// The two policies produce materially different learned behavior, so the
/// active policy is part of the environment's public surface rather than a
/// hidden detail.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RewardPolicy {
    /// Reward follows the outcome of the move: [`WIN_REWARD`] to the mover
    /// who just completed a winning line, [`DRAW_REWARD`] on a draw, zero
    /// otherwise.
    #[default]
    MoverOutcome,
    /// Legacy turn-parity scheme: +1 when X just moved, -1 when O just
    /// moved, regardless of the outcome. Kept selectable for replaying the
    /// behavior of older trained tables; not recommended for new training.
    TurnParity,
}

impl RewardPolicy {
    /// Reward for `mover` having just produced `outcome`.
    pub fn reward(self, mover: Player, outcome: GameOutcome) -> f64 {
        match self {
            RewardPolicy::MoverOutcome => match outcome {
                GameOutcome::Win(winner) if winner == mover => WIN_REWARD,
                GameOutcome::Win(_) => -WIN_REWARD,
                GameOutcome::Draw => DRAW_REWARD,
                GameOutcome::Ongoing => 0.0,
            },
            RewardPolicy::TurnParity => match mover {
                Player::X => 1.0,
                Player::O => -1.0,
            },
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            RewardPolicy::MoverOutcome => "mover-outcome",
            RewardPolicy::TurnParity => "turn-parity",
        }
    }
}

impl fmt::Display for RewardPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

impl FromStr for RewardPolicy {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "mover-outcome" | "mover" | "outcome" => Ok(RewardPolicy::MoverOutcome),
            "turn-parity" | "parity" => Ok(RewardPolicy::TurnParity),
            other => Err(Error::ParseRewardPolicy {
                input: other.to_string(),
                expected: "mover-outcome, turn-parity".to_string(),
            }),
        }
    }
}

/// Result of one applied move.
#[derive(Debug, Clone, PartialEq)]
pub struct Step {
    /// State key after the move.
    pub state: StateKey,
    /// Reward from the mover's perspective under the active policy.
    pub reward: f64,
    /// Whether the game ended with this move.
    pub done: bool,
}

/// A single game session: the board, whose turn it is, and the rules.
///
/// The environment exclusively owns its board; components outside the game
/// module only see immutable snapshots ([`StateKey`], cell slices).
///
/// # Examples
///
/// ```
/// use kinrow::game::{GameEnvironment, Variant};
///
/// let mut env = GameEnvironment::new(Variant::TicTacToe);
/// let step = env.step(4)?;
/// assert!(!step.done);
/// assert_eq!(step.state.as_str(), "....X....");
/// # Ok::<(), kinrow::Error>(())
/// ```
#[derive(Debug, Clone)]
pub struct GameEnvironment {
    variant: Variant,
    board: Board,
    to_move: Player,
    outcome: GameOutcome,
    reward_policy: RewardPolicy,
}

impl GameEnvironment {
    /// Create a fresh environment with X to move.
    pub fn new(variant: Variant) -> Self {
        GameEnvironment {
            variant,
            board: Board::new(variant.side()),
            to_move: Player::X,
            outcome: GameOutcome::Ongoing,
            reward_policy: RewardPolicy::default(),
        }
    }

    /// Select a reward policy (builder-style).
    pub fn with_reward_policy(mut self, policy: RewardPolicy) -> Self {
        self.reward_policy = policy;
        self
    }

    /// Clear the board and hand the opening move to X.
    pub fn reset(&mut self) -> StateKey {
        self.board.clear();
        self.to_move = Player::X;
        self.outcome = GameOutcome::Ongoing;
        self.board.key()
    }

    /// Legal moves in the current position; empty once the game is over.
    pub fn legal_moves(&self) -> Vec<usize> {
        if self.outcome.is_terminal() {
            return Vec::new();
        }
        self.board.legal_moves()
    }

    /// Apply a move for the current mover and alternate turns.
    ///
    /// The returned reward is evaluated from the mover's perspective before
    /// the turn switches.
    ///
    /// # Errors
    ///
    /// Returns [`Error::GameOver`] on a terminal environment, and the board's
    /// [`Error::IllegalMove`] / [`Error::OutOfBounds`] for bad moves. Failed
    /// calls leave the environment unchanged.
    pub fn step(&mut self, mv: usize) -> Result<Step> {
        if self.outcome.is_terminal() {
            return Err(Error::GameOver);
        }

        let mover = self.to_move;
        self.board.apply(mv, mover)?;
        self.outcome = lines::outcome(&self.board, self.variant.run_length());
        let reward = self.reward_policy.reward(mover, self.outcome);
        self.to_move = mover.opponent();

        Ok(Step {
            state: self.board.key(),
            reward,
            done: self.outcome.is_terminal(),
        })
    }

    /// Read-only board access.
    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Read-only cell snapshot for display layers.
    pub fn cells(&self) -> &[Cell] {
        self.board.cells()
    }

    /// Player whose turn it is.
    pub fn to_move(&self) -> Player {
        self.to_move
    }

    /// Current outcome, recomputed on every step.
    pub fn outcome(&self) -> GameOutcome {
        self.outcome
    }

    /// Whether the game has ended.
    pub fn is_terminal(&self) -> bool {
        self.outcome.is_terminal()
    }

    /// Key for the current position.
    pub fn state_key(&self) -> StateKey {
        self.board.key()
    }

    pub fn variant(&self) -> Variant {
        self.variant
    }

    /// The active reward policy.
    pub fn reward_policy(&self) -> RewardPolicy {
        self.reward_policy
    }
}

impl fmt::Display for GameEnvironment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.board)
    }
}
