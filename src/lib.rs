//! kinrow - tabular Q-learning player for k-in-a-row grid games
//!
//! This crate provides:
//! - Board, win detection, and a game environment for 3x3 tic-tac-toe and
//!   5x5 five-in-a-row
//! - A tabular Q-learning agent with ε-greedy exploration and a one-ply
//!   win/block heuristic override
//! - A training loop for self-play or agent-vs-random episodes
//! - Agent persistence through a repository port (MessagePack on disk)
//! - A CLI for training, evaluating, and playing against the agent

pub mod adapters;
pub mod cli;
pub mod error;
pub mod game;
pub mod heuristic;
pub mod pipeline;
pub mod ports;
pub mod q_learning;
pub mod types;

pub use error::{Error, Result};
pub use game::{
    Board, Cell, GameEnvironment, GameOutcome, Player, RewardPolicy, Step, Variant,
};
pub use heuristic::HeuristicOverride;
pub use pipeline::{TrainingConfig, TrainingLoop, TrainingMode, TrainingResult};
pub use q_learning::{AgentParams, LoadStatus, QLearningAgent, QTable, SavedAgent};
pub use types::StateKey;
