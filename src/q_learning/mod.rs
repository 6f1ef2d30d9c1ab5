//! Tabular Q-learning
//!
//! Off-policy temporal difference control over a lazily grown state-action
//! table. Action selection is ε-greedy with geometric ε decay, and a one-ply
//! win/block heuristic takes precedence over learned values during
//! exploitation.
//!
//! ## Usage
//!
//! ```no_run
//! use kinrow::game::Variant;
//! use kinrow::q_learning::{AgentParams, QLearningAgent};
//!
//! let params = AgentParams::default().with_seed(42);
//! let agent = QLearningAgent::new(Variant::TicTacToe, params)?;
//! # Ok::<(), kinrow::Error>(())
//! ```

pub mod agent;
pub mod q_table;
pub mod serialization;

pub use agent::{AgentParams, QLearningAgent};
pub use q_table::QTable;
pub use serialization::{LoadStatus, SavedAgent};
