//! Observer port for training telemetry.

use crate::{Result, game::GameOutcome};

/// Hooks into the training lifecycle.
///
/// Observers compose: the loop notifies each registered observer in order,
/// so progress display and metrics collection stay independent of training
/// logic. Call order is `on_training_start`, then per episode
/// `on_episode_start` / `on_episode_end`, and finally `on_training_end`.
/// Every method defaults to a no-op.
pub trait Observer {
    /// Called once before the first episode.
    fn on_training_start(&mut self, _total_episodes: usize) -> Result<()> {
        Ok(())
    }

    /// Called when an episode begins.
    fn on_episode_start(&mut self, _episode: usize) -> Result<()> {
        Ok(())
    }

    /// Called when an episode reaches a terminal state.
    ///
    /// `moves` is the number of moves the episode took.
    fn on_episode_end(&mut self, _episode: usize, _outcome: GameOutcome, _moves: usize) -> Result<()> {
        Ok(())
    }

    /// Called once after the last episode.
    fn on_training_end(&mut self) -> Result<()> {
        Ok(())
    }
}
