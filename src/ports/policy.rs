//! Move-selection port shared by learned agents and scripted opponents.

use crate::{
    Result,
    game::{Board, Player},
};

/// A source of moves for one side of a game.
///
/// Implemented by [`QLearningAgent`] and by scripted opponents such as
/// [`RandomPolicy`]; the training loop picks both sides' moves through this
/// trait, so move sources stay interchangeable.
///
/// [`QLearningAgent`]: crate::q_learning::QLearningAgent
/// [`RandomPolicy`]: crate::pipeline::RandomPolicy
pub trait MovePolicy {
    /// Select a move for `mover` from `legal_moves`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NoLegalMoves`] when invoked with an empty legal set;
    /// callers must never ask for a move in a terminal position.
    ///
    /// [`Error::NoLegalMoves`]: crate::Error::NoLegalMoves
    fn select_move(
        &mut self,
        board: &Board,
        mover: Player,
        legal_moves: &[usize],
    ) -> Result<usize>;

    /// Name used in logs and summaries.
    fn name(&self) -> &str;

    /// Reseed the policy's RNG for reproducible runs. Stateless policies may
    /// ignore this.
    fn set_rng_seed(&mut self, _seed: u64) {}
}
