//! Scripted opponents for training and evaluation.

use rand::{SeedableRng, rngs::StdRng, seq::IndexedRandom};

use crate::{
    Error, Result,
    game::{Board, Player},
    ports::MovePolicy,
};

/// Opponent that plays a uniformly random legal move.
pub struct RandomPolicy {
    name: String,
    rng: StdRng,
}

impl RandomPolicy {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            rng: StdRng::from_rng(&mut rand::rng()),
        }
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.rng = StdRng::seed_from_u64(seed);
        self
    }
}

impl MovePolicy for RandomPolicy {
    fn select_move(
        &mut self,
        _board: &Board,
        _mover: Player,
        legal_moves: &[usize],
    ) -> Result<usize> {
        legal_moves
            .choose(&mut self.rng)
            .copied()
            .ok_or(Error::NoLegalMoves)
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn set_rng_seed(&mut self, seed: u64) {
        self.rng = StdRng::seed_from_u64(seed);
    }
}
