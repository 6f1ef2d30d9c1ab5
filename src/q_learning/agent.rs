//! Q-learning agent: ε-greedy exploration over a Q-table, gated by the
//! forced-move heuristic

use rand::{Rng, SeedableRng, rngs::StdRng, seq::IndexedRandom};
use serde::{Deserialize, Serialize};

use crate::{
    Error, Result,
    game::{Board, Player, Variant},
    heuristic::HeuristicOverride,
    ports::MovePolicy,
    q_learning::q_table::QTable,
    types::StateKey,
};

/// Hyperparameters for [`QLearningAgent`].
///
/// # Examples
///
/// ```
/// use kinrow::q_learning::AgentParams;
///
/// let params = AgentParams::default()
///     .with_epsilon(0.5)
///     .with_seed(42);
/// assert!(params.validate().is_ok());
/// ```
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct AgentParams {
    /// Learning rate α
    pub learning_rate: f64,
    /// Discount factor γ
    pub discount_factor: f64,
    /// Initial exploration rate ε
    pub epsilon: f64,
    /// Multiplicative ε decay applied on every learn step
    pub epsilon_decay: f64,
    /// Exploration floor; ε never decays below this
    pub min_epsilon: f64,
    /// Value reported for unseen state-action pairs
    pub q_init: f64,
    /// Whether the win/block heuristic overrides the learned policy
    pub use_heuristic: bool,
    /// Random seed for reproducibility
    pub seed: Option<u64>,
}

impl Default for AgentParams {
    fn default() -> Self {
        Self {
            learning_rate: 0.1,
            discount_factor: 0.9,
            epsilon: 1.0,
            epsilon_decay: 0.995,
            min_epsilon: 0.01,
            q_init: 0.0,
            use_heuristic: true,
            seed: None,
        }
    }
}

impl AgentParams {
    pub fn with_epsilon(mut self, epsilon: f64) -> Self {
        self.epsilon = epsilon;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn with_heuristic(mut self, enabled: bool) -> Self {
        self.use_heuristic = enabled;
        self
    }

    /// Check that every rate lies in its valid range.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidConfiguration`] naming the offending field.
    pub fn validate(&self) -> Result<()> {
        let check = |name: &str, value: f64, lo: f64, hi: f64| -> Result<()> {
            if value.is_finite() && (lo..=hi).contains(&value) {
                Ok(())
            } else {
                Err(Error::InvalidConfiguration {
                    message: format!("{name} must be in [{lo}, {hi}], got {value}"),
                })
            }
        };
        check("learning_rate", self.learning_rate, 0.0, 1.0)?;
        check("discount_factor", self.discount_factor, 0.0, 1.0)?;
        check("epsilon", self.epsilon, 0.0, 1.0)?;
        check("epsilon_decay", self.epsilon_decay, 0.0, 1.0)?;
        check("min_epsilon", self.min_epsilon, 0.0, 1.0)?;
        if self.min_epsilon > self.epsilon {
            return Err(Error::InvalidConfiguration {
                message: format!(
                    "min_epsilon ({}) must not exceed epsilon ({})",
                    self.min_epsilon, self.epsilon
                ),
            });
        }
        Ok(())
    }
}

/// Serializable snapshot of an agent, used by the persistence layer.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub(crate) struct AgentSnapshot {
    pub q_table: QTable,
    pub variant: Variant,
    pub epsilon: f64,
    pub initial_epsilon: f64,
    pub epsilon_decay: f64,
    pub min_epsilon: f64,
    pub use_heuristic: bool,
    pub rng_seed: Option<u64>,
}

fn build_rng(seed: Option<u64>) -> StdRng {
    if let Some(seed) = seed {
        StdRng::seed_from_u64(seed)
    } else {
        StdRng::from_rng(&mut rand::rng())
    }
}

/// Tabular Q-learning agent for one game variant.
///
/// Owns its [`QTable`] and exploration rate exclusively; the environment is
/// only ever seen through immutable board snapshots. Action choice runs in
/// a fixed order: explore, then forced win/block, then greedy exploitation.
#[derive(Debug, Clone)]
pub struct QLearningAgent {
    q_table: QTable,
    variant: Variant,
    epsilon: f64,
    initial_epsilon: f64,
    epsilon_decay: f64,
    min_epsilon: f64,
    use_heuristic: bool,
    rng: StdRng,
    rng_seed: Option<u64>,
}

impl QLearningAgent {
    /// Create a fresh agent for `variant`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidConfiguration`] for out-of-range parameters.
    pub fn new(variant: Variant, params: AgentParams) -> Result<Self> {
        params.validate()?;
        Ok(Self {
            q_table: QTable::new(params.learning_rate, params.discount_factor, params.q_init),
            variant,
            epsilon: params.epsilon,
            initial_epsilon: params.epsilon,
            epsilon_decay: params.epsilon_decay,
            min_epsilon: params.min_epsilon,
            use_heuristic: params.use_heuristic,
            rng: build_rng(params.seed),
            rng_seed: params.seed,
        })
    }

    /// Choose a move for `mover` in the given position.
    ///
    /// 1. With probability ε, a uniformly random legal move (exploration).
    /// 2. Otherwise a forced win/block from [`HeuristicOverride`], if any.
    /// 3. Otherwise the greedy Q-table move, ties broken toward the first
    ///    entry of `legal_moves`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NoLegalMoves`] when `legal_moves` is empty; calling
    /// this on a terminal position is a sequencing bug in the caller.
    pub fn choose_action(
        &mut self,
        board: &Board,
        mover: Player,
        legal_moves: &[usize],
    ) -> Result<usize> {
        if legal_moves.is_empty() {
            return Err(Error::NoLegalMoves);
        }

        if self.rng.random::<f64>() < self.epsilon {
            // choose() cannot fail here: the slice is non-empty
            return Ok(*legal_moves.choose(&mut self.rng).unwrap_or(&legal_moves[0]));
        }

        if self.use_heuristic {
            if let Some(forced) =
                HeuristicOverride::forced_move(board, mover, self.variant.run_length())
            {
                return Ok(forced);
            }
        }

        // greedy_action only returns None for an empty slice, checked above
        self.q_table
            .greedy_action(&board.key(), legal_moves)
            .ok_or(Error::NoLegalMoves)
    }

    /// Apply one temporal-difference update, then decay ε.
    ///
    /// `next_legal_moves` are the legal moves in `next_state`; pass an empty
    /// slice for terminal successors. ε decays geometrically on every call
    /// and is floored at `min_epsilon`.
    pub fn learn(
        &mut self,
        state: StateKey,
        action: usize,
        reward: f64,
        next_state: &StateKey,
        next_legal_moves: &[usize],
    ) {
        self.q_table
            .td_update(state, action, reward, next_state, next_legal_moves);
        self.epsilon = (self.epsilon * self.epsilon_decay).max(self.min_epsilon);
    }

    /// Current exploration rate.
    pub fn epsilon(&self) -> f64 {
        self.epsilon
    }

    /// Override the exploration rate (e.g. 0.0 for evaluation play).
    pub fn set_epsilon(&mut self, epsilon: f64) {
        self.epsilon = epsilon;
    }

    /// Reseed the internal RNG for reproducible runs.
    pub fn reseed(&mut self, seed: u64) {
        self.rng = StdRng::seed_from_u64(seed);
        self.rng_seed = Some(seed);
    }

    /// The game variant this agent was built for.
    pub fn variant(&self) -> Variant {
        self.variant
    }

    /// Read-only view of the learned table.
    pub fn q_table(&self) -> &QTable {
        &self.q_table
    }

    /// Mutable table access for tests and analysis tooling.
    pub fn q_table_mut(&mut self) -> &mut QTable {
        &mut self.q_table
    }

    /// Whether the forced-move heuristic is consulted during exploitation.
    pub fn heuristic_enabled(&self) -> bool {
        self.use_heuristic
    }

    /// Forget everything: clear the table and restore the initial ε.
    pub fn reset(&mut self) {
        self.q_table.reset();
        self.epsilon = self.initial_epsilon;
        self.rng = build_rng(self.rng_seed);
    }

    pub(crate) fn export_snapshot(&self) -> AgentSnapshot {
        AgentSnapshot {
            q_table: self.q_table.clone(),
            variant: self.variant,
            epsilon: self.epsilon,
            initial_epsilon: self.initial_epsilon,
            epsilon_decay: self.epsilon_decay,
            min_epsilon: self.min_epsilon,
            use_heuristic: self.use_heuristic,
            rng_seed: self.rng_seed,
        }
    }

    pub(crate) fn from_snapshot(snapshot: AgentSnapshot) -> Self {
        Self {
            q_table: snapshot.q_table,
            variant: snapshot.variant,
            epsilon: snapshot.epsilon,
            initial_epsilon: snapshot.initial_epsilon,
            epsilon_decay: snapshot.epsilon_decay,
            min_epsilon: snapshot.min_epsilon,
            use_heuristic: snapshot.use_heuristic,
            rng: build_rng(snapshot.rng_seed),
            rng_seed: snapshot.rng_seed,
        }
    }
}

impl MovePolicy for QLearningAgent {
    fn select_move(
        &mut self,
        board: &Board,
        mover: Player,
        legal_moves: &[usize],
    ) -> Result<usize> {
        self.choose_action(board, mover, legal_moves)
    }

    fn name(&self) -> &str {
        "q-learning"
    }

    fn set_rng_seed(&mut self, seed: u64) {
        self.reseed(seed);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn exploit_params() -> AgentParams {
        let mut params = AgentParams::default().with_epsilon(0.0).with_seed(7);
        params.min_epsilon = 0.0;
        params
    }

    fn exploit_agent() -> QLearningAgent {
        QLearningAgent::new(Variant::TicTacToe, exploit_params()).unwrap()
    }

    #[test]
    fn test_choose_action_empty_legal_moves_fails() {
        let mut agent = exploit_agent();
        let board = Board::new(3);
        assert!(matches!(
            agent.choose_action(&board, Player::X, &[]),
            Err(Error::NoLegalMoves)
        ));
    }

    #[test]
    fn test_exploitation_is_greedy() {
        let mut agent = exploit_agent();
        let board = Board::new(3);
        let key = board.key();
        agent.q_table_mut().set(key.clone(), 6, 0.9);
        agent.q_table_mut().set(key, 2, 0.4);

        let legal: Vec<usize> = (0..9).collect();
        assert_eq!(agent.choose_action(&board, Player::X, &legal).unwrap(), 6);
    }

    #[test]
    fn test_heuristic_overrides_learned_values() {
        // Winning move at 2 must beat a higher-valued alternative.
        let mut agent = exploit_agent();
        let mut board = Board::new(3);
        board.apply(0, Player::X).unwrap();
        board.apply(3, Player::O).unwrap();
        board.apply(1, Player::X).unwrap();
        board.apply(4, Player::O).unwrap();

        agent.q_table_mut().set(board.key(), 8, 100.0);

        let legal = board.legal_moves();
        assert_eq!(agent.choose_action(&board, Player::X, &legal).unwrap(), 2);
    }

    #[test]
    fn test_heuristic_disabled_follows_table() {
        let params = exploit_params().with_heuristic(false);
        let mut agent = QLearningAgent::new(Variant::TicTacToe, params).unwrap();

        let mut board = Board::new(3);
        board.apply(0, Player::X).unwrap();
        board.apply(3, Player::O).unwrap();
        board.apply(1, Player::X).unwrap();
        board.apply(4, Player::O).unwrap();

        agent.q_table_mut().set(board.key(), 8, 100.0);

        let legal = board.legal_moves();
        assert_eq!(agent.choose_action(&board, Player::X, &legal).unwrap(), 8);
    }

    #[test]
    fn test_move_policy_delegates_to_choose_action() {
        let mut agent = exploit_agent();
        let board = Board::new(3);
        agent.q_table_mut().set(board.key(), 5, 1.0);

        let legal: Vec<usize> = (0..9).collect();
        let action = MovePolicy::select_move(&mut agent, &board, Player::X, &legal).unwrap();
        assert_eq!(action, 5);
        assert_eq!(MovePolicy::name(&agent), "q-learning");
    }

    #[test]
    fn test_exploration_returns_legal_move() {
        let params = AgentParams::default().with_seed(3);
        let mut agent = QLearningAgent::new(Variant::TicTacToe, params).unwrap();
        let board = Board::new(3);
        let legal = vec![1, 4, 7];
        for _ in 0..20 {
            let action = agent.choose_action(&board, Player::X, &legal).unwrap();
            assert!(legal.contains(&action));
        }
    }

    #[test]
    fn test_learn_decays_epsilon_with_floor() {
        let mut params = AgentParams::default().with_epsilon(0.5);
        params.epsilon_decay = 0.5;
        params.min_epsilon = 0.2;
        let mut agent = QLearningAgent::new(Variant::TicTacToe, params).unwrap();

        let state = Board::new(3).key();
        agent.learn(state.clone(), 0, 0.0, &state, &[1]);
        assert_eq!(agent.epsilon(), 0.25);
        agent.learn(state.clone(), 0, 0.0, &state, &[1]);
        assert_eq!(agent.epsilon(), 0.2);
        agent.learn(state.clone(), 0, 0.0, &state, &[1]);
        assert_eq!(agent.epsilon(), 0.2);
    }

    #[test]
    fn test_invalid_params_rejected() {
        let mut params = AgentParams::default();
        params.learning_rate = 1.5;
        assert!(QLearningAgent::new(Variant::TicTacToe, params).is_err());

        let mut params = AgentParams::default();
        params.epsilon = 0.1;
        params.min_epsilon = 0.5;
        assert!(QLearningAgent::new(Variant::TicTacToe, params).is_err());
    }

    #[test]
    fn test_reset_restores_initial_state() {
        let params = AgentParams::default().with_seed(5);
        let mut agent = QLearningAgent::new(Variant::TicTacToe, params).unwrap();
        let state = Board::new(3).key();
        agent.learn(state.clone(), 0, 1.0, &state, &[]);
        assert!(!agent.q_table().is_empty());
        assert!(agent.epsilon() < 1.0);

        agent.reset();
        assert!(agent.q_table().is_empty());
        assert_eq!(agent.epsilon(), 1.0);
    }
}
