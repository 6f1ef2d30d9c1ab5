//! Greedy-play evaluation against a scripted opponent

use crate::{
    Result,
    game::{GameEnvironment, GameOutcome, Player},
    pipeline::{opponents::RandomPolicy, training::TrainingResult},
    ports::MovePolicy,
    q_learning::QLearningAgent,
};

/// Evaluation configuration
#[derive(Debug, Clone, Copy)]
pub struct EvaluationConfig {
    /// Number of evaluation games
    pub games: usize,
    /// Mark the agent plays
    pub agent_player: Player,
    /// Random seed for the opponent
    pub seed: Option<u64>,
}

impl Default for EvaluationConfig {
    fn default() -> Self {
        Self {
            games: 100,
            agent_player: Player::O,
            seed: None,
        }
    }
}

/// Play `games` games against a random opponent with exploration disabled
/// and no learning, and report the outcome tally.
///
/// The agent's exploration rate is restored afterwards, so evaluation can be
/// interleaved with training.
pub fn evaluate(agent: &mut QLearningAgent, config: EvaluationConfig) -> Result<TrainingResult> {
    let mut env = GameEnvironment::new(agent.variant());
    let mut opponent = RandomPolicy::new("random-opponent");
    if let Some(seed) = config.seed {
        opponent.set_rng_seed(seed);
    }

    let saved_epsilon = agent.epsilon();
    agent.set_epsilon(0.0);

    let mut wins = 0;
    let mut draws = 0;
    let mut losses = 0;

    let outcome = (|| -> Result<()> {
        for _ in 0..config.games {
            env.reset();
            while !env.is_terminal() {
                let mover = env.to_move();
                let legal = env.legal_moves();
                let action = if mover == config.agent_player {
                    agent.choose_action(env.board(), mover, &legal)?
                } else {
                    opponent.select_move(env.board(), mover, &legal)?
                };
                env.step(action)?;
            }
            match env.outcome() {
                GameOutcome::Win(winner) if winner == config.agent_player => wins += 1,
                GameOutcome::Win(_) => losses += 1,
                _ => draws += 1,
            }
        }
        Ok(())
    })();

    agent.set_epsilon(saved_epsilon);
    outcome?;

    Ok(TrainingResult::new(config.games, wins, draws, losses))
}
