//! Episode-driven training loop

use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::{
    Error, Result,
    game::{GameEnvironment, GameOutcome, Player, RewardPolicy, Variant},
    pipeline::opponents::RandomPolicy,
    ports::{MovePolicy, Observer},
    q_learning::QLearningAgent,
};

/// How episodes are generated.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TrainingMode {
    /// The agent chooses moves for both marks.
    SelfPlay,
    /// The agent plays its configured mark; a random policy plays the other.
    #[default]
    VsRandom,
}

impl TrainingMode {
    pub fn label(self) -> &'static str {
        match self {
            TrainingMode::SelfPlay => "self-play",
            TrainingMode::VsRandom => "vs-random",
        }
    }
}

impl fmt::Display for TrainingMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

impl FromStr for TrainingMode {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "self-play" | "selfplay" | "self" => Ok(TrainingMode::SelfPlay),
            "vs-random" | "random" => Ok(TrainingMode::VsRandom),
            other => Err(Error::ParseTrainingMode {
                input: other.to_string(),
                expected: "self-play, vs-random".to_string(),
            }),
        }
    }
}

/// Training configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrainingConfig {
    /// Game variant to train on
    pub variant: Variant,

    /// Number of training episodes
    pub episodes: usize,

    /// Episode generation mode
    pub mode: TrainingMode,

    /// Mark the agent plays in `VsRandom` mode (and the perspective used
    /// for win/loss counting in both modes)
    pub agent_player: Player,

    /// Reward policy for the environment
    pub reward_policy: RewardPolicy,

    /// Random seed for reproducibility
    pub seed: Option<u64>,
}

impl Default for TrainingConfig {
    fn default() -> Self {
        Self {
            variant: Variant::TicTacToe,
            episodes: 5000,
            mode: TrainingMode::VsRandom,
            agent_player: Player::O,
            reward_policy: RewardPolicy::MoverOutcome,
            seed: None,
        }
    }
}

/// Result of a training or evaluation run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrainingResult {
    pub episodes: usize,
    pub wins: usize,
    pub draws: usize,
    pub losses: usize,
    pub win_rate: f64,
    pub draw_rate: f64,
    pub loss_rate: f64,
}

impl TrainingResult {
    pub fn new(episodes: usize, wins: usize, draws: usize, losses: usize) -> Self {
        let rate = |count: usize| {
            if episodes > 0 {
                count as f64 / episodes as f64
            } else {
                0.0
            }
        };
        Self {
            episodes,
            wins,
            draws,
            losses,
            win_rate: rate(wins),
            draw_rate: rate(draws),
            loss_rate: rate(losses),
        }
    }

    /// Save the result as pretty-printed JSON.
    pub fn save<P: AsRef<std::path::Path>>(&self, path: P) -> Result<()> {
        let file = std::fs::File::create(path)?;
        serde_json::to_writer_pretty(file, self)?;
        Ok(())
    }

    /// Load a result from a JSON file.
    pub fn load<P: AsRef<std::path::Path>>(path: P) -> Result<Self> {
        let file = std::fs::File::open(path)?;
        let result = serde_json::from_reader(file)?;
        Ok(result)
    }
}

/// Drives repeated self-play or agent-vs-random episodes and feeds every
/// transition to the agent's learn step.
///
/// Legality is established through `legal_moves` before each `step` call, so
/// an `IllegalMove` out of the environment during training indicates a real
/// bug and propagates instead of being swallowed.
pub struct TrainingLoop {
    config: TrainingConfig,
    observers: Vec<Box<dyn Observer>>,
}

impl TrainingLoop {
    pub fn new(config: TrainingConfig) -> Self {
        Self {
            config,
            observers: Vec::new(),
        }
    }

    /// Register an observer (builder-style).
    pub fn with_observer(mut self, observer: Box<dyn Observer>) -> Self {
        self.observers.push(observer);
        self
    }

    pub fn config(&self) -> &TrainingConfig {
        &self.config
    }

    /// Run the configured number of episodes.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidConfiguration`] when the agent was built for a
    /// different variant, and propagates environment or observer failures.
    pub fn run(&mut self, agent: &mut QLearningAgent) -> Result<TrainingResult> {
        if agent.variant() != self.config.variant {
            return Err(Error::InvalidConfiguration {
                message: format!(
                    "agent trained for {} cannot run a {} loop",
                    agent.variant(),
                    self.config.variant
                ),
            });
        }

        let mut env =
            GameEnvironment::new(self.config.variant).with_reward_policy(self.config.reward_policy);
        let mut opponent = RandomPolicy::new("random-opponent");
        if let Some(seed) = self.config.seed {
            agent.reseed(seed);
            opponent.set_rng_seed(seed.wrapping_add(1));
        }

        let mut wins = 0;
        let mut draws = 0;
        let mut losses = 0;

        for observer in &mut self.observers {
            observer.on_training_start(self.config.episodes)?;
        }

        for episode in 0..self.config.episodes {
            for observer in &mut self.observers {
                observer.on_episode_start(episode)?;
            }

            let moves = self.play_episode(&mut env, agent, &mut opponent)?;
            let outcome = env.outcome();

            match outcome {
                GameOutcome::Win(winner) if winner == self.config.agent_player => wins += 1,
                GameOutcome::Win(_) => losses += 1,
                GameOutcome::Draw => draws += 1,
                GameOutcome::Ongoing => unreachable!("episode ended in a non-terminal state"),
            }

            for observer in &mut self.observers {
                observer.on_episode_end(episode, outcome, moves)?;
            }
        }

        for observer in &mut self.observers {
            observer.on_training_end()?;
        }

        Ok(TrainingResult::new(
            self.config.episodes,
            wins,
            draws,
            losses,
        ))
    }

    /// Play one episode to its terminal state, learning after every
    /// transition (terminal included). Returns the number of moves played.
    fn play_episode(
        &self,
        env: &mut GameEnvironment,
        agent: &mut QLearningAgent,
        opponent: &mut RandomPolicy,
    ) -> Result<usize> {
        env.reset();
        let mut moves = 0;

        while !env.is_terminal() {
            let mover = env.to_move();
            let legal = env.legal_moves();
            let state = env.state_key();

            let agent_turn =
                self.config.mode == TrainingMode::SelfPlay || mover == self.config.agent_player;
            let policy: &mut dyn MovePolicy = if agent_turn { agent } else { opponent };
            let action = policy.select_move(env.board(), mover, &legal)?;

            let step = env.step(action)?;
            let next_legal = env.legal_moves();
            agent.learn(state, action, step.reward, &step.state, &next_legal);
            moves += 1;
        }

        Ok(moves)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::q_learning::AgentParams;

    fn run_with(config: TrainingConfig) -> (QLearningAgent, TrainingResult) {
        let mut agent =
            QLearningAgent::new(config.variant, AgentParams::default().with_seed(0)).unwrap();
        let result = TrainingLoop::new(config).run(&mut agent).unwrap();
        (agent, result)
    }

    #[test]
    fn test_counts_add_up() {
        let config = TrainingConfig {
            episodes: 25,
            seed: Some(42),
            ..TrainingConfig::default()
        };
        let (agent, result) = run_with(config);
        assert_eq!(result.episodes, 25);
        assert_eq!(result.wins + result.draws + result.losses, 25);
        assert!(!agent.q_table().is_empty());
    }

    #[test]
    fn test_seeded_runs_are_reproducible() {
        let config = TrainingConfig {
            episodes: 15,
            seed: Some(7),
            ..TrainingConfig::default()
        };
        let (agent_a, result_a) = run_with(config.clone());
        let (agent_b, result_b) = run_with(config);
        assert_eq!(result_a, result_b);
        assert_eq!(
            agent_a.q_table().entry_count(),
            agent_b.q_table().entry_count()
        );
        assert_eq!(agent_a.epsilon(), agent_b.epsilon());
    }

    #[test]
    fn test_self_play_mode_runs() {
        let config = TrainingConfig {
            episodes: 10,
            mode: TrainingMode::SelfPlay,
            variant: Variant::FiveInARow,
            seed: Some(3),
            ..TrainingConfig::default()
        };
        let (agent, result) = run_with(config);
        assert_eq!(result.episodes, 10);
        assert!(agent.q_table().state_count() > 0);
    }

    #[test]
    fn test_variant_mismatch_rejected() {
        let config = TrainingConfig {
            variant: Variant::FiveInARow,
            ..TrainingConfig::default()
        };
        let mut agent =
            QLearningAgent::new(Variant::TicTacToe, AgentParams::default()).unwrap();
        assert!(TrainingLoop::new(config).run(&mut agent).is_err());
    }

    #[test]
    fn test_epsilon_decays_over_training() {
        let config = TrainingConfig {
            episodes: 50,
            seed: Some(1),
            ..TrainingConfig::default()
        };
        let (agent, _) = run_with(config);
        assert!(agent.epsilon() < 1.0);
        assert!(agent.epsilon() >= 0.01);
    }

    #[test]
    fn test_mode_parsing() {
        assert_eq!(
            "self-play".parse::<TrainingMode>().unwrap(),
            TrainingMode::SelfPlay
        );
        assert_eq!(
            "random".parse::<TrainingMode>().unwrap(),
            TrainingMode::VsRandom
        );
        assert!("tournament".parse::<TrainingMode>().is_err());
    }
}
