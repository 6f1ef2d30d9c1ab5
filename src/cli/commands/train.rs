//! Train command - run a training loop and persist the resulting agent

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;

use crate::{
    adapters::MsgPackRepository,
    cli::parse_player,
    game::{RewardPolicy, Variant},
    pipeline::{ProgressObserver, TrainingConfig, TrainingLoop, TrainingMode},
    ports::AgentRepository,
    q_learning::{AgentParams, QLearningAgent, SavedAgent},
};

#[derive(Parser, Debug)]
#[command(about = "Train a Q-learning agent", allow_negative_numbers = true)]
pub struct TrainArgs {
    /// Game variant (tictactoe, five-in-a-row)
    #[arg(long, short = 'v', default_value = "tictactoe")]
    pub variant: String,

    /// Number of training episodes
    #[arg(long, short = 'e', default_value_t = 5000)]
    pub episodes: usize,

    /// Episode generation mode (self-play, vs-random)
    #[arg(long, short = 'm', default_value = "vs-random")]
    pub mode: String,

    /// Mark the agent plays (`x` or `o`)
    #[arg(long, default_value = "o")]
    pub agent_player: String,

    /// Reward policy (mover-outcome, turn-parity)
    #[arg(long, default_value = "mover-outcome")]
    pub reward_policy: String,

    /// Learning rate alpha
    #[arg(long, default_value_t = 0.1)]
    pub learning_rate: f64,

    /// Discount factor gamma
    #[arg(long, default_value_t = 0.9)]
    pub discount_factor: f64,

    /// Initial exploration rate epsilon
    #[arg(long, default_value_t = 1.0)]
    pub epsilon: f64,

    /// Multiplicative epsilon decay per learn step
    #[arg(long, default_value_t = 0.995)]
    pub epsilon_decay: f64,

    /// Exploration floor
    #[arg(long, default_value_t = 0.01)]
    pub min_epsilon: f64,

    /// Disable the win/block heuristic override
    #[arg(long, default_value_t = false)]
    pub no_heuristic: bool,

    /// Random seed for reproducibility
    #[arg(long)]
    pub seed: Option<u64>,

    /// Output file for the trained agent
    #[arg(long, short = 'O')]
    pub output: Option<PathBuf>,

    /// Optional path for a JSON result summary
    #[arg(long)]
    pub summary: Option<PathBuf>,

    /// Show progress bar
    #[arg(long, default_value_t = true)]
    pub progress: bool,
}

pub fn execute(args: TrainArgs) -> Result<()> {
    let variant: Variant = args.variant.parse()?;
    let mode: TrainingMode = args.mode.parse()?;
    let reward_policy: RewardPolicy = args.reward_policy.parse()?;
    let agent_player = parse_player(&args.agent_player)?;

    let params = AgentParams {
        learning_rate: args.learning_rate,
        discount_factor: args.discount_factor,
        epsilon: args.epsilon,
        epsilon_decay: args.epsilon_decay,
        min_epsilon: args.min_epsilon,
        use_heuristic: !args.no_heuristic,
        seed: args.seed,
        ..AgentParams::default()
    };

    let mut agent = QLearningAgent::new(variant, params)?;

    let config = TrainingConfig {
        variant,
        episodes: args.episodes,
        mode,
        agent_player,
        reward_policy,
        seed: args.seed,
    };

    let mut training = TrainingLoop::new(config);
    if args.progress {
        training = training.with_observer(Box::new(ProgressObserver::new(agent_player)));
    }

    let result = training.run(&mut agent)?;

    println!(
        "Trained {} episodes on {} ({mode}, agent {agent_player}, reward {reward_policy})",
        result.episodes, variant
    );
    println!(
        "  wins: {} ({:.1}%)  draws: {} ({:.1}%)  losses: {} ({:.1}%)",
        result.wins,
        result.win_rate * 100.0,
        result.draws,
        result.draw_rate * 100.0,
        result.losses,
        result.loss_rate * 100.0
    );
    println!(
        "  states learned: {}  final epsilon: {:.4}",
        agent.q_table().state_count(),
        agent.epsilon()
    );

    if let Some(path) = &args.output {
        MsgPackRepository::new()
            .save(&SavedAgent::from_agent(&agent), path)
            .with_context(|| format!("failed to save agent to {}", path.display()))?;
        println!("Saved agent to {}", path.display());
    }

    if let Some(path) = &args.summary {
        result
            .save(path)
            .with_context(|| format!("failed to write summary to {}", path.display()))?;
        println!("Wrote summary to {}", path.display());
    }

    Ok(())
}
