//! Evaluate command - score a saved agent against a random opponent

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;

use crate::{
    adapters::MsgPackRepository,
    cli::parse_player,
    pipeline::{EvaluationConfig, evaluate},
    ports::AgentRepository,
};

#[derive(Parser, Debug)]
#[command(about = "Evaluate a trained agent")]
pub struct EvaluateArgs {
    /// Path to a saved agent
    pub agent: PathBuf,

    /// Number of evaluation games
    #[arg(long, short = 'g', default_value_t = 100)]
    pub games: usize,

    /// Mark the agent plays (`x` or `o`)
    #[arg(long, default_value = "o")]
    pub agent_player: String,

    /// Random seed for the opponent
    #[arg(long)]
    pub seed: Option<u64>,

    /// Emit the result as JSON instead of text
    #[arg(long, default_value_t = false)]
    pub json: bool,
}

pub fn execute(args: EvaluateArgs) -> Result<()> {
    let agent_player = parse_player(&args.agent_player)?;

    let saved = MsgPackRepository::new()
        .load(&args.agent)
        .with_context(|| format!("failed to load agent from {}", args.agent.display()))?;
    let variant = saved.variant();
    let mut agent = saved.into_agent()?;

    let config = EvaluationConfig {
        games: args.games,
        agent_player,
        seed: args.seed,
    };
    let result = evaluate(&mut agent, config)?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&result)?);
    } else {
        println!(
            "Evaluated {} games on {} (agent {agent_player} vs random)",
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
    }

    Ok(())
}
