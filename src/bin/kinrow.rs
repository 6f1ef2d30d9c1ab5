//! kinrow CLI - train, evaluate, and play the Q-learning game agent

use anyhow::Result;
use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "kinrow")]
#[command(version, about = "Tabular Q-learning player for k-in-a-row games", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Train an agent through self-play or against a random opponent
    Train(kinrow::cli::commands::train::TrainArgs),

    /// Evaluate a trained agent against a random opponent
    Evaluate(kinrow::cli::commands::evaluate::EvaluateArgs),

    /// Play interactively against an agent
    Play(kinrow::cli::commands::play::PlayArgs),
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Train(args) => kinrow::cli::commands::train::execute(args),
        Commands::Evaluate(args) => kinrow::cli::commands::evaluate::execute(args),
        Commands::Play(args) => kinrow::cli::commands::play::execute(args),
    }
}
